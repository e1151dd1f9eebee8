mod common;

use chrono::{Duration, NaiveDate};
use common::{TestWorld, days_from_today};
use rusty_library_jobs::adapters::mock::LibraryStore;
use rusty_library_jobs::application::loan::{
    LoanApplicationError, LoanCreatedOutcome, ServiceDependencies, extend_due_date,
    register_loan,
};
use rusty_library_jobs::domain::commands::*;
use rusty_library_jobs::domain::{BookId, Loan, LoanId, MemberId};
use rusty_library_jobs::ports::{Job, LoanDetails, LoanRepository, loan_repository};
use std::sync::Arc;

// ============================================================================
// 返却期限の延長
// ============================================================================

#[tokio::test]
async fn test_extend_due_date_success() {
    // Arrange: 14日後が返却期限
    let world = TestWorld::new();
    let (member, book) = world.add_member_and_book("Test1", "test1@test1", "Book1");
    let loan = world.add_loan_due(&member, &book, days_from_today(14));

    // Act
    let cmd = ExtendDueDate {
        loan_id: loan.loan_id,
        additional_days: 10,
    };
    let extended = extend_due_date(&world.service_deps(), cmd).await.unwrap();

    // Assert: 今日 + 24日
    assert_eq!(extended.due_date, days_from_today(24));
    assert_eq!(
        world.store.loan(loan.loan_id).unwrap().due_date,
        days_from_today(24)
    );
}

#[tokio::test]
async fn test_extend_due_date_rejects_negative_days() {
    let world = TestWorld::new();
    let (member, book) = world.add_member_and_book("Test1", "test1@test1", "Book1");
    let loan = world.add_loan_due(&member, &book, days_from_today(14));

    let cmd = ExtendDueDate {
        loan_id: loan.loan_id,
        additional_days: -1,
    };
    let result = extend_due_date(&world.service_deps(), cmd).await;

    assert!(matches!(
        result,
        Err(LoanApplicationError::InvalidArgument(_))
    ));
    // 返却期限は変更されない
    assert_eq!(
        world.store.loan(loan.loan_id).unwrap().due_date,
        days_from_today(14)
    );
}

#[tokio::test]
async fn test_extend_due_date_rejects_zero_days() {
    let world = TestWorld::new();
    let (member, book) = world.add_member_and_book("Test1", "test1@test1", "Book1");
    let loan = world.add_loan_due(&member, &book, days_from_today(14));

    let cmd = ExtendDueDate {
        loan_id: loan.loan_id,
        additional_days: 0,
    };
    let result = extend_due_date(&world.service_deps(), cmd).await;

    assert!(matches!(
        result,
        Err(LoanApplicationError::InvalidArgument(_))
    ));
}

#[tokio::test]
async fn test_extend_due_date_rejects_expired_loan() {
    // Arrange: 15日前が返却期限（延滞中）
    let world = TestWorld::new();
    let (member, book) = world.add_member_and_book("Test1", "test1@test1", "Book1");
    let loan = world.add_loan_due(&member, &book, days_from_today(-15));

    let cmd = ExtendDueDate {
        loan_id: loan.loan_id,
        additional_days: 10,
    };
    let result = extend_due_date(&world.service_deps(), cmd).await;

    assert!(matches!(result, Err(LoanApplicationError::AlreadyExpired)));
    assert_eq!(
        world.store.loan(loan.loan_id).unwrap().due_date,
        days_from_today(-15)
    );
}

#[tokio::test]
async fn test_extend_due_date_invalid_argument_checked_before_expiry() {
    // 延滞中でも、延長日数の検証が先に行われる
    let world = TestWorld::new();
    let (member, book) = world.add_member_and_book("Test1", "test1@test1", "Book1");
    let loan = world.add_loan_due(&member, &book, days_from_today(-15));

    let cmd = ExtendDueDate {
        loan_id: loan.loan_id,
        additional_days: -1,
    };
    let result = extend_due_date(&world.service_deps(), cmd).await;

    assert!(matches!(
        result,
        Err(LoanApplicationError::InvalidArgument(_))
    ));
}

#[tokio::test]
async fn test_extend_due_date_rejects_returned_loan() {
    let world = TestWorld::new();
    let (member, book) = world.add_member_and_book("Test1", "test1@test1", "Book1");
    let loan = world.add_loan_due(&member, &book, days_from_today(5));
    world.store.mark_returned(loan.loan_id);

    let cmd = ExtendDueDate {
        loan_id: loan.loan_id,
        additional_days: 10,
    };
    let result = extend_due_date(&world.service_deps(), cmd).await;

    assert!(matches!(result, Err(LoanApplicationError::AlreadyReturned)));
    assert_eq!(
        world.store.loan(loan.loan_id).unwrap().due_date,
        days_from_today(5)
    );
}

#[tokio::test]
async fn test_extend_due_date_loan_not_found() {
    let world = TestWorld::new();

    let cmd = ExtendDueDate {
        loan_id: LoanId::new(),
        additional_days: 10,
    };
    let result = extend_due_date(&world.service_deps(), cmd).await;

    assert!(matches!(result, Err(LoanApplicationError::LoanNotFound)));
}

/// 読み取り後、書き込み前に別の延長が割り込むリポジトリ
struct RacingRepository {
    inner: Arc<LibraryStore>,
}

#[async_trait::async_trait]
impl LoanRepository for RacingRepository {
    async fn insert(&self, loan: Loan) -> loan_repository::Result<()> {
        self.inner.insert(loan).await
    }

    async fn get_by_id(&self, loan_id: LoanId) -> loan_repository::Result<Option<Loan>> {
        self.inner.get_by_id(loan_id).await
    }

    async fn get_details(&self, loan_id: LoanId) -> loan_repository::Result<Option<LoanDetails>> {
        self.inner.get_details(loan_id).await
    }

    async fn find_unreturned_due_before(
        &self,
        cutoff: NaiveDate,
    ) -> loan_repository::Result<Vec<LoanDetails>> {
        self.inner.find_unreturned_due_before(cutoff).await
    }

    async fn update_due_date(
        &self,
        loan_id: LoanId,
        expected: NaiveDate,
        new_due_date: NaiveDate,
    ) -> loan_repository::Result<bool> {
        // 先に別のリクエストが1日延長する
        self.inner
            .update_due_date(loan_id, expected, expected + Duration::days(1))
            .await?;
        self.inner
            .update_due_date(loan_id, expected, new_due_date)
            .await
    }
}

#[tokio::test]
async fn test_extend_due_date_detects_concurrent_modification() {
    let world = TestWorld::new();
    let (member, book) = world.add_member_and_book("Test1", "test1@test1", "Book1");
    let loan = world.add_loan_due(&member, &book, days_from_today(14));

    let deps = ServiceDependencies {
        loan_repository: Arc::new(RacingRepository {
            inner: world.store.clone(),
        }),
        ..world.service_deps()
    };

    let cmd = ExtendDueDate {
        loan_id: loan.loan_id,
        additional_days: 10,
    };
    let result = extend_due_date(&deps, cmd).await;

    assert!(matches!(
        result,
        Err(LoanApplicationError::ConcurrentModification)
    ));
    // 先に書き込んだ側の値が残る
    assert_eq!(
        world.store.loan(loan.loan_id).unwrap().due_date,
        days_from_today(15)
    );
}

// ============================================================================
// 貸出作成
// ============================================================================

#[tokio::test]
async fn test_register_loan_success_enqueues_confirmation() {
    let world = TestWorld::new();
    let (member, book) = world.add_member_and_book("Test1", "test1@test1", "Book1");

    let cmd = RegisterLoan {
        book_id: book.book_id,
        member_id: member.member_id,
    };
    let loan = register_loan(&world.service_deps(), cmd).await.unwrap();

    assert_eq!(loan.due_date, days_from_today(14));
    assert!(!loan.is_returned);
    assert!(world.store.loan(loan.loan_id).is_some());

    // 確認通知は投入されるだけで、まだ送られていない
    assert_eq!(
        world.job_queue.jobs(),
        vec![Job::LoanCreated {
            loan_id: loan.loan_id
        }]
    );
    assert!(world.mail_sender.sent_mails().is_empty());
}

#[tokio::test]
async fn test_register_loan_member_not_found() {
    let world = TestWorld::new();
    let (_, book) = world.add_member_and_book("Test1", "test1@test1", "Book1");

    let cmd = RegisterLoan {
        book_id: book.book_id,
        member_id: MemberId::new(),
    };
    let result = register_loan(&world.service_deps(), cmd).await;

    assert!(matches!(result, Err(LoanApplicationError::MemberNotFound)));
    assert!(world.job_queue.jobs().is_empty());
}

#[tokio::test]
async fn test_register_loan_book_not_found() {
    let world = TestWorld::new();
    let (member, _) = world.add_member_and_book("Test1", "test1@test1", "Book1");

    let cmd = RegisterLoan {
        book_id: BookId::new(),
        member_id: member.member_id,
    };
    let result = register_loan(&world.service_deps(), cmd).await;

    assert!(matches!(result, Err(LoanApplicationError::BookNotFound)));
    assert!(world.job_queue.jobs().is_empty());
}

// ============================================================================
// 貸出作成通知
// ============================================================================

#[tokio::test]
async fn test_on_loan_created_sends_one_confirmation() {
    let world = TestWorld::new();
    let (member, book) = world.add_member_and_book("Test1", "test1@test1", "Book1");
    let loan = world.add_loan_due(&member, &book, days_from_today(14));

    let outcome = world.notifier().on_loan_created(loan.loan_id).await.unwrap();

    assert_eq!(outcome, LoanCreatedOutcome::Notified);
    let sent = world.mail_sender.sent_mails();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "Book Loaned Successfully");
    assert_eq!(sent[0].to, vec!["test1@test1".to_string()]);
    assert_eq!(
        sent[0].body,
        "Hello Test1,\n\nYou have successfully loaned \"Book1\".\nPlease return it by the due date."
    );
}

#[tokio::test]
async fn test_on_loan_created_with_unknown_loan_is_noop() {
    let world = TestWorld::new();

    let outcome = world.notifier().on_loan_created(LoanId::new()).await;

    assert!(matches!(outcome, Ok(LoanCreatedOutcome::LoanNotFound)));
    assert!(world.mail_sender.sent_mails().is_empty());
}

#[tokio::test]
async fn test_on_loan_created_after_loan_deleted_is_noop() {
    // 投入後、実行前に貸出が削除された
    let world = TestWorld::new();
    let (member, book) = world.add_member_and_book("Test1", "test1@test1", "Book1");
    let loan = register_loan(
        &world.service_deps(),
        RegisterLoan {
            book_id: book.book_id,
            member_id: member.member_id,
        },
    )
    .await
    .unwrap();
    world.store.remove_loan(loan.loan_id);

    let outcome = world.notifier().on_loan_created(loan.loan_id).await.unwrap();

    assert_eq!(outcome, LoanCreatedOutcome::LoanNotFound);
    assert!(world.mail_sender.sent_mails().is_empty());
}

#[tokio::test]
async fn test_on_loan_created_reads_member_at_run_time() {
    // 投入後に会員のメールアドレスが変わった場合、新しいアドレスに送る
    let world = TestWorld::new();
    let (member, book) = world.add_member_and_book("Test1", "old@example.com", "Book1");
    let loan = world.add_loan_due(&member, &book, days_from_today(14));
    world
        .store
        .update_member_email(member.member_id, "new@example.com");

    world.notifier().on_loan_created(loan.loan_id).await.unwrap();

    let sent = world.mail_sender.sent_mails();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, vec!["new@example.com".to_string()]);
}

#[tokio::test]
async fn test_on_loan_created_surfaces_dispatch_failure() {
    let world = TestWorld::new();
    let (member, book) = world.add_member_and_book("Test1", "test1@test1", "Book1");
    let loan = world.add_loan_due(&member, &book, days_from_today(14));
    world.mail_sender.fail_for("test1@test1");

    let result = world.notifier().on_loan_created(loan.loan_id).await;

    assert!(matches!(
        result,
        Err(LoanApplicationError::Notification(_))
    ));
}

