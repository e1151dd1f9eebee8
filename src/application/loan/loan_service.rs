use crate::domain::{self, ExtendDueDateError, ExtensionDays, Loan, commands::*};
use crate::ports::*;
use std::sync::Arc;

use super::errors::{LoanApplicationError, Result};

/// サービスの依存関係
///
/// データ構造として定義し、振る舞いは持たない。
/// 依存はすべて引数として関数に渡される。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub loan_repository: Arc<dyn LoanRepository>,
    pub member_service: Arc<dyn MemberService>,
    pub book_service: Arc<dyn BookService>,
    pub job_queue: Arc<dyn JobQueue>,
    pub clock: Arc<dyn Clock>,
}

/// 書籍を貸し出す
///
/// ビジネスルール：
/// - 会員が存在すること
/// - 書籍が存在すること
/// - 返却期限は貸出日 + 14日
///
/// 保存に成功した後、確認通知ジョブを投入する。
/// 投入の失敗は貸出の成否に影響しない（ログのみ）。
pub async fn register_loan(deps: &ServiceDependencies, cmd: RegisterLoan) -> Result<Loan> {
    // 1. 会員の存在確認
    let member_exists = deps
        .member_service
        .exists(cmd.member_id)
        .await
        .map_err(LoanApplicationError::MemberServiceError)?;

    if !member_exists {
        return Err(LoanApplicationError::MemberNotFound);
    }

    // 2. 書籍の存在確認
    let book_exists = deps
        .book_service
        .exists(cmd.book_id)
        .await
        .map_err(LoanApplicationError::BookServiceError)?;

    if !book_exists {
        return Err(LoanApplicationError::BookNotFound);
    }

    // 3. ドメイン層の純粋関数を呼び出し
    let loan = domain::loan::loan_book(cmd.book_id, cmd.member_id, deps.clock.now());

    // 4. 保存
    deps.loan_repository
        .insert(loan.clone())
        .await
        .map_err(LoanApplicationError::RepositoryError)?;

    // 5. 確認通知を投入（完了を待たない）
    if let Err(e) = deps.job_queue.enqueue(Job::LoanCreated {
        loan_id: loan.loan_id,
    }) {
        tracing::warn!(
            loan_id = %loan.loan_id.value(),
            error = %e,
            "failed to enqueue loan confirmation"
        );
    }

    Ok(loan)
}

/// 返却期限を延長する
///
/// 検証順序（それぞれ別の拒否理由）：
/// 1. 延長日数が1以上であること（InvalidArgument）
/// 2. 貸出が存在すること（LoanNotFound）
/// 3. 返却期限を過ぎていないこと（AlreadyExpired）
/// 4. 返却済みでないこと（AlreadyReturned）
///
/// 読み取りから書き込みまでは返却期限の compare-and-set で保護する。
/// 拒否時は貸出を一切変更しない。
pub async fn extend_due_date(deps: &ServiceDependencies, cmd: ExtendDueDate) -> Result<Loan> {
    // 1. 延長日数の検証
    let additional_days =
        ExtensionDays::try_from(cmd.additional_days).map_err(ExtendDueDateError::from)?;

    // 2. 貸出を取得
    let loan = deps
        .loan_repository
        .get_by_id(cmd.loan_id)
        .await
        .map_err(LoanApplicationError::RepositoryError)?
        .ok_or(LoanApplicationError::LoanNotFound)?;

    // 3. ドメイン層の純粋関数を呼び出し
    let extended = domain::loan::extend_due_date(&loan, additional_days, deps.clock.today())?;

    // 4. 読み取り時の返却期限のままであれば更新
    let updated = deps
        .loan_repository
        .update_due_date(loan.loan_id, loan.due_date, extended.due_date)
        .await
        .map_err(LoanApplicationError::RepositoryError)?;

    if !updated {
        return Err(LoanApplicationError::ConcurrentModification);
    }

    tracing::info!(
        loan_id = %loan.loan_id.value(),
        old_due_date = %loan.due_date,
        new_due_date = %extended.due_date,
        "loan due date extended"
    );

    Ok(extended)
}
