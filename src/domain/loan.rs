use chrono::{DateTime, Days, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{BookId, ExtendDueDateError, ExtensionDays, GracePeriod, LoanId, MemberId};

/// 貸出期間（日数）
pub const LOAN_PERIOD_DAYS: i64 = 14;

/// Loan集約 - 1冊の書籍の1回の貸出
///
/// 不変条件：
/// - 返却済みの貸出の返却期限は変更されない
/// - 返却期限は延長（後ろ倒し）のみ可能で、延滞前に限る
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    // 識別子
    pub loan_id: LoanId,

    // 他の集約への参照（IDのみ）
    pub book_id: BookId,
    pub member_id: MemberId,

    // 貸出管理の責務
    pub due_date: NaiveDate,
    pub is_returned: bool,

    // 監査情報
    pub created_at: DateTime<Utc>,
}

/// 会員 - 通知の宛先としてのみ使用する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub member_id: MemberId,
    pub email: String,
    pub display_name: String,
}

/// 書籍 - 通知本文のためにタイトルのみ保持する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub book_id: BookId,
    pub title: String,
}

/// 純粋関数：書籍を貸し出す
///
/// ビジネスルール：
/// - 返却期限は貸出日 + 14日
/// - 未返却で作成される
pub fn loan_book(book_id: BookId, member_id: MemberId, loaned_at: DateTime<Utc>) -> Loan {
    Loan {
        loan_id: LoanId::new(),
        book_id,
        member_id,
        due_date: loaned_at.date_naive() + Duration::days(LOAN_PERIOD_DAYS),
        is_returned: false,
        created_at: loaned_at,
    }
}

/// 純粋関数：督促の基準日を求める
///
/// 返却期限がこの日付より前（境界を含まない）の貸出が督促対象。
/// 暦の範囲外になる場合は `None`（督促対象の貸出は存在しない）。
pub fn overdue_cutoff(reference_date: NaiveDate, grace_period: GracePeriod) -> Option<NaiveDate> {
    reference_date.checked_sub_days(Days::new(u64::from(grace_period.value())))
}

/// 純粋関数：督促対象か判定する
///
/// `!is_returned && due_date < reference_date - grace_period`
pub fn is_reminder_due(loan: &Loan, reference_date: NaiveDate, grace_period: GracePeriod) -> bool {
    !loan.is_returned
        && overdue_cutoff(reference_date, grace_period).is_some_and(|cutoff| loan.due_date < cutoff)
}

/// 純粋関数：延滞判定（猶予期間なし）
pub fn is_overdue(loan: &Loan, today: NaiveDate) -> bool {
    loan.due_date < today
}

/// 純粋関数：返却期限を延長する
///
/// ビジネスルール：
/// - 延滞中（返却期限 < 今日）は延長不可
/// - 返却済みは延長不可
/// - 延長時：現在の返却期限 + 延長日数（暦日）
///
/// 副作用なし。延長後の新しいLoanを返す。
pub fn extend_due_date(
    loan: &Loan,
    additional_days: ExtensionDays,
    today: NaiveDate,
) -> Result<Loan, ExtendDueDateError> {
    // バリデーション：延滞中は延長不可
    if is_overdue(loan, today) {
        return Err(ExtendDueDateError::AlreadyExpired);
    }

    // バリデーション：返却済みは延長不可
    if loan.is_returned {
        return Err(ExtendDueDateError::AlreadyReturned);
    }

    let new_due_date = loan
        .due_date
        .checked_add_days(Days::new(u64::from(additional_days.value())))
        .ok_or(ExtendDueDateError::InvalidArgument)?;

    Ok(Loan {
        due_date: new_due_date,
        ..loan.clone()
    })
}
