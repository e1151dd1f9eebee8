use crate::domain::{GracePeriod, loan};
use crate::ports::{LoanDetails, LoanRepository};
use chrono::NaiveDate;

use super::errors::{LoanApplicationError, Result};

/// 督促対象の貸出を検索する（読み取りのみ）
///
/// `!is_returned && due_date < reference_date - grace_period` の貸出を返す。
/// 境界（ちょうど猶予期間前が返却期限）は含まない。順序は保証しない。
pub async fn find_overdue_loans(
    loan_repository: &dyn LoanRepository,
    reference_date: NaiveDate,
    grace_period: GracePeriod,
) -> Result<Vec<LoanDetails>> {
    // 基準日が暦の先頭を越える場合、それより前が返却期限の貸出はない
    let Some(cutoff) = loan::overdue_cutoff(reference_date, grace_period) else {
        tracing::warn!(
            %reference_date,
            grace_period = grace_period.value(),
            "grace period reaches before the earliest date, no loans selected"
        );
        return Ok(Vec::new());
    };

    loan_repository
        .find_unreturned_due_before(cutoff)
        .await
        .map_err(LoanApplicationError::RepositoryError)
}
