use crate::application::notification::NotificationSender;
use crate::domain::{GracePeriod, LoanId};
use crate::ports::LoanRepository;
use chrono::NaiveDate;
use std::sync::Arc;

use super::errors::Result;
use super::loan_query::find_overdue_loans;

/// 1件の督促送信失敗
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderFailure {
    pub loan_id: LoanId,
    pub recipient: String,
    pub error: String,
}

/// スキャン1回分の結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// 督促対象として検出した貸出の件数
    pub candidates: usize,
    /// 送信に成功した件数
    pub sent: usize,
    /// 送信に失敗した貸出
    pub failures: Vec<ReminderFailure>,
}

impl ScanReport {
    /// 送信を試みた督促の件数
    pub fn attempted(&self) -> usize {
        self.sent + self.failures.len()
    }
}

/// 延滞スキャナ
///
/// 定期的に実行され、猶予期間を過ぎた未返却の貸出すべてに督促を送る。
///
/// ビジネスルール：
/// - 1件の送信失敗でバッチ全体を中断しない（残りの貸出も送信を試みる）
/// - 失敗はログとレポートに残す
/// - 送信済みの記録は持たない。続けて2回実行すれば2回送る
#[derive(Clone)]
pub struct OverdueScanner {
    loan_repository: Arc<dyn LoanRepository>,
    notification_sender: NotificationSender,
    grace_period: GracePeriod,
}

impl OverdueScanner {
    pub fn new(
        loan_repository: Arc<dyn LoanRepository>,
        notification_sender: NotificationSender,
        grace_period: GracePeriod,
    ) -> Self {
        Self {
            loan_repository,
            notification_sender,
            grace_period,
        }
    }

    /// スキャンを1回実行する
    ///
    /// # エラー
    /// 対象の検索に失敗した場合のみ。個々の送信失敗は `ScanReport::failures` に入る。
    #[tracing::instrument(skip(self), fields(grace_period = self.grace_period.value()))]
    pub async fn run(&self, reference_date: NaiveDate) -> Result<ScanReport> {
        let candidates =
            find_overdue_loans(self.loan_repository.as_ref(), reference_date, self.grace_period)
                .await?;

        if candidates.is_empty() {
            tracing::debug!("no overdue loans found");
            return Ok(ScanReport::default());
        }

        let mut report = ScanReport {
            candidates: candidates.len(),
            ..ScanReport::default()
        };

        for details in candidates {
            let result = self
                .notification_sender
                .send_overdue_reminder(
                    &details.member.email,
                    &details.member.display_name,
                    &details.book.title,
                )
                .await;

            match result {
                Ok(()) => report.sent += 1,
                Err(e) => {
                    tracing::warn!(
                        loan_id = %details.loan.loan_id.value(),
                        recipient = %details.member.email,
                        error = ?e,
                        "failed to send overdue reminder"
                    );
                    report.failures.push(ReminderFailure {
                        loan_id: details.loan.loan_id,
                        recipient: details.member.email,
                        error: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            candidates = report.candidates,
            sent = report.sent,
            failed = report.failures.len(),
            "overdue scan completed"
        );

        Ok(report)
    }
}
