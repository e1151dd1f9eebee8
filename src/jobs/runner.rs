use crate::application::loan::{
    LoanCreatedNotifier, LoanCreatedOutcome, OverdueScanner, Result, ScanReport,
};
use crate::ports::{Clock, Job};
use std::sync::Arc;

/// ジョブ1件の実行結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobReport {
    OverdueScan(ScanReport),
    LoanCreated(LoanCreatedOutcome),
}

/// ジョブの実行
///
/// ジョブの種類に応じて延滞スキャナ・貸出作成通知を呼び出す。
/// 実行ごとの状態は持たない。
pub struct JobRunner {
    overdue_scanner: OverdueScanner,
    loan_created_notifier: LoanCreatedNotifier,
    clock: Arc<dyn Clock>,
}

impl JobRunner {
    pub fn new(
        overdue_scanner: OverdueScanner,
        loan_created_notifier: LoanCreatedNotifier,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            overdue_scanner,
            loan_created_notifier,
            clock,
        }
    }

    /// ジョブを1件実行する
    ///
    /// 延滞スキャンの基準日は実行時点の「今日」。
    pub async fn run(&self, job: Job) -> Result<JobReport> {
        match job {
            Job::OverdueScan => {
                let report = self.overdue_scanner.run(self.clock.today()).await?;
                Ok(JobReport::OverdueScan(report))
            }
            Job::LoanCreated { loan_id } => {
                let outcome = self.loan_created_notifier.on_loan_created(loan_id).await?;
                Ok(JobReport::LoanCreated(outcome))
            }
        }
    }
}
