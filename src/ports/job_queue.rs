use crate::domain::value_objects::LoanId;
use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// ワーカーで実行される作業単位
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Job {
    /// 延滞貸出をスキャンして督促を送る
    OverdueScan,
    /// 貸出作成の確認通知を送る
    LoanCreated { loan_id: LoanId },
}

/// ジョブキューポート
///
/// 投入のみを行い、実行の完了や失敗を待たない（fire-and-forget）。
/// 実行は少なくとも1回、ジョブ間の順序は保証しない。
pub trait JobQueue: Send + Sync {
    fn enqueue(&self, job: Job) -> Result<()>;
}
