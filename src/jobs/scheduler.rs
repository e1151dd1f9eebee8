use crate::config::MAX_SCAN_INTERVAL_SECS;
use crate::ports::{Job, JobQueue};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

/// 定期実行スケジュール
///
/// 一定間隔で延滞スキャンをジョブキューに投入する。
/// 最初の投入は起動から1周期後。
/// 周期は `MAX_SCAN_INTERVAL_SECS` を上限に丸める。
pub struct RecurringSchedule;

impl RecurringSchedule {
    pub fn spawn(
        queue: Arc<dyn JobQueue>,
        every: Duration,
        mut shutdown: watch::Receiver<bool>,
    ) -> JoinHandle<()> {
        let every = every.min(Duration::from_secs(MAX_SCAN_INTERVAL_SECS));

        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + every, every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            tracing::info!(every_secs = every.as_secs(), "overdue scan schedule started");

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(e) = queue.enqueue(Job::OverdueScan) {
                            tracing::error!(error = %e, "failed to enqueue overdue scan");
                        }
                    }
                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            break;
                        }
                    }
                }
            }

            tracing::info!("overdue scan schedule stopped");
        })
    }
}
