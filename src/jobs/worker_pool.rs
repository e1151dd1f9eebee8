use crate::ports::job_queue::{Job, JobQueue, Result};
use futures::FutureExt;
use futures::future::join_all;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc, watch};
use tokio::task::JoinHandle;

use super::runner::JobRunner;

/// ワーカープールへのジョブ投入口
///
/// 投入は即座に戻り、ジョブの完了を待たない。
#[derive(Clone)]
pub struct JobSender {
    tx: mpsc::UnboundedSender<Job>,
}

impl JobQueue for JobSender {
    fn enqueue(&self, job: Job) -> Result<()> {
        self.tx
            .send(job)
            .map_err(|e| format!("job queue is closed, dropped {:?}", e.0).into())
    }
}

/// ジョブワーカープール
///
/// 1つのキューを複数のワーカータスクで消費する。
/// 失敗したジョブはログに残して捨てる（投入元には返さない）。
/// ジョブがパニックしてもワーカーは停止しない。
pub struct WorkerPool {
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// ワーカーを起動する
    ///
    /// `shutdown` が `true` になると、各ワーカーは実行中のジョブを終えてから停止する。
    pub fn start(
        runner: Arc<JobRunner>,
        workers: usize,
        shutdown: watch::Receiver<bool>,
    ) -> (Self, JobSender) {
        let (tx, rx) = mpsc::unbounded_channel();
        let rx = Arc::new(Mutex::new(rx));

        let worker_count = workers.max(1);
        let handles = (0..worker_count)
            .map(|worker_id| {
                tokio::spawn(worker_loop(
                    worker_id,
                    runner.clone(),
                    rx.clone(),
                    shutdown.clone(),
                ))
            })
            .collect();

        tracing::info!(workers = worker_count, "job worker pool started");
        (Self { handles }, JobSender { tx })
    }

    /// すべてのワーカーの停止を待つ
    pub async fn join(self) {
        for result in join_all(self.handles).await {
            if let Err(e) = result {
                tracing::error!(error = %e, "job worker panicked");
            }
        }
    }
}

async fn worker_loop(
    worker_id: usize,
    runner: Arc<JobRunner>,
    rx: Arc<Mutex<mpsc::UnboundedReceiver<Job>>>,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        if *shutdown.borrow() {
            break;
        }

        let job = {
            let mut rx = rx.lock().await;
            tokio::select! {
                job = rx.recv() => job,
                _ = shutdown.changed() => None,
            }
        };

        let Some(job) = job else {
            break;
        };

        tracing::debug!(worker_id, ?job, "running job");
        match AssertUnwindSafe(runner.run(job.clone())).catch_unwind().await {
            Ok(Ok(report)) => tracing::debug!(worker_id, ?report, "job finished"),
            Ok(Err(e)) => tracing::error!(worker_id, ?job, error = ?e, "job failed"),
            Err(panic) => tracing::error!(
                worker_id,
                ?job,
                panic = panic_message(&*panic),
                "job panicked"
            ),
        }
    }

    tracing::debug!(worker_id, "job worker stopped");
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}
