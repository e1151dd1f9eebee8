pub mod runner;
pub mod scheduler;
pub mod worker_pool;

pub use runner::{JobReport, JobRunner};
pub use scheduler::RecurringSchedule;
pub use worker_pool::{JobSender, WorkerPool};
