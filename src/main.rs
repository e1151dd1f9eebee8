use rusty_library_jobs::{
    adapters::{
        clock::SystemClock,
        mail::{LogMailSender, SmtpMailSender},
        postgres::{PostgresDirectory, PostgresLoanRepository},
    },
    api::{handlers::AppState, router::create_router},
    application::{
        loan::{LoanCreatedNotifier, OverdueScanner, ServiceDependencies},
        notification::NotificationSender,
    },
    config::{AppConfig, MailTransport},
    jobs::{JobRunner, RecurringSchedule, WorkerPool},
    ports::{Clock, JobQueue, LoanRepository, MailSender},
};
use std::sync::Arc;
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rusty_library_jobs=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().expect("Invalid configuration");

    tracing::info!(
        grace_period_days = config.grace_period.value(),
        scan_interval_secs = config.scan_interval.as_secs(),
        workers = config.worker_count,
        "configuration loaded"
    );

    // Initialize database connection pool
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    // Initialize adapters
    let loan_repository: Arc<dyn LoanRepository> =
        Arc::new(PostgresLoanRepository::new(pool.clone()));
    let directory = Arc::new(PostgresDirectory::new(pool.clone()));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let mail_sender: Arc<dyn MailSender> = match &config.mail_transport {
        MailTransport::Log => Arc::new(LogMailSender::new()),
        MailTransport::Smtp(smtp) => {
            Arc::new(SmtpMailSender::new(smtp).expect("Failed to configure SMTP transport"))
        }
    };

    // Background jobs
    let notification_sender = NotificationSender::new(mail_sender, config.from_email.clone());
    let runner = Arc::new(JobRunner::new(
        OverdueScanner::new(
            loan_repository.clone(),
            notification_sender.clone(),
            config.grace_period,
        ),
        LoanCreatedNotifier::new(loan_repository.clone(), notification_sender),
        clock.clone(),
    ));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (worker_pool, job_sender) =
        WorkerPool::start(runner, config.worker_count, shutdown_rx.clone());
    let job_queue: Arc<dyn JobQueue> = Arc::new(job_sender);
    let schedule = RecurringSchedule::spawn(job_queue.clone(), config.scan_interval, shutdown_rx);

    // Create application state
    let service_deps = ServiceDependencies {
        loan_repository,
        member_service: directory.clone(),
        book_service: directory,
        job_queue,
        clock,
    };
    let app = create_router(Arc::new(AppState { service_deps }));

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for shutdown signal");
            }
        })
        .await
        .expect("Failed to start server");

    tracing::info!("shutting down background jobs");
    let _ = shutdown_tx.send(true);
    if let Err(e) = schedule.await {
        tracing::error!(error = %e, "schedule task panicked");
    }
    worker_pool.join().await;
}
