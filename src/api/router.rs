use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{AppState, create_loan, extend_due_date, get_loan_by_id};

/// Creates the API router
///
/// - POST /loans - Create a new loan (enqueues the confirmation mail)
/// - GET /loans/:id - Get loan details
/// - POST /loans/:id/extend - Extend a loan's due date
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/loans", post(create_loan))
        .route("/loans/:id", get(get_loan_by_id))
        .route("/loans/:id/extend", post(extend_due_date))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
