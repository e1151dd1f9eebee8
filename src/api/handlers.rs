use crate::application::loan::{
    LoanApplicationError, ServiceDependencies, extend_due_date as execute_extend_due_date,
    register_loan as execute_register_loan,
};
use crate::domain::{commands::ExtendDueDate, value_objects::LoanId};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;
use uuid::Uuid;

use super::{
    error::ApiError,
    types::{ExtendDueDateRequest, LoanResponse, RegisterLoanRequest},
};

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

/// POST /loans - 新しい貸出を作成
///
/// 作成後、確認メールのジョブを投入する（完了は待たない）。
pub async fn create_loan(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterLoanRequest>,
) -> Result<(StatusCode, Json<LoanResponse>), ApiError> {
    let loan = execute_register_loan(&state.service_deps, req.to_command()).await?;

    Ok((StatusCode::CREATED, Json(LoanResponse::from(loan))))
}

/// POST /loans/:id/extend - 返却期限を延長
///
/// 強制されるビジネスルール:
/// - 延長日数が1以上であること
/// - 返却期限を過ぎていないこと
/// - 返却済みでないこと
///
/// 拒否時（ボディが解釈できない場合を含む）は400を返し、貸出は変更されない。
pub async fn extend_due_date(
    State(state): State<Arc<AppState>>,
    Path(loan_id): Path<Uuid>,
    payload: Result<Json<ExtendDueDateRequest>, JsonRejection>,
) -> Result<Json<LoanResponse>, ApiError> {
    let Json(req) = payload?;
    let cmd = ExtendDueDate {
        loan_id: LoanId::from_uuid(loan_id),
        additional_days: req.additional_days,
    };

    let loan = execute_extend_due_date(&state.service_deps, cmd).await?;

    Ok(Json(LoanResponse::from(loan)))
}

/// GET /loans/:id - 貸出をIDで取得
pub async fn get_loan_by_id(
    State(state): State<Arc<AppState>>,
    Path(loan_id): Path<Uuid>,
) -> Result<Json<LoanResponse>, ApiError> {
    let loan = state
        .service_deps
        .loan_repository
        .get_by_id(LoanId::from_uuid(loan_id))
        .await
        .map_err(LoanApplicationError::RepositoryError)?
        .ok_or(LoanApplicationError::LoanNotFound)?;

    Ok(Json(LoanResponse::from(loan)))
}
