use crate::application::loan::LoanApplicationError;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub struct ApiError(LoanApplicationError);

impl From<LoanApplicationError> for ApiError {
    fn from(err: LoanApplicationError) -> Self {
        ApiError(err)
    }
}

/// リクエストボディが解釈できない場合は引数不正（400）として扱う
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(LoanApplicationError::InvalidArgument(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self.0 {
            // 400 Bad Request - 延長の拒否（貸出は変更されていない）
            LoanApplicationError::InvalidArgument(ref msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_ARGUMENT", msg.clone())
            }
            LoanApplicationError::AlreadyExpired => (
                StatusCode::BAD_REQUEST,
                "ALREADY_EXPIRED",
                "Loan due date has already expired".to_string(),
            ),
            LoanApplicationError::AlreadyReturned => (
                StatusCode::BAD_REQUEST,
                "ALREADY_RETURNED",
                "Loan has already been returned".to_string(),
            ),

            // 404 Not Found
            LoanApplicationError::LoanNotFound => (
                StatusCode::NOT_FOUND,
                "LOAN_NOT_FOUND",
                "Loan not found".to_string(),
            ),

            // 422 Unprocessable Entity - 参照先が存在しない
            LoanApplicationError::MemberNotFound => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "MEMBER_NOT_FOUND",
                "Member not found".to_string(),
            ),
            LoanApplicationError::BookNotFound => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "BOOK_NOT_FOUND",
                "Book not found".to_string(),
            ),

            // 409 Conflict
            LoanApplicationError::ConcurrentModification => (
                StatusCode::CONFLICT,
                "CONCURRENT_MODIFICATION",
                "Loan was modified by another request, please retry".to_string(),
            ),

            // 500 Internal Server Error - システム障害
            // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            ref e @ (LoanApplicationError::RepositoryError(_)
            | LoanApplicationError::MemberServiceError(_)
            | LoanApplicationError::BookServiceError(_)
            | LoanApplicationError::Notification(_)) => {
                tracing::error!(error = ?e, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}
