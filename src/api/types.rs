use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{BookId, Loan, MemberId, commands::RegisterLoan};

/// 返却期限の表示形式
const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// 貸出作成リクエスト（POST /loans）
#[derive(Debug, Deserialize)]
pub struct RegisterLoanRequest {
    pub book_id: Uuid,
    pub member_id: Uuid,
}

impl RegisterLoanRequest {
    pub fn to_command(&self) -> RegisterLoan {
        RegisterLoan {
            book_id: BookId::from_uuid(self.book_id),
            member_id: MemberId::from_uuid(self.member_id),
        }
    }
}

/// 返却期限延長リクエスト（POST /loans/:id/extend）
#[derive(Debug, Deserialize)]
pub struct ExtendDueDateRequest {
    pub additional_days: i64,
}

/// 貸出レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct LoanResponse {
    pub loan_id: Uuid,
    pub book_id: Uuid,
    pub member_id: Uuid,
    /// YYYY-MM-DD
    pub due_date: String,
    pub is_returned: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Loan> for LoanResponse {
    fn from(loan: Loan) -> Self {
        Self {
            loan_id: loan.loan_id.value(),
            book_id: loan.book_id.value(),
            member_id: loan.member_id.value(),
            due_date: loan.due_date.format(DUE_DATE_FORMAT).to_string(),
            is_returned: loan.is_returned,
            created_at: loan.created_at,
        }
    }
}

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
