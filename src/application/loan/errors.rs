use crate::domain::ExtendDueDateError;
use thiserror::Error;

use crate::application::notification::NotificationError;

/// 貸出管理アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum LoanApplicationError {
    /// 引数が不正（延長日数が0以下など）
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// 返却期限を既に過ぎている
    #[error("Loan due date has already expired")]
    AlreadyExpired,

    /// 既に返却済み
    #[error("Loan has already been returned")]
    AlreadyReturned,

    /// 貸出が見つからない
    #[error("Loan not found")]
    LoanNotFound,

    /// 会員が存在しない
    #[error("Member not found")]
    MemberNotFound,

    /// 書籍が存在しない
    #[error("Book not found")]
    BookNotFound,

    /// 読み取りから書き込みまでの間に他の更新が入った
    #[error("Loan was modified concurrently")]
    ConcurrentModification,

    /// リポジトリのエラー
    #[error("Loan repository error")]
    RepositoryError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// MemberServiceのエラー
    #[error("Member service error")]
    MemberServiceError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// BookServiceのエラー
    #[error("Book service error")]
    BookServiceError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// 通知の送信エラー
    #[error(transparent)]
    Notification(#[from] NotificationError),
}

impl From<ExtendDueDateError> for LoanApplicationError {
    fn from(err: ExtendDueDateError) -> Self {
        match err {
            ExtendDueDateError::InvalidArgument => LoanApplicationError::InvalidArgument(
                "additional_days must be a positive number of days within the calendar range"
                    .to_string(),
            ),
            ExtendDueDateError::AlreadyExpired => LoanApplicationError::AlreadyExpired,
            ExtendDueDateError::AlreadyReturned => LoanApplicationError::AlreadyReturned,
        }
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, LoanApplicationError>;
