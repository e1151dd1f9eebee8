use super::ExtensionDaysError;

/// 返却期限延長のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtendDueDateError {
    /// 延長日数が不正（0以下、または暦の範囲を超える）
    InvalidArgument,
    /// 既に返却期限を過ぎている
    AlreadyExpired,
    /// 既に返却済み
    AlreadyReturned,
}

impl From<ExtensionDaysError> for ExtendDueDateError {
    fn from(err: ExtensionDaysError) -> Self {
        match err {
            ExtensionDaysError::NotPositive(_) => ExtendDueDateError::InvalidArgument,
        }
    }
}
