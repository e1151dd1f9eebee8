use thiserror::Error;

/// 通知のエラー
#[derive(Debug, Error)]
pub enum NotificationError {
    /// メール送信に失敗した
    #[error("Failed to dispatch notification to {recipient}")]
    Dispatch {
        recipient: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
