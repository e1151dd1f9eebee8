use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 送信するメール
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub subject: String,
    pub body: String,
    pub from: String,
    pub to: Vec<String>,
}

/// メール送信ポート
///
/// 実装はSMTP、ログ出力などが考えられる。
/// 失敗は必ず呼び出し元に返す（握りつぶさない）。
#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<()>;
}
