use crate::ports::mail_sender::{MailSender as MailSenderTrait, OutgoingMail, Result};
use async_trait::async_trait;

/// ログ出力のみを行うMailSender
///
/// 開発環境用。メールを送信せず、内容をtracingに出力する。
pub struct LogMailSender;

impl LogMailSender {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogMailSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MailSenderTrait for LogMailSender {
    async fn send(&self, mail: &OutgoingMail) -> Result<()> {
        tracing::info!(
            from = %mail.from,
            to = ?mail.to,
            subject = %mail.subject,
            body = %mail.body,
            "mail (log transport)"
        );
        Ok(())
    }
}
