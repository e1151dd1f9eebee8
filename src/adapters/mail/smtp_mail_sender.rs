use crate::config::SmtpConfig;
use crate::ports::mail_sender::{MailSender as MailSenderTrait, OutgoingMail, Result};
use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::{PoolConfig, authentication::Credentials},
};
use std::time::Duration;

/// SMTP送信のタイムアウト
const SMTP_TIMEOUT: Duration = Duration::from_secs(10);

/// SMTPによるMailSender実装
///
/// 接続はプールし、送信が詰まった場合はトランスポートのタイムアウトで失敗させる。
pub struct SmtpMailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailSender {
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .pool_config(PoolConfig::new().max_size(10))
            .timeout(Some(SMTP_TIMEOUT));

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
        })
    }

    fn build_message(mail: &OutgoingMail) -> Result<Message> {
        let mut builder = Message::builder()
            .from(mail.from.parse::<Mailbox>()?)
            .subject(mail.subject.as_str())
            .header(ContentType::TEXT_PLAIN);

        for to in &mail.to {
            builder = builder.to(to.parse::<Mailbox>()?);
        }

        Ok(builder.body(mail.body.clone())?)
    }
}

#[async_trait]
impl MailSenderTrait for SmtpMailSender {
    async fn send(&self, mail: &OutgoingMail) -> Result<()> {
        let message = Self::build_message(mail)?;

        match self.transport.send(message).await {
            Ok(_) => Ok(()),
            Err(e) => {
                tracing::error!(to = ?mail.to, error = %e, "SMTP dispatch failed");
                Err(Box::new(e))
            }
        }
    }
}
