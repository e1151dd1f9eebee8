use crate::domain::notification::{self, MessageContent};
use crate::ports::{MailSender, OutgoingMail};
use std::sync::Arc;

use super::errors::NotificationError;

/// 通知送信
///
/// 定型文面を組み立て、1人の宛先にメールを1通送る。
/// 再送は行わない（再試行はスケジューラの責務）。
#[derive(Clone)]
pub struct NotificationSender {
    mail_sender: Arc<dyn MailSender>,
    from_email: String,
}

impl NotificationSender {
    /// メール送信ポートと差出人アドレスから作成する
    pub fn new(mail_sender: Arc<dyn MailSender>, from_email: impl Into<String>) -> Self {
        Self {
            mail_sender,
            from_email: from_email.into(),
        }
    }

    /// 延滞督促を送る
    pub async fn send_overdue_reminder(
        &self,
        member_email: &str,
        member_display_name: &str,
        book_title: &str,
    ) -> Result<(), NotificationError> {
        let content = notification::overdue_reminder(member_display_name, book_title);
        self.dispatch(member_email, content).await
    }

    /// 貸出完了の確認を送る
    pub async fn send_loan_confirmation(
        &self,
        member_email: &str,
        member_display_name: &str,
        book_title: &str,
    ) -> Result<(), NotificationError> {
        let content = notification::loan_confirmation(member_display_name, book_title);
        self.dispatch(member_email, content).await
    }

    async fn dispatch(
        &self,
        recipient: &str,
        content: MessageContent,
    ) -> Result<(), NotificationError> {
        let mail = OutgoingMail {
            subject: content.subject,
            body: content.body,
            from: self.from_email.clone(),
            to: vec![recipient.to_string()],
        };

        self.mail_sender
            .send(&mail)
            .await
            .map_err(|source| NotificationError::Dispatch {
                recipient: recipient.to_string(),
                source,
            })?;

        tracing::info!(recipient, subject = %mail.subject, "notification dispatched");
        Ok(())
    }
}
