use crate::ports::mail_sender::{MailSender as MailSenderTrait, OutgoingMail, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;

/// Mock implementation of MailSender
///
/// Records every mail instead of sending it.
/// Recipients registered with `fail_for` make `send` return an error.
pub struct MailSender {
    sent: Mutex<Vec<OutgoingMail>>,
    failing_recipients: Mutex<HashSet<String>>,
}

impl MailSender {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing_recipients: Mutex::new(HashSet::new()),
        }
    }

    /// Make dispatches to this recipient fail
    pub fn fail_for(&self, recipient: &str) {
        self.failing_recipients
            .lock()
            .unwrap()
            .insert(recipient.to_string());
    }

    /// Mails successfully "sent" so far
    pub fn sent_mails(&self) -> Vec<OutgoingMail> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for MailSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MailSenderTrait for MailSender {
    async fn send(&self, mail: &OutgoingMail) -> Result<()> {
        let failing = self.failing_recipients.lock().unwrap();
        if let Some(recipient) = mail.to.iter().find(|to| failing.contains(*to)) {
            return Err(format!("mock transport rejected {}", recipient).into());
        }
        drop(failing);

        self.sent.lock().unwrap().push(mail.clone());
        Ok(())
    }
}
