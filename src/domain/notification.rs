/// 延滞督促メールの件名
pub const OVERDUE_REMINDER_SUBJECT: &str = "Book Loaned with due date expired.";

/// 貸出完了メールの件名
pub const LOAN_CONFIRMATION_SUBJECT: &str = "Book Loaned Successfully";

/// 通知メッセージ（件名と本文）
///
/// 既存の利用者に届くメールとの互換性のため、文面は固定。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContent {
    pub subject: String,
    pub body: String,
}

/// 純粋関数：延滞督促メッセージを組み立てる
pub fn overdue_reminder(display_name: &str, book_title: &str) -> MessageContent {
    MessageContent {
        subject: OVERDUE_REMINDER_SUBJECT.to_string(),
        body: format!(
            "Hello {display_name},\n\nYou have loaned \"{book_title}\".\nPlease return it now."
        ),
    }
}

/// 純粋関数：貸出完了メッセージを組み立てる
pub fn loan_confirmation(display_name: &str, book_title: &str) -> MessageContent {
    MessageContent {
        subject: LOAN_CONFIRMATION_SUBJECT.to_string(),
        body: format!(
            "Hello {display_name},\n\nYou have successfully loaned \"{book_title}\".\nPlease return it by the due date."
        ),
    }
}
