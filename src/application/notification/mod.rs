mod errors;
mod notification_sender;

pub use errors::NotificationError;
pub use notification_sender::NotificationSender;
