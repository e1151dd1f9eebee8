pub mod log_mail_sender;
pub mod smtp_mail_sender;

pub use log_mail_sender::LogMailSender;
pub use smtp_mail_sender::SmtpMailSender;
