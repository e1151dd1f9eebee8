pub mod clock;
pub mod library_store;
pub mod mail_sender;

pub use clock::FixedClock;
pub use library_store::LibraryStore;
pub use mail_sender::MailSender;
