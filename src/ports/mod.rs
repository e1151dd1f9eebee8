pub mod book_service;
pub mod clock;
pub mod job_queue;
pub mod loan_repository;
pub mod mail_sender;
pub mod member_service;

pub use book_service::BookService;
pub use clock::Clock;
pub use job_queue::{Job, JobQueue};
pub use loan_repository::{LoanDetails, LoanRepository};
pub use mail_sender::{MailSender, OutgoingMail};
pub use member_service::MemberService;
