pub mod loan;
pub mod notification;
