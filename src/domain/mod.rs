pub mod commands;
pub mod errors;
pub mod loan;
pub mod notification;
pub mod value_objects;

pub use errors::*;
pub use loan::{Book, Loan, Member};
pub use value_objects::*;
