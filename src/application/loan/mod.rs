mod errors;
mod loan_created_notifier;
mod loan_query;
mod loan_service;
mod overdue_scanner;

pub use errors::{LoanApplicationError, Result};
pub use loan_created_notifier::{LoanCreatedNotifier, LoanCreatedOutcome};
pub use loan_query::find_overdue_loans;
pub use loan_service::{ServiceDependencies, extend_due_date, register_loan};
pub use overdue_scanner::{OverdueScanner, ReminderFailure, ScanReport};
