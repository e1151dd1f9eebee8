pub mod directory;
pub mod loan_repository;

// パブリックに型を再エクスポート
pub use directory::Directory as PostgresDirectory;
pub use loan_repository::LoanRepository as PostgresLoanRepository;
