//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. All writes into `journals`/`journal_lines` flow through
//! the journal repository.

pub mod account;
pub mod journal;
pub mod report;
pub mod transaction;

pub use account::{
    AccountError, AccountRepository, CreateAccountInput, HierarchicalAccount, UpdateAccountInput,
};
pub use journal::{CreateJournalInput, JournalError, JournalRepository, JournalWithLines};
pub use report::{JournalReportEntry, JournalReportLine, ReportError, ReportRepository};
pub use transaction::{
    CreateTransactionInput, HeadWiseInput, TransactionError, TransactionFilter,
    TransactionRepository,
};
