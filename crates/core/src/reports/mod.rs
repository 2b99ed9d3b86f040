//! Derived report arithmetic.
//!
//! Everything here is a pure computation over committed journal data handed
//! in by the database layer:
//! - Account Ledger (opening balance + running balance walk)
//! - Trial Balance (gross debit/credit columns, reconciliation status)
//! - Profit & Loss
//! - Overview (P&L over standard date windows)

pub mod balance;
pub mod service;
pub mod types;
pub mod window;

pub use balance::{calculate_balance, opening_balance, run_ledger, signed_delta};
pub use service::ReportService;
pub use types::*;
pub use window::DateWindow;
