//! Double-entry journal logic.
//!
//! A journal is one balanced accounting event: a set of debit/credit lines
//! whose sums are equal to the minor unit. This module owns the validation
//! rules every journal must pass before it is committed, and the mapping
//! table that turns one-sided business events into balanced account pairs.

pub mod mapping;
pub mod types;
pub mod validation;

pub use mapping::{AccountPair, account_pair, head_wise_settlement};
pub use types::{AccountType, BusinessType, JournalLineInput, PaymentMode, UnknownBusinessType};
pub use validation::{JournalValidationError, validate_balanced, validate_line_shape};
