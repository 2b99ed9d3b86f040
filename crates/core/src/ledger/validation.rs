//! Business rule validation for journal entries.
//!
//! Validation runs in a fixed order so the caller always sees the most
//! fundamental problem first: empty line set, then malformed lines, then
//! (after the caller has resolved accounts) the balance check.

use rust_decimal::Decimal;
use thiserror::Error;

use super::types::JournalLineInput;

/// Scale of the currency minor unit (two decimal places).
pub const MINOR_UNIT_SCALE: u32 = 2;

/// Validation errors for journal entries.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JournalValidationError {
    /// Journal has no lines.
    #[error("Journal must have at least one line")]
    EmptyJournal,

    /// A line violates the one-side-nonzero rule.
    #[error("Line {index} is malformed: {reason}")]
    MalformedLine {
        /// Zero-based index of the offending line.
        index: usize,
        /// Why the line was rejected.
        reason: &'static str,
    },

    /// Debit and credit sums differ.
    #[error("entries do not balance: debit {debits} != credit {credits}")]
    Unbalanced {
        /// Total debit amount.
        debits: Decimal,
        /// Total credit amount.
        credits: Decimal,
    },
}

/// Rescales an amount to the currency minor unit.
#[must_use]
pub fn normalize_amount(amount: Decimal) -> Decimal {
    amount.round_dp(MINOR_UNIT_SCALE)
}

/// Validates the shape of a journal's lines.
///
/// Checks, in order: the line set is nonempty; every line has non-negative
/// amounts and exactly one nonzero side. The balance check is separate
/// (`validate_balanced`) because account existence is verified between the
/// two steps.
///
/// # Errors
///
/// Returns `EmptyJournal` or `MalformedLine` with the offending index.
pub fn validate_line_shape(lines: &[JournalLineInput]) -> Result<(), JournalValidationError> {
    if lines.is_empty() {
        return Err(JournalValidationError::EmptyJournal);
    }

    for (index, line) in lines.iter().enumerate() {
        if line.debit < Decimal::ZERO || line.credit < Decimal::ZERO {
            return Err(JournalValidationError::MalformedLine {
                index,
                reason: "amounts must be non-negative",
            });
        }
        let debit_set = !line.debit.is_zero();
        let credit_set = !line.credit.is_zero();
        match (debit_set, credit_set) {
            (true, true) => {
                return Err(JournalValidationError::MalformedLine {
                    index,
                    reason: "exactly one of debit/credit may be nonzero, both are set",
                });
            }
            (false, false) => {
                return Err(JournalValidationError::MalformedLine {
                    index,
                    reason: "exactly one of debit/credit must be nonzero, both are zero",
                });
            }
            _ => {}
        }
    }

    Ok(())
}

/// Validates that a journal's lines balance.
///
/// Amounts are rescaled to the minor unit before summing; after rescaling
/// the comparison is exact, there is no epsilon.
///
/// # Errors
///
/// Returns `Unbalanced` with both sums when they differ.
pub fn validate_balanced(lines: &[JournalLineInput]) -> Result<(), JournalValidationError> {
    let debits: Decimal = lines.iter().map(|l| normalize_amount(l.debit)).sum();
    let credits: Decimal = lines.iter().map(|l| normalize_amount(l.credit)).sum();

    if debits != credits {
        return Err(JournalValidationError::Unbalanced { debits, credits });
    }

    Ok(())
}
