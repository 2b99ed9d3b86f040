//! Sign convention and running-balance arithmetic.
//!
//! Each account type has a normal balance side: Asset/Expense are
//! debit-normal, Liability/Equity/Income are credit-normal. Balances are
//! reported so that a "normal" balance is a positive number regardless of
//! type.

use rust_decimal::Decimal;

use super::types::{LedgerLine, LedgerRow};
use crate::ledger::AccountType;

/// Calculates the normalized balance for an account.
///
/// - Debit-normal (Asset/Expense): `debit - credit`
/// - Credit-normal (Liability/Equity/Income): `credit - debit`
#[must_use]
pub fn calculate_balance(
    account_type: AccountType,
    total_debit: Decimal,
    total_credit: Decimal,
) -> Decimal {
    if account_type.is_debit_normal() {
        total_debit - total_credit
    } else {
        total_credit - total_debit
    }
}

/// Signed balance delta of a single line.
#[must_use]
pub fn signed_delta(account_type: AccountType, debit: Decimal, credit: Decimal) -> Decimal {
    calculate_balance(account_type, debit, credit)
}

/// Sums the signed deltas of all lines strictly before a ledger window.
#[must_use]
pub fn opening_balance(account_type: AccountType, prior_lines: &[LedgerLine]) -> Decimal {
    prior_lines
        .iter()
        .map(|l| signed_delta(account_type, l.debit, l.credit))
        .sum()
}

/// Walks dated lines accumulating a running balance.
///
/// Lines must already be ordered (journal date ascending, insertion order as
/// tie-break). Returns the rows and the closing balance; an empty window
/// closes at the opening balance.
#[must_use]
pub fn run_ledger(
    account_type: AccountType,
    opening: Decimal,
    lines: Vec<LedgerLine>,
) -> (Vec<LedgerRow>, Decimal) {
    let mut balance = opening;
    let mut rows = Vec::with_capacity(lines.len());

    for line in lines {
        balance += signed_delta(account_type, line.debit, line.credit);
        rows.push(LedgerRow {
            date: line.date,
            narration: line.narration,
            debit: line.debit,
            credit: line.credit,
            balance,
        });
    }

    (rows, balance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn line(day: u32, debit: Decimal, credit: Decimal) -> LedgerLine {
        LedgerLine {
            date: NaiveDate::from_ymd_opt(2026, 1, day).unwrap(),
            narration: None,
            debit,
            credit,
        }
    }

    #[test]
    fn test_debit_normal_balance() {
        assert_eq!(
            calculate_balance(AccountType::Asset, dec!(500), dec!(200)),
            dec!(300)
        );
        assert_eq!(
            calculate_balance(AccountType::Expense, dec!(100), dec!(0)),
            dec!(100)
        );
    }

    #[test]
    fn test_credit_normal_balance() {
        assert_eq!(
            calculate_balance(AccountType::Income, dec!(0), dec!(750)),
            dec!(750)
        );
        assert_eq!(
            calculate_balance(AccountType::Liability, dec!(100), dec!(400)),
            dec!(300)
        );
        assert_eq!(
            calculate_balance(AccountType::Equity, dec!(0), dec!(1000)),
            dec!(1000)
        );
    }

    #[test]
    fn test_opening_balance_sums_prior_activity() {
        let prior = vec![
            line(1, dec!(1000), dec!(0)),
            line(2, dec!(0), dec!(300)),
            line(3, dec!(50), dec!(0)),
        ];
        assert_eq!(opening_balance(AccountType::Asset, &prior), dec!(750));
        // Same lines viewed from a credit-normal account mirror the sign.
        assert_eq!(opening_balance(AccountType::Income, &prior), dec!(-750));
    }

    #[test]
    fn test_run_ledger_running_balance() {
        let lines = vec![
            line(14, dec!(10000), dec!(0)),
            line(20, dec!(0), dec!(2500)),
        ];
        let (rows, closing) = run_ledger(AccountType::Asset, Decimal::ZERO, lines);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].balance, dec!(10000));
        assert_eq!(rows[1].balance, dec!(7500));
        assert_eq!(closing, dec!(7500));
    }

    #[test]
    fn test_empty_window_closes_at_opening() {
        let (rows, closing) = run_ledger(AccountType::Liability, dec!(420), vec![]);
        assert!(rows.is_empty());
        assert_eq!(closing, dec!(420));
    }

    proptest! {
        /// Ledger continuity: opening + sum of signed deltas == closing,
        /// for any account type and any line set.
        #[test]
        fn prop_ledger_continuity(
            opening_cents in -1_000_000i64..1_000_000,
            amounts in prop::collection::vec((0u8..2, 1i64..100_000), 0..30),
        ) {
            for account_type in [
                AccountType::Asset,
                AccountType::Liability,
                AccountType::Equity,
                AccountType::Income,
                AccountType::Expense,
            ] {
                let opening = Decimal::new(opening_cents, 2);
                let lines: Vec<LedgerLine> = amounts
                    .iter()
                    .map(|&(side, cents)| {
                        let amount = Decimal::new(cents, 2);
                        if side == 0 {
                            line(15, amount, Decimal::ZERO)
                        } else {
                            line(15, Decimal::ZERO, amount)
                        }
                    })
                    .collect();

                let expected: Decimal = opening
                    + lines
                        .iter()
                        .map(|l| signed_delta(account_type, l.debit, l.credit))
                        .sum::<Decimal>();

                let (rows, closing) = run_ledger(account_type, opening, lines);
                prop_assert_eq!(closing, expected);
                if let Some(last) = rows.last() {
                    prop_assert_eq!(last.balance, closing);
                } else {
                    prop_assert_eq!(closing, opening);
                }
            }
        }
    }
}
