//! Business event to account-pair mapping.
//!
//! The transaction translator turns a one-sided business event ("received
//! 500 cash for a sale") into a balanced two-line journal. This table is the
//! explicit, documented mapping from business type and payment mode to the
//! debit/credit account codes of the default chart of accounts.
//!
//! Money-in events settle on the debit side (Cash/Bank, or Accounts
//! Receivable when on credit); money-out events settle on the credit side
//! (Cash/Bank, or Accounts Payable). Returns invert their base event.
//!
//! The table is total over `BusinessType` x `PaymentMode`; posting still
//! fails with an unresolved-mapping error when the chart of accounts does
//! not contain the coded account (e.g. before seeding).

use super::types::{BusinessType, PaymentMode};

/// Cash on hand.
pub const CASH: &str = "1000";
/// Bank account.
pub const BANK: &str = "1010";
/// Accounts receivable.
pub const ACCOUNTS_RECEIVABLE: &str = "1100";
/// Accounts payable.
pub const ACCOUNTS_PAYABLE: &str = "2000";
/// Owner's equity.
pub const OWNERS_EQUITY: &str = "3000";
/// Sales revenue.
pub const SALES: &str = "4000";
/// Miscellaneous income.
pub const OTHER_INCOME: &str = "4100";
/// Purchases.
pub const PURCHASE: &str = "5000";
/// Salaries and wages.
pub const SALARIES: &str = "5100";
/// Professional fees.
pub const PROFESSIONAL_FEES: &str = "5200";
/// General expense.
pub const GENERAL_EXPENSE: &str = "5900";

/// A resolved debit/credit account-code pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountPair {
    /// Code of the account to debit.
    pub debit_code: &'static str,
    /// Code of the account to credit.
    pub credit_code: &'static str,
}

/// Settlement account for money flowing in.
const fn settlement_in(mode: PaymentMode) -> &'static str {
    match mode {
        PaymentMode::Cash => CASH,
        PaymentMode::Bank => BANK,
        PaymentMode::Due => ACCOUNTS_RECEIVABLE,
    }
}

/// Settlement account for money flowing out.
const fn settlement_out(mode: PaymentMode) -> &'static str {
    match mode {
        PaymentMode::Cash => CASH,
        PaymentMode::Bank => BANK,
        PaymentMode::Due => ACCOUNTS_PAYABLE,
    }
}

/// Settlement account for head-wise income/expense postings.
///
/// Head-wise entries record immediate receipt/payment, so credit settlement
/// is not available for them.
#[must_use]
pub const fn head_wise_settlement(mode: PaymentMode) -> Option<&'static str> {
    match mode {
        PaymentMode::Cash => Some(CASH),
        PaymentMode::Bank => Some(BANK),
        PaymentMode::Due => None,
    }
}

/// Resolves the debit/credit account pair for a business event.
#[must_use]
pub const fn account_pair(txn_type: BusinessType, mode: PaymentMode) -> AccountPair {
    match txn_type {
        BusinessType::Sales => AccountPair {
            debit_code: settlement_in(mode),
            credit_code: SALES,
        },
        BusinessType::SalesReturn => AccountPair {
            debit_code: SALES,
            credit_code: settlement_in(mode),
        },
        BusinessType::Purchase => AccountPair {
            debit_code: PURCHASE,
            credit_code: settlement_out(mode),
        },
        BusinessType::PurchaseReturn => AccountPair {
            debit_code: settlement_out(mode),
            credit_code: PURCHASE,
        },
        BusinessType::Expense => AccountPair {
            debit_code: GENERAL_EXPENSE,
            credit_code: settlement_out(mode),
        },
        BusinessType::Income => AccountPair {
            debit_code: settlement_in(mode),
            credit_code: OTHER_INCOME,
        },
        // Mode is irrelevant: a deposit always moves cash into the bank.
        BusinessType::BankDeposit => AccountPair {
            debit_code: BANK,
            credit_code: CASH,
        },
        BusinessType::ProfessionalFee => AccountPair {
            debit_code: PROFESSIONAL_FEES,
            credit_code: settlement_out(mode),
        },
        BusinessType::Payroll => AccountPair {
            debit_code: SALARIES,
            credit_code: settlement_out(mode),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const ALL_TYPES: [BusinessType; 9] = [
        BusinessType::Sales,
        BusinessType::Purchase,
        BusinessType::SalesReturn,
        BusinessType::PurchaseReturn,
        BusinessType::Expense,
        BusinessType::Income,
        BusinessType::BankDeposit,
        BusinessType::ProfessionalFee,
        BusinessType::Payroll,
    ];

    const ALL_MODES: [PaymentMode; 3] = [PaymentMode::Cash, PaymentMode::Bank, PaymentMode::Due];

    #[rstest]
    #[case(BusinessType::Sales, PaymentMode::Cash, CASH, SALES)]
    #[case(BusinessType::Sales, PaymentMode::Due, ACCOUNTS_RECEIVABLE, SALES)]
    #[case(BusinessType::Expense, PaymentMode::Bank, GENERAL_EXPENSE, BANK)]
    #[case(BusinessType::Purchase, PaymentMode::Due, PURCHASE, ACCOUNTS_PAYABLE)]
    #[case(BusinessType::Payroll, PaymentMode::Cash, SALARIES, CASH)]
    #[case(BusinessType::ProfessionalFee, PaymentMode::Bank, PROFESSIONAL_FEES, BANK)]
    fn test_event_resolves_expected_pair(
        #[case] txn_type: BusinessType,
        #[case] mode: PaymentMode,
        #[case] debit_code: &str,
        #[case] credit_code: &str,
    ) {
        let pair = account_pair(txn_type, mode);
        assert_eq!(pair.debit_code, debit_code);
        assert_eq!(pair.credit_code, credit_code);
    }

    #[test]
    fn test_return_inverts_base_event() {
        let sale = account_pair(BusinessType::Sales, PaymentMode::Cash);
        let ret = account_pair(BusinessType::SalesReturn, PaymentMode::Cash);
        assert_eq!(sale.debit_code, ret.credit_code);
        assert_eq!(sale.credit_code, ret.debit_code);

        let purchase = account_pair(BusinessType::Purchase, PaymentMode::Due);
        let ret = account_pair(BusinessType::PurchaseReturn, PaymentMode::Due);
        assert_eq!(purchase.debit_code, ret.credit_code);
        assert_eq!(purchase.credit_code, ret.debit_code);
    }

    #[test]
    fn test_bank_deposit_ignores_mode() {
        for mode in ALL_MODES {
            let pair = account_pair(BusinessType::BankDeposit, mode);
            assert_eq!(pair.debit_code, BANK);
            assert_eq!(pair.credit_code, CASH);
        }
    }

    #[test]
    fn test_mapping_is_total_and_two_sided() {
        for txn_type in ALL_TYPES {
            for mode in ALL_MODES {
                let pair = account_pair(txn_type, mode);
                assert_ne!(
                    pair.debit_code, pair.credit_code,
                    "{txn_type:?}/{mode:?} maps to a one-sided pair"
                );
            }
        }
    }

    #[test]
    fn test_head_wise_settlement_rejects_due() {
        assert_eq!(head_wise_settlement(PaymentMode::Cash), Some(CASH));
        assert_eq!(head_wise_settlement(PaymentMode::Bank), Some(BANK));
        assert_eq!(head_wise_settlement(PaymentMode::Due), None);
    }
}
