//! Ledger domain types for journal creation and validation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account type classification for the chart of accounts.
///
/// In double-entry bookkeeping:
/// - Asset and Expense accounts are debit-normal (debits increase them)
/// - Liability, Equity and Income accounts are credit-normal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    /// Resources owned (cash, bank, receivables).
    Asset,
    /// Obligations owed (payables, loans).
    Liability,
    /// Owner's residual interest.
    Equity,
    /// Revenue accounts.
    Income,
    /// Cost accounts.
    Expense,
}

impl AccountType {
    /// Returns true if this account type's normal balance is on the debit side.
    #[must_use]
    pub const fn is_debit_normal(self) -> bool {
        matches!(self, Self::Asset | Self::Expense)
    }
}

/// Payment mode of a business transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMode {
    /// Settled in cash.
    Cash,
    /// Settled through the bank account.
    Bank,
    /// On credit (receivable/payable).
    Due,
}

/// Business transaction type classification.
///
/// These are the one-sided event categories the surrounding ERP modules
/// emit; each maps to a fixed debit/credit account pair (see `mapping`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BusinessType {
    /// Sale of goods or services.
    Sales,
    /// Purchase of goods.
    Purchase,
    /// Customer return of sold goods.
    SalesReturn,
    /// Return of purchased goods to a supplier.
    PurchaseReturn,
    /// General operating expense.
    Expense,
    /// Miscellaneous income.
    Income,
    /// Moving cash into the bank account.
    BankDeposit,
    /// Fees paid to external professionals.
    ProfessionalFee,
    /// Salary payment.
    Payroll,
}

impl BusinessType {
    /// The canonical wire/storage name of this business type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sales => "SALES",
            Self::Purchase => "PURCHASE",
            Self::SalesReturn => "SALES_RETURN",
            Self::PurchaseReturn => "PURCHASE_RETURN",
            Self::Expense => "EXPENSE",
            Self::Income => "INCOME",
            Self::BankDeposit => "BANK_DEPOSIT",
            Self::ProfessionalFee => "PROFESSIONAL_FEE",
            Self::Payroll => "PAYROLL",
        }
    }
}

impl std::str::FromStr for BusinessType {
    type Err = UnknownBusinessType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SALES" => Ok(Self::Sales),
            "PURCHASE" => Ok(Self::Purchase),
            "SALES_RETURN" => Ok(Self::SalesReturn),
            "PURCHASE_RETURN" => Ok(Self::PurchaseReturn),
            "EXPENSE" => Ok(Self::Expense),
            "INCOME" => Ok(Self::Income),
            "BANK_DEPOSIT" => Ok(Self::BankDeposit),
            "PROFESSIONAL_FEE" => Ok(Self::ProfessionalFee),
            "PAYROLL" => Ok(Self::Payroll),
            other => Err(UnknownBusinessType(other.to_owned())),
        }
    }
}

/// Error for an unrecognized business type name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown business type '{0}'")]
pub struct UnknownBusinessType(pub String);

/// Input for a single journal line.
///
/// Exactly one of `debit`/`credit` must be nonzero; both must be non-negative.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct JournalLineInput {
    /// The account to post to.
    pub account_id: Uuid,
    /// Debit amount (0 if this is a credit line).
    #[serde(default)]
    pub debit: Decimal,
    /// Credit amount (0 if this is a debit line).
    #[serde(default)]
    pub credit: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_balance_sides() {
        assert!(AccountType::Asset.is_debit_normal());
        assert!(AccountType::Expense.is_debit_normal());
        assert!(!AccountType::Liability.is_debit_normal());
        assert!(!AccountType::Equity.is_debit_normal());
        assert!(!AccountType::Income.is_debit_normal());
    }

    #[test]
    fn test_account_type_wire_format() {
        let json = serde_json::to_string(&AccountType::Income).unwrap();
        assert_eq!(json, "\"INCOME\"");
        let back: AccountType = serde_json::from_str("\"ASSET\"").unwrap();
        assert_eq!(back, AccountType::Asset);
    }

    #[test]
    fn test_business_type_wire_format() {
        let json = serde_json::to_string(&BusinessType::ProfessionalFee).unwrap();
        assert_eq!(json, "\"PROFESSIONAL_FEE\"");
        let back: BusinessType = serde_json::from_str("\"SALES_RETURN\"").unwrap();
        assert_eq!(back, BusinessType::SalesReturn);
    }

    #[test]
    fn test_business_type_str_round_trip() {
        for bt in [
            BusinessType::Sales,
            BusinessType::Purchase,
            BusinessType::SalesReturn,
            BusinessType::PurchaseReturn,
            BusinessType::Expense,
            BusinessType::Income,
            BusinessType::BankDeposit,
            BusinessType::ProfessionalFee,
            BusinessType::Payroll,
        ] {
            assert_eq!(bt.as_str().parse::<BusinessType>().unwrap(), bt);
        }
        assert!("REFUND".parse::<BusinessType>().is_err());
    }
}
