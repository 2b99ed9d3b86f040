//! Database-backed enums.
//!
//! These mirror the Postgres enum types. Conversions to and from the pure
//! domain enums in `kassa-core` live here so repositories never match on
//! string values.

use kassa_core::ledger::{AccountType as CoreAccountType, PaymentMode as CorePaymentMode};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account type classification (Postgres `account_type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_type")]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    /// Resources owned.
    #[sea_orm(string_value = "asset")]
    Asset,
    /// Obligations owed.
    #[sea_orm(string_value = "liability")]
    Liability,
    /// Owner's residual interest.
    #[sea_orm(string_value = "equity")]
    Equity,
    /// Revenue accounts.
    #[sea_orm(string_value = "income")]
    Income,
    /// Cost accounts.
    #[sea_orm(string_value = "expense")]
    Expense,
}

impl From<AccountType> for CoreAccountType {
    fn from(value: AccountType) -> Self {
        match value {
            AccountType::Asset => Self::Asset,
            AccountType::Liability => Self::Liability,
            AccountType::Equity => Self::Equity,
            AccountType::Income => Self::Income,
            AccountType::Expense => Self::Expense,
        }
    }
}

impl From<CoreAccountType> for AccountType {
    fn from(value: CoreAccountType) -> Self {
        match value {
            CoreAccountType::Asset => Self::Asset,
            CoreAccountType::Liability => Self::Liability,
            CoreAccountType::Equity => Self::Equity,
            CoreAccountType::Income => Self::Income,
            CoreAccountType::Expense => Self::Expense,
        }
    }
}

/// Payment mode of a business transaction (Postgres `payment_mode`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_mode")]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMode {
    /// Settled in cash.
    #[sea_orm(string_value = "cash")]
    Cash,
    /// Settled through the bank account.
    #[sea_orm(string_value = "bank")]
    Bank,
    /// On credit.
    #[sea_orm(string_value = "due")]
    Due,
}

impl From<PaymentMode> for CorePaymentMode {
    fn from(value: PaymentMode) -> Self {
        match value {
            PaymentMode::Cash => Self::Cash,
            PaymentMode::Bank => Self::Bank,
            PaymentMode::Due => Self::Due,
        }
    }
}

impl From<CorePaymentMode> for PaymentMode {
    fn from(value: CorePaymentMode) -> Self {
        match value {
            CorePaymentMode::Cash => Self::Cash,
            CorePaymentMode::Bank => Self::Bank,
            CorePaymentMode::Due => Self::Due,
        }
    }
}
