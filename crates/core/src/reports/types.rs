//! Report data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ledger::AccountType;

/// Gross debit/credit totals for one account, the raw input to the
/// trial balance and P&L assemblers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountTotals {
    /// Account ID.
    pub account_id: Uuid,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Sum of debit amounts.
    pub total_debit: Decimal,
    /// Sum of credit amounts.
    pub total_credit: Decimal,
}

/// One dated line of an account's activity, input to the ledger walk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerLine {
    /// Journal date.
    pub date: NaiveDate,
    /// Journal narration.
    pub narration: Option<String>,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
}

/// One row of the ledger report, with the running balance after the line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerRow {
    /// Journal date.
    pub date: NaiveDate,
    /// Journal narration.
    pub narration: Option<String>,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Running balance after this line (sign convention applied).
    pub balance: Decimal,
}

/// Account ledger report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerReport {
    /// Balance before the requested window.
    pub opening_balance: Decimal,
    /// Balance after the last line in the window.
    pub closing_balance: Decimal,
    /// Dated lines with running balances.
    pub transactions: Vec<LedgerRow>,
}

/// Trial balance reconciliation status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrialBalanceStatus {
    /// Grand debit and credit totals are equal.
    Balanced,
    /// Totals differ - a line was written outside the journal engine.
    Unbalanced,
}

/// One account row of the trial balance (gross columns, not netted).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    /// Account ID.
    pub account_id: Uuid,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Gross debit total.
    pub debit: Decimal,
    /// Gross credit total.
    pub credit: Decimal,
}

/// Trial balance report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceReport {
    /// As-of date, if the caller restricted one.
    pub as_of: Option<NaiveDate>,
    /// Per-account gross totals.
    pub accounts: Vec<TrialBalanceRow>,
    /// Grand debit total.
    pub total_debit: Decimal,
    /// Grand credit total.
    pub total_credit: Decimal,
    /// Whether the books reconcile.
    pub status: TrialBalanceStatus,
}

/// One income or expense head in the P&L.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitAndLossLine {
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Normalized balance (sign convention applied).
    pub amount: Decimal,
}

/// Profit & Loss report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitAndLossReport {
    /// Income heads with nonzero activity.
    pub income: Vec<ProfitAndLossLine>,
    /// Expense heads with nonzero activity.
    pub expense: Vec<ProfitAndLossLine>,
    /// Sum of income amounts.
    pub total_income: Decimal,
    /// Sum of expense amounts.
    pub total_expense: Decimal,
    /// `total_income - total_expense`.
    pub net_profit: Decimal,
}

/// One time bucket of the overview report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewBucket {
    /// Total income in the window.
    pub income: Decimal,
    /// Total expense in the window.
    pub expense: Decimal,
    /// `income - expense`.
    pub net: Decimal,
}

/// Dashboard overview: P&L condensed over standard windows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewReport {
    /// Today.
    pub today: OverviewBucket,
    /// Current week (Monday through today).
    pub this_week: OverviewBucket,
    /// Current month.
    pub this_month: OverviewBucket,
    /// Current year.
    pub this_year: OverviewBucket,
}
