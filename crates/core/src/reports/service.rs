//! Report assembly from per-account totals.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::balance::calculate_balance;
use super::types::{
    AccountTotals, OverviewBucket, ProfitAndLossLine, ProfitAndLossReport, TrialBalanceReport,
    TrialBalanceRow, TrialBalanceStatus,
};
use crate::ledger::AccountType;

/// Service for assembling financial reports from aggregated journal data.
pub struct ReportService;

impl ReportService {
    /// Assembles a trial balance from per-account gross totals.
    ///
    /// The report intentionally shows gross debit/credit columns, not
    /// normalized balances. Grand totals must match because every journal
    /// individually balances; a mismatch signals a line written outside the
    /// journal engine and is surfaced, never corrected.
    #[must_use]
    pub fn trial_balance(
        as_of: Option<NaiveDate>,
        accounts: Vec<AccountTotals>,
    ) -> TrialBalanceReport {
        let total_debit: Decimal = accounts.iter().map(|a| a.total_debit).sum();
        let total_credit: Decimal = accounts.iter().map(|a| a.total_credit).sum();

        let status = if total_debit == total_credit {
            TrialBalanceStatus::Balanced
        } else {
            TrialBalanceStatus::Unbalanced
        };

        TrialBalanceReport {
            as_of,
            accounts: accounts
                .into_iter()
                .map(|a| TrialBalanceRow {
                    account_id: a.account_id,
                    code: a.code,
                    name: a.name,
                    account_type: a.account_type,
                    debit: a.total_debit,
                    credit: a.total_credit,
                })
                .collect(),
            total_debit,
            total_credit,
            status,
        }
    }

    /// Assembles a Profit & Loss report from income/expense account totals.
    ///
    /// Heads with zero activity are omitted. Non-income/expense accounts in
    /// the input are ignored.
    #[must_use]
    pub fn profit_and_loss(accounts: Vec<AccountTotals>) -> ProfitAndLossReport {
        let mut income = Vec::new();
        let mut expense = Vec::new();
        let mut total_income = Decimal::ZERO;
        let mut total_expense = Decimal::ZERO;

        for account in accounts {
            let amount =
                calculate_balance(account.account_type, account.total_debit, account.total_credit);
            if amount.is_zero() {
                continue;
            }
            let entry = ProfitAndLossLine {
                code: account.code,
                name: account.name,
                amount,
            };
            match account.account_type {
                AccountType::Income => {
                    total_income += amount;
                    income.push(entry);
                }
                AccountType::Expense => {
                    total_expense += amount;
                    expense.push(entry);
                }
                _ => {}
            }
        }

        ProfitAndLossReport {
            income,
            expense,
            total_income,
            total_expense,
            net_profit: total_income - total_expense,
        }
    }

    /// Condenses a P&L into one overview bucket.
    #[must_use]
    pub fn overview_bucket(report: &ProfitAndLossReport) -> OverviewBucket {
        OverviewBucket {
            income: report.total_income,
            expense: report.total_expense,
            net: report.net_profit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn totals(
        code: &str,
        account_type: AccountType,
        debit: Decimal,
        credit: Decimal,
    ) -> AccountTotals {
        AccountTotals {
            account_id: Uuid::new_v4(),
            code: code.to_string(),
            name: format!("Account {code}"),
            account_type,
            total_debit: debit,
            total_credit: credit,
        }
    }

    #[test]
    fn test_trial_balance_balanced() {
        let report = ReportService::trial_balance(
            None,
            vec![
                totals("1000", AccountType::Asset, dec!(15000), dec!(0)),
                totals("4000", AccountType::Income, dec!(0), dec!(15000)),
            ],
        );
        assert_eq!(report.total_debit, dec!(15000));
        assert_eq!(report.total_credit, dec!(15000));
        assert_eq!(report.status, TrialBalanceStatus::Balanced);
    }

    #[test]
    fn test_trial_balance_surfaces_mismatch() {
        let report = ReportService::trial_balance(
            None,
            vec![
                totals("1000", AccountType::Asset, dec!(100), dec!(0)),
                totals("4000", AccountType::Income, dec!(0), dec!(90)),
            ],
        );
        assert_eq!(report.status, TrialBalanceStatus::Unbalanced);
        // The numbers are still reported so the caller can diagnose.
        assert_eq!(report.total_debit, dec!(100));
        assert_eq!(report.total_credit, dec!(90));
    }

    #[test]
    fn test_trial_balance_shows_gross_columns() {
        let report = ReportService::trial_balance(
            None,
            vec![totals("1000", AccountType::Asset, dec!(500), dec!(500))],
        );
        // Gross, not netted to zero.
        assert_eq!(report.accounts[0].debit, dec!(500));
        assert_eq!(report.accounts[0].credit, dec!(500));
        assert_eq!(report.status, TrialBalanceStatus::Balanced);
    }

    #[test]
    fn test_profit_and_loss() {
        let report = ReportService::profit_and_loss(vec![
            totals("4000", AccountType::Income, dec!(0), dec!(10000)),
            totals("4100", AccountType::Income, dec!(500), dec!(2000)),
            totals("5000", AccountType::Expense, dec!(3000), dec!(0)),
        ]);
        assert_eq!(report.total_income, dec!(11500));
        assert_eq!(report.total_expense, dec!(3000));
        assert_eq!(report.net_profit, dec!(8500));
        assert_eq!(report.income.len(), 2);
        assert_eq!(report.expense.len(), 1);
    }

    #[test]
    fn test_profit_and_loss_omits_zero_heads() {
        let report = ReportService::profit_and_loss(vec![
            totals("4000", AccountType::Income, dec!(0), dec!(100)),
            totals("4100", AccountType::Income, dec!(0), dec!(0)),
            totals("5900", AccountType::Expense, dec!(250), dec!(250)),
        ]);
        assert_eq!(report.income.len(), 1);
        assert!(report.expense.is_empty());
    }

    #[test]
    fn test_profit_and_loss_ignores_non_pnl_accounts() {
        let report = ReportService::profit_and_loss(vec![totals(
            "1000",
            AccountType::Asset,
            dec!(999),
            dec!(0),
        )]);
        assert!(report.income.is_empty());
        assert!(report.expense.is_empty());
        assert_eq!(report.net_profit, Decimal::ZERO);
    }

    #[test]
    fn test_overview_bucket() {
        let report = ReportService::profit_and_loss(vec![
            totals("4000", AccountType::Income, dec!(0), dec!(800)),
            totals("5900", AccountType::Expense, dec!(300), dec!(0)),
        ]);
        let bucket = ReportService::overview_bucket(&report);
        assert_eq!(bucket.income, dec!(800));
        assert_eq!(bucket.expense, dec!(300));
        assert_eq!(bucket.net, dec!(500));
    }
}
