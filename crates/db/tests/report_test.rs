//! Repository tests for report reads: every report gathers its numbers
//! inside one database transaction, so concurrent postings can never be
//! half-counted. Run against a mocked database connection.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use kassa_core::reports::TrialBalanceStatus;
use kassa_db::entities::{accounts, sea_orm_active_enums::AccountType};
use kassa_db::repositories::ReportRepository;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{DatabaseBackend, MockDatabase, Value};
use uuid::Uuid;

fn account(code: &str, name: &str, account_type: AccountType) -> accounts::Model {
    accounts::Model {
        id: Uuid::new_v4(),
        code: code.to_owned(),
        name: name.to_owned(),
        account_type,
        parent_id: None,
        description: None,
        created_at: chrono::Utc::now().into(),
        updated_at: chrono::Utc::now().into(),
    }
}

fn amount_row(debit: Decimal, credit: Decimal) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("debit", debit.into()), ("credit", credit.into())])
}

fn line_row(date: NaiveDate, debit: Decimal, credit: Decimal) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([
        ("date", date.into()),
        ("narration", Value::String(None)),
        ("debit", debit.into()),
        ("credit", credit.into()),
    ])
}

#[tokio::test]
async fn test_trial_balance_reads_one_snapshot() {
    let cash = account("1000", "Cash", AccountType::Asset);
    let sales = account("4000", "Sales", AccountType::Income);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![cash, sales]])
        .append_query_results([
            vec![amount_row(dec!(500.00), Decimal::ZERO)],
            vec![amount_row(Decimal::ZERO, dec!(500.00))],
        ])
        .into_connection();

    let report = ReportRepository::new(db.clone())
        .get_trial_balance(None)
        .await
        .expect("trial balance over two accounts should build");

    assert_eq!(report.status, TrialBalanceStatus::Balanced);
    assert_eq!(report.total_debit, dec!(500.00));
    assert_eq!(report.total_credit, dec!(500.00));

    // The account list and every per-account total ran inside a single
    // database transaction.
    assert_eq!(db.into_transaction_log().len(), 1);
}

#[tokio::test]
async fn test_ledger_opening_and_window_read_one_snapshot() {
    let cash = account("1000", "Cash", AccountType::Asset);
    let account_id = cash.id;
    let from = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![cash]])
        .append_query_results([
            // Lines strictly before the window.
            vec![line_row(
                NaiveDate::from_ymd_opt(2026, 7, 15).unwrap(),
                dec!(100.00),
                Decimal::ZERO,
            )],
            // Lines inside the window.
            vec![
                line_row(
                    NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
                    dec!(50.00),
                    Decimal::ZERO,
                ),
                line_row(
                    NaiveDate::from_ymd_opt(2026, 8, 20).unwrap(),
                    Decimal::ZERO,
                    dec!(30.00),
                ),
            ],
        ])
        .into_connection();

    let report = ReportRepository::new(db.clone())
        .get_ledger(account_id, Some(from), None)
        .await
        .expect("ledger over a dated window should build");

    assert_eq!(report.opening_balance, dec!(100.00));
    assert_eq!(report.closing_balance, dec!(120.00));
    assert_eq!(report.transactions.len(), 2);
    assert_eq!(report.transactions[0].balance, dec!(150.00));

    // Opening-balance and window reads shared one database transaction.
    assert_eq!(db.into_transaction_log().len(), 1);
}
