//! Repository tests for the transaction translator: the journal and the
//! transaction row must commit inside a single database transaction, and a
//! failed translation must never write, run against a mocked connection.

use chrono::NaiveDate;
use kassa_core::ledger::{BusinessType, PaymentMode as CorePaymentMode, mapping};
use kassa_db::entities::{
    accounts, journal_lines, journals,
    sea_orm_active_enums::{AccountType, PaymentMode},
    transactions,
};
use kassa_db::repositories::{CreateTransactionInput, TransactionError, TransactionRepository};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{DatabaseBackend, MockDatabase};
use uuid::Uuid;

fn account(code: &str, account_type: AccountType) -> accounts::Model {
    accounts::Model {
        id: Uuid::new_v4(),
        code: code.to_owned(),
        name: format!("Account {code}"),
        account_type,
        parent_id: None,
        description: None,
        created_at: chrono::Utc::now().into(),
        updated_at: chrono::Utc::now().into(),
    }
}

fn cash_sale(amount: Decimal) -> CreateTransactionInput {
    CreateTransactionInput {
        txn_type: BusinessType::Sales,
        amount,
        payment_mode: CorePaymentMode::Cash,
        date: NaiveDate::from_ymd_opt(2026, 8, 30).unwrap(),
        description: Some("Walk-in sale".to_owned()),
        created_by: None,
    }
}

#[tokio::test]
async fn test_post_transaction_commits_journal_and_row_atomically() {
    let cash = account(mapping::CASH, AccountType::Asset);
    let sales = account(mapping::SALES, AccountType::Income);
    let journal_id = Uuid::new_v4();
    let date = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();

    let journal = journals::Model {
        id: journal_id,
        date,
        narration: Some("Walk-in sale".to_owned()),
        reference_type: Some("transaction".to_owned()),
        reference_id: Some(Uuid::new_v4()),
        created_by: None,
        created_at: chrono::Utc::now().into(),
    };
    let debit_line = journal_lines::Model {
        id: Uuid::new_v4(),
        journal_id,
        account_id: cash.id,
        debit: dec!(500.00),
        credit: Decimal::ZERO,
    };
    let credit_line = journal_lines::Model {
        id: Uuid::new_v4(),
        journal_id,
        account_id: sales.id,
        debit: Decimal::ZERO,
        credit: dec!(500.00),
    };
    let record = transactions::Model {
        id: Uuid::new_v4(),
        txn_type: "SALES".to_owned(),
        amount: dec!(500.00),
        payment_mode: PaymentMode::Cash,
        date,
        description: Some("Walk-in sale".to_owned()),
        journal_id,
        created_by: None,
        created_at: chrono::Utc::now().into(),
    };

    // Code resolution for both sides, account existence per line, then the
    // returning inserts: journal header, two lines, transaction row.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([
            vec![cash.clone()],
            vec![sales.clone()],
            vec![cash],
            vec![sales],
        ])
        .append_query_results([vec![journal]])
        .append_query_results([vec![debit_line], vec![credit_line]])
        .append_query_results([vec![record]])
        .into_connection();

    let posted = TransactionRepository::new(db.clone())
        .post_transaction(cash_sale(dec!(500.00)))
        .await
        .expect("mapped cash sale should post");

    assert_eq!(posted.journal_id, journal_id);
    assert_eq!(posted.amount, dec!(500.00));

    // Every statement ran inside one database transaction.
    assert_eq!(db.into_transaction_log().len(), 1);
}

#[tokio::test]
async fn test_unresolved_mapping_aborts_before_any_write() {
    // The debit side resolves but the credit side is missing from the
    // chart. No insert results are queued, so a write attempt would
    // surface as a database error instead of the mapping error.
    let cash = account(mapping::CASH, AccountType::Asset);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![cash], Vec::<accounts::Model>::new()])
        .into_connection();

    let err = TransactionRepository::new(db)
        .post_transaction(cash_sale(dec!(100.00)))
        .await
        .unwrap_err();

    assert!(
        matches!(err, TransactionError::UnresolvedAccountMapping(code) if code == mapping::SALES)
    );
}

#[tokio::test]
async fn test_non_positive_amount_rejected_without_touching_database() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let err = TransactionRepository::new(db)
        .post_transaction(cash_sale(Decimal::ZERO))
        .await
        .unwrap_err();

    assert!(matches!(err, TransactionError::InvalidAmount(_)));
}
