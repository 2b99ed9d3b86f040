//! Repository tests for chart seeding and the referential delete guards,
//! run against a mocked database connection.

use std::collections::BTreeMap;

use kassa_core::ledger::{AccountType as CoreAccountType, mapping};
use kassa_db::entities::{accounts, sea_orm_active_enums::AccountType};
use kassa_db::repositories::{AccountError, AccountRepository, UpdateAccountInput};
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};
use uuid::Uuid;

/// Every code the default chart seeds, in seeding order.
const CHART_CODES: [&str; 11] = [
    mapping::CASH,
    mapping::BANK,
    mapping::ACCOUNTS_RECEIVABLE,
    mapping::ACCOUNTS_PAYABLE,
    mapping::OWNERS_EQUITY,
    mapping::SALES,
    mapping::OTHER_INCOME,
    mapping::PURCHASE,
    mapping::SALARIES,
    mapping::PROFESSIONAL_FEES,
    mapping::GENERAL_EXPENSE,
];

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

fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
}

#[tokio::test]
async fn test_seed_creates_full_default_chart() {
    // One lookup (miss) then one returning insert per chart code.
    let mut results: Vec<Vec<accounts::Model>> = Vec::new();
    for code in CHART_CODES {
        results.push(Vec::new());
        results.push(vec![account(code, AccountType::Asset)]);
    }

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(results)
        .into_connection();

    let created = AccountRepository::new(db)
        .seed_default_accounts()
        .await
        .expect("seeding an empty chart should succeed");

    assert_eq!(created.len(), CHART_CODES.len());
}

#[tokio::test]
async fn test_seed_is_idempotent_when_chart_exists() {
    // Every lookup hits; no insert results are queued, so any attempted
    // write would surface as a database error instead of a clean result.
    let results: Vec<Vec<accounts::Model>> = CHART_CODES
        .iter()
        .map(|code| vec![account(code, AccountType::Asset)])
        .collect();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(results)
        .into_connection();

    let created = AccountRepository::new(db)
        .seed_default_accounts()
        .await
        .expect("re-seeding a full chart should succeed");

    assert!(created.is_empty());
}

#[tokio::test]
async fn test_delete_rejected_while_children_exist() {
    let target = account("1000", AccountType::Asset);
    let id = target.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![target]])
        .append_query_results([vec![count_row(2)]])
        .into_connection();

    let err = AccountRepository::new(db)
        .delete_account(id)
        .await
        .unwrap_err();

    assert!(matches!(err, AccountError::HasChildren(2)));
}

#[tokio::test]
async fn test_delete_rejected_while_journal_lines_reference_account() {
    let target = account("4000", AccountType::Income);
    let id = target.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![target]])
        .append_query_results([vec![count_row(0)], vec![count_row(3)]])
        .into_connection();

    let err = AccountRepository::new(db)
        .delete_account(id)
        .await
        .unwrap_err();

    assert!(matches!(err, AccountError::HasJournalLines(3)));
}

#[tokio::test]
async fn test_delete_succeeds_once_guards_pass() {
    let target = account("3000", AccountType::Equity);
    let id = target.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![target]])
        .append_query_results([vec![count_row(0)], vec![count_row(0)]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    AccountRepository::new(db)
        .delete_account(id)
        .await
        .expect("unreferenced leaf account should delete");
}

#[tokio::test]
async fn test_type_change_rejected_once_account_has_activity() {
    let target = account("1000", AccountType::Asset);
    let id = target.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![target]])
        .append_query_results([vec![count_row(5)]])
        .into_connection();

    let input = UpdateAccountInput {
        account_type: Some(CoreAccountType::Income),
        ..Default::default()
    };
    let err = AccountRepository::new(db)
        .update_account(id, input)
        .await
        .unwrap_err();

    assert!(matches!(err, AccountError::HasJournalLines(5)));
}
