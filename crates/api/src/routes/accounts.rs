//! Chart of accounts routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use kassa_core::ledger::AccountType;
use kassa_db::repositories::account::{
    AccountRepository, CreateAccountInput, UpdateAccountInput,
};
use kassa_shared::error::AppError;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::AppState;
use crate::routes::{error_response, page_request};

/// Creates the chart of accounts routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .route("/accounts/{id}", put(update_account).delete(delete_account))
        .route("/accounts/hierarchy", get(list_hierarchy))
        .route("/accounts/heads/income", get(list_income_heads))
        .route("/accounts/heads/expense", get(list_expense_heads))
        .route("/accounts/seed", post(seed_accounts))
}

/// Request body for creating an account.
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    /// Account code (unique).
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Parent account.
    pub parent_id: Option<Uuid>,
    /// Free-text description.
    pub description: Option<String>,
}

/// Request body for updating an account.
///
/// The code is not updatable; absent fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateAccountRequest {
    /// Account name.
    pub name: Option<String>,
    /// Account type (rejected once the account has journal lines).
    pub account_type: Option<AccountType>,
    /// Parent account.
    pub parent_id: Option<Uuid>,
    /// Free-text description.
    pub description: Option<String>,
}

/// Query parameters for listing accounts.
#[derive(Debug, Deserialize)]
pub struct ListAccountsQuery {
    /// Free-text search over code and name.
    pub search: Option<String>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page.
    pub limit: Option<u32>,
}

/// Query parameters for the hierarchy listing.
#[derive(Debug, Deserialize)]
pub struct HierarchyQuery {
    /// Free-text search over code and name.
    pub search: Option<String>,
}

async fn create_account(
    State(state): State<AppState>,
    Json(body): Json<CreateAccountRequest>,
) -> Response {
    let repo = AccountRepository::new((*state.db).clone());

    match repo
        .create_account(CreateAccountInput {
            code: body.code,
            name: body.name,
            account_type: body.account_type,
            parent_id: body.parent_id,
            description: body.description,
        })
        .await
    {
        Ok(account) => (StatusCode::CREATED, Json(account)).into_response(),
        Err(e) => error_response(&AppError::from(e)),
    }
}

async fn update_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateAccountRequest>,
) -> Response {
    let repo = AccountRepository::new((*state.db).clone());

    match repo
        .update_account(
            id,
            UpdateAccountInput {
                name: body.name,
                account_type: body.account_type,
                parent_id: body.parent_id.map(Some),
                description: body.description.map(Some),
            },
        )
        .await
    {
        Ok(account) => Json(account).into_response(),
        Err(e) => error_response(&AppError::from(e)),
    }
}

async fn delete_account(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    let repo = AccountRepository::new((*state.db).clone());

    match repo.delete_account(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(&AppError::from(e)),
    }
}

async fn list_accounts(
    State(state): State<AppState>,
    Query(query): Query<ListAccountsQuery>,
) -> Response {
    let repo = AccountRepository::new((*state.db).clone());

    match repo
        .list_accounts(
            query.search.as_deref(),
            page_request(query.page, query.limit),
        )
        .await
    {
        Ok(page) => Json(page).into_response(),
        Err(e) => error_response(&AppError::from(e)),
    }
}

async fn list_hierarchy(
    State(state): State<AppState>,
    Query(query): Query<HierarchyQuery>,
) -> Response {
    let repo = AccountRepository::new((*state.db).clone());

    match repo.list_hierarchical(query.search.as_deref()).await {
        Ok(rows) => Json(rows).into_response(),
        Err(e) => error_response(&AppError::from(e)),
    }
}

async fn list_income_heads(State(state): State<AppState>) -> Response {
    list_heads(state, AccountType::Income).await
}

async fn list_expense_heads(State(state): State<AppState>) -> Response {
    list_heads(state, AccountType::Expense).await
}

async fn list_heads(state: AppState, account_type: AccountType) -> Response {
    let repo = AccountRepository::new((*state.db).clone());

    match repo.list_by_type(account_type).await {
        Ok(rows) => Json(rows).into_response(),
        Err(e) => error_response(&AppError::from(e)),
    }
}

async fn seed_accounts(State(state): State<AppState>) -> Response {
    let repo = AccountRepository::new((*state.db).clone());

    match repo.seed_default_accounts().await {
        Ok(created) => (
            StatusCode::CREATED,
            Json(json!({
                "created": created.len(),
                "accounts": created,
            })),
        )
            .into_response(),
        Err(e) => error_response(&AppError::from(e)),
    }
}
