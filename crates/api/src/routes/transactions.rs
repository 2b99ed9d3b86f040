//! Business transaction routes: mapped transactions and head-wise
//! income/expense postings.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::NaiveDate;
use kassa_core::ledger::{BusinessType, PaymentMode};
use kassa_db::repositories::transaction::{
    CreateTransactionInput, HeadWiseInput, TransactionFilter, TransactionRepository,
};
use kassa_shared::error::AppError;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::AppState;
use crate::routes::{error_response, page_request};

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/transactions",
            post(create_transaction).get(list_transactions),
        )
        .route("/incomes", post(create_income))
        .route("/expenses", post(create_expense))
}

/// Request body for posting a business transaction.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    /// Business event category.
    #[serde(rename = "type")]
    pub txn_type: BusinessType,
    /// Transaction amount.
    pub amount: Decimal,
    /// Settlement mode.
    pub payment_mode: PaymentMode,
    /// Business date.
    pub date: NaiveDate,
    /// Free-text description.
    pub description: Option<String>,
    /// Posting user.
    pub created_by: Option<Uuid>,
}

/// Request body for head-wise income/expense postings.
#[derive(Debug, Deserialize)]
pub struct HeadWiseRequest {
    /// The income or expense head account.
    pub head_id: Uuid,
    /// Transaction amount.
    pub amount: Decimal,
    /// Settlement mode (cash or bank).
    pub payment_mode: PaymentMode,
    /// Business date.
    pub date: NaiveDate,
    /// Free-text description.
    pub description: Option<String>,
    /// Posting user.
    pub created_by: Option<Uuid>,
}

/// Query parameters for listing transactions.
#[derive(Debug, Deserialize)]
pub struct ListTransactionsQuery {
    /// Filter by business type.
    #[serde(rename = "type")]
    pub txn_type: Option<BusinessType>,
    /// Exact-date filter.
    pub date: Option<NaiveDate>,
    /// Range start (inclusive).
    pub start_date: Option<NaiveDate>,
    /// Range end (inclusive).
    pub end_date: Option<NaiveDate>,
    /// Free-text search over the description.
    pub query: Option<String>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page.
    pub limit: Option<u32>,
}

impl HeadWiseRequest {
    fn into_input(self) -> HeadWiseInput {
        HeadWiseInput {
            head_id: self.head_id,
            amount: self.amount,
            payment_mode: self.payment_mode,
            date: self.date,
            description: self.description,
            created_by: self.created_by,
        }
    }
}

async fn create_transaction(
    State(state): State<AppState>,
    Json(body): Json<CreateTransactionRequest>,
) -> Response {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo
        .post_transaction(CreateTransactionInput {
            txn_type: body.txn_type,
            amount: body.amount,
            payment_mode: body.payment_mode,
            date: body.date,
            description: body.description,
            created_by: body.created_by,
        })
        .await
    {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(e) => error_response(&AppError::from(e)),
    }
}

async fn create_income(
    State(state): State<AppState>,
    Json(body): Json<HeadWiseRequest>,
) -> Response {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo.create_head_wise_income(body.into_input()).await {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(e) => error_response(&AppError::from(e)),
    }
}

async fn create_expense(
    State(state): State<AppState>,
    Json(body): Json<HeadWiseRequest>,
) -> Response {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo.create_head_wise_expense(body.into_input()).await {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(e) => error_response(&AppError::from(e)),
    }
}

async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<ListTransactionsQuery>,
) -> Response {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo
        .list_transactions(
            TransactionFilter {
                txn_type: query.txn_type,
                date: query.date,
                start_date: query.start_date,
                end_date: query.end_date,
                query: query.query,
            },
            page_request(query.page, query.limit),
        )
        .await
    {
        Ok(page) => Json(page).into_response(),
        Err(e) => error_response(&AppError::from(e)),
    }
}
