//! Manual journal entry route.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::NaiveDate;
use kassa_core::ledger::JournalLineInput;
use kassa_db::repositories::journal::{CreateJournalInput, JournalRepository};
use kassa_shared::error::AppError;
use serde::Deserialize;
use uuid::Uuid;

use crate::AppState;
use crate::routes::error_response;

/// Creates the journal entry routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/journal-entry", post(create_journal_entry))
}

/// Request body for posting a manual journal entry.
#[derive(Debug, Deserialize)]
pub struct CreateJournalRequest {
    /// Business date of the entry.
    pub date: NaiveDate,
    /// Free-text narration.
    pub narration: Option<String>,
    /// Posting user.
    pub created_by: Option<Uuid>,
    /// Debit/credit lines.
    pub entries: Vec<JournalLineInput>,
}

async fn create_journal_entry(
    State(state): State<AppState>,
    Json(body): Json<CreateJournalRequest>,
) -> Response {
    let repo = JournalRepository::new((*state.db).clone());

    match repo
        .post_journal(CreateJournalInput {
            date: body.date,
            narration: body.narration,
            reference_type: None,
            reference_id: None,
            created_by: body.created_by,
            lines: body.entries,
        })
        .await
    {
        Ok(posted) => (StatusCode::CREATED, Json(posted)).into_response(),
        Err(e) => error_response(&AppError::from(e)),
    }
}
