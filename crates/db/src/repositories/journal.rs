//! Journal repository: the sole write path into `journals` and
//! `journal_lines`.
//!
//! Every journal is validated (shape, account existence, balance) before a
//! single row is written, and the header plus all lines are inserted in one
//! database transaction. Committed journals are immutable: no update or
//! delete methods exist.

use chrono::NaiveDate;
use kassa_core::ledger::{
    JournalLineInput, JournalValidationError, validation::normalize_amount, validate_balanced,
    validate_line_shape,
};
use kassa_shared::error::AppError;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{accounts, journal_lines, journals};

/// Error types for journal operations.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    /// A journal validation rule was violated.
    #[error(transparent)]
    Validation(#[from] JournalValidationError),

    /// A line references an account that does not exist.
    #[error("unknown account: {0}")]
    UnknownAccount(Uuid),

    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl From<JournalError> for AppError {
    fn from(err: JournalError) -> Self {
        match err {
            JournalError::Validation(e) => Self::BusinessRule(e.to_string()),
            JournalError::UnknownAccount(_) => Self::NotFound(err.to_string()),
            JournalError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for posting a journal.
#[derive(Debug, Clone)]
pub struct CreateJournalInput {
    /// Business date of the entry.
    pub date: NaiveDate,
    /// Free-text narration.
    pub narration: Option<String>,
    /// Source module of the entry (e.g. a transaction), if any.
    pub reference_type: Option<String>,
    /// ID of the source record, if any.
    pub reference_id: Option<Uuid>,
    /// Posting user, if the caller tracks identity.
    pub created_by: Option<Uuid>,
    /// The debit/credit lines.
    pub lines: Vec<JournalLineInput>,
}

/// A committed journal with its lines.
#[derive(Debug, Clone, serde::Serialize)]
pub struct JournalWithLines {
    /// The journal header.
    pub journal: journals::Model,
    /// The journal lines, in insertion order.
    pub lines: Vec<journal_lines::Model>,
}

/// Journal repository.
#[derive(Debug, Clone)]
pub struct JournalRepository {
    db: DatabaseConnection,
}

impl JournalRepository {
    /// Creates a new journal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Validates and posts a journal atomically.
    ///
    /// Validation runs in a fixed order before any write: empty journal,
    /// per-line shape, account existence, balance.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or the database write fails.
    pub async fn post_journal(
        &self,
        input: CreateJournalInput,
    ) -> Result<JournalWithLines, JournalError> {
        let txn = self.db.begin().await?;
        let posted = Self::post_within(&txn, input).await?;
        txn.commit().await?;
        Ok(posted)
    }

    /// Posts a journal inside an already-open database transaction.
    ///
    /// This is the write chokepoint: the transaction translator uses it to
    /// commit a journal and its business transaction row together.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or the database write fails.
    pub async fn post_within(
        txn: &DatabaseTransaction,
        input: CreateJournalInput,
    ) -> Result<JournalWithLines, JournalError> {
        validate_line_shape(&input.lines)?;
        Self::check_accounts_exist(txn, &input.lines).await?;
        validate_balanced(&input.lines)?;

        let now = chrono::Utc::now().into();
        let journal = journals::ActiveModel {
            id: Set(Uuid::new_v4()),
            date: Set(input.date),
            narration: Set(input.narration),
            reference_type: Set(input.reference_type),
            reference_id: Set(input.reference_id),
            created_by: Set(input.created_by),
            created_at: Set(now),
        };
        let journal = journal.insert(txn).await?;

        let mut lines = Vec::with_capacity(input.lines.len());
        for line in &input.lines {
            let row = journal_lines::ActiveModel {
                id: Set(Uuid::new_v4()),
                journal_id: Set(journal.id),
                account_id: Set(line.account_id),
                debit: Set(normalize_amount(line.debit)),
                credit: Set(normalize_amount(line.credit)),
            };
            lines.push(row.insert(txn).await?);
        }

        tracing::debug!(journal_id = %journal.id, lines = lines.len(), "posted journal");

        Ok(JournalWithLines { journal, lines })
    }

    /// Verifies every referenced account exists, reporting the first
    /// missing one.
    async fn check_accounts_exist<C: ConnectionTrait>(
        conn: &C,
        lines: &[JournalLineInput],
    ) -> Result<(), JournalError> {
        for line in lines {
            let found = accounts::Entity::find_by_id(line.account_id)
                .one(conn)
                .await?;
            if found.is_none() {
                return Err(JournalError::UnknownAccount(line.account_id));
            }
        }
        Ok(())
    }
}
