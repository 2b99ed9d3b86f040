//! Transaction repository: translates one-sided business events into
//! balanced journals.
//!
//! A business transaction never writes ledger rows itself. It resolves its
//! debit/credit account pair, hands the two-line journal to the journal
//! engine, and stores the transaction row pointing at the committed
//! journal, all inside a single database transaction.

use chrono::NaiveDate;
use kassa_core::ledger::{
    BusinessType, JournalLineInput, PaymentMode as CorePaymentMode, account_pair,
    head_wise_settlement, validation::normalize_amount,
};
use kassa_shared::error::AppError;
use kassa_shared::types::{PageRequest, PageResponse};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{accounts, sea_orm_active_enums::PaymentMode, transactions};
use crate::repositories::account::find_by_code;
use crate::repositories::journal::{CreateJournalInput, JournalError, JournalRepository};

/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// The amount must be strictly positive.
    #[error("amount must be positive, got {0}")]
    InvalidAmount(Decimal),

    /// The mapping table resolved to a code missing from the chart.
    #[error("no account with code '{0}' in the chart of accounts")]
    UnresolvedAccountMapping(String),

    /// Head-wise posting against an account of the wrong type.
    #[error("account '{code}' is not an {expected} head")]
    WrongHeadType {
        /// Code of the offending account.
        code: String,
        /// The required account type.
        expected: &'static str,
    },

    /// The head account does not exist.
    #[error("head account not found: {0}")]
    HeadNotFound(Uuid),

    /// Head-wise entries record immediate settlement and cannot be on credit.
    #[error("head-wise entries must be settled in cash or bank")]
    CreditNotSettleable,

    /// The journal engine rejected the generated journal.
    #[error(transparent)]
    Journal(#[from] JournalError),

    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl From<TransactionError> for AppError {
    fn from(err: TransactionError) -> Self {
        match err {
            TransactionError::InvalidAmount(_)
            | TransactionError::UnresolvedAccountMapping(_) => {
                Self::BusinessRule(err.to_string())
            }
            TransactionError::WrongHeadType { .. } | TransactionError::CreditNotSettleable => {
                Self::Validation(err.to_string())
            }
            TransactionError::HeadNotFound(_) => Self::NotFound(err.to_string()),
            TransactionError::Journal(e) => e.into(),
            TransactionError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for posting a business transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// Business event category.
    pub txn_type: BusinessType,
    /// Transaction amount (strictly positive).
    pub amount: Decimal,
    /// How the transaction was settled.
    pub payment_mode: CorePaymentMode,
    /// Business date.
    pub date: NaiveDate,
    /// Free-text description.
    pub description: Option<String>,
    /// Posting user, if the caller tracks identity.
    pub created_by: Option<Uuid>,
}

/// Input for head-wise income/expense postings, where the caller picks the
/// income or expense head directly.
#[derive(Debug, Clone)]
pub struct HeadWiseInput {
    /// The income or expense head account.
    pub head_id: Uuid,
    /// Transaction amount (strictly positive).
    pub amount: Decimal,
    /// Cash or bank settlement (credit is not settleable head-wise).
    pub payment_mode: CorePaymentMode,
    /// Business date.
    pub date: NaiveDate,
    /// Free-text description.
    pub description: Option<String>,
    /// Posting user, if the caller tracks identity.
    pub created_by: Option<Uuid>,
}

/// Filter options for listing transactions.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Filter by business type.
    pub txn_type: Option<BusinessType>,
    /// Exact-date filter.
    pub date: Option<NaiveDate>,
    /// Range start (inclusive).
    pub start_date: Option<NaiveDate>,
    /// Range end (inclusive).
    pub end_date: Option<NaiveDate>,
    /// Free-text search over the description.
    pub query: Option<String>,
}

/// Transaction repository.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Posts a business transaction.
    ///
    /// Resolves the debit/credit account pair from the mapping table,
    /// builds the balanced two-line journal and commits journal plus
    /// transaction row atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The amount is not strictly positive
    /// - A mapped account code is missing from the chart
    /// - The journal engine rejects the generated journal
    pub async fn post_transaction(
        &self,
        input: CreateTransactionInput,
    ) -> Result<transactions::Model, TransactionError> {
        let amount = normalize_amount(input.amount);
        if amount <= Decimal::ZERO {
            return Err(TransactionError::InvalidAmount(input.amount));
        }

        let pair = account_pair(input.txn_type, input.payment_mode);

        let txn = self.db.begin().await?;

        let debit_account = Self::resolve_code(&txn, pair.debit_code).await?;
        let credit_account = Self::resolve_code(&txn, pair.credit_code).await?;

        let record = Self::insert_with_journal(
            &txn,
            input.txn_type,
            amount,
            input.payment_mode,
            input.date,
            input.description,
            input.created_by,
            debit_account.id,
            credit_account.id,
        )
        .await?;

        txn.commit().await?;
        Ok(record)
    }

    /// Posts income against a caller-chosen income head.
    ///
    /// # Errors
    ///
    /// Returns an error if the head is missing or not an income account,
    /// the payment mode is `DUE`, or posting fails.
    pub async fn create_head_wise_income(
        &self,
        input: HeadWiseInput,
    ) -> Result<transactions::Model, TransactionError> {
        self.post_head_wise(input, BusinessType::Income).await
    }

    /// Posts an expense against a caller-chosen expense head.
    ///
    /// # Errors
    ///
    /// Returns an error if the head is missing or not an expense account,
    /// the payment mode is `DUE`, or posting fails.
    pub async fn create_head_wise_expense(
        &self,
        input: HeadWiseInput,
    ) -> Result<transactions::Model, TransactionError> {
        self.post_head_wise(input, BusinessType::Expense).await
    }

    /// Lists transactions newest-first with filters and pagination.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_transactions(
        &self,
        filter: TransactionFilter,
        page: PageRequest,
    ) -> Result<PageResponse<transactions::Model>, TransactionError> {
        let mut query = transactions::Entity::find()
            .order_by_desc(transactions::Column::Date)
            .order_by_desc(transactions::Column::CreatedAt);

        if let Some(txn_type) = filter.txn_type {
            query = query.filter(transactions::Column::TxnType.eq(txn_type.as_str()));
        }
        if let Some(date) = filter.date {
            query = query.filter(transactions::Column::Date.eq(date));
        }
        if let Some(start) = filter.start_date {
            query = query.filter(transactions::Column::Date.gte(start));
        }
        if let Some(end) = filter.end_date {
            query = query.filter(transactions::Column::Date.lte(end));
        }
        if let Some(term) = &filter.query {
            query = query.filter(transactions::Column::Description.contains(term));
        }

        let total = query.clone().count(&self.db).await?;
        let data = query
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok(PageResponse::new(data, page.page, page.limit, total))
    }

    async fn post_head_wise(
        &self,
        input: HeadWiseInput,
        txn_type: BusinessType,
    ) -> Result<transactions::Model, TransactionError> {
        let amount = normalize_amount(input.amount);
        if amount <= Decimal::ZERO {
            return Err(TransactionError::InvalidAmount(input.amount));
        }

        let settlement_code = head_wise_settlement(input.payment_mode)
            .ok_or(TransactionError::CreditNotSettleable)?;

        let txn = self.db.begin().await?;

        let head = accounts::Entity::find_by_id(input.head_id)
            .one(&txn)
            .await?
            .ok_or(TransactionError::HeadNotFound(input.head_id))?;

        let expected = match txn_type {
            BusinessType::Income => crate::entities::sea_orm_active_enums::AccountType::Income,
            _ => crate::entities::sea_orm_active_enums::AccountType::Expense,
        };
        if head.account_type != expected {
            return Err(TransactionError::WrongHeadType {
                code: head.code,
                expected: match txn_type {
                    BusinessType::Income => "income",
                    _ => "expense",
                },
            });
        }

        let settlement = Self::resolve_code(&txn, settlement_code).await?;

        // Income: money in, debit cash/bank, credit the head.
        // Expense: money out, debit the head, credit cash/bank.
        let (debit_id, credit_id) = match txn_type {
            BusinessType::Income => (settlement.id, head.id),
            _ => (head.id, settlement.id),
        };

        let record = Self::insert_with_journal(
            &txn,
            txn_type,
            amount,
            input.payment_mode,
            input.date,
            input.description,
            input.created_by,
            debit_id,
            credit_id,
        )
        .await?;

        txn.commit().await?;
        Ok(record)
    }

    /// Inserts the journal (via the journal engine) and the transaction row
    /// inside the caller's open database transaction.
    #[allow(clippy::too_many_arguments)]
    async fn insert_with_journal(
        txn: &DatabaseTransaction,
        txn_type: BusinessType,
        amount: Decimal,
        payment_mode: CorePaymentMode,
        date: NaiveDate,
        description: Option<String>,
        created_by: Option<Uuid>,
        debit_account_id: Uuid,
        credit_account_id: Uuid,
    ) -> Result<transactions::Model, TransactionError> {
        let transaction_id = Uuid::new_v4();

        let journal = JournalRepository::post_within(
            txn,
            CreateJournalInput {
                date,
                narration: description.clone(),
                reference_type: Some("transaction".to_owned()),
                reference_id: Some(transaction_id),
                created_by,
                lines: vec![
                    JournalLineInput {
                        account_id: debit_account_id,
                        debit: amount,
                        credit: Decimal::ZERO,
                    },
                    JournalLineInput {
                        account_id: credit_account_id,
                        debit: Decimal::ZERO,
                        credit: amount,
                    },
                ],
            },
        )
        .await?;

        let now = chrono::Utc::now().into();
        let record = transactions::ActiveModel {
            id: Set(transaction_id),
            txn_type: Set(txn_type.as_str().to_owned()),
            amount: Set(amount),
            payment_mode: Set(PaymentMode::from(payment_mode)),
            date: Set(date),
            description: Set(description),
            journal_id: Set(journal.journal.id),
            created_by: Set(created_by),
            created_at: Set(now),
        };
        let record = record.insert(txn).await?;

        tracing::debug!(
            transaction_id = %record.id,
            txn_type = record.txn_type,
            "posted business transaction"
        );

        Ok(record)
    }

    /// Looks up a chart account by mapped code, converting absence into the
    /// unresolved-mapping error.
    async fn resolve_code(
        txn: &DatabaseTransaction,
        code: &str,
    ) -> Result<accounts::Model, TransactionError> {
        find_by_code(txn, code)
            .await?
            .ok_or_else(|| TransactionError::UnresolvedAccountMapping(code.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_invalid_amount_maps_to_unprocessable() {
        let err: AppError = TransactionError::InvalidAmount(dec!(-5)).into();
        assert_eq!(err.status_code(), 422);
    }

    #[test]
    fn test_unresolved_mapping_maps_to_unprocessable() {
        let err: AppError = TransactionError::UnresolvedAccountMapping("1000".into()).into();
        assert_eq!(err.status_code(), 422);
        assert_eq!(err.error_code(), "BUSINESS_RULE_VIOLATION");
    }

    #[test]
    fn test_wrong_head_type_maps_to_bad_request() {
        let err: AppError = TransactionError::WrongHeadType {
            code: "1000".into(),
            expected: "income",
        }
        .into();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_journal_errors_pass_through() {
        let inner = JournalError::Validation(
            kassa_core::ledger::JournalValidationError::EmptyJournal,
        );
        let err: AppError = TransactionError::Journal(inner).into();
        assert_eq!(err.status_code(), 422);
    }
}
