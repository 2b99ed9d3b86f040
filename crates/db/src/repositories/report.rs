//! Report repository: read-only queries behind the reporting engine.
//!
//! The repository fetches raw lines and account rows; every balance and
//! report assembly is done by the pure functions in `kassa-core`, so the
//! numbers can be tested without a database.
//!
//! Each report runs all of its reads inside one database transaction, so a
//! journal committing mid-report can never be half-counted: the numbers
//! always come from a single consistent snapshot of committed data.

use chrono::NaiveDate;
use kassa_core::reports::{
    AccountTotals, DateWindow, LedgerLine, LedgerReport, OverviewReport, ProfitAndLossReport,
    ReportService, TrialBalanceReport, balance,
};
use kassa_shared::error::AppError;
use kassa_shared::types::{PageRequest, PageResponse};
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult,
    JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
    TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{accounts, journal_lines, journals};

/// Error types for report queries.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The requested account does not exist.
    #[error("account not found: {0}")]
    AccountNotFound(Uuid),

    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::AccountNotFound(_) => Self::NotFound(err.to_string()),
            ReportError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// One journal of the journal report, lines resolved to account code/name.
#[derive(Debug, Clone, serde::Serialize)]
pub struct JournalReportEntry {
    /// The journal header.
    pub journal: journals::Model,
    /// The journal lines with their accounts.
    pub lines: Vec<JournalReportLine>,
}

/// One line of a journal-report entry.
#[derive(Debug, Clone, serde::Serialize)]
pub struct JournalReportLine {
    /// Account ID.
    pub account_id: Uuid,
    /// Account code.
    pub account_code: String,
    /// Account name.
    pub account_name: String,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
}

/// A journal line joined with its journal header.
#[derive(Debug, FromQueryResult)]
struct JoinedLine {
    date: NaiveDate,
    narration: Option<String>,
    debit: Decimal,
    credit: Decimal,
}

/// Debit/credit amounts of one line.
#[derive(Debug, FromQueryResult)]
struct LineAmounts {
    debit: Decimal,
    credit: Decimal,
}

/// Report repository. Holds no write methods.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Builds the ledger report for one account.
    ///
    /// The opening balance is the signed sum of all lines strictly before
    /// `from`; rows inside the window carry a running balance. An empty
    /// window closes at the opening balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the account does not exist or the query fails.
    pub async fn get_ledger(
        &self,
        account_id: Uuid,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<LedgerReport, ReportError> {
        let txn = self.db.begin().await?;

        let account = accounts::Entity::find_by_id(account_id)
            .one(&txn)
            .await?
            .ok_or(ReportError::AccountNotFound(account_id))?;
        let account_type = account.account_type.into();

        let opening = if let Some(from) = from {
            let prior = Self::account_lines(&txn, account_id, None, None, Some(from)).await?;
            balance::opening_balance(account_type, &prior)
        } else {
            Decimal::ZERO
        };

        let window = Self::account_lines(&txn, account_id, from, to, None).await?;
        txn.commit().await?;

        let (rows, closing) = balance::run_ledger(account_type, opening, window);

        Ok(LedgerReport {
            opening_balance: opening,
            closing_balance: closing,
            transactions: rows,
        })
    }

    /// Builds the trial balance as of a date (or over all time).
    ///
    /// Per-account columns are gross debit/credit totals, never netted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_trial_balance(
        &self,
        as_of: Option<NaiveDate>,
    ) -> Result<TrialBalanceReport, ReportError> {
        let txn = self.db.begin().await?;

        let all = accounts::Entity::find()
            .order_by_asc(accounts::Column::Code)
            .all(&txn)
            .await?;

        let mut totals = Vec::with_capacity(all.len());
        for account in all {
            totals.push(Self::account_totals(&txn, &account, None, as_of).await?);
        }
        txn.commit().await?;

        Ok(ReportService::trial_balance(as_of, totals))
    }

    /// Builds the profit & loss report over a window.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_profit_and_loss(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<ProfitAndLossReport, ReportError> {
        let txn = self.db.begin().await?;
        let report = Self::profit_and_loss_within(&txn, from, to).await?;
        txn.commit().await?;
        Ok(report)
    }

    /// Builds the overview: P&L buckets for today, this week, this month
    /// and this year, relative to the given date. All four buckets read
    /// from the same snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_overview(&self, today: NaiveDate) -> Result<OverviewReport, ReportError> {
        let txn = self.db.begin().await?;
        let report = OverviewReport {
            today: Self::window_bucket(&txn, DateWindow::today(today)).await?,
            this_week: Self::window_bucket(&txn, DateWindow::this_week(today)).await?,
            this_month: Self::window_bucket(&txn, DateWindow::this_month(today)).await?,
            this_year: Self::window_bucket(&txn, DateWindow::this_year(today)).await?,
        };
        txn.commit().await?;
        Ok(report)
    }

    /// P&L bucket for one overview window.
    async fn window_bucket<C: ConnectionTrait>(
        conn: &C,
        window: DateWindow,
    ) -> Result<kassa_core::reports::OverviewBucket, ReportError> {
        let report =
            Self::profit_and_loss_within(conn, Some(window.from), Some(window.to)).await?;
        Ok(ReportService::overview_bucket(&report))
    }

    /// P&L totals gathered over the given connection.
    async fn profit_and_loss_within<C: ConnectionTrait>(
        conn: &C,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<ProfitAndLossReport, ReportError> {
        use crate::entities::sea_orm_active_enums::AccountType;

        let heads = accounts::Entity::find()
            .filter(
                accounts::Column::AccountType
                    .is_in([AccountType::Income, AccountType::Expense]),
            )
            .order_by_asc(accounts::Column::Code)
            .all(conn)
            .await?;

        let mut totals = Vec::with_capacity(heads.len());
        for account in heads {
            totals.push(Self::account_totals(conn, &account, from, to).await?);
        }

        Ok(ReportService::profit_and_loss(totals))
    }

    /// Lists journals newest-first with their lines resolved to accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_journal_report(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        page: PageRequest,
    ) -> Result<PageResponse<JournalReportEntry>, ReportError> {
        let mut query = journals::Entity::find()
            .order_by_desc(journals::Column::Date)
            .order_by_desc(journals::Column::CreatedAt);

        if let Some(from) = from {
            query = query.filter(journals::Column::Date.gte(from));
        }
        if let Some(to) = to {
            query = query.filter(journals::Column::Date.lte(to));
        }

        let txn = self.db.begin().await?;

        let total = query.clone().count(&txn).await?;
        let page_rows = query
            .offset(page.offset())
            .limit(page.limit())
            .all(&txn)
            .await?;

        // Resolve account code/name once for the whole page.
        let account_index: std::collections::HashMap<Uuid, (String, String)> =
            accounts::Entity::find()
                .all(&txn)
                .await?
                .into_iter()
                .map(|a| (a.id, (a.code, a.name)))
                .collect();

        let mut entries = Vec::with_capacity(page_rows.len());
        for journal in page_rows {
            let lines = journal_lines::Entity::find()
                .filter(journal_lines::Column::JournalId.eq(journal.id))
                .all(&txn)
                .await?;

            let lines = lines
                .into_iter()
                .map(|l| {
                    let (code, name) = account_index
                        .get(&l.account_id)
                        .cloned()
                        .unwrap_or_default();
                    JournalReportLine {
                        account_id: l.account_id,
                        account_code: code,
                        account_name: name,
                        debit: l.debit,
                        credit: l.credit,
                    }
                })
                .collect();

            entries.push(JournalReportEntry { journal, lines });
        }
        txn.commit().await?;

        Ok(PageResponse::new(entries, page.page, page.limit, total))
    }

    /// Fetches one account's lines joined with journal date/narration,
    /// ordered for the ledger walk (date asc, insertion order as
    /// tie-break).
    async fn account_lines<C: ConnectionTrait>(
        conn: &C,
        account_id: Uuid,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        before: Option<NaiveDate>,
    ) -> Result<Vec<LedgerLine>, ReportError> {
        let mut query = journal_lines::Entity::find()
            .filter(journal_lines::Column::AccountId.eq(account_id))
            .join(JoinType::InnerJoin, journal_lines::Relation::Journals.def())
            .select_only()
            .column(journals::Column::Date)
            .column(journals::Column::Narration)
            .column(journal_lines::Column::Debit)
            .column(journal_lines::Column::Credit)
            .order_by_asc(journals::Column::Date)
            .order_by_asc(journals::Column::CreatedAt);

        if let Some(from) = from {
            query = query.filter(journals::Column::Date.gte(from));
        }
        if let Some(to) = to {
            query = query.filter(journals::Column::Date.lte(to));
        }
        if let Some(before) = before {
            query = query.filter(journals::Column::Date.lt(before));
        }

        let rows = query.into_model::<JoinedLine>().all(conn).await?;

        Ok(rows
            .into_iter()
            .map(|r| LedgerLine {
                date: r.date,
                narration: r.narration,
                debit: r.debit,
                credit: r.credit,
            })
            .collect())
    }

    /// Sums one account's gross debit/credit totals over a window.
    async fn account_totals<C: ConnectionTrait>(
        conn: &C,
        account: &accounts::Model,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<AccountTotals, ReportError> {
        let mut query = journal_lines::Entity::find()
            .filter(journal_lines::Column::AccountId.eq(account.id))
            .join(JoinType::InnerJoin, journal_lines::Relation::Journals.def())
            .select_only()
            .column(journal_lines::Column::Debit)
            .column(journal_lines::Column::Credit);

        if let Some(from) = from {
            query = query.filter(journals::Column::Date.gte(from));
        }
        if let Some(to) = to {
            query = query.filter(journals::Column::Date.lte(to));
        }

        let rows = query.into_model::<LineAmounts>().all(conn).await?;

        let mut total_debit = Decimal::ZERO;
        let mut total_credit = Decimal::ZERO;
        for row in &rows {
            total_debit += row.debit;
            total_credit += row.credit;
        }

        Ok(AccountTotals {
            account_id: account.id,
            code: account.code.clone(),
            name: account.name.clone(),
            account_type: account.account_type.into(),
            total_debit,
            total_credit,
        })
    }
}
