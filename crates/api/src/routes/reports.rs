//! Report routes: ledger, trial balance, profit & loss, overview and the
//! journal report.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::NaiveDate;
use kassa_core::ledger::AccountType;
use kassa_core::reports::{
    LedgerReport, OverviewBucket, OverviewReport, ProfitAndLossReport, TrialBalanceReport,
    TrialBalanceStatus,
};
use kassa_db::repositories::report::{JournalReportEntry, ReportRepository};
use kassa_shared::error::AppError;
use kassa_shared::types::PageResponse;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AppState;
use crate::routes::{error_response, money, page_request};

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports/ledger/{account_id}", get(get_ledger))
        .route("/reports/trial-balance", get(get_trial_balance))
        .route("/reports/profit-and-loss", get(get_profit_and_loss))
        .route("/reports/journal", get(get_journal_report))
        .route("/overview", get(get_overview))
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Date-window query parameters.
#[derive(Debug, Deserialize)]
pub struct DateRangeQuery {
    /// Start date (inclusive).
    pub from: Option<NaiveDate>,
    /// End date (inclusive).
    pub to: Option<NaiveDate>,
}

/// Query parameters for the trial balance.
#[derive(Debug, Deserialize)]
pub struct TrialBalanceQuery {
    /// As-of date (defaults to all time).
    pub date: Option<NaiveDate>,
}

/// Query parameters for the journal report.
#[derive(Debug, Deserialize)]
pub struct JournalReportQuery {
    /// Start date (inclusive).
    pub from: Option<NaiveDate>,
    /// End date (inclusive).
    pub to: Option<NaiveDate>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page.
    pub limit: Option<u32>,
}

// ============================================================================
// Response Types
// ============================================================================

/// Ledger report response.
#[derive(Debug, Serialize)]
pub struct LedgerResponse {
    /// Balance before the window.
    pub opening_balance: String,
    /// Balance after the window.
    pub closing_balance: String,
    /// Dated rows with running balances.
    pub transactions: Vec<LedgerRowResponse>,
}

/// One ledger row.
#[derive(Debug, Serialize)]
pub struct LedgerRowResponse {
    /// Journal date.
    pub date: NaiveDate,
    /// Journal narration.
    pub narration: Option<String>,
    /// Debit amount.
    pub debit: String,
    /// Credit amount.
    pub credit: String,
    /// Running balance after this row.
    pub balance: String,
}

impl From<LedgerReport> for LedgerResponse {
    fn from(report: LedgerReport) -> Self {
        Self {
            opening_balance: money(report.opening_balance),
            closing_balance: money(report.closing_balance),
            transactions: report
                .transactions
                .into_iter()
                .map(|row| LedgerRowResponse {
                    date: row.date,
                    narration: row.narration,
                    debit: money(row.debit),
                    credit: money(row.credit),
                    balance: money(row.balance),
                })
                .collect(),
        }
    }
}

/// Trial balance response.
#[derive(Debug, Serialize)]
pub struct TrialBalanceResponse {
    /// As-of date, if one was requested.
    pub as_of: Option<NaiveDate>,
    /// Per-account gross columns.
    pub accounts: Vec<TrialBalanceRowResponse>,
    /// Grand total of debits.
    pub total_debit: String,
    /// Grand total of credits.
    pub total_credit: String,
    /// BALANCED or UNBALANCED.
    pub status: TrialBalanceStatus,
}

/// One trial balance row.
#[derive(Debug, Serialize)]
pub struct TrialBalanceRowResponse {
    /// Account ID.
    pub account_id: Uuid,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Gross debit total.
    pub debit: String,
    /// Gross credit total.
    pub credit: String,
}

impl From<TrialBalanceReport> for TrialBalanceResponse {
    fn from(report: TrialBalanceReport) -> Self {
        Self {
            as_of: report.as_of,
            accounts: report
                .accounts
                .into_iter()
                .map(|row| TrialBalanceRowResponse {
                    account_id: row.account_id,
                    code: row.code,
                    name: row.name,
                    account_type: row.account_type,
                    debit: money(row.debit),
                    credit: money(row.credit),
                })
                .collect(),
            total_debit: money(report.total_debit),
            total_credit: money(report.total_credit),
            status: report.status,
        }
    }
}

/// Profit & loss response.
#[derive(Debug, Serialize)]
pub struct ProfitAndLossResponse {
    /// Income heads with activity.
    pub income: Vec<ProfitAndLossLineResponse>,
    /// Expense heads with activity.
    pub expense: Vec<ProfitAndLossLineResponse>,
    /// Total income.
    pub total_income: String,
    /// Total expense.
    pub total_expense: String,
    /// Income minus expense.
    pub net_profit: String,
}

/// One P&L line.
#[derive(Debug, Serialize)]
pub struct ProfitAndLossLineResponse {
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Normalized balance.
    pub amount: String,
}

impl From<ProfitAndLossReport> for ProfitAndLossResponse {
    fn from(report: ProfitAndLossReport) -> Self {
        let line = |l: kassa_core::reports::ProfitAndLossLine| ProfitAndLossLineResponse {
            code: l.code,
            name: l.name,
            amount: money(l.amount),
        };
        Self {
            income: report.income.into_iter().map(line).collect(),
            expense: report.expense.into_iter().map(line).collect(),
            total_income: money(report.total_income),
            total_expense: money(report.total_expense),
            net_profit: money(report.net_profit),
        }
    }
}

/// Overview response.
#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    /// Today's bucket.
    pub today: OverviewBucketResponse,
    /// This week (Monday through today).
    pub this_week: OverviewBucketResponse,
    /// This month.
    pub this_month: OverviewBucketResponse,
    /// This year.
    pub this_year: OverviewBucketResponse,
}

/// One overview bucket.
#[derive(Debug, Serialize)]
pub struct OverviewBucketResponse {
    /// Total income in the window.
    pub income: String,
    /// Total expense in the window.
    pub expense: String,
    /// Income minus expense.
    pub net: String,
}

impl From<OverviewBucket> for OverviewBucketResponse {
    fn from(bucket: OverviewBucket) -> Self {
        Self {
            income: money(bucket.income),
            expense: money(bucket.expense),
            net: money(bucket.net),
        }
    }
}

impl From<OverviewReport> for OverviewResponse {
    fn from(report: OverviewReport) -> Self {
        Self {
            today: report.today.into(),
            this_week: report.this_week.into(),
            this_month: report.this_month.into(),
            this_year: report.this_year.into(),
        }
    }
}

/// One journal of the journal report.
#[derive(Debug, Serialize)]
pub struct JournalEntryResponse {
    /// Journal ID.
    pub id: Uuid,
    /// Business date.
    pub date: NaiveDate,
    /// Narration.
    pub narration: Option<String>,
    /// Source module, if the journal came from a transaction.
    pub reference_type: Option<String>,
    /// Source record ID.
    pub reference_id: Option<Uuid>,
    /// The lines.
    pub lines: Vec<JournalLineResponse>,
}

/// One line of a journal-report entry.
#[derive(Debug, Serialize)]
pub struct JournalLineResponse {
    /// Account ID.
    pub account_id: Uuid,
    /// Account code.
    pub account_code: String,
    /// Account name.
    pub account_name: String,
    /// Debit amount.
    pub debit: String,
    /// Credit amount.
    pub credit: String,
}

impl From<JournalReportEntry> for JournalEntryResponse {
    fn from(entry: JournalReportEntry) -> Self {
        Self {
            id: entry.journal.id,
            date: entry.journal.date,
            narration: entry.journal.narration,
            reference_type: entry.journal.reference_type,
            reference_id: entry.journal.reference_id,
            lines: entry
                .lines
                .into_iter()
                .map(|l| JournalLineResponse {
                    account_id: l.account_id,
                    account_code: l.account_code,
                    account_name: l.account_name,
                    debit: money(l.debit),
                    credit: money(l.credit),
                })
                .collect(),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

async fn get_ledger(
    State(state): State<AppState>,
    Path(account_id): Path<Uuid>,
    Query(query): Query<DateRangeQuery>,
) -> Response {
    let repo = ReportRepository::new((*state.db).clone());

    match repo.get_ledger(account_id, query.from, query.to).await {
        Ok(report) => Json(LedgerResponse::from(report)).into_response(),
        Err(e) => error_response(&AppError::from(e)),
    }
}

async fn get_trial_balance(
    State(state): State<AppState>,
    Query(query): Query<TrialBalanceQuery>,
) -> Response {
    let repo = ReportRepository::new((*state.db).clone());

    match repo.get_trial_balance(query.date).await {
        Ok(report) => Json(TrialBalanceResponse::from(report)).into_response(),
        Err(e) => error_response(&AppError::from(e)),
    }
}

async fn get_profit_and_loss(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> Response {
    let repo = ReportRepository::new((*state.db).clone());

    match repo.get_profit_and_loss(query.from, query.to).await {
        Ok(report) => Json(ProfitAndLossResponse::from(report)).into_response(),
        Err(e) => error_response(&AppError::from(e)),
    }
}

async fn get_overview(State(state): State<AppState>) -> Response {
    let repo = ReportRepository::new((*state.db).clone());
    let today = chrono::Utc::now().date_naive();

    match repo.get_overview(today).await {
        Ok(report) => Json(OverviewResponse::from(report)).into_response(),
        Err(e) => error_response(&AppError::from(e)),
    }
}

async fn get_journal_report(
    State(state): State<AppState>,
    Query(query): Query<JournalReportQuery>,
) -> Response {
    let repo = ReportRepository::new((*state.db).clone());

    match repo
        .get_journal_report(query.from, query.to, page_request(query.page, query.limit))
        .await
    {
        Ok(page) => {
            let data = page.data.into_iter().map(JournalEntryResponse::from).collect();
            Json(PageResponse {
                data,
                meta: page.meta,
            })
            .into_response()
        }
        Err(e) => error_response(&AppError::from(e)),
    }
}
