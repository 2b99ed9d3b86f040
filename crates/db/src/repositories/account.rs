//! Account repository for chart of accounts operations.

use kassa_core::ledger::{AccountType as CoreAccountType, mapping};
use kassa_shared::error::AppError;
use kassa_shared::types::{PageRequest, PageResponse};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entities::{accounts, journal_lines, sea_orm_active_enums::AccountType};

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Account code already exists.
    #[error("account code '{0}' already exists")]
    DuplicateCode(String),

    /// Parent account is missing or would form a cycle.
    #[error("invalid parent account: {0}")]
    InvalidParent(String),

    /// Account not found.
    #[error("account not found: {0}")]
    NotFound(Uuid),

    /// Account has child accounts and cannot be deleted.
    #[error("account has {0} child accounts")]
    HasChildren(u64),

    /// Account is referenced by journal lines.
    #[error("account has {0} journal lines")]
    HasJournalLines(u64),

    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::DuplicateCode(_)
            | AccountError::HasChildren(_)
            | AccountError::HasJournalLines(_) => Self::Conflict(err.to_string()),
            AccountError::InvalidParent(_) => Self::Validation(err.to_string()),
            AccountError::NotFound(_) => Self::NotFound(err.to_string()),
            AccountError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Account code (globally unique).
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: CoreAccountType,
    /// Parent account for hierarchical charts.
    pub parent_id: Option<Uuid>,
    /// Free-text description.
    pub description: Option<String>,
}

/// Input for updating an account.
///
/// The account code is deliberately absent: codes are stable identifiers
/// and are never updated.
#[derive(Debug, Clone, Default)]
pub struct UpdateAccountInput {
    /// Account name.
    pub name: Option<String>,
    /// Account type (rejected once the account has journal lines).
    pub account_type: Option<CoreAccountType>,
    /// Parent account (Some(None) detaches from the current parent).
    pub parent_id: Option<Option<Uuid>>,
    /// Free-text description.
    pub description: Option<Option<String>>,
}

/// An account annotated with its depth in the chart hierarchy.
#[derive(Debug, Clone, serde::Serialize)]
pub struct HierarchicalAccount {
    /// The account record.
    #[serde(flatten)]
    pub account: accounts::Model,
    /// Depth below the roots (roots are level 0).
    pub level: u32,
}

/// The default chart of accounts: (code, name, type).
///
/// The codes are the ones the transaction translator's mapping table
/// resolves against.
const DEFAULT_CHART: &[(&str, &str, CoreAccountType)] = &[
    (mapping::CASH, "Cash", CoreAccountType::Asset),
    (mapping::BANK, "Bank", CoreAccountType::Asset),
    (
        mapping::ACCOUNTS_RECEIVABLE,
        "Accounts Receivable",
        CoreAccountType::Asset,
    ),
    (
        mapping::ACCOUNTS_PAYABLE,
        "Accounts Payable",
        CoreAccountType::Liability,
    ),
    (mapping::OWNERS_EQUITY, "Owner's Equity", CoreAccountType::Equity),
    (mapping::SALES, "Sales", CoreAccountType::Income),
    (mapping::OTHER_INCOME, "Other Income", CoreAccountType::Income),
    (mapping::PURCHASE, "Purchase", CoreAccountType::Expense),
    (
        mapping::SALARIES,
        "Salaries & Wages",
        CoreAccountType::Expense,
    ),
    (
        mapping::PROFESSIONAL_FEES,
        "Professional Fees",
        CoreAccountType::Expense,
    ),
    (
        mapping::GENERAL_EXPENSE,
        "General Expense",
        CoreAccountType::Expense,
    ),
];

/// Finds an account by its code.
///
/// Generic over the connection so it can run inside an open database
/// transaction.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn find_by_code<C: ConnectionTrait>(
    conn: &C,
    code: &str,
) -> Result<Option<accounts::Model>, DbErr> {
    accounts::Entity::find()
        .filter(accounts::Column::Code.eq(code))
        .one(conn)
        .await
}

/// Flattens accounts into a depth-annotated sequence.
///
/// Parents always precede their children; siblings are ordered by code.
/// Accounts whose parent is not in the input (or is missing) are treated
/// as roots.
#[must_use]
pub fn flatten_hierarchy(mut accounts: Vec<accounts::Model>) -> Vec<HierarchicalAccount> {
    accounts.sort_by(|a, b| a.code.cmp(&b.code));

    let ids: std::collections::HashSet<Uuid> = accounts.iter().map(|a| a.id).collect();
    let mut result = Vec::with_capacity(accounts.len());
    let roots: Vec<accounts::Model> = accounts
        .iter()
        .filter(|a| a.parent_id.is_none_or(|p| !ids.contains(&p)))
        .cloned()
        .collect();

    for root in roots {
        push_subtree(&root, &accounts, 0, &mut result);
    }

    result
}

fn push_subtree(
    node: &accounts::Model,
    all: &[accounts::Model],
    level: u32,
    out: &mut Vec<HierarchicalAccount>,
) {
    out.push(HierarchicalAccount {
        account: node.clone(),
        level,
    });
    for child in all.iter().filter(|a| a.parent_id == Some(node.id)) {
        push_subtree(child, all, level + 1, out);
    }
}

/// Account repository for chart of accounts CRUD and seeding.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new account with validation.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The account code already exists
    /// - The parent account does not exist
    pub async fn create_account(
        &self,
        input: CreateAccountInput,
    ) -> Result<accounts::Model, AccountError> {
        let existing = find_by_code(&self.db, &input.code).await?;
        if existing.is_some() {
            return Err(AccountError::DuplicateCode(input.code));
        }

        if let Some(parent_id) = input.parent_id {
            let parent = accounts::Entity::find_by_id(parent_id).one(&self.db).await?;
            if parent.is_none() {
                return Err(AccountError::InvalidParent(format!(
                    "parent account not found: {parent_id}"
                )));
            }
        }

        let now = chrono::Utc::now().into();
        let account = accounts::ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(input.code),
            name: Set(input.name),
            account_type: Set(AccountType::from(input.account_type)),
            parent_id: Set(input.parent_id),
            description: Set(input.description),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let account = account.insert(&self.db).await?;
        Ok(account)
    }

    /// Updates an account with validation.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The account does not exist
    /// - The account type is changed while journal lines reference the account
    /// - The new parent does not exist or would form a cycle
    pub async fn update_account(
        &self,
        id: Uuid,
        input: UpdateAccountInput,
    ) -> Result<accounts::Model, AccountError> {
        let account = accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AccountError::NotFound(id))?;

        // Type changes would silently flip the sign convention of every
        // existing line, so they are rejected once the account has activity.
        if let Some(new_type) = input.account_type {
            let new_type = AccountType::from(new_type);
            if new_type != account.account_type {
                let line_count = self.count_journal_lines(id).await?;
                if line_count > 0 {
                    return Err(AccountError::HasJournalLines(line_count));
                }
            }
        }

        if let Some(Some(new_parent)) = input.parent_id {
            self.validate_parent(id, new_parent).await?;
        }

        let now = chrono::Utc::now().into();
        let mut active: accounts::ActiveModel = account.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(account_type) = input.account_type {
            active.account_type = Set(AccountType::from(account_type));
        }
        if let Some(parent_id) = input.parent_id {
            active.parent_id = Set(parent_id);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        active.updated_at = Set(now);

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Deletes an account.
    ///
    /// This is a hard delete; the referential guards (child accounts,
    /// journal lines) are checked first so the delete can never orphan
    /// ledger history.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The account does not exist
    /// - The account has child accounts
    /// - The account is referenced by journal lines
    pub async fn delete_account(&self, id: Uuid) -> Result<(), AccountError> {
        let account = accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AccountError::NotFound(id))?;

        let child_count = accounts::Entity::find()
            .filter(accounts::Column::ParentId.eq(id))
            .count(&self.db)
            .await?;
        if child_count > 0 {
            return Err(AccountError::HasChildren(child_count));
        }

        let line_count = self.count_journal_lines(id).await?;
        if line_count > 0 {
            return Err(AccountError::HasJournalLines(line_count));
        }

        account.delete(&self.db).await?;
        Ok(())
    }

    /// Finds an account by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_account_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<accounts::Model>, AccountError> {
        let account = accounts::Entity::find_by_id(id).one(&self.db).await?;
        Ok(account)
    }

    /// Lists accounts ordered by code, with optional free-text search over
    /// code and name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_accounts(
        &self,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<PageResponse<accounts::Model>, AccountError> {
        let mut query = accounts::Entity::find().order_by_asc(accounts::Column::Code);

        if let Some(term) = search {
            query = query.filter(
                Condition::any()
                    .add(accounts::Column::Code.contains(term))
                    .add(accounts::Column::Name.contains(term)),
            );
        }

        let total = query.clone().count(&self.db).await?;
        let data = query
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok(PageResponse::new(data, page.page, page.limit, total))
    }

    /// Lists the full chart as a flattened hierarchy, parents before
    /// children, each entry annotated with its depth.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_hierarchical(
        &self,
        search: Option<&str>,
    ) -> Result<Vec<HierarchicalAccount>, AccountError> {
        let all = accounts::Entity::find()
            .order_by_asc(accounts::Column::Code)
            .all(&self.db)
            .await?;

        let mut rows = flatten_hierarchy(all);

        if let Some(term) = search {
            let term = term.to_lowercase();
            rows.retain(|r| {
                r.account.code.to_lowercase().contains(&term)
                    || r.account.name.to_lowercase().contains(&term)
            });
        }

        Ok(rows)
    }

    /// Lists accounts of one type, ordered by code.
    ///
    /// Used for the income/expense head listings.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_type(
        &self,
        account_type: CoreAccountType,
    ) -> Result<Vec<accounts::Model>, AccountError> {
        let rows = accounts::Entity::find()
            .filter(accounts::Column::AccountType.eq(AccountType::from(account_type)))
            .order_by_asc(accounts::Column::Code)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Seeds the default chart of accounts.
    ///
    /// Only codes not already present are inserted; re-running is safe and
    /// leaves existing accounts untouched. Returns the newly created
    /// accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn seed_default_accounts(&self) -> Result<Vec<accounts::Model>, AccountError> {
        let mut created = Vec::new();

        for &(code, name, account_type) in DEFAULT_CHART {
            if find_by_code(&self.db, code).await?.is_some() {
                continue;
            }

            let now = chrono::Utc::now().into();
            let account = accounts::ActiveModel {
                id: Set(Uuid::new_v4()),
                code: Set(code.to_owned()),
                name: Set(name.to_owned()),
                account_type: Set(AccountType::from(account_type)),
                parent_id: Set(None),
                description: Set(None),
                created_at: Set(now),
                updated_at: Set(now),
            };

            created.push(account.insert(&self.db).await?);
        }

        if !created.is_empty() {
            tracing::info!(count = created.len(), "seeded default chart of accounts");
        }

        Ok(created)
    }

    /// Validates a new parent: it must exist and must not be the account
    /// itself or one of its descendants.
    async fn validate_parent(&self, id: Uuid, new_parent: Uuid) -> Result<(), AccountError> {
        if new_parent == id {
            return Err(AccountError::InvalidParent(
                "account cannot be its own parent".to_owned(),
            ));
        }

        // Walk up from the proposed parent; reaching `id` means the parent
        // is a descendant and the link would close a cycle.
        let mut cursor = Some(new_parent);
        while let Some(current) = cursor {
            let account = accounts::Entity::find_by_id(current)
                .one(&self.db)
                .await?
                .ok_or_else(|| {
                    AccountError::InvalidParent(format!("parent account not found: {current}"))
                })?;

            if account.id == id {
                return Err(AccountError::InvalidParent(
                    "parent is a descendant of this account".to_owned(),
                ));
            }
            cursor = account.parent_id;
        }

        Ok(())
    }

    async fn count_journal_lines(&self, account_id: Uuid) -> Result<u64, DbErr> {
        journal_lines::Entity::find()
            .filter(journal_lines::Column::AccountId.eq(account_id))
            .count(&self.db)
            .await
    }
}
