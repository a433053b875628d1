use serde::Serialize;
use sqlx::PgPool;
use time::Date;

pub const TRANSACTION_LIMIT: i64 = 500;
pub const BUDGET_LIMIT: i64 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct TransactionRecord {
    pub date: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct BudgetRecord {
    pub month: String,
    pub amount: f64,
    pub category_id: Option<String>,
    pub category: Option<String>,
}

/// What the advisor gets to see for one question.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerSnapshot {
    /// Transactions in the whole ledger, regardless of the window.
    pub total_transactions: i64,
    /// Transactions on or after the window start, newest first.
    pub transactions: Vec<TransactionRecord>,
    /// Budgets, newest month first.
    pub budgets: Vec<BudgetRecord>,
}

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Ledger query failed: {0}")]
    Query(#[from] sqlx::Error),
}

pub trait Ledger {
    async fn snapshot(&self, since: Date) -> Result<LedgerSnapshot, LedgerError>;
}

#[derive(Clone)]
pub struct PgLedger {
    pool: PgPool,
}

impl PgLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Ledger for PgLedger {
    async fn snapshot(&self, since: Date) -> Result<LedgerSnapshot, LedgerError> {
        let total_transactions = sqlx::query_scalar::<_, i64>(
            r#"--sql
                SELECT COUNT(*) FROM transactions
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        let transactions = sqlx::query_as::<_, TransactionRecord>(
            r#"--sql
                SELECT t.date::text AS date,
                       t.amount::float8 AS amount,
                       t."type"::text AS kind,
                       t.description,
                       c.name AS category
                FROM transactions t
                LEFT JOIN categories c ON c.id = t.category_id
                WHERE t.date >= $1
                ORDER BY t.date DESC
                LIMIT $2
            "#,
        )
        .bind(since)
        .bind(TRANSACTION_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        let budgets = sqlx::query_as::<_, BudgetRecord>(
            r#"--sql
                SELECT b.month::text AS month,
                       b.amount::float8 AS amount,
                       b.category_id::text AS category_id,
                       c.name AS category
                FROM budgets b
                LEFT JOIN categories c ON c.id = b.category_id
                ORDER BY b.month DESC
                LIMIT $1
            "#,
        )
        .bind(BUDGET_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(LedgerSnapshot {
            total_transactions,
            transactions,
            budgets,
        })
    }
}

/// Ledger held in memory, applying the same window, ordering and limits as
/// the Postgres one.
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    pub transactions: Vec<TransactionRecord>,
    pub budgets: Vec<BudgetRecord>,
}

impl Ledger for MemoryLedger {
    async fn snapshot(&self, since: Date) -> Result<LedgerSnapshot, LedgerError> {
        let since = since.to_string();
        let mut transactions: Vec<_> = self
            .transactions
            .iter()
            .filter(|record| record.date >= since)
            .cloned()
            .collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        transactions.truncate(TRANSACTION_LIMIT as usize);

        let mut budgets = self.budgets.clone();
        budgets.sort_by(|a, b| b.month.cmp(&a.month));
        budgets.truncate(BUDGET_LIMIT as usize);

        Ok(LedgerSnapshot {
            total_transactions: self.transactions.len() as i64,
            transactions,
            budgets,
        })
    }
}
