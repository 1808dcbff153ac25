//! PostgreSQL record store using sqlx.
//!
//! Provides `PostgresStore`, backed by a `sqlx::PgPool`.
//!
//! # Feature flag
//!
//! This module is gated behind the `postgres` feature flag:
//! ```toml
//! [dependencies]
//! biztime = { version = "0.1", features = ["postgres"] }
//! ```
//!
//! # Schema
//!
//! Two tables, created by [`ensure_schema`]:
//! - `companies(code PK, name, description)`
//! - `invoices(id SERIAL PK, comp_code FK, amt, paid, add_date, paid_date)`
//!
//! The foreign key restricts deletion of companies that still have invoices,
//! and `amt` must be positive.

use crate::config::DatabaseConfig;
use crate::core::error::StorageError;
use crate::core::model::{Company, CompanySummary, Invoice, InvoiceSummary, InvoiceWrite};
use crate::core::store::{RecordStore, StoreResult};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use sqlx::error::ErrorKind;
use sqlx::postgres::PgPoolOptions;

const BACKEND: &str = "PostgreSQL";

const INVOICE_COLUMNS: &str = "id, comp_code, amt, paid, add_date, paid_date";

// ---------------------------------------------------------------------------
// Schema management
// ---------------------------------------------------------------------------

/// Apply the required tables (idempotent).
///
/// Safe to call on every startup.
pub async fn ensure_schema(pool: &PgPool) -> StoreResult<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS companies (
            code TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT
        )",
    )
    .execute(pool)
    .await
    .map_err(store_error)?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS invoices (
            id SERIAL PRIMARY KEY,
            comp_code TEXT NOT NULL REFERENCES companies (code) ON DELETE RESTRICT,
            amt DOUBLE PRECISION NOT NULL,
            paid BOOLEAN NOT NULL DEFAULT false,
            add_date DATE NOT NULL DEFAULT CURRENT_DATE,
            paid_date DATE,
            CONSTRAINT invoices_amt_check CHECK (amt > 0)
        )",
    )
    .execute(pool)
    .await
    .map_err(store_error)?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_invoices_comp_code ON invoices (comp_code)")
        .execute(pool)
        .await
        .map_err(store_error)?;

    Ok(())
}

/// Classify a sqlx error
///
/// Constraint violations become integrity errors so the caller can tell a
/// rejected write from a broken store.
fn store_error(err: sqlx::Error) -> StorageError {
    match &err {
        sqlx::Error::Database(db) => match db.kind() {
            ErrorKind::UniqueViolation
            | ErrorKind::ForeignKeyViolation
            | ErrorKind::NotNullViolation
            | ErrorKind::CheckViolation => StorageError::IntegrityError {
                message: db.message().to_string(),
            },
            _ => StorageError::QueryError {
                backend: BACKEND.to_string(),
                message: err.to_string(),
            },
        },
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed => StorageError::ConnectionError {
            backend: BACKEND.to_string(),
            message: err.to_string(),
        },
        _ => StorageError::QueryError {
            backend: BACKEND.to_string(),
            message: err.to_string(),
        },
    }
}

// ---------------------------------------------------------------------------
// PostgresStore
// ---------------------------------------------------------------------------

/// Record store backed by PostgreSQL.
///
/// # Example
///
/// ```rust,ignore
/// use sqlx::PgPool;
/// use biztime::storage::PostgresStore;
///
/// let pool = PgPool::connect("postgres://localhost/biztime").await?;
/// let store = PostgresStore::new(pool);
/// let companies = store.list_companies().await?;
/// ```
#[derive(Clone, Debug)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new `PostgresStore` with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool from configuration and make sure the schema exists
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await
            .map_err(|e| StorageError::ConnectionError {
                backend: BACKEND.to_string(),
                message: e.to_string(),
            })?;

        ensure_schema(&pool).await?;
        tracing::info!(max_connections = config.max_connections, "connected to PostgreSQL");

        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl RecordStore for PostgresStore {
    async fn list_companies(&self) -> StoreResult<Vec<CompanySummary>> {
        sqlx::query_as::<_, CompanySummary>(
            "SELECT code, name FROM companies ORDER BY code, name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)
    }

    async fn fetch_company(&self, code: &str) -> StoreResult<Option<Company>> {
        sqlx::query_as::<_, Company>(
            "SELECT code, name, description FROM companies WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)
    }

    async fn insert_company(&self, company: Company) -> StoreResult<Company> {
        sqlx::query_as::<_, Company>(
            "INSERT INTO companies (code, name, description) VALUES ($1, $2, $3) \
             RETURNING code, name, description",
        )
        .bind(&company.code)
        .bind(&company.name)
        .bind(&company.description)
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)
    }

    async fn update_company(
        &self,
        code: &str,
        name: &str,
        description: Option<&str>,
    ) -> StoreResult<Option<Company>> {
        sqlx::query_as::<_, Company>(
            "UPDATE companies SET name = $1, description = $2 WHERE code = $3 \
             RETURNING code, name, description",
        )
        .bind(name)
        .bind(description)
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)
    }

    async fn delete_company(&self, code: &str) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM companies WHERE code = $1")
            .bind(code)
            .execute(&self.pool)
            .await
            .map_err(store_error)?;

        Ok(result.rows_affected())
    }

    async fn list_company_invoice_ids(&self, code: &str) -> StoreResult<Vec<i32>> {
        sqlx::query_scalar::<_, i32>("SELECT id FROM invoices WHERE comp_code = $1 ORDER BY id")
            .bind(code)
            .fetch_all(&self.pool)
            .await
            .map_err(store_error)
    }

    async fn list_invoices(&self) -> StoreResult<Vec<InvoiceSummary>> {
        sqlx::query_as::<_, InvoiceSummary>("SELECT id, comp_code FROM invoices ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(store_error)
    }

    async fn fetch_invoice(&self, id: i32) -> StoreResult<Option<Invoice>> {
        let sql = format!("SELECT {} FROM invoices WHERE id = $1", INVOICE_COLUMNS);
        sqlx::query_as::<_, Invoice>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)
    }

    async fn insert_invoice(
        &self,
        comp_code: &str,
        amt: f64,
        add_date: NaiveDate,
    ) -> StoreResult<Invoice> {
        let sql = format!(
            "INSERT INTO invoices (comp_code, amt, add_date) VALUES ($1, $2, $3) RETURNING {}",
            INVOICE_COLUMNS
        );
        sqlx::query_as::<_, Invoice>(&sql)
            .bind(comp_code)
            .bind(amt)
            .bind(add_date)
            .fetch_one(&self.pool)
            .await
            .map_err(store_error)
    }

    async fn update_invoice(&self, id: i32, write: InvoiceWrite) -> StoreResult<Option<Invoice>> {
        // SET expressions see the row as it was before this statement
        let sql = format!(
            "UPDATE invoices SET amt = $1, paid = $2, paid_date = CASE \
                 WHEN NOT $2 THEN NULL \
                 WHEN paid THEN COALESCE(paid_date, add_date) \
                 ELSE $3 \
             END \
             WHERE id = $4 RETURNING {}",
            INVOICE_COLUMNS
        );
        sqlx::query_as::<_, Invoice>(&sql)
            .bind(write.amt)
            .bind(write.paid)
            .bind(write.today)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)
    }

    async fn delete_invoice(&self, id: i32) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(store_error)?;

        Ok(result.rows_affected())
    }

    fn backend(&self) -> &'static str {
        BACKEND
    }
}
