//! In-memory record store for testing and development
//!
//! Mirrors the relational schema closely enough that the repositories behave
//! the same as against PostgreSQL: unique company codes, a restricting
//! foreign key from invoices to companies, `amt > 0`, and auto-increment ids.

use crate::core::error::StorageError;
use crate::core::model::{Company, CompanySummary, Invoice, InvoiceSummary, InvoiceWrite};
use crate::core::store::{RecordStore, StoreResult};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

const BACKEND: &str = "memory";

#[derive(Default)]
struct Tables {
    companies: BTreeMap<String, Company>,
    invoices: BTreeMap<i32, Invoice>,
    last_invoice_id: i32,
}

/// In-memory store implementation
///
/// Both tables sit behind one `RwLock`, so every call (constraint checks
/// included) is atomic.
#[derive(Clone)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables::default())),
        }
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.tables.read().map_err(|e| StorageError::QueryError {
            backend: BACKEND.to_string(),
            message: format!("Failed to acquire read lock: {}", e),
        })
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.tables.write().map_err(|e| StorageError::QueryError {
            backend: BACKEND.to_string(),
            message: format!("Failed to acquire write lock: {}", e),
        })
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn integrity(message: String) -> StorageError {
    StorageError::IntegrityError { message }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn list_companies(&self) -> StoreResult<Vec<CompanySummary>> {
        let tables = self.read()?;
        let mut companies: Vec<CompanySummary> =
            tables.companies.values().map(CompanySummary::from).collect();
        companies.sort_by(|a, b| a.code.cmp(&b.code).then_with(|| a.name.cmp(&b.name)));
        Ok(companies)
    }

    async fn fetch_company(&self, code: &str) -> StoreResult<Option<Company>> {
        Ok(self.read()?.companies.get(code).cloned())
    }

    async fn insert_company(&self, company: Company) -> StoreResult<Company> {
        let mut tables = self.write()?;

        if tables.companies.contains_key(&company.code) {
            return Err(integrity(format!(
                "duplicate key: company '{}' already exists",
                company.code
            )));
        }

        tables
            .companies
            .insert(company.code.clone(), company.clone());
        Ok(company)
    }

    async fn update_company(
        &self,
        code: &str,
        name: &str,
        description: Option<&str>,
    ) -> StoreResult<Option<Company>> {
        let mut tables = self.write()?;

        let Some(company) = tables.companies.get_mut(code) else {
            return Ok(None);
        };
        company.name = name.to_string();
        company.description = description.map(str::to_string);

        Ok(Some(company.clone()))
    }

    async fn delete_company(&self, code: &str) -> StoreResult<u64> {
        let mut tables = self.write()?;

        if tables.invoices.values().any(|inv| inv.comp_code == code) {
            return Err(integrity(format!(
                "company '{}' is still referenced by invoices",
                code
            )));
        }

        Ok(tables.companies.remove(code).map_or(0, |_| 1))
    }

    async fn list_company_invoice_ids(&self, code: &str) -> StoreResult<Vec<i32>> {
        let tables = self.read()?;
        Ok(tables
            .invoices
            .values()
            .filter(|inv| inv.comp_code == code)
            .map(|inv| inv.id)
            .collect())
    }

    async fn list_invoices(&self) -> StoreResult<Vec<InvoiceSummary>> {
        let tables = self.read()?;
        Ok(tables.invoices.values().map(InvoiceSummary::from).collect())
    }

    async fn fetch_invoice(&self, id: i32) -> StoreResult<Option<Invoice>> {
        Ok(self.read()?.invoices.get(&id).cloned())
    }

    async fn insert_invoice(
        &self,
        comp_code: &str,
        amt: f64,
        add_date: NaiveDate,
    ) -> StoreResult<Invoice> {
        let mut tables = self.write()?;

        if !tables.companies.contains_key(comp_code) {
            return Err(integrity(format!(
                "foreign key violation: company '{}' does not exist",
                comp_code
            )));
        }
        if amt <= 0.0 || amt.is_nan() {
            return Err(integrity(format!("check violation: amt must be > 0, got {}", amt)));
        }

        tables.last_invoice_id += 1;
        let invoice = Invoice {
            id: tables.last_invoice_id,
            comp_code: comp_code.to_string(),
            amt,
            paid: false,
            add_date,
            paid_date: None,
        };
        tables.invoices.insert(invoice.id, invoice.clone());

        Ok(invoice)
    }

    async fn update_invoice(&self, id: i32, write: InvoiceWrite) -> StoreResult<Option<Invoice>> {
        if write.amt <= 0.0 || write.amt.is_nan() {
            return Err(integrity(format!(
                "check violation: amt must be > 0, got {}",
                write.amt
            )));
        }

        let mut tables = self.write()?;
        let Some(invoice) = tables.invoices.get_mut(&id) else {
            return Ok(None);
        };
        invoice.apply(&write);

        Ok(Some(invoice.clone()))
    }

    async fn delete_invoice(&self, id: i32) -> StoreResult<u64> {
        let mut tables = self.write()?;
        Ok(tables.invoices.remove(&id).map_or(0, |_| 1))
    }

    fn backend(&self) -> &'static str {
        BACKEND
    }
}
