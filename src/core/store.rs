//! Store trait for company and invoice records

use crate::core::error::StorageError;
use crate::core::model::{Company, CompanySummary, Invoice, InvoiceSummary, InvoiceWrite};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Result of a single store call
pub type StoreResult<T> = Result<T, StorageError>;

/// The only component touching persistence
///
/// Implementations hold no business rules. "No such record" is reported as
/// `None` from row-returning calls and as `0` from deletes, never as an error.
/// Errors are reserved for the store failing or rejecting a write (duplicate
/// key, foreign key, check constraint).
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All companies ordered by code, then name
    async fn list_companies(&self) -> StoreResult<Vec<CompanySummary>>;

    async fn fetch_company(&self, code: &str) -> StoreResult<Option<Company>>;

    /// Insert a company exactly as given and return the stored row
    async fn insert_company(&self, company: Company) -> StoreResult<Company>;

    /// Overwrite name and description of the company keyed by `code`
    async fn update_company(
        &self,
        code: &str,
        name: &str,
        description: Option<&str>,
    ) -> StoreResult<Option<Company>>;

    /// Delete by code, returning the number of rows removed
    ///
    /// Fails with an integrity error while invoices still reference the company.
    async fn delete_company(&self, code: &str) -> StoreResult<u64>;

    /// Ids of the invoices billed against a company, ascending
    async fn list_company_invoice_ids(&self, code: &str) -> StoreResult<Vec<i32>>;

    /// All invoices ordered by id
    async fn list_invoices(&self) -> StoreResult<Vec<InvoiceSummary>>;

    async fn fetch_invoice(&self, id: i32) -> StoreResult<Option<Invoice>>;

    /// Insert an unpaid invoice dated `add_date`; the store assigns `id`
    async fn insert_invoice(
        &self,
        comp_code: &str,
        amt: f64,
        add_date: NaiveDate,
    ) -> StoreResult<Invoice>;

    /// Set the amount and apply the payment transition in one atomic step
    ///
    /// Paid → Paid keeps the stored `paid_date`, Unpaid → Paid stamps
    /// `write.today`, and `paid == false` clears it.
    async fn update_invoice(&self, id: i32, write: InvoiceWrite) -> StoreResult<Option<Invoice>>;

    /// Delete by id, returning the number of rows removed
    async fn delete_invoice(&self, id: i32) -> StoreResult<u64>;

    /// Short backend name used in logs and errors
    fn backend(&self) -> &'static str;
}
