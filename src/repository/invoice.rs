//! Invoice records and their payment lifecycle

use crate::core::clock::Clock;
use crate::core::error::{BizResult, EntityError, StorageError, ValidationError};
use crate::core::model::{
    Invoice, InvoiceChanges, InvoiceDetail, InvoiceSummary, InvoiceWrite, NewInvoice,
};
use crate::core::slug;
use crate::core::store::RecordStore;
use axum::http::StatusCode;
use std::sync::Arc;

const ENTITY: &str = "invoice";
const KEY: &str = "id";
const CREATE_PARAMS: &[&str] = &["comp_code", "amount"];

/// CRUD over invoices
///
/// The clock dates every invoice: `add_date` on create and `paid_date` when
/// an unpaid invoice is paid. Payment changes follow
/// [`PaymentState`](crate::core::PaymentState): the date is kept while the
/// invoice stays paid and cleared when it is marked unpaid.
#[derive(Clone)]
pub struct InvoiceRepository {
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
}

impl InvoiceRepository {
    pub fn new(store: Arc<dyn RecordStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// `(id, comp_code)` of every invoice
    pub async fn list_all(&self) -> BizResult<Vec<InvoiceSummary>> {
        Ok(self.store.list_invoices().await?)
    }

    /// The invoice joined with its owning company
    pub async fn get_by_id(&self, id: i32) -> BizResult<InvoiceDetail> {
        let invoice = self
            .store
            .fetch_invoice(id)
            .await?
            .ok_or_else(|| EntityError::not_found(ENTITY, KEY, id))?;

        let company = self
            .store
            .fetch_company(&invoice.comp_code)
            .await?
            .ok_or_else(|| StorageError::IntegrityError {
                message: format!(
                    "invoice {} references missing company '{}'",
                    invoice.id, invoice.comp_code
                ),
            })?;

        Ok(InvoiceDetail::new(invoice, company))
    }

    pub async fn create(&self, input: NewInvoice) -> BizResult<Invoice> {
        let comp_code = slug::normalize(&input.comp_code);

        let amt = input.amt.filter(|amt| *amt != 0.0);

        let mut missing = Vec::new();
        if comp_code.is_empty() {
            missing.push("comp_code");
        }
        if amt.is_none() {
            missing.push("amount");
        }
        let amt = match amt {
            Some(amt) if missing.is_empty() => amt,
            _ => return Err(ValidationError::missing(&missing, CREATE_PARAMS).into()),
        };

        tracing::debug!(comp_code = %comp_code, amt, "creating invoice");

        Ok(self
            .store
            .insert_invoice(&comp_code, amt, self.clock.today())
            .await?)
    }

    /// Apply new amount and payment flag
    ///
    /// An unknown id is reported as "Incorrect invoice id" with a 404.
    pub async fn update(&self, id: i32, changes: InvoiceChanges) -> BizResult<Invoice> {
        let write = InvoiceWrite::new(changes, self.clock.today());
        tracing::debug!(id, amt = write.amt, paid = write.paid, "updating invoice");

        self.store.update_invoice(id, write).await?.ok_or_else(|| {
            EntityError::unmatched(ENTITY, KEY, id, "update")
                .rendered_as(StatusCode::NOT_FOUND)
                .into()
        })
    }

    pub async fn delete(&self, id: i32) -> BizResult<()> {
        tracing::debug!(id, "deleting invoice");

        match self.store.delete_invoice(id).await? {
            0 => Err(EntityError::unmatched(ENTITY, KEY, id, "delete").into()),
            _ => Ok(()),
        }
    }
}
