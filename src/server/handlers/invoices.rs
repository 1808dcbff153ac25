//! HTTP handlers for `/invoices`

use axum::{Json, extract::State};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::core::error::BizError;
use crate::core::model::{InvoiceChanges, NewInvoice};
use crate::server::extract::{InvoiceId, JsonBody};
use crate::server::host::ServerHost;

/// List all invoices
///
/// GET /invoices
pub async fn list_invoices(State(host): State<Arc<ServerHost>>) -> Result<Json<Value>, BizError> {
    let invoices = host.invoices.list_all().await?;
    Ok(Json(json!({ "invoices": invoices })))
}

/// Get one invoice joined with its company
///
/// GET /invoices/{id}
pub async fn get_invoice(
    State(host): State<Arc<ServerHost>>,
    InvoiceId(id): InvoiceId,
) -> Result<Json<Value>, BizError> {
    let invoice = host.invoices.get_by_id(id).await?;
    Ok(Json(json!({ "invoice": invoice })))
}

/// Create an unpaid invoice
///
/// POST /invoices
///
/// Body: `{ "comp_code": "apple", "amt": 100 }`
pub async fn create_invoice(
    State(host): State<Arc<ServerHost>>,
    JsonBody(input): JsonBody<NewInvoice>,
) -> Result<Json<Value>, BizError> {
    let invoice = host.invoices.create(input).await?;
    tracing::info!(id = invoice.id, comp_code = %invoice.comp_code, "invoice created");
    Ok(Json(json!({ "invoice": invoice })))
}

/// Change the amount and payment status
///
/// PUT /invoices/{id}
///
/// Body: `{ "amt": 100, "paid": true }`
pub async fn update_invoice(
    State(host): State<Arc<ServerHost>>,
    InvoiceId(id): InvoiceId,
    JsonBody(changes): JsonBody<InvoiceChanges>,
) -> Result<Json<Value>, BizError> {
    let invoice = host.invoices.update(id, changes).await?;
    Ok(Json(json!({ "invoice": invoice })))
}

/// Delete an invoice
///
/// DELETE /invoices/{id}
pub async fn delete_invoice(
    State(host): State<Arc<ServerHost>>,
    InvoiceId(id): InvoiceId,
) -> Result<Json<Value>, BizError> {
    host.invoices.delete(id).await?;
    Ok(Json(json!({ "status": "deleted" })))
}
