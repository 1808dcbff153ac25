//! Route tables for companies and invoices

use crate::server::handlers::{companies, invoices};
use crate::server::host::ServerHost;
use axum::{Router, routing::get};
use std::sync::Arc;

/// Company routes:
/// - GET /companies - List companies
/// - POST /companies - Create a company
/// - GET /companies/{code} - Company with invoice ids
/// - PUT /companies/{code} - Update name/description
/// - DELETE /companies/{code} - Delete a company
pub fn build_company_routes() -> Router<Arc<ServerHost>> {
    Router::new()
        .route(
            "/companies",
            get(companies::list_companies).post(companies::create_company),
        )
        .route(
            "/companies/{code}",
            get(companies::get_company)
                .put(companies::update_company)
                .delete(companies::delete_company),
        )
}

/// Invoice routes:
/// - GET /invoices - List invoices
/// - POST /invoices - Create an invoice
/// - GET /invoices/{id} - Invoice joined with its company
/// - PUT /invoices/{id} - Update amount and payment status
/// - DELETE /invoices/{id} - Delete an invoice
pub fn build_invoice_routes() -> Router<Arc<ServerHost>> {
    Router::new()
        .route(
            "/invoices",
            get(invoices::list_invoices).post(invoices::create_invoice),
        )
        .route(
            "/invoices/{id}",
            get(invoices::get_invoice)
                .put(invoices::update_invoice)
                .delete(invoices::delete_invoice),
        )
}
