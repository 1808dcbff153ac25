//! HTTP handlers for `/companies`

use axum::{Json, extract::State};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::core::error::BizError;
use crate::core::model::{CompanyChanges, NewCompany};
use crate::server::extract::{CompanyCode, JsonBody};
use crate::server::host::ServerHost;

/// List all companies
///
/// GET /companies
pub async fn list_companies(State(host): State<Arc<ServerHost>>) -> Result<Json<Value>, BizError> {
    let companies = host.companies.list_all().await?;
    Ok(Json(json!({ "companies": companies })))
}

/// Get one company with the ids of its invoices
///
/// GET /companies/{code}
pub async fn get_company(
    State(host): State<Arc<ServerHost>>,
    CompanyCode(code): CompanyCode,
) -> Result<Json<Value>, BizError> {
    let company = host.companies.get_detail(&code).await?;
    Ok(Json(json!({ "company": company })))
}

/// Create a company
///
/// POST /companies
///
/// Body: `{ "code": "Apple Inc", "name": "Apple", "description": "Maker of OSX." }`
pub async fn create_company(
    State(host): State<Arc<ServerHost>>,
    JsonBody(input): JsonBody<NewCompany>,
) -> Result<Json<Value>, BizError> {
    let company = host.companies.create(input).await?;
    tracing::info!(code = %company.code, "company created");
    Ok(Json(json!({ "company": company })))
}

/// Update a company's name and description
///
/// PUT /companies/{code}
pub async fn update_company(
    State(host): State<Arc<ServerHost>>,
    CompanyCode(code): CompanyCode,
    JsonBody(changes): JsonBody<CompanyChanges>,
) -> Result<Json<Value>, BizError> {
    let company = host.companies.update(&code, changes).await?;
    Ok(Json(json!({ "company": company })))
}

/// Delete a company
///
/// DELETE /companies/{code}
pub async fn delete_company(
    State(host): State<Arc<ServerHost>>,
    CompanyCode(code): CompanyCode,
) -> Result<Json<Value>, BizError> {
    host.companies.delete(&code).await?;
    Ok(Json(json!({ "status": "deleted" })))
}
