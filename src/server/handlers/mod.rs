//! HTTP handlers
//!
//! Handlers only translate between HTTP and the repositories. Status codes
//! come from [`BizError`](crate::core::BizError).

pub mod companies;
pub mod invoices;

use crate::core::error::{BizError, RequestError};
use axum::http::{Method, Uri};

/// Fallback for unmatched routes
pub async fn route_not_found(method: Method, uri: Uri) -> BizError {
    RequestError::RouteNotFound {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
    .into()
}
