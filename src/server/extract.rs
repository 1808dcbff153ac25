//! Request extractors whose rejections render as [`BizError`]
//!
//! Axum's own `Json` and `Path` reject with plain-text bodies. These wrappers
//! keep every failure in the `{ "error": {...}, "message": "..." }` shape.

use crate::core::error::{BizError, RequestError, ValidationError};
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

/// JSON body extractor
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_company(
///     State(host): State<Arc<ServerHost>>,
///     JsonBody(input): JsonBody<NewCompany>,
/// ) -> Result<Json<Value>, BizError> {
///     // input is deserialized, not yet validated
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = BizError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(ValidationError::InvalidJson {
                message: rejection.body_text(),
            }
            .into()),
        }
    }
}

/// Last segment of the request path, still percent-encoded
fn raw_segment(parts: &Parts) -> String {
    parts
        .uri
        .path()
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Integer invoice id taken from the `{id}` path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvoiceId(pub i32);

impl<S> FromRequestParts<S> for InvoiceId
where
    S: Send + Sync,
{
    type Rejection = BizError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw = match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(raw)) => raw,
            Err(_) => {
                return Err(RequestError::InvalidInvoiceId {
                    id: raw_segment(parts),
                }
                .into());
            }
        };

        raw.parse::<i32>()
            .map(InvoiceId)
            .map_err(|_| RequestError::InvalidInvoiceId { id: raw }.into())
    }
}

/// Company code as written in the `{code}` path segment, not yet normalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyCode(pub String);

impl<S> FromRequestParts<S> for CompanyCode
where
    S: Send + Sync,
{
    type Rejection = BizError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(code)) => Ok(CompanyCode(code)),
            Err(_) => Err(RequestError::InvalidCompanyCode {
                code: raw_segment(parts),
            }
            .into()),
        }
    }
}
