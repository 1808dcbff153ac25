//! REST API exposure
//!
//! Consumes a `ServerHost` and produces an Axum `Router` with the health,
//! company and invoice routes, a JSON 404 fallback and per-request tracing.

use super::super::host::ServerHost;
use crate::server::handlers::route_not_found;
use crate::server::router::{build_company_routes, build_invoice_routes};
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub const SERVICE_NAME: &str = "biztime";

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// # Arguments
    ///
    /// * `host` - The server host holding the repositories
    /// * `custom_routes` - Additional custom routes to merge
    pub fn build_router(host: Arc<ServerHost>, custom_routes: Vec<Router>) -> Router {
        let api = build_company_routes()
            .merge(build_invoice_routes())
            .with_state(host);

        let mut app = Self::health_routes().merge(api);

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        app.fallback(route_not_found)
            .layer(TraceLayer::new_for_http())
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": SERVICE_NAME
        }))
    }
}
