//! HTTP server for the company and invoice routes
//!
//! `ServerBuilder` wires a record store and a clock into a `ServerHost`, and
//! `RestExposure` turns the host into an Axum router.

pub mod builder;
pub mod exposure;
pub mod extract;
pub mod handlers;
pub mod host;
pub mod router;

pub use builder::ServerBuilder;
pub use exposure::RestExposure;
pub use host::ServerHost;
