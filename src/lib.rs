//! # BizTime
//!
//! A company and invoice record service exposed over a JSON HTTP API.
//!
//! ## Features
//!
//! - **Normalized company codes**: `"Apple Inc!"` is stored and looked up as `apple-inc`
//! - **Invoice payment lifecycle**: `paid_date` is stamped on payment and cleared on reversal
//! - **Joined reads**: an invoice comes back with its owning company
//! - **Pluggable storage**: in-memory (default) or PostgreSQL via the `postgres` feature
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use biztime::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     ServerBuilder::new()
//!         .with_store(InMemoryStore::new())
//!         .serve("127.0.0.1:3000".parse()?)
//!         .await
//! }
//! ```
//!
//! ## Routes
//!
//! | Route | Result |
//! |---|---|
//! | `GET /companies` | `{companies: [{code, name}]}` |
//! | `GET /companies/{code}` | `{company: {code, name, description, invoices}}` |
//! | `POST /companies` | `{company: {code, name, description}}` |
//! | `PUT /companies/{code}` | `{company: {...}}` |
//! | `DELETE /companies/{code}` | `{status: "deleted"}` |
//! | `GET /invoices` | `{invoices: [{id, comp_code}]}` |
//! | `GET /invoices/{id}` | `{invoice: {id, amt, paid, add_date, paid_date, company}}` |
//! | `POST /invoices` | `{invoice: {...}}` |
//! | `PUT /invoices/{id}` | `{invoice: {...}}` |
//! | `DELETE /invoices/{id}` | `{status: "deleted"}` |

pub mod config;
pub mod core;
pub mod repository;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        BizError, BizResult, Clock, Company, CompanyChanges, CompanyDetail, CompanySummary,
        EntityError, FixedClock, Invoice, InvoiceChanges, InvoiceDetail, InvoiceSummary,
        NewCompany, NewInvoice, PaymentState, RecordStore, StorageError, SystemClock,
        ValidationError, slug::normalize,
    };

    // === Repositories ===
    pub use crate::repository::{CompanyRepository, InvoiceRepository};

    // === Storage ===
    #[cfg(feature = "in-memory")]
    pub use crate::storage::InMemoryStore;
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresStore;

    // === Config ===
    pub use crate::config::{AppConfig, DatabaseConfig, StoreKind};

    // === Server ===
    pub use crate::server::{RestExposure, ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
}
