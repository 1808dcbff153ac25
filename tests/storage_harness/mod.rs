//! Shared test harness for storage backend testing
//!
//! Provides sample records, a router builder with a fixed clock, and two
//! macros that every backend runs:
//! - `record_store_tests!` checks the `RecordStore` contract directly
//! - `rest_integration_tests!` drives the same backend through HTTP
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//!
//! record_store_tests!(InMemoryStore::new());
//! rest_integration_tests!(InMemoryStore::new());
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod record_store_tests;

use axum::Router;
use axum_test::TestServer;
use biztime::core::{Company, FixedClock, InvoiceWrite, RecordStore};
use biztime::server::ServerBuilder;
use chrono::NaiveDate;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Sample data
// ---------------------------------------------------------------------------

pub fn company(code: &str, name: &str, description: Option<&str>) -> Company {
    Company {
        code: code.to_string(),
        name: name.to_string(),
        description: description.map(str::to_string),
    }
}

pub fn apple() -> Company {
    company("apple", "Apple Computer", Some("Maker of OSX."))
}

pub fn ibm() -> Company {
    company("ibm", "IBM", Some("Big blue."))
}

/// The date the fixed test clock reports as "today"
pub fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

/// Mark paid; `today` is stamped only if the invoice was unpaid
pub fn pay(amt: f64, today: NaiveDate) -> InvoiceWrite {
    InvoiceWrite {
        amt,
        paid: true,
        today,
    }
}

pub fn unpay(amt: f64) -> InvoiceWrite {
    InvoiceWrite {
        amt,
        paid: false,
        today: test_today(),
    }
}

// ---------------------------------------------------------------------------
// Router builder
// ---------------------------------------------------------------------------

/// Full service router over the given store, with "today" pinned to
/// [`test_today`]
pub fn build_test_router(store: Arc<dyn RecordStore>) -> Router {
    ServerBuilder::new()
        .with_shared_store(store)
        .with_clock(FixedClock(test_today()))
        .build()
        .unwrap()
}

pub fn build_test_server(store: Arc<dyn RecordStore>) -> TestServer {
    TestServer::new(build_test_router(store))
}
