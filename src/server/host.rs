//! Server host shared by every handler
//!
//! The host is built once by [`ServerBuilder`](super::ServerBuilder) and
//! handed to the router as state. It owns the repositories and, through
//! them, the single store handle.

use crate::core::clock::Clock;
use crate::core::store::RecordStore;
use crate::repository::{CompanyRepository, InvoiceRepository};
use std::sync::Arc;

/// Host context containing all service state
///
/// # Example
///
/// ```rust,ignore
/// let host = ServerHost::new(Arc::new(InMemoryStore::new()), Arc::new(SystemClock));
/// let app = RestExposure::build_router(Arc::new(host), vec![]);
/// ```
pub struct ServerHost {
    /// Store handle shared with both repositories
    pub store: Arc<dyn RecordStore>,

    pub companies: CompanyRepository,

    pub invoices: InvoiceRepository,
}

impl ServerHost {
    pub fn new(store: Arc<dyn RecordStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            companies: CompanyRepository::new(store.clone()),
            invoices: InvoiceRepository::new(store.clone(), clock),
            store,
        }
    }

    /// Name of the backend behind the store handle
    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }
}
