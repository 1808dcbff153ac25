//! Core types, traits and rules shared by every layer

pub mod clock;
pub mod error;
pub mod model;
pub mod slug;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{BizError, BizResult, EntityError, StorageError, ValidationError};
pub use model::{
    Company, CompanyChanges, CompanyDetail, CompanySummary, Invoice, InvoiceChanges,
    InvoiceDetail, InvoiceSummary, InvoiceWrite, NewCompany, NewInvoice, PaymentState,
};
pub use store::{RecordStore, StoreResult};
