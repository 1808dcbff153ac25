//! Business rules over the record store
//!
//! Repositories hold no mutable state of their own; they share one
//! `Arc<dyn RecordStore>` and surface store failures unchanged.

pub mod company;
pub mod invoice;

pub use company::CompanyRepository;
pub use invoice::InvoiceRepository;
