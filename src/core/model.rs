//! Record types for companies and invoices
//!
//! Three families live here:
//! - rows as the store returns them ([`Company`], [`Invoice`], summaries)
//! - request inputs ([`NewCompany`], [`CompanyChanges`], [`NewInvoice`], [`InvoiceChanges`])
//! - the invoice payment state machine ([`PaymentState`])

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =============================================================================
// Companies
// =============================================================================

/// A company row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Company {
    /// Canonical slug, primary key
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

/// Listing projection of a company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct CompanySummary {
    pub code: String,
    pub name: String,
}

impl From<&Company> for CompanySummary {
    fn from(company: &Company) -> Self {
        Self {
            code: company.code.clone(),
            name: company.name.clone(),
        }
    }
}

/// A company together with the ids of the invoices billed against it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyDetail {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub invoices: Vec<i32>,
}

impl CompanyDetail {
    pub fn new(company: Company, invoices: Vec<i32>) -> Self {
        Self {
            code: company.code,
            name: company.name,
            description: company.description,
            invoices,
        }
    }
}

/// Body of `POST /companies`
///
/// Missing fields deserialize to empty strings so the repository can report
/// every absent parameter the same way.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewCompany {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Body of `PUT /companies/{code}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyChanges {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

// =============================================================================
// Invoices
// =============================================================================

/// An invoice row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Invoice {
    pub id: i32,
    pub comp_code: String,
    pub amt: f64,
    pub paid: bool,
    pub add_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
}

impl Invoice {
    /// Current payment state derived from `paid` / `paid_date`
    ///
    /// A row flagged paid without a date (only possible through direct
    /// store edits) is treated as paid on its `add_date`.
    pub fn payment_state(&self) -> PaymentState {
        match (self.paid, self.paid_date) {
            (true, Some(on)) => PaymentState::Paid { on },
            (true, None) => PaymentState::Paid { on: self.add_date },
            (false, _) => PaymentState::Unpaid,
        }
    }

    /// Apply an update to this row in place
    pub fn apply(&mut self, write: &InvoiceWrite) {
        let next = self.payment_state().transition(write.paid, write.today);
        self.amt = write.amt;
        self.paid = next.is_paid();
        self.paid_date = next.paid_date();
    }
}

/// Listing projection of an invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct InvoiceSummary {
    pub id: i32,
    pub comp_code: String,
}

impl From<&Invoice> for InvoiceSummary {
    fn from(invoice: &Invoice) -> Self {
        Self {
            id: invoice.id,
            comp_code: invoice.comp_code.clone(),
        }
    }
}

/// Joined read of one invoice and its owning company
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceDetail {
    pub id: i32,
    pub amt: f64,
    pub paid: bool,
    pub add_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
    pub company: Company,
}

impl InvoiceDetail {
    pub fn new(invoice: Invoice, company: Company) -> Self {
        Self {
            id: invoice.id,
            amt: invoice.amt,
            paid: invoice.paid,
            add_date: invoice.add_date,
            paid_date: invoice.paid_date,
            company,
        }
    }
}

/// Body of `POST /invoices`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewInvoice {
    #[serde(default)]
    pub comp_code: String,
    #[serde(default)]
    pub amt: Option<f64>,
}

/// Body of `PUT /invoices/{id}`
///
/// Both fields are always re-supplied by the caller.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct InvoiceChanges {
    pub amt: f64,
    pub paid: bool,
}

/// An invoice update as handed to the store
///
/// The store resolves the payment transition against the row it holds at
/// write time, so the read and the write cannot interleave with another
/// update. `today` is only used on Unpaid → Paid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvoiceWrite {
    pub amt: f64,
    pub paid: bool,
    pub today: NaiveDate,
}

impl InvoiceWrite {
    pub fn new(changes: InvoiceChanges, today: NaiveDate) -> Self {
        Self {
            amt: changes.amt,
            paid: changes.paid,
            today,
        }
    }
}

// =============================================================================
// Payment state machine
// =============================================================================

/// Unpaid/Paid lifecycle of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentState {
    Unpaid,
    Paid { on: NaiveDate },
}

impl PaymentState {
    /// Apply a requested `paid` flag
    ///
    /// `paid_date` is stamped with `today` exactly on Unpaid → Paid and
    /// cleared on Paid → Unpaid. Paid → Paid keeps the original date.
    pub fn transition(self, paid: bool, today: NaiveDate) -> PaymentState {
        match (self, paid) {
            (PaymentState::Unpaid, true) => PaymentState::Paid { on: today },
            (PaymentState::Paid { on }, true) => PaymentState::Paid { on },
            (_, false) => PaymentState::Unpaid,
        }
    }

    pub fn is_paid(&self) -> bool {
        matches!(self, PaymentState::Paid { .. })
    }

    pub fn paid_date(&self) -> Option<NaiveDate> {
        match self {
            PaymentState::Paid { on } => Some(*on),
            PaymentState::Unpaid => None,
        }
    }
}
