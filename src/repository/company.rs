//! Company records keyed by their normalized code

use crate::core::error::{BizResult, EntityError, ValidationError};
use crate::core::model::{Company, CompanyChanges, CompanyDetail, CompanySummary, NewCompany};
use crate::core::slug;
use crate::core::store::RecordStore;
use std::sync::Arc;

const ENTITY: &str = "company";
const KEY: &str = "code";
const CREATE_PARAMS: &[&str] = &["code", "name", "description"];

/// CRUD over companies
///
/// Every incoming code goes through [`slug::normalize`] before it reaches the
/// store, so `"Apple Inc!"` and `"apple-inc"` address the same record.
#[derive(Clone)]
pub struct CompanyRepository {
    store: Arc<dyn RecordStore>,
}

impl CompanyRepository {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// `(code, name)` of every company, ordered by code then name
    pub async fn list_all(&self) -> BizResult<Vec<CompanySummary>> {
        Ok(self.store.list_companies().await?)
    }

    pub async fn get_by_code(&self, code: &str) -> BizResult<Company> {
        let code = slug::normalize(code);
        self.store
            .fetch_company(&code)
            .await?
            .ok_or_else(|| EntityError::not_found(ENTITY, KEY, &code).into())
    }

    /// The company plus the ids of the invoices billed against it
    pub async fn get_detail(&self, code: &str) -> BizResult<CompanyDetail> {
        let company = self.get_by_code(code).await?;
        let invoices = self.store.list_company_invoice_ids(&company.code).await?;
        Ok(CompanyDetail::new(company, invoices))
    }

    pub async fn create(&self, input: NewCompany) -> BizResult<Company> {
        let code = slug::normalize(&input.code);

        let mut missing = Vec::new();
        if code.is_empty() {
            missing.push("code");
        }
        if input.name.trim().is_empty() {
            missing.push("name");
        }
        if input.description.trim().is_empty() {
            missing.push("description");
        }
        if !missing.is_empty() {
            return Err(ValidationError::missing(&missing, CREATE_PARAMS).into());
        }

        tracing::debug!(raw = %input.code, code = %code, "creating company");

        let company = self
            .store
            .insert_company(Company {
                code,
                name: input.name,
                description: Some(input.description),
            })
            .await?;

        Ok(company)
    }

    /// Overwrite name and description; the code itself never changes
    pub async fn update(&self, code: &str, changes: CompanyChanges) -> BizResult<Company> {
        if changes.name.trim().is_empty() {
            return Err(ValidationError::FieldError {
                field: "name".to_string(),
                message: "must not be empty".to_string(),
            }
            .into());
        }

        let code = slug::normalize(code);
        tracing::debug!(code = %code, "updating company");

        self.store
            .update_company(&code, &changes.name, changes.description.as_deref())
            .await?
            .ok_or_else(|| EntityError::unmatched(ENTITY, KEY, &code, "update").into())
    }

    pub async fn delete(&self, code: &str) -> BizResult<()> {
        let code = slug::normalize(code);
        tracing::debug!(code = %code, "deleting company");

        match self.store.delete_company(&code).await? {
            0 => Err(EntityError::unmatched(ENTITY, KEY, &code, "delete").into()),
            _ => Ok(()),
        }
    }
}
