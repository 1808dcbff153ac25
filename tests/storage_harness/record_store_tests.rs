//! Macro-generated test suite for `RecordStore` contract validation.
//!
//! # Generated Tests
//!
//! ## Companies
//! - `test_insert_and_fetch_company`: insert then fetch, all columns round-trip
//! - `test_fetch_company_missing`: unknown code → None
//! - `test_insert_duplicate_company`: same code twice → integrity error
//! - `test_list_companies_ordered`: ordered by code
//! - `test_update_company`: overwrites name and description, keeps code
//! - `test_update_company_missing`: unknown code → None
//! - `test_delete_company`: 1 row, then 0 rows
//!
//! ## Invoices
//! - `test_insert_invoice_defaults`: unpaid, no paid_date, store-assigned id
//! - `test_insert_invoice_keeps_given_add_date`: add_date stored as passed
//! - `test_insert_invoice_unknown_company`: foreign key → integrity error
//! - `test_insert_invoice_non_positive_amount`: check constraint → integrity error
//! - `test_list_invoices_ordered`: ordered by id
//! - `test_update_invoice_columns`: amt written, paid_date stamped and cleared
//! - `test_update_invoice_paid_keeps_date`: paying a paid invoice keeps its date
//! - `test_paid_date_not_before_add_date`: pay right after create, same day
//! - `test_update_invoice_missing`: unknown id → None
//! - `test_delete_invoice`: 1 row, then 0 rows
//! - `test_company_invoice_ids`: ids of one company only, ascending
//! - `test_delete_company_with_invoices_restricted`: integrity error, nothing removed

/// Generate a full `RecordStore` conformance test suite.
///
/// `$factory` must be an expression that evaluates to an empty store
/// implementing `RecordStore`. It is re-evaluated for each test.
#[macro_export]
macro_rules! record_store_tests {
    ($factory:expr) => {
        mod record_store_contract_tests {
            use super::*;
            use biztime::core::{RecordStore, StorageError};

            fn is_integrity(err: &StorageError) -> bool {
                matches!(err, StorageError::IntegrityError { .. })
            }

            // ==================================================================
            // Companies
            // ==================================================================

            #[tokio::test]
            async fn test_insert_and_fetch_company() {
                let store = $factory;

                let inserted = store.insert_company(apple()).await.unwrap();
                assert_eq!(inserted, apple());

                let fetched = store.fetch_company("apple").await.unwrap();
                assert_eq!(fetched, Some(apple()));
            }

            #[tokio::test]
            async fn test_fetch_company_missing() {
                let store = $factory;
                assert!(store.fetch_company("nope").await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_insert_duplicate_company() {
                let store = $factory;
                store.insert_company(apple()).await.unwrap();

                let err = store
                    .insert_company(company("apple", "Other", None))
                    .await
                    .unwrap_err();
                assert!(is_integrity(&err), "expected integrity error, got {:?}", err);
            }

            #[tokio::test]
            async fn test_list_companies_ordered() {
                let store = $factory;
                store.insert_company(ibm()).await.unwrap();
                store.insert_company(apple()).await.unwrap();
                store
                    .insert_company(company("acme", "Acme", None))
                    .await
                    .unwrap();

                let listed = store.list_companies().await.unwrap();
                let codes: Vec<&str> = listed.iter().map(|c| c.code.as_str()).collect();
                assert_eq!(codes, vec!["acme", "apple", "ibm"]);
                assert_eq!(listed[1].name, "Apple Computer");
            }

            #[tokio::test]
            async fn test_update_company() {
                let store = $factory;
                store.insert_company(apple()).await.unwrap();

                let updated = store
                    .update_company("apple", "Apple Inc", None)
                    .await
                    .unwrap()
                    .unwrap();
                assert_eq!(updated, company("apple", "Apple Inc", None));

                let fetched = store.fetch_company("apple").await.unwrap().unwrap();
                assert_eq!(fetched.name, "Apple Inc");
                assert!(fetched.description.is_none());
            }

            #[tokio::test]
            async fn test_update_company_missing() {
                let store = $factory;
                let updated = store
                    .update_company("nope", "Nope", Some("nothing"))
                    .await
                    .unwrap();
                assert!(updated.is_none());
            }

            #[tokio::test]
            async fn test_delete_company() {
                let store = $factory;
                store.insert_company(apple()).await.unwrap();

                assert_eq!(store.delete_company("apple").await.unwrap(), 1);
                assert_eq!(store.delete_company("apple").await.unwrap(), 0);
                assert!(store.fetch_company("apple").await.unwrap().is_none());
            }

            // ==================================================================
            // Invoices
            // ==================================================================

            #[tokio::test]
            async fn test_insert_invoice_defaults() {
                let store = $factory;
                store.insert_company(apple()).await.unwrap();

                let invoice = store.insert_invoice("apple", 100.0, test_today()).await.unwrap();
                assert_eq!(invoice.comp_code, "apple");
                assert_eq!(invoice.amt, 100.0);
                assert!(!invoice.paid);
                assert!(invoice.paid_date.is_none());

                assert_eq!(invoice.add_date, test_today());

                let fetched = store.fetch_invoice(invoice.id).await.unwrap();
                assert_eq!(fetched, Some(invoice));
            }

            #[tokio::test]
            async fn test_insert_invoice_keeps_given_add_date() {
                let store = $factory;
                store.insert_company(apple()).await.unwrap();

                let long_ago = chrono::NaiveDate::from_ymd_opt(2001, 2, 3).unwrap();
                let invoice = store.insert_invoice("apple", 10.0, long_ago).await.unwrap();
                assert_eq!(invoice.add_date, long_ago);

                let fetched = store.fetch_invoice(invoice.id).await.unwrap().unwrap();
                assert_eq!(fetched.add_date, long_ago);
            }

            #[tokio::test]
            async fn test_insert_invoice_unknown_company() {
                let store = $factory;

                let err = store.insert_invoice("nope", 10.0, test_today()).await.unwrap_err();
                assert!(is_integrity(&err), "expected integrity error, got {:?}", err);
                assert!(store.list_invoices().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_insert_invoice_non_positive_amount() {
                let store = $factory;
                store.insert_company(apple()).await.unwrap();

                let err = store.insert_invoice("apple", -1.0, test_today()).await.unwrap_err();
                assert!(is_integrity(&err), "expected integrity error, got {:?}", err);
            }

            #[tokio::test]
            async fn test_list_invoices_ordered() {
                let store = $factory;
                store.insert_company(apple()).await.unwrap();
                store.insert_company(ibm()).await.unwrap();

                let a = store.insert_invoice("apple", 100.0, test_today()).await.unwrap();
                let b = store.insert_invoice("ibm", 200.0, test_today()).await.unwrap();
                let c = store.insert_invoice("apple", 300.0, test_today()).await.unwrap();

                let ids: Vec<i32> = store
                    .list_invoices()
                    .await
                    .unwrap()
                    .into_iter()
                    .map(|inv| inv.id)
                    .collect();
                assert_eq!(ids, vec![a.id, b.id, c.id]);
                assert!(a.id < b.id && b.id < c.id);
            }

            #[tokio::test]
            async fn test_update_invoice_columns() {
                let store = $factory;
                store.insert_company(apple()).await.unwrap();
                let invoice = store.insert_invoice("apple", 100.0, test_today()).await.unwrap();

                let paid = store
                    .update_invoice(invoice.id, pay(250.0, test_today()))
                    .await
                    .unwrap()
                    .unwrap();
                assert_eq!(paid.amt, 250.0);
                assert!(paid.paid);
                assert_eq!(paid.paid_date, Some(test_today()));
                assert_eq!(paid.add_date, invoice.add_date);
                assert_eq!(paid.comp_code, "apple");

                let reverted = store
                    .update_invoice(invoice.id, unpay(250.0))
                    .await
                    .unwrap()
                    .unwrap();
                assert!(!reverted.paid);
                assert!(reverted.paid_date.is_none());
            }

            #[tokio::test]
            async fn test_update_invoice_paid_keeps_date() {
                let store = $factory;
                store.insert_company(apple()).await.unwrap();
                let invoice = store.insert_invoice("apple", 100.0, test_today()).await.unwrap();
                let later = test_today() + chrono::Days::new(10);

                store
                    .update_invoice(invoice.id, pay(100.0, test_today()))
                    .await
                    .unwrap();
                let again = store
                    .update_invoice(invoice.id, pay(120.0, later))
                    .await
                    .unwrap()
                    .unwrap();
                assert_eq!(again.paid_date, Some(test_today()));
                assert_eq!(again.amt, 120.0);

                store.update_invoice(invoice.id, unpay(120.0)).await.unwrap();
                let repaid = store
                    .update_invoice(invoice.id, pay(120.0, later))
                    .await
                    .unwrap()
                    .unwrap();
                assert_eq!(repaid.paid_date, Some(later));
            }

            #[tokio::test]
            async fn test_paid_date_not_before_add_date() {
                let store = $factory;
                store.insert_company(apple()).await.unwrap();

                let invoice = store.insert_invoice("apple", 100.0, test_today()).await.unwrap();
                let paid = store
                    .update_invoice(invoice.id, pay(100.0, test_today()))
                    .await
                    .unwrap()
                    .unwrap();

                let paid_date = paid.paid_date.unwrap();
                assert!(paid_date >= paid.add_date);
                assert_eq!(paid_date, invoice.add_date);
            }

            #[tokio::test]
            async fn test_update_invoice_missing() {
                let store = $factory;
                let updated = store.update_invoice(9999, unpay(1.0)).await.unwrap();
                assert!(updated.is_none());
            }

            #[tokio::test]
            async fn test_delete_invoice() {
                let store = $factory;
                store.insert_company(apple()).await.unwrap();
                let invoice = store.insert_invoice("apple", 100.0, test_today()).await.unwrap();

                assert_eq!(store.delete_invoice(invoice.id).await.unwrap(), 1);
                assert_eq!(store.delete_invoice(invoice.id).await.unwrap(), 0);
                assert!(store.fetch_invoice(invoice.id).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_company_invoice_ids() {
                let store = $factory;
                store.insert_company(apple()).await.unwrap();
                store.insert_company(ibm()).await.unwrap();

                let a = store.insert_invoice("apple", 1.0, test_today()).await.unwrap();
                store.insert_invoice("ibm", 2.0, test_today()).await.unwrap();
                let c = store.insert_invoice("apple", 3.0, test_today()).await.unwrap();

                let ids = store.list_company_invoice_ids("apple").await.unwrap();
                assert_eq!(ids, vec![a.id, c.id]);
                assert!(store.list_company_invoice_ids("nope").await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_delete_company_with_invoices_restricted() {
                let store = $factory;
                store.insert_company(apple()).await.unwrap();
                let invoice = store.insert_invoice("apple", 100.0, test_today()).await.unwrap();

                let err = store.delete_company("apple").await.unwrap_err();
                assert!(is_integrity(&err), "expected integrity error, got {:?}", err);

                assert!(store.fetch_company("apple").await.unwrap().is_some());
                assert!(store.fetch_invoice(invoice.id).await.unwrap().is_some());
            }
        }
    };
}
