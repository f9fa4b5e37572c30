//! # Checkout
//!
//! The reconciler: converts a validated cart into a committed sale and
//! decremented stock.
//!
//! ## Commit Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Pipeline                                    │
//! │                                                                         │
//! │  1. Snapshot cart lines           empty ──► EmptyCart, no side effects │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  2. Compute totals, build the immutable Sale (fresh id, frozen lines)  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  3. catalog.deduct_for_sale(items)                                     │
//! │     ├── validates EVERY line against CURRENT stock first               │
//! │     ├── any offender ──► InsufficientStock, NOTHING mutated            │
//! │     └── then decrements all + persists, in one lock scope              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  4. ledger.append(sale)                                                │
//! │     └── write failed ──► restock the deducted lines (compensation),    │
//! │                          surface PersistenceFailure, cart kept         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  5. Clear the cart                                                     │
//! │  6. Return the Sale (receipt rendering is the caller's concern)        │
//! │                                                                         │
//! │  Validate-then-commit: no rollback machinery is needed for validation  │
//! │  failures because no partial mutation ever occurs.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::error::PosResult;
use stockmate_core::cart::Cart;
use stockmate_core::pricing::compute_totals;
use stockmate_core::types::{Sale, SaleItem, TaxRate};
use stockmate_core::CoreError;
use stockmate_store::{ProductCatalog, SalesLedger};

/// The checkout reconciler.
#[derive(Debug, Clone)]
pub struct Checkout {
    catalog: ProductCatalog,
    ledger: SalesLedger,
    cart: Arc<Mutex<Cart>>,
    tax_rate: TaxRate,
}

impl Checkout {
    /// Creates a reconciler over the shared handles.
    pub fn new(
        catalog: ProductCatalog,
        ledger: SalesLedger,
        cart: Arc<Mutex<Cart>>,
        tax_rate: TaxRate,
    ) -> Self {
        Checkout {
            catalog,
            ledger,
            cart,
            tax_rate,
        }
    }

    /// Commits the cart as a sale.
    ///
    /// ## Arguments
    /// * `operator_id` - The cashier ringing up the sale (from the identity
    ///   provider; opaque here)
    /// * `tax_enabled` - The billing screen's tax toggle
    ///
    /// ## Failure Semantics
    /// Validation failures (`EmptyCart`, `InsufficientStock`) leave catalog,
    /// ledger, and cart untouched; the caller can adjust the cart and retry.
    /// A ledger persistence failure after the stock deduction is compensated
    /// by restocking before the error is surfaced.
    pub async fn checkout(&self, operator_id: &str, tax_enabled: bool) -> PosResult<Sale> {
        let lines = {
            let cart = self.cart.lock().expect("Cart mutex poisoned");
            cart.lines.clone()
        };

        if lines.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }

        let totals = compute_totals(&lines, self.tax_rate, tax_enabled);

        let items: Vec<SaleItem> = lines
            .iter()
            .map(|line| SaleItem {
                product_id: line.product_id.clone(),
                name: line.name.clone(),
                quantity: line.quantity,
                unit_price_paise: line.unit_price_paise,
                line_total_paise: line.line_total_paise(),
            })
            .collect();

        let sale = Sale {
            id: Uuid::new_v4().to_string(),
            items,
            subtotal_paise: totals.subtotal_paise,
            tax_rate_bps: totals.tax_rate_bps,
            tax_paise: totals.tax_paise,
            total_paise: totals.total_paise,
            sold_at: Utc::now(),
            operator_id: operator_id.to_string(),
        };

        // All-or-nothing: validates every line against current stock, then
        // decrements and persists under one lock. On failure nothing moved.
        self.catalog.deduct_for_sale(&sale.items).await?;

        if let Err(append_err) = self.ledger.append(sale.clone()).await {
            warn!(
                sale_id = %sale.id,
                error = %append_err,
                "Ledger append failed after stock deduction; restocking"
            );
            if let Err(restock_err) = self.catalog.restock(&sale.items).await {
                error!(
                    sale_id = %sale.id,
                    error = %restock_err,
                    "Compensating restock failed; catalog and ledger disagree"
                );
            }
            return Err(append_err.into());
        }

        self.cart.lock().expect("Cart mutex poisoned").clear();

        info!(
            sale_id = %sale.id,
            operator_id = %operator_id,
            total = sale.total_paise,
            lines = sale.items.len(),
            "Sale committed"
        );

        Ok(sale)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::register::Register;
    use stockmate_core::Product;
    use stockmate_store::{NewProduct, Store, StoreConfig};

    struct Fixture {
        register: Register,
        checkout: Checkout,
        store: Store,
    }

    async fn fixture() -> Fixture {
        let store = Store::open(StoreConfig::ephemeral()).await.unwrap();
        let cart = Arc::new(Mutex::new(Cart::new()));
        let rate = TaxRate::from_bps(1800);

        Fixture {
            register: Register::new(store.catalog().clone(), cart.clone(), rate),
            checkout: Checkout::new(
                store.catalog().clone(),
                store.ledger().clone(),
                cart,
                rate,
            ),
            store,
        }
    }

    async fn seed(store: &Store, name: &str, selling_paise: i64, quantity: i64) -> Product {
        store
            .catalog()
            .insert(NewProduct {
                name: name.to_string(),
                category: "Grocery".to_string(),
                purchase_price_paise: selling_paise / 2,
                selling_price_paise: selling_paise,
                quantity,
                barcode: None,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_empty_cart_checkout_is_a_noop() {
        let fx = fixture().await;

        let err = fx.checkout.checkout("cashier-1", true).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::EmptyCart);
        assert!(fx.store.ledger().is_empty().await);
    }

    #[tokio::test]
    async fn test_successful_checkout_commit() {
        let fx = fixture().await;
        let product = seed(&fx.store, "SKU-A", 10000, 10).await;

        fx.register.add_to_cart(&product.id, 3).await.unwrap();
        let sale = fx.checkout.checkout("cashier-1", false).await.unwrap();

        // Stock decremented: 10 - 3 = 7
        assert_eq!(
            fx.store.catalog().get(&product.id).await.unwrap().quantity,
            7
        );
        // Sale appended with the expected subtotal
        assert_eq!(sale.subtotal_paise, 30000);
        assert_eq!(sale.operator_id, "cashier-1");
        assert_eq!(fx.store.ledger().len().await, 1);
        assert_eq!(fx.store.ledger().all().await[0], sale);
        // Cart cleared
        assert!(fx.register.is_empty());
    }

    #[tokio::test]
    async fn test_checkout_totals_with_gst() {
        let fx = fixture().await;
        let a = seed(&fx.store, "A", 15000, 10).await;
        let b = seed(&fx.store, "B", 28000, 10).await;

        fx.register.add_to_cart(&a.id, 2).await.unwrap();
        fx.register.add_to_cart(&b.id, 1).await.unwrap();

        let sale = fx.checkout.checkout("cashier-1", true).await.unwrap();

        assert_eq!(sale.subtotal_paise, 58000); // ₹580.00
        assert_eq!(sale.tax_rate_bps, 1800);
        assert_eq!(sale.tax_paise, 10440); // ₹104.40
        assert_eq!(sale.total_paise, 68440); // ₹684.40
        // Totals equal the sum of line totals plus tax, exactly
        let line_sum: i64 = sale.items.iter().map(|i| i.line_total_paise).sum();
        assert_eq!(sale.total_paise, line_sum + sale.tax_paise);
    }

    #[tokio::test]
    async fn test_failed_validation_mutates_nothing() {
        let fx = fixture().await;
        let a = seed(&fx.store, "A", 10000, 10).await;
        let b = seed(&fx.store, "B", 5000, 5).await;

        fx.register.add_to_cart(&a.id, 2).await.unwrap();
        fx.register.add_to_cart(&b.id, 4).await.unwrap();

        // Stock for B shrinks below the cart's quantity before checkout
        fx.store.catalog().set_stock(&b.id, 1).await.unwrap();

        let catalog_before = fx.store.catalog().list().await;
        let cart_before = fx.register.lines();

        let err = fx.checkout.checkout("cashier-1", true).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InsufficientStock);

        // Catalog, ledger, and cart are all byte-for-byte unchanged
        assert_eq!(fx.store.catalog().list().await, catalog_before);
        assert!(fx.store.ledger().is_empty().await);
        assert_eq!(fx.register.lines(), cart_before);
    }

    #[tokio::test]
    async fn test_checkout_names_first_offending_product() {
        let fx = fixture().await;
        let a = seed(&fx.store, "A", 10000, 10).await;
        let b = seed(&fx.store, "B", 5000, 5).await;

        fx.register.add_to_cart(&a.id, 2).await.unwrap();
        fx.register.add_to_cart(&b.id, 4).await.unwrap();
        fx.store.catalog().set_stock(&b.id, 1).await.unwrap();

        let err = fx.checkout.checkout("cashier-1", true).await.unwrap_err();
        match err {
            crate::error::PosError::Core(CoreError::InsufficientStock {
                product_id,
                available,
                requested,
            }) => {
                assert_eq!(product_id, b.id);
                assert_eq!(available, 1);
                assert_eq!(requested, 4);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_sale_snapshots_survive_product_deletion() {
        let fx = fixture().await;
        let product = seed(&fx.store, "Doomed", 9900, 5).await;

        fx.register.add_to_cart(&product.id, 1).await.unwrap();
        let sale = fx.checkout.checkout("cashier-1", false).await.unwrap();

        fx.store.catalog().delete(&product.id).await.unwrap();

        // The ledger still carries the frozen name and price
        let recorded = &fx.store.ledger().all().await[0];
        assert_eq!(recorded, &sale);
        assert_eq!(recorded.items[0].name, "Doomed");
        assert_eq!(recorded.items[0].unit_price_paise, 9900);
    }

    #[tokio::test]
    async fn test_retry_after_adjusting_cart_succeeds() {
        let fx = fixture().await;
        let product = seed(&fx.store, "A", 10000, 2).await;

        fx.register.add_to_cart(&product.id, 2).await.unwrap();
        fx.store.catalog().set_stock(&product.id, 1).await.unwrap();

        assert!(fx.checkout.checkout("cashier-1", false).await.is_err());

        // Operator clamps the quantity and retries
        fx.register.update_cart_line(&product.id, 1).await.unwrap();
        let sale = fx.checkout.checkout("cashier-1", false).await.unwrap();

        assert_eq!(sale.items[0].quantity, 1);
        assert_eq!(
            fx.store.catalog().get(&product.id).await.unwrap().quantity,
            0
        );
    }
}
