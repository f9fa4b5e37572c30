//! # Register
//!
//! The cart session: mutations against the sale in progress, each one
//! validated against the LIVE catalog.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Register Lifecycle                                   │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│Committed │       │
//! │  │  Cart    │     │          │     │ (§sale)  │     │   Sale   │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                                │
//! │                   add_to_cart                                           │
//! │                   update_cart_line                                      │
//! │                   remove_from_cart                                      │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────►                   │
//! │                                                      (back to empty)   │
//! │                                                                         │
//! │  Every quantity mutation re-fetches the product from the catalog       │
//! │  first - the stock check runs against what is on hand NOW, not         │
//! │  against the ceiling captured when the line was created.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! The cart lives in `Arc<Mutex<Cart>>`. Operations are quick and the lock
//! is never held across an await, so a plain std mutex is sufficient.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::debug;

use crate::error::PosResult;
use stockmate_core::cart::{Cart, CartLine};
use stockmate_core::pricing::{compute_totals, CartTotals};
use stockmate_core::types::TaxRate;
use stockmate_core::CoreError;
use stockmate_store::ProductCatalog;

/// Cart view handed to callers: lines plus computed totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
}

/// The cart session service.
#[derive(Debug, Clone)]
pub struct Register {
    catalog: ProductCatalog,
    cart: Arc<Mutex<Cart>>,
    tax_rate: TaxRate,
}

impl Register {
    /// Creates a register over the shared cart and catalog handles.
    pub fn new(catalog: ProductCatalog, cart: Arc<Mutex<Cart>>, tax_rate: TaxRate) -> Self {
        Register {
            catalog,
            cart,
            tax_rate,
        }
    }

    /// Adds a product to the cart (or merges into its existing line).
    ///
    /// ## Behavior
    /// 1. Fetch the product from the catalog - `ProductNotFound` if the id
    ///    doesn't resolve
    /// 2. The cumulative quantity is checked against CURRENT stock
    /// 3. Price and name are frozen onto the line at this moment
    pub async fn add_to_cart(&self, product_id: &str, quantity: i64) -> PosResult<()> {
        debug!(product_id = %product_id, quantity = quantity, "add_to_cart");

        let product = self
            .catalog
            .get(product_id)
            .await
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

        let mut cart = self.cart.lock().expect("Cart mutex poisoned");
        cart.add_line(&product, quantity)?;
        Ok(())
    }

    /// Sets a line's quantity, re-validated against current stock.
    ///
    /// ## Behavior
    /// - Quantity <= 0 folds into removal (same end state as
    ///   `remove_from_cart`), with no catalog round trip
    /// - Otherwise the product is re-fetched and the new quantity checked
    ///   against what is on hand now
    pub async fn update_cart_line(&self, product_id: &str, quantity: i64) -> PosResult<()> {
        debug!(product_id = %product_id, quantity = quantity, "update_cart_line");

        if quantity <= 0 {
            self.remove_from_cart(product_id);
            return Ok(());
        }

        let product = self
            .catalog
            .get(product_id)
            .await
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

        let mut cart = self.cart.lock().expect("Cart mutex poisoned");
        cart.update_quantity(&product, quantity)?;
        Ok(())
    }

    /// Removes a line. No-op (not an error) when the product is not in the
    /// cart.
    pub fn remove_from_cart(&self, product_id: &str) {
        debug!(product_id = %product_id, "remove_from_cart");

        let mut cart = self.cart.lock().expect("Cart mutex poisoned");
        cart.remove_line(product_id);
    }

    /// Empties the cart. Idempotent; used for explicit cancellation.
    pub fn clear_cart(&self) {
        debug!("clear_cart");

        let mut cart = self.cart.lock().expect("Cart mutex poisoned");
        cart.clear();
    }

    /// Returns the current lines with totals computed for the given tax
    /// toggle state. Recomputed on every call - totals are derived state.
    pub fn view(&self, tax_enabled: bool) -> CartView {
        let cart = self.cart.lock().expect("Cart mutex poisoned");
        CartView {
            totals: compute_totals(&cart.lines, self.tax_rate, tax_enabled),
            lines: cart.lines.clone(),
        }
    }

    /// Returns a snapshot of the current lines.
    pub fn lines(&self) -> Vec<CartLine> {
        self.cart.lock().expect("Cart mutex poisoned").lines.clone()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.cart.lock().expect("Cart mutex poisoned").is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use stockmate_store::{ChangeFeed, JsonStore, NewProduct, StoreConfig};

    async fn register_with_product(quantity: i64) -> (Register, String) {
        let kv = JsonStore::open(StoreConfig::ephemeral()).await.unwrap();
        let catalog = ProductCatalog::open(kv, ChangeFeed::new()).await.unwrap();
        let product = catalog
            .insert(NewProduct {
                name: "Basmati Rice 1kg".to_string(),
                category: "Grocery".to_string(),
                purchase_price_paise: 9000,
                selling_price_paise: 12000,
                quantity,
                barcode: None,
            })
            .await
            .unwrap();

        let register = Register::new(
            catalog,
            Arc::new(Mutex::new(Cart::new())),
            TaxRate::from_bps(1800),
        );
        (register, product.id)
    }

    #[tokio::test]
    async fn test_add_to_cart_and_view() {
        let (register, id) = register_with_product(10).await;

        register.add_to_cart(&id, 2).await.unwrap();

        let view = register.view(true);
        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.totals.subtotal_paise, 24000);
        assert_eq!(view.totals.tax_paise, 4320); // 18% of ₹240.00
        assert_eq!(view.totals.total_paise, 28320);
    }

    #[tokio::test]
    async fn test_add_unknown_product() {
        let (register, _) = register_with_product(10).await;

        let err = register.add_to_cart("ghost", 1).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ProductNotFound);
        assert!(register.is_empty());
    }

    #[tokio::test]
    async fn test_add_over_stock_leaves_cart_unchanged() {
        let (register, id) = register_with_product(3).await;

        register.add_to_cart(&id, 2).await.unwrap();
        let err = register.add_to_cart(&id, 2).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InsufficientStock);

        // The existing line was not mutated
        assert_eq!(register.lines()[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_update_against_live_stock() {
        let (register, id) = register_with_product(10).await;
        register.add_to_cart(&id, 2).await.unwrap();

        // Stock moves underneath the cart (another screen sold some)
        register.catalog.set_stock(&id, 1).await.unwrap();

        let err = register.update_cart_line(&id, 2).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InsufficientStock);

        register.update_cart_line(&id, 1).await.unwrap();
        assert_eq!(register.lines()[0].quantity, 1);
    }

    #[tokio::test]
    async fn test_update_zero_removes_line() {
        let (register, id) = register_with_product(10).await;
        register.add_to_cart(&id, 2).await.unwrap();

        register.update_cart_line(&id, 0).await.unwrap();
        assert!(register.is_empty());
    }

    #[tokio::test]
    async fn test_remove_and_clear_are_idempotent() {
        let (register, id) = register_with_product(10).await;

        register.remove_from_cart(&id); // absent: no-op
        register.clear_cart(); // empty: no-op

        register.add_to_cart(&id, 1).await.unwrap();
        register.clear_cart();
        assert!(register.is_empty());
    }

    #[tokio::test]
    async fn test_view_respects_tax_toggle() {
        let (register, id) = register_with_product(10).await;
        register.add_to_cart(&id, 1).await.unwrap();

        let with_tax = register.view(true);
        let without_tax = register.view(false);

        assert_eq!(with_tax.totals.subtotal_paise, without_tax.totals.subtotal_paise);
        assert!(with_tax.totals.tax_paise > 0);
        assert_eq!(without_tax.totals.tax_paise, 0);
        assert_eq!(without_tax.totals.tax_rate_bps, 0);
    }
}
