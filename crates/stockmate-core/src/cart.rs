//! # Cart Module
//!
//! The in-progress sale: a set of line items validated against live stock.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  UI Action               Register call            Cart mutation        │
//! │  ─────────               ─────────────            ─────────────        │
//! │                                                                         │
//! │  Pick product ──────────► add_to_cart() ────────► add_line(&live, qty) │
//! │                                                                         │
//! │  Change quantity ───────► update_cart_line() ───► update_quantity()    │
//! │                                                                         │
//! │  Click remove ──────────► remove_from_cart() ───► remove_line()        │
//! │                                                                         │
//! │  Cancel sale ───────────► clear_cart() ─────────► clear()              │
//! │                                                                         │
//! │  NOTE: Every mutation that changes a quantity receives the product     │
//! │        freshly fetched from the catalog. Stock may have moved since    │
//! │        the line was created, so the check always runs against the      │
//! │        CURRENT quantity on hand, never the snapshot.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::Product;
use crate::validation::{validate_cart_size, validate_quantity};
use crate::MAX_LINE_QUANTITY;

// =============================================================================
// Cart Line
// =============================================================================

/// A line in the shopping cart.
///
/// ## Design Notes
/// - `product_id`: Reference to the product (for catalog lookup)
/// - `name` / `unit_price_paise`: Frozen copies taken when the line was
///   created. The cart displays consistent data even if the product is
///   renamed or re-priced afterwards.
/// - `available_quantity`: The stock ceiling observed at the last mutation.
///   Carried so the UI can clamp quantity inputs without a round trip; the
///   authoritative check always re-reads the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product id (UUID)
    pub product_id: String,

    /// Product name at time of adding (frozen)
    pub name: String,

    /// Quantity requested. Always >= 1 while the line exists.
    pub quantity: i64,

    /// Selling price in paise at time of adding (frozen)
    pub unit_price_paise: i64,

    /// Stock on hand observed at the last add/update, for client-side clamps.
    pub available_quantity: i64,
}

impl CartLine {
    /// Creates a new cart line from a product and quantity.
    ///
    /// ## Price Freezing
    /// The selling price is captured at this moment. If the product price
    /// changes in the catalog, this cart line retains the original price.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CartLine {
            product_id: product.id.clone(),
            name: product.name.clone(),
            quantity,
            unit_price_paise: product.selling_price_paise,
            available_quantity: product.quantity,
        }
    }

    /// Calculates the line total (unit price × quantity).
    pub fn line_total_paise(&self) -> i64 {
        self.unit_price_paise * self.quantity
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `product_id` (adding the same product merges)
/// - Line quantity is always >= 1 (setting quantity to 0 removes the line)
/// - A line's quantity never exceeds the product's stock at the moment of
///   the mutation that produced it
/// - Maximum unique lines: 100, maximum quantity per line: 999
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Lines in the cart
    pub lines: Vec<CartLine>,

    /// When the cart was created/last cleared
    pub created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds a product to the cart or increases quantity if already present.
    ///
    /// ## Behavior
    /// - The cumulative quantity (existing line + requested) is checked
    ///   against the product's CURRENT stock, not the snapshot ceiling
    /// - If product already in cart: increases quantity and refreshes the
    ///   availability ceiling
    /// - If product not in cart: adds a new snapshot line
    ///
    /// ## Errors
    /// - [`CoreError::InsufficientStock`] if the cumulative quantity exceeds
    ///   stock on hand
    /// - [`CoreError::QuantityTooLarge`] / [`CoreError::CartTooLarge`] on
    ///   the hard caps
    pub fn add_line(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)?;

        let cumulative = self.quantity_of(&product.id) + quantity;

        if cumulative > product.quantity {
            return Err(CoreError::InsufficientStock {
                product_id: product.id.clone(),
                available: product.quantity,
                requested: cumulative,
            });
        }

        if cumulative > MAX_LINE_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: cumulative,
                max: MAX_LINE_QUANTITY,
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            line.quantity = cumulative;
            line.available_quantity = product.quantity;
            return Ok(());
        }

        validate_cart_size(self.lines.len()).map_err(|_| CoreError::CartTooLarge {
            max: crate::MAX_CART_LINES,
        })?;

        self.lines.push(CartLine::from_product(product, quantity));
        Ok(())
    }

    /// Sets the quantity of a line, re-validated against current stock.
    ///
    /// ## Behavior
    /// - Quantity <= 0: removes the line (same end state as `remove_line`)
    /// - Product not in cart: no-op
    /// - Otherwise the new quantity must not exceed the product's CURRENT
    ///   stock - the catalog may have moved since the line was added
    pub fn update_quantity(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            self.remove_line(&product.id);
            return Ok(());
        }

        validate_quantity(quantity)?;

        if quantity > product.quantity {
            return Err(CoreError::InsufficientStock {
                product_id: product.id.clone(),
                available: product.quantity,
                requested: quantity,
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            line.quantity = quantity;
            line.available_quantity = product.quantity;
        }

        Ok(())
    }

    /// Removes a line by product id. No-op when the product is not in the
    /// cart - removal is idempotent, not an error.
    pub fn remove_line(&mut self, product_id: &str) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    /// Clears all lines from the cart. Idempotent.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.created_at = Utc::now();
    }

    /// Returns the quantity currently requested for a product (0 if absent).
    pub fn quantity_of(&self, product_id: &str) -> i64 {
        self.lines
            .iter()
            .find(|l| l.product_id == product_id)
            .map(|l| l.quantity)
            .unwrap_or(0)
    }

    /// Returns the number of unique lines in the cart.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Calculates the subtotal (before tax).
    pub fn subtotal_paise(&self) -> i64 {
        self.lines.iter().map(|l| l.line_total_paise()).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
