//! # Domain Types
//!
//! Core domain types used throughout StockMate.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Sale       │   │    SaleItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  product_id     │       │
//! │  │  name, category │   │  items [...]    │   │  name (frozen)  │       │
//! │  │  prices (paise) │   │  subtotal/tax   │   │  qty × price    │       │
//! │  │  quantity       │   │  operator_id    │   │  line total     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐                                                    │
//! │  │    TaxRate      │                                                    │
//! │  │  ─────────────  │                                                    │
//! │  │  bps (u32)      │                                                    │
//! │  │  1800 = 18%     │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A `Sale` never references live catalog rows: each `SaleItem` carries the
//! product name and unit price frozen at checkout. Deleting a product later
//! cannot corrupt historical sales.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1800 bps = 18% (standard GST rate)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog - the single source of truth for available stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v4), assigned at creation.
    pub id: String,

    /// Display name shown on the grid and frozen onto sale items.
    pub name: String,

    /// Category label used for filtering and search.
    pub category: String,

    /// Purchase (cost) price in paise. Used for profit reporting.
    pub purchase_price_paise: i64,

    /// Selling price in paise. Snapshotted onto cart lines when added.
    pub selling_price_paise: i64,

    /// Quantity on hand. Never negative; decremented only by checkout
    /// or explicit stock operations.
    pub quantity: i64,

    /// Barcode (8-18 characters when present).
    pub barcode: Option<String>,

    /// When the product was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the selling price as a Money type.
    #[inline]
    pub fn selling_price(&self) -> Money {
        Money::from_paise(self.selling_price_paise)
    }

    /// Returns the purchase price as a Money type.
    #[inline]
    pub fn purchase_price(&self) -> Money {
        Money::from_paise(self.purchase_price_paise)
    }

    /// Profit per unit at current prices (may be negative - the selling
    /// price floor is a form-level rule, not a data-layer constraint).
    #[inline]
    pub fn unit_margin(&self) -> Money {
        self.selling_price() - self.purchase_price()
    }

    /// Checks whether the requested quantity can be served from stock.
    pub fn in_stock(&self, quantity: i64) -> bool {
        self.quantity >= quantity
    }

    /// Checks whether stock is below the given alert threshold.
    pub fn is_low_stock(&self, threshold: i64) -> bool {
        self.quantity < threshold
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A committed sale transaction.
///
/// ## Immutability
/// A `Sale` is constructed exactly once, at checkout, and appended to the
/// ledger. Nothing in this workspace exposes a way to mutate one afterwards;
/// its totals always equal the sum of its line totals plus tax.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    /// Unique identifier (UUID v4), assigned at checkout.
    pub id: String,

    /// Ordered line items, all frozen snapshots.
    pub items: Vec<SaleItem>,

    /// Sum of line totals, in paise.
    pub subtotal_paise: i64,

    /// Tax rate applied, in basis points. 0 when tax was disabled.
    pub tax_rate_bps: u32,

    /// Tax amount in paise.
    pub tax_paise: i64,

    /// Grand total (subtotal + tax) in paise.
    pub total_paise: i64,

    /// When the sale was committed.
    #[ts(as = "String")]
    pub sold_at: DateTime<Utc>,

    /// Operator (cashier) who rang up the sale.
    pub operator_id: String,
}

impl Sale {
    /// Returns the subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_paise(self.subtotal_paise)
    }

    /// Returns the tax amount as Money.
    #[inline]
    pub fn tax(&self) -> Money {
        Money::from_paise(self.tax_paise)
    }

    /// Returns the grand total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_paise(self.total_paise)
    }

    /// Total units sold across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

// =============================================================================
// Sale Item
// =============================================================================

/// A line item in a committed sale.
/// Uses snapshot pattern to freeze product data at time of sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    /// Product the line referred to (may since be deleted from the catalog).
    pub product_id: String,

    /// Product name at time of sale (frozen).
    pub name: String,

    /// Quantity sold.
    pub quantity: i64,

    /// Unit price in paise at time of sale (frozen).
    pub unit_price_paise: i64,

    /// Line total (unit_price × quantity).
    pub line_total_paise: i64,
}

impl SaleItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_paise(self.unit_price_paise)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_paise(self.line_total_paise)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(1800);
        assert_eq!(rate.bps(), 1800);
        assert!((rate.percentage() - 18.0).abs() < 0.001);
    }

    #[test]
    fn test_tax_rate_from_percentage() {
        let rate = TaxRate::from_percentage(18.0);
        assert_eq!(rate.bps(), 1800);
    }

    #[test]
    fn test_product_stock_checks() {
        let now = Utc::now();
        let product = Product {
            id: "p-1".to_string(),
            name: "Basmati Rice 1kg".to_string(),
            category: "Grocery".to_string(),
            purchase_price_paise: 9000,
            selling_price_paise: 12000,
            quantity: 4,
            barcode: None,
            created_at: now,
            updated_at: now,
        };

        assert!(product.in_stock(4));
        assert!(!product.in_stock(5));
        assert!(product.is_low_stock(5));
        assert!(!product.is_low_stock(4));
        assert_eq!(product.unit_margin().paise(), 3000);
    }

    #[test]
    fn test_sale_total_quantity() {
        let sale = Sale {
            id: "s-1".to_string(),
            items: vec![
                SaleItem {
                    product_id: "p-1".to_string(),
                    name: "A".to_string(),
                    quantity: 2,
                    unit_price_paise: 15000,
                    line_total_paise: 30000,
                },
                SaleItem {
                    product_id: "p-2".to_string(),
                    name: "B".to_string(),
                    quantity: 1,
                    unit_price_paise: 28000,
                    line_total_paise: 28000,
                },
            ],
            subtotal_paise: 58000,
            tax_rate_bps: 1800,
            tax_paise: 10440,
            total_paise: 68440,
            sold_at: Utc::now(),
            operator_id: "cashier-1".to_string(),
        };

        assert_eq!(sale.total_quantity(), 3);
        assert_eq!(sale.total().paise(), 68440);
    }
}
