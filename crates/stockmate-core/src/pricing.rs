//! # Pricing Module
//!
//! Computes subtotal, tax, and grand total for a cart snapshot.
//!
//! ## Derivation Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Pricing Pipeline                                     │
//! │                                                                         │
//! │  lines: [(qty, unit price), ...]        tax toggle + configured rate   │
//! │       │                                          │                      │
//! │       ▼                                          │                      │
//! │  subtotal = Σ qty × price   (exact integer sum)  │                      │
//! │       │                                          │                      │
//! │       ▼                                          ▼                      │
//! │  tax = enabled ? subtotal.calculate_tax(rate) : ₹0.00                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  total = subtotal + tax                                                │
//! │                                                                         │
//! │  Rounding happens once, inside calculate_tax. Intermediate values      │
//! │  are exact, so totals never drift from Σ line totals + tax.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The function is stateless: it is re-run on every cart change and at
//! checkout, and always produces the same totals for the same snapshot.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::CartLine;
use crate::money::Money;
use crate::types::TaxRate;

// =============================================================================
// Cart Totals
// =============================================================================

/// Computed totals for a cart snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Number of unique lines.
    pub line_count: usize,

    /// Total units across all lines.
    pub total_quantity: i64,

    /// Sum of line totals, in paise.
    pub subtotal_paise: i64,

    /// Tax rate that was applied, in basis points (0 when disabled).
    pub tax_rate_bps: u32,

    /// Tax amount in paise.
    pub tax_paise: i64,

    /// Grand total (subtotal + tax) in paise.
    pub total_paise: i64,
}

impl CartTotals {
    /// Totals for an empty cart.
    pub fn empty() -> Self {
        CartTotals {
            line_count: 0,
            total_quantity: 0,
            subtotal_paise: 0,
            tax_rate_bps: 0,
            tax_paise: 0,
            total_paise: 0,
        }
    }
}

/// Computes totals for a set of cart lines.
///
/// ## Arguments
/// * `lines` - The cart snapshot
/// * `tax_rate` - The configured tax rate (e.g., 18% GST)
/// * `tax_enabled` - The billing screen's tax toggle; when off, the recorded
///   rate is 0 bps and no tax is charged
///
/// ## Example
/// ```rust
/// use stockmate_core::cart::CartLine;
/// use stockmate_core::pricing::compute_totals;
/// use stockmate_core::types::TaxRate;
///
/// let lines = vec![
///     CartLine {
///         product_id: "p-1".into(),
///         name: "A".into(),
///         quantity: 2,
///         unit_price_paise: 15000,
///         available_quantity: 10,
///     },
///     CartLine {
///         product_id: "p-2".into(),
///         name: "B".into(),
///         quantity: 1,
///         unit_price_paise: 28000,
///         available_quantity: 10,
///     },
/// ];
///
/// let totals = compute_totals(&lines, TaxRate::from_bps(1800), true);
/// assert_eq!(totals.subtotal_paise, 58000); // ₹580.00
/// assert_eq!(totals.tax_paise, 10440);      // ₹104.40
/// assert_eq!(totals.total_paise, 68440);    // ₹684.40
/// ```
pub fn compute_totals(lines: &[CartLine], tax_rate: TaxRate, tax_enabled: bool) -> CartTotals {
    let subtotal_paise: i64 = lines.iter().map(|l| l.line_total_paise()).sum();
    let subtotal = Money::from_paise(subtotal_paise);

    let applied_rate = if tax_enabled { tax_rate } else { TaxRate::zero() };
    let tax = subtotal.calculate_tax(applied_rate);

    CartTotals {
        line_count: lines.len(),
        total_quantity: lines.iter().map(|l| l.quantity).sum(),
        subtotal_paise,
        tax_rate_bps: applied_rate.bps(),
        tax_paise: tax.paise(),
        total_paise: (subtotal + tax).paise(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
