//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  In many retail systems:                                                │
//! │    ₹10.00 / 3 = ₹3.33 (×3 = ₹9.99)  → Lost ₹0.01!                      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    1000 paise / 3 = 333 paise (×3 = 999 paise)                         │
//! │    We KNOW we lost 1 paisa, and handle it explicitly                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rounding happens in exactly one place: [`Money::calculate_tax`]. Subtotals
//! and line totals are exact integer sums, so nothing compounds.
//!
//! ## Usage
//! ```rust
//! use stockmate_core::money::Money;
//!
//! // Create from paise (preferred)
//! let price = Money::from_paise(15000); // ₹150.00
//!
//! // Arithmetic operations
//! let doubled = price * 2i64;                   // ₹300.00
//! let total = doubled + Money::from_paise(28000); // ₹580.00
//! assert_eq!(total.paise(), 58000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (paise for INR).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for corrections and margins
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## User Workflow Context
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Money is Used                                  │
/// │                                                                         │
/// │  Product.selling_price ──┬──► CartLine.unit_price ──► line total       │
/// │                          │                                              │
/// │                          └──► Displayed as "₹150.00" in UI             │
/// │                                                                         │
/// │  Cart subtotal ──► GST Calculation ──► Grand total ──► Sale record    │
/// │                                                                         │
/// │  EVERY monetary value in the system flows through this type            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use stockmate_core::money::Money;
    ///
    /// let price = Money::from_paise(15000); // Represents ₹150.00
    /// assert_eq!(price.paise(), 15000);
    /// ```
    ///
    /// ## Why Paise?
    /// Using the smallest unit eliminates all floating-point concerns.
    /// The store, calculations, and API all use paise.
    /// Only the UI converts to rupees for display.
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from major and minor units (rupees and paise).
    ///
    /// ## Example
    /// ```rust
    /// use stockmate_core::money::Money;
    ///
    /// let price = Money::from_rupees(150, 0); // ₹150.00
    /// assert_eq!(price.paise(), 15000);
    ///
    /// let negative = Money::from_rupees(-5, 50); // -₹5.50 (correction)
    /// assert_eq!(negative.paise(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_rupees(-5, 50)` = -₹5.50, not -₹4.50
    #[inline]
    pub const fn from_rupees(major: i64, minor: i64) -> Self {
        // Handle sign: if major is negative, minor should subtract
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in paise (smallest currency unit).
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (rupees) portion.
    ///
    /// ## Example
    /// ```rust
    /// use stockmate_core::money::Money;
    ///
    /// let price = Money::from_paise(15099);
    /// assert_eq!(price.rupees(), 150);
    /// ```
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (paise) portion (always 0-99).
    ///
    /// ## Example
    /// ```rust
    /// use stockmate_core::money::Money;
    ///
    /// let price = Money::from_paise(15099);
    /// assert_eq!(price.paise_part(), 99);
    ///
    /// let negative = Money::from_paise(-550);
    /// assert_eq!(negative.paise_part(), 50); // Absolute value
    /// ```
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Calculates tax with half-up rounding.
    ///
    /// ## The One Rounding Point
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  ROUNDING DISCIPLINE                                                │
    /// │                                                                     │
    /// │  Subtotals are exact integer sums - they never round.              │
    /// │  Tax is the only derived fraction, so it is the only place         │
    /// │  rounding may occur. Rounding once here means errors cannot        │
    /// │  compound through intermediate steps.                              │
    /// │                                                                     │
    /// │  ₹580.00 × 18% = ₹104.40 exactly (58000 × 1800 / 10000 = 10440)   │
    /// │  ₹10.00  × 8.25% = ₹0.825 → ₹0.83 (half rounds up)                 │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Implementation
    /// We use integer math: `(amount * rate + 5000) / 10000`
    /// The +5000 provides rounding (5000/10000 = 0.5)
    ///
    /// ## Example
    /// ```rust
    /// use stockmate_core::money::Money;
    /// use stockmate_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_paise(58000); // ₹580.00
    /// let gst = TaxRate::from_bps(1800);       // 18%
    ///
    /// let tax = subtotal.calculate_tax(gst);
    /// assert_eq!(tax.paise(), 10440); // ₹104.40
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // Use i128 to prevent overflow on large amounts
        // rate.bps() is basis points: 1800 = 18%
        // Formula: amount_paise * bps / 10000
        // With rounding: (amount_paise * bps + 5000) / 10000
        let tax_paise = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_paise(tax_paise as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use stockmate_core::money::Money;
    ///
    /// let unit_price = Money::from_paise(15000); // ₹150.00
    /// let line_total = unit_price.multiply_quantity(2);
    /// assert_eq!(line_total.paise(), 30000); // ₹300.00
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and logs. Use `PosConfig::format_currency` for
/// display strings that honor the configured currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}₹{}.{:02}",
            sign,
            self.rupees().abs(),
            self.paise_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paise() {
        let money = Money::from_paise(15099);
        assert_eq!(money.paise(), 15099);
        assert_eq!(money.rupees(), 150);
        assert_eq!(money.paise_part(), 99);
    }

    #[test]
    fn test_from_rupees() {
        let money = Money::from_rupees(150, 99);
        assert_eq!(money.paise(), 15099);

        let negative = Money::from_rupees(-5, 50);
        assert_eq!(negative.paise(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_paise(15099)), "₹150.99");
        assert_eq!(format!("{}", Money::from_paise(500)), "₹5.00");
        assert_eq!(format!("{}", Money::from_paise(-550)), "-₹5.50");
        assert_eq!(format!("{}", Money::from_paise(0)), "₹0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_paise(1000);
        let b = Money::from_paise(500);

        assert_eq!((a + b).paise(), 1500);
        assert_eq!((a - b).paise(), 500);
        let result: Money = a * 3;
        assert_eq!(result.paise(), 3000);
    }

    #[test]
    fn test_gst_calculation_exact() {
        // ₹580.00 at 18% = ₹104.40 exactly - the billing reference vector
        let subtotal = Money::from_paise(58000);
        let rate = TaxRate::from_bps(1800);
        let tax = subtotal.calculate_tax(rate);
        assert_eq!(tax.paise(), 10440);
    }

    #[test]
    fn test_tax_calculation_with_rounding() {
        // ₹10.00 at 8.25% = ₹0.825 → ₹0.83 (half rounds up with +5000)
        let amount = Money::from_paise(1000);
        let rate = TaxRate::from_bps(825);
        let tax = amount.calculate_tax(rate);
        assert_eq!(tax.paise(), 83);
    }

    #[test]
    fn test_zero_tax_rate() {
        let amount = Money::from_paise(58000);
        let tax = amount.calculate_tax(TaxRate::zero());
        assert!(tax.is_zero());
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_paise(100);
        assert!(!positive.is_zero());
        assert!(positive.is_positive());
        assert!(!positive.is_negative());

        let negative = Money::from_paise(-100);
        assert!(!negative.is_zero());
        assert!(!negative.is_positive());
        assert!(negative.is_negative());
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_paise(15000);
        let line_total = unit_price.multiply_quantity(2);
        assert_eq!(line_total.paise(), 30000);
    }

    /// Critical test: Verify that ₹10.00 / 3 × 3 behaves as expected
    /// This documents the intentional precision loss
    #[test]
    fn test_division_precision_loss_documented() {
        let ten_rupees = Money::from_paise(1000);
        // If we split ₹10.00 three ways: ₹3.33 each
        let one_third = Money::from_paise(1000 / 3); // 333 paise
        let reconstructed: Money = one_third * 3; // 999 paise

        // We intentionally lose 1 paisa - this is documented behavior
        assert_eq!(reconstructed.paise(), 999);
        assert_ne!(reconstructed.paise(), ten_rupees.paise());

        // Document: 1 paisa was lost
        let lost = ten_rupees - reconstructed;
        assert_eq!(lost.paise(), 1);
    }
}
