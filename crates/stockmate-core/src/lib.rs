//! # stockmate-core: Pure Business Logic for StockMate
//!
//! This crate is the **heart** of StockMate. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       StockMate Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Dashboard Frontend (external)                   │   │
//! │  │    Product Grid ──► Billing Cart ──► Checkout ──► Invoice      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  stockmate-pos (orchestration)                  │   │
//! │  │    Register, Checkout, Inventory, Reports                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ stockmate-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  pricing  │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │ CartTotals│  │   │
//! │  │   │   Sale    │  │  TaxCalc  │  │ CartLine  │  │  compute  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐                                 │   │
//! │  │   │ reporting │  │ validation│                                 │   │
//! │  │   │  rollups  │  │   rules   │                                 │   │
//! │  │   └───────────┘  └───────────┘                                 │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILESYSTEM • NO NETWORK • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                stockmate-store (persistence)                    │   │
//! │  │          Versioned JSON key-value store, catalog, ledger        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, SaleItem, TaxRate)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The in-progress sale: line aggregation and re-validation
//! - [`pricing`] - Subtotal / tax / total computation for a cart snapshot
//! - [`reporting`] - Read-side folds over the sales ledger
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Filesystem, network, key-value store access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in paise (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use stockmate_core::money::Money;
//! use stockmate_core::types::TaxRate;
//!
//! // Create money from paise (never from floats!)
//! let subtotal = Money::from_paise(58000); // ₹580.00
//!
//! // Calculate GST with half-up rounding
//! let gst = TaxRate::from_bps(1800); // 18%
//! let tax = subtotal.calculate_tax(gst);
//!
//! // 18% of ₹580.00 = ₹104.40
//! assert_eq!(tax.paise(), 10440);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod pricing;
pub mod reporting;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use stockmate_core::Money` instead of
// `use stockmate_core::money::Money`

pub use cart::{Cart, CartLine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::CartTotals;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default GST rate in basis points (1800 = 18%).
///
/// ## Why a constant?
/// This is the rate the billing screen toggles on and off. It is a
/// configuration default, not domain law - `stockmate-pos` exposes it as a
/// config value and every calculation takes the rate as a parameter.
pub const DEFAULT_GST_RATE_BPS: u32 = 1800;

/// Maximum unique lines allowed in a single cart
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable transaction sizes.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single line in the cart
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10)
pub const MAX_LINE_QUANTITY: i64 = 999;

/// Default low-stock alert threshold (strictly-below comparison).
pub const LOW_STOCK_THRESHOLD: i64 = 5;
