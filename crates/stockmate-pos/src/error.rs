//! # Terminal Error Type
//!
//! Unified error type for terminal operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in StockMate                              │
//! │                                                                         │
//! │  Caller (dashboard / CLI)         Rust services                        │
//! │  ─────────────────────────        ─────────────                        │
//! │                                                                         │
//! │  register.add_to_cart(...)                                             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Service Function                                                │  │
//! │  │  Result<T, PosError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Domain rule broke? ── CoreError::InsufficientStock ──┐          │  │
//! │  │         │                                             ▼          │  │
//! │  │  Persistence broke? ── StoreError::Io ──────────► PosError ────► │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────► │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  error.code() = INSUFFICIENT_STOCK → clamp the quantity input          │
//! │  error.code() = PERSISTENCE_FAILURE → memory and disk may disagree:    │
//! │                 surface prominently, never as a plain validation toast │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use stockmate_core::CoreError;
use stockmate_store::StoreError;

/// Unified error for terminal operations.
#[derive(Debug, thiserror::Error)]
pub enum PosError {
    /// A business rule failed. Recovered locally; never retried.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The store failed. The persistence-failure class means in-memory and
    /// persisted state may now disagree.
    #[error(transparent)]
    Store(StoreError),
}

/// Flatten store-wrapped domain errors so callers match one shape:
/// `StoreError::Domain(InsufficientStock)` and a register-level
/// `InsufficientStock` both surface as `PosError::Core`.
impl From<StoreError> for PosError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Domain(core) => PosError::Core(core),
            other => PosError::Store(other),
        }
    }
}

/// Machine-readable error codes.
///
/// ## Usage in Frontend
/// ```typescript
/// try {
///   await addToCart(productId, qty);
/// } catch (e) {
///   switch (e.code) {
///     case 'INSUFFICIENT_STOCK':
///       clampQuantityInput(e.message);
///       break;
///     case 'PERSISTENCE_FAILURE':
///       showBlockingError(e.message);
///       break;
///     default:
///       showNotification(e.message);
///   }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Referenced product id does not resolve in the catalog
    ProductNotFound,

    /// Requested/cumulative quantity exceeds current stock
    InsufficientStock,

    /// Checkout attempted with no lines (surfaced as a no-op notice)
    EmptyCart,

    /// Cart structural limits hit (line count / quantity caps)
    CartError,

    /// Input validation failed
    ValidationError,

    /// Repository entity missing (update/delete of unknown id)
    NotFound,

    /// The store failed to read or write; memory and disk may disagree
    PersistenceFailure,
}

impl PosError {
    /// Maps the error onto its machine-readable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            PosError::Core(core) => match core {
                CoreError::ProductNotFound(_) => ErrorCode::ProductNotFound,
                CoreError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
                CoreError::EmptyCart => ErrorCode::EmptyCart,
                CoreError::CartTooLarge { .. } | CoreError::QuantityTooLarge { .. } => {
                    ErrorCode::CartError
                }
                CoreError::Validation(_) => ErrorCode::ValidationError,
            },
            PosError::Store(store) => match store {
                StoreError::NotFound { .. } => ErrorCode::NotFound,
                StoreError::Domain(_) => ErrorCode::ValidationError,
                _ => ErrorCode::PersistenceFailure,
            },
        }
    }
}

/// Result type for terminal operations.
pub type PosResult<T> = Result<T, PosError>;

// =============================================================================
// Unit Tests
// =============================================================================
