//! # stockmate-pos: Terminal Orchestration for StockMate
//!
//! The thin layer that wires the pure core and the persistence layer into a
//! working point-of-sale terminal.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     StockMate Orchestration                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 stockmate-pos (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌───────────┐  ┌─────────┐      │   │
//! │  │   │ Register │  │ Checkout │  │ Inventory │  │ Reports │      │   │
//! │  │   │ cart ops │  │ commit   │  │ CRUD +    │  │ rollups │      │   │
//! │  │   │ vs live  │  │ sale     │  │ stock ops │  │         │      │   │
//! │  │   │ catalog  │  │          │  │           │  │         │      │   │
//! │  │   └────┬─────┘  └────┬─────┘  └─────┬─────┘  └────┬────┘      │   │
//! │  │        └─────────────┴──── Terminal ┴──────────────┘           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │        │                                      │                         │
//! │        ▼                                      ▼                         │
//! │  stockmate-core (pure logic)       stockmate-store (persistence)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockmate_pos::{PosConfig, Terminal};
//!
//! let terminal = Terminal::open(PosConfig::from_env()).await?;
//!
//! terminal.register().add_to_cart(&product_id, 2).await?;
//! let sale = terminal.checkout().checkout("cashier-1", true).await?;
//! // Hand `sale` to the invoice renderer
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod config;
pub mod error;
pub mod inventory;
pub mod register;
pub mod reports;
pub mod terminal;

// =============================================================================
// Re-exports
// =============================================================================

pub use checkout::Checkout;
pub use config::PosConfig;
pub use error::{ErrorCode, PosError, PosResult};
pub use inventory::Inventory;
pub use register::{CartView, Register};
pub use reports::Reports;
pub use terminal::Terminal;
