//! # stockmate-store: Persistence Layer for StockMate
//!
//! This crate provides durable storage for the StockMate system.
//! It uses a flat, schema-versioned JSON key-value store on the filesystem.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       StockMate Data Flow                               │
//! │                                                                         │
//! │  stockmate-pos services (Register, Checkout, Inventory, Reports)       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  stockmate-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌─────────────┐  │   │
//! │  │   │   JsonStore   │    │  Repositories  │    │ ChangeFeed  │  │   │
//! │  │   │   (kv.rs)     │    │ ProductCatalog │    │ (events.rs) │  │   │
//! │  │   │               │◄───│ SalesLedger    │───►│  broadcast  │  │   │
//! │  │   │ load / save   │    │                │    │  observers  │  │   │
//! │  │   └───────────────┘    └────────────────┘    └─────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                       Data directory                            │   │
//! │  │   stockmate_products.json · stockmate_sales.json                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`kv`] - Key-value store with versioned JSON envelopes
//! - [`catalog`] - Product repository (stock source of truth)
//! - [`ledger`] - Append-only sales ledger
//! - [`events`] - Change-feed observer interface
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockmate_store::{Store, StoreConfig};
//!
//! // Open (or create) the store
//! let store = Store::open(StoreConfig::new("./stockmate_data")).await?;
//!
//! // Use repositories
//! let products = store.catalog().list().await;
//! let sales = store.ledger().all().await;
//!
//! // Observe mutations
//! let mut events = store.subscribe();
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod events;
pub mod kv;
pub mod ledger;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::{NewProduct, ProductCatalog, ProductUpdate};
pub use error::{StoreError, StoreResult};
pub use events::{ChangeFeed, StoreEvent};
pub use kv::{JsonStore, StoreConfig, PRODUCTS_KEY, SALES_KEY, SCHEMA_VERSION};
pub use ledger::SalesLedger;

use tokio::sync::broadcast;
use tracing::info;

/// Main store handle providing repository access.
///
/// ## Design: One Handle, Shared Feed
/// Both repositories publish onto the same [`ChangeFeed`], so a single
/// subscription observes every catalog and ledger mutation in order.
#[derive(Debug, Clone)]
pub struct Store {
    catalog: ProductCatalog,
    ledger: SalesLedger,
    feed: ChangeFeed,
}

impl Store {
    /// Opens the store: creates/loads the key-value files and both
    /// repositories.
    pub async fn open(config: StoreConfig) -> StoreResult<Self> {
        info!(data_dir = %config.data_dir.display(), "Opening store");

        let kv = JsonStore::open(config).await?;
        let feed = ChangeFeed::new();
        let catalog = ProductCatalog::open(kv.clone(), feed.clone()).await?;
        let ledger = SalesLedger::open(kv, feed.clone()).await?;

        Ok(Store {
            catalog,
            ledger,
            feed,
        })
    }

    /// Returns the product catalog repository.
    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    /// Returns the sales ledger repository.
    pub fn ledger(&self) -> &SalesLedger {
        &self.ledger
    }

    /// Subscribes to catalog and ledger mutations.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.feed.subscribe()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_ephemeral_store() {
        let store = Store::open(StoreConfig::ephemeral()).await.unwrap();
        assert_eq!(store.catalog().count().await, 0);
        assert!(store.ledger().is_empty().await);
    }

    #[tokio::test]
    async fn test_shared_feed_sees_both_repositories() {
        let store = Store::open(StoreConfig::ephemeral()).await.unwrap();
        let mut rx = store.subscribe();

        store
            .catalog()
            .insert(NewProduct {
                name: "A".to_string(),
                category: "Grocery".to_string(),
                purchase_price_paise: 500,
                selling_price_paise: 1000,
                quantity: 5,
                barcode: None,
            })
            .await
            .unwrap();

        assert!(matches!(
            rx.recv().await.unwrap(),
            StoreEvent::ProductAdded { .. }
        ));
    }
}
