//! # Terminal
//!
//! Wires configuration, store, and services into one handle.
//!
//! ## Wiring
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Terminal Wiring                                      │
//! │                                                                         │
//! │  PosConfig ──► Store::open(data_dir)                                   │
//! │                    │                                                    │
//! │        ┌───────────┼───────────────┐                                   │
//! │        ▼           ▼               ▼                                   │
//! │    catalog      ledger        change feed                              │
//! │        │           │               │                                    │
//! │        ├───────────┼──── shared Arc<Mutex<Cart>> ────┐                 │
//! │        ▼           ▼                                 ▼                 │
//! │    Inventory    Reports      Register ◄────────► Checkout             │
//! │                                                                         │
//! │  Register and Checkout share the cart; catalog and ledger are the      │
//! │  same handles everywhere, so every service observes the same state.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;
use tracing::info;

use crate::checkout::Checkout;
use crate::config::PosConfig;
use crate::error::PosResult;
use crate::inventory::Inventory;
use crate::register::Register;
use crate::reports::Reports;
use stockmate_core::cart::Cart;
use stockmate_store::{Store, StoreConfig, StoreEvent};

/// One point-of-sale terminal: config + store + services.
#[derive(Debug, Clone)]
pub struct Terminal {
    config: PosConfig,
    store: Store,
    register: Register,
    checkout: Checkout,
    inventory: Inventory,
    reports: Reports,
}

impl Terminal {
    /// Opens the terminal against the configured data directory.
    pub async fn open(config: PosConfig) -> PosResult<Self> {
        info!(
            store_name = %config.store_name,
            data_dir = %config.data_dir.display(),
            "Opening terminal"
        );

        let store = Store::open(StoreConfig::new(&config.data_dir)).await?;
        let cart = Arc::new(Mutex::new(Cart::new()));
        let tax_rate = config.tax_rate();

        let register = Register::new(store.catalog().clone(), cart.clone(), tax_rate);
        let checkout = Checkout::new(
            store.catalog().clone(),
            store.ledger().clone(),
            cart,
            tax_rate,
        );
        let inventory = Inventory::new(store.catalog().clone(), config.low_stock_threshold);
        let reports = Reports::new(store.catalog().clone(), store.ledger().clone());

        Ok(Terminal {
            config,
            store,
            register,
            checkout,
            inventory,
            reports,
        })
    }

    /// The terminal configuration.
    pub fn config(&self) -> &PosConfig {
        &self.config
    }

    /// Cart session operations.
    pub fn register(&self) -> &Register {
        &self.register
    }

    /// The checkout reconciler.
    pub fn checkout(&self) -> &Checkout {
        &self.checkout
    }

    /// Catalog management operations.
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Ledger-fed reporting.
    pub fn reports(&self) -> &Reports {
        &self.reports
    }

    /// Subscribes to catalog and ledger mutations.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.store.subscribe()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use stockmate_store::NewProduct;

    fn ephemeral_config() -> PosConfig {
        PosConfig {
            data_dir: StoreConfig::ephemeral().data_dir,
            ..Default::default()
        }
    }

    fn draft(name: &str, selling_paise: i64, quantity: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            category: "Grocery".to_string(),
            purchase_price_paise: selling_paise / 2,
            selling_price_paise: selling_paise,
            quantity,
            barcode: None,
        }
    }

    #[tokio::test]
    async fn test_full_billing_flow() {
        let terminal = Terminal::open(ephemeral_config()).await.unwrap();

        let a = terminal
            .inventory()
            .add_product(draft("SKU-A", 15000, 10))
            .await
            .unwrap();
        let b = terminal
            .inventory()
            .add_product(draft("SKU-B", 28000, 4))
            .await
            .unwrap();

        terminal.register().add_to_cart(&a.id, 2).await.unwrap();
        terminal.register().add_to_cart(&b.id, 1).await.unwrap();

        let view = terminal.register().view(true);
        assert_eq!(view.totals.total_paise, 68440);

        let sale = terminal.checkout().checkout("cashier-1", true).await.unwrap();
        assert_eq!(sale.total_paise, 68440);

        // Stock reflects the sale; today's report sees it
        assert_eq!(
            terminal.inventory().find_product(&a.id).await.unwrap().quantity,
            8
        );
        let today = terminal.reports().today().await;
        assert_eq!(today.sales_count, 1);
        assert_eq!(today.total_sales_paise, 68440);
    }

    #[tokio::test]
    async fn test_state_survives_reopen() {
        let config = ephemeral_config();

        let product_id = {
            let terminal = Terminal::open(config.clone()).await.unwrap();
            let product = terminal
                .inventory()
                .add_product(draft("Persistent", 10000, 6))
                .await
                .unwrap();
            terminal.register().add_to_cart(&product.id, 2).await.unwrap();
            terminal.checkout().checkout("cashier-1", false).await.unwrap();
            product.id
        };

        // Same data directory, fresh terminal: catalog and ledger persist,
        // the cart (session state) does not
        let terminal = Terminal::open(config).await.unwrap();
        assert_eq!(
            terminal
                .inventory()
                .find_product(&product_id)
                .await
                .unwrap()
                .quantity,
            4
        );
        assert_eq!(terminal.reports().sales().await.len(), 1);
        assert!(terminal.register().is_empty());
    }

    #[tokio::test]
    async fn test_persistence_failure_leaves_memory_untouched() {
        let config = ephemeral_config();
        let terminal = Terminal::open(config.clone()).await.unwrap();

        let product = terminal
            .inventory()
            .add_product(draft("SKU-A", 10000, 10))
            .await
            .unwrap();
        terminal.register().add_to_cart(&product.id, 3).await.unwrap();

        // Pull the data directory out from under the store: the staged
        // write fails, so nothing may be committed anywhere
        tokio::fs::remove_dir_all(&config.data_dir).await.unwrap();

        let err = terminal
            .checkout()
            .checkout("cashier-1", false)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::PersistenceFailure);

        // In-memory catalog still holds pre-checkout stock; cart retained
        assert_eq!(
            terminal.inventory().find_product(&product.id).await.unwrap().quantity,
            10
        );
        assert_eq!(terminal.register().lines().len(), 1);
        assert!(terminal.reports().sales().await.is_empty());
    }

    #[tokio::test]
    async fn test_events_flow_through_terminal() {
        let terminal = Terminal::open(ephemeral_config()).await.unwrap();
        let mut events = terminal.subscribe();

        let product = terminal
            .inventory()
            .add_product(draft("SKU-A", 10000, 10))
            .await
            .unwrap();
        terminal.register().add_to_cart(&product.id, 1).await.unwrap();
        terminal.checkout().checkout("cashier-1", false).await.unwrap();

        assert!(matches!(
            events.recv().await.unwrap(),
            StoreEvent::ProductAdded { .. }
        ));
        assert!(matches!(
            events.recv().await.unwrap(),
            StoreEvent::StockChanged { quantity: 9, .. }
        ));
        assert!(matches!(
            events.recv().await.unwrap(),
            StoreEvent::SaleRecorded { .. }
        ));
    }
}
