//! # Product Catalog
//!
//! Repository for products - the single source of truth for available stock.
//!
//! ## Mutation Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Stage - Persist - Commit                                │
//! │                                                                         │
//! │  1. Take the write lock                                                │
//! │  2. STAGE:   clone current products, apply the mutation to the clone   │
//! │  3. PERSIST: save the staged snapshot to the key-value store           │
//! │       │                                                                 │
//! │       ├── write failed ──► return error, in-memory state UNCHANGED     │
//! │       │                    (memory still equals the last durable copy) │
//! │       ▼                                                                 │
//! │  4. COMMIT:  swap the staged snapshot into memory                      │
//! │  5. Publish a change-feed event                                        │
//! │                                                                         │
//! │  The write lock is held across persist, so concurrent in-process       │
//! │  mutations serialize. Cross-process coordination is out of scope       │
//! │  (single-terminal deployment).                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stock Invariant
//! Quantity on hand never goes negative. Validated paths make the floor
//! unreachable; the floor stays in place as a safety net, and hitting it is
//! logged as an invariant violation because it means a validation was
//! bypassed.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::events::{ChangeFeed, StoreEvent};
use crate::kv::{JsonStore, PRODUCTS_KEY};
use stockmate_core::validation::validate_stock_quantity;
use stockmate_core::{CoreError, Product, SaleItem};

// =============================================================================
// Input Types
// =============================================================================

/// Fields for creating a product. Id and timestamps are assigned by the
/// catalog.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub purchase_price_paise: i64,
    pub selling_price_paise: i64,
    pub quantity: i64,
    pub barcode: Option<String>,
}

/// Partial update for a product's descriptive fields.
///
/// ## No Quantity Field
/// Stock changes flow only through `adjust_stock` / `set_stock` /
/// `deduct_for_sale`, which keeps the "quantity never negative, decremented
/// only by checkout or explicit stock operations" invariant auditable at
/// the API surface.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub purchase_price_paise: Option<i64>,
    pub selling_price_paise: Option<i64>,
    /// `Some(None)` clears the barcode; `None` leaves it untouched.
    pub barcode: Option<Option<String>>,
}

// =============================================================================
// Product Catalog
// =============================================================================

/// Repository for product catalog operations.
///
/// ## Usage
/// ```rust,ignore
/// let catalog = ProductCatalog::open(kv, feed).await?;
///
/// let product = catalog
///     .insert(NewProduct {
///         name: "Basmati Rice 1kg".into(),
///         category: "Grocery".into(),
///         purchase_price_paise: 9000,
///         selling_price_paise: 12000,
///         quantity: 40,
///         barcode: None,
///     })
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductCatalog {
    kv: JsonStore,
    products: Arc<RwLock<Vec<Product>>>,
    feed: ChangeFeed,
}

impl ProductCatalog {
    /// Opens the catalog, loading persisted products (absent key → empty).
    pub async fn open(kv: JsonStore, feed: ChangeFeed) -> StoreResult<Self> {
        let products: Vec<Product> = kv
            .load_records(PRODUCTS_KEY)
            .await?
            .unwrap_or_default();

        debug!(count = products.len(), "Catalog loaded");

        Ok(ProductCatalog {
            kv,
            products: Arc::new(RwLock::new(products)),
            feed,
        })
    }

    /// Returns all products in insertion order.
    pub async fn list(&self) -> Vec<Product> {
        self.products.read().await.clone()
    }

    /// Returns the number of products.
    pub async fn count(&self) -> usize {
        self.products.read().await.len()
    }

    /// Gets a product by id.
    pub async fn get(&self, id: &str) -> Option<Product> {
        self.products
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// Case-insensitive substring search over name, category, and barcode.
    /// An empty query returns the full catalog.
    pub async fn search(&self, query: &str) -> Vec<Product> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.list().await;
        }

        self.products
            .read()
            .await
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&query)
                    || p.category.to_lowercase().contains(&query)
                    || p.barcode
                        .as_deref()
                        .is_some_and(|b| b.to_lowercase().contains(&query))
            })
            .cloned()
            .collect()
    }

    /// Inserts a new product, assigning id and timestamps.
    pub async fn insert(&self, new: NewProduct) -> StoreResult<Product> {
        let now = Utc::now();

        let quantity = if new.quantity < 0 {
            warn!(
                name = %new.name,
                quantity = new.quantity,
                "Negative initial stock floored to zero"
            );
            0
        } else {
            new.quantity
        };

        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            category: new.category,
            purchase_price_paise: new.purchase_price_paise,
            selling_price_paise: new.selling_price_paise,
            quantity,
            barcode: new.barcode,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %product.id, name = %product.name, "Inserting product");

        let mut products = self.products.write().await;
        let mut staged = products.clone();
        staged.push(product.clone());

        self.kv.save_records(PRODUCTS_KEY, &staged).await?;
        *products = staged;
        drop(products);

        self.feed.publish(StoreEvent::ProductAdded {
            product_id: product.id.clone(),
        });

        Ok(product)
    }

    /// Applies a partial update to a product's descriptive fields.
    pub async fn update(&self, id: &str, update: ProductUpdate) -> StoreResult<Product> {
        debug!(id = %id, "Updating product");

        let mut products = self.products.write().await;
        let mut staged = products.clone();

        let product = staged
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::not_found("Product", id))?;

        if let Some(name) = update.name {
            product.name = name;
        }
        if let Some(category) = update.category {
            product.category = category;
        }
        if let Some(purchase) = update.purchase_price_paise {
            product.purchase_price_paise = purchase;
        }
        if let Some(selling) = update.selling_price_paise {
            product.selling_price_paise = selling;
        }
        if let Some(barcode) = update.barcode {
            product.barcode = barcode;
        }
        product.updated_at = Utc::now();
        let updated = product.clone();

        self.kv.save_records(PRODUCTS_KEY, &staged).await?;
        *products = staged;
        drop(products);

        self.feed.publish(StoreEvent::ProductUpdated {
            product_id: updated.id.clone(),
        });

        Ok(updated)
    }

    /// Deletes a product. Historical sales keep their frozen snapshots, so
    /// no cascade is needed.
    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        debug!(id = %id, "Deleting product");

        let mut products = self.products.write().await;

        if !products.iter().any(|p| p.id == id) {
            return Err(StoreError::not_found("Product", id));
        }

        let staged: Vec<Product> = products.iter().filter(|p| p.id != id).cloned().collect();

        self.kv.save_records(PRODUCTS_KEY, &staged).await?;
        *products = staged;
        drop(products);

        self.feed.publish(StoreEvent::ProductDeleted {
            product_id: id.to_string(),
        });

        Ok(())
    }

    /// Adjusts stock by a delta (negative for corrections, positive for
    /// restocking). The result is floored at zero; a floor hit is logged
    /// as an invariant violation because validated paths never reach it.
    pub async fn adjust_stock(&self, id: &str, delta: i64) -> StoreResult<Product> {
        debug!(id = %id, delta = delta, "Adjusting stock");

        let mut products = self.products.write().await;
        let mut staged = products.clone();

        let product = staged
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::not_found("Product", id))?;

        let target = product.quantity + delta;
        if target < 0 {
            warn!(
                product_id = %product.id,
                on_hand = product.quantity,
                delta = delta,
                "Stock adjustment would go negative; floored at zero (validation bypass?)"
            );
        }
        product.quantity = target.max(0);
        product.updated_at = Utc::now();
        let updated = product.clone();

        self.kv.save_records(PRODUCTS_KEY, &staged).await?;
        *products = staged;
        drop(products);

        self.feed.publish(StoreEvent::StockChanged {
            product_id: updated.id.clone(),
            quantity: updated.quantity,
        });

        Ok(updated)
    }

    /// Sets stock to an absolute level (stocktake correction).
    pub async fn set_stock(&self, id: &str, quantity: i64) -> StoreResult<Product> {
        validate_stock_quantity(quantity).map_err(CoreError::from)?;

        debug!(id = %id, quantity = quantity, "Setting stock");

        let mut products = self.products.write().await;
        let mut staged = products.clone();

        let product = staged
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::not_found("Product", id))?;

        product.quantity = quantity;
        product.updated_at = Utc::now();
        let updated = product.clone();

        self.kv.save_records(PRODUCTS_KEY, &staged).await?;
        *products = staged;
        drop(products);

        self.feed.publish(StoreEvent::StockChanged {
            product_id: updated.id.clone(),
            quantity: updated.quantity,
        });

        Ok(updated)
    }

    /// Commits the stock deduction for a checkout: validates EVERY item
    /// against current stock, then decrements all of them, in one write-lock
    /// scope.
    ///
    /// ## All-or-Nothing
    /// The first item whose quantity exceeds current stock aborts the whole
    /// operation with [`CoreError::InsufficientStock`] and nothing mutated -
    /// neither memory nor disk. The same holds when persisting the staged
    /// snapshot fails.
    pub async fn deduct_for_sale(&self, items: &[SaleItem]) -> StoreResult<()> {
        let mut products = self.products.write().await;
        let mut staged = products.clone();

        for item in items {
            let product = staged
                .iter_mut()
                .find(|p| p.id == item.product_id)
                .ok_or_else(|| {
                    StoreError::Domain(CoreError::ProductNotFound(item.product_id.clone()))
                })?;

            if item.quantity > product.quantity {
                return Err(StoreError::Domain(CoreError::InsufficientStock {
                    product_id: product.id.clone(),
                    available: product.quantity,
                    requested: item.quantity,
                }));
            }

            let target = product.quantity - item.quantity;
            if target < 0 {
                // Unreachable after the check above; kept as a safety net
                warn!(
                    product_id = %product.id,
                    on_hand = product.quantity,
                    deducted = item.quantity,
                    "Checkout deduction would go negative; floored at zero (validation bypass?)"
                );
            }
            product.quantity = target.max(0);
            product.updated_at = Utc::now();
        }

        self.kv.save_records(PRODUCTS_KEY, &staged).await?;
        *products = staged;
        let snapshot: Vec<(String, i64)> = products
            .iter()
            .filter(|p| items.iter().any(|i| i.product_id == p.id))
            .map(|p| (p.id.clone(), p.quantity))
            .collect();
        drop(products);

        for (product_id, quantity) in snapshot {
            self.feed.publish(StoreEvent::StockChanged {
                product_id,
                quantity,
            });
        }

        Ok(())
    }

    /// Returns previously deducted quantities to stock. Compensation path
    /// for a checkout whose ledger write failed after the deduction.
    pub async fn restock(&self, items: &[SaleItem]) -> StoreResult<()> {
        let mut products = self.products.write().await;
        let mut staged = products.clone();

        for item in items {
            if let Some(product) = staged.iter_mut().find(|p| p.id == item.product_id) {
                product.quantity += item.quantity;
                product.updated_at = Utc::now();
            }
        }

        self.kv.save_records(PRODUCTS_KEY, &staged).await?;
        *products = staged;
        drop(products);

        for item in items {
            if let Some(product) = self.get(&item.product_id).await {
                self.feed.publish(StoreEvent::StockChanged {
                    product_id: product.id,
                    quantity: product.quantity,
                });
            }
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::StoreConfig;

    async fn open_catalog() -> ProductCatalog {
        let kv = JsonStore::open(StoreConfig::ephemeral()).await.unwrap();
        ProductCatalog::open(kv, ChangeFeed::new()).await.unwrap()
    }

    fn new_product(name: &str, selling_paise: i64, quantity: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            category: "Grocery".to_string(),
            purchase_price_paise: selling_paise / 2,
            selling_price_paise: selling_paise,
            quantity,
            barcode: None,
        }
    }

    fn sale_item(product: &Product, quantity: i64) -> SaleItem {
        SaleItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            quantity,
            unit_price_paise: product.selling_price_paise,
            line_total_paise: product.selling_price_paise * quantity,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_persists() {
        let kv = JsonStore::open(StoreConfig::ephemeral()).await.unwrap();
        let catalog = ProductCatalog::open(kv.clone(), ChangeFeed::new())
            .await
            .unwrap();

        let product = catalog
            .insert(new_product("Basmati Rice 1kg", 12000, 40))
            .await
            .unwrap();

        assert!(!product.id.is_empty());
        assert_eq!(catalog.count().await, 1);

        // Reopening from the same key-value store sees the product
        let reopened = ProductCatalog::open(kv, ChangeFeed::new()).await.unwrap();
        assert_eq!(reopened.get(&product.id).await.unwrap().name, product.name);
    }

    #[tokio::test]
    async fn test_insert_floors_negative_stock() {
        let catalog = open_catalog().await;
        let product = catalog
            .insert(new_product("Mystery", 1000, -5))
            .await
            .unwrap();
        assert_eq!(product.quantity, 0);
    }

    #[tokio::test]
    async fn test_update_partial_fields() {
        let catalog = open_catalog().await;
        let product = catalog
            .insert(new_product("Old Name", 12000, 40))
            .await
            .unwrap();

        let updated = catalog
            .update(
                &product.id,
                ProductUpdate {
                    name: Some("New Name".to_string()),
                    selling_price_paise: Some(13000),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "New Name");
        assert_eq!(updated.selling_price_paise, 13000);
        // Untouched fields survive
        assert_eq!(updated.category, "Grocery");
        assert_eq!(updated.quantity, 40);
        assert!(updated.updated_at >= product.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let catalog = open_catalog().await;
        let err = catalog
            .update("ghost", ProductUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_and_no_cascade() {
        let catalog = open_catalog().await;
        let product = catalog
            .insert(new_product("Doomed", 1000, 5))
            .await
            .unwrap();

        catalog.delete(&product.id).await.unwrap();
        assert!(catalog.get(&product.id).await.is_none());

        let err = catalog.delete(&product.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_adjust_stock_floors_at_zero() {
        let catalog = open_catalog().await;
        let product = catalog.insert(new_product("Item", 1000, 5)).await.unwrap();

        let updated = catalog.adjust_stock(&product.id, -3).await.unwrap();
        assert_eq!(updated.quantity, 2);

        // Over-deduction floors rather than going negative
        let floored = catalog.adjust_stock(&product.id, -10).await.unwrap();
        assert_eq!(floored.quantity, 0);
    }

    #[tokio::test]
    async fn test_set_stock_rejects_negative() {
        let catalog = open_catalog().await;
        let product = catalog.insert(new_product("Item", 1000, 5)).await.unwrap();

        let err = catalog.set_stock(&product.id, -1).await.unwrap_err();
        assert!(matches!(err, StoreError::Domain(_)));

        let updated = catalog.set_stock(&product.id, 25).await.unwrap();
        assert_eq!(updated.quantity, 25);
    }

    #[tokio::test]
    async fn test_search_matches_name_category_barcode() {
        let catalog = open_catalog().await;
        catalog
            .insert(NewProduct {
                barcode: Some("8901234567890".to_string()),
                ..new_product("Basmati Rice 1kg", 12000, 40)
            })
            .await
            .unwrap();
        catalog
            .insert(new_product("Toor Dal 500g", 9000, 15))
            .await
            .unwrap();

        assert_eq!(catalog.search("basmati").await.len(), 1);
        assert_eq!(catalog.search("grocery").await.len(), 2);
        assert_eq!(catalog.search("890123").await.len(), 1);
        assert_eq!(catalog.search("").await.len(), 2);
        assert!(catalog.search("nothing").await.is_empty());
    }

    #[tokio::test]
    async fn test_deduct_for_sale_decrements_all() {
        let catalog = open_catalog().await;
        let a = catalog.insert(new_product("A", 10000, 10)).await.unwrap();
        let b = catalog.insert(new_product("B", 28000, 4)).await.unwrap();

        catalog
            .deduct_for_sale(&[sale_item(&a, 3), sale_item(&b, 1)])
            .await
            .unwrap();

        assert_eq!(catalog.get(&a.id).await.unwrap().quantity, 7);
        assert_eq!(catalog.get(&b.id).await.unwrap().quantity, 3);
    }

    #[tokio::test]
    async fn test_deduct_for_sale_is_all_or_nothing() {
        let catalog = open_catalog().await;
        let a = catalog.insert(new_product("A", 10000, 10)).await.unwrap();
        let b = catalog.insert(new_product("B", 28000, 2)).await.unwrap();

        // Second item over-requests: nothing may be committed
        let err = catalog
            .deduct_for_sale(&[sale_item(&a, 3), sale_item(&b, 5)])
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            StoreError::Domain(CoreError::InsufficientStock {
                available: 2,
                requested: 5,
                ..
            })
        ));
        assert_eq!(catalog.get(&a.id).await.unwrap().quantity, 10);
        assert_eq!(catalog.get(&b.id).await.unwrap().quantity, 2);
    }

    #[tokio::test]
    async fn test_deduct_for_sale_unknown_product() {
        let catalog = open_catalog().await;
        let a = catalog.insert(new_product("A", 10000, 10)).await.unwrap();

        let ghost = SaleItem {
            product_id: "ghost".to_string(),
            name: "Ghost".to_string(),
            quantity: 1,
            unit_price_paise: 100,
            line_total_paise: 100,
        };

        let err = catalog
            .deduct_for_sale(&[sale_item(&a, 1), ghost])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Domain(CoreError::ProductNotFound(_))
        ));
        assert_eq!(catalog.get(&a.id).await.unwrap().quantity, 10);
    }

    #[tokio::test]
    async fn test_restock_returns_quantities() {
        let catalog = open_catalog().await;
        let a = catalog.insert(new_product("A", 10000, 10)).await.unwrap();

        catalog.deduct_for_sale(&[sale_item(&a, 4)]).await.unwrap();
        assert_eq!(catalog.get(&a.id).await.unwrap().quantity, 6);

        catalog.restock(&[sale_item(&a, 4)]).await.unwrap();
        assert_eq!(catalog.get(&a.id).await.unwrap().quantity, 10);
    }

    #[tokio::test]
    async fn test_mutations_publish_events() {
        let kv = JsonStore::open(StoreConfig::ephemeral()).await.unwrap();
        let feed = ChangeFeed::new();
        let mut rx = feed.subscribe();
        let catalog = ProductCatalog::open(kv, feed).await.unwrap();

        let product = catalog.insert(new_product("A", 1000, 5)).await.unwrap();
        catalog.adjust_stock(&product.id, -2).await.unwrap();

        assert_eq!(
            rx.recv().await.unwrap(),
            StoreEvent::ProductAdded {
                product_id: product.id.clone()
            }
        );
        assert_eq!(
            rx.recv().await.unwrap(),
            StoreEvent::StockChanged {
                product_id: product.id.clone(),
                quantity: 3
            }
        );
    }
}
