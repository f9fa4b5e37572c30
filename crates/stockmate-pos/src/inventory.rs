//! # Inventory
//!
//! Catalog management: product CRUD and stock operations, with input
//! validation applied before the store is touched.

use tracing::debug;

use crate::error::PosResult;
use stockmate_core::validation::{
    validate_barcode, validate_category, validate_price_paise, validate_product_name,
    validate_stock_quantity,
};
use stockmate_core::{reporting, CoreError, Product};
use stockmate_store::{NewProduct, ProductCatalog, ProductUpdate};

/// Catalog management service.
#[derive(Debug, Clone)]
pub struct Inventory {
    catalog: ProductCatalog,
    low_stock_threshold: i64,
}

impl Inventory {
    /// Creates an inventory service over the catalog handle.
    pub fn new(catalog: ProductCatalog, low_stock_threshold: i64) -> Self {
        Inventory {
            catalog,
            low_stock_threshold,
        }
    }

    /// Creates a product after validating the draft.
    ///
    /// Note: selling >= purchase is deliberately NOT checked here - that is
    /// a form-level hint (`validation::validate_price_pair`), not a data
    /// rule.
    pub async fn add_product(&self, draft: NewProduct) -> PosResult<Product> {
        debug!(name = %draft.name, "add_product");

        validate_product_name(&draft.name).map_err(CoreError::from)?;
        validate_category(&draft.category).map_err(CoreError::from)?;
        validate_price_paise(draft.purchase_price_paise).map_err(CoreError::from)?;
        validate_price_paise(draft.selling_price_paise).map_err(CoreError::from)?;
        validate_stock_quantity(draft.quantity).map_err(CoreError::from)?;
        if let Some(barcode) = draft.barcode.as_deref() {
            validate_barcode(barcode).map_err(CoreError::from)?;
        }

        Ok(self.catalog.insert(draft).await?)
    }

    /// Applies a partial update after validating the provided fields.
    pub async fn update_product(&self, id: &str, update: ProductUpdate) -> PosResult<Product> {
        debug!(id = %id, "update_product");

        if let Some(name) = update.name.as_deref() {
            validate_product_name(name).map_err(CoreError::from)?;
        }
        if let Some(category) = update.category.as_deref() {
            validate_category(category).map_err(CoreError::from)?;
        }
        if let Some(purchase) = update.purchase_price_paise {
            validate_price_paise(purchase).map_err(CoreError::from)?;
        }
        if let Some(selling) = update.selling_price_paise {
            validate_price_paise(selling).map_err(CoreError::from)?;
        }
        if let Some(Some(barcode)) = update.barcode.as_ref() {
            validate_barcode(barcode).map_err(CoreError::from)?;
        }

        Ok(self.catalog.update(id, update).await?)
    }

    /// Deletes a product. Historical sales keep their snapshots.
    pub async fn delete_product(&self, id: &str) -> PosResult<()> {
        debug!(id = %id, "delete_product");
        Ok(self.catalog.delete(id).await?)
    }

    /// Adjusts stock by a delta (restock or correction).
    pub async fn adjust_stock(&self, id: &str, delta: i64) -> PosResult<Product> {
        Ok(self.catalog.adjust_stock(id, delta).await?)
    }

    /// Sets stock to an absolute level (stocktake).
    pub async fn set_stock(&self, id: &str, quantity: i64) -> PosResult<Product> {
        Ok(self.catalog.set_stock(id, quantity).await?)
    }

    /// Returns the full catalog.
    pub async fn products(&self) -> Vec<Product> {
        self.catalog.list().await
    }

    /// Gets a product by id, as an error rather than an Option.
    pub async fn find_product(&self, id: &str) -> PosResult<Product> {
        self.catalog
            .get(id)
            .await
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()).into())
    }

    /// Case-insensitive substring search over name, category, barcode.
    pub async fn search(&self, query: &str) -> Vec<Product> {
        self.catalog.search(query).await
    }

    /// Products below the configured low-stock threshold.
    pub async fn low_stock(&self) -> Vec<Product> {
        let products = self.catalog.list().await;
        reporting::low_stock_products(&products, self.low_stock_threshold)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
