//! # Reports
//!
//! Ledger-fed reporting service: pulls sales (and the catalog where cost is
//! needed) and delegates to the pure folds in `stockmate_core::reporting`.
//!
//! Read-only by construction - the service holds repository handles but
//! only ever calls query methods.

use chrono::{DateTime, NaiveDate, Utc};

use stockmate_core::reporting::{
    self, DailySalesReport, MonthlySalesReport, TopSellingProduct,
};
use stockmate_core::Sale;
use stockmate_store::{ProductCatalog, SalesLedger};

/// Reporting service over the ledger and catalog.
#[derive(Debug, Clone)]
pub struct Reports {
    catalog: ProductCatalog,
    ledger: SalesLedger,
}

impl Reports {
    /// Creates a reports service over the repository handles.
    pub fn new(catalog: ProductCatalog, ledger: SalesLedger) -> Self {
        Reports { catalog, ledger }
    }

    /// All committed sales, in append order.
    pub async fn sales(&self) -> Vec<Sale> {
        self.ledger.all().await
    }

    /// Sales within an inclusive timestamp range (open-ended on `None`).
    pub async fn sales_between(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Vec<Sale> {
        self.ledger.query(from, to).await
    }

    /// Sales committed on the given UTC calendar day.
    pub async fn sales_for_day(&self, date: NaiveDate) -> Vec<Sale> {
        self.ledger.for_day(date).await
    }

    /// Rollup for one calendar day.
    pub async fn daily(&self, date: NaiveDate) -> DailySalesReport {
        let sales = self.ledger.for_day(date).await;
        reporting::daily_sales_report(&sales, date)
    }

    /// Rollup for the current UTC day.
    pub async fn today(&self) -> DailySalesReport {
        self.daily(Utc::now().date_naive()).await
    }

    /// Per-month rollups across the whole ledger, sorted by month.
    pub async fn monthly(&self) -> Vec<MonthlySalesReport> {
        let sales = self.ledger.all().await;
        reporting::monthly_sales_reports(&sales)
    }

    /// Top sellers by unit volume.
    pub async fn top_sellers(&self, limit: usize) -> Vec<TopSellingProduct> {
        let sales = self.ledger.all().await;
        reporting::top_selling_products(&sales, limit)
    }

    /// Total profit: ledger revenue minus catalog purchase cost.
    pub async fn total_profit(&self) -> i64 {
        let sales = self.ledger.all().await;
        let products = self.catalog.list().await;
        reporting::total_profit(&sales, &products)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use stockmate_core::SaleItem;
    use stockmate_store::{NewProduct, Store, StoreConfig};

    async fn reports_with_data() -> (Reports, String) {
        let store = Store::open(StoreConfig::ephemeral()).await.unwrap();
        let product = store
            .catalog()
            .insert(NewProduct {
                name: "A".to_string(),
                category: "Grocery".to_string(),
                purchase_price_paise: 6000,
                selling_price_paise: 10000,
                quantity: 100,
                barcode: None,
            })
            .await
            .unwrap();

        let sale = Sale {
            id: "s-1".to_string(),
            items: vec![SaleItem {
                product_id: product.id.clone(),
                name: product.name.clone(),
                quantity: 3,
                unit_price_paise: 10000,
                line_total_paise: 30000,
            }],
            subtotal_paise: 30000,
            tax_rate_bps: 0,
            tax_paise: 0,
            total_paise: 30000,
            sold_at: Utc::now(),
            operator_id: "cashier-1".to_string(),
        };
        store.ledger().append(sale).await.unwrap();

        (
            Reports::new(store.catalog().clone(), store.ledger().clone()),
            product.id,
        )
    }

    #[tokio::test]
    async fn test_today_rollup() {
        let (reports, _) = reports_with_data().await;

        let today = reports.today().await;
        assert_eq!(today.sales_count, 1);
        assert_eq!(today.total_sales_paise, 30000);
        assert_eq!(today.total_quantity, 3);
    }

    #[tokio::test]
    async fn test_top_sellers_and_profit() {
        let (reports, product_id) = reports_with_data().await;

        let top = reports.top_sellers(5).await;
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].product_id, product_id);
        assert_eq!(top[0].quantity_sold, 3);

        // Revenue 30000 - cost 18000
        assert_eq!(reports.total_profit().await, 12000);
    }

    #[tokio::test]
    async fn test_aggregates_deterministic_over_unchanged_ledger() {
        let (reports, _) = reports_with_data().await;

        let first = (
            reports.monthly().await,
            reports.top_sellers(10).await,
            reports.total_profit().await,
        );
        let second = (
            reports.monthly().await,
            reports.top_sellers(10).await,
            reports.total_profit().await,
        );
        assert_eq!(first, second);
    }
}
