//! # Reporting Module
//!
//! Read-side folds over the sales ledger.
//!
//! ## Position in the Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Reporting Data Flow                                  │
//! │                                                                         │
//! │  Sales Ledger (append-only) ──► query(range) ──► &[Sale]              │
//! │                                                      │                  │
//! │                                                      ▼                  │
//! │                                    THIS MODULE: pure folds             │
//! │                                                      │                  │
//! │              ┌───────────────┬───────────────┬──────┴──────┐           │
//! │              ▼               ▼               ▼             ▼           │
//! │        daily rollup    monthly rollup   top sellers     profit        │
//! │                                                                         │
//! │  Reporting never writes. The same ledger slice always yields the       │
//! │  same aggregates: grouping uses ordered maps and ties break on         │
//! │  product id, so output order is fully determined by the input.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Product, Sale};

// =============================================================================
// Report Types
// =============================================================================

/// Sales rollup for a single calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DailySalesReport {
    /// The day being reported (UTC calendar date).
    #[ts(as = "String")]
    pub date: NaiveDate,

    /// Sum of sale grand totals, in paise.
    pub total_sales_paise: i64,

    /// Total units sold.
    pub total_quantity: i64,

    /// Number of sales committed that day.
    pub sales_count: usize,
}

/// Sales rollup for a calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySalesReport {
    /// Month key in `YYYY-MM` form.
    pub month: String,

    /// Sum of sale grand totals, in paise.
    pub total_sales_paise: i64,

    /// Number of sales committed that month.
    pub sales_count: usize,
}

/// Aggregate performance of one product across the queried sales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TopSellingProduct {
    pub product_id: String,

    /// Name as frozen on the most recent sale item seen.
    pub product_name: String,

    /// Units sold across all matching sales.
    pub quantity_sold: i64,

    /// Revenue (sum of line totals) in paise.
    pub revenue_paise: i64,
}

// =============================================================================
// Folds
// =============================================================================

/// Computes the rollup for one calendar day.
pub fn daily_sales_report(sales: &[Sale], date: NaiveDate) -> DailySalesReport {
    let mut total_sales_paise = 0;
    let mut total_quantity = 0;
    let mut sales_count = 0;

    for sale in sales.iter().filter(|s| s.sold_at.date_naive() == date) {
        total_sales_paise += sale.total_paise;
        total_quantity += sale.total_quantity();
        sales_count += 1;
    }

    DailySalesReport {
        date,
        total_sales_paise,
        total_quantity,
        sales_count,
    }
}

/// Computes per-month rollups, sorted by month key.
pub fn monthly_sales_reports(sales: &[Sale]) -> Vec<MonthlySalesReport> {
    // BTreeMap keeps the YYYY-MM keys sorted without a second pass
    let mut months: BTreeMap<String, (i64, usize)> = BTreeMap::new();

    for sale in sales {
        let key = sale.sold_at.format("%Y-%m").to_string();
        let entry = months.entry(key).or_insert((0, 0));
        entry.0 += sale.total_paise;
        entry.1 += 1;
    }

    months
        .into_iter()
        .map(|(month, (total_sales_paise, sales_count))| MonthlySalesReport {
            month,
            total_sales_paise,
            sales_count,
        })
        .collect()
}

/// Ranks products by units sold across the given sales.
///
/// Ties on quantity break on product id so the ranking is stable for a
/// given ledger regardless of sale ordering quirks.
pub fn top_selling_products(sales: &[Sale], limit: usize) -> Vec<TopSellingProduct> {
    let mut by_product: BTreeMap<String, TopSellingProduct> = BTreeMap::new();

    for sale in sales {
        for item in &sale.items {
            let entry = by_product
                .entry(item.product_id.clone())
                .or_insert_with(|| TopSellingProduct {
                    product_id: item.product_id.clone(),
                    product_name: item.name.clone(),
                    quantity_sold: 0,
                    revenue_paise: 0,
                });
            entry.product_name = item.name.clone();
            entry.quantity_sold += item.quantity;
            entry.revenue_paise += item.line_total_paise;
        }
    }

    let mut ranked: Vec<TopSellingProduct> = by_product.into_values().collect();
    ranked.sort_by(|a, b| {
        b.quantity_sold
            .cmp(&a.quantity_sold)
            .then_with(|| a.product_id.cmp(&b.product_id))
    });
    ranked.truncate(limit);
    ranked
}

/// Total profit: revenue minus purchase cost of the matching catalog
/// products. Items whose product has been deleted contribute revenue the
/// ledger knows about but no cost, so they are skipped entirely rather
/// than counted as pure profit.
pub fn total_profit(sales: &[Sale], products: &[Product]) -> i64 {
    let mut revenue = 0;
    let mut cost = 0;

    for sale in sales {
        for item in &sale.items {
            if let Some(product) = products.iter().find(|p| p.id == item.product_id) {
                revenue += item.line_total_paise;
                cost += product.purchase_price_paise * item.quantity;
            }
        }
    }

    revenue - cost
}

/// Products whose stock has fallen strictly below the threshold.
pub fn low_stock_products(products: &[Product], threshold: i64) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.is_low_stock(threshold))
        .cloned()
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
