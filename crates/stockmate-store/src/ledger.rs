//! # Sales Ledger
//!
//! Append-only store of committed sales.
//!
//! ## Immutability
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Ledger Discipline                                    │
//! │                                                                         │
//! │  checkout ──► append(sale) ──► [Sale, Sale, Sale, ...]                 │
//! │                                        │                                │
//! │                                        ▼                                │
//! │                        query(range) / for_day(date) / all()            │
//! │                                        │                                │
//! │                                        ▼                                │
//! │                            reporting folds (read-only)                 │
//! │                                                                         │
//! │  There is no update, no void, no delete. Once appended, a sale's       │
//! │  fields never change, so re-running a report over an unchanged         │
//! │  ledger always yields identical aggregates.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::StoreResult;
use crate::events::{ChangeFeed, StoreEvent};
use crate::kv::{JsonStore, SALES_KEY};
use stockmate_core::Sale;

/// Repository for the append-only sales ledger.
#[derive(Debug, Clone)]
pub struct SalesLedger {
    kv: JsonStore,
    sales: Arc<RwLock<Vec<Sale>>>,
    feed: ChangeFeed,
}

impl SalesLedger {
    /// Opens the ledger, loading persisted sales (absent key → empty).
    pub async fn open(kv: JsonStore, feed: ChangeFeed) -> StoreResult<Self> {
        let sales: Vec<Sale> = kv.load_records(SALES_KEY).await?.unwrap_or_default();

        debug!(count = sales.len(), "Ledger loaded");

        Ok(SalesLedger {
            kv,
            sales: Arc::new(RwLock::new(sales)),
            feed,
        })
    }

    /// Appends a committed sale.
    ///
    /// The staged snapshot is persisted before the in-memory swap, so a
    /// failed write leaves the ledger exactly as it was.
    pub async fn append(&self, sale: Sale) -> StoreResult<()> {
        debug!(sale_id = %sale.id, total = sale.total_paise, "Appending sale");

        let sale_id = sale.id.clone();

        let mut sales = self.sales.write().await;
        let mut staged = sales.clone();
        staged.push(sale);

        self.kv.save_records(SALES_KEY, &staged).await?;
        *sales = staged;
        drop(sales);

        self.feed.publish(StoreEvent::SaleRecorded { sale_id });

        Ok(())
    }

    /// Returns all sales in append order.
    pub async fn all(&self) -> Vec<Sale> {
        self.sales.read().await.clone()
    }

    /// Returns sales whose timestamp falls within the inclusive range.
    /// `None` bounds are open-ended.
    pub async fn query(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Vec<Sale> {
        self.sales
            .read()
            .await
            .iter()
            .filter(|s| from.is_none_or(|f| s.sold_at >= f))
            .filter(|s| to.is_none_or(|t| s.sold_at <= t))
            .cloned()
            .collect()
    }

    /// Returns sales committed on the given UTC calendar day.
    pub async fn for_day(&self, date: NaiveDate) -> Vec<Sale> {
        self.sales
            .read()
            .await
            .iter()
            .filter(|s| s.sold_at.date_naive() == date)
            .cloned()
            .collect()
    }

    /// Number of committed sales.
    pub async fn len(&self) -> usize {
        self.sales.read().await.len()
    }

    /// Checks whether the ledger has no sales.
    pub async fn is_empty(&self) -> bool {
        self.sales.read().await.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
