//! # Change Feed
//!
//! Observer interface for store mutations.
//!
//! ## Why a Broadcast Channel?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Change Notification                                  │
//! │                                                                         │
//! │  Catalog mutation ──┐                                                  │
//! │  Ledger append ─────┼──► ChangeFeed.publish(event)                     │
//! │                     │            │                                      │
//! │                     │            ├──► subscriber: dashboard refresh    │
//! │                     │            ├──► subscriber: low-stock alerts     │
//! │                     │            └──► subscriber: (none is fine too)   │
//! │                                                                         │
//! │  Subscribers pull at their own pace; a publish with no receivers is    │
//! │  not an error. The core never knows what UI (if any) is listening.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tokio::sync::broadcast;

/// Channel capacity. Slow subscribers past this lag see `RecvError::Lagged`
/// and should re-read the store instead of replaying events.
const FEED_CAPACITY: usize = 256;

/// A store mutation notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// A product was created.
    ProductAdded { product_id: String },

    /// A product's descriptive fields changed.
    ProductUpdated { product_id: String },

    /// A product was removed from the catalog.
    ProductDeleted { product_id: String },

    /// A product's stock level changed (adjustment or checkout deduction).
    StockChanged { product_id: String, quantity: i64 },

    /// A sale was appended to the ledger.
    SaleRecorded { sale_id: String },
}

/// Broadcast sender handed to every repository.
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    tx: broadcast::Sender<StoreEvent>,
}

impl ChangeFeed {
    /// Creates a new feed with no subscribers.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(FEED_CAPACITY);
        ChangeFeed { tx }
    }

    /// Subscribes to future store events.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.tx.subscribe()
    }

    /// Publishes an event. Zero subscribers is not an error.
    pub fn publish(&self, event: StoreEvent) {
        let _ = self.tx.send(event);
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_without_subscribers_is_ok() {
        let feed = ChangeFeed::new();
        feed.publish(StoreEvent::ProductAdded {
            product_id: "p-1".to_string(),
        });
    }

    #[tokio::test]
    async fn test_subscriber_receives_events() {
        let feed = ChangeFeed::new();
        let mut rx = feed.subscribe();

        feed.publish(StoreEvent::StockChanged {
            product_id: "p-1".to_string(),
            quantity: 7,
        });

        let event = rx.recv().await.unwrap();
        assert_eq!(
            event,
            StoreEvent::StockChanged {
                product_id: "p-1".to_string(),
                quantity: 7,
            }
        );
    }

    #[tokio::test]
    async fn test_multiple_subscribers_all_receive() {
        let feed = ChangeFeed::new();
        let mut rx1 = feed.subscribe();
        let mut rx2 = feed.subscribe();

        feed.publish(StoreEvent::SaleRecorded {
            sale_id: "s-1".to_string(),
        });

        assert!(rx1.recv().await.is_ok());
        assert!(rx2.recv().await.is_ok());
    }
}
