//! Order store seam
//!
//! Persisted cart/order state is owned by an external order-management
//! module. The workflow core reads the current snapshot, asks for a refresh
//! after updating customer data, and requests invalidation once a bill is
//! printed - nothing more.

use async_trait::async_trait;
use dashmap::DashMap;
use shared::Order;

/// Read/invalidate access to the external order module
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Current snapshot for an order, if it is still on the active list
    async fn current_order(&self, master_id: &str) -> Option<Order>;

    /// Remove the order from the active list after a successful bill print
    async fn clear_order(&self, master_id: &str);

    /// Re-fetch the order after out-of-band changes (e.g. customer update)
    async fn refresh_order(&self, master_id: &str);
}

/// In-process [`OrderStore`] used by tests and local tooling
#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    orders: DashMap<String, Order>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an order snapshot
    pub fn put_order(&self, order: Order) {
        self.orders.insert(order.master_id.clone(), order);
    }

    /// Whether the order is still on the active list
    pub fn contains(&self, master_id: &str) -> bool {
        self.orders.contains_key(master_id)
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn current_order(&self, master_id: &str) -> Option<Order> {
        self.orders.get(master_id).map(|entry| entry.clone())
    }

    async fn clear_order(&self, master_id: &str) {
        self.orders.remove(master_id);
    }

    async fn refresh_order(&self, _master_id: &str) {
        // Snapshots are authoritative in memory; nothing to re-fetch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::FulfillmentType;

    fn order(master_id: &str) -> Order {
        Order {
            master_id: master_id.to_string(),
            fulfillment_type: FulfillmentType::DineIn,
            items: vec![],
            customer_phone: None,
        }
    }

    #[tokio::test]
    async fn test_put_get_clear() {
        let store = MemoryOrderStore::new();
        store.put_order(order("m-1"));

        assert!(store.contains("m-1"));
        assert!(store.current_order("m-1").await.is_some());
        assert!(store.current_order("m-2").await.is_none());

        store.clear_order("m-1").await;
        assert!(!store.contains("m-1"));
        assert!(store.current_order("m-1").await.is_none());
    }
}
