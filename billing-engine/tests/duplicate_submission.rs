//! Duplicate-submission guard under concurrent load
//!
//! A burst of finalize taps for the same order must result in exactly one
//! kitchen-ticket/price-lock call pair, while different orders finalize
//! independently.

use async_trait::async_trait;
use billing_engine::{
    BillingApi, FinalizationController, FinalizeProgress, MemoryOrderStore,
    client::ApiResult,
};
use shared::{ApiResponse, FulfillmentType, LineItem, Order};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::time::{Duration, sleep};

#[derive(Default)]
struct CountingApi {
    tickets: AtomicUsize,
    locks: AtomicUsize,
}

#[async_trait]
impl BillingApi for CountingApi {
    async fn update_customer_number(&self, _master_id: &str, _phone: &str) -> ApiResult {
        Ok(ApiResponse::ok_empty())
    }

    async fn register_kitchen_ticket(&self, _master_id: &str) -> ApiResult {
        self.tickets.fetch_add(1, Ordering::SeqCst);
        sleep(Duration::from_millis(10)).await;
        Ok(ApiResponse::ok_empty())
    }

    async fn lock_sale_prices(&self, _master_id: &str) -> ApiResult {
        self.locks.fetch_add(1, Ordering::SeqCst);
        sleep(Duration::from_millis(10)).await;
        Ok(ApiResponse::ok_empty())
    }

    async fn reprint_bill(&self, _master_code: &str) -> ApiResult {
        Ok(ApiResponse::ok_empty())
    }
}

fn takeaway_order(master_id: &str) -> Order {
    Order {
        master_id: master_id.to_string(),
        fulfillment_type: FulfillmentType::TakeAway,
        items: vec![LineItem {
            sku_code: format!("SKU-{}", uuid::Uuid::new_v4()),
            sub_sku_code: "1".to_string(),
            quantity: 2,
            total_amount: 23.6,
            total_taxable: 20.0,
            total_tax: 3.6,
            kitchen_ticket_number: 0,
        }],
        customer_phone: Some("612345678".to_string()),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn burst_of_taps_yields_one_call_pair() {
    let api = Arc::new(CountingApi::default());
    let store = Arc::new(MemoryOrderStore::new());
    store.put_order(takeaway_order("m-1"));
    let controller = Arc::new(FinalizationController::new(api.clone(), store.clone()));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let controller = controller.clone();
        handles.push(tokio::spawn(async move { controller.initiate("m-1").await }));
    }

    let mut printed = 0;
    let mut noops = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(FinalizeProgress::Printed) => printed += 1,
            Ok(FinalizeProgress::AlreadyInFlight) => noops += 1,
            // A tap landing after completion is rejected, never re-submitted
            Err(_) => {}
            Ok(other) => panic!("unexpected progress: {:?}", other),
        }
    }

    assert_eq!(printed, 1, "exactly one tap wins");
    assert_eq!(api.tickets.load(Ordering::SeqCst), 1);
    assert_eq!(api.locks.load(Ordering::SeqCst), 1);
    assert!(noops + printed <= 8);
    assert!(!store.contains("m-1"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn different_orders_finalize_independently() {
    let api = Arc::new(CountingApi::default());
    let store = Arc::new(MemoryOrderStore::new());
    for i in 0..5 {
        store.put_order(takeaway_order(&format!("m-{}", i)));
    }
    let controller = Arc::new(FinalizationController::new(api.clone(), store.clone()));

    let mut handles = Vec::new();
    for i in 0..5 {
        let controller = controller.clone();
        handles.push(tokio::spawn(async move {
            controller.initiate(&format!("m-{}", i)).await
        }));
    }

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), FinalizeProgress::Printed);
    }
    assert_eq!(api.tickets.load(Ordering::SeqCst), 5);
    assert_eq!(api.locks.load(Ordering::SeqCst), 5);
}
