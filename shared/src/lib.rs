//! Shared types for the bill finalization workflow
//!
//! Wire-facing domain types exchanged between the presentation layer,
//! the order module and the billing backend: orders, line items, payment
//! entries, derived bill totals and the API response envelope.
//! No business logic lives here.

pub mod response;
pub mod serde_util;
pub mod types;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use response::ApiResponse;
pub use types::{
    BillTotals, FinalizationState, FulfillmentType, LineItem, Order, PaymentEntry, PaymentMethod,
};
