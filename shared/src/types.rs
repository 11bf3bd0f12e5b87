//! Domain types for order finalization and bill printing

use crate::serde_util::{lenient_f64, lenient_i64};
use serde::{Deserialize, Serialize};

// ============================================================================
// Fulfillment Type
// ============================================================================

/// Fulfillment type - governs kitchen-ticket routing and whether a bill
/// prints from the counter or is tied to a kitchen ticket
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FulfillmentType {
    /// 堂食
    #[default]
    DineIn,
    /// 外带/打包
    TakeAway,
    DriveThrough,
    HomeDelivery,
}

// ============================================================================
// Order & Line Items
// ============================================================================

/// One open tab as read from the order module
///
/// Owned by the external cart module; the workflow core only reads it and
/// requests its invalidation after a successful bill print.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Opaque order identifier
    pub master_id: String,
    pub fulfillment_type: FulfillmentType,
    #[serde(default)]
    pub items: Vec<LineItem>,
    /// Customer phone on file, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
}

/// Line item snapshot - immutable once received by the workflow core
///
/// Numeric fields arrive from a backend that sometimes serializes them as
/// strings; they deserialize leniently (missing / non-numeric become 0).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    pub sku_code: String,
    #[serde(default)]
    pub sub_sku_code: String,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub quantity: i64,
    /// Gross line amount
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_amount: f64,
    /// Taxable base for this line
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_taxable: f64,
    /// Tax for this line
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_tax: f64,
    /// Kitchen ticket number; 0 = not yet sent to the kitchen
    #[serde(default, deserialize_with = "lenient_i64")]
    pub kitchen_ticket_number: i64,
}

impl LineItem {
    /// True once the kitchen has assigned a ticket number to this line
    pub fn is_ticketed(&self) -> bool {
        self.kitchen_ticket_number != 0
    }
}

// ============================================================================
// Payments
// ============================================================================

/// Payment method
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Card,
    Other,
}

/// One payment entry against a bill
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentEntry {
    pub method: PaymentMethod,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub amount: f64,
}

// ============================================================================
// Derived Totals
// ============================================================================

/// Displayable bill totals
///
/// Derived, never stored: recomputed from the current billable item set on
/// every render, so it cannot drift from its inputs.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct BillTotals {
    pub subtotal_taxable: f64,
    pub total_tax: f64,
    pub discount: f64,
    pub additional_charges: f64,
    /// `subtotal_taxable + total_tax + additional_charges - discount`
    ///
    /// May be negative (upstream pricing anomaly, displayed as-is).
    pub net_total: f64,
}

// ============================================================================
// Finalization State
// ============================================================================

/// Lifecycle of one finalize sequence
///
/// Transitions move forward only; the single allowed re-entry is
/// `Failed -> Idle` on an explicit user retry. `Printed` is terminal for
/// the sequence - reprints go through the independent reprint path.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinalizationState {
    #[default]
    Idle,
    AwaitingCustomerInfo,
    RegisteringTicket,
    LockingPrice,
    Printed,
    Failed,
}
