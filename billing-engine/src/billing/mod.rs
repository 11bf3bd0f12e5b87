//! Order Finalization Module
//!
//! This module implements the finalize/print workflow:
//!
//! - **filter**: which line items participate in the printed bill
//! - **totals**: displayable bill totals derived from billable items
//! - **gate**: whether customer contact data must be collected first
//! - **finalize**: the state machine sequencing kitchen-ticket registration
//!   and price locking, with a per-order in-flight guard
//! - **reprint**: stand-alone re-issue path for already-printed bills
//!
//! # Finalize Flow
//!
//! ```text
//! initiate(master_id)
//!     ├─ billable items empty?     → validation error, no remote call
//!     ├─ customer info required?   → AwaitingCustomerInfo (suspend)
//!     ├─ register_kitchen_ticket   (skipped for dine-in)
//!     ├─ lock_sale_prices
//!     └─ Printed → clear order, post-commit hook, OrderPrinted event
//! ```
//!
//! Remote calls are the only suspension points; ticket registration always
//! strictly precedes price locking, and a failed registration means the
//! lock call is never issued.

pub mod error;
pub mod filter;
pub mod finalize;
pub mod gate;
pub mod reprint;
pub mod totals;

// Re-exports
pub use error::{BillingError, BillingResult};
pub use filter::{SEPARATE_PACKAGING_SUB_SKU, select_billable_items};
pub use finalize::{FinalizationController, FinalizeProgress, PostCommitHook};
pub use gate::requires_customer_info;
pub use reprint::{ReprintController, ReprintOutcome};
pub use totals::{compute_change, compute_totals};

/// Settle-event broadcast capacity, shared by both controllers
pub(crate) const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Signals emitted to the presentation layer and cart/navigation
/// collaborators once a sequence settles
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillingEvent {
    /// The bill was locked and printed; the order left the active list
    OrderPrinted { master_id: String },
    /// A reprint attempt finished; the reprint affordance can close now
    ReprintFinished { master_code: String, success: bool },
}
