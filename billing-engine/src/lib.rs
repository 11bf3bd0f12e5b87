//! Billing Engine - order finalization & bill-print workflow
//!
//! # 架构概述
//!
//! This crate turns an open kitchen order into a locked, printed bill:
//!
//! - **billing**: item filter policy, totals calculator, customer-info gate,
//!   the finalization state machine and the independent reprint path
//! - **client**: typed remote operations against the billing backend
//! - **store**: read/invalidate seam to the external order module
//!
//! # Module structure
//!
//! ```text
//! billing-engine/src/
//! ├── config.rs      # Environment-backed configuration
//! ├── logger.rs      # tracing bootstrap (console + rotating files)
//! ├── store.rs       # OrderStore seam + in-memory implementation
//! ├── client/        # BillingApi trait + reqwest implementation
//! └── billing/       # The workflow core
//! ```
//!
//! Everything around the workflow (bill rendering, routing, authentication,
//! transport retry policy) is a collaborator, not part of this crate.

pub mod billing;
pub mod client;
pub mod config;
pub mod logger;
pub mod store;

// Re-export 公共类型
pub use billing::{
    BillingError, BillingEvent, BillingResult, FinalizationController, FinalizeProgress,
    PostCommitHook, ReprintController, ReprintOutcome, compute_change, compute_totals,
    requires_customer_info, select_billable_items,
};
pub use client::{BillingApi, ClientError, ClientResult, HttpBillingApi};
pub use config::Config;
pub use logger::{cleanup_old_logs, init_logger, init_logger_with_file};
pub use store::{MemoryOrderStore, OrderStore};
