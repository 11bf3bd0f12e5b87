//! Remote billing operations
//!
//! The workflow core talks to the billing backend through the [`BillingApi`]
//! trait; `http.rs` provides the reqwest implementation. Transport policy
//! (timeouts, retries, TLS) lives behind this seam, never in the workflow.

mod http;

pub use http::HttpBillingApi;

use async_trait::async_trait;
use shared::ApiResponse;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Result of one backend billing operation
pub type ApiResult = ClientResult<ApiResponse<serde_json::Value>>;

/// Remote operations consumed by the finalize/reprint workflow
///
/// Every operation resolves to the backend envelope
/// `{ success, data?, message? }`; callers branch on `success` and use the
/// message for user-facing failure reporting.
#[async_trait]
pub trait BillingApi: Send + Sync {
    /// Persist the customer phone number for an order (best-effort)
    async fn update_customer_number(&self, master_id: &str, phone: &str) -> ApiResult;

    /// Register the kitchen ticket for an order
    ///
    /// Required before price locking for non-dine-in fulfillment types.
    async fn register_kitchen_ticket(&self, master_id: &str) -> ApiResult;

    /// Lock sale prices - the "bill print" commit
    async fn lock_sale_prices(&self, master_id: &str) -> ApiResult;

    /// Re-issue a physical ticket for an already-finalized bill
    async fn reprint_bill(&self, master_code: &str) -> ApiResult;
}
