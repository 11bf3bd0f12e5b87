use crate::client::ClientError;
use thiserror::Error;

/// Workflow errors
///
/// Validation variants are raised before any remote call; the remote
/// variants carry the backend message for the presentation layer. Stale
/// resolutions are not errors and never surface here.
#[derive(Debug, Error)]
pub enum BillingError {
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("No billable items on the order")]
    NoBillableItems,

    #[error("Customer phone number is required")]
    PhoneRequired,

    #[error("Invalid operation: {0}")]
    InvalidState(String),

    #[error("Kitchen ticket registration failed: {0}")]
    TicketRegistration(String),

    #[error("Price lock failed: {0}")]
    PriceLock(String),

    #[error("Reprint failed: {0}")]
    Reprint(String),

    #[error("Client error: {0}")]
    Client(#[from] ClientError),
}

impl BillingError {
    /// Validation errors are handled locally and never reach a remote call
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            BillingError::NoBillableItems
                | BillingError::PhoneRequired
                | BillingError::InvalidState(_)
                | BillingError::OrderNotFound(_)
        )
    }
}

pub type BillingResult<T> = Result<T, BillingError>;
