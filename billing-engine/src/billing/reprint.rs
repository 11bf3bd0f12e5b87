//! Stand-alone reprint path for already-finalized bills
//!
//! Independent of the finalization state machine: a reprint never touches
//! finalize sessions and carries its own per-code in-flight guard.

use crate::billing::error::{BillingError, BillingResult};
use crate::billing::{BillingEvent, EVENT_CHANNEL_CAPACITY};
use crate::client::BillingApi;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Settled outcome of one reprint call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReprintOutcome {
    /// The backend accepted the reprint
    Completed,
    /// A reprint for this code is already in flight; this call was a no-op
    AlreadyInFlight,
}

/// Re-issues physical tickets for printed bills
pub struct ReprintController {
    api: Arc<dyn BillingApi>,
    in_flight: DashMap<String, ()>,
    event_tx: broadcast::Sender<BillingEvent>,
}

impl ReprintController {
    pub fn new(api: Arc<dyn BillingApi>) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            api,
            in_flight: DashMap::new(),
            event_tx,
        }
    }

    /// Subscribe to reprint-finished events
    pub fn subscribe(&self) -> broadcast::Receiver<BillingEvent> {
        self.event_tx.subscribe()
    }

    /// Re-issue the physical ticket for a finalized bill
    ///
    /// One reprint per master code at a time (duplicate taps are no-ops).
    /// `ReprintFinished` fires on success and failure alike so the
    /// presentation layer can close its reprint affordance either way.
    pub async fn reprint(&self, master_code: &str) -> BillingResult<ReprintOutcome> {
        if self.in_flight.insert(master_code.to_string(), ()).is_some() {
            tracing::debug!(master_code, "reprint already in flight, ignoring");
            return Ok(ReprintOutcome::AlreadyInFlight);
        }

        let resolution = self.api.reprint_bill(master_code).await;
        self.in_flight.remove(master_code);

        let outcome = match resolution {
            Ok(resp) if resp.success => Ok(ReprintOutcome::Completed),
            Ok(resp) => Err(BillingError::Reprint(
                resp.message_or("rejected by backend"),
            )),
            Err(e) => Err(BillingError::Reprint(e.to_string())),
        };

        if let Err(e) = &outcome {
            tracing::warn!(master_code, error = %e, "reprint failed");
        }
        let _ = self.event_tx.send(BillingEvent::ReprintFinished {
            master_code: master_code.to_string(),
            success: outcome.is_ok(),
        });

        outcome
    }
}
