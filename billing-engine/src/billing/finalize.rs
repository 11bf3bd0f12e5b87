//! FinalizationController - the state machine behind "print bill"
//!
//! One controller serves every open order; per-order sequences live in a
//! session map keyed by `master_id`. A sequence moves forward only:
//!
//! ```text
//! Idle ─ initiate ─┬─ AwaitingCustomerInfo ─ supply_customer_info ─┐
//!                  └────────────────────────────────────────────────┤
//!                  RegisteringTicket → LockingPrice → Printed
//!                                 └─────────┴→ Failed ─ retry → Idle
//! ```
//!
//! The in-flight flag inside each session is the only mutable shared state;
//! it is owned and mutated exclusively by this controller, so a duplicate
//! `initiate` tap can never produce a second remote call pair even when the
//! UI forgets to disable its button.

use crate::billing::error::{BillingError, BillingResult};
use crate::billing::filter::select_billable_items;
use crate::billing::gate::requires_customer_info;
use crate::billing::{BillingEvent, EVENT_CHANNEL_CAPACITY};
use crate::client::{ApiResult, BillingApi};
use crate::store::OrderStore;
use async_trait::async_trait;
use dashmap::DashMap;
use shared::{FinalizationState, FulfillmentType, Order};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Hook awaited after a successful price lock, before the sequence is
/// declared finished (e.g. proceeding to payment capture)
#[async_trait]
pub trait PostCommitHook: Send + Sync {
    async fn after_print(&self, order: &Order);
}

/// Settled outcome of one workflow call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalizeProgress {
    /// Suspended: customer contact data must be supplied first
    AwaitingCustomerInfo,
    /// The bill was locked and printed
    Printed,
    /// A sequence for this order is already in flight; this call was a no-op
    AlreadyInFlight,
    /// The order was cleared while a call was in flight; resolution dropped
    Stale,
}

/// Per-order finalize session
#[derive(Debug, Default)]
struct FinalizeSession {
    state: FinalizationState,
    /// 每单并发防护
    in_flight: bool,
    /// Phone entered at the gate this sequence (survives a failed attempt)
    pending_phone: Option<String>,
}

/// Result of the entry guard
enum Begin {
    Proceed,
    InFlight,
    Invalid(FinalizationState),
}

/// Orchestrates kitchen-ticket registration, price locking and the
/// post-commit hand-off for open orders
pub struct FinalizationController {
    api: Arc<dyn BillingApi>,
    store: Arc<dyn OrderStore>,
    sessions: DashMap<String, FinalizeSession>,
    event_tx: broadcast::Sender<BillingEvent>,
    post_commit: Option<Arc<dyn PostCommitHook>>,
}

impl std::fmt::Debug for FinalizationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinalizationController")
            .field("sessions", &self.sessions.len())
            .finish()
    }
}

impl FinalizationController {
    /// Create a controller over the given backend client and order store
    pub fn new(api: Arc<dyn BillingApi>, store: Arc<dyn OrderStore>) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            api,
            store,
            sessions: DashMap::new(),
            event_tx,
            post_commit: None,
        }
    }

    /// Attach a hook that runs after a successful price lock
    pub fn with_post_commit_hook(mut self, hook: Arc<dyn PostCommitHook>) -> Self {
        self.post_commit = Some(hook);
        self
    }

    /// Subscribe to settle events
    pub fn subscribe(&self) -> broadcast::Receiver<BillingEvent> {
        self.event_tx.subscribe()
    }

    /// Current state for an order (`Idle` when no sequence was started)
    pub fn state(&self, master_id: &str) -> FinalizationState {
        self.sessions
            .get(master_id)
            .map(|session| session.state)
            .unwrap_or_default()
    }

    /// Begin finalizing an order
    ///
    /// Evaluates the customer-info gate and, once satisfied, runs the
    /// commit sequence. Returns `AlreadyInFlight` without touching anything
    /// when a sequence for this order is still running.
    pub async fn initiate(&self, master_id: &str) -> BillingResult<FinalizeProgress> {
        match self.begin_initiate(master_id) {
            Begin::Proceed => {}
            Begin::InFlight => {
                tracing::debug!(master_id, "finalize already in flight, ignoring");
                return Ok(FinalizeProgress::AlreadyInFlight);
            }
            Begin::Invalid(state) => {
                return Err(BillingError::InvalidState(format!(
                    "cannot initiate finalization from {:?}",
                    state
                )));
            }
        }
        self.run_from_top(master_id).await
    }

    /// Resume a sequence suspended on the customer-info gate
    ///
    /// The number is remembered for the rest of the sequence and persisted
    /// best-effort; a failed persist is reported and does not block the
    /// commit.
    pub async fn supply_customer_info(
        &self,
        master_id: &str,
        phone: &str,
    ) -> BillingResult<FinalizeProgress> {
        let phone = phone.trim();
        if phone.is_empty() {
            return Err(BillingError::PhoneRequired);
        }

        match self.begin_supply(master_id) {
            Begin::Proceed => {}
            Begin::InFlight => {
                tracing::debug!(master_id, "finalize already in flight, ignoring");
                return Ok(FinalizeProgress::AlreadyInFlight);
            }
            Begin::Invalid(state) => {
                return Err(BillingError::InvalidState(format!(
                    "no customer info expected in {:?}",
                    state
                )));
            }
        }

        // Remember the number first: the gate is satisfied even if the
        // remote update fails.
        if let Some(mut session) = self.sessions.get_mut(master_id) {
            session.pending_phone = Some(phone.to_string());
        }

        match self.api.update_customer_number(master_id, phone).await {
            Ok(resp) if resp.success => self.store.refresh_order(master_id).await,
            Ok(resp) => {
                let message = resp.message_or("rejected");
                tracing::warn!(master_id, %message, "customer number update rejected");
            }
            Err(e) => {
                tracing::warn!(master_id, error = %e, "customer number update failed");
            }
        }

        self.run_from_top(master_id).await
    }

    /// Re-run a failed sequence from the top with the same order snapshot
    ///
    /// Never resumes mid-sequence: a retry after a failed price lock issues
    /// the kitchen-ticket call again as well.
    pub async fn retry(&self, master_id: &str) -> BillingResult<FinalizeProgress> {
        match self.begin_retry(master_id) {
            Begin::Proceed => {}
            Begin::InFlight => {
                tracing::debug!(master_id, "finalize already in flight, ignoring");
                return Ok(FinalizeProgress::AlreadyInFlight);
            }
            Begin::Invalid(state) => {
                return Err(BillingError::InvalidState(format!(
                    "retry is only valid after a failure, not from {:?}",
                    state
                )));
            }
        }
        self.run_from_top(master_id).await
    }

    // ========== entry guards ==========

    fn begin_initiate(&self, master_id: &str) -> Begin {
        let mut session = self.sessions.entry(master_id.to_string()).or_default();
        if session.in_flight {
            return Begin::InFlight;
        }
        match session.state {
            FinalizationState::Idle | FinalizationState::AwaitingCustomerInfo => {
                session.in_flight = true;
                Begin::Proceed
            }
            state => Begin::Invalid(state),
        }
    }

    fn begin_supply(&self, master_id: &str) -> Begin {
        let Some(mut session) = self.sessions.get_mut(master_id) else {
            return Begin::Invalid(FinalizationState::Idle);
        };
        if session.in_flight {
            return Begin::InFlight;
        }
        if session.state != FinalizationState::AwaitingCustomerInfo {
            return Begin::Invalid(session.state);
        }
        session.in_flight = true;
        Begin::Proceed
    }

    fn begin_retry(&self, master_id: &str) -> Begin {
        let Some(mut session) = self.sessions.get_mut(master_id) else {
            return Begin::Invalid(FinalizationState::Idle);
        };
        if session.in_flight {
            return Begin::InFlight;
        }
        if session.state != FinalizationState::Failed {
            return Begin::Invalid(session.state);
        }
        // Failed -> Idle is the single allowed re-entry
        session.state = FinalizationState::Idle;
        session.in_flight = true;
        Begin::Proceed
    }

    // ========== sequence ==========

    /// Run the full sequence: validation, gate, then the commit calls
    async fn run_from_top(&self, master_id: &str) -> BillingResult<FinalizeProgress> {
        let Some(order) = self.store.current_order(master_id).await else {
            self.sessions.remove(master_id);
            return Err(BillingError::OrderNotFound(master_id.to_string()));
        };

        // An empty billable set never reaches a remote call
        let billable = select_billable_items(&order.items, order.fulfillment_type);
        if billable.is_empty() {
            self.settle(master_id, FinalizationState::Idle);
            return Err(BillingError::NoBillableItems);
        }

        let known_phone = order.customer_phone.clone().or_else(|| {
            self.sessions
                .get(master_id)
                .and_then(|session| session.pending_phone.clone())
        });
        if requires_customer_info(order.fulfillment_type, known_phone.as_deref()) {
            self.settle(master_id, FinalizationState::AwaitingCustomerInfo);
            return Ok(FinalizeProgress::AwaitingCustomerInfo);
        }

        self.run_commit_sequence(&order).await
    }

    /// Kitchen-ticket registration followed by the price lock
    ///
    /// Registration strictly precedes the lock; when registration fails the
    /// lock call is never issued, so there is no partial commit to unwind.
    async fn run_commit_sequence(&self, order: &Order) -> BillingResult<FinalizeProgress> {
        let master_id = order.master_id.as_str();

        // Dine-in bills print from the counter; no kitchen ticket round-trip
        if order.fulfillment_type != FulfillmentType::DineIn {
            self.set_state(master_id, FinalizationState::RegisteringTicket);
            let resolution = self.api.register_kitchen_ticket(master_id).await;
            if self.order_cleared(master_id).await {
                return Ok(self.discard(master_id));
            }
            if let Err(message) = settled(resolution) {
                tracing::warn!(master_id, %message, "kitchen ticket registration failed");
                self.settle(master_id, FinalizationState::Failed);
                return Err(BillingError::TicketRegistration(message));
            }
        }

        self.set_state(master_id, FinalizationState::LockingPrice);
        let resolution = self.api.lock_sale_prices(master_id).await;
        if self.order_cleared(master_id).await {
            return Ok(self.discard(master_id));
        }
        if let Err(message) = settled(resolution) {
            tracing::warn!(master_id, %message, "price lock failed");
            self.settle(master_id, FinalizationState::Failed);
            return Err(BillingError::PriceLock(message));
        }

        // Commit: mark printed, hand the order back to the cart module
        self.settle(master_id, FinalizationState::Printed);
        self.store.clear_order(master_id).await;
        if let Some(hook) = &self.post_commit {
            hook.after_print(order).await;
        }
        tracing::info!(master_id, "bill printed");
        if self
            .event_tx
            .send(BillingEvent::OrderPrinted {
                master_id: master_id.to_string(),
            })
            .is_err()
        {
            tracing::debug!("event broadcast skipped: no active receivers");
        }
        Ok(FinalizeProgress::Printed)
    }

    // ========== session helpers ==========

    fn set_state(&self, master_id: &str, state: FinalizationState) {
        if let Some(mut session) = self.sessions.get_mut(master_id) {
            session.state = state;
        }
    }

    /// Record the settled state and release the in-flight flag
    fn settle(&self, master_id: &str, state: FinalizationState) {
        if let Some(mut session) = self.sessions.get_mut(master_id) {
            session.state = state;
            session.in_flight = false;
        }
    }

    async fn order_cleared(&self, master_id: &str) -> bool {
        self.store.current_order(master_id).await.is_none()
    }

    /// Drop a stale resolution: the order left the cart while a call was in
    /// flight, so nothing may be mutated on its behalf
    fn discard(&self, master_id: &str) -> FinalizeProgress {
        tracing::debug!(master_id, "order cleared mid-flight, dropping resolution");
        self.sessions.remove(master_id);
        FinalizeProgress::Stale
    }
}

/// Fold a backend resolution into success or a user-facing message
fn settled(resolution: ApiResult) -> Result<(), String> {
    match resolution {
        Ok(resp) if resp.success => Ok(()),
        Ok(resp) => Err(resp.message_or("rejected by backend")),
        Err(e) => Err(e.to_string()),
    }
}
