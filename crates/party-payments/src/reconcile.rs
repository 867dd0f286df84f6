//! Reconciliation Orchestrator
//!
//! Turns one gateway redirect into the matching backend state change.
//!
//! ```text
//! run(query)
//!   ├─ guard already entered ───────────────▶ None (re-entry suppressed)
//!   ├─ callback invalid ────────────────────▶ Failed(InvalidCallback)
//!   ├─ no intent ───────────────────────────▶ Failed(MissingIntent)
//!   ├─ CREATE_PARTY
//!   │    confirm deposit ── ok ─────────────▶ Confirmed
//!   │                    ── processed ──────▶ AlreadyProcessed
//!   │                    ── not found ─┐
//!   │    create party + confirm once ◀─┘ ───▶ RecoveredAndConfirmed | Failed
//!   ├─ JOIN_PARTY
//!   │    confirm join ── ok / processed ────▶ billing hand-off, Confirmed | AlreadyProcessed
//!   │                    hand-off not saved ▶ Failed(Storage)
//!   └─ unknown type ────────────────────────▶ Failed(UnknownIntentType)
//! ```
//!
//! The intent is read once per run and cleared only after the backend has
//! reported success (or prior success). Any backend failure leaves it in place
//! so revisiting the callback URL can try again; the backend's `orderId`
//! idempotency keeps repeated attempts from double-charging.

use party_core::{
    CreatePartyRequest, FailureReason, GatewayCallback, IntentType, PartyId, PaymentConfirmation,
    PendingIntent, ReconciliationOutcome, Route,
};
use tracing::Instrument;

use crate::client::PartyServiceClient;
use crate::error::{PaymentError, ServiceError};
use crate::guard::ExecutionGuard;
use crate::store::{BillingHandoff, IntentStore, KeyValueStore};

/// One orchestrator per page mount
pub struct Reconciler<C, S> {
    client: C,
    intents: IntentStore<S>,
    guard: ExecutionGuard,
}

impl<C: PartyServiceClient, S: KeyValueStore> Reconciler<C, S> {
    pub const fn new(client: C, store: S) -> Self {
        Self {
            client,
            intents: IntentStore::new(store),
            guard: ExecutionGuard::new(),
        }
    }

    pub const fn client(&self) -> &C {
        &self.client
    }

    pub const fn intents(&self) -> &IntentStore<S> {
        &self.intents
    }

    /// Reconcile the redirect described by `query`.
    ///
    /// Returns `None` when this instance has already run.
    pub async fn run(&self, query: &str) -> Option<ReconciliationOutcome> {
        if !self.guard.try_enter() {
            tracing::warn!("Reconciliation already started for this page; ignoring re-entry");
            return None;
        }

        let outcome = self.reconcile(query).await;
        match &outcome {
            ReconciliationOutcome::Failed { reason } => {
                tracing::error!(reason = %reason, "Payment reconciliation failed");
            }
            success => {
                tracing::info!(
                    outcome = success.label(),
                    route = ?success.route().map(Route::path),
                    "Payment reconciled"
                );
            }
        }
        Some(outcome)
    }

    async fn reconcile(&self, query: &str) -> ReconciliationOutcome {
        let callback = match GatewayCallback::from_query(query) {
            Ok(callback) => callback,
            Err(e) => {
                return ReconciliationOutcome::failed(FailureReason::InvalidCallback(e.to_string()));
            }
        };

        let Some(intent) = self.intents.load() else {
            return ReconciliationOutcome::failed(FailureReason::MissingIntent);
        };

        let span = tracing::info_span!(
            "reconcile",
            order_id = %callback.order_id,
            amount = callback.amount,
            intent_type = %intent.intent_type,
            clear_failed = tracing::field::Empty,
        );
        let confirmation = PaymentConfirmation::from(&callback);

        async {
            match &intent.intent_type {
                IntentType::CreateParty => self.settle_leader_deposit(&intent, &confirmation).await,
                IntentType::JoinParty => self.settle_join(&intent, &confirmation).await,
                IntentType::Unknown(raw) => {
                    // A record we cannot interpret will not become useful on retry.
                    self.clear_intent();
                    ReconciliationOutcome::failed(FailureReason::UnknownIntentType(raw.clone()))
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn settle_leader_deposit(
        &self,
        intent: &PendingIntent,
        confirmation: &PaymentConfirmation,
    ) -> ReconciliationOutcome {
        if let Some(party_id) = intent.party_id {
            match self.client.confirm_leader_deposit(party_id, confirmation).await {
                Ok(()) => {
                    tracing::info!(%party_id, "Leader deposit confirmed");
                    return self.complete(ReconciliationOutcome::Confirmed {
                        route: Route::create_flow_continuation(party_id),
                    });
                }
                Err(ServiceError::AlreadyProcessed) => {
                    tracing::info!(%party_id, "Leader deposit already settled");
                    return self.complete(ReconciliationOutcome::AlreadyProcessed {
                        route: Route::create_flow_continuation(party_id),
                    });
                }
                Err(ServiceError::NotFound(detail)) => {
                    tracing::warn!(%party_id, detail = %detail, "Party missing at deposit confirmation");
                }
                Err(e) => return ReconciliationOutcome::failed(e.into_failure()),
            }
        } else {
            tracing::info!("Intent has no party yet; creating it before confirming");
        }

        match &intent.creation_payload {
            Some(payload) => self.recreate_and_confirm(payload, confirmation).await,
            None => ReconciliationOutcome::failed(FailureReason::PartyNotFound),
        }
    }

    /// The single recovery attempt: one creation, one more confirmation.
    /// Whatever the second confirmation returns is final.
    async fn recreate_and_confirm(
        &self,
        payload: &CreatePartyRequest,
        confirmation: &PaymentConfirmation,
    ) -> ReconciliationOutcome {
        let new_party_id = match self.client.create_party(payload).await {
            Ok(party_id) => party_id,
            Err(e) => {
                tracing::warn!(error = %e, "Party re-creation failed");
                return ReconciliationOutcome::failed(e.into_failure());
            }
        };
        tracing::info!(%new_party_id, "Re-created party; retrying deposit confirmation");

        let route = Route::create_flow_continuation(new_party_id);
        match self.client.confirm_leader_deposit(new_party_id, confirmation).await {
            Ok(()) => self.complete(ReconciliationOutcome::RecoveredAndConfirmed {
                new_party_id,
                route,
            }),
            Err(ServiceError::AlreadyProcessed) => {
                self.complete(ReconciliationOutcome::AlreadyProcessed { route })
            }
            Err(e) => ReconciliationOutcome::failed(e.into_failure()),
        }
    }

    async fn settle_join(
        &self,
        intent: &PendingIntent,
        confirmation: &PaymentConfirmation,
    ) -> ReconciliationOutcome {
        let Some(party_id) = intent.party_id else {
            return ReconciliationOutcome::failed(FailureReason::MissingIntent);
        };

        let already_processed = match self.client.confirm_join(party_id, confirmation).await {
            Ok(()) => false,
            Err(ServiceError::AlreadyProcessed) => true,
            Err(e) => return ReconciliationOutcome::failed(e.into_failure()),
        };
        tracing::info!(%party_id, already_processed, "Party join confirmed");

        // Without the flags the billing page cannot send the member back, so
        // the intent stays and a reload resumes through AlreadyProcessed.
        if let Err(e) = self.hand_off_to_billing(party_id) {
            tracing::error!(error = %e, %party_id, "Could not persist billing hand-off");
            return ReconciliationOutcome::failed(FailureReason::Storage(e.to_string()));
        }

        let route = Route::BillingRegistration;
        self.complete(if already_processed {
            ReconciliationOutcome::AlreadyProcessed { route }
        } else {
            ReconciliationOutcome::Confirmed { route }
        })
    }

    /// Joining members must register a recurring-payment credential next.
    fn hand_off_to_billing(&self, party_id: PartyId) -> Result<(), PaymentError> {
        BillingHandoff::party_join(party_id).save(self.intents.store())
    }

    fn complete(&self, outcome: ReconciliationOutcome) -> ReconciliationOutcome {
        self.clear_intent();
        outcome
    }

    /// A failed clear does not change the outcome. The backend already holds
    /// the result, and a leftover intent replays as AlreadyProcessed.
    fn clear_intent(&self) {
        if let Err(e) = self.intents.clear() {
            tracing::Span::current().record("clear_failed", true);
            tracing::error!(error = %e, "Could not clear pending intent");
        }
    }
}
