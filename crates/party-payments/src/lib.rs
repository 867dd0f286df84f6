//! # party-payments
//!
//! Payment-completion reconciliation for party deposits and joins.
//!
//! ## Gateway Return Flow
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────────────────┐
//! │ Callback URL │──▶│ Reconciler   │──▶│ Party API    │   │ PostCompletionRouter │
//! │ ?paymentKey  │   │ + IntentStore│◀──│ (HTTP/fake)  │   │ outcome → next route │
//! └──────────────┘   └──────┬───────┘   └──────────────┘   └──────────▲───────────┘
//!                           └──────────── ReconciliationOutcome ──────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use party_payments::{HttpPartyServiceClient, MemoryKeyValueStore, PostCompletionRouter, Reconciler};
//!
//! let reconciler = Reconciler::new(HttpPartyServiceClient::from_env()?, MemoryKeyValueStore::new());
//!
//! if let Some(outcome) = reconciler.run("?paymentKey=pk_1&orderId=order_1&amount=10000").await {
//!     let navigation = PostCompletionRouter::navigation(&outcome);
//!     // show navigation.notice, then go to navigation.target.path()
//! }
//! ```

mod client;
mod config;
mod error;
mod guard;
mod reconcile;
mod router;
mod store;

pub use client::{
    CreatePartyResponse, HttpPartyServiceClient, PARTIES_PATH, PartyServiceClient, join_path,
    leader_deposit_path,
};
pub use config::ApiConfig;
pub use error::{ApiErrorBody, PaymentError, Result, ServiceError, ServiceResult};
pub use guard::ExecutionGuard;
pub use reconcile::Reconciler;
pub use router::{Navigation, Notice, PostCompletionRouter};
pub use store::{
    AFTER_BILLING_REDIRECT_KEY, BILLING_REGISTRATION_REASON_KEY, BillingHandoff, IntentStore,
    KeyValueStore, MemoryKeyValueStore, PARTY_JOIN_REASON, PENDING_INTENT_KEY,
};
