//! # party-core
//!
//! Domain model for the payment-completion flow of the party marketplace.
//!
//! ## Flow
//!
//! ```text
//! ┌──────────────┐   redirect    ┌──────────────────┐   query    ┌───────────────────┐
//! │ Payment page │──────────────▶│ Payment gateway  │───────────▶│ /payment/success  │
//! │ saves intent │               │ (hosted)         │            │ reconciles intent │
//! └──────────────┘               └──────────────────┘            └───────────────────┘
//! ```
//!
//! This crate holds only values: what the payment was for ([`PendingIntent`]),
//! what the gateway handed back ([`GatewayCallback`]), and where the user goes
//! next ([`ReconciliationOutcome`], [`Route`]). Storage, the backend client and
//! the orchestrator live in `party-payments`.

pub mod callback;
pub mod error;
pub mod intent;
pub mod outcome;
pub mod route;

pub use callback::{GatewayCallback, PaymentConfirmation};
pub use error::{CallbackError, Result};
pub use intent::{CreatePartyRequest, IntentType, PartyId, PendingIntent};
pub use outcome::{FailureReason, ReconciliationOutcome};
pub use route::Route;
