//! Reconciliation Outcomes

use crate::intent::PartyId;
use crate::route::Route;

/// Why a reconciliation run could not complete
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FailureReason {
    /// Redirect parameters missing or malformed
    InvalidCallback(String),

    /// No usable intent in the store
    MissingIntent,

    /// The party the payment refers to does not exist and could not be re-created
    PartyNotFound,

    /// Stored intent names a type this flow does not handle
    UnknownIntentType(String),

    /// Backend rejected the request as invalid
    Validation(String),

    /// Network or unexpected backend failure
    Backend(String),

    /// Browser storage rejected a write the next step depends on
    Storage(String),
}

impl FailureReason {
    /// Short stable tag for logs
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidCallback(_) => "invalid_callback",
            Self::MissingIntent => "missing_intent",
            Self::PartyNotFound => "party_not_found",
            Self::UnknownIntentType(_) => "unknown_intent_type",
            Self::Validation(_) => "validation",
            Self::Backend(_) => "backend",
            Self::Storage(_) => "storage",
        }
    }

    /// General-terms message for the user-visible notice
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidCallback(_) => "The payment result could not be read. Please try again.",
            Self::MissingIntent => {
                "We could not find the payment you started. Please start again from the party page."
            }
            Self::PartyNotFound => "The party for this payment no longer exists.",
            Self::UnknownIntentType(_) => "This payment could not be matched to a request.",
            Self::Validation(_) => "The payment details were rejected. Please try again.",
            Self::Backend(_) => "Payment confirmation failed. Please try again shortly.",
            Self::Storage(_) => {
                "Your payment was received, but this browser could not save the next step. Please reload the page."
            }
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCallback(detail)
            | Self::UnknownIntentType(detail)
            | Self::Validation(detail)
            | Self::Backend(detail)
            | Self::Storage(detail) => write!(f, "{}: {detail}", self.code()),
            Self::MissingIntent | Self::PartyNotFound => f.write_str(self.code()),
        }
    }
}

/// Terminal result of one reconciliation run
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReconciliationOutcome {
    /// Backend applied the payment on this delivery
    Confirmed { route: Route },

    /// The party had vanished; it was re-created and the payment applied to it
    RecoveredAndConfirmed { new_party_id: PartyId, route: Route },

    /// Backend had already applied this order on an earlier delivery
    AlreadyProcessed { route: Route },

    Failed { reason: FailureReason },
}

impl ReconciliationOutcome {
    pub const fn failed(reason: FailureReason) -> Self {
        Self::Failed { reason }
    }

    pub const fn is_success(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }

    /// Route carried by a successful outcome
    pub const fn route(&self) -> Option<&Route> {
        match self {
            Self::Confirmed { route }
            | Self::RecoveredAndConfirmed { route, .. }
            | Self::AlreadyProcessed { route } => Some(route),
            Self::Failed { .. } => None,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Confirmed { .. } => "confirmed",
            Self::RecoveredAndConfirmed { .. } => "recovered_and_confirmed",
            Self::AlreadyProcessed { .. } => "already_processed",
            Self::Failed { .. } => "failed",
        }
    }
}
