//! Post-Completion Routing
//!
//! Pure mapping from a reconciliation outcome to where the user goes next.

use party_core::{FailureReason, ReconciliationOutcome, Route};

/// User-visible error notice shown before leaving the page
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    pub fn for_failure(reason: &FailureReason) -> Self {
        Self {
            message: reason.user_message().to_string(),
        }
    }
}

/// Next screen plus an optional notice to show first
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    pub target: Route,
    pub notice: Option<Notice>,
}

pub struct PostCompletionRouter;

impl PostCompletionRouter {
    pub fn navigation(outcome: &ReconciliationOutcome) -> Navigation {
        match outcome {
            ReconciliationOutcome::Confirmed { route }
            | ReconciliationOutcome::RecoveredAndConfirmed { route, .. }
            | ReconciliationOutcome::AlreadyProcessed { route } => Navigation {
                target: route.clone(),
                notice: None,
            },
            ReconciliationOutcome::Failed { reason } => Navigation {
                target: Route::Home,
                notice: Some(Notice::for_failure(reason)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use party_core::PartyId;

    #[test]
    fn test_success_outcomes_follow_route_silently() {
        let route = Route::create_flow_continuation(PartyId::new(99));
        for outcome in [
            ReconciliationOutcome::Confirmed { route: route.clone() },
            ReconciliationOutcome::RecoveredAndConfirmed {
                new_party_id: PartyId::new(99),
                route: route.clone(),
            },
            ReconciliationOutcome::AlreadyProcessed { route: route.clone() },
        ] {
            let navigation = PostCompletionRouter::navigation(&outcome);
            assert_eq!(navigation.target, route);
            assert!(navigation.notice.is_none());
        }
    }

    #[test]
    fn test_failure_goes_home_with_notice() {
        let outcome = ReconciliationOutcome::failed(FailureReason::Backend("HTTP 500".into()));
        let navigation = PostCompletionRouter::navigation(&outcome);

        assert_eq!(navigation.target, Route::Home);
        let notice = navigation.notice.unwrap();
        assert!(!notice.message.contains("HTTP 500"));
        assert_eq!(notice.message, FailureReason::Backend(String::new()).user_message());
    }
}
