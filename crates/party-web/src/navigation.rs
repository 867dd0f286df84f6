//! Leaving the payment pages
//!
//! Client-side routing only reaches the paths `App` registers. Party creation
//! steps and party detail pages belong to the marketplace site and need a full
//! document load.

use leptos_router::NavigateOptions;

/// Paths routed by `App`
const APP_PATHS: [&str; 3] = ["/", "/payment/success", "/payment/billing/register"];

pub fn is_app_path(target: &str) -> bool {
    let path = target.split(['?', '#']).next().unwrap_or(target);
    APP_PATHS.contains(&path)
}

/// Go to `target`, replacing the current history entry
pub fn go_to(target: &str, navigate: impl Fn(&str, NavigateOptions)) {
    if is_app_path(target) {
        navigate(
            target,
            NavigateOptions {
                replace: true,
                ..Default::default()
            },
        );
        return;
    }

    let Some(window) = web_sys::window() else {
        tracing::error!(to = %target, "No window to navigate");
        return;
    };
    if let Err(e) = window.location().replace(target) {
        tracing::error!(error = ?e, to = %target, "Full navigation failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use party_core::{PartyId, Route};

    #[test]
    fn test_app_routes_stay_client_side() {
        assert!(is_app_path(&Route::Home.path()));
        assert!(is_app_path(&Route::BillingRegistration.path()));
        assert!(is_app_path("/payment/success?paymentKey=pk_1"));
    }

    #[test]
    fn test_marketplace_routes_load_full_document() {
        let party = PartyId::new(42);
        assert!(!is_app_path(&Route::PartyDetail(party).path()));
        assert!(!is_app_path(&Route::create_flow_continuation(party).path()));
        assert!(!is_app_path("/party/42#members"));
        assert!(!is_app_path("/payment"));
    }
}
