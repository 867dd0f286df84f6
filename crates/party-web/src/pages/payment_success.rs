//! Payment Success Page
//!
//! The gateway redirects here with `?paymentKey=&orderId=&amount=`. Each mount
//! owns one `Reconciler`, and with it one execution guard, so setup code that
//! runs again for the same navigation cannot confirm the payment twice.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use party_core::{FailureReason, Route};
use party_payments::{
    ApiConfig, HttpPartyServiceClient, Navigation, Notice, PostCompletionRouter, Reconciler,
};
use std::rc::Rc;

use crate::navigation::go_to;
use crate::storage::SessionStorage;

type PageReconciler = Reconciler<HttpPartyServiceClient, SessionStorage>;

fn build_reconciler() -> Option<PageReconciler> {
    let origin = web_sys::window()?.location().origin().ok()?;
    match ApiConfig::new(&origin) {
        Ok(config) => Some(Reconciler::new(
            HttpPartyServiceClient::new(config),
            SessionStorage::configured(),
        )),
        Err(e) => {
            tracing::error!(error = %e, "Cannot configure party API client");
            None
        }
    }
}

fn current_query() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

fn show_notice(notice: &Notice) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(&notice.message);
    }
}

#[component]
pub fn PaymentSuccessPage() -> impl IntoView {
    let navigate = use_navigate();
    let reconciler = build_reconciler().map(Rc::new);

    Effect::new(move |_| {
        let navigate = navigate.clone();
        let reconciler = reconciler.clone();

        leptos::task::spawn_local(async move {
            let navigation = match reconciler {
                Some(reconciler) => match reconciler.run(&current_query()).await {
                    Some(outcome) => PostCompletionRouter::navigation(&outcome),
                    None => return,
                },
                None => Navigation {
                    target: Route::Home,
                    notice: Some(Notice::for_failure(&FailureReason::Backend(
                        "client unavailable".into(),
                    ))),
                },
            };

            if let Some(notice) = &navigation.notice {
                show_notice(notice);
            }
            go_to(&navigation.target.path(), &navigate);
        });
    });

    view! {
        <div class="payment-success">
            <div class="spinner"></div>
            <p>"Confirming your payment..."</p>
        </div>
    }
}
