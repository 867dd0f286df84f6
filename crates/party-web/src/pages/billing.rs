//! Billing Registration Page
//!
//! Reached after a successful join. Reads the hand-off flags left by the
//! payment-success page and sends the user on to where they were headed.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use party_core::Route;
use party_payments::{BillingHandoff, PARTY_JOIN_REASON};

use crate::navigation::go_to;
use crate::storage::SessionStorage;

#[component]
pub fn BillingRegisterPage() -> impl IntoView {
    let navigate = use_navigate();

    let handoff = BillingHandoff::load(&SessionStorage::configured()).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Billing hand-off unreadable");
        None
    });
    let reason = match handoff.as_ref().map(|h| h.reason.as_str()) {
        Some(PARTY_JOIN_REASON) => "Register a card so your monthly party share can be charged.",
        _ => "Register a card for recurring payments.",
    };

    let proceed = move |_| {
        let target = match BillingHandoff::take(&SessionStorage::configured()) {
            Ok(Some(handoff)) => handoff.after_billing_redirect,
            Ok(None) => Route::Home.path(),
            Err(e) => {
                tracing::warn!(error = %e, "Could not clear billing hand-off");
                Route::Home.path()
            }
        };
        go_to(&target, &navigate);
    };

    view! {
        <div class="billing-register">
            <h1>"Payment method"</h1>
            <p>{reason}</p>
            <button class="btn btn-primary" on:click=proceed>
                "Continue"
            </button>
        </div>
    }
}
