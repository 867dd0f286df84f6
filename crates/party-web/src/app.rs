//! Main App Component

use leptos::prelude::*;
use leptos_router::{components::*, path};

use crate::pages::{BillingRegisterPage, HomePage, PaymentSuccessPage};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <main class="app">
                <Routes fallback=|| view! { <p>"Page not found"</p> }>
                    <Route path=path!("/") view=HomePage />
                    <Route path=path!("/payment/success") view=PaymentSuccessPage />
                    <Route path=path!("/payment/billing/register") view=BillingRegisterPage />
                </Routes>
            </main>
        </Router>
    }
}
