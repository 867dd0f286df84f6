//! Home Page

use leptos::prelude::*;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="home">
            <header class="hero">
                <h1>"party"</h1>
                <p class="tagline">"Share one subscription, split the bill"</p>
                <div class="cta">
                    <a href="/party" class="btn btn-primary">"Browse Parties"</a>
                    <a href="/party/create" class="btn">"Start a Party"</a>
                </div>
            </header>
        </div>
    }
}
