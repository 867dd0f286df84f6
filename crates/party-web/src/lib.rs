//! party Web Frontend
//!
//! Leptos-based WASM frontend. Only the gateway-return flow lives here; the
//! rest of the marketplace UI is served separately.

mod app;
mod navigation;
mod pages;
mod storage;

pub use app::App;
pub use storage::SessionStorage;

use wasm_bindgen::prelude::*;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    leptos::mount::mount_to_body(App);
}
