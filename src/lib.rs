//! # rollbook
//!
//! Leptos + WASM school-records dashboard. The architecturally
//! significant part is the authentication subsystem: an auth store
//! that synchronizes session state over an asynchronous identity
//! backend, and a navigation guard that forces a fresh resolution
//! before every route transition and fails closed on errors. Pages,
//! records data, and theming hang off that core.

pub mod app;
pub mod net;
pub mod pages;
pub mod router;
pub mod state;
pub mod util;

/// Browser entry point: hydrate the server-rendered document body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(crate::app::App);
}
