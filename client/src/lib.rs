//! # client
//!
//! Leptos + WASM front end for the papers app: sign-in and registration,
//! password reset, the account dashboard, and the papers list/detail/editor.
//!
//! Rendering lives here; session and data rules live in the `strapi` crate.
//! This crate supplies the browser halves of its seams (`gloo-net`
//! transport, cookie credential store, `Date.now()` clock) and mirrors
//! service snapshots into reactive signals.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: attach to the server-rendered DOM.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    // A second init only fails because a logger is already installed.
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
