//! # railmadad-client
//!
//! Leptos + WASM frontend for the Rail Madad passenger-complaint portal.
//! Replaces the React single-page client with a Rust-native UI layer.
//!
//! The core of the crate is `session`: the client-side session store, role
//! resolver, route guard, and change notifier that every page consumes.
//! Pages and components are thin CRUD screens over that contract plus the
//! REST and identity-provider boundaries in `net`.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod session;
pub mod util;

/// Browser entry point: mounts the SPA onto `<body>`.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::mount_to_body(app::App);
}
