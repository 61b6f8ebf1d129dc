//! Panelkit Dashboard Bindings
//!
//! Browser half of Panelkit, built with Leptos (WASM).
//!
//! # Features
//!
//! - Sidebar collapse / off-canvas drawer driven by the panelkit event loop
//! - Toast notifications rendered by a Leptos component
//! - Print view for any element on the page
//! - Form validation, confirmation prompts, file input labels, date formatting
//! - Chart, data-table and tooltip initialisation through the page's libraries
//!
//! # Architecture
//!
//! The dashboard markup is rendered by the server. This crate enhances it
//! in place: it looks up the elements it needs, builds one [`app::Shell`]
//! around them and exposes a few functions to page scripts.

mod app;
mod bindings;
mod components;
mod dom;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    app::start();
}
