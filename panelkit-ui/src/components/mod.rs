//! UI Components
//!
//! Leptos components mounted into the server-rendered page.

pub mod toast;

pub use toast::{ToastItem, ToastStack, ToastSurface};
