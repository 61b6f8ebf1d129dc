//! Page Script Bindings
//!
//! Functions exported to JavaScript so inline page scripts can raise
//! notifications and open print views.

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

use panelkit::{NotificationHandle, NotificationKind};

use crate::app::Shell;

thread_local! {
    static SHELL: RefCell<Option<Rc<Shell>>> = const { RefCell::new(None) };
}

/// Make `shell` reachable from the exported functions
pub fn install(shell: Rc<Shell>) {
    SHELL.with(|slot| *slot.borrow_mut() = Some(shell));
}

fn with_shell<R>(f: impl FnOnce(&Shell) -> R) -> Option<R> {
    let shell = SHELL.with(|slot| slot.borrow().clone());
    match shell {
        Some(shell) => Some(f(&shell)),
        None => {
            web_sys::console::warn_1(&"panelkit not initialised yet".into());
            None
        }
    }
}

/// `showNotification(message, kind?, durationMs?)` → notification id
#[wasm_bindgen(js_name = showNotification)]
pub fn show_notification(message: String, kind: Option<String>, duration_ms: Option<u32>) -> Option<u32> {
    let kind = match kind.as_deref().map(str::parse::<NotificationKind>) {
        Some(Ok(kind)) => kind,
        Some(Err(e)) => {
            web_sys::console::warn_1(&e.into());
            NotificationKind::Info
        }
        None => NotificationKind::Info,
    };

    with_shell(|shell| shell.notify(message, kind, duration_ms.map(u64::from)))
        .flatten()
        .and_then(|handle| u32::try_from(handle.id()).ok())
}

/// `dismissNotification(id)`; unknown ids are ignored
#[wasm_bindgen(js_name = dismissNotification)]
pub fn dismiss_notification(id: u32) {
    with_shell(|shell| shell.dismiss(NotificationHandle::new(u64::from(id))));
}

/// `printSection(elementId, title?)` → whether a print view opened
#[wasm_bindgen(js_name = printSection)]
pub fn print_section(element_id: String, title: Option<String>) -> bool {
    with_shell(|shell| {
        match shell.print_subtree(&element_id, title.as_deref().unwrap_or("")) {
            Ok(()) => true,
            Err(e) => {
                web_sys::console::error_1(&format!("print failed: {}", e).into());
                false
            }
        }
    })
    .unwrap_or(false)
}
