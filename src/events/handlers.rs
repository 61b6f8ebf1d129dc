//! Sidebar handler table
//!
//! Pure `(state, viewport class) -> state` functions keyed by event kind.

use std::collections::HashMap;

use crate::sidebar::SidebarState;
use crate::viewport::ViewportClass;

use super::EventKind;

/// Sidebar transition for one event kind. For `Resized` the class is the
/// one the window just moved into.
pub type SidebarHandler = fn(SidebarState, ViewportClass) -> SidebarState;

fn on_toggle(mut state: SidebarState, class: ViewportClass) -> SidebarState {
    state.toggle(class);
    state
}

fn on_resize(mut state: SidebarState, class: ViewportClass) -> SidebarState {
    state.on_viewport_change(class);
    state
}

fn on_overlay(mut state: SidebarState, _class: ViewportClass) -> SidebarState {
    state.on_overlay_click();
    state
}

fn on_navigate(mut state: SidebarState, class: ViewportClass) -> SidebarState {
    state.on_navigate(class);
    state
}

pub struct HandlerTable {
    handlers: HashMap<EventKind, SidebarHandler>,
}

impl Default for HandlerTable {
    fn default() -> Self {
        let mut handlers: HashMap<EventKind, SidebarHandler> = HashMap::new();
        handlers.insert(EventKind::ToggleClicked, on_toggle);
        handlers.insert(EventKind::Resized, on_resize);
        handlers.insert(EventKind::OverlayClicked, on_overlay);
        handlers.insert(EventKind::NavLinkClicked, on_navigate);
        Self { handlers }
    }
}

impl HandlerTable {
    pub fn get(&self, kind: EventKind) -> Option<SidebarHandler> {
        self.handlers.get(&kind).copied()
    }

    /// Replace the handler for `kind`
    pub fn set(&mut self, kind: EventKind, handler: SidebarHandler) {
        self.handlers.insert(kind, handler);
    }

    pub fn remove(&mut self, kind: EventKind) -> Option<SidebarHandler> {
        self.handlers.remove(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_covers_sidebar_events() {
        let table = HandlerTable::default();
        for kind in [
            EventKind::ToggleClicked,
            EventKind::Resized,
            EventKind::OverlayClicked,
            EventKind::NavLinkClicked,
        ] {
            assert!(table.get(kind).is_some(), "{:?}", kind);
        }
        assert!(table.get(EventKind::TimerFired).is_none());
    }

    #[test]
    fn test_handlers_are_pure() {
        let table = HandlerTable::default();
        let toggle = table.get(EventKind::ToggleClicked).unwrap();
        let start = SidebarState::new();

        let opened = toggle(start, ViewportClass::Mobile);
        assert!(opened.shown);
        assert_eq!(start, SidebarState::new());

        let overlay = table.get(EventKind::OverlayClicked).unwrap();
        assert!(!overlay(opened, ViewportClass::Desktop).shown);
    }

    #[test]
    fn test_override() {
        let mut table = HandlerTable::default();
        table.set(EventKind::NavLinkClicked, |state, _| state);
        let nav = table.get(EventKind::NavLinkClicked).unwrap();

        let mut open = SidebarState::new();
        open.toggle(ViewportClass::Mobile);
        assert!(nav(open, ViewportClass::Mobile).shown);
    }
}
