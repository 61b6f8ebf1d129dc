//! Sidebar Elements
//!
//! Applies class patches to the sidebar and its overlay, and forwards the
//! page's clicks and resizes to the dispatcher.

use web_sys::Element;

use panelkit::{ClassPatch, PatchTarget, SidebarView, UiEvent};

use super::{by_id, listen, query_all, window, window_width};
use crate::state::dispatcher::Dispatcher;

/// Where the sidebar pieces live in the markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomIds {
    pub sidebar: &'static str,
    pub toggle: &'static str,
    pub overlay: &'static str,
    pub nav_links: &'static str,
}

impl Default for DomIds {
    fn default() -> Self {
        Self {
            sidebar: "sidebar",
            toggle: "sidebarToggle",
            overlay: "sidebarOverlay",
            nav_links: "#sidebar .nav-link",
        }
    }
}

/// Elements found on this page; any of them may be absent
pub struct SidebarHandles {
    pub sidebar: Option<Element>,
    pub toggle: Option<Element>,
    pub overlay: Option<Element>,
    pub nav_links: Vec<Element>,
}

impl SidebarHandles {
    pub fn from_page(ids: &DomIds) -> Self {
        let lookup = |id: &str| {
            let element = by_id(id);
            if element.is_none() {
                web_sys::console::warn_1(&format!("#{} not found, skipping", id).into());
            }
            element
        };

        Self {
            sidebar: lookup(ids.sidebar),
            toggle: lookup(ids.toggle),
            overlay: lookup(ids.overlay),
            nav_links: query_all(ids.nav_links),
        }
    }
}

/// [`SidebarView`] over the real elements
pub struct DomSidebarView {
    sidebar: Option<Element>,
    overlay: Option<Element>,
}

impl DomSidebarView {
    pub fn new(handles: &SidebarHandles) -> Self {
        Self {
            sidebar: handles.sidebar.clone(),
            overlay: handles.overlay.clone(),
        }
    }
}

impl SidebarView for DomSidebarView {
    fn apply(&mut self, patches: &[ClassPatch]) {
        for patch in patches {
            let element = match patch.target() {
                PatchTarget::Sidebar => self.sidebar.as_ref(),
                PatchTarget::Overlay => self.overlay.as_ref(),
            };
            let Some(element) = element else {
                continue;
            };

            let result = match patch {
                ClassPatch::Add { class, .. } => element.class_list().add_1(class),
                ClassPatch::Remove { class, .. } => element.class_list().remove_1(class),
            };
            if let Err(e) = result {
                web_sys::console::error_1(&format!("class patch failed: {:?}", e).into());
            }
        }
    }
}

/// Forward sidebar input to `dispatcher`
pub fn wire(handles: &SidebarHandles, dispatcher: &Dispatcher) {
    if let Some(toggle) = &handles.toggle {
        let dispatcher = dispatcher.clone();
        listen(toggle, "click", move |event| {
            event.prevent_default();
            dispatcher.dispatch(UiEvent::ToggleClicked);
        });
    }

    if let Some(window) = window() {
        let dispatcher = dispatcher.clone();
        listen(&window, "resize", move |_| {
            dispatcher.dispatch(UiEvent::Resized { width: window_width() });
        });
    }

    if let Some(overlay) = &handles.overlay {
        let dispatcher = dispatcher.clone();
        listen(overlay, "click", move |_| {
            dispatcher.dispatch(UiEvent::OverlayClicked);
        });
    }

    for link in &handles.nav_links {
        let dispatcher = dispatcher.clone();
        listen(link, "click", move |_| {
            dispatcher.dispatch(UiEvent::NavLinkClicked);
        });
    }
}
