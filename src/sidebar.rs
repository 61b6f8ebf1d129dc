//! Sidebar State
//!
//! Open/collapsed/shown flags for the navigation sidebar and the rules for
//! moving between them. The DOM layer never reads these flags directly: it
//! applies the [`ClassPatch`]es produced by [`ClassPatch::diff`].

use serde::{Deserialize, Serialize};

use crate::viewport::ViewportClass;

/// CSS class marking the desktop sidebar as collapsed
pub const COLLAPSED_CLASS: &str = "collapsed";

/// CSS class revealing the off-canvas panel and its overlay
pub const SHOW_CLASS: &str = "show";

/// View state of the sidebar
///
/// `collapsed` only matters on desktop and survives viewport changes.
/// `shown` and `overlay_shown` only matter on mobile and always move
/// together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarState {
    pub collapsed: bool,
    pub shown: bool,
    pub overlay_shown: bool,
}

impl SidebarState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle button pressed
    pub fn toggle(&mut self, class: ViewportClass) {
        match class {
            ViewportClass::Desktop => self.collapsed = !self.collapsed,
            ViewportClass::Mobile => {
                let open = !self.shown;
                self.set_panel(open);
            }
        }
        tracing::debug!(%class, state = ?self, "sidebar toggled");
    }

    /// Window crossed into `class`
    pub fn on_viewport_change(&mut self, class: ViewportClass) {
        if class.is_desktop() {
            self.close_panel();
        }
    }

    /// Overlay behind the off-canvas panel clicked
    pub fn on_overlay_click(&mut self) {
        self.close_panel();
    }

    /// A navigation link was followed
    pub fn on_navigate(&mut self, class: ViewportClass) {
        if class.is_mobile() {
            self.close_panel();
        }
    }

    /// Whether the off-canvas panel is open
    pub fn is_panel_open(&self) -> bool {
        self.shown
    }

    /// CSS class flags this state maps to
    pub fn classes(&self) -> SidebarClasses {
        SidebarClasses {
            sidebar_collapsed: self.collapsed,
            sidebar_show: self.shown,
            overlay_show: self.overlay_shown,
        }
    }

    fn close_panel(&mut self) {
        self.set_panel(false);
    }

    fn set_panel(&mut self, open: bool) {
        self.shown = open;
        self.overlay_shown = open;
    }
}

/// Class flags applied to the sidebar and overlay elements
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SidebarClasses {
    pub sidebar_collapsed: bool,
    pub sidebar_show: bool,
    pub overlay_show: bool,
}

/// Element a class patch applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchTarget {
    Sidebar,
    Overlay,
}

/// Single class-list mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ClassPatch {
    Add {
        target: PatchTarget,
        class: &'static str,
    },
    Remove {
        target: PatchTarget,
        class: &'static str,
    },
}

impl ClassPatch {
    fn set(target: PatchTarget, class: &'static str, on: bool) -> Self {
        if on {
            ClassPatch::Add { target, class }
        } else {
            ClassPatch::Remove { target, class }
        }
    }

    /// Patches needed to go from `old` to `new`
    pub fn diff(old: SidebarClasses, new: SidebarClasses) -> Vec<ClassPatch> {
        let mut patches = Vec::new();
        if old.sidebar_collapsed != new.sidebar_collapsed {
            patches.push(Self::set(PatchTarget::Sidebar, COLLAPSED_CLASS, new.sidebar_collapsed));
        }
        if old.sidebar_show != new.sidebar_show {
            patches.push(Self::set(PatchTarget::Sidebar, SHOW_CLASS, new.sidebar_show));
        }
        if old.overlay_show != new.overlay_show {
            patches.push(Self::set(PatchTarget::Overlay, SHOW_CLASS, new.overlay_show));
        }
        patches
    }

    /// Patches that bring freshly rendered markup in line with `state`
    pub fn full(state: SidebarClasses) -> Vec<ClassPatch> {
        vec![
            Self::set(PatchTarget::Sidebar, COLLAPSED_CLASS, state.sidebar_collapsed),
            Self::set(PatchTarget::Sidebar, SHOW_CLASS, state.sidebar_show),
            Self::set(PatchTarget::Overlay, SHOW_CLASS, state.overlay_show),
        ]
    }

    pub fn target(&self) -> PatchTarget {
        match self {
            ClassPatch::Add { target, .. } | ClassPatch::Remove { target, .. } => *target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::classify;

    fn all_states() -> Vec<SidebarState> {
        let mut states = Vec::new();
        for collapsed in [false, true] {
            for shown in [false, true] {
                states.push(SidebarState {
                    collapsed,
                    shown,
                    overlay_shown: shown,
                });
            }
        }
        states
    }

    #[test]
    fn test_desktop_toggle_only_flips_collapsed() {
        for start in all_states() {
            let mut state = start;
            state.toggle(ViewportClass::Desktop);
            assert_eq!(state.collapsed, !start.collapsed);
            assert_eq!(state.shown, start.shown);
            assert_eq!(state.overlay_shown, start.overlay_shown);
        }
    }

    #[test]
    fn test_mobile_toggle_never_touches_collapsed() {
        for start in all_states() {
            let mut state = start;
            state.toggle(ViewportClass::Mobile);
            assert_eq!(state.collapsed, start.collapsed);
            assert_eq!(state.shown, !start.shown);
            assert_eq!(state.overlay_shown, state.shown);
        }
    }

    #[test]
    fn test_desktop_change_closes_panel() {
        for start in all_states() {
            let mut state = start;
            state.on_viewport_change(ViewportClass::Desktop);
            assert!(!state.shown);
            assert!(!state.overlay_shown);
            assert_eq!(state.collapsed, start.collapsed);
        }
    }

    #[test]
    fn test_mobile_change_keeps_state() {
        for start in all_states() {
            let mut state = start;
            state.on_viewport_change(ViewportClass::Mobile);
            assert_eq!(state, start);
        }
    }

    #[test]
    fn test_overlay_click_and_navigation() {
        let mut state = SidebarState::new();
        state.toggle(ViewportClass::Mobile);
        assert!(state.is_panel_open());
        state.on_overlay_click();
        assert!(!state.shown && !state.overlay_shown);

        state.toggle(ViewportClass::Mobile);
        state.on_navigate(ViewportClass::Desktop);
        assert!(state.shown, "desktop navigation is a no-op");
        state.on_navigate(ViewportClass::Mobile);
        assert!(!state.shown && !state.overlay_shown);
    }

    #[test]
    fn test_resize_scenario() {
        let mut state = SidebarState::new();

        state.toggle(classify(1200));
        assert!(state.collapsed);

        state.toggle(classify(800));
        assert!(state.shown);
        assert!(state.overlay_shown);

        state.on_viewport_change(classify(1200));
        assert!(!state.shown);
        assert!(!state.overlay_shown);
        assert!(state.collapsed);
    }

    #[test]
    fn test_class_diff() {
        let old = SidebarState::new().classes();
        let mut state = SidebarState::new();
        state.toggle(ViewportClass::Mobile);
        let patches = ClassPatch::diff(old, state.classes());
        assert_eq!(
            patches,
            vec![
                ClassPatch::Add { target: PatchTarget::Sidebar, class: SHOW_CLASS },
                ClassPatch::Add { target: PatchTarget::Overlay, class: SHOW_CLASS },
            ]
        );
        assert!(ClassPatch::diff(state.classes(), state.classes()).is_empty());
        assert_eq!(ClassPatch::full(old).len(), 3);
    }
}
