//! Viewport classification
//!
//! Coarse desktop/mobile categorisation derived from the window width.

use serde::{Deserialize, Serialize};

/// Width (in CSS pixels) at which the layout switches to desktop.
/// Matches the `lg` breakpoint of the page's UI library.
pub const DESKTOP_BREAKPOINT_PX: u32 = 992;

/// Desktop or mobile layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewportClass {
    Desktop,
    Mobile,
}

impl ViewportClass {
    pub fn is_desktop(self) -> bool {
        self == ViewportClass::Desktop
    }

    pub fn is_mobile(self) -> bool {
        self == ViewportClass::Mobile
    }
}

impl std::fmt::Display for ViewportClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewportClass::Desktop => write!(f, "desktop"),
            ViewportClass::Mobile => write!(f, "mobile"),
        }
    }
}

/// Classify a width using the default breakpoint
pub fn classify(width_px: u32) -> ViewportClass {
    ViewportClassifier::default().classify(width_px)
}

/// Classifier with a configurable breakpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportClassifier {
    breakpoint_px: u32,
}

impl Default for ViewportClassifier {
    fn default() -> Self {
        Self {
            breakpoint_px: DESKTOP_BREAKPOINT_PX,
        }
    }
}

impl ViewportClassifier {
    pub fn with_breakpoint(breakpoint_px: u32) -> Self {
        Self { breakpoint_px }
    }

    pub fn breakpoint(&self) -> u32 {
        self.breakpoint_px
    }

    pub fn classify(&self, width_px: u32) -> ViewportClass {
        if width_px >= self.breakpoint_px {
            ViewportClass::Desktop
        } else {
            ViewportClass::Mobile
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint_boundary() {
        assert_eq!(classify(991), ViewportClass::Mobile);
        assert_eq!(classify(992), ViewportClass::Desktop);
        assert_eq!(classify(0), ViewportClass::Mobile);
        assert_eq!(classify(u32::MAX), ViewportClass::Desktop);
    }

    #[test]
    fn test_desktop_iff_at_least_breakpoint() {
        for w in (0..3000).step_by(7) {
            assert_eq!(classify(w).is_desktop(), w >= DESKTOP_BREAKPOINT_PX, "width {}", w);
        }
    }

    #[test]
    fn test_custom_breakpoint() {
        let classifier = ViewportClassifier::with_breakpoint(768);
        assert_eq!(classifier.classify(800), ViewportClass::Desktop);
        assert_eq!(classifier.classify(767), ViewportClass::Mobile);
        assert_eq!(ViewportClass::Mobile.to_string(), "mobile");
    }
}
