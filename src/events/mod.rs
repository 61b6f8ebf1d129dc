//! UI Events
//!
//! Every input the behaviour layer reacts to, whether it comes from the
//! page (clicks, resizes, widget callbacks) or from a timer.

pub mod handlers;
pub mod runtime;

pub use handlers::{HandlerTable, SidebarHandler};
pub use runtime::{EventLoop, RecordingView, SidebarView};
#[cfg(feature = "runtime")]
pub use runtime::HeadlessLoop;

use serde::{Deserialize, Serialize};

use crate::notify::{NotificationHandle, NotificationKind};

/// Input event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    /// Sidebar toggle button clicked
    ToggleClicked,
    /// Window resized
    Resized { width: u32 },
    /// Overlay behind the off-canvas sidebar clicked
    OverlayClicked,
    /// A sidebar navigation link was followed
    NavLinkClicked,
    /// Calling code asked for a notification
    Notify {
        message: String,
        #[serde(default)]
        kind: NotificationKind,
        /// Falls back to the configured default when absent
        #[serde(default)]
        duration_ms: Option<u64>,
    },
    /// Close button on a notification clicked
    DismissClicked { id: NotificationHandle },
    /// Auto-dismiss timer elapsed
    TimerFired { id: NotificationHandle },
    /// Alert widget finished its close animation
    AlertClosed { id: NotificationHandle },
}

/// Discriminant of [`UiEvent`], used as the handler-table key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ToggleClicked,
    Resized,
    OverlayClicked,
    NavLinkClicked,
    Notify,
    DismissClicked,
    TimerFired,
    AlertClosed,
}

impl UiEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            UiEvent::ToggleClicked => EventKind::ToggleClicked,
            UiEvent::Resized { .. } => EventKind::Resized,
            UiEvent::OverlayClicked => EventKind::OverlayClicked,
            UiEvent::NavLinkClicked => EventKind::NavLinkClicked,
            UiEvent::Notify { .. } => EventKind::Notify,
            UiEvent::DismissClicked { .. } => EventKind::DismissClicked,
            UiEvent::TimerFired { .. } => EventKind::TimerFired,
            UiEvent::AlertClosed { .. } => EventKind::AlertClosed,
        }
    }

    /// Event posted by an auto-dismiss timer
    pub fn timer_fired(id: NotificationHandle) -> Self {
        UiEvent::TimerFired { id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json() {
        let event: UiEvent = serde_json::from_str(r#"{"type":"resized","width":800}"#).unwrap();
        assert_eq!(event, UiEvent::Resized { width: 800 });
        assert_eq!(event.kind(), EventKind::Resized);

        let event: UiEvent =
            serde_json::from_str(r#"{"type":"notify","message":"Saved","kind":"success"}"#).unwrap();
        assert_eq!(
            event,
            UiEvent::Notify {
                message: "Saved".to_string(),
                kind: NotificationKind::Success,
                duration_ms: None,
            }
        );

        let event: UiEvent = serde_json::from_str(r#"{"type":"dismiss_clicked","id":3}"#).unwrap();
        assert_eq!(event, UiEvent::DismissClicked { id: NotificationHandle::new(3) });
    }
}
