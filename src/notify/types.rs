//! Notification types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Auto-dismiss delay used when the caller does not pick one
pub const DEFAULT_DURATION_MS: u64 = 5000;

/// Identity of a notification, returned by `notify` and used to dismiss it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationHandle(u64);

impl NotificationHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }

    /// DOM id of the mounted alert element
    pub fn element_id(&self) -> String {
        format!("panelkit-toast-{}", self.0)
    }
}

impl std::fmt::Display for NotificationHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Severity of a notification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl NotificationKind {
    /// Alert widget modifier class
    pub fn alert_class(&self) -> &'static str {
        match self {
            NotificationKind::Success => "alert-success",
            NotificationKind::Error => "alert-danger",
            NotificationKind::Warning => "alert-warning",
            NotificationKind::Info => "alert-info",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            NotificationKind::Success => "✓",
            NotificationKind::Error => "✕",
            NotificationKind::Warning => "⚠",
            NotificationKind::Info => "ℹ",
        }
    }
}

impl std::str::FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "success" => Ok(NotificationKind::Success),
            "error" | "danger" => Ok(NotificationKind::Error),
            "warning" => Ok(NotificationKind::Warning),
            "info" => Ok(NotificationKind::Info),
            other => Err(format!("unknown notification kind: {}", other)),
        }
    }
}

/// Where a notification is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPhase {
    /// Mounted and visible
    Live,
    /// Close requested; waiting for the alert widget to finish its exit animation
    Closing,
}

/// Request to show a notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
    #[serde(default)]
    pub kind: NotificationKind,
    /// Auto-dismiss delay; 0 keeps the notification until dismissed
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
}

fn default_duration_ms() -> u64 {
    DEFAULT_DURATION_MS
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::default(),
            duration_ms: DEFAULT_DURATION_MS,
        }
    }

    pub fn kind(mut self, kind: NotificationKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn sticky(self) -> Self {
        self.duration_ms(0)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message).kind(NotificationKind::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message).kind(NotificationKind::Error)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message).kind(NotificationKind::Warning)
    }
}

impl From<&str> for Notice {
    fn from(message: &str) -> Self {
        Notice::new(message)
    }
}

impl From<String> for Notice {
    fn from(message: String) -> Self {
        Notice::new(message)
    }
}

/// A mounted notification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub handle: NotificationHandle,
    pub message: String,
    pub kind: NotificationKind,
    pub duration_ms: u64,
    pub created_at: DateTime<Utc>,
    pub phase: NotificationPhase,
}

impl Notification {
    pub fn is_sticky(&self) -> bool {
        self.duration_ms == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_defaults() {
        let notice = Notice::from("Saved");
        assert_eq!(notice.kind, NotificationKind::Info);
        assert_eq!(notice.duration_ms, 5000);
        assert_eq!(Notice::error("x").sticky().duration_ms, 0);
    }

    #[test]
    fn test_notice_deserialize_defaults() {
        let notice: Notice = serde_json::from_str(r#"{"message":"hi"}"#).unwrap();
        assert_eq!(notice, Notice::new("hi"));
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("danger".parse::<NotificationKind>(), Ok(NotificationKind::Error));
        assert_eq!("Success".parse::<NotificationKind>(), Ok(NotificationKind::Success));
        assert!("loud".parse::<NotificationKind>().is_err());
        assert_eq!(NotificationKind::Error.alert_class(), "alert-danger");
    }

    #[test]
    fn test_handle_element_id() {
        assert_eq!(NotificationHandle::new(3).element_id(), "panelkit-toast-3");
    }
}
