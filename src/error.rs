//! Shell error types
//!
//! Defines the errors the behaviour layer can report. None of them are
//! fatal to the hosting page: callers log them and continue.

use thiserror::Error;

/// Errors that can occur in the behaviour layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShellError {
    /// An expected element is absent from the rendered markup
    #[error("Element not found: #{0}")]
    ElementNotFound(String),

    /// A rendering surface (print window, container) could not be opened
    #[error("Surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// An external widget library is not loaded or rejected its payload
    #[error("Widget error: {0}")]
    Widget(String),

    /// Serialization of a widget payload or event failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The event loop's queue was closed
    #[error("Event loop closed")]
    LoopClosed,
}

impl From<serde_json::Error> for ShellError {
    fn from(err: serde_json::Error) -> Self {
        ShellError::Serialization(err.to_string())
    }
}

/// Result type alias for behaviour-layer operations
pub type ShellResult<T> = Result<T, ShellError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ShellError::ElementNotFound("report".to_string());
        assert_eq!(err.to_string(), "Element not found: #report");

        let err = ShellError::LoopClosed;
        assert_eq!(err.to_string(), "Event loop closed");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: ShellError = json_err.into();
        assert!(matches!(err, ShellError::Serialization(_)));
    }
}
