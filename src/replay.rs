//! Event script replay
//!
//! Feeds a JSON-lines script of [`UiEvent`]s through a headless event loop
//! and records the state after every step. Besides events, a script may
//! contain `{"type":"wait","ms":N}` lines that let timers run.

use std::time::Duration;

use serde::Serialize;

use crate::config::Config;
use crate::error::{ShellError, ShellResult};
use crate::events::{HeadlessLoop, UiEvent};
use crate::viewport::ViewportClass;

/// One script line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStep {
    Event(UiEvent),
    Wait(Duration),
}

impl ScriptStep {
    fn label(&self) -> String {
        match self {
            ScriptStep::Wait(d) => format!("wait {}ms", d.as_millis()),
            ScriptStep::Event(UiEvent::Resized { width }) => format!("resized {}", width),
            ScriptStep::Event(event) => format!("{:?}", event.kind()).to_lowercase(),
        }
    }
}

/// Parse a JSON-lines script. Blank lines and `#` comments are ignored.
pub fn parse_script(text: &str) -> ShellResult<Vec<ScriptStep>> {
    let mut steps = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let value: serde_json::Value = serde_json::from_str(line).map_err(|e| {
            ShellError::Serialization(format!("line {}: {}", lineno + 1, e))
        })?;

        if value.get("type").and_then(|t| t.as_str()) == Some("wait") {
            let ms = value.get("ms").and_then(|m| m.as_u64()).ok_or_else(|| {
                ShellError::Serialization(format!("line {}: wait step needs \"ms\"", lineno + 1))
            })?;
            steps.push(ScriptStep::Wait(Duration::from_millis(ms)));
        } else {
            let event = serde_json::from_value(value).map_err(|e| {
                ShellError::Serialization(format!("line {}: {}", lineno + 1, e))
            })?;
            steps.push(ScriptStep::Event(event));
        }
    }
    Ok(steps)
}

/// State after one step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayRow {
    pub step: usize,
    pub action: String,
    pub viewport: ViewportClass,
    pub collapsed: bool,
    pub shown: bool,
    pub overlay_shown: bool,
    pub notifications: Vec<u64>,
}

/// Run `steps` through a fresh headless loop. Must be called inside a
/// tokio runtime; wait steps sleep for real.
pub async fn replay(config: &Config, width: u32, steps: &[ScriptStep]) -> Vec<ReplayRow> {
    let (mut event_loop, tx, mut rx) = HeadlessLoop::headless(config, width);
    let mut rows = Vec::with_capacity(steps.len());

    for (i, step) in steps.iter().enumerate() {
        match step {
            ScriptStep::Event(event) => {
                if tx.send(event.clone()).is_err() {
                    tracing::warn!("event queue closed during replay");
                    break;
                }
            }
            ScriptStep::Wait(duration) => tokio::time::sleep(*duration).await,
        }
        // Let timer tasks that just became due post their events
        tokio::task::yield_now().await;
        // Close acknowledgements are queued behind the event that caused
        // them, so drain until the queue stays empty
        while event_loop.drain(&mut rx) > 0 {}

        let sidebar = event_loop.sidebar();
        rows.push(ReplayRow {
            step: i + 1,
            action: step.label(),
            viewport: event_loop.viewport_class(),
            collapsed: sidebar.collapsed,
            shown: sidebar.shown,
            overlay_shown: sidebar.overlay_shown,
            notifications: event_loop
                .center()
                .notifications()
                .map(|n| n.handle.id())
                .collect(),
        });
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"
# desktop collapse, then open the drawer on mobile and widen again
{"type":"toggle_clicked"}
{"type":"resized","width":800}
{"type":"toggle_clicked"}
{"type":"notify","message":"Saved","kind":"success","duration_ms":1000}
{"type":"resized","width":1200}
{"type":"wait","ms":1500}
"#;

    #[test]
    fn test_parse_script() {
        let steps = parse_script(SCRIPT).unwrap();
        assert_eq!(steps.len(), 6);
        assert_eq!(steps[1], ScriptStep::Event(UiEvent::Resized { width: 800 }));
        assert_eq!(steps[5], ScriptStep::Wait(Duration::from_millis(1500)));
    }

    #[test]
    fn test_parse_errors_carry_line_number() {
        let err = parse_script("{\"type\":\"toggle_clicked\"}\n{\"type\":\"wait\"}").unwrap_err();
        assert!(err.to_string().contains("line 2"));

        let err = parse_script("{\"type\":\"explode\"}").unwrap_err();
        assert!(matches!(err, ShellError::Serialization(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_replay_scenario() {
        let steps = parse_script(SCRIPT).unwrap();
        let rows = replay(&Config::default(), 1200, &steps).await;

        assert!(rows[0].collapsed);
        assert_eq!(rows[1].viewport, ViewportClass::Mobile);
        assert!(rows[2].shown && rows[2].overlay_shown && rows[2].collapsed);
        assert_eq!(rows[3].notifications, vec![1]);

        let widened = &rows[4];
        assert!(!widened.shown && !widened.overlay_shown);
        assert!(widened.collapsed);
        assert_eq!(widened.notifications, vec![1]);

        assert!(rows[5].notifications.is_empty());
        assert_eq!(rows[5].action, "wait 1500ms");
    }
}
