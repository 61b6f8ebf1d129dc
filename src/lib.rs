//! # Panelkit
//!
//! View-state and notification behaviour for server-rendered dashboards,
//! kept free of any DOM dependency so it can be driven from the browser
//! (see the `panelkit-ui` crate), from the CLI, or from tests.
//!
//! ## Modules
//!
//! - [`viewport`]: desktop/mobile classification
//! - [`sidebar`]: sidebar collapse / off-canvas state and class patches
//! - [`notify`]: toast notification center with auto-dismiss timers
//! - [`print`]: standalone print documents for one element subtree
//! - [`events`]: event handler table and the single-threaded event loop
//! - [`forms`], [`format`], [`widgets`]: smaller page helpers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use panelkit::{Config, HeadlessLoop, UiEvent};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let (mut event_loop, _tx, mut rx) = HeadlessLoop::headless(&config, 1200);
//!
//!     event_loop.handle(UiEvent::ToggleClicked)?;
//!     assert!(event_loop.sidebar().collapsed);
//!
//!     let handle = event_loop.handle(UiEvent::Notify {
//!         message: "Report saved".to_string(),
//!         kind: Default::default(),
//!         duration_ms: Some(3000),
//!     })?;
//!     println!("showing notification {:?}", handle);
//!
//!     event_loop.run(&mut rx).await;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod format;
pub mod forms;
pub mod notify;
pub mod print;
#[cfg(feature = "runtime")]
pub mod replay;
pub mod sidebar;
pub mod viewport;
pub mod widgets;

pub use config::{
    generate_default_config, Config, ConfigError, DateConfig, LoggingConfig, NotificationConfig,
    PrintConfig, ViewportConfig,
};

pub use error::{ShellError, ShellResult};

pub use events::{EventKind, EventLoop, HandlerTable, SidebarView, UiEvent};
#[cfg(feature = "runtime")]
pub use events::HeadlessLoop;

pub use notify::{
    Notice, Notification, NotificationCenter, NotificationHandle, NotificationKind,
    NotificationSurface, Scheduler,
};

pub use print::{ElementSource, HtmlSnapshot, PrintExporter, PrintJob, PrintSurface};

pub use sidebar::{ClassPatch, PatchTarget, SidebarState};

pub use viewport::{classify, ViewportClass, ViewportClassifier, DESKTOP_BREAKPOINT_PX};

pub use widgets::{ChartConfig, TableOptions, WidgetBootstrap};
