//! Notifications
//!
//! Transient toast messages with independent auto-dismiss timers.

pub mod center;
pub mod scheduler;
pub mod surface;
pub mod types;

pub use center::NotificationCenter;
pub use scheduler::{ManualScheduler, ManualTimer, Scheduler};
#[cfg(feature = "runtime")]
pub use scheduler::TokioScheduler;
pub use surface::{NotificationSurface, RecordingSurface, SurfaceOp};
pub use types::{
    Notice, Notification, NotificationHandle, NotificationKind, NotificationPhase,
    DEFAULT_DURATION_MS,
};
