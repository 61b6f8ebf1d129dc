//! Notification surface
//!
//! The page-side half of the center: the container element and the alert
//! widget that animates each notification out.

use crate::error::ShellResult;

use super::types::{Notification, NotificationHandle};

/// Container plus alert widget
pub trait NotificationSurface {
    /// Create the notification container. Called at most once per center.
    fn create_container(&mut self) -> ShellResult<()>;

    /// Append an alert element for `notification` to the container
    fn mount(&mut self, notification: &Notification);

    /// Ask the alert widget to close. The widget reports completion later,
    /// which the host feeds back as `NotificationCenter::on_closed`.
    fn begin_close(&mut self, handle: NotificationHandle);

    /// Remove the element once the widget has finished closing
    fn remove(&mut self, handle: NotificationHandle);
}

/// Operation recorded by [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceOp {
    CreateContainer,
    Mount(NotificationHandle),
    BeginClose(NotificationHandle),
    Remove(NotificationHandle),
}

/// Surface that records operations instead of touching a page
///
/// An optional close hook lets headless hosts (the CLI, tests) report the
/// widget's "finished closing" signal straight away.
#[derive(Default)]
pub struct RecordingSurface {
    ops: Vec<SurfaceOp>,
    on_begin_close: Option<Box<dyn FnMut(NotificationHandle)>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_close_hook(hook: impl FnMut(NotificationHandle) + 'static) -> Self {
        Self {
            ops: Vec::new(),
            on_begin_close: Some(Box::new(hook)),
        }
    }

    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    pub fn count(&self, op: &SurfaceOp) -> usize {
        self.ops.iter().filter(|o| *o == op).count()
    }
}

impl NotificationSurface for RecordingSurface {
    fn create_container(&mut self) -> ShellResult<()> {
        self.ops.push(SurfaceOp::CreateContainer);
        Ok(())
    }

    fn mount(&mut self, notification: &Notification) {
        self.ops.push(SurfaceOp::Mount(notification.handle));
    }

    fn begin_close(&mut self, handle: NotificationHandle) {
        self.ops.push(SurfaceOp::BeginClose(handle));
        if let Some(hook) = self.on_begin_close.as_mut() {
            hook(handle);
        }
    }

    fn remove(&mut self, handle: NotificationHandle) {
        self.ops.push(SurfaceOp::Remove(handle));
    }
}
