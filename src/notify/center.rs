//! Notification Center
//!
//! Owns the live notifications in display order (newest last) and one
//! auto-dismiss timer per timed notification.

use std::time::Duration;

use chrono::Utc;

use crate::error::ShellResult;

use super::scheduler::Scheduler;
use super::surface::NotificationSurface;
use super::types::{Notice, Notification, NotificationHandle, NotificationPhase};

struct Entry<T> {
    notification: Notification,
    timer: Option<T>,
}

/// Transient message center
///
/// The container is created on the first `notify` and reused afterwards.
/// Dismissal is idempotent; the element is only removed once the alert
/// widget reports it finished closing.
pub struct NotificationCenter<S: NotificationSurface, T: Scheduler> {
    surface: S,
    scheduler: T,
    container_ready: bool,
    next_id: u64,
    entries: Vec<Entry<T::Timer>>,
}

impl<S: NotificationSurface, T: Scheduler> NotificationCenter<S, T> {
    pub fn new(surface: S, scheduler: T) -> Self {
        Self {
            surface,
            scheduler,
            container_ready: false,
            next_id: 1,
            entries: Vec::new(),
        }
    }

    /// Show a notification
    pub fn notify(&mut self, notice: impl Into<Notice>) -> ShellResult<NotificationHandle> {
        let notice = notice.into();

        if !self.container_ready {
            self.surface.create_container()?;
            self.container_ready = true;
            tracing::debug!("notification container created");
        }

        let handle = NotificationHandle::new(self.next_id);
        self.next_id += 1;

        let notification = Notification {
            handle,
            message: notice.message,
            kind: notice.kind,
            duration_ms: notice.duration_ms,
            created_at: Utc::now(),
            phase: NotificationPhase::Live,
        };
        self.surface.mount(&notification);

        let timer = (notice.duration_ms > 0).then(|| {
            self.scheduler
                .schedule(handle, Duration::from_millis(notice.duration_ms))
        });

        tracing::debug!(
            %handle,
            kind = ?notification.kind,
            duration_ms = notification.duration_ms,
            "notification mounted"
        );
        self.entries.push(Entry { notification, timer });
        Ok(handle)
    }

    /// Close a notification early. Unknown or already closing handles are ignored.
    pub fn dismiss(&mut self, handle: NotificationHandle) {
        let Some(entry) = self.live_entry_mut(handle) else {
            return;
        };
        let timer = entry.timer.take();
        entry.notification.phase = NotificationPhase::Closing;

        if let Some(timer) = timer {
            self.scheduler.cancel(timer);
        }
        tracing::debug!(%handle, "notification dismissed");
        self.surface.begin_close(handle);
    }

    /// Auto-dismiss timer for `handle` fired
    pub fn expire(&mut self, handle: NotificationHandle) {
        let Some(entry) = self.live_entry_mut(handle) else {
            return;
        };
        entry.timer = None;
        entry.notification.phase = NotificationPhase::Closing;

        tracing::debug!(%handle, "notification expired");
        self.surface.begin_close(handle);
    }

    /// The alert widget finished closing `handle`
    ///
    /// Also covers widgets closed by their own close button, so any timer
    /// still pending is cancelled.
    pub fn on_closed(&mut self, handle: NotificationHandle) {
        let Some(pos) = self
            .entries
            .iter()
            .position(|e| e.notification.handle == handle)
        else {
            return;
        };
        let entry = self.entries.remove(pos);
        if let Some(timer) = entry.timer {
            self.scheduler.cancel(timer);
        }
        self.surface.remove(handle);
        tracing::debug!(%handle, remaining = self.entries.len(), "notification removed");
    }

    /// Notifications still in the container, oldest first
    pub fn notifications(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter().map(|e| &e.notification)
    }

    pub fn get(&self, handle: NotificationHandle) -> Option<&Notification> {
        self.notifications().find(|n| n.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_container(&self) -> bool {
        self.container_ready
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn scheduler(&self) -> &T {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut T {
        &mut self.scheduler
    }

    fn live_entry_mut(&mut self, handle: NotificationHandle) -> Option<&mut Entry<T::Timer>> {
        self.entries.iter_mut().find(|e| {
            e.notification.handle == handle && e.notification.phase == NotificationPhase::Live
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::scheduler::ManualScheduler;
    use crate::notify::surface::{RecordingSurface, SurfaceOp};
    use crate::notify::types::NotificationKind;

    type TestCenter = NotificationCenter<RecordingSurface, ManualScheduler>;

    fn center() -> TestCenter {
        NotificationCenter::new(RecordingSurface::new(), ManualScheduler::new())
    }

    /// Advance virtual time, expiring and completing the close of every fired timer
    fn advance(center: &mut TestCenter, ms: u64) {
        for handle in center.scheduler_mut().advance(ms) {
            center.expire(handle);
            center.on_closed(handle);
        }
    }

    #[test]
    fn test_container_created_once() {
        let mut center = center();
        assert!(!center.has_container());
        center.notify("one").unwrap();
        center.notify("two").unwrap();
        assert!(center.has_container());
        assert_eq!(center.surface().count(&SurfaceOp::CreateContainer), 1);
    }

    #[test]
    fn test_insertion_order() {
        let mut center = center();
        let a = center.notify("a").unwrap();
        let b = center.notify(Notice::error("b")).unwrap();
        let c = center.notify("c").unwrap();

        let order: Vec<_> = center.notifications().map(|n| n.handle).collect();
        assert_eq!(order, vec![a, b, c]);
        assert_ne!(a, b);
        assert_eq!(center.get(b).unwrap().kind, NotificationKind::Error);
    }

    #[test]
    fn test_timed_removal_not_before_deadline() {
        let mut center = center();
        let handle = center.notify(Notice::new("saved").duration_ms(1000)).unwrap();

        advance(&mut center, 999);
        assert!(center.get(handle).is_some());

        advance(&mut center, 1);
        assert!(center.get(handle).is_none());
        assert_eq!(center.surface().count(&SurfaceOp::Remove(handle)), 1);
    }

    #[test]
    fn test_sticky_never_expires() {
        let mut center = center();
        let handle = center.notify(Notice::new("pinned").sticky()).unwrap();
        assert_eq!(center.scheduler().pending(), 0);

        advance(&mut center, 10_000_000);
        assert!(center.get(handle).is_some());
    }

    #[test]
    fn test_dismiss_is_idempotent() {
        let mut once = center();
        let h1 = once.notify("x").unwrap();
        once.dismiss(h1);

        let mut twice = center();
        let h2 = twice.notify("x").unwrap();
        twice.dismiss(h2);
        twice.dismiss(h2);

        assert_eq!(once.surface().ops(), twice.surface().ops());
        assert_eq!(twice.get(h2).unwrap().phase, NotificationPhase::Closing);

        twice.on_closed(h2);
        twice.dismiss(h2);
        twice.on_closed(h2);
        assert_eq!(twice.surface().count(&SurfaceOp::Remove(h2)), 1);
        assert!(twice.is_empty());
    }

    #[test]
    fn test_dismiss_unknown_handle_is_noop() {
        let mut center = center();
        center.dismiss(NotificationHandle::new(42));
        center.on_closed(NotificationHandle::new(42));
        assert!(center.surface().ops().is_empty());
    }

    #[test]
    fn test_dismiss_cancels_timer() {
        let mut center = center();
        let handle = center.notify(Notice::new("x").duration_ms(100)).unwrap();
        center.dismiss(handle);
        assert_eq!(center.scheduler().pending(), 0);

        // A late expiry does not close twice
        center.expire(handle);
        assert_eq!(center.surface().count(&SurfaceOp::BeginClose(handle)), 1);
    }

    #[test]
    fn test_removal_waits_for_widget() {
        let mut center = center();
        let handle = center.notify("x").unwrap();
        center.dismiss(handle);
        assert_eq!(center.surface().count(&SurfaceOp::Remove(handle)), 0);
        assert_eq!(center.len(), 1);

        center.on_closed(handle);
        assert_eq!(center.surface().count(&SurfaceOp::Remove(handle)), 1);
    }

    #[test]
    fn test_independent_timers() {
        let mut center = center();
        let short = center.notify(Notice::new("short").duration_ms(100)).unwrap();
        let long = center.notify(Notice::new("long").duration_ms(500)).unwrap();
        let other = center.notify(Notice::new("other").duration_ms(300)).unwrap();

        center.dismiss(other);
        center.on_closed(other);

        advance(&mut center, 100);
        assert!(center.get(short).is_none());
        assert!(center.get(long).is_some());

        advance(&mut center, 400);
        assert!(center.is_empty());
    }

    #[test]
    fn test_widget_closed_directly_cancels_timer() {
        let mut center = center();
        let handle = center.notify(Notice::new("x").duration_ms(100)).unwrap();
        center.on_closed(handle);
        assert_eq!(center.scheduler().pending(), 0);
        assert!(center.is_empty());
    }
}
