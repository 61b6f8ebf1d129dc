//! Auto-dismiss timers
//!
//! The center only needs single-shot timers that can be cancelled. Firing
//! is reported back through the host's event queue, never by calling into
//! the center directly, so handlers keep running one at a time.

use std::collections::BTreeMap;
use std::time::Duration;

#[cfg(feature = "runtime")]
use tokio::sync::mpsc;
#[cfg(feature = "runtime")]
use tokio::task::JoinHandle;

use super::types::NotificationHandle;

/// Single-shot timer source
pub trait Scheduler {
    /// Token that cancels the timer
    type Timer;

    /// Arrange for `handle` to expire after `after`
    fn schedule(&mut self, handle: NotificationHandle, after: Duration) -> Self::Timer;

    /// Cancel a timer that has not fired yet
    fn cancel(&mut self, timer: Self::Timer);
}

#[cfg(feature = "runtime")]
/// Timers backed by tokio tasks
///
/// Each timer is a task that sleeps and then posts the event produced by
/// `on_fire` to the event loop's queue.
pub struct TokioScheduler<E> {
    tx: mpsc::UnboundedSender<E>,
    on_fire: fn(NotificationHandle) -> E,
}

#[cfg(feature = "runtime")]
impl<E: Send + 'static> TokioScheduler<E> {
    pub fn new(tx: mpsc::UnboundedSender<E>, on_fire: fn(NotificationHandle) -> E) -> Self {
        Self { tx, on_fire }
    }
}

#[cfg(feature = "runtime")]
impl<E: Send + 'static> Scheduler for TokioScheduler<E> {
    type Timer = JoinHandle<()>;

    fn schedule(&mut self, handle: NotificationHandle, after: Duration) -> Self::Timer {
        let tx = self.tx.clone();
        let event = (self.on_fire)(handle);
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            if tx.send(event).is_err() {
                tracing::debug!(%handle, "event loop gone before timer fired");
            }
        })
    }

    fn cancel(&mut self, timer: Self::Timer) {
        timer.abort();
    }
}

/// Virtual-time scheduler
///
/// Timers only fire when [`ManualScheduler::advance`] moves the clock past
/// their deadline. Used for deterministic replays and tests.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now_ms: u64,
    next_token: u64,
    pending: BTreeMap<u64, (u64, NotificationHandle)>,
}

/// Token for a [`ManualScheduler`] timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManualTimer(u64);

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Move the clock forward and return the handles whose timers fired,
    /// in deadline order
    pub fn advance(&mut self, by_ms: u64) -> Vec<NotificationHandle> {
        self.now_ms = self.now_ms.saturating_add(by_ms);
        let now = self.now_ms;

        let mut due: Vec<(u64, u64, NotificationHandle)> = self
            .pending
            .iter()
            .filter(|(_, (deadline, _))| *deadline <= now)
            .map(|(token, (deadline, handle))| (*deadline, *token, *handle))
            .collect();
        due.sort();

        for (_, token, _) in &due {
            self.pending.remove(token);
        }
        due.into_iter().map(|(_, _, handle)| handle).collect()
    }
}

impl Scheduler for ManualScheduler {
    type Timer = ManualTimer;

    fn schedule(&mut self, handle: NotificationHandle, after: Duration) -> Self::Timer {
        let token = self.next_token;
        self.next_token += 1;
        let deadline = self.now_ms.saturating_add(after.as_millis() as u64);
        self.pending.insert(token, (deadline, handle));
        ManualTimer(token)
    }

    fn cancel(&mut self, timer: Self::Timer) {
        self.pending.remove(&timer.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_fires_at_deadline() {
        let mut scheduler = ManualScheduler::new();
        let a = NotificationHandle::new(1);
        let b = NotificationHandle::new(2);
        scheduler.schedule(b, Duration::from_millis(300));
        scheduler.schedule(a, Duration::from_millis(100));

        assert!(scheduler.advance(99).is_empty());
        assert_eq!(scheduler.advance(1), vec![a]);
        assert_eq!(scheduler.advance(500), vec![b]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_manual_cancel() {
        let mut scheduler = ManualScheduler::new();
        let timer = scheduler.schedule(NotificationHandle::new(1), Duration::from_millis(10));
        scheduler.cancel(timer);
        assert!(scheduler.advance(1000).is_empty());
    }

    #[cfg(feature = "runtime")]
    #[tokio::test(start_paused = true)]
    async fn test_tokio_timer_posts_event() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = TokioScheduler::new(tx, |h: NotificationHandle| h.id());
        scheduler.schedule(NotificationHandle::new(7), Duration::from_millis(250));

        let start = tokio::time::Instant::now();
        assert_eq!(rx.recv().await, Some(7));
        assert!(start.elapsed() >= Duration::from_millis(250));
    }

    #[cfg(feature = "runtime")]
    #[tokio::test(start_paused = true)]
    async fn test_tokio_timer_cancel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = TokioScheduler::new(tx, |h: NotificationHandle| h.id());
        let timer = scheduler.schedule(NotificationHandle::new(7), Duration::from_millis(250));
        scheduler.cancel(timer);
        drop(scheduler);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(rx.try_recv().ok(), None);
    }
}
