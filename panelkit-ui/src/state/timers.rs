//! Browser Timers
//!
//! Auto-dismiss timers on top of `setTimeout`.

use gloo_timers::callback::Timeout;
use std::time::Duration;

use panelkit::{NotificationHandle, Scheduler, UiEvent};

use super::dispatcher::Dispatcher;

/// [`Scheduler`] that posts `TimerFired` through the page dispatcher
pub struct GlooScheduler {
    dispatcher: Dispatcher,
}

impl GlooScheduler {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }
}

/// Delay to hand `setTimeout`, or `None` when `after` is beyond the
/// largest delay browsers honour (`i32::MAX` ms). Larger values overflow
/// and fire immediately, so those timers are not armed at all.
pub fn timeout_millis(after: Duration) -> Option<u32> {
    let millis = i32::try_from(after.as_millis()).ok()?;
    u32::try_from(millis).ok()
}

impl Scheduler for GlooScheduler {
    type Timer = Option<Timeout>;

    fn schedule(&mut self, handle: NotificationHandle, after: Duration) -> Self::Timer {
        let Some(millis) = timeout_millis(after) else {
            web_sys::console::warn_1(
                &format!("notification {} outlives any browser timer, keeping it open", handle).into(),
            );
            return None;
        };

        let dispatcher = self.dispatcher.clone();
        Some(Timeout::new(millis, move || {
            dispatcher.post(UiEvent::timer_fired(handle));
        }))
    }

    fn cancel(&mut self, timer: Self::Timer) {
        if let Some(timer) = timer {
            timer.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_timeout_millis_range() {
        assert_eq!(timeout_millis(Duration::from_millis(5000)), Some(5000));
        assert_eq!(timeout_millis(Duration::ZERO), Some(0));
        assert_eq!(
            timeout_millis(Duration::from_millis(i32::MAX as u64)),
            Some(i32::MAX as u32)
        );
        assert_eq!(timeout_millis(Duration::from_millis(i32::MAX as u64 + 1)), None);
        assert_eq!(timeout_millis(Duration::from_millis(3_000_000_000)), None);
    }
}
