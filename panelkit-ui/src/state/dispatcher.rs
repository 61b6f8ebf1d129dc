//! Event Dispatcher
//!
//! Browser callbacks never touch the event loop directly. They hand their
//! event to the dispatcher, which queues it and drains the queue whenever
//! the loop is free, so handlers run one at a time even when a handler's
//! side effects fire further callbacks.

use leptos::spawn_local;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use panelkit::UiEvent;

use crate::app::WebLoop;

/// Cloneable handle to the page's event queue
#[derive(Clone, Default)]
pub struct Dispatcher {
    inner: Rc<DispatcherInner>,
}

#[derive(Default)]
struct DispatcherInner {
    queue: RefCell<VecDeque<UiEvent>>,
    target: RefCell<Option<Weak<RefCell<WebLoop>>>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route queued and future events to `event_loop`
    pub fn attach(&self, event_loop: &Rc<RefCell<WebLoop>>) {
        *self.inner.target.borrow_mut() = Some(Rc::downgrade(event_loop));
        self.flush();
    }

    /// Queue `event` and run it now if the loop is idle
    pub fn dispatch(&self, event: UiEvent) {
        self.inner.queue.borrow_mut().push_back(event);
        self.flush();
    }

    /// Queue `event` from a microtask, after the current callback returns.
    /// Timer and animation callbacks use this so the loop never drops the
    /// closure that is calling it.
    pub fn post(&self, event: UiEvent) {
        let dispatcher = self.clone();
        spawn_local(async move {
            dispatcher.dispatch(event);
        });
    }

    /// Number of events waiting for the loop
    pub fn pending(&self) -> usize {
        self.inner.queue.borrow().len()
    }

    /// Run `f` against the loop, then drain anything it queued.
    /// Returns `None` when no loop is attached or the loop is busy.
    pub fn with_loop<R>(&self, f: impl FnOnce(&mut WebLoop) -> R) -> Option<R> {
        let target = self.target()?;
        let result = {
            let mut event_loop = target.try_borrow_mut().ok()?;
            f(&mut event_loop)
        };
        self.flush();
        Some(result)
    }

    fn target(&self) -> Option<Rc<RefCell<WebLoop>>> {
        self.inner.target.borrow().as_ref().and_then(Weak::upgrade)
    }

    fn flush(&self) {
        let Some(target) = self.target() else {
            return;
        };

        loop {
            // Whoever holds the loop drains the queue once it lets go
            let Ok(mut event_loop) = target.try_borrow_mut() else {
                return;
            };
            let Some(event) = self.inner.queue.borrow_mut().pop_front() else {
                return;
            };
            event_loop.dispatch(event);
        }
    }
}
