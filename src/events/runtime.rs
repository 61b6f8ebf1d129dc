//! Event Loop
//!
//! Owns the sidebar state and the notification center and processes
//! events one at a time, in arrival order. After each sidebar transition
//! the class patches needed to reflect it are pushed to a [`SidebarView`].

#[cfg(feature = "runtime")]
use tokio::sync::mpsc;

use crate::config::Config;
use crate::error::ShellResult;
use crate::notify::{Notice, NotificationCenter, NotificationHandle, NotificationSurface, Scheduler};
#[cfg(feature = "runtime")]
use crate::notify::{RecordingSurface, TokioScheduler};
use crate::sidebar::{ClassPatch, SidebarState};
use crate::viewport::{ViewportClass, ViewportClassifier};

use super::handlers::HandlerTable;
use super::UiEvent;

/// Applies class patches to the sidebar and overlay elements
pub trait SidebarView {
    fn apply(&mut self, patches: &[ClassPatch]);
}

/// View that keeps every patch batch it receives
#[derive(Debug, Default)]
pub struct RecordingView {
    pub batches: Vec<Vec<ClassPatch>>,
}

impl SidebarView for RecordingView {
    fn apply(&mut self, patches: &[ClassPatch]) {
        self.batches.push(patches.to_vec());
    }
}

pub struct EventLoop<V, S, T>
where
    V: SidebarView,
    S: NotificationSurface,
    T: Scheduler,
{
    classifier: ViewportClassifier,
    class: ViewportClass,
    sidebar: SidebarState,
    handlers: HandlerTable,
    view: V,
    center: NotificationCenter<S, T>,
    default_duration_ms: u64,
}

impl<V, S, T> EventLoop<V, S, T>
where
    V: SidebarView,
    S: NotificationSurface,
    T: Scheduler,
{
    /// Build the loop and bring the view in line with the initial state
    pub fn new(config: &Config, width: u32, mut view: V, center: NotificationCenter<S, T>) -> Self {
        let classifier = config.viewport.classifier();
        let class = classifier.classify(width);
        let sidebar = SidebarState::new();
        view.apply(&ClassPatch::full(sidebar.classes()));

        tracing::debug!(width, %class, "event loop initialised");

        Self {
            classifier,
            class,
            sidebar,
            handlers: HandlerTable::default(),
            view,
            center,
            default_duration_ms: config.notifications.default_duration_ms,
        }
    }

    pub fn with_handlers(mut self, handlers: HandlerTable) -> Self {
        self.handlers = handlers;
        self
    }

    /// Process one event. Returns the handle of a notification it created.
    pub fn handle(&mut self, event: UiEvent) -> ShellResult<Option<NotificationHandle>> {
        let event_kind = event.kind();
        match event {
            UiEvent::Resized { width } => {
                let class = self.classifier.classify(width);
                if class != self.class {
                    tracing::debug!(width, from = %self.class, to = %class, "viewport class changed");
                }
                self.class = class;
            }
            UiEvent::Notify {
                message,
                kind,
                duration_ms,
            } => {
                let notice = Notice::new(message)
                    .kind(kind)
                    .duration_ms(duration_ms.unwrap_or(self.default_duration_ms));
                return self.center.notify(notice).map(Some);
            }
            UiEvent::DismissClicked { id } => {
                self.center.dismiss(id);
                return Ok(None);
            }
            UiEvent::TimerFired { id } => {
                self.center.expire(id);
                return Ok(None);
            }
            UiEvent::AlertClosed { id } => {
                self.center.on_closed(id);
                return Ok(None);
            }
            UiEvent::ToggleClicked | UiEvent::OverlayClicked | UiEvent::NavLinkClicked => {}
        }

        if let Some(handler) = self.handlers.get(event_kind) {
            let before = self.sidebar;
            self.sidebar = handler(before, self.class);
            let patches = ClassPatch::diff(before.classes(), self.sidebar.classes());
            if !patches.is_empty() {
                self.view.apply(&patches);
            }
        }
        Ok(None)
    }

    /// Process an event, logging instead of returning failures
    pub fn dispatch(&mut self, event: UiEvent) {
        if let Err(e) = self.handle(event) {
            tracing::warn!("event handling failed: {}", e);
        }
    }

    pub fn sidebar(&self) -> SidebarState {
        self.sidebar
    }

    pub fn viewport_class(&self) -> ViewportClass {
        self.class
    }

    pub fn center(&self) -> &NotificationCenter<S, T> {
        &self.center
    }

    pub fn center_mut(&mut self) -> &mut NotificationCenter<S, T> {
        &mut self.center
    }

    pub fn view(&self) -> &V {
        &self.view
    }
}

#[cfg(feature = "runtime")]
impl<V, S, T> EventLoop<V, S, T>
where
    V: SidebarView,
    S: NotificationSurface,
    T: Scheduler,
{
    /// Process everything already queued without waiting
    pub fn drain(&mut self, rx: &mut mpsc::UnboundedReceiver<UiEvent>) -> usize {
        let mut processed = 0;
        while let Ok(event) = rx.try_recv() {
            self.dispatch(event);
            processed += 1;
        }
        processed
    }

    /// Process events until every sender is dropped
    pub async fn run(&mut self, rx: &mut mpsc::UnboundedReceiver<UiEvent>) {
        while let Some(event) = rx.recv().await {
            self.dispatch(event);
        }
        tracing::debug!("event queue closed");
    }
}

/// Loop with no page behind it: timers are tokio tasks and alert widgets
/// close instantly
#[cfg(feature = "runtime")]
pub type HeadlessLoop =
    EventLoop<RecordingView, RecordingSurface, TokioScheduler<UiEvent>>;

#[cfg(feature = "runtime")]
impl HeadlessLoop {
    /// Build a headless loop plus its event queue. Must be called inside a
    /// tokio runtime.
    pub fn headless(
        config: &Config,
        width: u32,
    ) -> (
        Self,
        mpsc::UnboundedSender<UiEvent>,
        mpsc::UnboundedReceiver<UiEvent>,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();

        let close_tx = tx.clone();
        let surface = RecordingSurface::with_close_hook(move |id| {
            let _ = close_tx.send(UiEvent::AlertClosed { id });
        });
        let scheduler = TokioScheduler::new(tx.clone(), UiEvent::timer_fired);
        let center = NotificationCenter::new(surface, scheduler);

        (
            EventLoop::new(config, width, RecordingView::default(), center),
            tx,
            rx,
        )
    }
}
