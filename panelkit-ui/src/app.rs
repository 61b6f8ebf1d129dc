//! Shell Root
//!
//! Builds the event loop around the page's elements and runs the one-off
//! page enhancements.

use leptos::*;
use std::cell::RefCell;
use std::rc::Rc;

use panelkit::{
    Config, EventLoop, NotificationCenter, NotificationHandle, NotificationKind, PrintExporter,
    ShellResult, UiEvent,
};

use crate::bindings;
use crate::components::toast::ToastSurface;
use crate::dom::{self, dates, forms, print, sidebar, widgets};
use crate::state::config::load_config;
use crate::state::dispatcher::Dispatcher;
use crate::state::timers::GlooScheduler;

/// Event loop bound to the live page
pub type WebLoop = EventLoop<sidebar::DomSidebarView, ToastSurface, GlooScheduler>;

/// Everything the page scripts can reach
pub struct Shell {
    dispatcher: Dispatcher,
    // Keeps the loop alive; the dispatcher only holds a weak reference
    _event_loop: Rc<RefCell<WebLoop>>,
    exporter: PrintExporter,
}

/// Entry point called from `main`
pub fn start() {
    let config = load_config();
    let shell = Shell::init(&config);
    bindings::install(shell);
    web_sys::console::log_1(&"panelkit ready".into());
}

impl Shell {
    /// Look up the page's elements and wire every listener
    pub fn init(config: &Config) -> Rc<Self> {
        let dispatcher = Dispatcher::new();

        let handles = sidebar::SidebarHandles::from_page(&sidebar::DomIds::default());
        let view = sidebar::DomSidebarView::new(&handles);

        let toasts = create_rw_signal(Vec::new());
        let surface = ToastSurface::new(config.notifications.clone(), toasts, dispatcher.clone());
        let center = NotificationCenter::new(surface, GlooScheduler::new(dispatcher.clone()));

        let event_loop = Rc::new(RefCell::new(EventLoop::new(
            config,
            dom::window_width(),
            view,
            center,
        )));
        dispatcher.attach(&event_loop);

        sidebar::wire(&handles, &dispatcher);
        forms::wire_forms();
        forms::wire_confirmations();
        forms::wire_file_inputs();
        dates::format_dates(&config.dates);

        let report = widgets::dashboard_widgets().run(&mut widgets::PageWidgets);
        web_sys::console::log_1(
            &format!(
                "widgets: {} charts, {} tables, {} tooltips, {} skipped, {} failed",
                report.charts_rendered,
                report.tables_initialised,
                report.tooltips,
                report.skipped.len(),
                report.failed.len()
            )
            .into(),
        );

        Rc::new(Self {
            dispatcher,
            _event_loop: event_loop,
            exporter: PrintExporter::new(config.print.clone()),
        })
    }

    /// Show a notification; `None` duration uses the configured default
    pub fn notify(
        &self,
        message: String,
        kind: NotificationKind,
        duration_ms: Option<u64>,
    ) -> Option<NotificationHandle> {
        let event = UiEvent::Notify {
            message,
            kind,
            duration_ms,
        };
        match self.dispatcher.with_loop(|event_loop| event_loop.handle(event)) {
            Some(Ok(handle)) => handle,
            Some(Err(e)) => {
                web_sys::console::error_1(&format!("notification failed: {}", e).into());
                None
            }
            None => {
                web_sys::console::error_1(&"notification center busy".into());
                None
            }
        }
    }

    pub fn dismiss(&self, handle: NotificationHandle) {
        self.dispatcher.dispatch(UiEvent::DismissClicked { id: handle });
    }

    pub fn print_subtree(&self, element_id: &str, title: &str) -> ShellResult<()> {
        self.exporter
            .print_subtree(&print::DomElementSource, &mut print::BlobWindowSurface, element_id, title)
            .map(|_| ())
    }
}
