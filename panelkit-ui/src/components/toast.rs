//! Toast Notification Component
//!
//! Renders the notification center's toasts as dismissible alerts and
//! reports clicks and finished close animations back to the event loop.

use gloo_timers::callback::Timeout;
use leptos::*;
use wasm_bindgen::JsCast;

use panelkit::{
    Notification, NotificationConfig, NotificationHandle, NotificationKind, NotificationSurface,
    ShellError, ShellResult, UiEvent,
};

use crate::dom;
use crate::state::dispatcher::Dispatcher;

/// Reports the close as finished when no `transitionend` arrives,
/// e.g. with reduced-motion styles
const CLOSE_FALLBACK_MS: u32 = 600;

/// One rendered toast
#[derive(Debug, Clone, PartialEq)]
pub struct ToastItem {
    pub handle: NotificationHandle,
    pub message: String,
    pub kind: NotificationKind,
    pub closing: bool,
}

impl From<&Notification> for ToastItem {
    fn from(notification: &Notification) -> Self {
        Self {
            handle: notification.handle,
            message: notification.message.clone(),
            kind: notification.kind,
            closing: false,
        }
    }
}

/// [`NotificationSurface`] backed by a Leptos signal
pub struct ToastSurface {
    config: NotificationConfig,
    toasts: RwSignal<Vec<ToastItem>>,
    dispatcher: Dispatcher,
}

impl ToastSurface {
    pub fn new(
        config: NotificationConfig,
        toasts: RwSignal<Vec<ToastItem>>,
        dispatcher: Dispatcher,
    ) -> Self {
        Self {
            config,
            toasts,
            dispatcher,
        }
    }
}

fn unavailable(what: &str) -> ShellError {
    ShellError::SurfaceUnavailable(what.to_string())
}

impl NotificationSurface for ToastSurface {
    fn create_container(&mut self) -> ShellResult<()> {
        let document = dom::document().ok_or_else(|| unavailable("no document"))?;
        let body = document.body().ok_or_else(|| unavailable("no document body"))?;

        let container = document
            .create_element("div")
            .map_err(|e| ShellError::SurfaceUnavailable(format!("{:?}", e)))?;
        container.set_id(&self.config.container_id);
        container.set_class_name(&self.config.container_class);
        body.append_child(&container)
            .map_err(|e| ShellError::SurfaceUnavailable(format!("{:?}", e)))?;

        let container: web_sys::HtmlElement = container
            .dyn_into()
            .map_err(|_| unavailable("toast container is not an HTML element"))?;

        let toasts = self.toasts;
        let dispatcher = self.dispatcher.clone();
        mount_to(container, move || {
            view! { <ToastStack toasts=toasts dispatcher=dispatcher /> }
        });
        Ok(())
    }

    fn mount(&mut self, notification: &Notification) {
        self.toasts
            .update(|toasts| toasts.push(ToastItem::from(notification)));
    }

    fn begin_close(&mut self, handle: NotificationHandle) {
        self.toasts.update(|toasts| {
            if let Some(toast) = toasts.iter_mut().find(|t| t.handle == handle) {
                toast.closing = true;
            }
        });

        let dispatcher = self.dispatcher.clone();
        Timeout::new(CLOSE_FALLBACK_MS, move || {
            dispatcher.post(UiEvent::AlertClosed { id: handle });
        })
        .forget();
    }

    fn remove(&mut self, handle: NotificationHandle) {
        self.toasts
            .update(|toasts| toasts.retain(|t| t.handle != handle));
    }
}

/// Toast container contents
#[component]
pub fn ToastStack(toasts: RwSignal<Vec<ToastItem>>, dispatcher: Dispatcher) -> impl IntoView {
    view! {
        <For
            each=move || toasts.get()
            key=|toast| toast.handle
            children=move |toast: ToastItem| {
                let handle = toast.handle;
                let closing = Signal::derive(move || {
                    toasts.with(|all| all.iter().any(|t| t.handle == handle && t.closing))
                });
                view! { <ToastMessage toast=toast closing=closing dispatcher=dispatcher.clone() /> }
            }
        />
    }
}

#[component]
fn ToastMessage(
    toast: ToastItem,
    #[prop(into)]
    closing: Signal<bool>,
    dispatcher: Dispatcher,
) -> impl IntoView {
    let handle = toast.handle;
    let alert_class = toast.kind.alert_class();

    let on_dismiss = {
        let dispatcher = dispatcher.clone();
        move |_| dispatcher.dispatch(UiEvent::DismissClicked { id: handle })
    };

    let on_transition_end = move |_| {
        if closing.get_untracked() {
            dispatcher.post(UiEvent::AlertClosed { id: handle });
        }
    };

    view! {
        <div
            id=handle.element_id()
            class=move || format!(
                "alert {} alert-dismissible fade{}",
                alert_class,
                if closing.get() { "" } else { " show" }
            )
            role="alert"
            on:transitionend=on_transition_end
        >
            <span class="me-2">{toast.kind.icon()}</span>
            <span>{toast.message}</span>
            <button type="button" class="btn-close" aria-label="Close" on:click=on_dismiss></button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use panelkit::notify::NotificationPhase;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_toast_item_from_notification() {
        let notification = Notification {
            handle: NotificationHandle::new(4),
            message: "Saved".to_string(),
            kind: NotificationKind::Success,
            duration_ms: 3000,
            created_at: Utc::now(),
            phase: NotificationPhase::Live,
        };

        let item = ToastItem::from(&notification);
        assert_eq!(item.handle, NotificationHandle::new(4));
        assert_eq!(item.message, "Saved");
        assert!(!item.closing);
    }

    #[wasm_bindgen_test]
    fn test_surface_close_and_remove() {
        let runtime = create_runtime();
        let toasts = create_rw_signal(Vec::new());
        let mut surface =
            ToastSurface::new(NotificationConfig::default(), toasts, Dispatcher::new());

        let notification = Notification {
            handle: NotificationHandle::new(1),
            message: "Hello".to_string(),
            kind: NotificationKind::Info,
            duration_ms: 0,
            created_at: Utc::now(),
            phase: NotificationPhase::Live,
        };
        surface.mount(&notification);
        surface.begin_close(notification.handle);
        assert!(toasts.with_untracked(|t| t[0].closing));

        surface.remove(notification.handle);
        assert!(toasts.with_untracked(|t| t.is_empty()));
        runtime.dispose();
    }
}
