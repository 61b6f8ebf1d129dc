//! Form Enhancements
//!
//! Client-side validation styling, confirmation prompts on destructive
//! actions and file input labels.

use wasm_bindgen::JsCast;
use web_sys::{
    Element, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
};

use panelkit::forms::{
    confirm_action, file_input_label, ConfirmOutcome, Confirmer, FieldState, FormValidation,
    CONFIRM_ATTRIBUTE, VALIDATED_CLASS,
};

use super::{listen, query_all, window};

/// Class of the label element next to a custom file input
const FILE_LABEL_CLASS: &str = "custom-file-label";

/// `window.confirm`; declines when no window is available
pub struct WindowConfirmer;

impl Confirmer for WindowConfirmer {
    fn confirm(&mut self, prompt: &str) -> bool {
        window()
            .and_then(|w| w.confirm_with_message(prompt).ok())
            .unwrap_or(false)
    }
}

/// Block submission of `form.needs-validation` while any field is invalid
pub fn wire_forms() {
    for form in query_all("form.needs-validation") {
        let Ok(form) = form.dyn_into::<HtmlFormElement>() else {
            continue;
        };

        let target = form.clone();
        listen(&form, "submit", move |event| {
            let fields = collect_fields(&target);
            if !FormValidation::on_submit(&fields).is_allowed() {
                event.prevent_default();
                event.stop_propagation();
            }
            if let Err(e) = target.class_list().add_1(VALIDATED_CLASS) {
                web_sys::console::error_1(&format!("{:?}", e).into());
            }
        });
    }
}

/// Ask before following any element carrying `data-confirm`
pub fn wire_confirmations() {
    for element in query_all(&format!("[{}]", CONFIRM_ATTRIBUTE)) {
        let target = element.clone();
        listen(&element, "click", move |event| {
            let prompt = target.get_attribute(CONFIRM_ATTRIBUTE);
            if confirm_action(prompt.as_deref(), &mut WindowConfirmer) == ConfirmOutcome::Cancelled {
                event.prevent_default();
                event.stop_immediate_propagation();
            }
        });
    }
}

/// Show the chosen file names next to custom file inputs
pub fn wire_file_inputs() {
    for element in query_all("input[type=file]") {
        let Ok(input) = element.dyn_into::<HtmlInputElement>() else {
            continue;
        };

        let target = input.clone();
        listen(&input, "change", move |_| {
            let names: Vec<String> = target
                .files()
                .map(|files| {
                    (0..files.length())
                        .filter_map(|i| files.item(i))
                        .map(|file| file.name())
                        .collect()
                })
                .unwrap_or_default();

            if let Some(label) = file_label_for(&target) {
                label.set_text_content(Some(&file_input_label(&names)));
            }
        });
    }
}

fn file_label_for(input: &HtmlInputElement) -> Option<Element> {
    input
        .next_element_sibling()
        .filter(|sibling| sibling.class_list().contains(FILE_LABEL_CLASS))
        .or_else(|| {
            let id = input.id();
            if id.is_empty() {
                return None;
            }
            query_all(&format!("label[for=\"{}\"]", id)).into_iter().next()
        })
}

fn collect_fields(form: &HtmlFormElement) -> Vec<FieldState> {
    let Ok(nodes) = form.query_selector_all("input, select, textarea") else {
        return Vec::new();
    };

    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| {
            if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
                Some(FieldState::new(input.name(), input.check_validity()))
            } else if let Some(select) = node.dyn_ref::<HtmlSelectElement>() {
                Some(FieldState::new(select.name(), select.check_validity()))
            } else {
                node.dyn_ref::<HtmlTextAreaElement>()
                    .map(|area| FieldState::new(area.name(), area.check_validity()))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::document;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_collect_fields_reports_required_empty() {
        let document = document().unwrap();
        let form: HtmlFormElement = document.create_element("form").unwrap().dyn_into().unwrap();
        form.set_inner_html(
            r#"<input name="email" required>
               <input name="nickname">
               <textarea name="notes"></textarea>"#,
        );

        let fields = collect_fields(&form);
        assert_eq!(fields.len(), 3);
        assert!(!fields[0].valid);
        assert!(fields[1].valid);
        assert!(!FormValidation::on_submit(&fields).is_allowed());
    }
}
