//! Form helpers
//!
//! Validation classes on submit, confirmation prompts for elements that
//! carry `data-confirm`, and the label shown next to custom file inputs.

/// Class added to a form once a submit has been attempted
pub const VALIDATED_CLASS: &str = "was-validated";

/// Attribute holding a confirmation prompt
pub const CONFIRM_ATTRIBUTE: &str = "data-confirm";

/// Prompt used when `data-confirm` is present but empty
pub const DEFAULT_CONFIRM_PROMPT: &str = "Are you sure?";

/// Validity of one form control as reported by the constraint API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldState {
    pub name: String,
    pub valid: bool,
}

impl FieldState {
    pub fn new(name: impl Into<String>, valid: bool) -> Self {
        Self {
            name: name.into(),
            valid,
        }
    }
}

/// Whether a submit goes ahead
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitDecision {
    Allow,
    /// Submission blocked; names of the invalid fields
    Block { invalid: Vec<String> },
}

impl SubmitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, SubmitDecision::Allow)
    }
}

/// Submit-time validation for forms marked `needs-validation`
pub struct FormValidation;

impl FormValidation {
    /// Decide a submit. The form gets [`VALIDATED_CLASS`] either way so the
    /// page shows the per-field feedback.
    pub fn on_submit(fields: &[FieldState]) -> SubmitDecision {
        let invalid: Vec<String> = fields
            .iter()
            .filter(|f| !f.valid)
            .map(|f| f.name.clone())
            .collect();

        if invalid.is_empty() {
            SubmitDecision::Allow
        } else {
            tracing::debug!(?invalid, "form submission blocked");
            SubmitDecision::Block { invalid }
        }
    }
}

/// Something that can ask the user a yes/no question
pub trait Confirmer {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Result of a confirmation prompt. Declining is a normal outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Proceed,
    Cancelled,
}

/// Ask before running a destructive action. `prompt` is the raw
/// `data-confirm` value.
pub fn confirm_action(prompt: Option<&str>, confirmer: &mut impl Confirmer) -> ConfirmOutcome {
    let prompt = prompt
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or(DEFAULT_CONFIRM_PROMPT);

    if confirmer.confirm(prompt) {
        ConfirmOutcome::Proceed
    } else {
        tracing::debug!(prompt, "action cancelled by user");
        ConfirmOutcome::Cancelled
    }
}

/// Label text for a custom file input
pub fn file_input_label(file_names: &[String]) -> String {
    match file_names {
        [] => "Choose file".to_string(),
        [single] => single.clone(),
        many => format!("{} files selected", many.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scripted {
        answer: bool,
        asked: Vec<String>,
    }

    impl Confirmer for Scripted {
        fn confirm(&mut self, prompt: &str) -> bool {
            self.asked.push(prompt.to_string());
            self.answer
        }
    }

    #[test]
    fn test_submit_blocked_on_invalid_fields() {
        let fields = vec![
            FieldState::new("email", false),
            FieldState::new("name", true),
            FieldState::new("age", false),
        ];
        assert_eq!(
            FormValidation::on_submit(&fields),
            SubmitDecision::Block {
                invalid: vec!["email".to_string(), "age".to_string()]
            }
        );
    }

    #[test]
    fn test_submit_allowed() {
        assert!(FormValidation::on_submit(&[FieldState::new("name", true)]).is_allowed());
        assert!(FormValidation::on_submit(&[]).is_allowed());
    }

    #[test]
    fn test_confirmation() {
        let mut yes = Scripted { answer: true, asked: Vec::new() };
        assert_eq!(confirm_action(Some("Delete user?"), &mut yes), ConfirmOutcome::Proceed);

        let mut no = Scripted { answer: false, asked: Vec::new() };
        assert_eq!(confirm_action(Some("  "), &mut no), ConfirmOutcome::Cancelled);
        assert_eq!(no.asked, vec![DEFAULT_CONFIRM_PROMPT.to_string()]);
    }

    #[test]
    fn test_file_label() {
        assert_eq!(file_input_label(&[]), "Choose file");
        assert_eq!(file_input_label(&["a.csv".to_string()]), "a.csv");
        assert_eq!(
            file_input_label(&["a.csv".to_string(), "b.csv".to_string()]),
            "2 files selected"
        );
    }
}
