use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use validator::Validate;

#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct QuizForm {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
}

impl QuizForm {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Field name to first message. Empty when the form is valid.
    pub fn field_errors(&self) -> BTreeMap<String, String> {
        let Err(errors) = self.validate() else {
            return BTreeMap::new();
        };

        errors
            .field_errors()
            .into_iter()
            .filter_map(|(field, errs)| {
                let message = errs.first()?.message.as_ref()?.to_string();
                Some((field.to_string(), message))
            })
            .collect()
    }
}

/// Loading flag of a single form. While a ticket is alive, further
/// `try_begin` calls on the same guard are refused.
#[derive(Debug, Clone, Default)]
pub struct SubmitGuard {
    busy: Arc<AtomicBool>,
}

#[must_use = "the guard is released as soon as the ticket is dropped"]
#[derive(Debug)]
pub struct SubmitTicket {
    busy: Arc<AtomicBool>,
}

impl SubmitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_begin(&self) -> Option<SubmitTicket> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmitTicket {
                busy: Arc::clone(&self.busy),
            })
    }
}

impl Drop for SubmitTicket {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_form_has_no_errors() {
        let form = QuizForm::new("Math Basic Quiz", "Test arithmetic");
        assert!(form.field_errors().is_empty());
    }

    #[test]
    fn test_empty_fields_reported() {
        let errors = QuizForm::default().field_errors();
        assert_eq!(errors.get("title").map(String::as_str), Some("Title is required"));
        assert_eq!(
            errors.get("description").map(String::as_str),
            Some("Description is required")
        );
    }

    #[test]
    fn test_guard_refuses_second_submission() {
        let guard = SubmitGuard::new();
        let ticket = guard.try_begin().expect("first submission allowed");
        assert!(guard.try_begin().is_none());

        drop(ticket);
        assert!(guard.try_begin().is_some());
    }

    #[test]
    fn test_guards_are_independent() {
        let a = SubmitGuard::new();
        let b = SubmitGuard::new();
        let _ticket = a.try_begin().unwrap();
        assert!(b.try_begin().is_some());
    }
}
