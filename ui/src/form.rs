//! State behind the contact form, kept free of DOM types so it can be tested
//! on the host.

use std::collections::BTreeMap;

use contact_types::{Field, Submission, Validation, validate_field};

pub const AGGREGATE_MESSAGE: &str = "Please fill all required fields";
pub const SENT_MESSAGE: &str = "Message sent successfully!";
pub const FAILED_MESSAGE: &str = "Failed to send. Please email me directly.";

/// How long a success banner stays up.
pub const STATUS_DISMISS_MS: u32 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

impl StatusKind {
    pub fn class(self) -> &'static str {
        match self {
            StatusKind::Success => "success",
            StatusKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub text: &'static str,
    id: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactForm {
    values: Submission,
    // At most one inline error per field.
    errors: BTreeMap<Field, &'static str>,
    status: Option<Status>,
    next_status_id: u64,
    submitting: bool,
}

impl ContactForm {
    pub fn value(&self, field: Field) -> &str {
        self.values.get(field)
    }

    /// Stores what the visitor typed and re-checks the field.
    pub fn set_value(&mut self, field: Field, value: String) -> Validation {
        *self.values.get_mut(field) = value;
        self.validate(field)
    }

    /// Checks one field and records or clears its inline error.
    pub fn validate(&mut self, field: Field) -> Validation {
        let result = validate_field(field, self.values.get(field));
        match result.message() {
            Some(message) => {
                self.errors.insert(field, message);
            }
            None => {
                self.errors.remove(&field);
            }
        }
        result
    }

    pub fn error(&self, field: Field) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validates every field and, when all pass, locks the form and returns
    /// the trimmed payload to send. Returns `None` while a request is already
    /// outstanding or when any field is invalid.
    pub fn begin_submit(&mut self) -> Option<Submission> {
        if self.submitting {
            return None;
        }

        let mut valid = true;
        for field in Field::ALL {
            if !self.validate(field).is_valid() {
                valid = false;
            }
        }

        if !valid {
            self.set_status(StatusKind::Error, AGGREGATE_MESSAGE);
            return None;
        }

        self.submitting = true;
        self.status = None;

        let mut payload = Submission::default();
        for field in Field::ALL {
            *payload.get_mut(field) = self.values.get(field).trim().to_string();
        }
        Some(payload)
    }

    /// Unlocks the form once the relay has answered. On success the fields
    /// are cleared and the id of the success banner is returned so the caller
    /// can dismiss it later with [`ContactForm::dismiss_status`].
    pub fn finish_submit<E>(&mut self, result: Result<(), E>) -> Option<u64> {
        self.submitting = false;

        match result {
            Ok(()) => {
                self.values = Submission::default();
                self.errors.clear();
                Some(self.set_status(StatusKind::Success, SENT_MESSAGE))
            }
            Err(_) => {
                self.set_status(StatusKind::Error, FAILED_MESSAGE);
                None
            }
        }
    }

    /// Hides the banner if it is still the one identified by `id`.
    pub fn dismiss_status(&mut self, id: u64) {
        if self.status.as_ref().is_some_and(|s| s.id == id) {
            self.status = None;
        }
    }

    fn set_status(&mut self, kind: StatusKind, text: &'static str) -> u64 {
        self.next_status_id += 1;
        let id = self.next_status_id;
        self.status = Some(Status { kind, text, id });
        id
    }
}
