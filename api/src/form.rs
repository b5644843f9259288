use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Field name to the list of messages reported for it.
pub type FieldMap = BTreeMap<String, Vec<String>>;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Success,
    Error,
}

/// Outcome of validating a submitted form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SubmissionStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_value: Option<FieldMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<FieldMap>,
}

impl SubmissionResult {
    pub fn success() -> Self {
        Self {
            status: Some(SubmissionStatus::Success),
            ..Default::default()
        }
    }

    /// An empty error map still counts as a failed submission.
    pub fn with_errors(errors: FieldMap) -> Self {
        Self {
            status: Some(SubmissionStatus::Error),
            initial_value: None,
            error: Some(errors),
        }
    }

    pub fn with_initial_value(mut self, value: FieldMap) -> Self {
        self.initial_value = Some(value);
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == Some(SubmissionStatus::Success)
    }

    /// Names of the fields that carry errors, without their values.
    pub fn invalid_fields(&self) -> Vec<&str> {
        self.error
            .iter()
            .flat_map(|e| e.keys())
            .map(String::as_str)
            .collect()
    }

    pub fn field_errors(&self, field: &str) -> &[String] {
        self.error
            .as_ref()
            .and_then(|e| e.get(field))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Response of an action that reports form validation results.
///
/// `result` is always present. `data` is only filled on success paths by
/// convention of the callers, the type does not enforce it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormResponse<T> {
    pub result: SubmissionResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> FormResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            result: SubmissionResult::success(),
            data: Some(data),
        }
    }

    pub fn rejected(result: SubmissionResult) -> Self {
        Self { result, data: None }
    }
}

/// Collects per-field validation messages.
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: FieldMap,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_owned())
            .or_default()
            .push(message.into());
    }

    pub fn check(&mut self, field: &str, outcome: Result<(), String>) {
        if let Err(e) = outcome {
            self.add(field, e);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_result(self) -> SubmissionResult {
        if self.errors.is_empty() {
            SubmissionResult::success()
        } else {
            SubmissionResult::with_errors(self.errors)
        }
    }
}
