//! Field-level payload validation shared by the create and update paths,
//! so both sides of each entity use one set of bounds.

use std::collections::HashMap;

use crate::error::ApiError;

/// Accumulates per-field validation failures before any repository call.
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: HashMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Character-count bound check (codepoints, not bytes).
    pub fn length(&mut self, field: &str, value: &str, min: usize, max: usize) {
        let len = value.chars().count();
        if len < min || len > max {
            self.errors.insert(
                field.to_string(),
                format!("must be between {} and {} characters", min, max),
            );
        }
    }

    /// The value must parse as an absolute URL.
    pub fn url(&mut self, field: &str, value: &str) {
        if url::Url::parse(value).is_err() {
            self.errors
                .insert(field.to_string(), "must be a valid URL".to_string());
        }
    }

    /// Inclusive numeric range check.
    pub fn range(&mut self, field: &str, value: f64, min: f64, max: f64) {
        if !(min..=max).contains(&value) {
            self.errors.insert(
                field.to_string(),
                format!("must be between {} and {}", min, max),
            );
        }
    }

    pub fn reject(&mut self, field: &str, reason: impl Into<String>) {
        self.errors.insert(field.to_string(), reason.into());
    }

    pub fn finish(self, message: impl Into<String>) -> Result<(), ApiError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation(message, self.errors))
        }
    }
}
