//! Request field validation.
//!
//! A `Validator` collects every failing field of one request so the client
//! gets the full `errors` array in a single 400 response.

use std::sync::OnceLock;

use regex::Regex;

use crate::shared::{FieldError, ValidationErrors};

// Compiled once on first use
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_re() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap_or_else(|e| panic!("email pattern: {e}"))
    })
}

/// Syntactic email check
pub fn is_valid_email(email: &str) -> bool {
    email_re().is_match(email.trim())
}

/// Treat empty or whitespace-only strings as absent
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails when `value` is absent or blank
    pub fn required(&mut self, param: &str, value: Option<&str>, msg: &str) -> &mut Self {
        if value.map_or(true, |v| v.trim().is_empty()) {
            self.errors.push(FieldError::new(param, msg));
        }
        self
    }

    pub fn email(&mut self, param: &str, value: Option<&str>, msg: &str) -> &mut Self {
        if !value.is_some_and(is_valid_email) {
            self.errors.push(FieldError::new(param, msg));
        }
        self
    }

    /// Fails when `value` is absent or shorter than `min` characters
    pub fn min_len(&mut self, param: &str, value: Option<&str>, min: usize, msg: &str) -> &mut Self {
        if value.map_or(0, |v| v.chars().count()) < min {
            self.errors.push(FieldError::new(param, msg));
        }
        self
    }

    /// Record a failure found by the caller
    pub fn push(&mut self, error: impl Into<FieldError>) -> &mut Self {
        self.errors.push(error.into());
        self
    }

    pub fn finish(&mut self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(std::mem::take(&mut self.errors)))
        }
    }
}
