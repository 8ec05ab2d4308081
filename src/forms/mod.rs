//! Form state and submission payloads.
//!
//! Every form is a plain record updated through an explicit, consuming
//! `update(field, value)` so nested records are rebuilt field by field and
//! siblings are never dropped. Validation runs before a payload is produced;
//! a form that fails validation never reaches the backend.

pub mod auth_forms;
pub mod claim_form;
pub mod customer_form;
pub mod employee_form;

pub use auth_forms::{ChangePasswordForm, ForgotPasswordForm, LoginForm, RegisterForm, ResetPasswordForm};
pub use claim_form::{ClaimField, ClaimForm};
pub use customer_form::{CustomerField, CustomerForm};
pub use employee_form::{EmployeeField, EmployeeForm};

use std::collections::BTreeMap;
use std::fmt;

/// Inline messages keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message; the first message for a field wins.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), FormError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(FormError::Invalid(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

impl From<validator::ValidationErrors> for FieldErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field, errs) in errors.field_errors() {
            for err in errs.iter() {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("is invalid ({})", err.code));
                fields.add(field.to_string(), message);
            }
        }
        fields
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("Please fix the highlighted fields: {0}")]
    Invalid(FieldErrors),

    #[error("Unknown form field '{0}'")]
    UnknownField(String),

    #[error("Field '{field}' expects true or false, got '{value}'")]
    NotAFlag { field: String, value: String },
}

impl FormError {
    /// Field messages carried by the error, empty for structural errors.
    pub fn field_errors(&self) -> FieldErrors {
        match self {
            FormError::Invalid(errors) => errors.clone(),
            _ => FieldErrors::new(),
        }
    }
}

/// Parse a checkbox value.
pub(crate) fn parse_flag(field: &str, value: &str) -> Result<bool, FormError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" | "" => Ok(false),
        _ => Err(FormError::NotAFlag {
            field: field.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Record `message` under `field` when `value` is blank.
pub(crate) fn require(errors: &mut FieldErrors, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.add(field, message);
    }
}
