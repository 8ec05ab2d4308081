//! Login, registration and password forms.

use validator::Validate;

use super::{require, FieldErrors, FormError};
use crate::backend::{
    BackendError, ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest,
};

pub const MIN_PASSWORD_LEN: usize = 6;

const PASSWORDS_DIFFER: &str = "Passwords do not match";
const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters";

fn check_confirmation(errors: &mut FieldErrors, field: &str, password: &str, confirmation: &str) {
    if password != confirmation {
        errors.add(field, PASSWORDS_DIFFER);
    }
}

fn check_length(errors: &mut FieldErrors, field: &str, password: &str) {
    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.add(field, PASSWORD_TOO_SHORT);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct LoginForm {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl LoginForm {
    pub fn update(self, field: &str, value: &str) -> Result<Self, FormError> {
        let value = value.to_string();
        match field {
            "email" => Ok(Self { email: value, ..self }),
            "password" => Ok(Self { password: value, ..self }),
            other => Err(FormError::UnknownField(other.to_string())),
        }
    }

    pub fn to_request(&self) -> Result<LoginRequest, FormError> {
        let form = LoginForm {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        };
        form.validate()
            .map_err(|errors| FormError::Invalid(FieldErrors::from(errors)))?;
        Ok(LoginRequest {
            email: form.email,
            password: form.password,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn update(self, field: &str, value: &str) -> Result<Self, FormError> {
        let value = value.to_string();
        match field {
            "name" => Ok(Self { name: value, ..self }),
            "email" => Ok(Self { email: value, ..self }),
            "password" => Ok(Self { password: value, ..self }),
            "confirm_password" => Ok(Self {
                confirm_password: value,
                ..self
            }),
            other => Err(FormError::UnknownField(other.to_string())),
        }
    }

    pub fn to_request(&self) -> Result<RegisterRequest, FormError> {
        let trimmed = RegisterForm {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            ..self.clone()
        };
        let mut errors = trimmed.validate().err().map(FieldErrors::from).unwrap_or_default();
        check_length(&mut errors, "password", &self.password);
        check_confirmation(&mut errors, "confirm_password", &self.password, &self.confirm_password);
        errors.into_result()?;

        Ok(RegisterRequest {
            name: trimmed.name,
            email: trimmed.email,
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct ForgotPasswordForm {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
}

impl ForgotPasswordForm {
    pub fn update(self, field: &str, value: &str) -> Result<Self, FormError> {
        match field {
            "email" => Ok(Self {
                email: value.to_string(),
            }),
            other => Err(FormError::UnknownField(other.to_string())),
        }
    }

    pub fn to_request(&self) -> Result<ForgotPasswordRequest, FormError> {
        let form = ForgotPasswordForm {
            email: self.email.trim().to_string(),
        };
        form.validate()
            .map_err(|errors| FormError::Invalid(FieldErrors::from(errors)))?;
        Ok(ForgotPasswordRequest { email: form.email })
    }
}

/// Reset form; the token comes from the `/reset-password?token=` route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetPasswordForm {
    pub token: String,
    pub password: String,
    pub confirm_password: String,
}

impl ResetPasswordForm {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Default::default()
        }
    }

    pub fn update(self, field: &str, value: &str) -> Result<Self, FormError> {
        let value = value.to_string();
        match field {
            "token" => Ok(Self { token: value, ..self }),
            "password" => Ok(Self { password: value, ..self }),
            "confirm_password" => Ok(Self {
                confirm_password: value,
                ..self
            }),
            other => Err(FormError::UnknownField(other.to_string())),
        }
    }

    pub fn to_request(&self) -> Result<ResetPasswordRequest, FormError> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "token", &self.token, "Reset link is missing its token");
        check_length(&mut errors, "password", &self.password);
        check_confirmation(&mut errors, "confirm_password", &self.password, &self.confirm_password);
        errors.into_result()?;
        Ok(ResetPasswordRequest {
            token: self.token.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangePasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl ChangePasswordForm {
    pub fn update(self, field: &str, value: &str) -> Result<Self, FormError> {
        let value = value.to_string();
        match field {
            "current_password" => Ok(Self {
                current_password: value,
                ..self
            }),
            "new_password" => Ok(Self {
                new_password: value,
                ..self
            }),
            "confirm_password" => Ok(Self {
                confirm_password: value,
                ..self
            }),
            other => Err(FormError::UnknownField(other.to_string())),
        }
    }

    pub fn to_request(&self) -> Result<ChangePasswordRequest, FormError> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "current_password", &self.current_password, "Current password is required");
        check_length(&mut errors, "new_password", &self.new_password);
        if !self.new_password.is_empty() && self.new_password == self.current_password {
            errors.add("new_password", "New password must differ from the current one");
        }
        check_confirmation(&mut errors, "confirm_password", &self.new_password, &self.confirm_password);
        errors.into_result()?;
        Ok(ChangePasswordRequest {
            current_password: self.current_password.clone(),
            new_password: self.new_password.clone(),
        })
    }

    /// The only server error mapped onto a field: a rejected current password.
    pub fn field_errors_for(error: &BackendError) -> FieldErrors {
        let mut errors = FieldErrors::new();
        let rejected = matches!(error, BackendError::Auth(_)) || error.status() == Some(400);
        if rejected {
            errors.add("current_password", "Current password is incorrect");
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_requires_matching_confirmation() {
        let form = RegisterForm {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "secret1".into(),
            confirm_password: "secret2".into(),
        };
        let err = form.to_request().unwrap_err();
        assert_eq!(err.field_errors().get("confirm_password"), Some(PASSWORDS_DIFFER));
    }

    #[test]
    fn register_enforces_minimum_length() {
        let form = RegisterForm {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "abc".into(),
            confirm_password: "abc".into(),
        };
        let err = form.to_request().unwrap_err();
        assert_eq!(err.field_errors().get("password"), Some(PASSWORD_TOO_SHORT));
    }

    #[test]
    fn change_password_rejects_reuse() {
        let form = ChangePasswordForm {
            current_password: "hunter22".into(),
            new_password: "hunter22".into(),
            confirm_password: "hunter22".into(),
        };
        let err = form.to_request().unwrap_err();
        assert!(err.field_errors().get("new_password").is_some());
    }

    #[test]
    fn wrong_current_password_maps_to_field() {
        let errors = ChangePasswordForm::field_errors_for(&BackendError::Http {
            status: 400,
            message: "bad".into(),
        });
        assert_eq!(errors.get("current_password"), Some("Current password is incorrect"));

        let errors = ChangePasswordForm::field_errors_for(&BackendError::Network("down".into()));
        assert!(errors.is_empty());
    }
}
