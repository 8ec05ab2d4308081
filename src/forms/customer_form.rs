use std::str::FromStr;

use validator::Validate;

use super::{FieldErrors, FormError};
use crate::backend::CustomerPayload;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerField {
    Name,
    Email,
    Phone,
    Address,
    City,
}

impl CustomerField {
    pub const ALL: [CustomerField; 5] = [
        CustomerField::Name,
        CustomerField::Email,
        CustomerField::Phone,
        CustomerField::Address,
        CustomerField::City,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CustomerField::Name => "name",
            CustomerField::Email => "email",
            CustomerField::Phone => "phone",
            CustomerField::Address => "address",
            CustomerField::City => "city",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CustomerField::Name => "Name",
            CustomerField::Email => "Email",
            CustomerField::Phone => "Phone",
            CustomerField::Address => "Address",
            CustomerField::City => "City",
        }
    }
}

impl FromStr for CustomerField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CustomerField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}

/// New-customer form. Field rules are checked by `validator` before the
/// payload is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct CustomerForm {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: String,

    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,

    #[validate(length(min = 7, max = 20, message = "Phone must be between 7 and 20 characters"))]
    pub phone: String,

    #[validate(length(max = 200, message = "Address is too long"))]
    pub address: String,

    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
}

impl CustomerForm {
    pub fn value(&self, field: CustomerField) -> &str {
        match field {
            CustomerField::Name => &self.name,
            CustomerField::Email => &self.email,
            CustomerField::Phone => &self.phone,
            CustomerField::Address => &self.address,
            CustomerField::City => &self.city,
        }
    }

    pub fn update(self, field: CustomerField, value: &str) -> Self {
        let value = value.to_string();
        match field {
            CustomerField::Name => Self { name: value, ..self },
            CustomerField::Email => Self { email: value, ..self },
            CustomerField::Phone => Self { phone: value, ..self },
            CustomerField::Address => Self { address: value, ..self },
            CustomerField::City => Self { city: value, ..self },
        }
    }

    fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
        }
    }

    pub fn to_payload(&self) -> Result<CustomerPayload, FormError> {
        let form = self.trimmed();
        form.validate()
            .map_err(|errors| FormError::Invalid(FieldErrors::from(errors)))?;
        Ok(CustomerPayload {
            name: form.name,
            email: form.email,
            phone: form.phone,
            address: form.address,
            city: form.city,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> CustomerForm {
        CustomerForm::default()
            .update(CustomerField::Name, "Dana Okafor")
            .update(CustomerField::Email, "dana@example.com")
            .update(CustomerField::Phone, "555-0101")
            .update(CustomerField::City, "Lagos")
    }

    #[test]
    fn valid_form_builds_payload() {
        let payload = filled().to_payload().unwrap();
        assert_eq!(payload.name, "Dana Okafor");
        assert_eq!(payload.city, "Lagos");
        assert!(payload.address.is_empty());
    }

    #[test]
    fn bad_email_is_reported_on_its_field() {
        let err = filled().update(CustomerField::Email, "not-an-email").to_payload().unwrap_err();
        let fields = err.field_errors();
        assert_eq!(fields.get("email"), Some("Enter a valid email address"));
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn whitespace_city_counts_as_missing() {
        let err = filled().update(CustomerField::City, "   ").to_payload().unwrap_err();
        assert_eq!(err.field_errors().get("city"), Some("City is required"));
    }
}
