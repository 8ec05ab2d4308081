use std::str::FromStr;

use super::{require, FieldErrors, FormError};
use crate::backend::EmployeePayload;
use crate::utils::datetime::{format_ymd, parse_date};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeField {
    Name,
    Position,
    Department,
    YearsOfExperience,
    HireDate,
}

impl EmployeeField {
    pub const ALL: [EmployeeField; 5] = [
        EmployeeField::Name,
        EmployeeField::Position,
        EmployeeField::Department,
        EmployeeField::YearsOfExperience,
        EmployeeField::HireDate,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EmployeeField::Name => "name",
            EmployeeField::Position => "position",
            EmployeeField::Department => "department",
            EmployeeField::YearsOfExperience => "years_of_experience",
            EmployeeField::HireDate => "hire_date",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EmployeeField::Name => "Name",
            EmployeeField::Position => "Position",
            EmployeeField::Department => "Department",
            EmployeeField::YearsOfExperience => "Years of experience",
            EmployeeField::HireDate => "Hire date",
        }
    }
}

impl FromStr for EmployeeField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EmployeeField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeForm {
    pub name: String,
    pub position: String,
    pub department: String,
    pub years_of_experience: String,
    pub hire_date: String,
}

impl EmployeeForm {
    pub fn value(&self, field: EmployeeField) -> &str {
        match field {
            EmployeeField::Name => &self.name,
            EmployeeField::Position => &self.position,
            EmployeeField::Department => &self.department,
            EmployeeField::YearsOfExperience => &self.years_of_experience,
            EmployeeField::HireDate => &self.hire_date,
        }
    }

    pub fn update(self, field: EmployeeField, value: &str) -> Self {
        let value = value.to_string();
        match field {
            EmployeeField::Name => Self { name: value, ..self },
            EmployeeField::Position => Self { position: value, ..self },
            EmployeeField::Department => Self {
                department: value,
                ..self
            },
            EmployeeField::YearsOfExperience => Self {
                years_of_experience: value,
                ..self
            },
            EmployeeField::HireDate => Self { hire_date: value, ..self },
        }
    }

    pub fn to_payload(&self) -> Result<EmployeePayload, FormError> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", &self.name, "Name is required");
        require(&mut errors, "position", &self.position, "Position is required");
        require(&mut errors, "department", &self.department, "Department is required");
        require(&mut errors, "years_of_experience", &self.years_of_experience, "Years of experience is required");
        require(&mut errors, "hire_date", &self.hire_date, "Hire date is required");

        let years = self.years_of_experience.trim().parse::<u32>().ok();
        if years.is_none() {
            errors.add("years_of_experience", "Must be a non-negative whole number");
        }
        let hire_date = parse_date(&self.hire_date);
        if hire_date.is_none() {
            errors.add("hire_date", "Use YYYY-MM-DD");
        }

        errors.into_result()?;

        match (years, hire_date) {
            (Some(years_of_experience), Some(hire_date)) => Ok(EmployeePayload {
                name: self.name.trim().to_string(),
                position: self.position.trim().to_string(),
                department: self.department.trim().to_string(),
                years_of_experience,
                hire_date: format_ymd(hire_date),
            }),
            _ => Err(FormError::Invalid(FieldErrors::new())),
        }
    }
}
