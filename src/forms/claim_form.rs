//! Claim create/edit form.

use std::str::FromStr;

use super::{parse_flag, require, FieldErrors, FormError};
use crate::backend::{ClaimMetadataPayload, ClaimPayload};
use crate::models::{Claim, ClaimStatus, Documentation, Priority};
use crate::utils::datetime::{format_ymd, parse_date};

/// One of the four documentation checkboxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentationFlag {
    PhotoEvidence,
    EstimateProvided,
    PoliceReport,
    ContractorReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataField {
    Status,
    Priority,
    ClaimAmount,
    IncidentDate,
    Details,
    Documentation(DocumentationFlag),
}

/// Typed path of a claim form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimField {
    PolicyNumber,
    PolicyTypeId,
    CustomerId,
    EmployeeId,
    Metadata(MetadataField),
}

impl ClaimField {
    /// Fields in the order the form shows them.
    pub const ALL: [ClaimField; 13] = [
        ClaimField::PolicyNumber,
        ClaimField::PolicyTypeId,
        ClaimField::CustomerId,
        ClaimField::EmployeeId,
        ClaimField::Metadata(MetadataField::Status),
        ClaimField::Metadata(MetadataField::Priority),
        ClaimField::Metadata(MetadataField::ClaimAmount),
        ClaimField::Metadata(MetadataField::IncidentDate),
        ClaimField::Metadata(MetadataField::Details),
        ClaimField::Metadata(MetadataField::Documentation(DocumentationFlag::PhotoEvidence)),
        ClaimField::Metadata(MetadataField::Documentation(DocumentationFlag::EstimateProvided)),
        ClaimField::Metadata(MetadataField::Documentation(DocumentationFlag::PoliceReport)),
        ClaimField::Metadata(MetadataField::Documentation(DocumentationFlag::ContractorReport)),
    ];

    /// Dotted name, as used in payloads and error maps.
    pub fn name(self) -> &'static str {
        match self {
            ClaimField::PolicyNumber => "policy_number",
            ClaimField::PolicyTypeId => "policy_type_id",
            ClaimField::CustomerId => "customer_id",
            ClaimField::EmployeeId => "employee_id",
            ClaimField::Metadata(field) => match field {
                MetadataField::Status => "metadata.status",
                MetadataField::Priority => "metadata.priority",
                MetadataField::ClaimAmount => "metadata.claimAmount",
                MetadataField::IncidentDate => "metadata.incidentDate",
                MetadataField::Details => "metadata.details",
                MetadataField::Documentation(flag) => match flag {
                    DocumentationFlag::PhotoEvidence => "metadata.documentation.photoEvidence",
                    DocumentationFlag::EstimateProvided => "metadata.documentation.estimateProvided",
                    DocumentationFlag::PoliceReport => "metadata.documentation.policeReport",
                    DocumentationFlag::ContractorReport => "metadata.documentation.contractorReport",
                },
            },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ClaimField::PolicyNumber => "Policy number",
            ClaimField::PolicyTypeId => "Policy type",
            ClaimField::CustomerId => "Customer",
            ClaimField::EmployeeId => "Employee",
            ClaimField::Metadata(field) => match field {
                MetadataField::Status => "Status",
                MetadataField::Priority => "Priority",
                MetadataField::ClaimAmount => "Claim amount",
                MetadataField::IncidentDate => "Incident date",
                MetadataField::Details => "Details",
                MetadataField::Documentation(flag) => match flag {
                    DocumentationFlag::PhotoEvidence => "Photo evidence",
                    DocumentationFlag::EstimateProvided => "Estimate provided",
                    DocumentationFlag::PoliceReport => "Police report",
                    DocumentationFlag::ContractorReport => "Contractor report",
                },
            },
        }
    }

    pub fn is_flag(self) -> bool {
        matches!(self, ClaimField::Metadata(MetadataField::Documentation(_)))
    }
}

impl FromStr for ClaimField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClaimField::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataForm {
    pub status: String,
    pub priority: String,
    pub claim_amount: String,
    pub incident_date: String,
    pub details: String,
    pub documentation: Documentation,
}

/// Text inputs of the claim form, as typed.
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimForm {
    pub policy_number: String,
    pub policy_type_id: String,
    pub customer_id: String,
    pub employee_id: String,
    pub metadata: MetadataForm,
}

impl Default for ClaimForm {
    fn default() -> Self {
        Self {
            policy_number: String::new(),
            policy_type_id: String::new(),
            customer_id: String::new(),
            employee_id: String::new(),
            metadata: MetadataForm {
                status: ClaimStatus::Pending.wire_value().to_string(),
                priority: Priority::Medium.label().to_string(),
                ..Default::default()
            },
        }
    }
}

impl ClaimForm {
    /// Prefill from an existing claim for editing.
    pub fn from_claim(claim: &Claim) -> Self {
        Self {
            policy_number: claim.policy_number.clone(),
            policy_type_id: claim.policy_type_id.map(|id| id.to_string()).unwrap_or_default(),
            customer_id: claim.customer_id.to_string(),
            employee_id: claim.employee_id.to_string(),
            metadata: MetadataForm {
                status: claim.status.wire_value().to_string(),
                priority: claim.priority.label().to_string(),
                claim_amount: claim.amount.to_string(),
                incident_date: claim.incident_date.map(format_ymd).unwrap_or_default(),
                details: claim.details.clone(),
                documentation: claim.documentation,
            },
        }
    }

    /// Current text of a field.
    pub fn value(&self, field: ClaimField) -> String {
        match field {
            ClaimField::PolicyNumber => self.policy_number.clone(),
            ClaimField::PolicyTypeId => self.policy_type_id.clone(),
            ClaimField::CustomerId => self.customer_id.clone(),
            ClaimField::EmployeeId => self.employee_id.clone(),
            ClaimField::Metadata(field) => match field {
                MetadataField::Status => self.metadata.status.clone(),
                MetadataField::Priority => self.metadata.priority.clone(),
                MetadataField::ClaimAmount => self.metadata.claim_amount.clone(),
                MetadataField::IncidentDate => self.metadata.incident_date.clone(),
                MetadataField::Details => self.metadata.details.clone(),
                MetadataField::Documentation(flag) => {
                    let docs = &self.metadata.documentation;
                    let set = match flag {
                        DocumentationFlag::PhotoEvidence => docs.photo_evidence,
                        DocumentationFlag::EstimateProvided => docs.estimate_provided,
                        DocumentationFlag::PoliceReport => docs.police_report,
                        DocumentationFlag::ContractorReport => docs.contractor_report,
                    };
                    set.to_string()
                }
            },
        }
    }

    /// Return a copy with one field replaced. Nested records are rebuilt so
    /// their other fields are carried over.
    pub fn update(self, field: ClaimField, value: &str) -> Result<Self, FormError> {
        let value_owned = value.to_string();
        Ok(match field {
            ClaimField::PolicyNumber => Self {
                policy_number: value_owned,
                ..self
            },
            ClaimField::PolicyTypeId => Self {
                policy_type_id: value_owned,
                ..self
            },
            ClaimField::CustomerId => Self {
                customer_id: value_owned,
                ..self
            },
            ClaimField::EmployeeId => Self {
                employee_id: value_owned,
                ..self
            },
            ClaimField::Metadata(meta_field) => {
                let metadata = self.metadata.update(meta_field, field.name(), value)?;
                Self { metadata, ..self }
            }
        })
    }

    /// `update` keyed by dotted name, e.g. `"metadata.claimAmount"`.
    pub fn update_path(self, path: &str, value: &str) -> Result<Self, FormError> {
        let field: ClaimField = path.parse()?;
        self.update(field, value)
    }

    /// Validate and convert to the request body.
    pub fn to_payload(&self) -> Result<ClaimPayload, FormError> {
        let mut errors = FieldErrors::new();

        require(&mut errors, "policy_type_id", &self.policy_type_id, "Policy type is required");
        require(&mut errors, "customer_id", &self.customer_id, "Customer is required");
        require(&mut errors, "employee_id", &self.employee_id, "Employee is required");
        require(&mut errors, "metadata.claimAmount", &self.metadata.claim_amount, "Claim amount is required");

        let policy_type_id = parse_id(&mut errors, "policy_type_id", &self.policy_type_id);
        let customer_id = parse_id(&mut errors, "customer_id", &self.customer_id);
        let employee_id = parse_id(&mut errors, "employee_id", &self.employee_id);

        let status = ClaimStatus::canonicalize(&self.metadata.status);
        if status.is_none() {
            errors.add("metadata.status", "Choose a valid status");
        }
        let priority = Priority::canonicalize(&self.metadata.priority);
        if priority.is_none() {
            errors.add("metadata.priority", "Choose Low, Medium or High");
        }

        let claim_amount = match self.metadata.claim_amount.trim().parse::<f64>() {
            Ok(amount) if amount.is_finite() && amount >= 0.0 => Some(amount),
            _ => {
                errors.add("metadata.claimAmount", "Amount must be a non-negative number");
                None
            }
        };

        let incident_date = if self.metadata.incident_date.trim().is_empty() {
            None
        } else {
            match parse_date(&self.metadata.incident_date) {
                Some(date) => Some(format_ymd(date)),
                None => {
                    errors.add("metadata.incidentDate", "Use YYYY-MM-DD");
                    None
                }
            }
        };

        errors.into_result()?;

        // All of these were checked above.
        match (policy_type_id, customer_id, employee_id, status, priority, claim_amount) {
            (
                Some(policy_type_id),
                Some(customer_id),
                Some(employee_id),
                Some(status),
                Some(priority),
                Some(claim_amount),
            ) => Ok(ClaimPayload {
                policy_number: self.policy_number.trim().to_string(),
                policy_type_id,
                customer_id,
                employee_id,
                metadata: ClaimMetadataPayload {
                    status,
                    priority,
                    claim_amount,
                    incident_date,
                    details: self.metadata.details.trim().to_string(),
                    documentation: self.metadata.documentation,
                },
            }),
            _ => Err(FormError::Invalid(FieldErrors::new())),
        }
    }
}

impl MetadataForm {
    fn update(self, field: MetadataField, name: &str, value: &str) -> Result<Self, FormError> {
        let value_owned = value.to_string();
        Ok(match field {
            MetadataField::Status => Self {
                status: value_owned,
                ..self
            },
            MetadataField::Priority => Self {
                priority: value_owned,
                ..self
            },
            MetadataField::ClaimAmount => Self {
                claim_amount: value_owned,
                ..self
            },
            MetadataField::IncidentDate => Self {
                incident_date: value_owned,
                ..self
            },
            MetadataField::Details => Self {
                details: value_owned,
                ..self
            },
            MetadataField::Documentation(flag) => {
                let set = parse_flag(name, value)?;
                let documentation = match flag {
                    DocumentationFlag::PhotoEvidence => Documentation {
                        photo_evidence: set,
                        ..self.documentation
                    },
                    DocumentationFlag::EstimateProvided => Documentation {
                        estimate_provided: set,
                        ..self.documentation
                    },
                    DocumentationFlag::PoliceReport => Documentation {
                        police_report: set,
                        ..self.documentation
                    },
                    DocumentationFlag::ContractorReport => Documentation {
                        contractor_report: set,
                        ..self.documentation
                    },
                };
                Self { documentation, ..self }
            }
        })
    }
}

fn parse_id(errors: &mut FieldErrors, field: &str, value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<i64>() {
        Ok(id) if id > 0 => Some(id),
        _ => {
            errors.add(field, "Must be a positive whole number");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_update_keeps_sibling_fields() {
        let form = ClaimForm::default()
            .update_path("metadata.details", "Flooded basement")
            .unwrap()
            .update_path("metadata.documentation.policeReport", "true")
            .unwrap()
            .update_path("metadata.status", "approved")
            .unwrap();

        assert_eq!(form.metadata.details, "Flooded basement");
        assert_eq!(form.metadata.status, "approved");
        assert!(form.metadata.documentation.police_report);
        assert_eq!(form.metadata.priority, "Medium");
    }

    #[test]
    fn unknown_path_is_rejected() {
        let err = ClaimForm::default().update_path("metadata.color", "red").unwrap_err();
        assert_eq!(err, FormError::UnknownField("metadata.color".to_string()));
    }

    #[test]
    fn missing_required_fields_are_reported_together() {
        let err = ClaimForm::default().to_payload().unwrap_err();
        let fields = err.field_errors();
        assert!(fields.get("customer_id").is_some());
        assert!(fields.get("employee_id").is_some());
        assert!(fields.get("policy_type_id").is_some());
        assert!(fields.get("metadata.claimAmount").is_some());
    }
}
