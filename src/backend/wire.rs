//! JSON shapes exchanged with the REST backend and their decoding into
//! view-models.
//!
//! The backend is loosely typed: amounts can be numbers or numeric strings,
//! statuses come in several casings, dates in several encodings. All of that
//! is resolved here, once. A payload that cannot be decoded is rejected with
//! a [`DecodeError`] instead of leaking raw strings into the UI.

use crate::models::{Claim, ClaimStatus, Customer, Documentation, Employee, PolicyType, Priority};
use crate::utils::datetime::{parse_date, parse_timestamp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    #[error("claim {id}: {source}")]
    Enum {
        id: i64,
        #[source]
        source: crate::models::ParseEnumError,
    },
    #[error("{entity} {id}: invalid {field} '{value}'")]
    Field {
        entity: &'static str,
        id: i64,
        field: &'static str,
        value: String,
    },
}

/// Number that may be encoded as a JSON string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    Number(f64),
    Text(String),
}

impl LooseNumber {
    /// The value as a finite number; "NaN" and "inf" strings are rejected.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            LooseNumber::Number(n) => Some(*n),
            LooseNumber::Text(s) => s.trim().parse::<f64>().ok(),
        };
        value.filter(|n| n.is_finite())
    }
}

/// Pagination block of a paged response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pagination {
    pub total: u64,
    pub page: u32,
    pub pages: u32,
}

/// `{data, pagination}` envelope returned by the claims endpoints.
#[derive(Debug, Deserialize)]
pub struct PagedEnvelope<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// `{data}` envelope returned by `/policy-types`.
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// `{customers}` envelope returned by `/customers`.
#[derive(Debug, Deserialize)]
pub struct CustomersEnvelope {
    pub customers: Vec<Customer>,
}

/// Token issued by login and register.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Error body; backends use either key.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiClaimMetadata {
    pub status: String,
    pub priority: String,
    pub claim_amount: Option<LooseNumber>,
    pub incident_date: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub documentation: Option<Documentation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiClaim {
    pub id: i64,
    #[serde(default)]
    pub policy_number: Option<String>,
    #[serde(default)]
    pub policy_type_id: Option<i64>,
    pub customer_id: i64,
    pub employee_id: i64,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub employee_name: Option<String>,
    pub metadata: ApiClaimMetadata,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl TryFrom<ApiClaim> for Claim {
    type Error = DecodeError;

    fn try_from(api: ApiClaim) -> Result<Self, Self::Error> {
        let id = api.id;
        let status: ClaimStatus = api
            .metadata
            .status
            .parse()
            .map_err(|source| DecodeError::Enum { id, source })?;
        let priority: Priority = api
            .metadata
            .priority
            .parse()
            .map_err(|source| DecodeError::Enum { id, source })?;

        let amount = match &api.metadata.claim_amount {
            None => 0.0,
            Some(raw) => raw.as_f64().ok_or_else(|| DecodeError::Field {
                entity: "claim",
                id,
                field: "claimAmount",
                value: format!("{:?}", raw),
            })?,
        };

        let incident_date = match api.metadata.incident_date.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(parse_date(raw).ok_or_else(|| DecodeError::Field {
                entity: "claim",
                id,
                field: "incidentDate",
                value: raw.to_string(),
            })?),
        };

        Ok(Claim {
            id,
            policy_number: api.policy_number.unwrap_or_default(),
            policy_type_id: api.policy_type_id,
            customer_id: api.customer_id,
            customer_name: api.customer_name.filter(|name| !name.trim().is_empty()),
            employee_id: api.employee_id,
            employee_name: api.employee_name.filter(|name| !name.trim().is_empty()),
            status,
            priority,
            amount,
            incident_date,
            details: api.metadata.details.unwrap_or_default(),
            documentation: api.metadata.documentation.unwrap_or_default(),
            created_at: api.created_at.as_deref().and_then(parse_timestamp),
            updated_at: api.updated_at.as_deref().and_then(parse_timestamp),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiEmployee {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub years_of_experience: Option<LooseNumber>,
    #[serde(default)]
    pub hire_date: Option<String>,
}

impl TryFrom<ApiEmployee> for Employee {
    type Error = DecodeError;

    fn try_from(api: ApiEmployee) -> Result<Self, Self::Error> {
        let years = match &api.years_of_experience {
            None => 0,
            Some(raw) => match raw.as_f64() {
                Some(n) if n >= 0.0 => n as u32,
                _ => {
                    return Err(DecodeError::Field {
                        entity: "employee",
                        id: api.id,
                        field: "years_of_experience",
                        value: format!("{:?}", raw),
                    })
                }
            },
        };

        Ok(Employee {
            id: api.id,
            name: api.name,
            position: api.position,
            department: api.department,
            years_of_experience: years,
            hire_date: api.hire_date.as_deref().and_then(parse_date),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiPolicyType {
    pub id: i64,
    pub name: String,
    pub base_premium: Option<LooseNumber>,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<ApiPolicyType> for PolicyType {
    fn from(api: ApiPolicyType) -> Self {
        PolicyType {
            id: api.id,
            name: api.name,
            base_premium: api.base_premium.as_ref().and_then(LooseNumber::as_f64).unwrap_or(0.0),
            description: api.description.unwrap_or_default(),
        }
    }
}

/// Decode every item, failing the whole batch on the first bad one.
pub fn decode_all<A, T>(items: Vec<A>) -> Result<Vec<T>, DecodeError>
where
    T: TryFrom<A, Error = DecodeError>,
{
    items.into_iter().map(T::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn claim_json(status: &str, amount: serde_json::Value) -> serde_json::Value {
        json!({
            "id": 12,
            "policy_number": "POL-778",
            "customer_id": 3,
            "employee_id": 7,
            "customer_name": "Ada Lovelace",
            "metadata": {
                "status": status,
                "priority": "high",
                "claimAmount": amount,
                "incidentDate": "2024-02-10T00:00:00.000Z",
                "details": "Hail damage",
                "documentation": { "photoEvidence": true, "policeReport": false }
            },
            "created_at": "2024-02-11T09:30:00Z"
        })
    }

    #[test]
    fn decodes_claim_with_string_amount() {
        let api: ApiClaim = serde_json::from_value(claim_json("\"Completed\"", json!("1500.25"))).unwrap();
        let claim = Claim::try_from(api).unwrap();
        assert_eq!(claim.status, ClaimStatus::Completed);
        assert_eq!(claim.priority, Priority::High);
        assert_eq!(claim.amount, 1500.25);
        assert_eq!(claim.incident_date, chrono::NaiveDate::from_ymd_opt(2024, 2, 10));
        assert!(claim.documentation.photo_evidence);
        assert_eq!(claim.employee_name, None);
        assert!(claim.created_at.is_some());
    }

    #[test]
    fn rejects_unknown_status() {
        let api: ApiClaim = serde_json::from_value(claim_json("archived", json!(10))).unwrap();
        let err = Claim::try_from(api).unwrap_err();
        assert!(err.to_string().contains("archived"));
    }

    #[test]
    fn rejects_non_finite_amount() {
        for raw in ["NaN", "inf", "-infinity"] {
            let api: ApiClaim = serde_json::from_value(claim_json("pending", json!(raw))).unwrap();
            assert!(
                matches!(Claim::try_from(api), Err(DecodeError::Field { field: "claimAmount", .. })),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_non_numeric_amount() {
        let api: ApiClaim = serde_json::from_value(claim_json("pending", json!("lots"))).unwrap();
        assert!(matches!(
            Claim::try_from(api),
            Err(DecodeError::Field { field: "claimAmount", .. })
        ));
    }

    #[test]
    fn decode_all_is_all_or_nothing() {
        let employees: Vec<ApiEmployee> = serde_json::from_value(json!([
            { "id": 1, "name": "Grace", "years_of_experience": "4" },
            { "id": 2, "name": "Linus", "years_of_experience": -1 }
        ]))
        .unwrap();
        let result: Result<Vec<Employee>, _> = decode_all(employees);
        assert!(result.is_err());
    }
}
