//! Claim view-model and its enumerated fields.
//!
//! Backend payloads carry status and priority as free strings with
//! inconsistent casing. They are canonicalized here, once, so the rest of the
//! application works with exhaustive enums.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Raised when a status or priority string matches no known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized {kind} value '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Lifecycle status of a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClaimStatus {
    Pending,
    Approved,
    Rejected,
    InReview,
    InProgress,
    Completed,
}

/// Canonical keys: lowercase with spaces, dashes and underscores removed.
const STATUS_TABLE: &[(&str, ClaimStatus)] = &[
    ("pending", ClaimStatus::Pending),
    ("approved", ClaimStatus::Approved),
    ("rejected", ClaimStatus::Rejected),
    ("inreview", ClaimStatus::InReview),
    ("inprogress", ClaimStatus::InProgress),
    ("completed", ClaimStatus::Completed),
];

/// Reduce a raw string to its table key: `" \"In-Review\" "` -> `"inreview"`.
pub(crate) fn canonical_key(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

impl ClaimStatus {
    pub const ALL: [ClaimStatus; 6] = [
        ClaimStatus::Pending,
        ClaimStatus::Approved,
        ClaimStatus::Rejected,
        ClaimStatus::InReview,
        ClaimStatus::InProgress,
        ClaimStatus::Completed,
    ];

    /// Map any of the casings seen in the wild onto a variant.
    pub fn canonicalize(raw: &str) -> Option<Self> {
        let key = canonical_key(raw);
        STATUS_TABLE
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, status)| *status)
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            ClaimStatus::Pending => "Pending",
            ClaimStatus::Approved => "Approved",
            ClaimStatus::Rejected => "Rejected",
            ClaimStatus::InReview => "In Review",
            ClaimStatus::InProgress => "In Progress",
            ClaimStatus::Completed => "Completed",
        }
    }

    /// Value written into request bodies.
    pub fn wire_value(self) -> &'static str {
        match self {
            ClaimStatus::Pending => "pending",
            ClaimStatus::Approved => "approved",
            ClaimStatus::Rejected => "rejected",
            ClaimStatus::InReview => "inReview",
            ClaimStatus::InProgress => "inProgress",
            ClaimStatus::Completed => "completed",
        }
    }

    /// Value sent as the `status` parameter of the search endpoint.
    pub fn query_value(self) -> &'static str {
        match self {
            ClaimStatus::Pending => "PENDING",
            ClaimStatus::Approved => "APPROVED",
            ClaimStatus::Rejected => "REJECTED",
            ClaimStatus::InReview => "IN_REVIEW",
            ClaimStatus::InProgress => "IN_PROGRESS",
            ClaimStatus::Completed => "COMPLETED",
        }
    }

    /// Whether the claim no longer needs handling.
    pub fn is_closed(self) -> bool {
        matches!(self, ClaimStatus::Rejected | ClaimStatus::Completed)
    }
}

impl FromStr for ClaimStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::canonicalize(s).ok_or_else(|| ParseEnumError {
            kind: "status",
            value: s.to_string(),
        })
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for ClaimStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_value())
    }
}

impl<'de> Deserialize<'de> for ClaimStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Handling priority of a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn canonicalize(raw: &str) -> Option<Self> {
        match canonical_key(raw).as_str() {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::canonicalize(s).ok_or_else(|| ParseEnumError {
            kind: "priority",
            value: s.to_string(),
        })
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Priority {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Which supporting documents have been provided for a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Documentation {
    pub photo_evidence: bool,
    pub estimate_provided: bool,
    pub police_report: bool,
    pub contractor_report: bool,
}

impl Documentation {
    /// Number of flags that are set, out of four.
    pub fn provided_count(&self) -> usize {
        [
            self.photo_evidence,
            self.estimate_provided,
            self.police_report,
            self.contractor_report,
        ]
        .iter()
        .filter(|flag| **flag)
        .count()
    }

    pub fn is_complete(&self) -> bool {
        self.provided_count() == 4
    }
}

/// A claim as displayed by the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct Claim {
    pub id: i64,
    pub policy_number: String,
    pub policy_type_id: Option<i64>,
    pub customer_id: i64,
    pub customer_name: Option<String>,
    pub employee_id: i64,
    pub employee_name: Option<String>,
    pub status: ClaimStatus,
    pub priority: Priority,
    pub amount: f64,
    pub incident_date: Option<NaiveDate>,
    pub details: String,
    pub documentation: Documentation,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Claim {
    /// Customer name, falling back to the id when the backend did not join it.
    pub fn customer_display(&self) -> String {
        self.customer_name
            .clone()
            .unwrap_or_else(|| format!("Customer #{}", self.customer_id))
    }

    pub fn employee_display(&self) -> String {
        self.employee_name
            .clone()
            .unwrap_or_else(|| format!("Employee #{}", self.employee_id))
    }
}
