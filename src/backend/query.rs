//! Which claims endpoint a fetch hits, and with what parameters.
//!
//! Kept as plain values so the decision can be inspected without issuing a
//! request.

use crate::models::ClaimStatus;
use crate::utils::datetime::format_ymd;
use chrono::NaiveDate;

/// Server-side search criteria for `GET /claims/search_claims`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub policy_number: String,
    pub customer_name: String,
    pub employee_name: String,
    pub status: Option<ClaimStatus>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl SearchCriteria {
    /// True when no criterion is set; the plain list endpoint is used then.
    pub fn is_empty(&self) -> bool {
        self.policy_number.trim().is_empty()
            && self.customer_name.trim().is_empty()
            && self.employee_name.trim().is_empty()
            && self.status.is_none()
            && self.date_from.is_none()
            && self.date_to.is_none()
    }

    /// Short description for the claims page header.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if !self.policy_number.trim().is_empty() {
            parts.push(format!("policy={}", self.policy_number.trim()));
        }
        if !self.customer_name.trim().is_empty() {
            parts.push(format!("customer={}", self.customer_name.trim()));
        }
        if !self.employee_name.trim().is_empty() {
            parts.push(format!("employee={}", self.employee_name.trim()));
        }
        if let Some(status) = self.status {
            parts.push(format!("status={}", status.query_value()));
        }
        if let Some(from) = self.date_from {
            parts.push(format!("from={}", format_ymd(from)));
        }
        if let Some(to) = self.date_to {
            parts.push(format!("to={}", format_ymd(to)));
        }
        parts.join(" ")
    }
}

/// A claims page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimsQuery {
    List {
        page: u32,
        limit: u32,
        search: Option<String>,
    },
    Search {
        criteria: SearchCriteria,
        page: u32,
        limit: u32,
    },
}

impl Default for ClaimsQuery {
    fn default() -> Self {
        ClaimsQuery::List {
            page: 1,
            limit: crate::constants::DEFAULT_PAGE_SIZE,
            search: None,
        }
    }
}

impl ClaimsQuery {
    pub fn page(&self) -> u32 {
        match self {
            ClaimsQuery::List { page, .. } | ClaimsQuery::Search { page, .. } => *page,
        }
    }

    pub fn limit(&self) -> u32 {
        match self {
            ClaimsQuery::List { limit, .. } | ClaimsQuery::Search { limit, .. } => *limit,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            ClaimsQuery::List { .. } => "/claims",
            ClaimsQuery::Search { .. } => "/claims/search_claims",
        }
    }

    /// Query-string pairs in a stable order; empty values are left out.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        match self {
            ClaimsQuery::List { page, limit, search } => {
                params.push(("page", page.to_string()));
                params.push(("limit", limit.to_string()));
                if let Some(search) = search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
                    params.push(("search", search.to_string()));
                }
            }
            ClaimsQuery::Search { criteria, page, limit } => {
                let text_params = [
                    ("policyNumber", &criteria.policy_number),
                    ("customerName", &criteria.customer_name),
                    ("employeeName", &criteria.employee_name),
                ];
                for (name, value) in text_params {
                    let value = value.trim();
                    if !value.is_empty() {
                        params.push((name, value.to_string()));
                    }
                }
                if let Some(status) = criteria.status {
                    params.push(("status", status.query_value().to_string()));
                }
                if let Some(from) = criteria.date_from {
                    params.push(("dateFrom", format_ymd(from)));
                }
                if let Some(to) = criteria.date_to {
                    params.push(("dateTo", format_ymd(to)));
                }
                params.push(("page", page.to_string()));
                params.push(("limit", limit.to_string()));
            }
        }
        params
    }
}
