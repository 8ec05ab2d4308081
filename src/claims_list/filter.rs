//! Client-side claim filter.
//!
//! Each constraint is independent; an empty selection set or an unset date
//! bound means "no constraint", never "match nothing". Active constraints are
//! ANDed.

use crate::models::{Claim, ClaimStatus};
use chrono::NaiveDate;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimFilter {
    pub employee_ids: BTreeSet<i64>,
    pub statuses: BTreeSet<ClaimStatus>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl ClaimFilter {
    pub fn is_empty(&self) -> bool {
        self.employee_ids.is_empty() && self.statuses.is_empty() && self.date_from.is_none() && self.date_to.is_none()
    }

    /// Add the employee to the selection, or remove it if already selected
    pub fn toggle_employee(&mut self, employee_id: i64) {
        if !self.employee_ids.remove(&employee_id) {
            self.employee_ids.insert(employee_id);
        }
    }

    pub fn toggle_status(&mut self, status: ClaimStatus) {
        if !self.statuses.remove(&status) {
            self.statuses.insert(status);
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether a claim passes every active constraint.
    ///
    /// A claim with no incident date fails any active date bound.
    pub fn matches(&self, claim: &Claim) -> bool {
        if !self.employee_ids.is_empty() && !self.employee_ids.contains(&claim.employee_id) {
            return false;
        }
        if !self.statuses.is_empty() && !self.statuses.contains(&claim.status) {
            return false;
        }
        if let Some(from) = self.date_from {
            match claim.incident_date {
                Some(date) if date >= from => {}
                _ => return false,
            }
        }
        if let Some(to) = self.date_to {
            match claim.incident_date {
                Some(date) if date <= to => {}
                _ => return false,
            }
        }
        true
    }

    pub fn apply<'a>(&self, claims: &'a [Claim]) -> Vec<&'a Claim> {
        claims.iter().filter(|claim| self.matches(claim)).collect()
    }

    /// Number of active constraints, for the filter button label
    pub fn active_count(&self) -> usize {
        usize::from(!self.employee_ids.is_empty())
            + usize::from(!self.statuses.is_empty())
            + usize::from(self.date_from.is_some())
            + usize::from(self.date_to.is_some())
    }
}
