//! Single-key sorting of the loaded claims page.

use crate::models::Claim;
use std::cmp::Ordering;

/// Column a claims table can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Id,
    PolicyNumber,
    Customer,
    Employee,
    Status,
    Priority,
    Amount,
    IncidentDate,
    CreatedAt,
}

impl SortKey {
    /// Column order in the claims table; number keys 1-9 map onto it.
    pub const COLUMNS: [SortKey; 9] = [
        SortKey::Id,
        SortKey::PolicyNumber,
        SortKey::Customer,
        SortKey::Employee,
        SortKey::Status,
        SortKey::Priority,
        SortKey::Amount,
        SortKey::IncidentDate,
        SortKey::CreatedAt,
    ];

    pub fn from_column(index: usize) -> Option<Self> {
        Self::COLUMNS.get(index).copied()
    }

    pub fn title(self) -> &'static str {
        match self {
            SortKey::Id => "ID",
            SortKey::PolicyNumber => "Policy",
            SortKey::Customer => "Customer",
            SortKey::Employee => "Employee",
            SortKey::Status => "Status",
            SortKey::Priority => "Priority",
            SortKey::Amount => "Amount",
            SortKey::IncidentDate => "Incident",
            SortKey::CreatedAt => "Created",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// Current sort selection; `None` keeps server order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub key: Option<SortKey>,
    pub direction: SortDirection,
}

impl SortState {
    /// Same key flips direction; a new key starts ascending.
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == Some(key) {
            self.direction = self.direction.flipped();
        } else {
            self.key = Some(key);
            self.direction = SortDirection::Ascending;
        }
    }

    pub fn compare(&self, a: &Claim, b: &Claim) -> Ordering {
        let Some(key) = self.key else {
            return Ordering::Equal;
        };
        let ordering = compare_by(key, a, b);
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    /// Stable sort: claims with equal keys keep their relative order.
    pub fn apply(&self, claims: &mut [&Claim]) {
        if self.key.is_some() {
            claims.sort_by(|a, b| self.compare(a, b));
        }
    }
}

/// Three-way comparison on one key. Missing values sort first.
pub fn compare_by(key: SortKey, a: &Claim, b: &Claim) -> Ordering {
    match key {
        SortKey::Id => a.id.cmp(&b.id),
        SortKey::PolicyNumber => a.policy_number.cmp(&b.policy_number),
        SortKey::Customer => a.customer_display().cmp(&b.customer_display()),
        SortKey::Employee => a.employee_display().cmp(&b.employee_display()),
        SortKey::Status => a.status.label().cmp(b.status.label()),
        SortKey::Priority => a.priority.cmp(&b.priority),
        SortKey::Amount => a.amount.total_cmp(&b.amount),
        SortKey::IncidentDate => a.incident_date.cmp(&b.incident_date),
        SortKey::CreatedAt => a
            .created_at
            .map(|dt| dt.timestamp_millis())
            .cmp(&b.created_at.map(|dt| dt.timestamp_millis())),
    }
}
