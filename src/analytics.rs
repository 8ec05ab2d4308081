//! Dashboard figures and chart series.
//!
//! [`DashboardStats`] is computed from the claims the dashboard loaded; the
//! monthly and per-policy-type series are fixed sample data for the
//! analytics page.

use once_cell::sync::Lazy;

use crate::models::{Claim, ClaimStatus, Priority};

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub total_claims: usize,
    pub total_amount: f64,
    pub average_amount: f64,
    /// Count per status, in `ClaimStatus::ALL` order.
    pub by_status: Vec<(ClaimStatus, usize)>,
    /// Count per priority, in `Priority::ALL` order.
    pub by_priority: Vec<(Priority, usize)>,
    /// Claims with all four documentation items provided.
    pub fully_documented: usize,
    /// Claims not yet approved, rejected or completed.
    pub open_claims: usize,
}

impl DashboardStats {
    pub fn from_claims(claims: &[Claim]) -> Self {
        let total_claims = claims.len();
        let total_amount: f64 = claims.iter().map(|c| c.amount).sum();
        let average_amount = if total_claims == 0 {
            0.0
        } else {
            total_amount / total_claims as f64
        };

        let by_status = ClaimStatus::ALL
            .iter()
            .map(|status| (*status, claims.iter().filter(|c| c.status == *status).count()))
            .collect();
        let by_priority = Priority::ALL
            .iter()
            .map(|priority| (*priority, claims.iter().filter(|c| c.priority == *priority).count()))
            .collect();

        Self {
            total_claims,
            total_amount,
            average_amount,
            by_status,
            by_priority,
            fully_documented: claims.iter().filter(|c| c.documentation.is_complete()).count(),
            open_claims: claims.iter().filter(|c| !c.status.is_closed()).count(),
        }
    }

    pub fn count_for(&self, status: ClaimStatus) -> usize {
        self.by_status
            .iter()
            .find(|(s, _)| *s == status)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    /// Share of fully documented claims, 0..=100.
    pub fn documentation_rate(&self) -> u16 {
        if self.total_claims == 0 {
            return 0;
        }
        ((self.fully_documented * 100) / self.total_claims) as u16
    }

    /// Status counts shaped for a ratatui `BarChart`.
    pub fn status_bars(&self) -> Vec<(&'static str, u64)> {
        self.by_status
            .iter()
            .map(|(status, count)| (status.label(), *count as u64))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyVolume {
    pub month: &'static str,
    pub claims: u64,
    pub approved: u64,
    pub payout: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicyTypeShare {
    pub policy_type: &'static str,
    pub claims: u64,
}

pub static MONTHLY_VOLUME: Lazy<Vec<MonthlyVolume>> = Lazy::new(|| {
    [
        ("Jan", 42, 30, 61_250.0),
        ("Feb", 38, 27, 54_800.0),
        ("Mar", 51, 36, 73_400.0),
        ("Apr", 47, 35, 69_150.0),
        ("May", 56, 41, 82_900.0),
        ("Jun", 61, 44, 90_300.0),
        ("Jul", 58, 40, 85_700.0),
        ("Aug", 64, 49, 97_250.0),
        ("Sep", 53, 39, 78_600.0),
        ("Oct", 49, 37, 71_800.0),
        ("Nov", 45, 33, 66_400.0),
        ("Dec", 40, 29, 58_950.0),
    ]
    .into_iter()
    .map(|(month, claims, approved, payout)| MonthlyVolume {
        month,
        claims,
        approved,
        payout,
    })
    .collect()
});

pub static CLAIMS_BY_POLICY_TYPE: Lazy<Vec<PolicyTypeShare>> = Lazy::new(|| {
    [("Auto", 182), ("Home", 146), ("Health", 98), ("Life", 37), ("Travel", 51)]
        .into_iter()
        .map(|(policy_type, claims)| PolicyTypeShare { policy_type, claims })
        .collect()
});

pub fn monthly_bars() -> Vec<(&'static str, u64)> {
    MONTHLY_VOLUME.iter().map(|m| (m.month, m.claims)).collect()
}

pub fn policy_type_bars() -> Vec<(&'static str, u64)> {
    CLAIMS_BY_POLICY_TYPE.iter().map(|p| (p.policy_type, p.claims)).collect()
}

/// Approved share across the sample year, 0..=100.
pub fn sample_approval_rate() -> u16 {
    let (claims, approved) = MONTHLY_VOLUME
        .iter()
        .fold((0u64, 0u64), |(c, a), m| (c + m.claims, a + m.approved));
    if claims == 0 {
        0
    } else {
        ((approved * 100) / claims) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Documentation;

    fn claim(id: i64, status: ClaimStatus, amount: f64, complete_docs: bool) -> Claim {
        let flag = complete_docs;
        Claim {
            id,
            policy_number: String::new(),
            policy_type_id: None,
            customer_id: 1,
            customer_name: None,
            employee_id: 1,
            employee_name: None,
            status,
            priority: Priority::Low,
            amount,
            incident_date: None,
            details: String::new(),
            documentation: Documentation {
                photo_evidence: flag,
                estimate_provided: flag,
                police_report: flag,
                contractor_report: flag,
            },
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn stats_from_claims() {
        let stats = DashboardStats::from_claims(&[
            claim(1, ClaimStatus::Pending, 100.0, true),
            claim(2, ClaimStatus::Completed, 300.0, false),
            claim(3, ClaimStatus::Pending, 200.0, false),
            claim(4, ClaimStatus::Rejected, 0.0, true),
        ]);
        assert_eq!(stats.total_claims, 4);
        assert_eq!(stats.total_amount, 600.0);
        assert_eq!(stats.average_amount, 150.0);
        assert_eq!(stats.count_for(ClaimStatus::Pending), 2);
        assert_eq!(stats.count_for(ClaimStatus::InReview), 0);
        assert_eq!(stats.open_claims, 2);
        assert_eq!(stats.documentation_rate(), 50);
        assert_eq!(stats.status_bars().len(), ClaimStatus::ALL.len());
    }

    #[test]
    fn empty_stats_do_not_divide_by_zero() {
        let stats = DashboardStats::from_claims(&[]);
        assert_eq!(stats.average_amount, 0.0);
        assert_eq!(stats.documentation_rate(), 0);
    }

    #[test]
    fn sample_series_are_consistent() {
        assert_eq!(monthly_bars().len(), MONTHLY_VOLUME.len());
        assert!(!policy_type_bars().is_empty());
        assert!(sample_approval_rate() <= 100);
    }
}
