//! Sample claim documents shown on the dashboard.
//!
//! This dataset is static and is not connected to the backend; its claim ids
//! are not reconciled with real claims.

use once_cell::sync::Lazy;

/// Review state of a submitted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentStatus {
    Submitted,
    UnderReview,
    Verified,
    Rejected,
}

impl DocumentStatus {
    pub fn label(self) -> &'static str {
        match self {
            DocumentStatus::Submitted => "Submitted",
            DocumentStatus::UnderReview => "Under Review",
            DocumentStatus::Verified => "Verified",
            DocumentStatus::Rejected => "Rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentType {
    pub report_number: String,
    pub claim_id: String,
    pub title: String,
    pub kind: String,
    pub thumbnail: String,
    pub status: DocumentStatus,
}

fn document(
    report_number: &str,
    claim_id: &str,
    title: &str,
    kind: &str,
    thumbnail: &str,
    status: DocumentStatus,
) -> DocumentType {
    DocumentType {
        report_number: report_number.to_string(),
        claim_id: claim_id.to_string(),
        title: title.to_string(),
        kind: kind.to_string(),
        thumbnail: thumbnail.to_string(),
        status,
    }
}

pub static SAMPLE_DOCUMENTS: Lazy<Vec<DocumentType>> = Lazy::new(|| {
    vec![
        document(
            "RPT-2024-001",
            "CLM-1001",
            "Rear bumper damage photos",
            "Photo evidence",
            "bumper.jpg",
            DocumentStatus::Verified,
        ),
        document(
            "RPT-2024-002",
            "CLM-1002",
            "Kitchen water damage estimate",
            "Repair estimate",
            "kitchen.pdf",
            DocumentStatus::UnderReview,
        ),
        document(
            "RPT-2024-003",
            "CLM-1003",
            "Burglary incident report",
            "Police report",
            "police.pdf",
            DocumentStatus::Submitted,
        ),
        document(
            "RPT-2024-004",
            "CLM-1004",
            "Roof repair assessment",
            "Contractor report",
            "roof.pdf",
            DocumentStatus::Verified,
        ),
        document(
            "RPT-2024-005",
            "CLM-1005",
            "Windshield crack photos",
            "Photo evidence",
            "windshield.jpg",
            DocumentStatus::Rejected,
        ),
    ]
});
