use crate::models::{ClaimStatus, DocumentStatus, Priority};
use ratatui::style::Color;

/// Terminal color for a claim status
#[must_use]
pub fn status_color(status: ClaimStatus) -> Color {
    match status {
        ClaimStatus::Pending => Color::Rgb(199, 113, 0),
        ClaimStatus::Approved => Color::Rgb(54, 147, 7),
        ClaimStatus::Rejected => Color::Rgb(220, 76, 62),
        ClaimStatus::InReview => Color::Rgb(49, 157, 192),
        ClaimStatus::InProgress => Color::Rgb(65, 128, 255),
        ClaimStatus::Completed => Color::Rgb(66, 163, 147),
    }
}

/// Terminal color for a claim priority
#[must_use]
pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Rgb(220, 76, 62),
        Priority::Medium => Color::Rgb(178, 145, 4),
        Priority::Low => Color::Rgb(105, 136, 164),
    }
}

#[must_use]
pub fn document_status_color(status: DocumentStatus) -> Color {
    match status {
        DocumentStatus::Submitted => Color::Gray,
        DocumentStatus::UnderReview => Color::Rgb(49, 157, 192),
        DocumentStatus::Verified => Color::Rgb(54, 147, 7),
        DocumentStatus::Rejected => Color::Rgb(220, 76, 62),
    }
}
