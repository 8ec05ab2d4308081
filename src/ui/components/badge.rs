use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

use crate::models::{ClaimStatus, DocumentStatus, Documentation, Priority};
use crate::utils::color::{document_status_color, priority_color, status_color};

/// Status pill, e.g. ` In Review ` on a blue background
#[must_use]
pub fn status_badge(status: ClaimStatus) -> Span<'static> {
    Span::styled(
        format!(" {} ", status.label()),
        Style::default()
            .fg(Color::Black)
            .bg(status_color(status))
            .add_modifier(Modifier::BOLD),
    )
}

/// Priority flag with its label
#[must_use]
pub fn priority_badge(priority: Priority) -> Span<'static> {
    let symbol = match priority {
        Priority::High => "⚑",
        Priority::Medium => "⚑",
        Priority::Low => "⚐",
    };
    Span::styled(
        format!("{symbol} {}", priority.label()),
        Style::default().fg(priority_color(priority)).add_modifier(Modifier::BOLD),
    )
}

#[must_use]
pub fn document_status_badge(status: DocumentStatus) -> Span<'static> {
    Span::styled(
        format!("[{}]", status.label()),
        Style::default().fg(document_status_color(status)),
    )
}

/// Four-slot documentation indicator: `P E R C`, set flags highlighted
#[must_use]
pub fn documentation_badges(docs: &Documentation) -> Vec<Span<'static>> {
    [
        ("P", docs.photo_evidence),
        ("E", docs.estimate_provided),
        ("R", docs.police_report),
        ("C", docs.contractor_report),
    ]
    .into_iter()
    .map(|(letter, set)| {
        let style = if set {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Span::styled(format!("{letter} "), style)
    })
    .collect()
}

/// Checkbox for a single documentation flag
#[must_use]
pub fn flag_checkbox(set: bool) -> Span<'static> {
    if set {
        Span::styled("[x]", Style::default().fg(Color::Green))
    } else {
        Span::styled("[ ]", Style::default().fg(Color::Gray))
    }
}
