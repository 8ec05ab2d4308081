use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::{money, page_block, render_load_state};
use crate::config::DisplayConfig;
use crate::constants::ERROR_CLAIM_NOT_FOUND;
use crate::models::Claim;
use crate::routes::Route;
use crate::ui::components::badge::{flag_checkbox, priority_badge, status_badge};
use crate::ui::core::{Action, Component, DialogType, LoadState};
use crate::utils::format::{format_date, format_datetime};

pub struct ClaimDetailPage {
    pub id: i64,
    pub state: LoadState<Claim>,
    display: DisplayConfig,
}

impl ClaimDetailPage {
    pub fn new(id: i64, display: DisplayConfig) -> Self {
        Self {
            id,
            state: LoadState::Loading,
            display,
        }
    }

    pub fn on_loaded(&mut self, claim: Claim) {
        self.state = LoadState::Loaded(claim);
    }

    fn field(label: &str, value: impl Into<String>) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("{label:<16}"), Style::default().fg(Color::Gray)),
            Span::styled(value.into(), Style::default().fg(Color::White)),
        ])
    }

    fn summary_lines(&self, claim: &Claim) -> Vec<Line<'static>> {
        vec![
            Self::field("Policy number", claim.policy_number.clone()),
            Self::field(
                "Policy type",
                claim.policy_type_id.map(|id| format!("#{id}")).unwrap_or_else(|| "—".to_string()),
            ),
            Self::field("Customer", claim.customer_display()),
            Self::field("Handled by", claim.employee_display()),
            Line::from(vec![
                Span::styled(format!("{:<16}", "Status"), Style::default().fg(Color::Gray)),
                status_badge(claim.status),
            ]),
            Line::from(vec![
                Span::styled(format!("{:<16}", "Priority"), Style::default().fg(Color::Gray)),
                priority_badge(claim.priority),
            ]),
            Line::from(vec![
                Span::styled(format!("{:<16}", "Amount"), Style::default().fg(Color::Gray)),
                Span::styled(
                    money(&self.display, claim.amount),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
            ]),
            Self::field("Incident date", format_date(claim.incident_date, &self.display.date_format)),
            Self::field("Filed", format_datetime(claim.created_at, &self.display.datetime_format)),
            Self::field("Last updated", format_datetime(claim.updated_at, &self.display.datetime_format)),
        ]
    }

    fn documentation_lines(claim: &Claim) -> Vec<Line<'static>> {
        let docs = &claim.documentation;
        let mut lines: Vec<Line> = [
            (docs.photo_evidence, "Photo evidence"),
            (docs.estimate_provided, "Estimate provided"),
            (docs.police_report, "Police report"),
            (docs.contractor_report, "Contractor report"),
        ]
        .into_iter()
        .map(|(set, label)| Line::from(vec![flag_checkbox(set), Span::raw(format!(" {label}"))]))
        .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("{} of 4 provided", docs.provided_count()),
            Style::default().fg(Color::Gray),
        )));
        lines
    }
}

impl Component for ClaimDetailPage {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc | KeyCode::Backspace => Action::Navigate(Route::Claims),
            KeyCode::Char('e') if self.state.loaded().is_some() => Action::Navigate(Route::EditClaim(self.id)),
            KeyCode::Char('d') => match self.state.loaded() {
                Some(claim) => Action::ShowDialog(DialogType::DeleteConfirmation {
                    claim_id: claim.id,
                    policy_number: claim.policy_number.clone(),
                }),
                None => Action::None,
            },
            _ => Action::None,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let title = format!("Claim #{}", self.id);
        let Some(claim) = render_load_state(f, rect, &title, &self.state, ERROR_CLAIM_NOT_FOUND) else {
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(12), Constraint::Min(0)])
            .split(rect);
        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[0]);

        f.render_widget(Paragraph::new(self.summary_lines(claim)).block(page_block(&title)), top[0]);
        f.render_widget(
            Paragraph::new(Self::documentation_lines(claim)).block(page_block("Documentation")),
            top[1],
        );

        let details = if claim.details.trim().is_empty() {
            "No details recorded.".to_string()
        } else {
            claim.details.clone()
        };
        f.render_widget(
            Paragraph::new(details)
                .block(page_block("Details"))
                .wrap(Wrap { trim: false }),
            chunks[1],
        );
    }
}
