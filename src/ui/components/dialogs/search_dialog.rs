//! Claims search dialog.
//!
//! The free-text field goes to the list endpoint's `search` parameter. The
//! remaining fields are server-side criteria; filling any of them switches
//! the list to the search endpoint.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Clear, Paragraph},
    Frame,
};

use super::common::{self, shortcuts};
use crate::backend::SearchCriteria;
use crate::models::ClaimStatus;
use crate::ui::components::text_input::TextInput;
use crate::ui::core::Action;
use crate::ui::layout::LayoutManager;
use crate::utils::datetime::{format_ymd, parse_date};

const TEXT_FIELDS: [&str; 6] = [
    "Search",
    "Policy number",
    "Customer name",
    "Employee name",
    "Incident from (YYYY-MM-DD)",
    "Incident to (YYYY-MM-DD)",
];

/// Index of the status selector among the focusable fields.
const STATUS_FIELD: usize = 4;
const FIELD_COUNT: usize = TEXT_FIELDS.len() + 1;

pub struct SearchDialog {
    inputs: [TextInput; 6],
    status: Option<ClaimStatus>,
    focus: usize,
    error: Option<String>,
}

impl SearchDialog {
    pub fn new(search: &str, criteria: &SearchCriteria) -> Self {
        Self {
            inputs: [
                TextInput::new(search),
                TextInput::new(criteria.policy_number.clone()),
                TextInput::new(criteria.customer_name.clone()),
                TextInput::new(criteria.employee_name.clone()),
                TextInput::new(criteria.date_from.map(format_ymd).unwrap_or_default()),
                TextInput::new(criteria.date_to.map(format_ymd).unwrap_or_default()),
            ],
            status: criteria.status,
            focus: 0,
            error: None,
        }
    }

    /// Map a focus position onto the text input it edits, if any.
    fn input_index(focus: usize) -> Option<usize> {
        match focus {
            STATUS_FIELD => None,
            f if f < STATUS_FIELD => Some(f),
            f => Some(f - 1),
        }
    }

    fn cycle_status(&mut self, forward: bool) {
        let all = ClaimStatus::ALL;
        let position = self.status.and_then(|s| all.iter().position(|c| *c == s));
        self.status = match (position, forward) {
            (None, true) => Some(all[0]),
            (None, false) => Some(all[all.len() - 1]),
            (Some(i), true) if i + 1 < all.len() => Some(all[i + 1]),
            (Some(i), false) if i > 0 => Some(all[i - 1]),
            _ => None,
        };
    }

    /// Search text and criteria as entered, with dates parsed.
    pub fn build(&self) -> Result<(String, SearchCriteria), String> {
        let parse = |input: &TextInput, label: &str| {
            let raw = input.value().trim();
            if raw.is_empty() {
                Ok(None)
            } else {
                parse_date(raw)
                    .map(Some)
                    .ok_or_else(|| format!("{label} must be a date like 2024-03-31"))
            }
        };

        let criteria = SearchCriteria {
            policy_number: self.inputs[1].value().trim().to_string(),
            customer_name: self.inputs[2].value().trim().to_string(),
            employee_name: self.inputs[3].value().trim().to_string(),
            status: self.status,
            date_from: parse(&self.inputs[4], "Incident from")?,
            date_to: parse(&self.inputs[5], "Incident to")?,
        };
        Ok((self.inputs[0].value().trim().to_string(), criteria))
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc => Action::HideDialog,
            KeyCode::Enter => match self.build() {
                Ok((search, criteria)) => Action::ApplySearch { search, criteria },
                Err(message) => {
                    self.error = Some(message);
                    Action::None
                }
            },
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % FIELD_COUNT;
                Action::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + FIELD_COUNT - 1) % FIELD_COUNT;
                Action::None
            }
            _ => {
                match Self::input_index(self.focus) {
                    Some(index) => {
                        self.inputs[index].handle_key(key);
                    }
                    None => match key.code {
                        KeyCode::Right | KeyCode::Char(' ') => self.cycle_status(true),
                        KeyCode::Left => self.cycle_status(false),
                        KeyCode::Backspace | KeyCode::Delete => self.status = None,
                        _ => {}
                    },
                }
                Action::None
            }
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let dialog_area = LayoutManager::centered_rect_lines(60, 2 + FIELD_COUNT as u16 * 3 + 2, area);
        f.render_widget(Clear, dialog_area);

        let block = common::create_dialog_block("🔍 Search claims", Color::Cyan);
        f.render_widget(block, dialog_area);

        let mut constraints = vec![Constraint::Length(3); FIELD_COUNT];
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Length(1));
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints(constraints)
            .split(dialog_area);

        for focus in 0..FIELD_COUNT {
            let focused = focus == self.focus;
            let widget = match Self::input_index(focus) {
                Some(index) => common::create_input_paragraph(&self.inputs[index], TEXT_FIELDS[index], focused, false),
                None => {
                    let value = self
                        .status
                        .map(|s| format!("◀ {} ▶", s.label()))
                        .unwrap_or_else(|| "◀ Any ▶".to_string());
                    common::create_selection_paragraph(value, "Status", focused)
                }
            };
            f.render_widget(widget, chunks[focus]);
        }

        let error = Paragraph::new(self.error.clone().unwrap_or_default()).style(Style::default().fg(Color::Red));
        f.render_widget(error, chunks[FIELD_COUNT]);

        let instructions = common::create_instructions_paragraph(&[
            shortcuts::TAB_NEXT,
            shortcuts::SEPARATOR,
            shortcuts::ENTER_APPLY,
            shortcuts::SEPARATOR,
            shortcuts::ESC_CANCEL,
        ]);
        f.render_widget(instructions, chunks[FIELD_COUNT + 1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(dialog: &mut SearchDialog, code: KeyCode) -> Action {
        dialog.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn status_selection_becomes_criteria() {
        let mut dialog = SearchDialog::new("", &SearchCriteria::default());
        for _ in 0..STATUS_FIELD {
            press(&mut dialog, KeyCode::Tab);
        }
        press(&mut dialog, KeyCode::Right);
        press(&mut dialog, KeyCode::Right);
        match press(&mut dialog, KeyCode::Enter) {
            Action::ApplySearch { search, criteria } => {
                assert!(search.is_empty());
                assert_eq!(criteria.status, Some(ClaimStatus::Approved));
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn text_only_search_keeps_criteria_empty() {
        let mut dialog = SearchDialog::new("", &SearchCriteria::default());
        for c in "POL-9".chars() {
            press(&mut dialog, KeyCode::Char(c));
        }
        match press(&mut dialog, KeyCode::Enter) {
            Action::ApplySearch { search, criteria } => {
                assert_eq!(search, "POL-9");
                assert!(criteria.is_empty());
            }
            other => panic!("unexpected action {other:?}"),
        }
    }
}
