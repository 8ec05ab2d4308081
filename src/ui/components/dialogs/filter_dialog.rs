//! Filter dialog for the loaded claims page.
//!
//! Rows are, in order: one checkbox per employee on the page, one checkbox
//! per status, then the two date bounds as text inputs.

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::common::{self, shortcuts};
use crate::claims_list::ClaimFilter;
use crate::constants::DIALOG_TITLE_FILTER;
use crate::models::ClaimStatus;
use crate::ui::components::badge::{flag_checkbox, status_badge};
use crate::ui::components::text_input::TextInput;
use crate::ui::core::Action;
use crate::ui::layout::LayoutManager;
use crate::utils::datetime::{format_ymd, parse_date};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    Employee(usize),
    Status(ClaimStatus),
    DateFrom,
    DateTo,
}

pub struct FilterDialog {
    filter: ClaimFilter,
    employees: Vec<(i64, String)>,
    date_from: TextInput,
    date_to: TextInput,
    cursor: usize,
    error: Option<String>,
    list_state: ListState,
}

impl FilterDialog {
    pub fn new(filter: ClaimFilter, employees: Vec<(i64, String)>) -> Self {
        let date_from = TextInput::new(filter.date_from.map(format_ymd).unwrap_or_default());
        let date_to = TextInput::new(filter.date_to.map(format_ymd).unwrap_or_default());
        Self {
            filter,
            employees,
            date_from,
            date_to,
            cursor: 0,
            error: None,
            list_state: ListState::default(),
        }
    }

    fn rows(&self) -> Vec<Row> {
        let mut rows: Vec<Row> = (0..self.employees.len()).map(Row::Employee).collect();
        rows.extend(ClaimStatus::ALL.iter().copied().map(Row::Status));
        rows.push(Row::DateFrom);
        rows.push(Row::DateTo);
        rows
    }

    fn current_row(&self) -> Row {
        let rows = self.rows();
        rows[self.cursor.min(rows.len() - 1)]
    }

    fn parse_bound(input: &TextInput, label: &str) -> Result<Option<NaiveDate>, String> {
        let raw = input.value().trim();
        if raw.is_empty() {
            return Ok(None);
        }
        parse_date(raw)
            .map(Some)
            .ok_or_else(|| format!("{label} must be a date like 2024-03-31"))
    }

    /// The filter as edited so far, with date bounds parsed.
    pub fn build(&self) -> Result<ClaimFilter, String> {
        let date_from = Self::parse_bound(&self.date_from, "From")?;
        let date_to = Self::parse_bound(&self.date_to, "To")?;
        if let (Some(from), Some(to)) = (date_from, date_to) {
            if from > to {
                return Err("From must not be after To".to_string());
            }
        }
        Ok(ClaimFilter {
            date_from,
            date_to,
            ..self.filter.clone()
        })
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        let row_count = self.rows().len();
        match key.code {
            KeyCode::Esc => return Action::HideDialog,
            KeyCode::Enter => {
                return match self.build() {
                    Ok(filter) => Action::ApplyFilter(filter),
                    Err(message) => {
                        self.error = Some(message);
                        Action::None
                    }
                };
            }
            KeyCode::Down | KeyCode::Tab => {
                self.cursor = (self.cursor + 1) % row_count;
                return Action::None;
            }
            KeyCode::Up | KeyCode::BackTab => {
                self.cursor = (self.cursor + row_count - 1) % row_count;
                return Action::None;
            }
            _ => {}
        }

        match self.current_row() {
            Row::DateFrom => {
                self.date_from.handle_key(key);
            }
            Row::DateTo => {
                self.date_to.handle_key(key);
            }
            Row::Employee(index) => {
                let employee_id = self.employees.get(index).map(|(id, _)| *id);
                self.handle_checkbox_key(key, |filter| {
                    if let Some(id) = employee_id {
                        filter.toggle_employee(id);
                    }
                });
            }
            Row::Status(status) => self.handle_checkbox_key(key, |filter| filter.toggle_status(status)),
        }
        Action::None
    }

    fn handle_checkbox_key(&mut self, key: KeyEvent, toggle: impl FnOnce(&mut ClaimFilter)) {
        match key.code {
            KeyCode::Char(' ') => {
                let mut filter = self.filter.clone();
                toggle(&mut filter);
                self.filter = filter;
            }
            KeyCode::Char('j') => self.cursor = (self.cursor + 1) % self.rows().len(),
            KeyCode::Char('k') => self.cursor = self.cursor.checked_sub(1).unwrap_or(self.rows().len() - 1),
            KeyCode::Char('c') => {
                self.filter.clear();
                self.date_from.clear();
                self.date_to.clear();
                self.error = None;
            }
            _ => {}
        }
    }

    fn row_item(&self, row: Row, selected: bool) -> ListItem<'static> {
        let line = match row {
            Row::Employee(index) => {
                let (id, name) = &self.employees[index];
                Line::from(vec![
                    flag_checkbox(self.filter.employee_ids.contains(id)),
                    Span::raw(format!(" 👤 {name}")),
                ])
            }
            Row::Status(status) => Line::from(vec![
                flag_checkbox(self.filter.statuses.contains(&status)),
                Span::raw(" "),
                status_badge(status),
            ]),
            Row::DateFrom => Line::from(format!(
                "Incident from: {}",
                if selected { self.date_from.display(false) } else { self.date_from.value().to_string() }
            )),
            Row::DateTo => Line::from(format!(
                "Incident to:   {}",
                if selected { self.date_to.display(false) } else { self.date_to.value().to_string() }
            )),
        };
        let style = if selected {
            Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        ListItem::new(line).style(style)
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        let dialog_area = LayoutManager::centered_rect(60, 80, area);
        f.render_widget(Clear, dialog_area);

        let block = common::create_dialog_block(DIALOG_TITLE_FILTER, Color::Cyan);
        f.render_widget(block, dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Min(0), Constraint::Length(1), Constraint::Length(1)])
            .split(dialog_area);

        let rows = self.rows();
        let items: Vec<ListItem> = rows
            .iter()
            .enumerate()
            .map(|(index, row)| self.row_item(*row, index == self.cursor))
            .collect();
        self.list_state.select(Some(self.cursor));
        f.render_stateful_widget(List::new(items), chunks[0], &mut self.list_state);

        let error = Paragraph::new(self.error.clone().unwrap_or_default()).style(Style::default().fg(Color::Red));
        f.render_widget(error, chunks[1]);

        let instructions = common::create_instructions_paragraph(&[
            shortcuts::SPACE_TOGGLE,
            shortcuts::SEPARATOR,
            ("c", Color::Yellow, " Clear"),
            shortcuts::SEPARATOR,
            shortcuts::ENTER_APPLY,
            shortcuts::SEPARATOR,
            shortcuts::ESC_CANCEL,
        ]);
        f.render_widget(instructions, chunks[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(dialog: &mut FilterDialog, code: KeyCode) -> Action {
        dialog.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn space_toggles_employee_and_enter_applies() {
        let mut dialog = FilterDialog::new(ClaimFilter::default(), vec![(7, "Ada".into()), (9, "Lin".into())]);
        press(&mut dialog, KeyCode::Down);
        press(&mut dialog, KeyCode::Char(' '));
        match press(&mut dialog, KeyCode::Enter) {
            Action::ApplyFilter(filter) => {
                assert!(filter.employee_ids.contains(&9));
                assert_eq!(filter.employee_ids.len(), 1);
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn invalid_date_keeps_dialog_open() {
        let mut dialog = FilterDialog::new(ClaimFilter::default(), Vec::new());
        // Employees are empty, so statuses come first; move to "from".
        for _ in 0..ClaimStatus::ALL.len() {
            press(&mut dialog, KeyCode::Down);
        }
        for c in "soon".chars() {
            press(&mut dialog, KeyCode::Char(c));
        }
        assert!(matches!(press(&mut dialog, KeyCode::Enter), Action::None));
        assert!(dialog.build().is_err());
    }
}
