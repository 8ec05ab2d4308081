//! Claims list: server-paginated table with client-side filter and sort.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use super::{money, page_block};
use crate::backend::{ClaimsQuery, Page};
use crate::claims_list::{ClaimsListState, SortKey};
use crate::config::DisplayConfig;
use crate::constants::{LOADING, RETRY_HINT};
use crate::models::Claim;
use crate::routes::Route;
use crate::ui::components::badge::{documentation_badges, priority_badge, status_badge};
use crate::ui::core::{Action, Component, DialogType};
use crate::utils::format::{format_date, format_datetime, truncate};

pub struct ClaimsPage {
    pub list: ClaimsListState,
    display: DisplayConfig,
    table_state: TableState,
}

impl ClaimsPage {
    pub fn new(page_size: u32, display: DisplayConfig) -> Self {
        let mut list = ClaimsListState::new(page_size);
        list.begin_fetch();
        Self {
            list,
            display,
            table_state: TableState::default(),
        }
    }

    pub fn query(&self) -> ClaimsQuery {
        self.list.query()
    }

    pub fn on_loaded(&mut self, page: Page<Claim>) {
        self.list.on_loaded(page);
        self.clamp_selection();
    }

    pub fn on_failed(&mut self, message: String) {
        self.list.on_failed(message);
        self.table_state.select(None);
    }

    fn fetch(&mut self, query: ClaimsQuery) -> Action {
        self.list.begin_fetch();
        Action::FetchClaims(query)
    }

    fn clamp_selection(&mut self) {
        let count = self.list.visible_rows().len();
        let selected = match (count, self.table_state.selected()) {
            (0, _) => None,
            (_, None) => Some(0),
            (n, Some(i)) => Some(i.min(n - 1)),
        };
        self.table_state.select(selected);
    }

    pub fn selected_claim(&self) -> Option<&Claim> {
        let rows = self.list.visible_rows();
        self.table_state.selected().and_then(|i| rows.get(i).copied())
    }

    fn move_selection(&mut self, forward: bool) {
        let count = self.list.visible_rows().len();
        if count == 0 {
            return;
        }
        let next = match self.table_state.selected() {
            Some(i) if forward => (i + 1).min(count - 1),
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.table_state.select(Some(next));
    }

    fn header_line(&self) -> Line<'static> {
        let mut spans = vec![Span::styled(
            self.list.page_label(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )];
        if !self.list.search.trim().is_empty() {
            spans.push(Span::styled(
                format!("  search: \"{}\"", self.list.search.trim()),
                Style::default().fg(Color::Cyan),
            ));
        }
        if !self.list.criteria.is_empty() {
            spans.push(Span::styled(
                format!("  criteria: {}", self.list.criteria.summary()),
                Style::default().fg(Color::Cyan),
            ));
        }
        let active = self.list.filter.active_count();
        if active > 0 {
            spans.push(Span::styled(
                format!("  filters: {active} (showing {} of {})", self.list.visible_rows().len(), self.list.claims.len()),
                Style::default().fg(Color::Yellow),
            ));
        }
        Line::from(spans)
    }

    fn claim_row(&self, claim: &Claim) -> Row<'static> {
        Row::new(vec![
            Cell::from(format!("#{}", claim.id)),
            Cell::from(truncate(&claim.policy_number, 14)),
            Cell::from(truncate(&claim.customer_display(), 20)),
            Cell::from(truncate(&claim.employee_display(), 18)),
            Cell::from(Line::from(status_badge(claim.status))),
            Cell::from(Line::from(priority_badge(claim.priority))),
            Cell::from(money(&self.display, claim.amount)),
            Cell::from(format_date(claim.incident_date, &self.display.date_format)),
            Cell::from(format_datetime(claim.created_at, &self.display.datetime_format)),
            Cell::from(Line::from(documentation_badges(&claim.documentation))),
        ])
    }

    fn render_table(&mut self, f: &mut Frame, area: Rect) {
        let mut titles: Vec<Cell> = SortKey::COLUMNS
            .iter()
            .enumerate()
            .map(|(index, key)| {
                let arrow = if self.list.sort.key == Some(*key) {
                    self.list.sort.direction.arrow()
                } else {
                    ""
                };
                Cell::from(format!("{}{} {}", index + 1, arrow, key.title()))
            })
            .collect();
        titles.push(Cell::from("Docs"));

        let rows: Vec<Row> = self
            .list
            .visible_rows()
            .into_iter()
            .map(|claim| self.claim_row(claim))
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(6),
                Constraint::Length(14),
                Constraint::Min(12),
                Constraint::Min(10),
                Constraint::Length(13),
                Constraint::Length(10),
                Constraint::Length(13),
                Constraint::Length(11),
                Constraint::Length(16),
                Constraint::Length(8),
            ],
        )
        .header(Row::new(titles).style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD)))
        .block(page_block("Claims"))
        .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");

        f.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn render_placeholder(&self, f: &mut Frame, area: Rect) {
        let (lines, color) = if self.list.loading {
            (vec![Line::from(LOADING)], Color::Yellow)
        } else if let Some(error) = &self.list.error {
            (vec![Line::from(error.clone()), Line::from(""), Line::from(RETRY_HINT)], Color::Red)
        } else if self.list.claims.is_empty() {
            (vec![Line::from("No claims yet. Press 'a' to file one.")], Color::Gray)
        } else {
            (
                vec![Line::from("No claims on this page match the filters. Press 'x' to clear them.")],
                Color::Gray,
            )
        };
        let paragraph = Paragraph::new(lines)
            .block(page_block("Claims"))
            .style(Style::default().fg(color))
            .alignment(ratatui::layout::Alignment::Center);
        f.render_widget(paragraph, area);
    }
}

impl Component for ClaimsPage {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => Action::NextRow,
            KeyCode::Char('k') | KeyCode::Up => Action::PreviousRow,
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                if let Some(sort_key) = SortKey::from_column(index) {
                    self.list.toggle_sort(sort_key);
                    self.clamp_selection();
                }
                Action::None
            }
            KeyCode::Char('n') | KeyCode::Right | KeyCode::PageDown => match self.list.next_page() {
                Some(query) => self.fetch(query),
                None => Action::None,
            },
            KeyCode::Char('p') | KeyCode::Left | KeyCode::PageUp => match self.list.previous_page() {
                Some(query) => self.fetch(query),
                None => Action::None,
            },
            KeyCode::Char('/') => Action::ShowDialog(DialogType::ClaimSearch {
                search: self.list.search.clone(),
                criteria: self.list.criteria.clone(),
            }),
            KeyCode::Char('f') => Action::ShowDialog(DialogType::ClaimFilter {
                filter: self.list.filter.clone(),
                employees: self.list.employees_on_page(),
            }),
            KeyCode::Char('x') => {
                let query = self.list.reset_filters();
                self.fetch(query)
            }
            KeyCode::Char('a') => Action::Navigate(Route::NewClaim),
            KeyCode::Enter => match self.selected_claim() {
                Some(claim) => Action::Navigate(Route::ClaimDetail(claim.id)),
                None => Action::None,
            },
            KeyCode::Char('e') => match self.selected_claim() {
                Some(claim) => Action::Navigate(Route::EditClaim(claim.id)),
                None => Action::None,
            },
            KeyCode::Char('d') => match self.selected_claim() {
                Some(claim) => Action::ShowDialog(DialogType::DeleteConfirmation {
                    claim_id: claim.id,
                    policy_number: claim.policy_number.clone(),
                }),
                None => Action::None,
            },
            _ => Action::None,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match action {
            Action::NextRow => {
                self.move_selection(true);
                Action::None
            }
            Action::PreviousRow => {
                self.move_selection(false);
                Action::None
            }
            Action::ApplyFilter(filter) => {
                let query = self.list.apply_filter(filter);
                self.fetch(query)
            }
            Action::ApplySearch { search, criteria } => {
                self.list.search = search;
                let query = self.list.apply_criteria(criteria);
                self.fetch(query)
            }
            Action::Refresh => {
                self.list.begin_fetch();
                Action::Refresh
            }
            other => other,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(rect);

        f.render_widget(Paragraph::new(self.header_line()), chunks[0]);

        if self.list.loading || self.list.visible_rows().is_empty() {
            self.render_placeholder(f, chunks[1]);
        } else {
            self.render_table(f, chunks[1]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Pagination, SearchCriteria};
    use crate::models::{ClaimStatus, Documentation, Priority};
    use crossterm::event::KeyModifiers;

    fn claim(id: i64, amount: f64) -> Claim {
        Claim {
            id,
            policy_number: format!("POL-{id}"),
            policy_type_id: Some(1),
            customer_id: 1,
            customer_name: Some("Ada".into()),
            employee_id: 2,
            employee_name: None,
            status: ClaimStatus::Pending,
            priority: Priority::Medium,
            amount,
            incident_date: None,
            details: String::new(),
            documentation: Documentation::default(),
            created_at: None,
            updated_at: None,
        }
    }

    fn loaded_page() -> ClaimsPage {
        let mut page = ClaimsPage::new(6, DisplayConfig::default());
        page.on_loaded(Page {
            data: vec![claim(1, 300.0), claim(2, 100.0), claim(3, 200.0)],
            pagination: Pagination {
                total: 14,
                page: 1,
                pages: 3,
            },
        });
        page
    }

    fn press(page: &mut ClaimsPage, code: KeyCode) -> Action {
        page.handle_key_events(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn sorting_by_amount_changes_selected_claim() {
        let mut page = loaded_page();
        assert_eq!(page.selected_claim().map(|c| c.id), Some(1));
        press(&mut page, KeyCode::Char('7'));
        assert_eq!(page.selected_claim().map(|c| c.id), Some(2));
    }

    #[test]
    fn next_page_requests_page_two() {
        let mut page = loaded_page();
        match press(&mut page, KeyCode::Char('n')) {
            Action::FetchClaims(query) => assert_eq!(query.page(), 2),
            other => panic!("unexpected action {other:?}"),
        }
        assert!(page.list.loading);
    }

    #[test]
    fn applying_status_criteria_resets_to_first_page() {
        let mut page = loaded_page();
        press(&mut page, KeyCode::Char('n'));
        let criteria = SearchCriteria {
            status: Some(ClaimStatus::Approved),
            ..Default::default()
        };
        match page.update(Action::ApplySearch {
            search: String::new(),
            criteria,
        }) {
            Action::FetchClaims(query) => {
                assert_eq!(query.page(), 1);
                assert_eq!(query.path(), "/claims/search_claims");
            }
            other => panic!("unexpected action {other:?}"),
        }
    }
}
