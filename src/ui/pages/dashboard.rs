use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, List, ListItem, Paragraph, Row, Table, TableState},
    Frame,
};

use super::{money, page_block, render_load_state};
use crate::analytics::DashboardStats;
use crate::backend::Page;
use crate::config::DisplayConfig;
use crate::models::{Claim, SAMPLE_DOCUMENTS};
use crate::routes::Route;
use crate::ui::components::badge::{document_status_badge, priority_badge, status_badge};
use crate::ui::core::{Action, Component, LoadState};
use crate::utils::format::{format_date, truncate};

const RECENT_CLAIMS: usize = 8;

pub struct DashboardView {
    pub stats: DashboardStats,
    pub recent: Vec<Claim>,
    /// Total claims according to the server, which may exceed what was loaded.
    pub server_total: u64,
}

pub struct DashboardPage {
    pub state: LoadState<DashboardView>,
    display: DisplayConfig,
    table_state: TableState,
}

impl DashboardPage {
    pub fn new(display: DisplayConfig) -> Self {
        Self {
            state: LoadState::Loading,
            display,
            table_state: TableState::default(),
        }
    }

    pub fn on_loaded(&mut self, page: Page<Claim>) {
        let stats = DashboardStats::from_claims(&page.data);
        let mut recent = page.data;
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        recent.truncate(RECENT_CLAIMS);
        self.table_state.select(if recent.is_empty() { None } else { Some(0) });
        self.state = LoadState::Loaded(DashboardView {
            stats,
            recent,
            server_total: page.pagination.total,
        });
    }

    fn selected_claim(&self) -> Option<&Claim> {
        let view = self.state.loaded()?;
        view.recent.get(self.table_state.selected()?)
    }

    fn render_cards(&self, f: &mut Frame, area: Rect, view: &DashboardView) {
        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(area);

        let figures = [
            ("Total claims", view.server_total.max(view.stats.total_claims as u64).to_string(), Color::Cyan),
            ("Open claims", view.stats.open_claims.to_string(), Color::Yellow),
            ("Total claimed", money(&self.display, view.stats.total_amount), Color::Green),
            ("Average claim", money(&self.display, view.stats.average_amount), Color::Magenta),
        ];
        for ((title, value, color), card) in figures.into_iter().zip(cards.iter()) {
            let paragraph = Paragraph::new(Line::from(Span::styled(
                value,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )))
            .block(page_block(title))
            .alignment(Alignment::Center);
            f.render_widget(paragraph, *card);
        }
    }

    fn render_breakdown(&self, f: &mut Frame, area: Rect, view: &DashboardView) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let status_items: Vec<ListItem> = view
            .stats
            .by_status
            .iter()
            .map(|(status, count)| ListItem::new(Line::from(vec![status_badge(*status), Span::raw(format!(" {count}"))])))
            .collect();
        f.render_widget(List::new(status_items).block(page_block("Claims by status")), columns[0]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(columns[1]);

        let gauge = Gauge::default()
            .block(page_block("Fully documented"))
            .gauge_style(Style::default().fg(Color::Green))
            .percent(view.stats.documentation_rate().min(100));
        f.render_widget(gauge, right[0]);

        let priority_items: Vec<ListItem> = view
            .stats
            .by_priority
            .iter()
            .map(|(priority, count)| ListItem::new(Line::from(vec![priority_badge(*priority), Span::raw(format!(" {count}"))])))
            .collect();
        f.render_widget(List::new(priority_items).block(page_block("By priority")), right[1]);
    }

    fn render_recent(&mut self, f: &mut Frame, area: Rect, recent: &[Claim]) {
        let rows: Vec<Row> = recent
            .iter()
            .map(|claim| {
                Row::new(vec![
                    Line::from(format!("#{}", claim.id)),
                    Line::from(truncate(&claim.customer_display(), 20)),
                    Line::from(status_badge(claim.status)),
                    Line::from(money(&self.display, claim.amount)),
                    Line::from(format_date(claim.incident_date, &self.display.date_format)),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(6),
                Constraint::Min(12),
                Constraint::Length(13),
                Constraint::Length(14),
                Constraint::Length(12),
            ],
        )
        .header(
            Row::new(vec!["ID", "Customer", "Status", "Amount", "Incident"])
                .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD)),
        )
        .block(page_block("Recent claims"))
        .row_highlight_style(Style::default().bg(Color::DarkGray));
        f.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn render_documents(&self, f: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = SAMPLE_DOCUMENTS
            .iter()
            .map(|doc| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{} ", doc.report_number), Style::default().fg(Color::Gray)),
                    Span::raw(format!("{} · {} ", truncate(&doc.title, 28), doc.kind)),
                    document_status_badge(doc.status),
                ]))
            })
            .collect();
        f.render_widget(List::new(items).block(page_block("Recent documents")), area);
    }
}

impl Component for DashboardPage {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        let count = self.state.loaded().map(|view| view.recent.len()).unwrap_or(0);
        match key.code {
            KeyCode::Char('c') => Action::Navigate(Route::Claims),
            KeyCode::Char('j') | KeyCode::Down if count > 0 => {
                let next = self.table_state.selected().map(|i| (i + 1).min(count - 1)).unwrap_or(0);
                self.table_state.select(Some(next));
                Action::None
            }
            KeyCode::Char('k') | KeyCode::Up if count > 0 => {
                let prev = self.table_state.selected().map(|i| i.saturating_sub(1)).unwrap_or(0);
                self.table_state.select(Some(prev));
                Action::None
            }
            KeyCode::Enter => match self.selected_claim() {
                Some(claim) => Action::Navigate(Route::ClaimDetail(claim.id)),
                None => Action::None,
            },
            _ => Action::None,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        if render_load_state(f, rect, "Dashboard", &self.state, "").is_none() {
            return;
        }
        let LoadState::Loaded(view) = std::mem::replace(&mut self.state, LoadState::Loading) else {
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(9), Constraint::Min(0)])
            .split(rect);
        self.render_cards(f, chunks[0], &view);
        self.render_breakdown(f, chunks[1], &view);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[2]);
        self.render_recent(f, bottom[0], &view.recent);
        self.render_documents(f, bottom[1]);

        self.state = LoadState::Loaded(view);
    }
}
