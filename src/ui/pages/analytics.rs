use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{BarChart, Gauge, Paragraph},
    Frame,
};

use super::{money, page_block, render_load_state};
use crate::analytics::{self, DashboardStats, MONTHLY_VOLUME};
use crate::backend::Page;
use crate::config::DisplayConfig;
use crate::models::Claim;
use crate::ui::core::{Action, Component, LoadState};

/// Charts over the loaded claims next to the fixed yearly sample series.
pub struct AnalyticsPage {
    pub state: LoadState<DashboardStats>,
    display: DisplayConfig,
}

impl AnalyticsPage {
    pub fn new(display: DisplayConfig) -> Self {
        Self {
            state: LoadState::Loading,
            display,
        }
    }

    pub fn on_loaded(&mut self, page: Page<Claim>) {
        self.state = LoadState::Loaded(DashboardStats::from_claims(&page.data));
    }
}

fn bar_chart<'a>(title: &'a str, data: &'a [(&'a str, u64)], color: Color, bar_width: u16) -> BarChart<'a> {
    BarChart::default()
        .block(page_block(title))
        .data(data)
        .bar_width(bar_width)
        .bar_gap(1)
        .bar_style(Style::default().fg(color))
        .value_style(Style::default().fg(Color::Black).bg(color).add_modifier(Modifier::BOLD))
}

impl Component for AnalyticsPage {
    fn handle_key_events(&mut self, _key: KeyEvent) -> Action {
        Action::None
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let Some(stats) = render_load_state(f, rect, "Analytics", &self.state, "") else {
            return;
        };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rect);
        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[0]);
        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[1]);

        let monthly = analytics::monthly_bars();
        f.render_widget(bar_chart("Claims per month (sample year)", &monthly, Color::Cyan, 4), top[0]);

        let by_type = analytics::policy_type_bars();
        f.render_widget(bar_chart("Claims by policy type", &by_type, Color::Magenta, 7), top[1]);

        let by_status = stats.status_bars();
        f.render_widget(
            bar_chart("Loaded claims by status", &by_status, Color::Yellow, 9),
            bottom[0],
        );

        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(0)])
            .split(bottom[1]);

        let approval = analytics::sample_approval_rate();
        f.render_widget(
            Gauge::default()
                .block(page_block("Approval rate (sample)"))
                .gauge_style(Style::default().fg(Color::Green))
                .percent(approval.min(100)),
            side[0],
        );
        f.render_widget(
            Gauge::default()
                .block(page_block("Fully documented"))
                .gauge_style(Style::default().fg(Color::Blue))
                .percent(stats.documentation_rate().min(100)),
            side[1],
        );

        let payout: f64 = MONTHLY_VOLUME.iter().map(|m| m.payout).sum();
        let lines = vec![
            Line::from(format!("Loaded claims: {}", stats.total_claims)),
            Line::from(format!("Total claimed: {}", money(&self.display, stats.total_amount))),
            Line::from(format!("Average claim: {}", money(&self.display, stats.average_amount))),
            Line::from(format!("Sample payout: {}", money(&self.display, payout))),
        ];
        f.render_widget(Paragraph::new(lines).block(page_block("Totals")), side[2]);
    }
}
