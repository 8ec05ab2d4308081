use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{page_block, render_load_state};
use crate::auth::TokenStore;
use crate::config::Config;
use crate::logger;
use crate::models::User;
use crate::routes::Route;
use crate::ui::core::{Action, AppContext, Component, DialogType, LoadState};

fn row(label: &str, value: impl Into<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<18}"), Style::default().fg(Color::Gray)),
        Span::styled(value.into(), Style::default().fg(Color::White)),
    ])
}

pub struct ProfilePage {
    pub state: LoadState<User>,
}

impl ProfilePage {
    pub fn new() -> Self {
        Self {
            state: LoadState::Loading,
        }
    }

    pub fn on_loaded(&mut self, user: User) {
        self.state = LoadState::Loaded(user);
    }
}

impl Default for ProfilePage {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ProfilePage {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('c') => Action::Navigate(Route::ChangePassword),
            _ => Action::None,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let Some(user) = render_load_state(f, rect, "Profile", &self.state, "") else {
            return;
        };
        let name = if user.name.trim().is_empty() { "—" } else { user.name.as_str() };
        let lines = vec![
            Line::from(Span::styled(
                name.to_string(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            row("Email", user.email.clone()),
            row("Role", user.role.clone().unwrap_or_else(|| "—".to_string())),
            row("Account id", format!("#{}", user.id)),
            Line::from(""),
            Line::from(Span::styled("Press 'c' to change your password", Style::default().fg(Color::Gray))),
        ];
        f.render_widget(Paragraph::new(lines).block(page_block("Profile")), rect);
    }
}

/// Read-only view of the effective configuration, plus sign-out.
pub struct SettingsPage {
    lines: Vec<Line<'static>>,
    files: String,
}

impl SettingsPage {
    pub fn new(ctx: &AppContext) -> Self {
        let config = &ctx.config;
        let session = if ctx.is_authenticated() { "signed in" } else { "signed out" };
        let lines = vec![
            Line::from(Span::styled("Backend", Style::default().add_modifier(Modifier::BOLD))),
            row("API URL", ctx.backend.base_url().to_string()),
            row("Timeout", format!("{}s", config.api.timeout_secs)),
            row("Session", session),
            Line::from(""),
            Line::from(Span::styled("Interface", Style::default().add_modifier(Modifier::BOLD))),
            row("Start route", config.ui.start_route.clone()),
            row("Page size", config.ui.page_size.to_string()),
            row("Mouse", if config.ui.mouse_enabled { "enabled" } else { "disabled" }),
            row("Notifications", format!("{}s", config.ui.notification_secs)),
            Line::from(""),
            Line::from(Span::styled("Display", Style::default().add_modifier(Modifier::BOLD))),
            row("Date format", config.display.date_format.clone()),
            row("Timestamp format", config.display.datetime_format.clone()),
            row("Currency", config.display.currency_symbol.clone()),
            Line::from(""),
            Line::from(Span::styled("Logging", Style::default().add_modifier(Modifier::BOLD))),
            row("Level", config.logging.level.clone()),
            row("Log file", if config.logging.enabled { "enabled" } else { "disabled" }),
        ];
        Self {
            lines,
            files: file_locations(),
        }
    }
}

/// Where the config, token and log files live on this machine.
fn file_locations() -> String {
    let show = |path: anyhow::Result<std::path::PathBuf>| match path {
        Ok(path) => path.display().to_string(),
        Err(e) => format!("unavailable ({e})"),
    };
    format!(
        "Config file: {}\nToken file: {}\nLog file: {}",
        show(Config::get_default_config_path()),
        show(TokenStore::default_path()),
        show(logger::log_file_path())
    )
}

impl Component for SettingsPage {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('L') => Action::Logout,
            KeyCode::Char('l') => Action::ShowDialog(DialogType::Logs),
            KeyCode::Char('i') => Action::ShowDialog(DialogType::Info(self.files.clone())),
            _ => Action::None,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(rect);
        f.render_widget(Paragraph::new(self.lines.clone()).block(page_block("Settings")), chunks[0]);
        let footer = Paragraph::new(Line::from(vec![
            Span::styled("L", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(" sign out   "),
            Span::styled("l", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(" view logs   "),
            Span::styled("i", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(" file locations"),
        ]))
        .block(page_block("Account"));
        f.render_widget(footer, chunks[1]);
    }
}
