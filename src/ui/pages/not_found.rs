use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::page_block;
use crate::routes::Route;
use crate::ui::core::{Action, Component};

pub struct NotFoundPage {
    path: String,
}

impl NotFoundPage {
    pub fn new(path: String) -> Self {
        Self { path }
    }
}

impl Component for NotFoundPage {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => Action::Navigate(Route::Dashboard),
            _ => Action::None,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                "404",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!("Nothing lives at '{}'.", self.path)),
            Line::from(""),
            Line::from(Span::styled(
                "Press Enter for the dashboard or 'g' to go somewhere else",
                Style::default().fg(Color::Gray),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .block(page_block("Not Found"))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, rect);
    }
}
