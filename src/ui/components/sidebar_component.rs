//! Sidebar navigation component for claimdesk.
//!
//! Lists the main sections of the dashboard. Shift+J/K, Tab/Shift+Tab or
//! Shift+arrows move the selection and navigate immediately; a mouse click does the same.

use crate::routes::Route;
use crate::ui::core::{actions::Action, Component};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{block::BorderType, Block, Borders, List, ListItem, ListState},
    Frame,
};

pub struct SidebarComponent {
    list_state: ListState,
    /// Shown in the footer line, e.g. the signed-in API host.
    pub footer: String,
}

impl Default for SidebarComponent {
    fn default() -> Self {
        Self::new()
    }
}

fn icon(route: &Route) -> &'static str {
    match route {
        Route::Dashboard => "🏠",
        Route::Claims => "📋",
        Route::NewClaim => "➕",
        Route::Customers => "👥",
        Route::Employees => "🧑",
        Route::Analytics => "📊",
        Route::Profile => "👤",
        Route::Settings => "⚙",
        _ => "•",
    }
}

impl SidebarComponent {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            list_state,
            footer: String::new(),
        }
    }

    pub fn selected_route(&self) -> Route {
        let index = self.list_state.selected().unwrap_or(0);
        Route::SIDEBAR[index % Route::SIDEBAR.len()].clone()
    }

    /// Highlight the entry for `route`; routes outside the sidebar clear it.
    pub fn sync_with(&mut self, route: &Route) {
        self.list_state.select(route.sidebar_index());
    }

    fn step(&mut self, forward: bool) -> Action {
        let len = Route::SIDEBAR.len();
        let current = self.list_state.selected().unwrap_or(0);
        let next = if forward { (current + 1) % len } else { (current + len - 1) % len };
        self.list_state.select(Some(next));
        Action::Navigate(Route::SIDEBAR[next].clone())
    }

    /// Handle mouse events
    pub fn handle_mouse(&mut self, mouse: MouseEvent, area: Rect) -> Action {
        let is_in_area = mouse.column >= area.x
            && mouse.column < area.x + area.width
            && mouse.row >= area.y
            && mouse.row < area.y + area.height;

        if !is_in_area {
            return Action::None;
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if mouse.row > area.y && mouse.row < area.y + area.height - 1 {
                    let clicked_index = self.list_state.offset() + (mouse.row - area.y - 1) as usize;
                    match Route::SIDEBAR.get(clicked_index) {
                        Some(route) => {
                            self.list_state.select(Some(clicked_index));
                            Action::Navigate(route.clone())
                        }
                        None => Action::None,
                    }
                } else {
                    Action::None
                }
            }
            MouseEventKind::ScrollUp => self.step(false),
            MouseEventKind::ScrollDown => self.step(true),
            _ => Action::None,
        }
    }
}

impl Component for SidebarComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('J') | KeyCode::Tab => self.step(true),
            KeyCode::Char('K') | KeyCode::BackTab => self.step(false),
            KeyCode::Down if key.modifiers.contains(KeyModifiers::SHIFT) => self.step(true),
            KeyCode::Up if key.modifiers.contains(KeyModifiers::SHIFT) => self.step(false),
            _ => Action::None,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        if let Action::Navigate(route) = &action {
            self.sync_with(route);
        }
        action
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let selected = self.list_state.selected();
        let items: Vec<ListItem> = Route::SIDEBAR
            .iter()
            .enumerate()
            .map(|(index, route)| {
                let style = if Some(index) == selected {
                    Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(Line::from(vec![
                    Span::raw(format!(" {} ", icon(route))),
                    Span::raw(route.title()),
                ]))
                .style(style)
            })
            .collect();

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title("Navigation")
            .title_style(Style::default().fg(Color::White))
            .border_style(Style::default().fg(Color::DarkGray));
        if !self.footer.is_empty() {
            block = block.title_bottom(Line::from(Span::styled(
                format!(" {} ", self.footer),
                Style::default().fg(Color::DarkGray),
            )));
        }

        let list = List::new(items).block(block);
        f.render_stateful_widget(list, rect, &mut self.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_j_wraps_and_navigates() {
        let mut sidebar = SidebarComponent::new();
        sidebar.sync_with(&Route::Settings);
        let action = sidebar.handle_key_events(KeyEvent::new(KeyCode::Char('J'), KeyModifiers::SHIFT));
        assert!(matches!(action, Action::Navigate(Route::Dashboard)));
        assert_eq!(sidebar.selected_route(), Route::Dashboard);
    }

    #[test]
    fn detail_routes_highlight_their_section() {
        let mut sidebar = SidebarComponent::new();
        sidebar.update(Action::Navigate(Route::ClaimDetail(4)));
        assert_eq!(sidebar.selected_route(), Route::Claims);
    }
}
