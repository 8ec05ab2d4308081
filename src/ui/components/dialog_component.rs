//! Modal dialog component.
//!
//! Holds at most one open dialog. Any action a dialog returns other than
//! [`Action::None`] closes it; the app component takes care of that.

use crate::logger::Logger;
use crate::routes::Route;
use crate::ui::components::text_input::TextInput;
use crate::ui::core::{
    actions::{Action, DialogType},
    Component, Submission,
};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
    widgets::Clear,
    Frame,
};

use crate::ui::components::dialogs::{
    common::{self, shortcuts},
    scroll_behavior::ScrollPosition,
    system_dialogs, FilterDialog, SearchDialog,
};
use crate::ui::layout::LayoutManager;

pub struct DialogComponent {
    pub dialog_type: Option<DialogType>,
    scroll: ScrollPosition,
    filter: Option<FilterDialog>,
    search: Option<SearchDialog>,
    goto_input: TextInput,
    logger: Logger,
}

impl DialogComponent {
    pub fn new(logger: Logger) -> Self {
        Self {
            dialog_type: None,
            scroll: ScrollPosition::default(),
            filter: None,
            search: None,
            goto_input: TextInput::default(),
            logger,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.dialog_type.is_some()
    }

    fn clear_dialog(&mut self) {
        self.dialog_type = None;
        self.scroll.reset();
        self.filter = None;
        self.search = None;
        self.goto_input.clear();
    }

    fn render_goto_dialog(&self, f: &mut Frame, area: Rect) {
        let dialog_area = LayoutManager::centered_rect_lines(60, 7, area);
        f.render_widget(Clear, dialog_area);
        f.render_widget(common::create_dialog_block("🧭 Go to", Color::Cyan), dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Length(3), Constraint::Length(1)])
            .split(dialog_area);

        f.render_widget(
            common::create_input_paragraph(&self.goto_input, "Path", true, false),
            chunks[0],
        );
        f.render_widget(
            common::create_instructions_paragraph(&[
                ("Enter", Color::Green, " Go"),
                shortcuts::SEPARATOR,
                shortcuts::ESC_CANCEL,
            ]),
            chunks[1],
        );
    }
}

impl Component for DialogComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        let Some(dialog_type) = &self.dialog_type else {
            return Action::None;
        };

        match dialog_type {
            DialogType::Info(_) | DialogType::Error(_) => {
                if self.scroll.handle_key(key) {
                    Action::None
                } else {
                    Action::HideDialog
                }
            }
            DialogType::Help => match key.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('h') => Action::HideDialog,
                _ => {
                    self.scroll.handle_key(key);
                    Action::None
                }
            },
            DialogType::Logs => match key.code {
                KeyCode::Esc | KeyCode::Char('G') | KeyCode::Char('q') => Action::HideDialog,
                _ => {
                    self.scroll.handle_key(key);
                    Action::None
                }
            },
            DialogType::DeleteConfirmation { claim_id, .. } => match key.code {
                KeyCode::Enter | KeyCode::Char('y') => Action::Submit(Submission::DeleteClaim(*claim_id)),
                KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('q') => Action::HideDialog,
                _ => Action::None,
            },
            DialogType::ClaimFilter { .. } => match self.filter.as_mut() {
                Some(filter) => filter.handle_key(key),
                None => Action::HideDialog,
            },
            DialogType::ClaimSearch { .. } => match self.search.as_mut() {
                Some(search) => search.handle_key(key),
                None => Action::HideDialog,
            },
            DialogType::GoTo => match key.code {
                KeyCode::Esc => Action::HideDialog,
                KeyCode::Enter => {
                    let path = self.goto_input.value().trim().to_string();
                    if path.is_empty() {
                        Action::HideDialog
                    } else {
                        Action::Navigate(Route::parse(&path))
                    }
                }
                _ => {
                    self.goto_input.handle_key(key);
                    Action::None
                }
            },
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match action {
            Action::ShowDialog(dialog_type) => {
                self.clear_dialog();
                match &dialog_type {
                    DialogType::ClaimFilter { filter, employees } => {
                        self.filter = Some(FilterDialog::new(filter.clone(), employees.clone()));
                    }
                    DialogType::ClaimSearch { search, criteria } => {
                        self.search = Some(SearchDialog::new(search, criteria));
                    }
                    DialogType::GoTo => self.goto_input.set("/"),
                    _ => {}
                }
                self.dialog_type = Some(dialog_type);
                Action::None
            }
            Action::HideDialog => {
                self.clear_dialog();
                Action::None
            }
            _ => action,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let Some(dialog_type) = self.dialog_type.clone() else {
            return;
        };
        match dialog_type {
            DialogType::DeleteConfirmation {
                claim_id,
                policy_number,
            } => system_dialogs::render_delete_confirmation_dialog(f, rect, claim_id, &policy_number),
            DialogType::Info(message) => system_dialogs::render_info_dialog(f, rect, &message, &mut self.scroll),
            DialogType::Error(message) => system_dialogs::render_error_dialog(f, rect, &message, &mut self.scroll),
            DialogType::Help => system_dialogs::render_help_dialog(f, rect, &mut self.scroll),
            DialogType::Logs => system_dialogs::render_logs_dialog(f, rect, &self.logger, &mut self.scroll),
            DialogType::ClaimFilter { .. } => {
                if let Some(filter) = self.filter.as_mut() {
                    filter.render(f, rect);
                }
            }
            DialogType::ClaimSearch { .. } => {
                if let Some(search) = &self.search {
                    search.render(f, rect);
                }
            }
            DialogType::GoTo => self.render_goto_dialog(f, rect),
        }
    }

    fn captures_input(&self) -> bool {
        matches!(
            self.dialog_type,
            Some(DialogType::ClaimFilter { .. } | DialogType::ClaimSearch { .. } | DialogType::GoTo)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(dialog: &mut DialogComponent, code: KeyCode) -> Action {
        dialog.handle_key_events(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn delete_confirmation_submits_delete() {
        let mut dialog = DialogComponent::new(Logger::new());
        dialog.update(Action::ShowDialog(DialogType::DeleteConfirmation {
            claim_id: 12,
            policy_number: "POL-12".into(),
        }));
        assert!(matches!(
            press(&mut dialog, KeyCode::Enter),
            Action::Submit(Submission::DeleteClaim(12))
        ));
    }

    #[test]
    fn goto_parses_typed_path() {
        let mut dialog = DialogComponent::new(Logger::new());
        dialog.update(Action::ShowDialog(DialogType::GoTo));
        for c in "claims/new".chars() {
            press(&mut dialog, KeyCode::Char(c));
        }
        assert!(matches!(press(&mut dialog, KeyCode::Enter), Action::Navigate(Route::NewClaim)));
    }
}
