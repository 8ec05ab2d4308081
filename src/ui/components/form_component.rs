//! Generic multi-field form.
//!
//! Pages describe their fields as [`FormInput`]s and translate the collected
//! values into their typed form state on submit. Field errors are shown on
//! the bottom border of the offending input.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::badge::flag_checkbox;
use super::dialogs::common::{self, shortcuts};
use super::text_input::TextInput;
use crate::forms::FieldErrors;

#[derive(Debug, Clone, PartialEq)]
pub enum InputKind {
    Text,
    Secret,
    /// A checkbox holding "true" or "false".
    Flag,
    /// A fixed set of `(value, label)` options cycled with Left/Right.
    Choice(Vec<(String, String)>),
}

#[derive(Debug, Clone)]
pub struct FormInput {
    /// Key used for values and field errors.
    pub name: String,
    pub label: String,
    pub kind: InputKind,
    pub input: TextInput,
}

impl FormInput {
    pub fn text(name: &str, label: &str, value: &str) -> Self {
        Self::with_kind(name, label, value, InputKind::Text)
    }

    pub fn secret(name: &str, label: &str) -> Self {
        Self::with_kind(name, label, "", InputKind::Secret)
    }

    pub fn flag(name: &str, label: &str, set: bool) -> Self {
        Self::with_kind(name, label, &set.to_string(), InputKind::Flag)
    }

    pub fn choice(name: &str, label: &str, value: &str, options: Vec<(String, String)>) -> Self {
        Self::with_kind(name, label, value, InputKind::Choice(options))
    }

    fn with_kind(name: &str, label: &str, value: &str, kind: InputKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            input: TextInput::new(value),
        }
    }

    fn height(&self) -> u16 {
        if self.kind == InputKind::Flag {
            1
        } else {
            3
        }
    }

    fn cycle(&mut self, forward: bool) {
        let InputKind::Choice(options) = &self.kind else {
            return;
        };
        if options.is_empty() {
            return;
        }
        let len = options.len();
        let next = match options.iter().position(|(value, _)| value == self.input.value()) {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None if forward => 0,
            None => len - 1,
        };
        let value = options[next].0.clone();
        self.input.set(value);
    }

    fn shown_value(&self, focused: bool) -> String {
        match &self.kind {
            InputKind::Choice(options) => {
                let label = options
                    .iter()
                    .find(|(value, _)| value == self.input.value())
                    .map(|(_, label)| label.clone())
                    .unwrap_or_else(|| {
                        if self.input.value().is_empty() {
                            "select".to_string()
                        } else {
                            self.input.value().to_string()
                        }
                    });
                if focused {
                    format!("◀ {label} ▶")
                } else {
                    label
                }
            }
            InputKind::Secret if !focused => "•".repeat(self.input.value().chars().count()),
            InputKind::Secret => self.input.display(true),
            _ if focused => self.input.display(false),
            _ => self.input.value().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormSignal {
    None,
    Submit,
    Cancel,
}

#[derive(Debug, Clone)]
pub struct FormComponent {
    pub title: String,
    pub inputs: Vec<FormInput>,
    focus: usize,
    errors: FieldErrors,
    message: Option<String>,
    pub submitting: bool,
}

impl FormComponent {
    pub fn new(title: impl Into<String>, inputs: Vec<FormInput>) -> Self {
        Self {
            title: title.into(),
            inputs,
            focus: 0,
            errors: FieldErrors::new(),
            message: None,
            submitting: false,
        }
    }

    pub fn value(&self, name: &str) -> &str {
        self.inputs
            .iter()
            .find(|input| input.name == name)
            .map(|input| input.input.value())
            .unwrap_or("")
    }

    /// `(name, value)` for every field, in display order.
    pub fn values(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inputs
            .iter()
            .map(|input| (input.name.as_str(), input.input.value()))
    }

    pub fn focused_name(&self) -> Option<&str> {
        self.inputs.get(self.focus).map(|input| input.name.as_str())
    }

    pub fn set_errors(&mut self, errors: FieldErrors) {
        if let Some(index) = self
            .inputs
            .iter()
            .position(|input| errors.get(&input.name).is_some())
        {
            self.focus = index;
        }
        self.errors = errors;
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// General message under the fields, e.g. a failed request.
    pub fn set_message(&mut self, message: Option<String>) {
        self.message = message;
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Forget values of secret fields, e.g. after a failed sign-in.
    pub fn clear_secrets(&mut self) {
        for input in &mut self.inputs {
            if input.kind == InputKind::Secret {
                input.input.clear();
            }
        }
    }

    fn move_focus(&mut self, forward: bool) {
        let len = self.inputs.len().max(1);
        self.focus = if forward { (self.focus + 1) % len } else { (self.focus + len - 1) % len };
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormSignal {
        if self.submitting {
            return FormSignal::None;
        }
        let last = self.inputs.len().saturating_sub(1);
        match key.code {
            KeyCode::Esc => return FormSignal::Cancel,
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => return FormSignal::Submit,
            KeyCode::Enter if self.focus >= last => return FormSignal::Submit,
            KeyCode::Enter | KeyCode::Tab | KeyCode::Down => {
                self.move_focus(true);
                return FormSignal::None;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.move_focus(false);
                return FormSignal::None;
            }
            _ => {}
        }

        let Some(field) = self.inputs.get_mut(self.focus) else {
            return FormSignal::None;
        };
        let kind = field.kind.clone();
        let changed = match kind {
            InputKind::Flag => match key.code {
                KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right => {
                    let flipped = field.input.value() != "true";
                    field.input.set(flipped.to_string());
                    true
                }
                _ => false,
            },
            InputKind::Choice(_) => match key.code {
                KeyCode::Right | KeyCode::Char(' ') => {
                    field.cycle(true);
                    true
                }
                KeyCode::Left => {
                    field.cycle(false);
                    true
                }
                _ => false,
            },
            InputKind::Text | InputKind::Secret => field.input.handle_key(key),
        };
        if changed {
            let name = field.name.clone();
            self.errors = self
                .errors
                .iter()
                .filter(|(key, _)| *key != name)
                .fold(FieldErrors::new(), |mut acc, (key, message)| {
                    acc.add(key, message);
                    acc
                });
        }
        FormSignal::None
    }

    /// Index of the first field to draw so the focused one is visible.
    fn first_visible(&self, height: u16) -> usize {
        if self.inputs.is_empty() {
            return 0;
        }
        let mut first = 0;
        loop {
            let used: u16 = self.inputs[first..=self.focus.min(self.inputs.len() - 1)]
                .iter()
                .map(FormInput::height)
                .sum();
            if used <= height || first >= self.focus {
                return first;
            }
            first += 1;
        }
    }

    fn render_field(&self, f: &mut Frame, area: Rect, index: usize) {
        let field = &self.inputs[index];
        let focused = index == self.focus;
        let error = self.errors.get(&field.name);

        if field.kind == InputKind::Flag {
            let style = if focused {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let mut spans = vec![
                flag_checkbox(field.input.value() == "true"),
                Span::styled(format!(" {}", field.label), style),
            ];
            if let Some(error) = error {
                spans.push(Span::styled(format!("  {error}"), Style::default().fg(Color::Red)));
            }
            f.render_widget(Paragraph::new(Line::from(spans)), area);
            return;
        }

        let border_color = match (error.is_some(), focused) {
            (true, _) => Color::Red,
            (false, true) => Color::Cyan,
            (false, false) => Color::Gray,
        };
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(format!(" {} ", field.label))
            .title_style(Style::default().fg(Color::White))
            .border_style(Style::default().fg(border_color));
        if let Some(error) = error {
            block = block.title_bottom(Line::from(Span::styled(
                format!(" {error} "),
                Style::default().fg(Color::Red),
            )));
        }
        let paragraph = Paragraph::new(field.shown_value(focused))
            .block(block)
            .style(Style::default().fg(Color::White));
        f.render_widget(paragraph, area);
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let block = common::create_dialog_block(&self.title, Color::Cyan);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1), Constraint::Length(1)])
            .split(inner);
        let fields_area = chunks[0];

        let mut y = fields_area.y;
        let bottom = fields_area.y + fields_area.height;
        for index in self.first_visible(fields_area.height)..self.inputs.len() {
            let height = self.inputs[index].height();
            if y + height > bottom {
                break;
            }
            self.render_field(f, Rect::new(fields_area.x, y, fields_area.width, height), index);
            y += height;
        }

        let (message, color) = if self.submitting {
            ("⏳ Submitting...".to_string(), Color::Yellow)
        } else {
            (self.message.clone().unwrap_or_default(), Color::Red)
        };
        f.render_widget(Paragraph::new(message).style(Style::default().fg(color)), chunks[1]);

        let instructions = common::create_instructions_paragraph(&[
            shortcuts::TAB_NEXT,
            shortcuts::SEPARATOR,
            ("Ctrl+S", Color::Green, " Submit"),
            shortcuts::SEPARATOR,
            shortcuts::ESC_CANCEL,
        ]);
        f.render_widget(instructions, chunks[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(form: &mut FormComponent, code: KeyCode) -> FormSignal {
        form.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn sample() -> FormComponent {
        FormComponent::new(
            "Sample",
            vec![
                FormInput::text("name", "Name", ""),
                FormInput::choice(
                    "priority",
                    "Priority",
                    "Medium",
                    vec![
                        ("Low".into(), "Low".into()),
                        ("Medium".into(), "Medium".into()),
                        ("High".into(), "High".into()),
                    ],
                ),
                FormInput::flag("done", "Done", false),
            ],
        )
    }

    #[test]
    fn typing_cycling_and_toggling() {
        let mut form = sample();
        press(&mut form, KeyCode::Char('A'));
        press(&mut form, KeyCode::Tab);
        press(&mut form, KeyCode::Right);
        press(&mut form, KeyCode::Tab);
        press(&mut form, KeyCode::Char(' '));

        assert_eq!(form.value("name"), "A");
        assert_eq!(form.value("priority"), "High");
        assert_eq!(form.value("done"), "true");
        assert_eq!(press(&mut form, KeyCode::Enter), FormSignal::Submit);
    }

    #[test]
    fn errors_focus_first_bad_field_and_clear_on_edit() {
        let mut form = sample();
        let mut errors = FieldErrors::new();
        errors.add("priority", "Pick one");
        form.set_errors(errors);
        assert_eq!(form.focused_name(), Some("priority"));

        press(&mut form, KeyCode::Left);
        assert!(form.errors().is_empty());
    }
}
