//! Customer and employee registries: a table plus an inline "add" form.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Row, Table, TableState},
    Frame,
};

use super::{page_block, render_load_state};
use crate::config::DisplayConfig;
use crate::forms::{CustomerField, CustomerForm, EmployeeField, EmployeeForm, FormError};
use crate::models::{Customer, Employee};
use crate::ui::components::form_component::{FormComponent, FormInput, FormSignal};
use crate::ui::core::{Action, Component, LoadState, Submission};
use crate::ui::layout::LayoutManager;
use crate::utils::format::{format_date, truncate};

fn step(table_state: &mut TableState, count: usize, forward: bool) {
    if count == 0 {
        table_state.select(None);
        return;
    }
    let next = match table_state.selected() {
        Some(i) if forward => (i + 1).min(count - 1),
        Some(i) => i.saturating_sub(1),
        None => 0,
    };
    table_state.select(Some(next));
}

fn header(titles: &[&'static str]) -> Row<'static> {
    Row::new(titles.to_vec()).style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD))
}

/// Feed a form's outcome back into it; returns the action to emit.
fn finish_submit<P>(form: &mut FormComponent, result: Result<P, FormError>, wrap: impl FnOnce(P) -> Submission) -> Action {
    match result {
        Ok(payload) => Action::Submit(wrap(payload)),
        Err(error) => {
            form.set_message(Some(error.to_string()));
            form.set_errors(error.field_errors());
            Action::None
        }
    }
}

pub struct CustomersPage {
    pub state: LoadState<Vec<Customer>>,
    pub form: Option<FormComponent>,
    table_state: TableState,
}

impl CustomersPage {
    pub fn new() -> Self {
        Self {
            state: LoadState::Loading,
            form: None,
            table_state: TableState::default(),
        }
    }

    pub fn on_loaded(&mut self, customers: Vec<Customer>) {
        self.table_state.select(if customers.is_empty() { None } else { Some(0) });
        self.state = LoadState::Loaded(customers);
    }

    pub fn captures_input(&self) -> bool {
        self.form.is_some()
    }

    fn open_form(&mut self) {
        let inputs = CustomerField::ALL
            .iter()
            .map(|field| FormInput::text(field.name(), field.label(), ""))
            .collect();
        self.form = Some(FormComponent::new("New customer", inputs));
    }

    fn collect(form: &FormComponent) -> Result<crate::backend::CustomerPayload, FormError> {
        let customer = form.values().try_fold(CustomerForm::default(), |acc, (name, value)| {
            name.parse::<CustomerField>().map(|field| acc.update(field, value))
        })?;
        customer.to_payload()
    }
}

impl Default for CustomersPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for CustomersPage {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if let Some(form) = self.form.as_mut() {
            return match form.handle_key(key) {
                FormSignal::Submit => {
                    let result = Self::collect(form);
                    finish_submit(form, result, Submission::CreateCustomer)
                }
                FormSignal::Cancel => {
                    self.form = None;
                    Action::None
                }
                FormSignal::None => Action::None,
            };
        }

        let count = self.state.loaded().map(Vec::len).unwrap_or(0);
        match key.code {
            KeyCode::Char('a') => {
                self.open_form();
                Action::None
            }
            KeyCode::Char('j') | KeyCode::Down => {
                step(&mut self.table_state, count, true);
                Action::None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                step(&mut self.table_state, count, false);
                Action::None
            }
            _ => Action::None,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        if let Some(customers) = render_load_state(f, rect, "Customers", &self.state, "") {
            let rows: Vec<Row> = customers
                .iter()
                .map(|c| {
                    Row::new(vec![
                        format!("#{}", c.id),
                        truncate(&c.name, 24),
                        truncate(&c.email, 28),
                        c.phone.clone(),
                        truncate(&c.city, 16),
                    ])
                })
                .collect();
            let title = format!("Customers ({})", customers.len());
            let table = Table::new(
                rows,
                [
                    Constraint::Length(6),
                    Constraint::Min(14),
                    Constraint::Min(16),
                    Constraint::Length(16),
                    Constraint::Length(16),
                ],
            )
            .header(header(&["ID", "Name", "Email", "Phone", "City"]))
            .block(page_block(&title))
            .row_highlight_style(Style::default().bg(Color::DarkGray));
            f.render_stateful_widget(table, rect, &mut self.table_state);
        }

        if let Some(form) = &self.form {
            form.render(f, LayoutManager::centered_rect(60, 80, rect));
        }
    }
}

pub struct EmployeesPage {
    pub state: LoadState<Vec<Employee>>,
    pub form: Option<FormComponent>,
    display: DisplayConfig,
    table_state: TableState,
}

impl EmployeesPage {
    pub fn new(display: DisplayConfig) -> Self {
        Self {
            state: LoadState::Loading,
            form: None,
            display,
            table_state: TableState::default(),
        }
    }

    pub fn on_loaded(&mut self, employees: Vec<Employee>) {
        self.table_state.select(if employees.is_empty() { None } else { Some(0) });
        self.state = LoadState::Loaded(employees);
    }

    pub fn captures_input(&self) -> bool {
        self.form.is_some()
    }

    fn open_form(&mut self) {
        let inputs = EmployeeField::ALL
            .iter()
            .map(|field| FormInput::text(field.name(), field.label(), ""))
            .collect();
        self.form = Some(FormComponent::new("New employee", inputs));
    }

    fn collect(form: &FormComponent) -> Result<crate::backend::EmployeePayload, FormError> {
        let employee = form.values().try_fold(EmployeeForm::default(), |acc, (name, value)| {
            name.parse::<EmployeeField>().map(|field| acc.update(field, value))
        })?;
        employee.to_payload()
    }
}

impl Component for EmployeesPage {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if let Some(form) = self.form.as_mut() {
            return match form.handle_key(key) {
                FormSignal::Submit => {
                    let result = Self::collect(form);
                    finish_submit(form, result, Submission::CreateEmployee)
                }
                FormSignal::Cancel => {
                    self.form = None;
                    Action::None
                }
                FormSignal::None => Action::None,
            };
        }

        let count = self.state.loaded().map(Vec::len).unwrap_or(0);
        match key.code {
            KeyCode::Char('a') => {
                self.open_form();
                Action::None
            }
            KeyCode::Char('j') | KeyCode::Down => {
                step(&mut self.table_state, count, true);
                Action::None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                step(&mut self.table_state, count, false);
                Action::None
            }
            _ => Action::None,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        if let Some(employees) = render_load_state(f, rect, "Employees", &self.state, "") {
            let rows: Vec<Row> = employees
                .iter()
                .map(|e| {
                    Row::new(vec![
                        format!("#{}", e.id),
                        truncate(&e.name, 24),
                        truncate(&e.position, 20),
                        truncate(&e.department, 18),
                        format!("{} yrs", e.years_of_experience),
                        format_date(e.hire_date, &self.display.date_format),
                    ])
                })
                .collect();
            let title = format!("Employees ({})", employees.len());
            let table = Table::new(
                rows,
                [
                    Constraint::Length(6),
                    Constraint::Min(14),
                    Constraint::Min(12),
                    Constraint::Length(18),
                    Constraint::Length(8),
                    Constraint::Length(12),
                ],
            )
            .header(header(&["ID", "Name", "Position", "Department", "Exp.", "Hired"]))
            .block(page_block(&title))
            .row_highlight_style(Style::default().bg(Color::DarkGray));
            f.render_stateful_widget(table, rect, &mut self.table_state);
        }

        if let Some(form) = &self.form {
            form.render(f, LayoutManager::centered_rect(60, 80, rect));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(page: &mut CustomersPage, code: KeyCode) -> Action {
        page.handle_key_events(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(page: &mut CustomersPage, text: &str) {
        for c in text.chars() {
            press(page, KeyCode::Char(c));
        }
    }

    #[test]
    fn add_customer_validates_then_submits() {
        let mut page = CustomersPage::new();
        page.on_loaded(Vec::new());
        press(&mut page, KeyCode::Char('a'));
        assert!(page.captures_input());

        type_text(&mut page, "Dana Okafor");
        press(&mut page, KeyCode::Tab);
        type_text(&mut page, "not-an-email");
        let action = page.handle_key_events(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert!(matches!(action, Action::None));
        let form = page.form.as_ref().unwrap();
        assert!(form.errors().get("email").is_some());

        let form = page.form.as_mut().unwrap();
        for input in &mut form.inputs {
            match input.name.as_str() {
                "email" => input.input.set("dana@example.com"),
                "phone" => input.input.set("555-0100"),
                "city" => input.input.set("Lagos"),
                _ => {}
            }
        }
        match page.handle_key_events(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)) {
            Action::Submit(Submission::CreateCustomer(payload)) => assert_eq!(payload.name, "Dana Okafor"),
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn cancel_closes_the_form() {
        let mut page = CustomersPage::new();
        press(&mut page, KeyCode::Char('a'));
        press(&mut page, KeyCode::Esc);
        assert!(page.form.is_none());
    }
}
