//! One component per route.
//!
//! A page is created fresh on every navigation; its data arrives later
//! through [`Page::on_loaded`] or [`Page::on_failed`]. Pages never talk to
//! the backend themselves, they return actions.

pub mod account;
pub mod analytics;
pub mod auth;
pub mod claim_detail;
pub mod claim_form;
pub mod claims;
pub mod dashboard;
pub mod not_found;
pub mod registries;

use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::backend::{BackendError, ClaimsQuery};
use crate::config::DisplayConfig;
use crate::constants::{ERROR_FETCH_FAILED, LOADING, RETRY_HINT};
use crate::forms::FieldErrors;
use crate::routes::Route;
use crate::ui::components::help_panel::HelpPage;
use crate::ui::core::{Action, AppContext, Component, LoadState, PageData};

pub use account::{ProfilePage, SettingsPage};
pub use analytics::AnalyticsPage;
pub use auth::{AuthKind, AuthPage};
pub use claim_detail::ClaimDetailPage;
pub use claim_form::ClaimFormPage;
pub use claims::ClaimsPage;
pub use dashboard::DashboardPage;
pub use not_found::NotFoundPage;
pub use registries::{CustomersPage, EmployeesPage};

pub enum Page {
    Dashboard(DashboardPage),
    Claims(ClaimsPage),
    ClaimDetail(ClaimDetailPage),
    ClaimForm(ClaimFormPage),
    Customers(CustomersPage),
    Employees(EmployeesPage),
    Analytics(AnalyticsPage),
    Profile(ProfilePage),
    Settings(SettingsPage),
    Help(HelpPage),
    Auth(AuthPage),
    NotFound(NotFoundPage),
}

impl Page {
    pub fn for_route(route: &Route, ctx: &AppContext) -> Page {
        let display = ctx.config.display.clone();
        match route {
            Route::Dashboard => Page::Dashboard(DashboardPage::new(display)),
            Route::Claims => Page::Claims(ClaimsPage::new(ctx.config.ui.page_size, display)),
            Route::ClaimDetail(id) => Page::ClaimDetail(ClaimDetailPage::new(*id, display)),
            Route::NewClaim => Page::ClaimForm(ClaimFormPage::new(None)),
            Route::EditClaim(id) => Page::ClaimForm(ClaimFormPage::new(Some(*id))),
            Route::Customers => Page::Customers(CustomersPage::new()),
            Route::Employees => Page::Employees(EmployeesPage::new(display)),
            Route::Analytics => Page::Analytics(AnalyticsPage::new(display)),
            Route::Profile => Page::Profile(ProfilePage::new()),
            Route::Settings => Page::Settings(SettingsPage::new(ctx)),
            Route::Help => Page::Help(HelpPage::default()),
            Route::Login => Page::Auth(AuthPage::new(AuthKind::Login)),
            Route::Register => Page::Auth(AuthPage::new(AuthKind::Register)),
            Route::ForgotPassword => Page::Auth(AuthPage::new(AuthKind::ForgotPassword)),
            Route::ResetPassword { token } => Page::Auth(AuthPage::new(AuthKind::ResetPassword(token.clone()))),
            Route::ChangePassword => Page::Auth(AuthPage::new(AuthKind::ChangePassword)),
            Route::NotFound(path) => Page::NotFound(NotFoundPage::new(path.clone())),
        }
    }

    fn component(&mut self) -> &mut dyn Component {
        match self {
            Page::Dashboard(page) => page,
            Page::Claims(page) => page,
            Page::ClaimDetail(page) => page,
            Page::ClaimForm(page) => page,
            Page::Customers(page) => page,
            Page::Employees(page) => page,
            Page::Analytics(page) => page,
            Page::Profile(page) => page,
            Page::Settings(page) => page,
            Page::Help(page) => page,
            Page::Auth(page) => page,
            Page::NotFound(page) => page,
        }
    }

    /// Query the claims list should be (re)loaded with.
    pub fn claims_query(&self) -> ClaimsQuery {
        match self {
            Page::Claims(page) => page.query(),
            _ => ClaimsQuery::default(),
        }
    }

    pub fn on_loaded(&mut self, data: PageData) {
        match (self, data) {
            (Page::Dashboard(page), PageData::Dashboard(claims)) => page.on_loaded(claims),
            (Page::Claims(page), PageData::Claims(claims)) => page.on_loaded(claims),
            (Page::ClaimDetail(page), PageData::Claim(claim)) => page.on_loaded(claim),
            (Page::ClaimForm(page), PageData::ClaimForm { claim, lookups }) => page.on_loaded(claim, lookups),
            (Page::Customers(page), PageData::Customers(customers)) => page.on_loaded(customers),
            (Page::Employees(page), PageData::Employees(employees)) => page.on_loaded(employees),
            (Page::Analytics(page), PageData::Analytics(claims)) => page.on_loaded(claims),
            (Page::Profile(page), PageData::Profile(user)) => page.on_loaded(user),
            (_, data) => log::warn!("Dropping data delivered to the wrong page: {:?}", std::mem::discriminant(&data)),
        }
    }

    pub fn on_failed(&mut self, error: &BackendError) {
        let message = format!("{ERROR_FETCH_FAILED}: {error}");
        match self {
            Page::Dashboard(page) => page.state = LoadState::Failed(message),
            Page::Claims(page) => page.on_failed(message),
            Page::ClaimDetail(page) => {
                page.state = if error.is_not_found() {
                    LoadState::NotFound
                } else {
                    LoadState::Failed(message)
                }
            }
            Page::ClaimForm(page) => page.on_failed(error, message),
            Page::Customers(page) => page.state = LoadState::Failed(message),
            Page::Employees(page) => page.state = LoadState::Failed(message),
            Page::Analytics(page) => page.state = LoadState::Failed(message),
            Page::Profile(page) => page.state = LoadState::Failed(message),
            _ => {}
        }
    }

    /// The form on this page, if it is the one waiting on a submission.
    fn form_mut(&mut self) -> Option<&mut crate::ui::components::form_component::FormComponent> {
        match self {
            Page::ClaimForm(page) => page.form.as_mut(),
            Page::Customers(page) => page.form.as_mut(),
            Page::Employees(page) => page.form.as_mut(),
            Page::Auth(page) => Some(&mut page.form),
            _ => None,
        }
    }

    /// Whether submission errors can be shown inline on this page.
    pub fn has_form(&mut self) -> bool {
        self.form_mut().is_some()
    }

    pub fn on_submit_started(&mut self) {
        if let Some(form) = self.form_mut() {
            form.submitting = true;
            form.set_message(None);
        }
    }

    pub fn on_submit_failed(&mut self, message: &str, field_errors: FieldErrors) {
        if let Page::Auth(page) = self {
            page.on_failed();
        }
        if let Some(form) = self.form_mut() {
            form.submitting = false;
            form.set_message(Some(message.to_string()));
            if !field_errors.is_empty() {
                form.set_errors(field_errors);
            }
        }
    }

    /// A submission finished without moving to another route.
    pub fn on_submit_succeeded(&mut self, message: &str) {
        if let Some(form) = self.form_mut() {
            form.submitting = false;
        }
        if let Page::Auth(page) = self {
            page.on_succeeded(message);
        }
    }

    /// Key hints for the status bar.
    pub fn hints(&self) -> &'static str {
        match self {
            Page::Dashboard(_) => "J/K: sections • c: claims • r: reload • g: go to • ?: help • q: quit",
            Page::Claims(_) => "j/k: move • Enter: open • 1-9: sort • n/p: page • /: search • f: filter • a/e/d: new/edit/delete",
            Page::ClaimDetail(_) => "e: edit • d: delete • Esc: back • r: reload",
            Page::ClaimForm(_) => "Tab: next field • ←/→: choose • Space: toggle • Ctrl+S: save • Esc: cancel",
            Page::Customers(_) | Page::Employees(_) => "j/k: move • a: add • r: reload • ?: help",
            Page::Analytics(_) => "r: reload • ?: help • q: quit",
            Page::Profile(_) => "c: change password • r: reload • ?: help",
            Page::Settings(_) => "L: sign out • l/G: logs • i: file locations • ?: help",
            Page::Help(_) => "j/k: scroll • Esc: back",
            Page::Auth(page) => page.hints(),
            Page::NotFound(_) => "Enter: dashboard • g: go to • q: quit",
        }
    }
}

impl Component for Page {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        self.component().handle_key_events(key)
    }

    fn update(&mut self, action: Action) -> Action {
        self.component().update(action)
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        self.component().render(f, rect);
    }

    fn captures_input(&self) -> bool {
        match self {
            Page::ClaimForm(page) => page.captures_input(),
            Page::Customers(page) => page.captures_input(),
            Page::Employees(page) => page.captures_input(),
            Page::Auth(_) => true,
            _ => false,
        }
    }
}

/// Bordered block used by every page.
pub(crate) fn page_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(" {title} "))
        .title_style(Style::default().fg(Color::White))
        .border_style(Style::default().fg(Color::DarkGray))
}

/// Draw the placeholder for a state without data. Returns the loaded value
/// when there is one to draw instead.
pub(crate) fn render_load_state<'a, T>(
    f: &mut Frame,
    area: Rect,
    title: &str,
    state: &'a LoadState<T>,
    not_found: &str,
) -> Option<&'a T> {
    let (lines, color) = match state {
        LoadState::Loaded(value) => return Some(value),
        LoadState::Loading => (vec![Line::from(LOADING)], Color::Yellow),
        LoadState::Failed(message) => (
            vec![Line::from(message.as_str()), Line::from(""), Line::from(RETRY_HINT)],
            Color::Red,
        ),
        LoadState::NotFound => (
            vec![Line::from(not_found), Line::from(""), Line::from("Press Esc to go back")],
            Color::Gray,
        ),
    };

    let paragraph = Paragraph::new(lines)
        .block(page_block(title))
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
    None
}

/// Shared by pages showing amounts.
pub(crate) fn money(display: &DisplayConfig, amount: f64) -> String {
    crate::utils::format::format_currency_with_symbol(amount, &display.currency_symbol)
}
