//! Sign-in, registration and password screens.
//!
//! All five share one page type; [`AuthKind`] decides the fields, the typed
//! form the values are folded into and the request that is submitted.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use crate::forms::{ChangePasswordForm, ForgotPasswordForm, FormError, LoginForm, RegisterForm, ResetPasswordForm};
use crate::routes::Route;
use crate::ui::components::form_component::{FormComponent, FormInput, FormSignal};
use crate::ui::core::{Action, Component, Submission};
use crate::ui::layout::LayoutManager;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthKind {
    Login,
    Register,
    ForgotPassword,
    /// Token taken from the reset link, if it carried one.
    ResetPassword(Option<String>),
    ChangePassword,
}

impl AuthKind {
    fn title(&self) -> &'static str {
        match self {
            AuthKind::Login => "Sign in",
            AuthKind::Register => "Create account",
            AuthKind::ForgotPassword => "Forgot password",
            AuthKind::ResetPassword(_) => "Reset password",
            AuthKind::ChangePassword => "Change password",
        }
    }

    fn inputs(&self) -> Vec<FormInput> {
        match self {
            AuthKind::Login => vec![
                FormInput::text("email", "Email", ""),
                FormInput::secret("password", "Password"),
            ],
            AuthKind::Register => vec![
                FormInput::text("name", "Name", ""),
                FormInput::text("email", "Email", ""),
                FormInput::secret("password", "Password"),
                FormInput::secret("confirm_password", "Confirm password"),
            ],
            AuthKind::ForgotPassword => vec![FormInput::text("email", "Email", "")],
            AuthKind::ResetPassword(token) => vec![
                FormInput::text("token", "Reset token", token.as_deref().unwrap_or("")),
                FormInput::secret("password", "New password"),
                FormInput::secret("confirm_password", "Confirm password"),
            ],
            AuthKind::ChangePassword => vec![
                FormInput::secret("current_password", "Current password"),
                FormInput::secret("new_password", "New password"),
                FormInput::secret("confirm_password", "Confirm new password"),
            ],
        }
    }
}

pub struct AuthPage {
    pub kind: AuthKind,
    pub form: FormComponent,
    /// Confirmation shown in place of an error, e.g. "reset link sent".
    notice: Option<String>,
}

impl AuthPage {
    pub fn new(kind: AuthKind) -> Self {
        let mut form = FormComponent::new(kind.title(), kind.inputs());
        // Skip a prefilled reset token.
        if matches!(kind, AuthKind::ResetPassword(Some(_))) {
            form.handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        }
        Self {
            kind,
            form,
            notice: None,
        }
    }

    pub fn hints(&self) -> &'static str {
        match self.kind {
            AuthKind::Login => "Enter: sign in • Ctrl+N: register • Ctrl+F: forgot password • Ctrl+C: quit",
            AuthKind::Register => "Enter: create account • Ctrl+L: sign in • Ctrl+C: quit",
            AuthKind::ForgotPassword | AuthKind::ResetPassword(_) => "Enter: submit • Esc/Ctrl+L: sign in • Ctrl+C: quit",
            AuthKind::ChangePassword => "Enter: save • Esc: back to profile",
        }
    }

    /// A submission was rejected; never keep passwords around.
    pub fn on_failed(&mut self) {
        self.notice = None;
        self.form.clear_secrets();
    }

    pub fn on_succeeded(&mut self, message: &str) {
        self.form.set_message(None);
        self.notice = Some(message.to_string());
    }

    fn fold<F: Default>(&self, update: impl Fn(F, &str, &str) -> Result<F, FormError>) -> Result<F, FormError> {
        self.form
            .values()
            .try_fold(F::default(), |acc, (name, value)| update(acc, name, value))
    }

    fn build(&self) -> Result<Submission, FormError> {
        Ok(match self.kind {
            AuthKind::Login => Submission::Login(self.fold(LoginForm::update)?.to_request()?),
            AuthKind::Register => Submission::Register(self.fold(RegisterForm::update)?.to_request()?),
            AuthKind::ForgotPassword => Submission::ForgotPassword(self.fold(ForgotPasswordForm::update)?.to_request()?),
            AuthKind::ResetPassword(_) => Submission::ResetPassword(self.fold(ResetPasswordForm::update)?.to_request()?),
            AuthKind::ChangePassword => {
                Submission::ChangePassword(self.fold(ChangePasswordForm::update)?.to_request()?)
            }
        })
    }

    fn submit(&mut self) -> Action {
        self.notice = None;
        match self.build() {
            Ok(submission) => Action::Submit(submission),
            Err(error) => {
                self.form.set_message(Some(error.to_string()));
                self.form.set_errors(error.field_errors());
                Action::None
            }
        }
    }

    fn link(&self, key: KeyEvent) -> Option<Route> {
        if !key.modifiers.contains(KeyModifiers::CONTROL) || self.kind == AuthKind::ChangePassword {
            return None;
        }
        match key.code {
            KeyCode::Char('n') => Some(Route::Register),
            KeyCode::Char('f') => Some(Route::ForgotPassword),
            KeyCode::Char('l') => Some(Route::Login),
            _ => None,
        }
    }
}

impl Component for AuthPage {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if let Some(route) = self.link(key) {
            return Action::Navigate(route);
        }
        match self.form.handle_key(key) {
            FormSignal::Submit => self.submit(),
            FormSignal::Cancel => match self.kind {
                AuthKind::ChangePassword => Action::Navigate(Route::Profile),
                AuthKind::Login => Action::None,
                _ => Action::Navigate(Route::Login),
            },
            FormSignal::None => Action::None,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let height = self.form.inputs.len() as u16 * 3 + 6;
        let area = LayoutManager::centered_rect_lines(50, height + 2, rect);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(2)])
            .split(area);
        self.form.render(f, chunks[0]);
        if let Some(notice) = &self.notice {
            f.render_widget(
                Paragraph::new(notice.as_str()).style(Style::default().fg(Color::Green)),
                chunks[1],
            );
        }
    }

    fn captures_input(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(page: &mut AuthPage, text: &str) {
        for c in text.chars() {
            page.handle_key_events(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
    }

    fn enter(page: &mut AuthPage) -> Action {
        page.handle_key_events(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
    }

    #[test]
    fn login_submits_trimmed_email() {
        let mut page = AuthPage::new(AuthKind::Login);
        type_text(&mut page, "ada@example.com ");
        enter(&mut page);
        type_text(&mut page, "hunter22");
        match enter(&mut page) {
            Action::Submit(Submission::Login(request)) => {
                assert_eq!(request.email, "ada@example.com");
                assert_eq!(request.password, "hunter22");
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn failed_login_clears_password() {
        let mut page = AuthPage::new(AuthKind::Login);
        type_text(&mut page, "ada@example.com");
        enter(&mut page);
        type_text(&mut page, "wrong");
        page.on_failed();
        assert_eq!(page.form.value("password"), "");
        assert_eq!(page.form.value("email"), "ada@example.com");
    }

    #[test]
    fn change_password_mismatch_is_reported_inline() {
        let mut page = AuthPage::new(AuthKind::ChangePassword);
        type_text(&mut page, "oldpass");
        enter(&mut page);
        type_text(&mut page, "newpass1");
        enter(&mut page);
        type_text(&mut page, "newpass2");
        assert!(matches!(enter(&mut page), Action::None));
        assert!(page.form.errors().get("confirm_password").is_some());
    }

    #[test]
    fn reset_link_token_is_prefilled() {
        let page = AuthPage::new(AuthKind::ResetPassword(Some("abc".into())));
        assert_eq!(page.form.value("token"), "abc");
        assert_eq!(page.form.focused_name(), Some("password"));
    }

    #[test]
    fn ctrl_n_opens_registration() {
        let mut page = AuthPage::new(AuthKind::Login);
        let action = page.handle_key_events(KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL));
        assert!(matches!(action, Action::Navigate(Route::Register)));
    }
}
