//! Create and edit claims.
//!
//! The form is built once the lookups (and, when editing, the claim) have
//! loaded. Collected values are folded into a [`ClaimForm`] by field path and
//! validated there before anything is sent.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{layout::Rect, Frame};

use super::render_load_state;
use crate::backend::{BackendError, Lookups};
use crate::constants::ERROR_CLAIM_NOT_FOUND;
use crate::forms::{ClaimField, ClaimForm, FormError};
use crate::forms::claim_form::MetadataField;
use crate::models::{Claim, ClaimStatus, Priority};
use crate::routes::Route;
use crate::ui::components::form_component::{FormComponent, FormInput, FormSignal};
use crate::ui::core::{Action, Component, LoadState, Submission};

pub struct ClaimFormPage {
    /// `Some` when editing an existing claim.
    pub claim_id: Option<i64>,
    pub state: LoadState<()>,
    pub form: Option<FormComponent>,
}

impl ClaimFormPage {
    pub fn new(claim_id: Option<i64>) -> Self {
        Self {
            claim_id,
            state: LoadState::Loading,
            form: None,
        }
    }

    fn title(&self) -> String {
        match self.claim_id {
            Some(id) => format!("Edit claim #{id}"),
            None => "New claim".to_string(),
        }
    }

    pub fn on_loaded(&mut self, claim: Option<Claim>, lookups: Lookups) {
        let mut initial = claim.as_ref().map(ClaimForm::from_claim).unwrap_or_default();
        // Older claims come back without a policy type; the update still needs one
        if claim.is_some() && initial.policy_type_id.is_empty() {
            if let Some(policy_type) = lookups.policy_types.first() {
                log::debug!("Claim has no policy type, defaulting to {}", policy_type.name);
                initial.policy_type_id = policy_type.id.to_string();
            }
        }
        self.form = Some(FormComponent::new(self.title(), build_inputs(&initial, &lookups)));
        self.state = LoadState::Loaded(());
    }

    pub fn on_failed(&mut self, error: &BackendError, message: String) {
        self.form = None;
        self.state = if error.is_not_found() && self.claim_id.is_some() {
            LoadState::NotFound
        } else {
            LoadState::Failed(message)
        };
    }

    pub fn captures_input(&self) -> bool {
        self.form.is_some()
    }

    fn back(&self) -> Action {
        match self.claim_id {
            Some(id) => Action::Navigate(Route::ClaimDetail(id)),
            None => Action::Navigate(Route::Claims),
        }
    }

    /// Fold the inputs into a claim form and validate it.
    fn collect(form: &FormComponent) -> Result<crate::backend::ClaimPayload, FormError> {
        let claim_form = form
            .values()
            .try_fold(ClaimForm::default(), |acc, (name, value)| acc.update_path(name, value))?;
        claim_form.to_payload()
    }

    fn submit(&mut self) -> Action {
        let claim_id = self.claim_id;
        let Some(form) = self.form.as_mut() else {
            return Action::None;
        };
        match Self::collect(form) {
            Ok(payload) => Action::Submit(match claim_id {
                Some(id) => Submission::UpdateClaim { id, payload },
                None => Submission::CreateClaim(payload),
            }),
            Err(error) => {
                log::debug!("Claim form rejected: {error}");
                form.set_message(Some(error.to_string()));
                form.set_errors(error.field_errors());
                Action::None
            }
        }
    }
}

fn build_inputs(initial: &ClaimForm, lookups: &Lookups) -> Vec<FormInput> {
    let policy_types: Vec<(String, String)> = lookups
        .policy_types
        .iter()
        .map(|p| (p.id.to_string(), p.name.clone()))
        .collect();
    let customers: Vec<(String, String)> = lookups
        .customers
        .iter()
        .map(|c| (c.id.to_string(), c.name.clone()))
        .collect();
    let employees: Vec<(String, String)> = lookups
        .employees
        .iter()
        .map(|e| (e.id.to_string(), format!("{} ({})", e.name, e.position)))
        .collect();
    let statuses: Vec<(String, String)> = ClaimStatus::ALL
        .iter()
        .map(|s| (s.wire_value().to_string(), s.label().to_string()))
        .collect();
    let priorities: Vec<(String, String)> = Priority::ALL
        .iter()
        .map(|p| (p.label().to_string(), p.label().to_string()))
        .collect();

    ClaimField::ALL
        .iter()
        .map(|field| {
            let (name, label, value) = (field.name(), field.label(), initial.value(*field));
            match field {
                ClaimField::PolicyTypeId => FormInput::choice(name, label, &value, policy_types.clone()),
                ClaimField::CustomerId => FormInput::choice(name, label, &value, customers.clone()),
                ClaimField::EmployeeId => FormInput::choice(name, label, &value, employees.clone()),
                ClaimField::Metadata(MetadataField::Status) => FormInput::choice(name, label, &value, statuses.clone()),
                ClaimField::Metadata(MetadataField::Priority) => {
                    FormInput::choice(name, label, &value, priorities.clone())
                }
                _ if field.is_flag() => FormInput::flag(name, label, value == "true"),
                _ => FormInput::text(name, label, &value),
            }
        })
        .collect()
}

impl Component for ClaimFormPage {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        let Some(form) = self.form.as_mut() else {
            return match key.code {
                KeyCode::Esc => self.back(),
                _ => Action::None,
            };
        };
        match form.handle_key(key) {
            FormSignal::Submit => self.submit(),
            FormSignal::Cancel => self.back(),
            FormSignal::None => Action::None,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let title = self.title();
        if render_load_state(f, rect, &title, &self.state, ERROR_CLAIM_NOT_FOUND).is_none() {
            return;
        }
        if let Some(form) = &self.form {
            form.render(f, rect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customer, Employee, PolicyType};
    use crossterm::event::KeyModifiers;

    fn lookups() -> Lookups {
        Lookups {
            customers: vec![Customer {
                id: 3,
                name: "Ada".into(),
                email: "ada@example.com".into(),
                phone: String::new(),
                address: String::new(),
                city: String::new(),
            }],
            employees: vec![Employee {
                id: 7,
                name: "Grace".into(),
                position: "Adjuster".into(),
                department: "Claims".into(),
                years_of_experience: 4,
                hire_date: None,
            }],
            policy_types: vec![PolicyType {
                id: 1,
                name: "Auto".into(),
                base_premium: 500.0,
                description: String::new(),
            }],
        }
    }

    fn ctrl_s() -> KeyEvent {
        KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)
    }

    #[test]
    fn empty_form_reports_required_fields() {
        let mut page = ClaimFormPage::new(None);
        page.on_loaded(None, lookups());
        assert!(matches!(page.handle_key_events(ctrl_s()), Action::None));
        let form = page.form.as_ref().unwrap();
        assert!(form.errors().get("customer_id").is_some());
        assert!(form.errors().get("metadata.claimAmount").is_some());
        assert_eq!(form.focused_name(), Some("policy_type_id"));
    }

    #[test]
    fn filled_form_submits_create() {
        let mut page = ClaimFormPage::new(None);
        page.on_loaded(None, lookups());
        let form = page.form.as_mut().unwrap();
        for input in &mut form.inputs {
            match input.name.as_str() {
                "policy_type_id" => input.input.set("1"),
                "customer_id" => input.input.set("3"),
                "employee_id" => input.input.set("7"),
                "metadata.claimAmount" => input.input.set("1500.50"),
                _ => {}
            }
        }
        match page.handle_key_events(ctrl_s()) {
            Action::Submit(Submission::CreateClaim(payload)) => {
                assert_eq!(payload.customer_id, 3);
                assert_eq!(payload.metadata.claim_amount, 1500.5);
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn edit_without_policy_type_saves_unchanged() {
        let claim = Claim {
            id: 4,
            policy_number: "POL-004".into(),
            policy_type_id: None,
            customer_id: 3,
            customer_name: None,
            employee_id: 7,
            employee_name: None,
            status: ClaimStatus::Pending,
            priority: Priority::Low,
            amount: 250.0,
            incident_date: None,
            details: String::new(),
            documentation: Default::default(),
            created_at: None,
            updated_at: None,
        };
        let mut page = ClaimFormPage::new(Some(4));
        page.on_loaded(Some(claim), lookups());
        match page.handle_key_events(ctrl_s()) {
            Action::Submit(Submission::UpdateClaim { id, payload }) => {
                assert_eq!(id, 4);
                assert_eq!(payload.policy_type_id, 1);
                assert_eq!(payload.customer_id, 3);
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn missing_claim_is_not_found() {
        let mut page = ClaimFormPage::new(Some(9));
        page.on_failed(&BackendError::NotFound("claim 9".into()), "gone".into());
        assert_eq!(page.state, LoadState::NotFound);
        assert!(matches!(
            page.handle_key_events(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
            Action::Navigate(Route::ClaimDetail(9))
        ));
    }
}
