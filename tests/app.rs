//! End-to-end tests of the app component against an in-memory backend.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};

use claimdesk::auth::TokenStore;
use claimdesk::backend::{
    BackendError, ChangePasswordRequest, ClaimPayload, ClaimsBackend, ClaimsQuery, CustomerPayload, EmployeePayload,
    ForgotPasswordRequest, LoginRequest, Page, Pagination, RegisterRequest, ResetPasswordRequest,
};
use claimdesk::config::Config;
use claimdesk::logger::Logger;
use claimdesk::models::{Claim, ClaimStatus, Customer, Documentation, Employee, PolicyType, Priority, User};
use claimdesk::routes::Route;
use claimdesk::ui::core::{AppContext, Component, EventType, LoadState};
use claimdesk::ui::pages::Page as ScreenPage;
use claimdesk::ui::components::status_bar::NotificationLevel;
use claimdesk::ui::AppComponent;

#[derive(Default)]
struct FakeBackend {
    claims: Vec<Claim>,
    reject_token: bool,
    fail_delete: bool,
    fail_claims: bool,
    fail_policy_types: bool,
    deleted: Mutex<Vec<i64>>,
}

fn claim(id: i64, status: ClaimStatus) -> Claim {
    Claim {
        id,
        policy_number: format!("POL-{id:03}"),
        policy_type_id: Some(1),
        customer_id: 1,
        customer_name: Some("Ada Lovelace".to_string()),
        employee_id: 2,
        employee_name: Some("Grace Hopper".to_string()),
        status,
        priority: Priority::High,
        amount: 1200.0,
        incident_date: None,
        details: "Storm damage".to_string(),
        documentation: Documentation::default(),
        created_at: None,
        updated_at: None,
    }
}

#[async_trait]
impl ClaimsBackend for FakeBackend {
    fn base_url(&self) -> &str {
        "http://fake/api"
    }

    async fn fetch_claims(&self, query: &ClaimsQuery) -> Result<Page<Claim>, BackendError> {
        if self.fail_claims {
            return Err(BackendError::Http {
                status: 500,
                message: "down".to_string(),
            });
        }
        Ok(Page {
            data: self.claims.clone(),
            pagination: Pagination {
                total: self.claims.len() as u64,
                page: query.page(),
                pages: 1,
            },
        })
    }

    async fn fetch_claim(&self, id: i64) -> Result<Claim, BackendError> {
        self.claims
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| BackendError::NotFound(format!("/claims/{id}")))
    }

    async fn create_claim(&self, _payload: &ClaimPayload) -> Result<(), BackendError> {
        Ok(())
    }

    async fn update_claim(&self, _id: i64, _payload: &ClaimPayload) -> Result<(), BackendError> {
        Ok(())
    }

    async fn delete_claim(&self, id: i64) -> Result<(), BackendError> {
        if self.fail_delete {
            return Err(BackendError::Http {
                status: 500,
                message: "database unavailable".to_string(),
            });
        }
        self.deleted.lock().unwrap().push(id);
        Ok(())
    }

    async fn fetch_customers(&self) -> Result<Vec<Customer>, BackendError> {
        Ok(Vec::new())
    }

    async fn create_customer(&self, _payload: &CustomerPayload) -> Result<(), BackendError> {
        Ok(())
    }

    async fn fetch_employees(&self) -> Result<Vec<Employee>, BackendError> {
        Ok(Vec::new())
    }

    async fn create_employee(&self, _payload: &EmployeePayload) -> Result<(), BackendError> {
        Ok(())
    }

    async fn fetch_policy_types(&self) -> Result<Vec<PolicyType>, BackendError> {
        if self.fail_policy_types {
            return Err(BackendError::Http {
                status: 500,
                message: "policy types unavailable".to_string(),
            });
        }
        Ok(vec![PolicyType {
            id: 1,
            name: "Home".to_string(),
            base_premium: 120.0,
            description: String::new(),
        }])
    }

    async fn login(&self, request: &LoginRequest) -> Result<String, BackendError> {
        if request.password == "hunter22" {
            Ok("tok-login".to_string())
        } else {
            Err(BackendError::Auth("Invalid credentials".to_string()))
        }
    }

    async fn register(&self, _request: &RegisterRequest) -> Result<String, BackendError> {
        Ok("tok-register".to_string())
    }

    async fn me(&self) -> Result<User, BackendError> {
        if self.reject_token {
            return Err(BackendError::Auth("Token expired".to_string()));
        }
        Ok(User {
            id: 1,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            role: None,
        })
    }

    async fn forgot_password(&self, _request: &ForgotPasswordRequest) -> Result<(), BackendError> {
        Ok(())
    }

    async fn reset_password(&self, _request: &ResetPasswordRequest) -> Result<(), BackendError> {
        Ok(())
    }

    async fn change_password(&self, _request: &ChangePasswordRequest) -> Result<(), BackendError> {
        Ok(())
    }
}

fn app_with(backend: Arc<FakeBackend>, token: Option<&str>) -> (AppComponent, TokenStore) {
    let tokens = TokenStore::in_memory();
    if let Some(token) = token {
        tokens.save(token).unwrap();
    }
    let ctx = AppContext::new(backend, tokens.clone(), Config::default(), Logger::new());
    (AppComponent::new(ctx), tokens)
}

/// Let background tasks finish and feed their results back.
async fn settle(app: &mut AppComponent) {
    for _ in 0..200 {
        let changed = app.on_tick();
        if !changed && !app.is_busy() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("background work did not settle");
}

fn key(code: KeyCode) -> EventType {
    EventType::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn type_text(app: &mut AppComponent, text: &str) {
    for c in text.chars() {
        app.handle_event(key(KeyCode::Char(c)));
    }
}

fn render(app: &mut AppComponent) -> String {
    let mut terminal = Terminal::new(TestBackend::new(160, 40)).unwrap();
    terminal.draw(|f| app.render(f, f.area())).unwrap();
    let buffer = terminal.backend().buffer().clone();
    buffer.content.iter().map(|cell| cell.symbol()).collect()
}

#[tokio::test]
async fn test_protected_start_route_redirects_to_login() {
    let (mut app, _) = app_with(Arc::new(FakeBackend::default()), None);
    app.start(Route::Claims);
    assert_eq!(app.route(), &Route::Login);

    let screen = render(&mut app);
    assert!(screen.contains("Sign in"));
}

#[tokio::test]
async fn test_claims_page_renders_loaded_rows() {
    let backend = Arc::new(FakeBackend {
        claims: vec![claim(1, ClaimStatus::Pending), claim(2, ClaimStatus::InReview)],
        ..Default::default()
    });
    let (mut app, _) = app_with(backend, Some("tok"));
    app.start(Route::Claims);
    settle(&mut app).await;

    match app.page() {
        ScreenPage::Claims(page) => assert_eq!(page.list.claims.len(), 2),
        _ => panic!("expected the claims page"),
    }
    let screen = render(&mut app);
    assert!(screen.contains("POL-001"));
    assert!(screen.contains("POL-002"));
}

#[tokio::test]
async fn test_missing_claim_shows_not_found() {
    let (mut app, _) = app_with(Arc::new(FakeBackend::default()), Some("tok"));
    app.start(Route::ClaimDetail(99));
    settle(&mut app).await;

    match app.page() {
        ScreenPage::ClaimDetail(page) => assert!(matches!(page.state, LoadState::NotFound)),
        _ => panic!("expected the claim detail page"),
    }
}

#[tokio::test]
async fn test_rejected_token_on_profile_signs_out() {
    let backend = Arc::new(FakeBackend {
        reject_token: true,
        ..Default::default()
    });
    let (mut app, tokens) = app_with(backend, Some("stale"));
    app.start(Route::Profile);
    settle(&mut app).await;

    assert_eq!(app.route(), &Route::Login);
    assert!(!tokens.is_authenticated());
}

#[tokio::test]
async fn test_login_stores_token_and_opens_dashboard() {
    let (mut app, tokens) = app_with(Arc::new(FakeBackend::default()), None);
    app.start(Route::Login);

    type_text(&mut app, "ada@example.com");
    app.handle_event(key(KeyCode::Enter));
    type_text(&mut app, "hunter22");
    app.handle_event(key(KeyCode::Enter));
    settle(&mut app).await;

    assert_eq!(tokens.load().as_deref(), Some("tok-login"));
    assert_eq!(app.route(), &Route::Dashboard);
}

#[tokio::test]
async fn test_delete_confirmation_deletes_and_returns_to_list() {
    let backend = Arc::new(FakeBackend {
        claims: vec![claim(7, ClaimStatus::Pending)],
        ..Default::default()
    });
    let (mut app, _) = app_with(backend.clone(), Some("tok"));
    app.start(Route::ClaimDetail(7));
    settle(&mut app).await;

    app.handle_event(key(KeyCode::Char('d')));
    assert!(render(&mut app).contains("Are you sure"));
    app.handle_event(key(KeyCode::Char('y')));
    settle(&mut app).await;

    assert_eq!(*backend.deleted.lock().unwrap(), vec![7]);
    assert_eq!(app.route(), &Route::Claims);
}

#[tokio::test]
async fn test_failed_delete_shows_error_dialog() {
    let backend = Arc::new(FakeBackend {
        claims: vec![claim(7, ClaimStatus::Pending)],
        fail_delete: true,
        ..Default::default()
    });
    let (mut app, _) = app_with(backend.clone(), Some("tok"));
    app.start(Route::ClaimDetail(7));
    settle(&mut app).await;

    app.handle_event(key(KeyCode::Char('d')));
    app.handle_event(key(KeyCode::Char('y')));
    settle(&mut app).await;

    assert!(backend.deleted.lock().unwrap().is_empty());
    assert_eq!(app.route(), &Route::ClaimDetail(7));
    assert!(render(&mut app).contains("Failed to delete"));
}

#[tokio::test]
async fn test_failed_claims_load_raises_error_notification() {
    let backend = Arc::new(FakeBackend {
        fail_claims: true,
        ..Default::default()
    });
    let (mut app, _) = app_with(backend, Some("tok"));
    app.start(Route::Claims);
    settle(&mut app).await;

    let notification = app.status_bar().current().expect("an error notification");
    assert_eq!(notification.level, NotificationLevel::Error);
    assert!(notification.message.contains("Failed to fetch"));
    assert!(notification.message.contains("down"));
    match app.page() {
        ScreenPage::Claims(page) => assert!(page.list.error.is_some()),
        _ => panic!("expected the claims page"),
    }
}

#[tokio::test]
async fn test_new_claim_with_failed_lookup_has_no_form() {
    let backend = Arc::new(FakeBackend {
        fail_policy_types: true,
        ..Default::default()
    });
    let (mut app, _) = app_with(backend, Some("tok"));
    app.start(Route::NewClaim);
    settle(&mut app).await;

    match app.page() {
        ScreenPage::ClaimForm(page) => {
            assert!(matches!(page.state, LoadState::Failed(_)));
            assert!(page.form.is_none());
        }
        _ => panic!("expected the claim form page"),
    }
    assert!(app.status_bar().current().is_some());
}

#[tokio::test]
async fn test_quit_keys() {
    let (mut app, _) = app_with(Arc::new(FakeBackend::default()), Some("tok"));
    app.start(Route::Settings);
    app.handle_event(key(KeyCode::Char('q')));
    assert!(app.should_quit());

    let (mut app, _) = app_with(Arc::new(FakeBackend::default()), None);
    app.start(Route::Login);
    // The login form keeps plain keys, Ctrl+C still quits
    app.handle_event(key(KeyCode::Char('q')));
    assert!(!app.should_quit());
    app.handle_event(EventType::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    assert!(app.should_quit());
}

#[tokio::test]
async fn test_every_page_renders() {
    let backend = Arc::new(FakeBackend {
        claims: vec![claim(1, ClaimStatus::Approved)],
        ..Default::default()
    });
    let routes = [
        Route::Dashboard,
        Route::Claims,
        Route::ClaimDetail(1),
        Route::NewClaim,
        Route::EditClaim(1),
        Route::Customers,
        Route::Employees,
        Route::Analytics,
        Route::Profile,
        Route::Settings,
        Route::Help,
        Route::ChangePassword,
        Route::NotFound("/nowhere".to_string()),
    ];
    for route in routes {
        let (mut app, _) = app_with(backend.clone(), Some("tok"));
        app.start(route.clone());
        settle(&mut app).await;
        assert_eq!(app.route(), &route);
        let screen = render(&mut app);
        assert!(!screen.trim().is_empty(), "{route} rendered nothing");
    }
}
