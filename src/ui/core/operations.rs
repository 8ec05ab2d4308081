//! Backend work behind each route and each form submission.
//!
//! These functions run inside tasks spawned by the [`TaskManager`]; they
//! never touch UI state and report through their return value only.
//!
//! [`TaskManager`]: super::TaskManager

use crate::auth::TokenStore;
use crate::backend::{
    BackendError, ChangePasswordRequest, ClaimPayload, ClaimsBackend, ClaimsQuery, CustomerPayload, EmployeePayload,
    ForgotPasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest,
};
use crate::constants::{
    SUCCESS_CLAIM_CREATED, SUCCESS_CLAIM_DELETED, SUCCESS_CLAIM_UPDATED, SUCCESS_CUSTOMER_CREATED,
    SUCCESS_EMPLOYEE_CREATED, SUCCESS_PASSWORD_CHANGED, SUCCESS_PASSWORD_RESET, SUCCESS_REGISTERED,
    SUCCESS_RESET_EMAIL_SENT, SUCCESS_SIGNED_IN,
};
use crate::routes::Route;

use super::actions::PageData;

/// Claims pulled for the dashboard and analytics figures.
pub const OVERVIEW_LIMIT: u32 = 100;

/// A validated write, ready to send.
#[derive(Debug, Clone)]
pub enum Submission {
    CreateClaim(ClaimPayload),
    UpdateClaim { id: i64, payload: ClaimPayload },
    DeleteClaim(i64),
    CreateCustomer(CustomerPayload),
    CreateEmployee(EmployeePayload),
    Login(LoginRequest),
    Register(RegisterRequest),
    ForgotPassword(ForgotPasswordRequest),
    ResetPassword(ResetPasswordRequest),
    ChangePassword(ChangePasswordRequest),
}

impl Submission {
    pub fn description(&self) -> String {
        match self {
            Submission::CreateClaim(payload) => format!("Create claim for customer {}", payload.customer_id),
            Submission::UpdateClaim { id, .. } => format!("Update claim {id}"),
            Submission::DeleteClaim(id) => format!("Delete claim {id}"),
            Submission::CreateCustomer(payload) => format!("Create customer '{}'", payload.name),
            Submission::CreateEmployee(payload) => format!("Create employee '{}'", payload.name),
            Submission::Login(request) => format!("Sign in as {}", request.email),
            Submission::Register(request) => format!("Register {}", request.email),
            Submission::ForgotPassword(_) => "Request password reset".to_string(),
            Submission::ResetPassword(_) => "Reset password".to_string(),
            Submission::ChangePassword(_) => "Change password".to_string(),
        }
    }
}

/// What a successful submission tells the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub message: String,
    pub next: Option<Route>,
}

impl Outcome {
    fn new(message: &str, next: Option<Route>) -> Self {
        Self {
            message: message.to_string(),
            next,
        }
    }
}

/// Whether visiting `route` triggers a backend load.
pub fn loads_data(route: &Route) -> bool {
    matches!(
        route,
        Route::Dashboard
            | Route::Claims
            | Route::ClaimDetail(_)
            | Route::NewClaim
            | Route::EditClaim(_)
            | Route::Customers
            | Route::Employees
            | Route::Analytics
            | Route::Profile
    )
}

/// Fetch everything `route` shows. `claims_query` is used by the claims list.
pub async fn load_page(
    backend: &dyn ClaimsBackend,
    route: &Route,
    claims_query: &ClaimsQuery,
) -> Result<Option<PageData>, BackendError> {
    let overview = ClaimsQuery::List {
        page: 1,
        limit: OVERVIEW_LIMIT,
        search: None,
    };

    let data = match route {
        Route::Dashboard => PageData::Dashboard(backend.fetch_claims(&overview).await?),
        Route::Analytics => PageData::Analytics(backend.fetch_claims(&overview).await?),
        Route::Claims => PageData::Claims(backend.fetch_claims(claims_query).await?),
        Route::ClaimDetail(id) => PageData::Claim(backend.fetch_claim(*id).await?),
        Route::NewClaim => PageData::ClaimForm {
            claim: None,
            lookups: backend.fetch_lookups().await?,
        },
        Route::EditClaim(id) => {
            let (claim, lookups) = tokio::try_join!(backend.fetch_claim(*id), backend.fetch_lookups())?;
            PageData::ClaimForm {
                claim: Some(claim),
                lookups,
            }
        }
        Route::Customers => PageData::Customers(backend.fetch_customers().await?),
        Route::Employees => PageData::Employees(backend.fetch_employees().await?),
        Route::Profile => PageData::Profile(backend.me().await?),
        _ => return Ok(None),
    };
    Ok(Some(data))
}

/// Send a submission. Login and registration store the returned token.
pub async fn submit(
    backend: &dyn ClaimsBackend,
    tokens: &TokenStore,
    submission: Submission,
) -> Result<Outcome, BackendError> {
    match submission {
        Submission::CreateClaim(payload) => {
            backend.create_claim(&payload).await?;
            Ok(Outcome::new(SUCCESS_CLAIM_CREATED, Some(Route::Claims)))
        }
        Submission::UpdateClaim { id, payload } => {
            backend.update_claim(id, &payload).await?;
            Ok(Outcome::new(SUCCESS_CLAIM_UPDATED, Some(Route::ClaimDetail(id))))
        }
        Submission::DeleteClaim(id) => {
            backend.delete_claim(id).await?;
            Ok(Outcome::new(SUCCESS_CLAIM_DELETED, Some(Route::Claims)))
        }
        Submission::CreateCustomer(payload) => {
            backend.create_customer(&payload).await?;
            Ok(Outcome::new(SUCCESS_CUSTOMER_CREATED, Some(Route::Customers)))
        }
        Submission::CreateEmployee(payload) => {
            backend.create_employee(&payload).await?;
            Ok(Outcome::new(SUCCESS_EMPLOYEE_CREATED, Some(Route::Employees)))
        }
        Submission::Login(request) => {
            let token = backend.login(&request).await?;
            store_token(tokens, &token);
            Ok(Outcome::new(SUCCESS_SIGNED_IN, Some(Route::Dashboard)))
        }
        Submission::Register(request) => {
            let token = backend.register(&request).await?;
            store_token(tokens, &token);
            Ok(Outcome::new(SUCCESS_REGISTERED, Some(Route::Dashboard)))
        }
        Submission::ForgotPassword(request) => {
            backend.forgot_password(&request).await?;
            Ok(Outcome::new(SUCCESS_RESET_EMAIL_SENT, None))
        }
        Submission::ResetPassword(request) => {
            backend.reset_password(&request).await?;
            Ok(Outcome::new(SUCCESS_PASSWORD_RESET, Some(Route::Login)))
        }
        Submission::ChangePassword(request) => {
            backend.change_password(&request).await?;
            Ok(Outcome::new(SUCCESS_PASSWORD_CHANGED, Some(Route::Profile)))
        }
    }
}

fn store_token(tokens: &TokenStore, token: &str) {
    // The in-memory token is set regardless; only persistence can fail.
    if let Err(e) = tokens.save(token) {
        log::error!("Could not persist token: {e:#}");
    }
}
