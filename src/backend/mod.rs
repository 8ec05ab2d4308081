//! HTTP client layer for the claims REST backend.
//!
//! This module defines the interface every page talks to, the request
//! payloads the forms produce, and the error taxonomy of backend calls.
//! [`http::HttpBackend`] is the reqwest implementation.

use async_trait::async_trait;
use serde::Serialize;

use crate::models::{Claim, Customer, Employee, PolicyType, User};

pub mod http;
pub mod query;
pub mod wire;

pub use query::{ClaimsQuery, SearchCriteria};
pub use wire::{DecodeError, Pagination};

/// Common error types for backend operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BackendError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Request failed with status {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl BackendError {
    /// HTTP status behind the error, when there was a response at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Auth(_) => Some(401),
            BackendError::NotFound(_) => Some(404),
            BackendError::Http { status, .. } => Some(*status),
            BackendError::Network(_) | BackendError::InvalidData(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, BackendError::NotFound(_))
    }
}

impl From<DecodeError> for BackendError {
    fn from(err: DecodeError) -> Self {
        BackendError::InvalidData(err.to_string())
    }
}

/// One page of results plus the server's pagination metadata.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

/// Customers, employees and policy types needed by the claim form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Lookups {
    pub customers: Vec<Customer>,
    pub employees: Vec<Employee>,
    pub policy_types: Vec<PolicyType>,
}

/// Body of `POST /claims` and `PUT /claims/:id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaimPayload {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub policy_number: String,
    pub policy_type_id: i64,
    pub customer_id: i64,
    pub employee_id: i64,
    pub metadata: ClaimMetadataPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimMetadataPayload {
    pub status: crate::models::ClaimStatus,
    pub priority: crate::models::Priority,
    pub claim_amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incident_date: Option<String>,
    pub details: String,
    pub documentation: crate::models::Documentation,
}

/// Body of `POST /customers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub address: String,
    pub city: String,
}

/// Body of `POST /employees`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeePayload {
    pub name: String,
    pub position: String,
    pub department: String,
    pub years_of_experience: u32,
    pub hire_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Interface to the claims REST backend.
///
/// Every method is one HTTP round-trip. Implementations attach the stored
/// bearer token when one is present and never retry.
#[async_trait]
pub trait ClaimsBackend: Send + Sync {
    /// Base URL requests are issued against.
    fn base_url(&self) -> &str;

    // Claims
    async fn fetch_claims(&self, query: &ClaimsQuery) -> Result<Page<Claim>, BackendError>;
    async fn fetch_claim(&self, id: i64) -> Result<Claim, BackendError>;
    async fn create_claim(&self, payload: &ClaimPayload) -> Result<(), BackendError>;
    async fn update_claim(&self, id: i64, payload: &ClaimPayload) -> Result<(), BackendError>;
    async fn delete_claim(&self, id: i64) -> Result<(), BackendError>;

    // Registries
    async fn fetch_customers(&self) -> Result<Vec<Customer>, BackendError>;
    async fn create_customer(&self, payload: &CustomerPayload) -> Result<(), BackendError>;
    async fn fetch_employees(&self) -> Result<Vec<Employee>, BackendError>;
    async fn create_employee(&self, payload: &EmployeePayload) -> Result<(), BackendError>;
    async fn fetch_policy_types(&self) -> Result<Vec<PolicyType>, BackendError>;

    // Authentication
    async fn login(&self, request: &LoginRequest) -> Result<String, BackendError>;
    async fn register(&self, request: &RegisterRequest) -> Result<String, BackendError>;
    async fn me(&self) -> Result<User, BackendError>;
    async fn forgot_password(&self, request: &ForgotPasswordRequest) -> Result<(), BackendError>;
    async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<(), BackendError>;
    async fn change_password(&self, request: &ChangePasswordRequest) -> Result<(), BackendError>;

    /// Load the claim form's lookups concurrently; any failure fails all.
    async fn fetch_lookups(&self) -> Result<Lookups, BackendError> {
        let (customers, employees, policy_types) = tokio::try_join!(
            self.fetch_customers(),
            self.fetch_employees(),
            self.fetch_policy_types()
        )?;
        Ok(Lookups {
            customers,
            employees,
            policy_types,
        })
    }
}
