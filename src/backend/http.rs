//! reqwest implementation of [`ClaimsBackend`].

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use super::wire::{
    decode_all, ApiClaim, ApiEmployee, ApiPolicyType, CustomersEnvelope, DataEnvelope, ErrorBody, PagedEnvelope,
    TokenResponse,
};
use super::{
    BackendError, ChangePasswordRequest, ClaimPayload, ClaimsBackend, ClaimsQuery, CustomerPayload, EmployeePayload,
    ForgotPasswordRequest, LoginRequest, Page, RegisterRequest, ResetPasswordRequest,
};
use crate::auth::TokenStore;
use crate::models::{Claim, Customer, Employee, PolicyType, User};

/// Claims backend reached over HTTP.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    tokens: TokenStore,
}

impl HttpBackend {
    /// Create a backend for `base_url`, reading bearer tokens from `tokens`.
    pub fn new(base_url: &str, timeout: Duration, tokens: TokenStore) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match self.tokens.load() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, BackendError> {
        let response = builder.send().await.map_err(|e| BackendError::Network(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().path().to_string();
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(ErrorBody::into_message)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
        log::warn!("HTTP {} from {}: {}", status.as_u16(), url, message);

        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => BackendError::Auth(message),
            StatusCode::NOT_FOUND => BackendError::NotFound(url),
            _ => BackendError::Http {
                status: status.as_u16(),
                message,
            },
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, BackendError> {
        let response = self.send(builder).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| BackendError::InvalidData(e.to_string()))
    }

    async fn send_body<B: Serialize + ?Sized>(&self, method: Method, path: &str, body: &B) -> Result<Response, BackendError> {
        self.send(self.request(method, path).json(body)).await
    }
}

#[async_trait]
impl ClaimsBackend for HttpBackend {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_claims(&self, query: &ClaimsQuery) -> Result<Page<Claim>, BackendError> {
        let builder = self.request(Method::GET, query.path()).query(&query.params());
        let envelope: PagedEnvelope<ApiClaim> = self.get_json(builder).await?;
        log::info!(
            "Fetched {} claims (page {}/{}, total {})",
            envelope.data.len(),
            envelope.pagination.page,
            envelope.pagination.pages,
            envelope.pagination.total
        );
        Ok(Page {
            data: decode_all(envelope.data)?,
            pagination: envelope.pagination,
        })
    }

    async fn fetch_claim(&self, id: i64) -> Result<Claim, BackendError> {
        let api: ApiClaim = self.get_json(self.request(Method::GET, &format!("/claims/{id}"))).await?;
        Ok(Claim::try_from(api)?)
    }

    async fn create_claim(&self, payload: &ClaimPayload) -> Result<(), BackendError> {
        self.send_body(Method::POST, "/claims", payload).await?;
        Ok(())
    }

    async fn update_claim(&self, id: i64, payload: &ClaimPayload) -> Result<(), BackendError> {
        self.send_body(Method::PUT, &format!("/claims/{id}"), payload).await?;
        Ok(())
    }

    async fn delete_claim(&self, id: i64) -> Result<(), BackendError> {
        self.send(self.request(Method::DELETE, &format!("/claims/{id}"))).await?;
        Ok(())
    }

    async fn fetch_customers(&self) -> Result<Vec<Customer>, BackendError> {
        let envelope: CustomersEnvelope = self.get_json(self.request(Method::GET, "/customers")).await?;
        Ok(envelope.customers)
    }

    async fn create_customer(&self, payload: &CustomerPayload) -> Result<(), BackendError> {
        self.send_body(Method::POST, "/customers", payload).await?;
        Ok(())
    }

    async fn fetch_employees(&self) -> Result<Vec<Employee>, BackendError> {
        let employees: Vec<ApiEmployee> = self.get_json(self.request(Method::GET, "/employees")).await?;
        Ok(decode_all(employees)?)
    }

    async fn create_employee(&self, payload: &EmployeePayload) -> Result<(), BackendError> {
        self.send_body(Method::POST, "/employees", payload).await?;
        Ok(())
    }

    async fn fetch_policy_types(&self) -> Result<Vec<PolicyType>, BackendError> {
        let envelope: DataEnvelope<Vec<ApiPolicyType>> =
            self.get_json(self.request(Method::GET, "/policy-types")).await?;
        Ok(envelope.data.into_iter().map(PolicyType::from).collect())
    }

    async fn login(&self, request: &LoginRequest) -> Result<String, BackendError> {
        let response = self.send_body(Method::POST, "/auth/login", request).await?;
        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| BackendError::InvalidData(e.to_string()))?;
        Ok(body.token)
    }

    async fn register(&self, request: &RegisterRequest) -> Result<String, BackendError> {
        let response = self.send_body(Method::POST, "/auth/register", request).await?;
        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| BackendError::InvalidData(e.to_string()))?;
        Ok(body.token)
    }

    async fn me(&self) -> Result<User, BackendError> {
        self.get_json(self.request(Method::GET, "/auth/me")).await
    }

    async fn forgot_password(&self, request: &ForgotPasswordRequest) -> Result<(), BackendError> {
        self.send_body(Method::POST, "/auth/forgot-password", request).await?;
        Ok(())
    }

    async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<(), BackendError> {
        self.send_body(Method::POST, "/auth/reset-password", request).await?;
        Ok(())
    }

    async fn change_password(&self, request: &ChangePasswordRequest) -> Result<(), BackendError> {
        self.send_body(Method::POST, "/auth/change-password", request).await?;
        Ok(())
    }
}
