//! HTTP client tests against a local axum stub of the claims API.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use claimdesk::auth::TokenStore;
use claimdesk::backend::http::HttpBackend;
use claimdesk::backend::{BackendError, ClaimsBackend, ClaimsQuery, LoginRequest, SearchCriteria};
use claimdesk::forms::claim_form::ClaimForm;
use claimdesk::models::{ClaimStatus, Priority};

#[derive(Clone, Default)]
struct Recorded {
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
    bodies: Arc<Mutex<Vec<Value>>>,
    auth: Arc<Mutex<Vec<Option<String>>>>,
}

fn claim_json(id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "policy_number": format!("POL-{id}"),
        "policy_type_id": 2,
        "customer_id": 3,
        "employee_id": 4,
        "customer_name": "Ada Lovelace",
        "employee_name": "Grace Hopper",
        "metadata": {
            "status": status,
            "priority": "High",
            "claimAmount": "150.5",
            "incidentDate": "2024-03-01",
            "details": "Burst pipe",
            "documentation": { "photoEvidence": true }
        },
        "created_at": "2024-03-02T10:00:00Z"
    })
}

async fn list_claims(
    State(rec): State<Recorded>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    rec.auth.lock().unwrap().push(auth);
    rec.queries.lock().unwrap().push(params);
    Json(json!({
        "data": [claim_json(1, "\"Completed\""), claim_json(2, "inReview")],
        "pagination": { "total": 8, "page": 1, "pages": 2 }
    }))
}

async fn search_claims(State(rec): State<Recorded>, Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    rec.queries.lock().unwrap().push(params);
    Json(json!({
        "data": [claim_json(5, "APPROVED")],
        "pagination": { "total": 1, "page": 1, "pages": 1 }
    }))
}

async fn get_claim(Path(id): Path<i64>) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match id {
        1 => Ok(Json(claim_json(1, "pending"))),
        2 => Ok(Json(claim_json(2, "archived"))),
        _ => Err((StatusCode::NOT_FOUND, Json(json!({ "message": "Claim not found" })))),
    }
}

async fn put_claim(State(rec): State<Recorded>, Json(body): Json<Value>) -> Json<Value> {
    rec.bodies.lock().unwrap().push(body);
    Json(json!({ "message": "updated" }))
}

async fn customers() -> Json<Value> {
    Json(json!({
        "customers": [
            { "customer_id": 3, "name": "Ada Lovelace", "email": "ada@example.com", "phone": "555-0100", "city": "London" }
        ]
    }))
}

async fn employees() -> Json<Value> {
    Json(json!([
        { "id": 4, "name": "Grace Hopper", "position": "Adjuster", "department": "Claims", "years_of_experience": "12" }
    ]))
}

async fn policy_types() -> Json<Value> {
    Json(json!({ "data": [ { "id": 2, "name": "Home", "base_premium": "120.00" } ] }))
}

async fn login(Json(body): Json<Value>) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if body["password"] == "secret" {
        Ok(Json(json!({ "token": "tok-123" })))
    } else {
        Err((StatusCode::UNAUTHORIZED, Json(json!({ "error": "Invalid credentials" }))))
    }
}

async fn me() -> (StatusCode, Json<Value>) {
    (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Token expired" })))
}

async fn delete_claim() -> (StatusCode, Json<Value>) {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "message": "database unavailable" })))
}

async fn policy_types_down() -> (StatusCode, Json<Value>) {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "message": "policy types unavailable" })))
}

/// Every route except the policy type registry.
fn router() -> Router<Recorded> {
    Router::new()
        .route("/api/claims", get(list_claims))
        .route("/api/claims/search_claims", get(search_claims))
        .route("/api/claims/{id}", get(get_claim).put(put_claim).delete(delete_claim))
        .route("/api/customers", get(customers))
        .route("/api/employees", get(employees))
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(me))
}

/// Serve the stub on an ephemeral port and return its API base URL.
async fn spawn_stub(rec: Recorded) -> String {
    serve(router().route("/api/policy-types", get(policy_types)).with_state(rec)).await
}

/// Same stub, but the policy type registry answers 500.
async fn spawn_stub_without_policy_types(rec: Recorded) -> String {
    serve(router().route("/api/policy-types", get(policy_types_down)).with_state(rec)).await
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}

fn backend(base_url: &str, tokens: TokenStore) -> HttpBackend {
    HttpBackend::new(base_url, Duration::from_secs(5), tokens).unwrap()
}

#[tokio::test]
async fn test_fetch_claims_sends_paging_and_bearer_token() {
    let rec = Recorded::default();
    let url = spawn_stub(rec.clone()).await;
    let tokens = TokenStore::in_memory();
    tokens.save("tok-abc").unwrap();
    let backend = backend(&url, tokens);

    let page = backend
        .fetch_claims(&ClaimsQuery::List {
            page: 1,
            limit: 6,
            search: Some("POL".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[0].status, ClaimStatus::Completed);
    assert_eq!(page.data[1].status, ClaimStatus::InReview);
    assert_eq!(page.data[0].amount, 150.5);
    assert_eq!(page.data[0].priority, Priority::High);
    assert_eq!(page.pagination.pages, 2);

    let queries = rec.queries.lock().unwrap();
    assert_eq!(queries[0].get("page").map(String::as_str), Some("1"));
    assert_eq!(queries[0].get("limit").map(String::as_str), Some("6"));
    assert_eq!(queries[0].get("search").map(String::as_str), Some("POL"));
    assert_eq!(rec.auth.lock().unwrap()[0].as_deref(), Some("Bearer tok-abc"));
}

#[tokio::test]
async fn test_requests_without_token_carry_no_authorization() {
    let rec = Recorded::default();
    let url = spawn_stub(rec.clone()).await;
    let backend = backend(&url, TokenStore::in_memory());

    backend.fetch_claims(&ClaimsQuery::default()).await.unwrap();
    assert_eq!(rec.auth.lock().unwrap()[0], None);
}

#[tokio::test]
async fn test_search_uses_search_endpoint() {
    let rec = Recorded::default();
    let url = spawn_stub(rec.clone()).await;
    let backend = backend(&url, TokenStore::in_memory());

    let query = ClaimsQuery::Search {
        criteria: SearchCriteria {
            status: Some(ClaimStatus::Approved),
            ..Default::default()
        },
        page: 1,
        limit: 6,
    };
    let page = backend.fetch_claims(&query).await.unwrap();
    assert_eq!(page.data[0].id, 5);
    assert_eq!(page.data[0].status, ClaimStatus::Approved);

    let queries = rec.queries.lock().unwrap();
    assert_eq!(queries[0].get("status").map(String::as_str), Some("APPROVED"));
    assert!(!queries[0].contains_key("policyNumber"));
}

#[tokio::test]
async fn test_update_claim_sends_typed_body() {
    let rec = Recorded::default();
    let url = spawn_stub(rec.clone()).await;
    let backend = backend(&url, TokenStore::in_memory());

    let claim = backend.fetch_claim(1).await.unwrap();
    let payload = ClaimForm::from_claim(&claim)
        .update_path("metadata.status", "approved")
        .and_then(|form| form.update_path("metadata.claimAmount", "150.5"))
        .unwrap()
        .to_payload()
        .unwrap();
    backend.update_claim(1, &payload).await.unwrap();

    let bodies = rec.bodies.lock().unwrap();
    let body = &bodies[0];
    assert_eq!(body["customer_id"], json!(3));
    assert_eq!(body["employee_id"], json!(4));
    assert_eq!(body["policy_type_id"], json!(2));
    assert_eq!(body["metadata"]["claimAmount"], json!(150.5));
    assert_eq!(body["metadata"]["status"], json!("approved"));
    assert_eq!(body["metadata"]["priority"], json!("High"));
    assert_eq!(body["metadata"]["incidentDate"], json!("2024-03-01"));
    assert_eq!(body["metadata"]["documentation"]["photoEvidence"], json!(true));
}

#[tokio::test]
async fn test_error_statuses_map_to_backend_errors() {
    let url = spawn_stub(Recorded::default()).await;
    let backend = backend(&url, TokenStore::in_memory());

    let missing = backend.fetch_claim(99).await.unwrap_err();
    assert!(missing.is_not_found());

    let expired = backend.me().await.unwrap_err();
    assert!(matches!(expired, BackendError::Auth(ref msg) if msg == "Token expired"));
    assert_eq!(expired.status(), Some(401));

    match backend.delete_claim(1).await.unwrap_err() {
        BackendError::Http { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "database unavailable");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_unknown_status_is_invalid_data() {
    let url = spawn_stub(Recorded::default()).await;
    let backend = backend(&url, TokenStore::in_memory());

    let err = backend.fetch_claim(2).await.unwrap_err();
    assert!(matches!(err, BackendError::InvalidData(ref msg) if msg.contains("archived")));
}

#[tokio::test]
async fn test_login_returns_token_or_auth_error() {
    let url = spawn_stub(Recorded::default()).await;
    let backend = backend(&url, TokenStore::in_memory());

    let token = backend
        .login(&LoginRequest {
            email: "ada@example.com".to_string(),
            password: "secret".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(token, "tok-123");

    let err = backend
        .login(&LoginRequest {
            email: "ada@example.com".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, BackendError::Auth(ref msg) if msg == "Invalid credentials"));
}

#[tokio::test]
async fn test_fetch_lookups_decodes_all_three_registries() {
    let url = spawn_stub(Recorded::default()).await;
    let backend = backend(&url, TokenStore::in_memory());

    let lookups = backend.fetch_lookups().await.unwrap();
    assert_eq!(lookups.customers[0].id, 3);
    assert_eq!(lookups.customers[0].city, "London");
    assert_eq!(lookups.employees[0].years_of_experience, 12);
    assert_eq!(lookups.policy_types[0].name, "Home");
    assert_eq!(lookups.policy_types[0].base_premium, 120.0);
}

#[tokio::test]
async fn test_fetch_lookups_fails_when_one_registry_fails() {
    let url = spawn_stub_without_policy_types(Recorded::default()).await;
    let backend = backend(&url, TokenStore::in_memory());

    // Customers and employees still answer on their own
    assert_eq!(backend.fetch_customers().await.unwrap().len(), 1);
    match backend.fetch_lookups().await.unwrap_err() {
        BackendError::Http { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "policy types unavailable");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let backend = backend("http://127.0.0.1:1/api", TokenStore::in_memory());
    let err = backend.fetch_claims(&ClaimsQuery::default()).await.unwrap_err();
    assert!(matches!(err, BackendError::Network(_)));
    assert_eq!(err.status(), None);
}
