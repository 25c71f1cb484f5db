//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use adhikar_core::config::AppConfig;
use adhikar_database::Stores;

/// Password used for every account created through the helpers.
pub const PASSWORD: &str = "password123";

/// Test application context
#[derive(Clone)]
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application with the default transition policy
    pub async fn new() -> Self {
        Self::with_policy("strict").await
    }

    /// Create a new test application with the given transition policy
    pub async fn with_policy(policy: &str) -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "integration-test-secret".to_string();
        config.workflow.transition_policy = policy.to_string();

        let router = adhikar_api::build_app(config.clone(), Stores::memory())
            .expect("Failed to build app");

        Self { router, config }
    }

    /// Register an account through the API and return its token and id
    pub async fn register(&self, username: &str, role: &str) -> (String, String) {
        let body = json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": PASSWORD,
            "full_name": format!("{username} Test"),
            "role": role,
            "specialization": "Property law",
        });

        let response = self
            .request("POST", "/api/auth/register", Some(body), None)
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Register failed: {:?}",
            response.body
        );

        (response.token(), response.data_str("user", "id"))
    }

    /// Login and return the bearer token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let body = json!({
            "username": username,
            "password": password,
        });

        let response = self
            .request("POST", "/api/auth/login", Some(body), None)
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.token()
    }

    /// Submit a consultation as the given citizen and return its id
    pub async fn submit(&self, token: &str, title: &str) -> String {
        let body = json!({
            "title": title,
            "question": "My landlord refuses to return the deposit.",
            "category": "property_dispute",
        });

        let response = self
            .request("POST", "/api/consultations", Some(body), Some(token))
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Submit failed: {:?}",
            response.body
        );

        response.body["data"]["id"]
            .as_str()
            .expect("No consultation id in response")
            .to_string()
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The envelope's `message` field
    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }

    /// The issued bearer token in an auth response
    pub fn token(&self) -> String {
        self.body["data"]["token"]
            .as_str()
            .expect("No token in auth response")
            .to_string()
    }

    /// A nested string under `data`
    pub fn data_str(&self, outer: &str, inner: &str) -> String {
        self.body["data"][outer][inner]
            .as_str()
            .unwrap_or_else(|| panic!("No data.{outer}.{inner} in {:?}", self.body))
            .to_string()
    }
}
