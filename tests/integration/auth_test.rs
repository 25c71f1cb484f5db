//! Integration tests for the auth endpoints.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_init_creates_admin_once() {
    let app = TestApp::new().await;
    let body = json!({ "username": "root", "password": "supersecret" });

    let first = app
        .request("POST", "/api/auth/init", Some(body.clone()), None)
        .await;
    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(first.message(), "Admin user created successfully");
    assert_eq!(first.body["data"]["user"]["role"], "admin");

    let second = app
        .request("POST", "/api/auth/init", Some(body), None)
        .await;
    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert_eq!(second.message(), "Admin user already initialized");
}

#[tokio::test]
async fn test_init_refused_after_public_registration() {
    let app = TestApp::new().await;
    app.register("asha", "user").await;

    let response = app
        .request(
            "POST",
            "/api/auth/init",
            Some(json!({ "username": "root", "password": "supersecret" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_user_and_lawyer() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "username": "ravi",
                "email": "ravi@example.com",
                "password": PASSWORD,
                "fullName": "Ravi Kumar",
                "role": "lawyer",
                "specialization": "Labour law",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.message(), "Lawyer registered successfully");
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["user"]["specialization"], "Labour law");
    assert!(response.body["data"]["user"].get("password_hash").is_none());

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "username": "meena",
                "email": "meena@example.com",
                "password": PASSWORD,
                "full_name": "Meena Shah",
                "role": "user",
                "specialization": "ignored",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.message(), "User registered successfully");
    assert!(response.body["data"]["user"]["specialization"].is_null());
}

#[tokio::test]
async fn test_register_rejects_admin_role() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "username": "sneaky",
                "email": "sneaky@example.com",
                "password": PASSWORD,
                "full_name": "Sneaky",
                "role": "admin",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), r#"Role must be either "user" or "lawyer""#);
}

#[tokio::test]
async fn test_register_missing_fields() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "username": "half", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Please provide all required fields");
}

#[tokio::test]
async fn test_register_duplicate_is_case_insensitive() {
    let app = TestApp::new().await;
    app.register("asha", "user").await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "username": "ASHA",
                "email": "other@example.com",
                "password": PASSWORD,
                "full_name": "Asha Again",
                "role": "user",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Username or email already exists");
}

#[tokio::test]
async fn test_login_success_and_failure() {
    let app = TestApp::new().await;
    app.register("asha", "user").await;

    let token = app.login("Asha", PASSWORD).await;
    assert!(!token.is_empty());

    let wrong = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "asha", "password": "not-the-password" })),
            None,
        )
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.message(), "Invalid username or password");

    let unknown = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "nobody", "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.message(), wrong.message());

    let empty = app
        .request("POST", "/api/auth/login", Some(json!({})), None)
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
    assert_eq!(empty.message(), "Please provide username and password");
}

#[tokio::test]
async fn test_me_requires_valid_token() {
    let app = TestApp::new().await;
    let (token, user_id) = app.register("asha", "user").await;

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["id"], user_id.as_str());
    assert_eq!(response.body["data"]["username"], "asha");

    let missing = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.message(), "Not authorized to access this route");

    let garbage = app
        .request("GET", "/api/auth/me", None, Some("not-a-jwt"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_from_other_deployment_is_rejected() {
    let app = TestApp::new().await;
    let other = TestApp::new().await;
    let (token, _) = app.register("asha", "user").await;

    // Same secret, different store: the account does not exist there.
    let response = other
        .request("GET", "/api/auth/me", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.message(), "User not found");
}

#[tokio::test]
async fn test_logout() {
    let app = TestApp::new().await;
    let (token, _) = app.register("asha", "user").await;

    let response = app
        .request("POST", "/api/auth/logout", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message(), "User logged out successfully");
    assert!(response.body["data"].is_null());
}

#[tokio::test]
async fn test_unknown_fields_are_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "a", "password": "b", "role": "admin" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], false);
}

#[tokio::test]
async fn test_health_root_and_fallback() {
    let app = TestApp::new().await;

    let health = app.request("GET", "/api/health", None, None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["data"]["status"], "ok");
    assert_eq!(health.body["data"]["store"], "memory");

    let root = app.request("GET", "/", None, None).await;
    assert_eq!(root.status, StatusCode::OK);
    assert_eq!(
        root.message(),
        format!("Server is running on port {}", app.config.server.port)
    );

    let missing = app.request("GET", "/api/nowhere", None, None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.message(), "Route not found");
}
