#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use turnstile::router::init_router;
use turnstile::state::AppState;
use turnstile_config::SessionConfig;
use turnstile_core::hash_password;
use turnstile_db::{MemoryUserStore, UserStore};
use turnstile_models::{NewUser, User, UserRole};
use uuid::Uuid;

pub const TEST_SECRET: &str = "test-secret-key-at-least-32-characters-long";

pub fn session_config() -> SessionConfig {
    SessionConfig {
        secret: TEST_SECRET.to_string(),
        ..SessionConfig::default()
    }
}

pub fn test_state(store: Arc<dyn UserStore>) -> AppState {
    AppState::with_store(store, session_config())
}

pub fn setup_test_app(store: Arc<MemoryUserStore>) -> Router {
    init_router(test_state(store), None)
}

/// Inserts a user with a real bcrypt hash of `password`.
pub async fn create_test_user(
    store: &dyn UserStore,
    username: &str,
    password: &str,
    role: UserRole,
) -> User {
    store
        .create(NewUser {
            username: username.to_string(),
            password_hash: hash_password(password).unwrap(),
            role,
        })
        .await
        .unwrap()
}

pub fn generate_unique_username() -> String {
    format!("user_{}", &Uuid::new_v4().simple().to_string()[..12])
}

pub fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

pub fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// `name=value` pair of the `Set-Cookie` header, ready for a `Cookie` header.
pub fn cookie_pair(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}

pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get("location")
        .and_then(|value| value.to_str().ok())
}

/// Logs in through the HTTP API and returns the session cookie pair.
pub async fn login_cookie(app: &Router, username: &str, password: &str) -> String {
    let response = send(
        app,
        json_request(
            "/api/auth/login",
            json!({ "username": username, "password": password }),
        ),
    )
    .await;
    cookie_pair(&response).expect("login sets the session cookie")
}
