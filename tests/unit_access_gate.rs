mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{
    TEST_SECRET, body_json, create_test_user, get_request, json_request, location, login_cookie,
    send, setup_test_app,
};
use serde_json::json;
use turnstile::router::init_router;
use turnstile::state::AppState;
use turnstile_config::{CorsConfig, RegistrationConfig, RouteConfig, SessionConfig};
use turnstile_db::MemoryUserStore;
use turnstile_models::{User, UserRole};

async fn app_with_user() -> (axum::Router, Arc<MemoryUserStore>, User, String) {
    let store = Arc::new(MemoryUserStore::new());
    let user = create_test_user(store.as_ref(), "alice123", "hunter22", UserRole::User).await;
    let app = setup_test_app(store.clone());
    let cookie = login_cookie(&app, "alice123", "hunter22").await;
    (app, store, user, cookie)
}

#[tokio::test]
async fn test_protected_page_redirects_to_login_without_session() {
    let app = setup_test_app(Arc::new(MemoryUserStore::new()));

    let response = send(&app, get_request("/app", None)).await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), Some("/login"));
}

#[tokio::test]
async fn test_unknown_paths_are_protected() {
    let (app, _, _, cookie) = app_with_user().await;

    let anonymous = send(&app, get_request("/dashboard", None)).await;
    assert_eq!(anonymous.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&anonymous), Some("/login"));

    let signed_in = send(&app, get_request("/dashboard", Some(&cookie))).await;
    assert_eq!(signed_in.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_public_routes_open_to_everyone() {
    let (app, _, _, cookie) = app_with_user().await;

    for cookie in [None, Some(cookie.as_str())] {
        let landing = send(&app, get_request("/", cookie)).await;
        assert_eq!(landing.status(), StatusCode::OK);

        let health = send(&app, get_request("/health", cookie)).await;
        assert_eq!(health.status(), StatusCode::OK);
        assert_eq!(body_json(health).await, json!({ "status": "ok" }));

        // Public but unrouted: reaches the fallback instead of redirecting.
        let api_root = send(&app, get_request("/api", cookie)).await;
        assert_eq!(api_root.status(), StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn test_public_match_is_exact() {
    let app = setup_test_app(Arc::new(MemoryUserStore::new()));

    let response = send(&app, get_request("/health/details", None)).await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), Some("/login"));
}

#[tokio::test]
async fn test_auth_routes_redirect_signed_in_users_to_app() {
    let (app, _, _, cookie) = app_with_user().await;

    for path in ["/login", "/register", "/error/auth"] {
        let anonymous = send(&app, get_request(path, None)).await;
        assert_eq!(anonymous.status(), StatusCode::OK, "{path}");

        let signed_in = send(&app, get_request(path, Some(&cookie))).await;
        assert_eq!(signed_in.status(), StatusCode::TEMPORARY_REDIRECT, "{path}");
        assert_eq!(location(&signed_in), Some("/app"), "{path}");
    }
}

#[tokio::test]
async fn test_api_auth_endpoints_bypass_redirects() {
    let (app, _, _, cookie) = app_with_user().await;

    let anonymous = send(&app, get_request("/api/auth/session", None)).await;
    assert_eq!(anonymous.status(), StatusCode::OK);
    assert_eq!(body_json(anonymous).await, serde_json::Value::Null);

    let login = send(
        &app,
        json_request(
            "/api/auth/login",
            json!({ "username": "alice123", "password": "hunter22" }),
        ),
    )
    .await;
    assert_eq!(login.status(), StatusCode::OK);

    let session = send(&app, get_request("/api/auth/session", Some(&cookie))).await;
    assert_eq!(session.status(), StatusCode::OK);
    assert_eq!(body_json(session).await["username"], "alice123");
}

#[tokio::test]
async fn test_static_assets_and_docs_skip_the_gate() {
    let app = setup_test_app(Arc::new(MemoryUserStore::new()));

    // Not routed, so 404 rather than a redirect to the login page.
    let asset = send(&app, get_request("/assets/app.js", None)).await;
    assert_eq!(asset.status(), StatusCode::NOT_FOUND);

    let docs = send(&app, get_request("/docs/openapi.json", None)).await;
    assert_eq!(docs.status(), StatusCode::OK);
    let doc = body_json(docs).await;
    assert!(doc["paths"]["/api/auth/login"].is_object());
}

#[tokio::test]
async fn test_custom_auth_prefix_is_mounted_and_documented() {
    let store = Arc::new(MemoryUserStore::new());
    create_test_user(store.as_ref(), "alice123", "hunter22", UserRole::User).await;
    let state = AppState::new(
        store,
        SessionConfig {
            secret: TEST_SECRET.to_string(),
            cookie_name: "sid".to_string(),
            ..SessionConfig::default()
        },
        RouteConfig {
            api_auth_prefix: "/auth".to_string(),
            ..RouteConfig::default()
        },
        RegistrationConfig::default(),
        CorsConfig::default(),
    );
    let app = init_router(state, None);

    let response = send(
        &app,
        json_request(
            "/auth/login",
            json!({ "username": "alice123", "password": "hunter22" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let doc = body_json(send(&app, get_request("/docs/openapi.json", None)).await).await;
    assert!(doc["paths"]["/auth/login"].is_object());
    assert!(doc["paths"]["/api/auth/login"].is_null());
    assert_eq!(doc["components"]["securitySchemes"]["session_cookie"]["name"], "sid");
}

#[tokio::test]
async fn test_api_paths_always_gated() {
    let app = setup_test_app(Arc::new(MemoryUserStore::new()));

    let response = send(&app, get_request("/api/export.csv", None)).await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), Some("/login"));
}

#[tokio::test]
async fn test_tampered_cookie_counts_as_signed_out() {
    let app = setup_test_app(Arc::new(MemoryUserStore::new()));

    let response = send(
        &app,
        get_request("/app", Some("turnstile.session-token=not-a-token")),
    )
    .await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), Some("/login"));
}

#[tokio::test]
async fn test_deleted_user_session_rejected_by_default() {
    let (app, store, user, cookie) = app_with_user().await;
    store.remove(user.id).await;

    let response = send(&app, get_request("/app", Some(&cookie))).await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), Some("/login"));
}

#[tokio::test]
async fn test_deleted_user_session_accepted_when_configured() {
    let store = Arc::new(MemoryUserStore::new());
    let user = create_test_user(store.as_ref(), "alice123", "hunter22", UserRole::User).await;
    let state = AppState::with_store(
        store.clone(),
        SessionConfig {
            secret: TEST_SECRET.to_string(),
            reject_orphaned: false,
            ..SessionConfig::default()
        },
    );
    let app = init_router(state, None);
    let cookie = login_cookie(&app, "alice123", "hunter22").await;

    store.remove(user.id).await;

    let response = send(&app, get_request("/app", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["user"]["username"], "alice123");
}

#[tokio::test]
async fn test_injected_route_config() {
    let store = Arc::new(MemoryUserStore::new());
    let state = AppState::new(
        store,
        SessionConfig {
            secret: TEST_SECRET.to_string(),
            ..SessionConfig::default()
        },
        RouteConfig {
            public_routes: vec!["/app".to_string()],
            ..RouteConfig::default()
        },
        RegistrationConfig::default(),
        CorsConfig::default(),
    );
    let app = init_router(state, None);

    // `/app` is public now, so the handler runs and reports the missing session.
    let response = send(&app, get_request("/app", None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
