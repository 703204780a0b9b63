use crate::state::AppState;
use axum::{Router, routing::get};

use super::controller::{
    app_page, auth_error_page, health, landing_page, login_page, register_page,
};

pub fn init_pages_router() -> Router<AppState> {
    Router::new()
        .route("/", get(landing_page))
        .route("/login", get(login_page))
        .route("/register", get(register_page))
        .route("/error/auth", get(auth_error_page))
        .route("/app", get(app_page))
        .route("/health", get(health))
}
