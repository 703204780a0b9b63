use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{get_session, login_user, logout_user, register_user};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login_user))
        .route("/register", post(register_user))
        .route("/logout", post(logout_user))
        .route("/session", get(get_session))
}
