//! Route-level access gate.
//!
//! Runs in front of every route, including the fallback. Requests the
//! policy does not gate (static files, docs, metrics) pass through
//! untouched; all others are classified and either forwarded with their
//! [`CurrentSession`] attached or answered with a `307` redirect.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use crate::metrics::track_access_decision;
use crate::middleware::session::{CurrentSession, resolve_session};
use crate::state::AppState;

pub async fn access_gate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let path = req.uri().path().to_owned();
    if !state.access_policy.is_gated(&path) {
        return next.run(req).await;
    }

    let session = resolve_session(req.headers(), &state).await;
    let decision = state.access_policy.decide(&path, session.is_some());
    track_access_decision(decision.as_str());

    if let Some(target) = state.access_policy.redirect_target(decision) {
        debug!(
            path = %path,
            decision = decision.as_str(),
            location = %target,
            "Redirecting request"
        );
        return Redirect::temporary(target).into_response();
    }

    req.extensions_mut().insert(CurrentSession(session));
    next.run(req).await
}
