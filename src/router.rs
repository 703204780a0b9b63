use crate::docs::openapi_for;
use crate::logging::logging_middleware;
use crate::metrics::{metrics_app, metrics_middleware};
use crate::middleware::access::access_gate;
use crate::modules::auth::router::init_auth_router;
use crate::modules::pages::router::init_pages_router;
use crate::state::AppState;
use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::CorsLayer;
use utoipa_swagger_ui::SwaggerUi;

/// Builds the application router.
///
/// The access gate wraps every route and the fallback, so unknown paths are
/// classified as protected like any other.
pub fn init_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let api_auth_prefix = state.access_policy.routes().api_auth_prefix.clone();
    let openapi = openapi_for(&api_auth_prefix, &state.sessions.config().cookie_name);

    let mut router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/docs/openapi.json", openapi))
        .merge(init_pages_router())
        .nest(&api_auth_prefix, init_auth_router());

    if let Some(handle) = metrics_handle {
        router = router.merge(metrics_app(handle));
    }

    router
        .with_state(state.clone())
        .layer(middleware::from_fn_with_state(state.clone(), access_gate))
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
