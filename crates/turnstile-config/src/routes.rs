//! Route tables for the access gate.
//!
//! Three categories exist: public routes (always reachable), auth-only routes
//! (login, register, auth error page; signed-in users are sent away from
//! them) and the implicit protected category holding every other path.
//! Paths under [`RouteConfig::api_auth_prefix`] bypass classification.

use crate::env_list;

pub const DEFAULT_API_AUTH_PREFIX: &str = "/api/auth";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteConfig {
    /// Exact-match paths reachable without a session.
    pub public_routes: Vec<String>,
    /// Exact-match paths only meant for signed-out visitors.
    pub auth_routes: Vec<String>,
    /// Prefix of the authentication endpoints themselves.
    pub api_auth_prefix: String,
    /// Where signed-in users land after login or when visiting an auth route.
    pub default_login_redirect: String,
    /// Where signed-out users are sent from protected routes.
    pub login_path: String,
    /// Prefixes served without consulting the gate (docs, metrics,
    /// framework internals). Never applied to `/api` or `/trpc` paths.
    pub passthrough_prefixes: Vec<String>,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            public_routes: vec!["/".to_string(), "/api".to_string(), "/health".to_string()],
            auth_routes: vec![
                "/login".to_string(),
                "/register".to_string(),
                "/error/auth".to_string(),
            ],
            api_auth_prefix: DEFAULT_API_AUTH_PREFIX.to_string(),
            default_login_redirect: "/app".to_string(),
            login_path: "/login".to_string(),
            passthrough_prefixes: vec![
                "/_next".to_string(),
                "/swagger-ui".to_string(),
                "/docs".to_string(),
                "/metrics".to_string(),
            ],
        }
    }
}

impl RouteConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            public_routes: env_list("PUBLIC_ROUTES").unwrap_or(defaults.public_routes),
            auth_routes: env_list("AUTH_ROUTES").unwrap_or(defaults.auth_routes),
            api_auth_prefix: std::env::var("API_AUTH_PREFIX").unwrap_or(defaults.api_auth_prefix),
            default_login_redirect: std::env::var("DEFAULT_LOGIN_REDIRECT")
                .unwrap_or(defaults.default_login_redirect),
            login_path: std::env::var("LOGIN_PATH").unwrap_or(defaults.login_path),
            passthrough_prefixes: env_list("PASSTHROUGH_PREFIXES")
                .unwrap_or(defaults.passthrough_prefixes),
        }
    }

    /// Restores the table invariants on an injected configuration.
    ///
    /// A path listed as both public and auth-only stays auth-only, except `/`
    /// which is always public. Passthrough prefixes covering either redirect
    /// target are dropped so redirects always land on a gated page. Every
    /// correction is logged.
    pub fn sanitized(mut self) -> Self {
        if self.auth_routes.iter().any(|route| route == "/") {
            tracing::warn!("\"/\" is always public, removing it from AUTH_ROUTES");
            self.auth_routes.retain(|route| route != "/");
        }

        let auth_routes = &self.auth_routes;
        self.public_routes.retain(|route| {
            let overlaps = auth_routes.contains(route);
            if overlaps {
                tracing::warn!(
                    route = %route,
                    "Route listed as both public and auth-only, treating it as auth-only"
                );
            }
            !overlaps
        });

        let targets = [&self.login_path, &self.default_login_redirect];
        self.passthrough_prefixes.retain(|prefix| {
            let covers_target = targets.iter().any(|target| target.starts_with(prefix.as_str()));
            if covers_target {
                tracing::warn!(
                    prefix = %prefix,
                    "Passthrough prefix covers a redirect target, ignoring it"
                );
            }
            !covers_target
        });

        self
    }

    pub fn is_public(&self, path: &str) -> bool {
        path == "/" || self.public_routes.iter().any(|route| route == path)
    }

    pub fn is_auth_route(&self, path: &str) -> bool {
        self.auth_routes.iter().any(|route| route == path)
    }

    pub fn is_api_auth(&self, path: &str) -> bool {
        path.starts_with(&self.api_auth_prefix)
    }
}
