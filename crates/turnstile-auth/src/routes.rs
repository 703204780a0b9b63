//! Route classification and the access decision.
//!
//! The decision only needs the request path and whether a session is
//! present, so it is a pure function over [`RouteConfig`]:
//!
//! | class     | no session        | session          |
//! |-----------|-------------------|------------------|
//! | ApiAuth   | Allow             | Allow            |
//! | Public    | Allow             | Allow            |
//! | AuthOnly  | Allow             | RedirectToApp    |
//! | Protected | RedirectToLogin   | Allow            |

use turnstile_config::RouteConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Authentication endpoints; exempt from the decision.
    ApiAuth,
    Public,
    /// Login, register and the auth error page.
    AuthOnly,
    Protected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    RedirectToLogin,
    RedirectToApp,
}

impl AccessDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessDecision::Allow => "allow",
            AccessDecision::RedirectToLogin => "redirect_to_login",
            AccessDecision::RedirectToApp => "redirect_to_app",
        }
    }
}

/// Route tables plus the rules applied to them.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    routes: RouteConfig,
}

impl AccessPolicy {
    /// Builds the policy from `routes` after [`RouteConfig::sanitized`].
    pub fn new(routes: RouteConfig) -> Self {
        Self {
            routes: routes.sanitized(),
        }
    }

    pub fn routes(&self) -> &RouteConfig {
        &self.routes
    }

    pub fn classify(&self, path: &str) -> RouteClass {
        if self.routes.is_api_auth(path) {
            RouteClass::ApiAuth
        } else if self.routes.is_public(path) {
            RouteClass::Public
        } else if self.routes.is_auth_route(path) {
            RouteClass::AuthOnly
        } else {
            RouteClass::Protected
        }
    }

    pub fn decide(&self, path: &str, has_session: bool) -> AccessDecision {
        match (self.classify(path), has_session) {
            (RouteClass::ApiAuth | RouteClass::Public, _) => AccessDecision::Allow,
            (RouteClass::AuthOnly, true) => AccessDecision::RedirectToApp,
            (RouteClass::AuthOnly, false) => AccessDecision::Allow,
            (RouteClass::Protected, true) => AccessDecision::Allow,
            (RouteClass::Protected, false) => AccessDecision::RedirectToLogin,
        }
    }

    /// Location header for a redirecting decision.
    pub fn redirect_target(&self, decision: AccessDecision) -> Option<&str> {
        match decision {
            AccessDecision::Allow => None,
            AccessDecision::RedirectToLogin => Some(&self.routes.login_path),
            AccessDecision::RedirectToApp => Some(&self.routes.default_login_redirect),
        }
    }

    /// Whether the gate runs for `path` at all.
    ///
    /// Static files (a trailing `.ext` segment) and passthrough prefixes are
    /// skipped; the root and everything under `/api` or `/trpc` always go
    /// through the gate.
    pub fn is_gated(&self, path: &str) -> bool {
        if path == "/" || path.starts_with("/api") || path.starts_with("/trpc") {
            return true;
        }
        if self
            .routes
            .passthrough_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
        {
            return false;
        }
        !has_file_extension(path.strip_prefix('/').unwrap_or(path))
    }
}

/// `rest` ends in `.<word chars>` with at least one character before the dot.
fn has_file_extension(rest: &str) -> bool {
    match rest.rfind('.') {
        Some(idx) if idx > 0 => {
            let ext = &rest[idx + 1..];
            !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
