use serde::{Deserialize, Serialize};
use turnstile_models::{UserInfo, UserRole};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, ToSchema)]
pub struct LandingPage {
    pub title: String,
    pub description: String,
    pub login: String,
    pub register: String,
}

/// Form page descriptor for `/login` and `/register`.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthPage {
    pub page: String,
    /// Endpoint the form posts to.
    pub action: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AuthErrorQuery {
    /// Error code set by the sign-in flow, e.g. `CredentialsSignin`.
    pub error: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthErrorPage {
    pub message: String,
    pub back_to_login: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DashboardView {
    Admin,
    User,
}

impl From<UserRole> for DashboardView {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Admin => DashboardView::Admin,
            UserRole::User => DashboardView::User,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Dashboard {
    pub view: DashboardView,
    pub title: String,
    pub user: UserInfo,
    pub logout: String,
}

impl Dashboard {
    pub fn for_user(user: UserInfo, logout: impl Into<String>) -> Self {
        let view = DashboardView::from(user.role);
        let title = match view {
            DashboardView::Admin => "Admin Dashboard",
            DashboardView::User => "User Dashboard",
        };

        Self {
            view,
            title: title.to_string(),
            user,
            logout: logout.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}
