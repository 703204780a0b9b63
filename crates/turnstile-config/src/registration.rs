use crate::env_list;

/// Decides which new accounts receive the admin role.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RolePolicy {
    /// Any username containing `"admin"` becomes an admin.
    ///
    /// Demo behaviour only: anybody can pick such a username.
    UsernameSubstring,
    /// Only the listed usernames become admins.
    Allowlist(Vec<String>),
}

impl RolePolicy {
    pub fn grants_admin(&self, username: &str) -> bool {
        match self {
            RolePolicy::UsernameSubstring => username.contains("admin"),
            RolePolicy::Allowlist(usernames) => usernames.iter().any(|u| u == username),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistrationConfig {
    pub role_policy: RolePolicy,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            role_policy: RolePolicy::UsernameSubstring,
        }
    }
}

impl RegistrationConfig {
    pub fn from_env() -> Self {
        let role_policy = match std::env::var("ADMIN_ROLE_POLICY").as_deref() {
            Ok("allowlist") => {
                RolePolicy::Allowlist(env_list("ADMIN_USERNAMES").unwrap_or_default())
            }
            _ => RolePolicy::UsernameSubstring,
        };

        if role_policy == RolePolicy::UsernameSubstring {
            tracing::warn!(
                "ADMIN_ROLE_POLICY=substring: usernames containing \"admin\" are granted the admin role; \
                 set ADMIN_ROLE_POLICY=allowlist with ADMIN_USERNAMES for real deployments"
            );
        }

        Self { role_policy }
    }
}
