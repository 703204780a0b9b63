use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use turnstile_auth::{AccessPolicy, SessionIssuer};
use turnstile_config::{CorsConfig, RegistrationConfig, RouteConfig, SessionConfig};
use turnstile_db::{MemoryUserStore, PgUserStore, UserStore, init_db_pool, run_migrations};

#[derive(Clone, Debug)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub sessions: SessionIssuer,
    pub access_policy: AccessPolicy,
    pub registration_config: RegistrationConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(
        store: Arc<dyn UserStore>,
        session_config: SessionConfig,
        route_config: RouteConfig,
        registration_config: RegistrationConfig,
        cors_config: CorsConfig,
    ) -> Self {
        Self {
            sessions: SessionIssuer::new(store.clone(), session_config),
            store,
            access_policy: AccessPolicy::new(route_config),
            registration_config,
            cors_config,
        }
    }

    /// State over `store` with default routes, registration and CORS settings.
    pub fn with_store(store: Arc<dyn UserStore>, session_config: SessionConfig) -> Self {
        Self::new(
            store,
            session_config,
            RouteConfig::default(),
            RegistrationConfig::default(),
            CorsConfig::default(),
        )
    }
}

/// Builds the application state from the environment.
///
/// Uses PostgreSQL when `DATABASE_URL` is set (running pending migrations),
/// otherwise falls back to the in-memory store.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let store: Arc<dyn UserStore> = match std::env::var("DATABASE_URL") {
        Ok(database_url) => {
            let pool = init_db_pool(&database_url)
                .await
                .context("Failed to connect to database")?;
            run_migrations(&pool)
                .await
                .context("Failed to run database migrations")?;
            info!("Using PostgreSQL user store");
            Arc::new(PgUserStore::new(pool))
        }
        Err(_) => {
            warn!("DATABASE_URL not set; using in-memory user store, accounts are lost on restart");
            Arc::new(MemoryUserStore::new())
        }
    };

    Ok(AppState::new(
        store,
        SessionConfig::from_env(),
        RouteConfig::from_env(),
        RegistrationConfig::from_env(),
        CorsConfig::from_env(),
    ))
}
