//! # Turnstile DB
//!
//! User persistence for Turnstile.
//!
//! Everything above this crate talks to a [`UserStore`]; two backends ship:
//!
//! - [`PgUserStore`]: PostgreSQL through SQLx, uniqueness enforced by the
//!   `users.username` constraint
//! - [`MemoryUserStore`]: process-local map, used by tests and by local runs
//!   without `DATABASE_URL`
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use turnstile_db::{init_db_pool, PgUserStore, UserStore};
//!
//! let pool = init_db_pool(&database_url).await?;
//! let store: Arc<dyn UserStore> = Arc::new(PgUserStore::new(pool));
//! let user = store.find_by_username("alice123").await?;
//! ```

pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;
pub use store::{StoreError, UserStore};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Opens a PostgreSQL connection pool for `database_url`.
///
/// Should be called once during startup; the returned pool is cheaply
/// cloneable.
pub async fn init_db_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    sqlx::postgres::PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Applies the bundled migrations to `pool`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}
