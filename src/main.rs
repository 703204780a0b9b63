use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;
use turnstile::logging::init_tracing;
use turnstile::metrics::init_metrics;
use turnstile::router::init_router;
use turnstile::state::init_app_state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let _log_guard = init_tracing()?;
    let metrics_handle = init_metrics().context("Failed to install Prometheus recorder")?;

    let state = init_app_state().await?;
    let app = init_router(state, metrics_handle);

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{host}:{port}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(address = %addr, "Server running");
    info!("Swagger UI available at http://{addr}/swagger-ui");

    axum::serve(listener, app).await?;
    Ok(())
}
