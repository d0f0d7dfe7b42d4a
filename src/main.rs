//! Storefront - self-hosted storefront service

use anyhow::Result;
use axum::http::HeaderValue;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storefront::{api, AppConfig, AppContext};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;
    let ctx = AppContext::init(config).await?;

    let cors = match &ctx.config.cors_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(HeaderValue::from_str(origin)?)
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::permissive(),
    };

    let app = api::router(ctx.clone())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(ConcurrencyLimitLayer::new(ctx.config.max_in_flight));

    let addr = format!("0.0.0.0:{}", ctx.config.port);
    tracing::info!("storefront listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    ctx.shutdown().await;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
