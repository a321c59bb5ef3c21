use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use shared::Config;
use tower_http::trace::TraceLayer;
use tracing::info;

mod athena;
mod binance;
mod routes;
mod state;
mod store;

use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("Starting candle archive API server...");

    let config = Config::from_env()?;
    let state = AppState::new(config).await;
    info!(
        "AWS clients ready (region {}, bucket {})",
        state.config.aws_region, state.config.bucket
    );

    let app = Router::new()
        .route("/health", get(routes::health))
        .route("/data", post(routes::upload_data))
        .route("/:level/highest", get(routes::highest_price))
        .route("/:level/top-volume", get(routes::top_volume))
        .route("/:level/top-volatile", get(routes::top_volatility))
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind(&state.config.bind_addr).await?;
    info!("API server listening on http://{}", state.config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
