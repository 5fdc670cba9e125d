use std::net::SocketAddr;

use axum::serve;
use tokio::net::TcpListener;

use vital_sight_api::api::routes::{build_state, create_app};
use vital_sight_api::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with environment settings
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    let config = AppConfig::from_env();

    // Load the model and set up shared state. A missing or corrupt model
    // artifact makes the whole service meaningless, so startup fails here.
    let state = build_state(&config)?;

    // Create application router
    let app = create_app(state);

    // Start the server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting server on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    serve(listener, app).await?;

    Ok(())
}
