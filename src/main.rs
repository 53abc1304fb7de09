use anyhow::Result;
use std::env;
use tracing::info;
use webinar_api::create_router;

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up a local .env if present, then initialize tracing to stdout.
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let app = create_router()?;

    // Get optional bind endpoint from environment
    let endpoint = env::var("WEBINAR_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

    info!("Starting at endpoint:{}", endpoint);
    info!(
        "Starting Webinar API server v{}...",
        env!("CARGO_PKG_VERSION")
    );

    let listener = tokio::net::TcpListener::bind(&endpoint).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
