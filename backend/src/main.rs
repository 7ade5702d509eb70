use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tsudoi::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();
    let addr = config.addr();

    tracing::info!(
        lobby_timeout = ?config.lobby_timeout,
        rate_limit = config.rate_limit_per_second,
        "Starting server on {}",
        addr
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, tsudoi::app_with_config(&config)).await?;
    Ok(())
}
