use mock_server::{config::ServerConfig, Store};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // RUST_LOG controls verbosity, e.g. RUST_LOG=debug,tower_http=trace
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    let store = if config.seed {
        Store::seeded()
    } else {
        Store::default()
    };

    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, seed = config.seed, "mock server listening");
    mock_server::run_with(listener, store).await?;
    Ok(())
}
