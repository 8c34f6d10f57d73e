use netsci_toolkit::config::ServiceConfig;
use netsci_toolkit::server;
use tracing::info;
use tracing_subscriber::{filter::EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("netsci_toolkit=debug,info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    info!("Starting Netsci Toolkit Service");

    let config = ServiceConfig::from_env()?;
    info!(
        "Configuration loaded: parallel_threshold={}, default_n_iter={}, default_fail_max={}",
        config.parallel_threshold, config.randomization.n_iter, config.randomization.fail_max
    );

    let bind_addr = config.bind_addr.clone();
    let app = server::create_router(server::AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind TCP listener on {}: {}", bind_addr, e))?;
    info!("Server listening on {}", bind_addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("HTTP server error: {}", e))?;
    info!("Server stopped");

    Ok(())
}
