use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "mock_compute=debug".into()),
        )
        .init();

    let addr: SocketAddr = "0.0.0.0:3010".parse().unwrap();
    tracing::info!(%addr, "mock compute service listening");
    mock_compute::run(addr).await;
}
