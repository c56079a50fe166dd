use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use signup::{Config, Server, config, routes, seed};

#[tokio::main]
async fn main() -> Result<(), signup::Error> {
    // Read before the subscriber so RUST_LOG may come from .env.
    let env_file = config::load_env_file(dotenvy::dotenv());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    if let Some(path) = env_file? {
        info!(path = %path.display(), "loaded .env");
    }

    let config = Config::parse();

    let catalog = seed::load(config.seed.as_deref()).await?;
    let source = config.seed.as_ref().map_or_else(|| "built-in".to_owned(), |p| p.display().to_string());
    info!(activities = catalog.len().await, seed = %source, "catalog loaded");

    let drain_timeout = config.drain_timeout();
    let app = routes::router(catalog, Some(config.static_dir));

    Server::bind(config.addr)
        .drain_timeout(drain_timeout)
        .serve(app)
        .await
}
