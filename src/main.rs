//! The `quire` blog server.
//!
//! Run with:
//!   quire --bind 127.0.0.1:5000 --data-file blog_posts.json
//!   RUST_LOG=quire=debug quire

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use quire::{Config, PostStore, Server, routes};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    init_tracing(config.debug)?;

    let store = PostStore::open(&config.data_file);
    info!(data_file = %store.path().display(), "post store opened");

    let server = Server::bind(config.bind)
        .await
        .context("failed to start server")?;
    server.serve(routes::router(), store).await?;
    Ok(())
}

/// Console logging. `RUST_LOG` wins; otherwise `info`, or `debug` with `--debug`.
fn init_tracing(debug: bool) -> Result<()> {
    let default = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
