//! Command-line and environment configuration.
//!
//! Every flag has an environment fallback:
//! - `QUIRE_BIND`: listen address (default `0.0.0.0:5000`)
//! - `QUIRE_DATA_FILE`: JSON file holding the posts (default `blog_posts.json`)
//! - `QUIRE_DEBUG`: debug logging unless `RUST_LOG` says otherwise

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Runtime configuration for the `quire` binary.
#[derive(Debug, Clone, Parser)]
#[command(name = "quire", version, about = "A minimal blog backed by one JSON file")]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "QUIRE_BIND", default_value = "0.0.0.0:5000")]
    pub bind: SocketAddr,

    /// JSON file holding the posts; created on the first write
    #[arg(long, env = "QUIRE_DATA_FILE", default_value = "blog_posts.json")]
    pub data_file: PathBuf,

    /// Log at debug level
    #[arg(long, env = "QUIRE_DEBUG")]
    pub debug: bool,
}
