/// multi-authlib - Yggdrasil session proxy
///
/// Sits in front of the session server check and, for each player, asks a
/// prioritized list of authentication servers which one owns the player.

mod api;
mod backend;
mod config;
mod context;
mod error;
mod identity;
mod server;

use clap::Parser;
use config::ProxyConfig;
use context::AppContext;
use error::{ProxyError, ProxyResult};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Smart Yggdrasil proxy
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to the JSON configuration; created with defaults if missing
    #[arg(short = 'c', long, env = "MULTI_AUTHLIB_CONFIG", default_value = "config.json")]
    config: PathBuf,

    /// Address to listen on
    #[arg(short = 'H', long, env = "MULTI_AUTHLIB_HOST", default_value = "::")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short = 'p', long, env = "MULTI_AUTHLIB_PORT", default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> ProxyResult<()> {
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "multi_authlib=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    // Load configuration
    let config = ProxyConfig::load_or_bootstrap(&args.config).map_err(|e| {
        tracing::error!(error = %e, "failed to load configuration");
        e
    })?;

    // Create application context
    let ctx = AppContext::new(config)?;

    let addr = SocketAddr::new(args.host, args.port);
    let result = server::serve(ctx, addr).await;

    tracing::info!("closing outbound client");

    result.map_err(|e: ProxyError| {
        tracing::error!(error = %e, "server stopped with error");
        e
    })
}
