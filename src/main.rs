//! Fixly Gate
//!
//! Serves the Fixly site behind a single HTTP Basic Auth credential pair.
//!
//! Usage:
//!   fixly-gate --username fixly --password '...' --site-dir ./out
//!
//! Environment:
//!   FIXLY_AUTH_USERNAME - Expected login (required)
//!   FIXLY_AUTH_PASSWORD - Expected secret (required)
//!   FIXLY_AUTH_REALM - Challenge realm (default: Protected Area)
//!   FIXLY_BIND - Listen address (default: 0.0.0.0:3000)
//!   FIXLY_SITE_DIR - Exported static site (optional)
//!   FIXLY_RATE_LIMIT_PER_MINUTE - Per-IP request limit (optional, off when unset)
//!   FIXLY_RATE_LIMIT_BURST - Burst above the limit (default: 20)

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fixly_gate::{
    build_router,
    config::{DEFAULT_BIND, DEFAULT_REALM},
    middleware::{RateLimitConfig, RateLimitLayer},
    AuthConfig, BasicAuthGate, Credentials, ServerConfig,
};

#[derive(Parser, Debug)]
#[command(name = "fixly-gate")]
#[command(about = "Fixly site server behind HTTP Basic Auth")]
struct Args {
    /// Expected username
    #[arg(long, env = "FIXLY_AUTH_USERNAME")]
    username: String,

    /// Expected password
    #[arg(long, env = "FIXLY_AUTH_PASSWORD", hide_env_values = true)]
    password: String,

    /// Realm sent in the WWW-Authenticate challenge
    #[arg(long, env = "FIXLY_AUTH_REALM", default_value = DEFAULT_REALM)]
    realm: String,

    /// Listen address
    #[arg(long, env = "FIXLY_BIND", default_value = DEFAULT_BIND)]
    bind: String,

    /// Directory with the exported static site
    #[arg(long, env = "FIXLY_SITE_DIR")]
    site_dir: Option<PathBuf>,

    /// Per-IP requests per minute (rate limiting is off when unset)
    #[arg(long, env = "FIXLY_RATE_LIMIT_PER_MINUTE")]
    rate_limit_per_minute: Option<u32>,

    /// Extra requests allowed above the per-minute limit
    #[arg(long, env = "FIXLY_RATE_LIMIT_BURST", default_value = "20")]
    rate_limit_burst: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    load_env();
    init_tracing();

    let args = Args::parse();

    let credentials =
        Credentials::new(args.username, args.password).context("Invalid auth credentials")?;
    let auth_config = AuthConfig::new(credentials, args.realm).context("Invalid auth realm")?;

    let rate_limit = args
        .rate_limit_per_minute
        .filter(|&n| n > 0)
        .map(|n| RateLimitConfig::per_minute(n, args.rate_limit_burst));
    let server_config = ServerConfig::new(&args.bind, args.site_dir, rate_limit)?;

    info!("Starting Fixly gate");
    info!("  Realm: {}", auth_config.realm);
    info!("  User: {}", auth_config.credentials.username());
    match &server_config.site_dir {
        Some(dir) => info!("  Site dir: {}", dir.display()),
        None => info!("  Site dir: none (serving placeholder page)"),
    }
    match &server_config.rate_limit {
        Some(rl) => info!(
            "  Rate limit: {}/{}s per IP (+{} burst)",
            rl.max_requests,
            rl.window.as_secs(),
            rl.burst
        ),
        None => info!("  Rate limit: off"),
    }

    let gate = Arc::new(BasicAuthGate::new(auth_config)?);

    let limiter = server_config.rate_limit.clone().map(RateLimitLayer::new);
    if let Some(limiter) = &limiter {
        limiter.spawn_cleanup();
    }

    let app = build_router(gate, server_config.site_dir.as_deref(), limiter);

    let listener = TcpListener::bind(server_config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", server_config.bind))?;
    info!("🎯 Listening on {}", server_config.bind);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.ok();
    info!("Shutdown signal received");
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fixly_gate=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load_env() {
    // Standard dotenv search (cwd + parents)
    let _ = dotenv();

    // Also try the crate dir, for runs with --manifest-path from elsewhere
    let manifest_env = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
    if manifest_env.exists() {
        let _ = dotenv::from_path(&manifest_env);
    }
}
