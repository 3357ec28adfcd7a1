//! klussite-web - marketing site with a photo-album CMS
//!
//! Serves the public pages (albums, photos, reviews, quote form) and the
//! password-gated admin API for managing quote requests and portfolio
//! albums. Photo binaries live on an external image CDN; records live in
//! a local SQLite database.

use anyhow::Result;
use clap::Parser;
use klussite_common::config::{ensure_data_dir, SiteConfig};
use tracing::info;

use klussite_web::{build_router, AppState};

#[derive(Parser, Debug)]
#[command(name = "klussite-web", version, about = "Klussite web service")]
struct Args {
    /// Path to the TOML config file
    #[arg(long, env = "KLUSSITE_CONFIG")]
    config: Option<std::path::PathBuf>,

    /// Override the bind port from the config file
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting klussite-web v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let mut config = SiteConfig::load(args.config.as_deref())?;
    if let Some(port) = args.port {
        config.port = port;
    }

    let data_dir = config.data_dir();
    ensure_data_dir(&data_dir)?;

    let db_path = config.database_path();
    info!("Database: {}", db_path.display());
    let pool = klussite_common::db::init_database(&db_path).await?;

    let bind = format!("{}:{}", config.host, config.port);
    let state = AppState::new(pool, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!("klussite-web listening on http://{}", bind);
    info!("Health check: http://{}/health", bind);

    axum::serve(listener, app).await?;

    Ok(())
}
