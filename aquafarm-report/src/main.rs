//! aquafarm-report - Read-only journal review service
//!
//! Serves JSON views of the aquaculture journal database: current fish
//! stock composition, hydrochemistry chart series, and the record lists.
//! The database is opened read-only; the schema is initialized on first
//! run so an empty journal serves empty views instead of failing.

use anyhow::Result;
use aquafarm_common::config::{self, DEFAULT_PORT};
use aquafarm_report::{build_router, db, AppState};
use clap::Parser;
use tracing::{error, info};

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "aquafarm-report", version, about = "Aquafarm journal review service")]
struct Args {
    /// Root folder holding the journal database (overrides AQUAFARM_ROOT and config file)
    #[arg(long)]
    root_folder: Option<String>,

    /// Listen port
    #[arg(long, env = "AQUAFARM_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting Aquafarm Journal Review (aquafarm-report) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let root_folder = config::resolve_root_folder(args.root_folder.as_deref(), "AQUAFARM_ROOT")?;
    config::ensure_root_folder(&root_folder)?;

    let db_path = config::database_path(&root_folder);
    info!("Database path: {}", db_path.display());

    // First run: create the schema so the service comes up over an empty
    // journal. The serving connection below is still read-only.
    if !db_path.exists() {
        let init_pool = aquafarm_common::db::init_database(&db_path).await?;
        init_pool.close().await;
    }

    let pool = match db::connect_readonly(&db_path).await {
        Ok(pool) => {
            info!("✓ Connected to database (read-only)");
            pool
        }
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e);
        }
    };

    let state = AppState::new(pool);
    let app = build_router(state);

    let addr = format!("127.0.0.1:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("aquafarm-report listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
