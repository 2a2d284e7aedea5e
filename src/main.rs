use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::exit;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use aerotest_backend::api::{AppState, create_router};
use aerotest_backend::auth::{AuthState, ServiceAccount};
use aerotest_backend::db::Database;
use aerotest_backend::render::PdfRenderer;
use aerotest_backend::storage::S3ReportStore;

#[derive(Parser, Debug)]
#[command(name = "aerotest", about = "Aerospace test results backend", version)]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "AEROTEST_BIND", default_value = "0.0.0.0:8000")]
    bind: SocketAddr,

    /// Path to the SQLite database file
    #[arg(long, env = "AEROTEST_DB", default_value = "aerotest.db")]
    database: PathBuf,

    /// Path to the identity service-account credential file
    #[arg(long, env = "IDENTITY_CREDENTIALS")]
    credentials: PathBuf,

    /// Bucket for generated reports
    #[arg(long, env = "REPORTS_BUCKET", default_value = "aerospace-test-reports")]
    bucket: String,

    /// Region the reports bucket lives in
    #[arg(long, env = "REPORTS_REGION", default_value = "us-east-2")]
    region: String,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON
    #[arg(long)]
    json: bool,
}

fn init_logging(cli: &Cli) {
    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "aerotest={level},aerotest_backend={level},tower_http={level}"
        ))
    });

    if cli.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{err:?}");
        exit(1);
    }
}

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);
    run(cli)
}

#[tokio::main]
async fn run(cli: Cli) -> Result<()> {
    serve(cli).await
}

async fn serve(cli: Cli) -> Result<()> {
    let account = ServiceAccount::load(&cli.credentials).with_context(|| {
        format!(
            "Failed to load identity credentials from {}",
            cli.credentials.display()
        )
    })?;
    let auth = AuthState::new(account);
    info!(project_id = %auth.project_id(), "identity verifier ready");

    let db = Database::new(&cli.database).await?;

    let reports = Arc::new(S3ReportStore::connect(&cli.bucket, &cli.region).await);
    info!(bucket = %cli.bucket, region = %cli.region, "report store ready");

    let state = AppState::new(&db, auth, Arc::new(PdfRenderer), reports);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(cli.bind)
        .await
        .with_context(|| format!("Failed to bind {}", cli.bind))?;
    info!(addr = %cli.bind, "listening");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
