//! CLI for inspecting and applying schema migrations
//!
//! Outputs one JSON document per invocation so scripts can parse it.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use directory_core::kernel::migrations::{self, MigrationState};
use serde::Serialize;
use sqlx::PgPool;

#[derive(Parser)]
#[command(name = "migrate_cli")]
#[command(about = "Schema migration CLI for the directory database")]
struct Cli {
    /// Postgres connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every migration with its applied state
    List,

    /// Apply pending migrations
    Run,

    /// Summarise applied and pending counts
    Status,
}

// ============================================================================
// JSON Response Types
// ============================================================================

#[derive(Serialize)]
struct Response {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    applied: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pending: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    migrations: Option<Vec<MigrationState>>,
}

impl Response {
    fn ok() -> Self {
        Self {
            success: true,
            message: None,
            applied: None,
            pending: None,
            migrations: None,
        }
    }
}

fn output(resp: &Response) -> Result<()> {
    println!("{}", serde_json::to_string(resp)?);
    Ok(())
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (development)
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let pool = PgPool::connect(&cli.database_url)
        .await
        .context("Failed to connect to database")?;

    let result = match cli.command {
        Commands::List => cmd_list(&pool).await,
        Commands::Run => cmd_run(&pool).await,
        Commands::Status => cmd_status(&pool).await,
    };

    match result {
        Ok(resp) => output(&resp),
        Err(e) => {
            output(&Response {
                success: false,
                message: Some(format!("{:#}", e)),
                ..Response::ok()
            })?;
            std::process::exit(1);
        }
    }
}

// ============================================================================
// Commands
// ============================================================================

async fn cmd_list(pool: &PgPool) -> Result<Response> {
    let states = migrations::migration_states(pool).await?;
    Ok(Response {
        migrations: Some(states),
        ..Response::ok()
    })
}

async fn cmd_run(pool: &PgPool) -> Result<Response> {
    let applied = migrations::run_pending(pool).await?;
    Ok(Response {
        message: Some(format!("Applied {} migration(s)", applied)),
        applied: Some(applied),
        pending: Some(0),
        ..Response::ok()
    })
}

async fn cmd_status(pool: &PgPool) -> Result<Response> {
    let states = migrations::migration_states(pool).await?;
    let applied = states.iter().filter(|m| m.applied).count();
    let drifted: Vec<String> = states
        .iter()
        .filter(|m| !m.checksum_matches)
        .map(|m| format!("{}_{}", m.version, m.description))
        .collect();

    Ok(Response {
        success: drifted.is_empty(),
        message: (!drifted.is_empty())
            .then(|| format!("Checksum mismatch: {}", drifted.join(", "))),
        applied: Some(applied),
        pending: Some(states.len() - applied),
        migrations: None,
    })
}
