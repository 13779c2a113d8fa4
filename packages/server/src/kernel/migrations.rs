//! Schema migrations.
//!
//! Migrations are the ordered files in `packages/server/migrations`. sqlx
//! records each applied version in `_sqlx_migrations`, so running them again
//! only applies what is missing.

use anyhow::{Context, Result};
use serde::Serialize;
use sqlx::migrate::Migrator;
use sqlx::PgPool;
use std::collections::HashMap;
use tracing::info;

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Applied/pending state of one migration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationState {
    pub version: i64,
    pub description: String,
    pub applied: bool,
    /// False when the recorded checksum no longer matches the file.
    pub checksum_matches: bool,
}

/// Report every known migration and whether it has been applied.
pub async fn migration_states(pool: &PgPool) -> Result<Vec<MigrationState>> {
    let table_exists: bool =
        sqlx::query_scalar("SELECT to_regclass('_sqlx_migrations') IS NOT NULL")
            .fetch_one(pool)
            .await
            .context("Failed to check for migrations table")?;

    let applied: HashMap<i64, Vec<u8>> = if table_exists {
        sqlx::query_as::<_, (i64, Vec<u8>)>(
            "SELECT version, checksum FROM _sqlx_migrations WHERE success = true",
        )
        .fetch_all(pool)
        .await
        .context("Failed to read applied migrations")?
        .into_iter()
        .collect()
    } else {
        HashMap::new()
    };

    Ok(MIGRATOR
        .iter()
        .filter(|m| !m.migration_type.is_down_migration())
        .map(|m| {
            let recorded = applied.get(&m.version);
            MigrationState {
                version: m.version,
                description: m.description.to_string(),
                applied: recorded.is_some(),
                checksum_matches: recorded.map_or(true, |c| c.as_slice() == &*m.checksum),
            }
        })
        .collect())
}

/// Apply all pending migrations. Returns how many were applied.
pub async fn run_pending(pool: &PgPool) -> Result<usize> {
    let pending = migration_states(pool)
        .await?
        .into_iter()
        .filter(|m| !m.applied)
        .count();

    MIGRATOR
        .run(pool)
        .await
        .context("Failed to run migrations")?;

    info!(applied = pending, "Migrations complete");
    Ok(pending)
}
