use std::{error::Error, path::PathBuf, process};

use clap::Parser;
use database::{DatabaseConnectionInfo, PgDatabase};
use tools::legacy::{LegacyRow, SELECT_LEGACY_LOCATIONS};
use tracking::{
    config::TrackingConfig,
    database::{Database, DatabaseTransaction, LocationRepo},
};

type Result<T> = std::result::Result<T, Box<dyn Error + Send + Sync>>;

/// Copies the locations of the old SQLite database into PostgreSQL.
///
/// The connection to PostgreSQL is configured through the usual `DATABASE_*`
/// variables. All rows are written in a single transaction.
#[derive(Parser)]
#[command(name = "migrate-sqlite")]
struct Cli {
    /// Path of the SQLite database file
    #[arg(long)]
    sqlite: PathBuf,
}

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(why) = migrate(Cli::parse()).await {
        log::error!("migration failed: {}", why);
        process::exit(1);
    }
}

async fn migrate(cli: Cli) -> Result<()> {
    let config = TrackingConfig::from_env()?;

    log::info!("reading {}", cli.sqlite.display());
    let sqlite = sqlx::sqlite::SqlitePool::connect_with(
        sqlx::sqlite::SqliteConnectOptions::new()
            .filename(&cli.sqlite)
            .read_only(true),
    )
    .await?;
    let rows: Vec<LegacyRow> = sqlx::query_as(SELECT_LEGACY_LOCATIONS)
        .fetch_all(&sqlite)
        .await?;
    sqlite.close().await;
    log::info!("{} rows found", rows.len());

    let total = rows.len();
    let locations = rows
        .into_iter()
        .filter_map(|row| row.into_location(&config.timezone))
        .collect::<Vec<_>>();
    if locations.len() < total {
        log::warn!(
            "skipping {} rows without coordinates, accuracy or timestamp",
            total - locations.len()
        );
    }

    let database_connection_info =
        DatabaseConnectionInfo::from_env().ok_or("expected database connection info in env")?;
    let database = PgDatabase::connect(database_connection_info).await?;

    let mut tx = database.transaction().await?;
    let inserted = tx.insert_locations(locations).await?;
    tx.commit().await?;

    log::info!("migration complete, {} rows written", inserted);
    Ok(())
}
