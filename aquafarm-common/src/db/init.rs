//! Database initialization
//!
//! Creates the journal schema on first run. All `CREATE TABLE` statements
//! are `IF NOT EXISTS`, so initialization is idempotent and safe to call on
//! every startup.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    apply_pragmas(&pool).await?;
    create_schema(&pool).await?;

    Ok(pool)
}

/// Create the full journal schema on an already-open pool
///
/// Split out from [`init_database`] so tests can seed in-memory databases.
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_pools_table(pool).await?;
    create_group_pools_tables(pool).await?;
    create_fish_types_table(pool).await?;
    create_hydrochemistry_table(pool).await?;
    create_inventory_tables(pool).await?;
    create_feeding_tables(pool).await?;
    create_movements_table(pool).await?;
    Ok(())
}

/// Apply connection pragmas
pub async fn apply_pragmas(pool: &SqlitePool) -> Result<()> {
    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON").execute(pool).await?;

    // WAL allows concurrent readers with one writer
    sqlx::query("PRAGMA journal_mode = WAL").execute(pool).await?;

    sqlx::query("PRAGMA busy_timeout = 5000").execute(pool).await?;

    Ok(())
}

async fn create_pools_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS pools (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_group_pools_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS group_pools (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Membership link: which pools are sampled together
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS group_pool_pools (
            group_pool_id INTEGER NOT NULL REFERENCES group_pools(id),
            pool_id INTEGER NOT NULL REFERENCES pools(id),
            PRIMARY KEY (group_pool_id, pool_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_fish_types_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS fish_types (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_hydrochemistry_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS hydrochemistry (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            group_pool_id INTEGER NOT NULL REFERENCES group_pools(id),
            sample_date INTEGER NOT NULL,
            doxy REAL,
            temperature REAL,
            ph REAL,
            no2 REAL,
            no3 REAL,
            nh4 REAL,
            po4 REAL,
            salinity REAL,
            illumination REAL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_inventory_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS fish_inventory (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            control_date INTEGER NOT NULL,
            pool_id INTEGER NOT NULL REFERENCES pools(id),
            fish_type_id INTEGER NOT NULL REFERENCES fish_types(id),
            control_desc TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS fish_boning (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            fish_inventory_id INTEGER NOT NULL REFERENCES fish_inventory(id),
            fish_number INTEGER NOT NULL,
            fish_biomass REAL NOT NULL,
            fish_comment TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_feeding_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS feed_types (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            unit TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS feeds (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            pool_id INTEGER NOT NULL REFERENCES pools(id),
            feed_date INTEGER NOT NULL,
            feed_type_id INTEGER NOT NULL REFERENCES feed_types(id),
            feed_value REAL NOT NULL,
            feed_desc TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_movements_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS fish_movements (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            pool_id_from INTEGER REFERENCES pools(id),
            pool_id_to INTEGER REFERENCES pools(id),
            fish_type_id INTEGER NOT NULL REFERENCES fish_types(id),
            movement_date INTEGER NOT NULL,
            fish_biomass REAL NOT NULL,
            movement_reason TEXT,
            movement_desc TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
