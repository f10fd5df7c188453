use std::fs;

use anyhow::{Context, Result};
use rusqlite::Connection;

use super::kv::SqliteStore;
use crate::config::Config;

/// Ensure the database file exists, create the key/value table if needed, and
/// return a store backed by a live connection.
pub fn open_store(config: &Config) -> Result<SqliteStore> {
    fs::create_dir_all(&config.data_dir).context("failed to create data directory")?;

    let conn = Connection::open(&config.db_path).context("failed to open SQLite database")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS kv_store (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        [],
    )
    .context("failed to create kv_store table")?;

    tracing::info!(path = %config.db_path.display(), "opened catalog database");
    Ok(SqliteStore::new(conn))
}
