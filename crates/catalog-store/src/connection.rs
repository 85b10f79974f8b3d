//! Store connection management.

use std::path::PathBuf;

use anyhow::{Context, Result};
use rusqlite::Connection;

use super::migrations::run_migrations;

/// Store file name inside the data directory.
const DB_FILE_NAME: &str = "catalog.db";

/// Opens (or creates) the store and runs migrations.
///
/// - If `dir` is `Some`, uses `{dir}/catalog.db`.
/// - Otherwise uses `~/.local/share/catalog/catalog.db`.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or migrations fail.
pub fn open_store(dir: Option<&PathBuf>) -> Result<Connection> {
    let db_path = resolve_data_dir(dir)?.join(DB_FILE_NAME);

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    let conn = Connection::open(&db_path)
        .with_context(|| format!("failed to open database {}", db_path.display()))?;

    run_migrations(&conn).context("database migration failed")?;

    tracing::debug!(path = %db_path.display(), "Opened local store");

    Ok(conn)
}

/// Opens a migrated in-memory store.
///
/// # Errors
///
/// Returns an error if `SQLite` cannot allocate the database or migrations fail.
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().context("failed to open in-memory database")?;
    run_migrations(&conn).context("database migration failed")?;
    Ok(conn)
}

/// Resolves the data directory.
///
/// - If `dir` is `Some`, returns it unchanged.
/// - Otherwise returns `~/.local/share/catalog`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined (when `dir` is `None`).
pub fn resolve_data_dir(dir: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.clone());
    }

    let home = std::env::var("HOME").context("HOME environment variable is not set")?;
    Ok(PathBuf::from(home)
        .join(".local")
        .join("share")
        .join("catalog"))
}
