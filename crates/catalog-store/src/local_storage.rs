//! Key/value item operations on the `local_storage` table.

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};

/// Returns the value stored under `key`, if any.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_item(conn: &Connection, key: &str) -> Result<Option<String>> {
    conn.query_row(
        "SELECT value FROM local_storage WHERE key = ?1",
        [key],
        |row| row.get(0),
    )
    .optional()
    .with_context(|| format!("failed to read local_storage item {key}"))
}

/// Stores `value` under `key`, replacing any previous value.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn set_item(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO local_storage (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        rusqlite::params![key, value],
    )
    .with_context(|| format!("failed to write local_storage item {key}"))?;
    Ok(())
}

/// Removes `key`. Removing a missing key is not an error.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn remove_item(conn: &Connection, key: &str) -> Result<()> {
    conn.execute("DELETE FROM local_storage WHERE key = ?1", [key])
        .with_context(|| format!("failed to remove local_storage item {key}"))?;
    Ok(())
}
