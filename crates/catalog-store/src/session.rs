//! Bearer token persistence.

use anyhow::{Context, Result};
use rusqlite::Connection;

use super::local_storage::{get_item, remove_item, set_item};

/// Storage key the bearer token is kept under.
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Persists the session bearer token in local storage.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct SessionStore {
    conn: Connection,
}

impl SessionStore {
    /// Wraps an opened (and migrated) store connection.
    #[must_use]
    pub const fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Reads the stored token. Empty values count as absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn load_token(&self) -> Result<Option<String>> {
        let token = get_item(&self.conn, AUTH_TOKEN_KEY).context("failed to load auth token")?;
        Ok(token.filter(|t| !t.is_empty()))
    }

    /// Stores `token`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn save_token(&self, token: &str) -> Result<()> {
        set_item(&self.conn, AUTH_TOKEN_KEY, token).context("failed to save auth token")
    }

    /// Removes the stored token.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn clear_token(&self) -> Result<()> {
        remove_item(&self.conn, AUTH_TOKEN_KEY).context("failed to clear auth token")
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::connection::{open_in_memory, open_store};

    #[test]
    fn test_token_lifecycle() {
        // Arrange
        let store = SessionStore::new(open_in_memory().unwrap());

        // Act & Assert
        assert!(store.load_token().unwrap().is_none());

        store.save_token("tok-1").unwrap();
        assert_eq!(store.load_token().unwrap().as_deref(), Some("tok-1"));

        store.save_token("tok-2").unwrap();
        assert_eq!(store.load_token().unwrap().as_deref(), Some("tok-2"));

        store.clear_token().unwrap();
        assert!(store.load_token().unwrap().is_none());
    }

    #[test]
    fn test_empty_token_is_absent() {
        // Arrange
        let store = SessionStore::new(open_in_memory().unwrap());

        // Act
        store.save_token("").unwrap();

        // Assert
        assert!(store.load_token().unwrap().is_none());
    }

    #[test]
    fn test_token_survives_reopen() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let dir_path = dir.path().to_path_buf();
        SessionStore::new(open_store(Some(&dir_path)).unwrap())
            .save_token("persisted")
            .unwrap();

        // Act
        let reopened = SessionStore::new(open_store(Some(&dir_path)).unwrap());

        // Assert
        assert_eq!(
            reopened.load_token().unwrap().as_deref(),
            Some("persisted")
        );
    }
}
