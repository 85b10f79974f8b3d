//! In-memory session backed by the persistent token store.

use anyhow::Result;
use catalog_api::CurrentUser;
use catalog_store::SessionStore;

/// Bearer token plus the user it belongs to, once verified.
#[derive(Debug)]
pub struct Session {
    store: SessionStore,
    token: Option<String>,
    user: Option<CurrentUser>,
}

impl Session {
    /// Restores the session from `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored token cannot be read.
    pub fn restore(store: SessionStore) -> Result<Self> {
        let token = store.load_token()?;
        tracing::debug!(has_token = token.is_some(), "Session restored");
        Ok(Self {
            store,
            token,
            user: None,
        })
    }

    /// Current bearer token, if any.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// User verified via `auth/me`, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&CurrentUser> {
        self.user.as_ref()
    }

    /// Stores a freshly issued token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be persisted.
    pub fn sign_in(&mut self, token: String) -> Result<()> {
        self.store.save_token(&token)?;
        self.token = Some(token);
        self.user = None;
        Ok(())
    }

    /// Records the verified user.
    pub fn set_user(&mut self, user: CurrentUser) {
        self.user = Some(user);
    }

    /// Drops the token from memory and from the store.
    ///
    /// The in-memory token is cleared even when the store update fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored token cannot be removed.
    pub fn sign_out(&mut self) -> Result<()> {
        self.token = None;
        self.user = None;
        self.store.clear_token()
    }
}
