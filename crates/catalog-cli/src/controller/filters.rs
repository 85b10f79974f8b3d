//! Filter control options loaded from the backend.

use anyhow::Result;
use catalog_api::Authed;

/// Selectable values for each filter control.
///
/// Each list is populated independently; a source that failed to load
/// stays empty while the others are still offered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Show types.
    pub types: Vec<String>,
    /// Category names.
    pub categories: Vec<String>,
    /// Rating names.
    pub ratings: Vec<String>,
    /// Release years, newest first.
    pub years: Vec<i32>,
    /// Production countries.
    pub countries: Vec<String>,
}

impl FilterOptions {
    /// Returns `true` when no source produced any option.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
            && self.categories.is_empty()
            && self.ratings.is_empty()
            && self.years.is_empty()
            && self.countries.is_empty()
    }
}

/// Collects the outcome of loading one option source.
///
/// Flags `unauthenticated` on 401 and logs other failures; both yield `None`.
pub(super) fn take_source<T>(
    result: Result<Authed<T>>,
    source: &str,
    unauthenticated: &mut bool,
) -> Option<T> {
    match result {
        Ok(Authed::Ok(value)) => Some(value),
        Ok(Authed::Unauthenticated) => {
            *unauthenticated = true;
            None
        }
        Err(e) => {
            tracing::error!("Failed to load {source}: {e:#}");
            None
        }
    }
}
