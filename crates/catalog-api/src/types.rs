//! Catalog API request and response types.

use serde::{Deserialize, Serialize};

// --- Auth ---

/// Form body for `auth/login` (sent as `application/x-www-form-urlencoded`).
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    /// Account name.
    pub username: String,
    /// Plain-text password.
    pub password: String,
}

impl Credentials {
    /// Creates credentials from a username and password.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// JSON body for `auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct NewAccount {
    /// Account name.
    pub username: String,
    /// Contact e-mail.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

/// Response from `auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// Opaque bearer token.
    pub access_token: String,
    /// Token type (normally `"bearer"`).
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Response from `auth/me` and `auth/register`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CurrentUser {
    /// Account name.
    pub username: String,
    /// Contact e-mail.
    #[serde(default)]
    pub email: Option<String>,
}

/// Error body returned by the backend (`{"detail": ...}`).
///
/// `detail` is a plain string for most errors but a list of objects for
/// request validation failures.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorResponse {
    /// Error detail.
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Returns `detail` when it is a non-empty string.
    pub(crate) fn message(&self) -> Option<&str> {
        self.detail
            .as_ref()
            .and_then(serde_json::Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

// --- Shows ---

/// A category a show is listed in.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Category {
    /// Category ID.
    pub id: u32,
    /// Display name (also the filter value).
    pub name: String,
}

/// A content rating (e.g. `"TV-MA"`).
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Rating {
    /// Rating ID.
    pub id: u32,
    /// Display name (also the filter value).
    pub name: String,
}

/// Release year bounds from `shows/years`.
///
/// Both bounds are `null` when the catalog is empty.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct YearRange {
    /// Oldest release year.
    pub min: Option<i32>,
    /// Newest release year.
    pub max: Option<i32>,
}

impl YearRange {
    /// Enumerates every year from `max` down to `min` inclusive.
    ///
    /// Returns an empty list when either bound is missing or `min > max`.
    #[must_use]
    pub fn years_descending(&self) -> Vec<i32> {
        match (self.min, self.max) {
            (Some(min), Some(max)) => (min..=max).rev().collect(),
            _ => Vec::new(),
        }
    }
}

/// Show type as displayed on cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowKind {
    /// A feature film.
    Movie,
    /// A series (anything that is not a movie).
    Series,
}

/// A catalog entry.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Show {
    /// Database ID.
    pub id: u64,
    /// Source dataset ID (e.g. `"s42"`).
    #[serde(default)]
    pub show_id: String,
    /// Raw type string (`"Movie"` or `"TV Show"`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Title.
    pub title: String,
    /// Director(s), comma-separated.
    #[serde(default)]
    pub director: Option<String>,
    /// Cast, comma-separated.
    #[serde(default)]
    pub cast: Option<String>,
    /// Production countries, comma-separated.
    #[serde(default)]
    pub country: Option<String>,
    /// Date the show was added to the catalog (free-form).
    #[serde(default)]
    pub date_added: Option<String>,
    /// Release year.
    #[serde(default)]
    pub release_year: Option<i32>,
    /// Content rating name.
    #[serde(default)]
    pub rating: Option<String>,
    /// Duration (e.g. `"90 min"`, `"2 Seasons"`).
    #[serde(default)]
    pub duration: Option<String>,
    /// Raw category list as imported.
    #[serde(default)]
    pub listed_in: Option<String>,
    /// Synopsis.
    #[serde(default)]
    pub description: Option<String>,
    /// Categories in server order.
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Show {
    /// Classifies the raw type string.
    #[must_use]
    pub fn show_kind(&self) -> ShowKind {
        if self.kind == "Movie" {
            ShowKind::Movie
        } else {
            ShowKind::Series
        }
    }
}

/// Response from `shows/`.
///
/// Every field is optional on the wire; a body without `items` reads as an
/// empty page.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ShowPage {
    /// Shows on this page.
    #[serde(default)]
    pub items: Vec<Show>,
    /// Total number of matching shows.
    #[serde(default)]
    pub total: u64,
    /// Page number served.
    #[serde(default)]
    pub page: u32,
    /// Page size served.
    #[serde(default)]
    pub per_page: u32,
    /// Total number of pages.
    #[serde(default)]
    pub pages: u32,
}
