//! `CatalogApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::outcome::Authed;
use super::params::ShowQuery;
use super::types::{
    Category, Credentials, CurrentUser, NewAccount, Rating, Show, ShowPage, TokenResponse,
    YearRange,
};

/// Catalog backend API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
///
/// Every method that takes a `token` returns [`Authed::Unauthenticated`]
/// instead of an error when the backend answers HTTP 401.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(CatalogApi: Send)]
pub trait LocalCatalogApi {
    /// Exchanges credentials for a bearer token (`POST auth/login`).
    ///
    /// # Errors
    ///
    /// Returns an error carrying the server message (or `"Login failed"`)
    /// on any non-2xx response, including bad credentials.
    async fn login(&self, credentials: &Credentials) -> Result<TokenResponse>;

    /// Creates an account (`POST auth/register`).
    ///
    /// # Errors
    ///
    /// Returns an error carrying the server message (or `"Request failed"`)
    /// on a non-2xx, non-401 response.
    async fn register(&self, account: &NewAccount) -> Result<Authed<CurrentUser>>;

    /// Fetches the user owning `token` (`GET auth/me`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn me(&self, token: &str) -> Result<Authed<CurrentUser>>;

    /// Lists show types (`GET shows/types`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn show_types(&self, token: &str) -> Result<Authed<Vec<String>>>;

    /// Lists categories (`GET shows/categories`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn categories(&self, token: &str) -> Result<Authed<Vec<Category>>>;

    /// Lists ratings (`GET shows/ratings`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn ratings(&self, token: &str) -> Result<Authed<Vec<Rating>>>;

    /// Fetches the release year bounds (`GET shows/years`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn year_range(&self, token: &str) -> Result<Authed<YearRange>>;

    /// Lists production countries (`GET shows/countries`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn countries(&self, token: &str) -> Result<Authed<Vec<String>>>;

    /// Fetches one page of shows (`GET shows/`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn list_shows(&self, token: &str, query: &ShowQuery) -> Result<Authed<ShowPage>>;

    /// Fetches a single show by database ID (`GET shows/{id}`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails,
    /// including `"Show not found"` for an unknown ID.
    async fn show(&self, token: &str, id: u64) -> Result<Authed<Show>>;
}
