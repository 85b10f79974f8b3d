//! API client library for the show catalog backend.
//!
//! Handles authentication (`auth/*`) and the show listing and
//! filter-option endpoints (`shows/*`) of the catalog REST API.

mod api;
mod client;
mod outcome;
mod params;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{CatalogApi, LocalCatalogApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{CatalogClient, CatalogClientBuilder, DEFAULT_BASE_URL};
pub use outcome::Authed;
pub use params::{FilterState, ShowQuery};
pub use types::{
    Category, Credentials, CurrentUser, NewAccount, Rating, Show, ShowKind, ShowPage,
    TokenResponse, YearRange,
};
