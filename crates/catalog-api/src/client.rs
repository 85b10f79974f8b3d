//! `CatalogClient` - catalog backend API client implementation.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use super::api::LocalCatalogApi;
use super::outcome::Authed;
use super::params::ShowQuery;
use super::types::{
    Category, Credentials, CurrentUser, ErrorResponse, NewAccount, Rating, Show, ShowPage,
    TokenResponse, YearRange,
};

/// Default API root of a locally running backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/";

/// Default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fallback message for failed authenticated requests.
const REQUEST_FAILED: &str = "Request failed";

/// Fallback message for failed logins.
const LOGIN_FAILED: &str = "Login failed";

/// Catalog backend API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct CatalogClient {
    /// HTTP client.
    http_client: Client,
    /// API root; endpoint paths are joined onto it.
    base_url: Url,
}

/// Builder for `CatalogClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct CatalogClientBuilder {
    base_url: Option<Url>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl CatalogClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            user_agent: None,
            timeout: None,
        }
    }

    /// Overrides the API root (config value, or wiremock in tests).
    ///
    /// A trailing `/` is appended when missing so relative endpoint
    /// paths resolve below the root instead of replacing its last segment.
    #[must_use]
    pub fn base_url(mut self, mut url: Url) -> Self {
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        self.base_url = Some(url);
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the per-request timeout (default: 30s).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<CatalogClient> {
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(CatalogClient {
            http_client,
            base_url,
        })
    }
}

/// Extracts the server `detail` message from an error body, or `fallback`.
fn error_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|error| error.message().map(String::from))
        .unwrap_or_else(|| String::from(fallback))
}

impl CatalogClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> CatalogClientBuilder {
        CatalogClientBuilder::new()
    }

    /// Returns the API root.
    #[cfg(test)]
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves an endpoint path against the API root.
    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("failed to join URL path: {path}"))
    }

    /// Starts an authenticated GET request.
    fn get(&self, path: &str, token: &str) -> Result<RequestBuilder> {
        let url = self.endpoint(path)?;
        Ok(self.http_client.get(url).bearer_auth(token))
    }

    /// Sends a request and decodes the JSON body.
    ///
    /// HTTP 401 yields `Authed::Unauthenticated`. Any other non-2xx status
    /// becomes an error whose message is the server `detail`, falling back
    /// to `"Request failed"`.
    #[instrument(skip_all)]
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        path: &str,
    ) -> Result<Authed<T>> {
        let request = request
            .build()
            .with_context(|| format!("failed to build request: {path}"))?;

        tracing::debug!(method = %request.method(), url = %request.url(), "Catalog API request");

        let result = self.http_client.execute(request).await;
        let response = result.with_context(|| format!("request failed: {path}"))?;

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(path, "Catalog API rejected the bearer token (401)");
            return Ok(Authed::Unauthenticated);
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read response body: {path}"))?;

        if !status.is_success() {
            tracing::debug!(%status, path, "Catalog API error response");
            bail!("{}", error_message(&body, REQUEST_FAILED));
        }

        let raw_result: std::result::Result<T, _> = serde_json::from_str(&body);
        let parsed =
            raw_result.with_context(|| format!("failed to decode JSON response: {path}"))?;
        Ok(Authed::Ok(parsed))
    }
}

impl LocalCatalogApi for CatalogClient {
    #[instrument(skip_all)]
    async fn login(&self, credentials: &Credentials) -> Result<TokenResponse> {
        let url = self.endpoint("auth/login")?;

        tracing::debug!(url = url.as_str(), username = %credentials.username, "Catalog API login");

        let result = self.http_client.post(url).form(credentials).send().await;
        let response = result.context("request failed: auth/login")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("failed to read response body: auth/login")?;

        if !status.is_success() {
            tracing::debug!(%status, "Catalog API login rejected");
            bail!("{}", error_message(&body, LOGIN_FAILED));
        }

        serde_json::from_str(&body).context("failed to decode JSON response: auth/login")
    }

    #[instrument(skip_all)]
    async fn register(&self, account: &NewAccount) -> Result<Authed<CurrentUser>> {
        let url = self.endpoint("auth/register")?;
        let request = self.http_client.post(url).json(account);
        self.send_json(request, "auth/register").await
    }

    #[instrument(skip_all)]
    async fn me(&self, token: &str) -> Result<Authed<CurrentUser>> {
        let request = self.get("auth/me", token)?;
        self.send_json(request, "auth/me").await
    }

    #[instrument(skip_all)]
    async fn show_types(&self, token: &str) -> Result<Authed<Vec<String>>> {
        let request = self.get("shows/types", token)?;
        self.send_json(request, "shows/types").await
    }

    #[instrument(skip_all)]
    async fn categories(&self, token: &str) -> Result<Authed<Vec<Category>>> {
        let request = self.get("shows/categories", token)?;
        self.send_json(request, "shows/categories").await
    }

    #[instrument(skip_all)]
    async fn ratings(&self, token: &str) -> Result<Authed<Vec<Rating>>> {
        let request = self.get("shows/ratings", token)?;
        self.send_json(request, "shows/ratings").await
    }

    #[instrument(skip_all)]
    async fn year_range(&self, token: &str) -> Result<Authed<YearRange>> {
        let request = self.get("shows/years", token)?;
        self.send_json(request, "shows/years").await
    }

    #[instrument(skip_all)]
    async fn countries(&self, token: &str) -> Result<Authed<Vec<String>>> {
        let request = self.get("shows/countries", token)?;
        self.send_json(request, "shows/countries").await
    }

    #[instrument(skip_all)]
    async fn list_shows(&self, token: &str, query: &ShowQuery) -> Result<Authed<ShowPage>> {
        let request = self.get("shows/", token)?.query(&query.to_query_pairs());
        let page: Authed<Option<ShowPage>> = self.send_json(request, "shows/").await?;
        Ok(page.map(Option::unwrap_or_default))
    }

    #[instrument(skip_all)]
    async fn show(&self, token: &str, id: u64) -> Result<Authed<Show>> {
        let path = format!("shows/{id}");
        let request = self.get(&path, token)?;
        self.send_json(request, &path).await
    }
}
