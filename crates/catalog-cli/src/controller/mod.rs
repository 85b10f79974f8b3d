//! Catalog view controller.
//!
//! Owns the session, filter state, page state, and the derived views
//! (listing, pagination strip, detail overlay). Every fetch is awaited
//! inline, so at most one listing request is in flight and the state
//! always reflects the latest request.
#![allow(clippy::future_not_send)]

/// Detail overlay content.
pub mod detail;
/// Filter control options.
pub mod filters;
/// Listing view and show cards.
pub mod listing;
/// Page state and page strip.
pub mod pagination;
/// Session handling.
pub mod session;

#[cfg(test)]
pub(crate) mod fake;

use anyhow::{Result, bail};
use catalog_api::{
    Authed, Credentials, FilterState, LocalCatalogApi, NewAccount, ShowPage, ShowQuery,
};
use tracing::instrument;

use self::detail::DetailView;
use self::filters::{FilterOptions, take_source};
use self::listing::ListingView;
use self::pagination::{PageState, PaginationStrip};
use self::session::Session;

/// Fixed page size for listing requests.
pub const PER_PAGE: u32 = 20;

/// Where the user should go after an auth action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The catalog view.
    Catalog,
    /// The login view.
    Login,
}

/// Drives the catalog against a backend.
#[derive(Debug)]
pub struct CatalogController<A> {
    api: A,
    session: Session,
    filters: FilterState,
    page: PageState,
    listing: ListingView,
    pagination: Option<PaginationStrip>,
    options: FilterOptions,
    detail: Option<DetailView>,
}

impl<A: LocalCatalogApi> CatalogController<A> {
    /// Creates a controller over `api` with a restored `session`.
    pub fn new(api: A, session: Session) -> Self {
        Self {
            api,
            session,
            filters: FilterState::default(),
            page: PageState::default(),
            listing: ListingView::default(),
            pagination: None,
            options: FilterOptions::default(),
            detail: None,
        }
    }

    /// Backend handle.
    #[cfg(test)]
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Current session.
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Active filters.
    pub const fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Current page state.
    pub const fn page(&self) -> PageState {
        self.page
    }

    /// Listing view.
    pub const fn listing(&self) -> &ListingView {
        &self.listing
    }

    /// Page strip for the last rendered page, if any.
    pub const fn pagination(&self) -> Option<&PaginationStrip> {
        self.pagination.as_ref()
    }

    /// Filter control options.
    pub const fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Open detail overlay, if any.
    pub const fn detail(&self) -> Option<&DetailView> {
        self.detail.as_ref()
    }

    fn token(&self) -> Option<String> {
        self.session.token().map(String::from)
    }

    /// Drops the session after the backend rejected the token.
    fn expire_session(&mut self) {
        tracing::warn!("Session expired, returning to login");
        if let Err(e) = self.session.sign_out() {
            tracing::error!("Failed to clear stored session: {e:#}");
        }
        self.listing = ListingView::Idle;
        self.pagination = None;
        self.detail = None;
    }

    /// Verifies the stored token against `auth/me`.
    ///
    /// Returns `true` when the session is valid. Any failure drops the token.
    #[instrument(skip_all)]
    pub async fn check_auth(&mut self) -> bool {
        let Some(token) = self.token() else {
            return false;
        };
        match self.api.me(&token).await {
            Ok(Authed::Ok(user)) => {
                tracing::debug!(username = %user.username, "Session verified");
                self.session.set_user(user);
                true
            }
            Ok(Authed::Unauthenticated) => {
                self.expire_session();
                false
            }
            Err(e) => {
                tracing::warn!("Session check failed: {e:#}");
                self.expire_session();
                false
            }
        }
    }

    /// Logs in and stores the issued token.
    ///
    /// # Errors
    ///
    /// Returns the server message (or `"Login failed"`) when the backend
    /// rejects the credentials, or an error if the token cannot be stored.
    #[instrument(skip_all)]
    pub async fn login(&mut self, username: &str, password: &str) -> Result<Navigation> {
        let token = self
            .api
            .login(&Credentials::new(username, password))
            .await?;
        self.session.sign_in(token.access_token)?;
        tracing::info!("Logged in as {username}");
        Ok(Navigation::Catalog)
    }

    /// Registers an account and logs it in.
    ///
    /// A password mismatch fails before any request. When the account is
    /// created but the follow-up login fails, the user is sent to the login
    /// view instead.
    ///
    /// # Errors
    ///
    /// Returns `"Passwords do not match"`, the server message for a rejected
    /// registration, or an error if the token cannot be stored.
    #[instrument(skip_all)]
    pub async fn register(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Navigation> {
        if password != confirm_password {
            bail!("Passwords do not match");
        }

        let account = NewAccount {
            username: String::from(username),
            email: String::from(email),
            password: String::from(password),
        };
        match self.api.register(&account).await? {
            Authed::Ok(user) => tracing::info!("Registered account {}", user.username),
            Authed::Unauthenticated => {
                self.expire_session();
                return Ok(Navigation::Login);
            }
        }

        match self
            .api
            .login(&Credentials::new(username, password))
            .await
        {
            Ok(token) => {
                self.session.sign_in(token.access_token)?;
                Ok(Navigation::Catalog)
            }
            Err(e) => {
                tracing::warn!("Account {username} was created but automatic login failed: {e:#}");
                Ok(Navigation::Login)
            }
        }
    }

    /// Ends the session and resets the catalog state.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored token cannot be removed.
    pub fn logout(&mut self) -> Result<Navigation> {
        self.session.sign_out()?;
        self.filters = FilterState::default();
        self.page = PageState::default();
        self.listing = ListingView::Idle;
        self.pagination = None;
        self.options = FilterOptions::default();
        self.detail = None;
        tracing::info!("Logged out");
        Ok(Navigation::Login)
    }

    /// Loads every filter option source concurrently.
    ///
    /// Sources that fail are logged and left empty.
    #[instrument(skip_all)]
    pub async fn load_filters(&mut self) -> Authed<()> {
        let Some(token) = self.token() else {
            return Authed::Unauthenticated;
        };

        let (types, categories, ratings, years, countries) = tokio::join!(
            self.api.show_types(&token),
            self.api.categories(&token),
            self.api.ratings(&token),
            self.api.year_range(&token),
            self.api.countries(&token),
        );

        let mut unauthenticated = false;
        let options = FilterOptions {
            types: take_source(types, "show types", &mut unauthenticated).unwrap_or_default(),
            categories: take_source(categories, "categories", &mut unauthenticated)
                .map(|list| list.into_iter().map(|c| c.name).collect())
                .unwrap_or_default(),
            ratings: take_source(ratings, "ratings", &mut unauthenticated)
                .map(|list| list.into_iter().map(|r| r.name).collect())
                .unwrap_or_default(),
            years: take_source(years, "years", &mut unauthenticated)
                .map(|range| range.years_descending())
                .unwrap_or_default(),
            countries: take_source(countries, "countries", &mut unauthenticated)
                .unwrap_or_default(),
        };

        if unauthenticated {
            self.expire_session();
            return Authed::Unauthenticated;
        }

        tracing::debug!(
            types = options.types.len(),
            categories = options.categories.len(),
            ratings = options.ratings.len(),
            years = options.years.len(),
            countries = options.countries.len(),
            "Filter options loaded"
        );
        self.options = options;
        Authed::Ok(())
    }

    /// Fetches `page` with the active filters and updates the views.
    ///
    /// An empty or failed result clears the strip and resets the page state
    /// to a single page.
    #[instrument(skip(self))]
    pub async fn load_shows(&mut self, page: u32) -> Authed<()> {
        let Some(token) = self.token() else {
            return Authed::Unauthenticated;
        };

        self.listing = ListingView::Loading { page };
        let query = ShowQuery::new(page, PER_PAGE).filters(self.filters.clone());
        match self.api.list_shows(&token, &query).await {
            Ok(Authed::Ok(result)) => {
                self.render_page(result);
                Authed::Ok(())
            }
            Ok(Authed::Unauthenticated) => {
                self.expire_session();
                Authed::Unauthenticated
            }
            Err(e) => {
                tracing::error!("Failed to load shows: {e:#}");
                self.listing = ListingView::Error {
                    message: format!("{e:#}"),
                };
                self.page = PageState::default();
                self.pagination = None;
                Authed::Ok(())
            }
        }
    }

    fn render_page(&mut self, result: ShowPage) {
        if result.items.is_empty() {
            tracing::debug!("No shows matched");
            self.listing = ListingView::Empty;
            self.page = PageState::default();
            self.pagination = None;
            return;
        }

        self.page = PageState {
            current: result.page.max(1),
            total: result.pages.max(1),
        };
        tracing::debug!(
            page = self.page.current,
            pages = self.page.total,
            items = result.items.len(),
            total = result.total,
            "Shows loaded"
        );
        self.pagination = Some(PaginationStrip::new(self.page.current, self.page.total));
        self.listing = ListingView::Rendered {
            shows: result.items,
            total: result.total,
        };
    }

    /// Navigates to `page`.
    ///
    /// Out-of-range pages are ignored and yield `Ok(false)`.
    pub async fn go_to_page(&mut self, page: u32) -> Authed<bool> {
        if !self.page.contains(page) {
            tracing::debug!(page, total = self.page.total, "Ignoring out-of-range page");
            return Authed::Ok(false);
        }
        self.load_shows(page).await.map(|()| true)
    }

    /// Navigates to the next page, if any.
    pub async fn next_page(&mut self) -> Authed<bool> {
        let next = self.page.current.saturating_add(1);
        self.go_to_page(next).await
    }

    /// Navigates to the previous page, if any.
    pub async fn prev_page(&mut self) -> Authed<bool> {
        let prev = self.page.current.saturating_sub(1);
        self.go_to_page(prev).await
    }

    /// Replaces the filters without fetching.
    pub fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters;
    }

    /// Replaces the filters and reloads from page 1.
    pub async fn apply_filters(&mut self, filters: FilterState) -> Authed<()> {
        self.filters = filters;
        self.page.current = 1;
        self.load_shows(1).await
    }

    /// Clears every filter and reloads from page 1.
    pub async fn reset_filters(&mut self) -> Authed<()> {
        self.apply_filters(FilterState::default()).await
    }

    /// Opens the detail overlay for the rendered show at `index`.
    ///
    /// Returns `false` when no such card exists.
    pub fn open_detail(&mut self, index: usize) -> bool {
        let Some(show) = self.listing.shows().get(index) else {
            return false;
        };
        self.detail = Some(DetailView::from_show(show));
        true
    }

    /// Closes the detail overlay.
    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    /// Fetches a single show and opens its detail overlay.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails (including an unknown ID).
    #[instrument(skip(self))]
    pub async fn open_show(&mut self, id: u64) -> Result<Authed<()>> {
        let Some(token) = self.token() else {
            return Ok(Authed::Unauthenticated);
        };
        match self.api.show(&token, id).await? {
            Authed::Ok(show) => {
                self.detail = Some(DetailView::from_show(&show));
                Ok(Authed::Ok(()))
            }
            Authed::Unauthenticated => {
                self.expire_session();
                Ok(Authed::Unauthenticated)
            }
        }
    }
}
