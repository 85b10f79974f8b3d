//! Scripted `LocalCatalogApi` for controller and TUI tests.
#![allow(clippy::future_not_send)]
#![allow(clippy::unwrap_used)]

use std::cell::RefCell;

use anyhow::{Result, anyhow};
use catalog_api::{
    Authed, Category, Credentials, CurrentUser, LocalCatalogApi, NewAccount, Rating, Show,
    ShowPage, ShowQuery, TokenResponse, YearRange,
};
use catalog_store::{SessionStore, open_in_memory};

use super::session::Session;

/// Scripted response.
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(T),
    Unauthenticated,
    Fail(&'static str),
}

impl<T: Clone> Reply<T> {
    fn to_result(&self) -> Result<Authed<T>> {
        match self {
            Self::Ok(value) => Ok(Authed::Ok(value.clone())),
            Self::Unauthenticated => Ok(Authed::Unauthenticated),
            Self::Fail(message) => Err(anyhow!(*message)),
        }
    }
}

/// Fake backend recording every call.
#[derive(Debug)]
pub struct FakeApi {
    pub calls: RefCell<Vec<&'static str>>,
    pub queries: RefCell<Vec<ShowQuery>>,
    pub login: Result<String, &'static str>,
    pub register: Reply<CurrentUser>,
    pub me: Reply<CurrentUser>,
    pub types: Reply<Vec<String>>,
    pub categories: Reply<Vec<Category>>,
    pub ratings: Reply<Vec<Rating>>,
    pub years: Reply<YearRange>,
    pub countries: Reply<Vec<String>>,
    pub shows: Reply<ShowPage>,
    pub show: Reply<Show>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            queries: RefCell::new(Vec::new()),
            login: Ok(String::from("fresh-token")),
            register: Reply::Ok(alice()),
            me: Reply::Ok(alice()),
            types: Reply::Ok(vec![String::from("Movie"), String::from("TV Show")]),
            categories: Reply::Ok(vec![Category {
                id: 1,
                name: String::from("Documentaries"),
            }]),
            ratings: Reply::Ok(vec![Rating {
                id: 1,
                name: String::from("TV-MA"),
            }]),
            years: Reply::Ok(YearRange {
                min: Some(2019),
                max: Some(2021),
            }),
            countries: Reply::Ok(vec![String::from("South Africa")]),
            shows: Reply::Ok(sample_page(1, 3, 2)),
            show: Reply::Ok(sample_show(7, "Blood & Water")),
        }
    }
}

impl FakeApi {
    fn record(&self, call: &'static str) {
        self.calls.borrow_mut().push(call);
    }

    /// Calls recorded so far.
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }
}

impl LocalCatalogApi for FakeApi {
    async fn login(&self, _credentials: &Credentials) -> Result<TokenResponse> {
        self.record("login");
        match &self.login {
            Ok(token) => Ok(TokenResponse {
                access_token: token.clone(),
                token_type: Some(String::from("bearer")),
            }),
            Err(message) => Err(anyhow!(*message)),
        }
    }

    async fn register(&self, _account: &NewAccount) -> Result<Authed<CurrentUser>> {
        self.record("register");
        self.register.to_result()
    }

    async fn me(&self, _token: &str) -> Result<Authed<CurrentUser>> {
        self.record("me");
        self.me.to_result()
    }

    async fn show_types(&self, _token: &str) -> Result<Authed<Vec<String>>> {
        self.record("types");
        self.types.to_result()
    }

    async fn categories(&self, _token: &str) -> Result<Authed<Vec<Category>>> {
        self.record("categories");
        self.categories.to_result()
    }

    async fn ratings(&self, _token: &str) -> Result<Authed<Vec<Rating>>> {
        self.record("ratings");
        self.ratings.to_result()
    }

    async fn year_range(&self, _token: &str) -> Result<Authed<YearRange>> {
        self.record("years");
        self.years.to_result()
    }

    async fn countries(&self, _token: &str) -> Result<Authed<Vec<String>>> {
        self.record("countries");
        self.countries.to_result()
    }

    async fn list_shows(&self, _token: &str, query: &ShowQuery) -> Result<Authed<ShowPage>> {
        self.record("shows");
        self.queries.borrow_mut().push(query.clone());
        self.shows.to_result().map(|page| {
            page.map(|mut page| {
                page.page = query.page;
                page
            })
        })
    }

    async fn show(&self, _token: &str, _id: u64) -> Result<Authed<Show>> {
        self.record("show");
        self.show.to_result()
    }
}

pub fn alice() -> CurrentUser {
    CurrentUser {
        username: String::from("alice"),
        email: Some(String::from("alice@example.com")),
    }
}

/// A fully populated movie.
pub fn sample_show(id: u64, title: &str) -> Show {
    Show {
        id,
        show_id: format!("s{id}"),
        kind: String::from("Movie"),
        title: String::from(title),
        director: None,
        cast: None,
        country: Some(String::from("United States")),
        date_added: None,
        release_year: Some(2020),
        rating: Some(String::from("PG-13")),
        duration: Some(String::from("90 min")),
        listed_in: None,
        description: Some(String::from("A description.")),
        categories: Vec::new(),
    }
}

/// A page holding `count` shows out of `pages` pages.
pub fn sample_page(page: u32, pages: u32, count: u64) -> ShowPage {
    let items: Vec<Show> = (1..=count)
        .map(|id| sample_show(id, &format!("Show {id}")))
        .collect();
    ShowPage {
        total: u64::from(pages).saturating_mul(20),
        items,
        page,
        per_page: 20,
        pages,
    }
}

/// Session over an in-memory store, optionally holding `token`.
pub fn session_with(token: Option<&str>) -> Session {
    let store = SessionStore::new(open_in_memory().unwrap());
    if let Some(token) = token {
        store.save_token(token).unwrap();
    }
    Session::restore(store).unwrap()
}
