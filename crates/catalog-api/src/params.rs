//! Listing query parameters.

/// Active search and filter criteria for `shows/`.
///
/// Every field holds the raw control value, sent verbatim; an empty value
/// means "no filter" and is never sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Free-text search over title, director, cast, description.
    pub search: String,
    /// Show type (`"Movie"` / `"TV Show"`).
    pub kind: String,
    /// Category name.
    pub category: String,
    /// Rating name.
    pub rating: String,
    /// Lower release year bound (inclusive).
    pub year_from: String,
    /// Upper release year bound (inclusive).
    pub year_to: String,
    /// Country substring.
    pub country: String,
}

impl FilterState {
    /// Returns `true` when no filter is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }

    /// Yields `(query key, value)` for every non-empty filter, in a fixed order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("search", self.search.as_str()),
            ("type", self.kind.as_str()),
            ("category", self.category.as_str()),
            ("rating", self.rating.as_str()),
            ("year_from", self.year_from.as_str()),
            ("year_to", self.year_to.as_str()),
            ("country", self.country.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
    }
}

/// Request parameters for `shows/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowQuery {
    /// 1-based page number.
    pub page: u32,
    /// Page size (backend accepts 1..=100).
    pub per_page: u32,
    /// Filters to apply.
    pub filters: FilterState,
}

impl ShowQuery {
    /// Creates a query for `page` with the given page size and no filters.
    #[must_use]
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page,
            per_page,
            filters: FilterState::default(),
        }
    }

    /// Sets the filters.
    #[must_use]
    pub fn filters(mut self, filters: FilterState) -> Self {
        self.filters = filters;
        self
    }

    /// Builds the query string pairs: `page`, `per_page`, then non-empty filters.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut query: Vec<(&'static str, String)> = vec![
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
        ];
        query.extend(
            self.filters
                .entries()
                .map(|(key, value)| (key, String::from(value))),
        );
        query
    }
}
