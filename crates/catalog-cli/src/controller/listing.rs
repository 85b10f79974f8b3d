//! Listing view state and show cards.

use catalog_api::{Show, ShowKind};

/// Heading of the empty-state placeholder (also the stats text).
pub const EMPTY_TITLE: &str = "No shows found";

/// Hint shown under the empty-state heading.
pub const EMPTY_HINT: &str = "Try adjusting your filters or search query";

/// Heading of the error placeholder.
pub const ERROR_TITLE: &str = "Error loading shows";

/// Shown instead of a missing year or duration.
const NOT_AVAILABLE: &str = "N/A";

/// Categories shown on a card.
const CARD_CATEGORIES: usize = 2;

/// State of the show grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ListingView {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A request for `page` is in flight.
    Loading {
        /// Requested page.
        page: u32,
    },
    /// Shows from the last successful response, in server order.
    Rendered {
        /// Shows on the page.
        shows: Vec<Show>,
        /// Total number of matching shows.
        total: u64,
    },
    /// The server returned no shows.
    Empty,
    /// The request failed.
    Error {
        /// Failure message.
        message: String,
    },
}

impl ListingView {
    /// Shows currently rendered (empty unless `Rendered`).
    #[must_use]
    pub fn shows(&self) -> &[Show] {
        match self {
            Self::Rendered { shows, .. } => shows,
            _ => &[],
        }
    }

    /// Stats line above the grid.
    ///
    /// `None` while idle, loading, or after an error (the previous text stays).
    #[must_use]
    pub fn stats(&self) -> Option<String> {
        match self {
            Self::Rendered { shows, total } => {
                Some(format!("Showing {} of {} shows", shows.len(), total))
            }
            Self::Empty => Some(String::from(EMPTY_TITLE)),
            _ => None,
        }
    }

    /// Cards for the rendered shows.
    #[must_use]
    pub fn cards(&self) -> Vec<ShowCard> {
        self.shows().iter().map(ShowCard::from_show).collect()
    }
}

/// Grid card summarising one show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowCard {
    /// Movie or series.
    pub kind: ShowKind,
    /// Type badge text (raw server type).
    pub badge: String,
    /// Title.
    pub title: String,
    /// Release year or `N/A`.
    pub year: String,
    /// Duration or `N/A`.
    pub duration: String,
    /// Rating, omitted when absent.
    pub rating: Option<String>,
    /// Up to two category names.
    pub categories: Vec<String>,
    /// Synopsis, omitted when absent.
    pub description: Option<String>,
}

impl ShowCard {
    /// Builds the card for `show`.
    #[must_use]
    pub fn from_show(show: &Show) -> Self {
        Self {
            kind: show.show_kind(),
            badge: show.kind.clone(),
            title: show.title.clone(),
            year: show
                .release_year
                .map_or_else(|| String::from(NOT_AVAILABLE), |y| y.to_string()),
            duration: non_empty(show.duration.as_deref())
                .map_or_else(|| String::from(NOT_AVAILABLE), String::from),
            rating: non_empty(show.rating.as_deref()).map(String::from),
            categories: show
                .categories
                .iter()
                .take(CARD_CATEGORIES)
                .map(|c| c.name.clone())
                .collect(),
            description: non_empty(show.description.as_deref()).map(String::from),
        }
    }
}

/// Treats blank strings as absent.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use catalog_api::Category;

    use super::*;
    use crate::controller::fake::sample_show;

    #[test]
    fn test_stats_text() {
        // Arrange
        let rendered = ListingView::Rendered {
            shows: vec![sample_show(1, "A"), sample_show(2, "B")],
            total: 42,
        };

        // Act & Assert
        assert_eq!(rendered.stats().unwrap(), "Showing 2 of 42 shows");
        assert_eq!(ListingView::Empty.stats().unwrap(), "No shows found");
        assert!(ListingView::Idle.stats().is_none());
        assert!(
            ListingView::Error {
                message: String::from("boom")
            }
            .stats()
            .is_none()
        );
    }

    #[test]
    fn test_card_limits_categories_and_fills_missing() {
        // Arrange
        let mut show = sample_show(1, "Blood & Water");
        show.kind = String::from("TV Show");
        show.release_year = None;
        show.duration = Some(String::from("  "));
        show.rating = None;
        show.description = None;
        show.categories = ["International TV Shows", "TV Dramas", "TV Mysteries"]
            .iter()
            .zip(1..)
            .map(|(name, id)| Category {
                id,
                name: String::from(*name),
            })
            .collect();

        // Act
        let card = ShowCard::from_show(&show);

        // Assert
        assert_eq!(card.kind, ShowKind::Series);
        assert_eq!(card.badge, "TV Show");
        assert_eq!(card.year, "N/A");
        assert_eq!(card.duration, "N/A");
        assert!(card.rating.is_none());
        assert!(card.description.is_none());
        assert_eq!(card.categories, vec!["International TV Shows", "TV Dramas"]);
    }

    #[test]
    fn test_cards_follow_server_order() {
        // Arrange
        let view = ListingView::Rendered {
            shows: vec![sample_show(9, "Zeta"), sample_show(3, "Alpha")],
            total: 2,
        };

        // Act
        let titles: Vec<String> = view.cards().into_iter().map(|c| c.title).collect();

        // Assert
        assert_eq!(titles, vec!["Zeta", "Alpha"]);
    }
}
