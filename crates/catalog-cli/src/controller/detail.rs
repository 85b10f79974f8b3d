//! Detail overlay content.

use catalog_api::Show;

use super::listing::non_empty;

/// Shown instead of a missing meta value.
const NOT_AVAILABLE: &str = "N/A";

/// One optional block of the detail body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailSection {
    /// Section heading.
    pub heading: &'static str,
    /// Section text.
    pub body: String,
}

/// Title and structured body of the detail overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    /// Show title.
    pub title: String,
    /// Always-present `(label, value)` pairs: Type, Year, Duration, Rating.
    pub meta: Vec<(&'static str, String)>,
    /// Optional sections; a section is absent when its field is empty.
    pub sections: Vec<DetailSection>,
}

impl DetailView {
    /// Builds the overlay content for `show`.
    #[must_use]
    pub fn from_show(show: &Show) -> Self {
        let or_na = |value: Option<&str>| String::from(non_empty(value).unwrap_or(NOT_AVAILABLE));

        let meta = vec![
            ("Type", show.kind.clone()),
            (
                "Year",
                show.release_year
                    .map_or_else(|| String::from(NOT_AVAILABLE), |y| y.to_string()),
            ),
            ("Duration", or_na(show.duration.as_deref())),
            ("Rating", or_na(show.rating.as_deref())),
        ];

        let categories = show
            .categories
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let sections = [
            ("Director", show.director.as_deref()),
            ("Cast", show.cast.as_deref()),
            ("Country", show.country.as_deref()),
            ("Description", show.description.as_deref()),
            ("Categories", Some(categories.as_str())),
            ("Date Added", show.date_added.as_deref()),
        ]
        .into_iter()
        .filter_map(|(heading, value)| {
            non_empty(value).map(|body| DetailSection {
                heading,
                body: String::from(body),
            })
        })
        .collect();

        Self {
            title: show.title.clone(),
            meta,
            sections,
        }
    }

    /// Returns the section with `heading`, if present.
    #[cfg(test)]
    #[must_use]
    pub fn section(&self, heading: &str) -> Option<&DetailSection> {
        self.sections.iter().find(|s| s.heading == heading)
    }
}
