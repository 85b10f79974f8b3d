//! Page state and the windowed page strip.

use std::fmt;

/// Pages shown on either side of the current page.
const WINDOW: u32 = 2;

/// Current page and total page count, as last reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    /// 1-based current page.
    pub current: u32,
    /// Total number of pages (at least 1).
    pub total: u32,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            current: 1,
            total: 1,
        }
    }
}

impl PageState {
    /// Returns `true` if `page` lies within `[1, total]`.
    #[must_use]
    pub const fn contains(&self, page: u32) -> bool {
        page >= 1 && page <= self.total
    }
}

/// One entry of the page strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// A clickable page number.
    Page {
        /// Page number.
        number: u32,
        /// Whether this is the current page.
        active: bool,
    },
    /// A collapsed gap.
    Ellipsis,
}

/// Pagination control: prev/next plus a first/last-aware window of pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationStrip {
    /// Page entries in display order.
    pub items: Vec<PageItem>,
    /// Current page.
    pub current: u32,
    /// Final page.
    pub total: u32,
}

impl PaginationStrip {
    /// Builds the strip for `current` of `total` pages.
    ///
    /// Page 1 and the final page are always present, up to two pages are
    /// shown on either side of `current`, and any gap collapses into a
    /// single ellipsis.
    #[must_use]
    pub fn new(current: u32, total: u32) -> Self {
        let total = total.max(1);
        let current = current.clamp(1, total);

        let start = current.saturating_sub(WINDOW).max(1);
        let end = current.saturating_add(WINDOW).min(total);

        let mut items = Vec::new();
        if start > 1 {
            items.push(PageItem::Page {
                number: 1,
                active: false,
            });
            if start > 2 {
                items.push(PageItem::Ellipsis);
            }
        }
        items.extend((start..=end).map(|number| PageItem::Page {
            number,
            active: number == current,
        }));
        if end < total {
            if end < total.saturating_sub(1) {
                items.push(PageItem::Ellipsis);
            }
            items.push(PageItem::Page {
                number: total,
                active: false,
            });
        }

        Self {
            items,
            current,
            total,
        }
    }

    /// Whether the "previous" control is enabled.
    #[must_use]
    pub const fn prev_enabled(&self) -> bool {
        self.current > 1
    }

    /// Whether the "next" control is enabled.
    #[must_use]
    pub const fn next_enabled(&self) -> bool {
        self.current < self.total
    }

    /// Human-readable position, e.g. `"Page 5 of 10"`.
    #[must_use]
    pub fn info(&self) -> String {
        format!("Page {} of {}", self.current, self.total)
    }

    /// Page numbers present in the strip, in order.
    #[cfg(test)]
    #[must_use]
    pub fn page_numbers(&self) -> Vec<u32> {
        self.items
            .iter()
            .filter_map(|item| match item {
                PageItem::Page { number, .. } => Some(*number),
                PageItem::Ellipsis => None,
            })
            .collect()
    }
}

impl fmt::Display for PaginationStrip {
    /// Plain-text strip, e.g. `< 1 ... 3 4 [5] 6 7 ... 10 >`.
    ///
    /// Disabled prev/next controls render as `|`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.prev_enabled() { "<" } else { "|" })?;
        for item in &self.items {
            match item {
                PageItem::Page {
                    number,
                    active: true,
                } => write!(f, " [{number}]")?,
                PageItem::Page { number, .. } => write!(f, " {number}")?,
                PageItem::Ellipsis => f.write_str(" ...")?,
            }
        }
        f.write_str(if self.next_enabled() { " >" } else { " |" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn page(number: u32) -> PageItem {
        PageItem::Page {
            number,
            active: false,
        }
    }

    const fn active(number: u32) -> PageItem {
        PageItem::Page {
            number,
            active: true,
        }
    }

    #[test]
    fn test_middle_page_of_ten() {
        // Arrange & Act
        let strip = PaginationStrip::new(5, 10);

        // Assert
        assert_eq!(
            strip.items,
            vec![
                page(1),
                PageItem::Ellipsis,
                page(3),
                page(4),
                active(5),
                page(6),
                page(7),
                PageItem::Ellipsis,
                page(10),
            ]
        );
        assert!(strip.prev_enabled());
        assert!(strip.next_enabled());
        assert_eq!(strip.info(), "Page 5 of 10");
    }

    #[test]
    fn test_first_page_disables_prev() {
        // Arrange & Act
        let strip = PaginationStrip::new(1, 10);

        // Assert
        assert_eq!(
            strip.items,
            vec![
                active(1),
                page(2),
                page(3),
                PageItem::Ellipsis,
                page(10)
            ]
        );
        assert!(!strip.prev_enabled());
        assert!(strip.next_enabled());
    }

    #[test]
    fn test_last_page_disables_next() {
        // Arrange & Act
        let strip = PaginationStrip::new(10, 10);

        // Assert
        assert_eq!(
            strip.items,
            vec![
                page(1),
                PageItem::Ellipsis,
                page(8),
                page(9),
                active(10)
            ]
        );
        assert!(strip.prev_enabled());
        assert!(!strip.next_enabled());
    }

    #[test]
    fn test_no_ellipsis_for_adjacent_gap() {
        // Arrange & Act
        let strip = PaginationStrip::new(4, 7);

        // Assert: start = 2 and end = 6 touch both ends, so no gap markers
        assert_eq!(strip.page_numbers(), vec![1, 2, 3, 4, 5, 6, 7]);
        assert!(!strip.items.contains(&PageItem::Ellipsis));
    }

    #[test]
    fn test_single_page() {
        // Arrange & Act
        let strip = PaginationStrip::new(1, 1);

        // Assert
        assert_eq!(strip.items, vec![active(1)]);
        assert!(!strip.prev_enabled());
        assert!(!strip.next_enabled());
    }

    #[test]
    fn test_out_of_range_inputs_are_clamped() {
        // Arrange & Act
        let strip = PaginationStrip::new(0, 0);

        // Assert
        assert_eq!(strip.current, 1);
        assert_eq!(strip.total, 1);
        assert_eq!(strip.items, vec![active(1)]);
    }

    #[test]
    fn test_display() {
        // Arrange & Act & Assert
        assert_eq!(
            PaginationStrip::new(5, 10).to_string(),
            "< 1 ... 3 4 [5] 6 7 ... 10 >"
        );
        assert_eq!(PaginationStrip::new(1, 2).to_string(), "| [1] 2 >");
        assert_eq!(PaginationStrip::new(2, 2).to_string(), "< 1 [2] |");
    }

    #[test]
    fn test_page_state_contains() {
        // Arrange
        let state = PageState {
            current: 2,
            total: 3,
        };

        // Act & Assert
        assert!(!state.contains(0));
        assert!(state.contains(1));
        assert!(state.contains(3));
        assert!(!state.contains(4));
        assert_eq!(PageState::default().current, 1);
    }
}
