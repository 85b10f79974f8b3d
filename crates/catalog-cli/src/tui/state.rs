//! Browser TUI state management.

use catalog_api::FilterState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use ratatui::widgets::TableState;

use crate::controller::filters::FilterOptions;

/// Input mode for the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Grid navigation.
    Normal,
    /// Editing the filter form.
    Filter,
}

/// A control of the filter form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    /// Free-text search.
    Search,
    /// Show type select.
    Type,
    /// Category select.
    Category,
    /// Rating select.
    Rating,
    /// Lower year select.
    YearFrom,
    /// Upper year select.
    YearTo,
    /// Country text input.
    Country,
}

impl FilterField {
    /// Form order.
    pub const ALL: [Self; 7] = [
        Self::Search,
        Self::Type,
        Self::Category,
        Self::Rating,
        Self::YearFrom,
        Self::YearTo,
        Self::Country,
    ];

    /// Label shown next to the control.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Search => "Search",
            Self::Type => "Type",
            Self::Category => "Category",
            Self::Rating => "Rating",
            Self::YearFrom => "Year from",
            Self::YearTo => "Year to",
            Self::Country => "Country",
        }
    }

    /// Whether the control takes typed text (otherwise it cycles options).
    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(self, Self::Search | Self::Country)
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }
}

/// Draft filter values being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterForm {
    /// Values not yet applied.
    pub draft: FilterState,
    /// Focused control.
    pub field: FilterField,
}

impl FilterForm {
    /// Starts editing from the active `filters`.
    #[must_use]
    pub fn new(filters: &FilterState) -> Self {
        Self {
            draft: filters.clone(),
            field: FilterField::Search,
        }
    }

    /// Current value of `field`.
    #[must_use]
    pub fn value(&self, field: FilterField) -> &str {
        match field {
            FilterField::Search => &self.draft.search,
            FilterField::Type => &self.draft.kind,
            FilterField::Category => &self.draft.category,
            FilterField::Rating => &self.draft.rating,
            FilterField::YearFrom => &self.draft.year_from,
            FilterField::YearTo => &self.draft.year_to,
            FilterField::Country => &self.draft.country,
        }
    }

    const fn value_mut(&mut self, field: FilterField) -> &mut String {
        match field {
            FilterField::Search => &mut self.draft.search,
            FilterField::Type => &mut self.draft.kind,
            FilterField::Category => &mut self.draft.category,
            FilterField::Rating => &mut self.draft.rating,
            FilterField::YearFrom => &mut self.draft.year_from,
            FilterField::YearTo => &mut self.draft.year_to,
            FilterField::Country => &mut self.draft.country,
        }
    }

    /// Focuses the next control (wraps).
    pub fn next_field(&mut self) {
        let next = self.field.position().saturating_add(1);
        self.field = FilterField::ALL
            .get(next)
            .copied()
            .unwrap_or(FilterField::Search);
    }

    /// Focuses the previous control (wraps).
    pub fn prev_field(&mut self) {
        self.field = match self.field.position().checked_sub(1) {
            Some(prev) => FilterField::ALL
                .get(prev)
                .copied()
                .unwrap_or(FilterField::Search),
            None => FilterField::Country,
        };
    }

    /// Appends a character to a text control.
    pub fn push(&mut self, c: char) {
        if self.field.is_text() {
            self.value_mut(self.field).push(c);
        }
    }

    /// Removes the last character of a text control.
    pub fn pop(&mut self) {
        if self.field.is_text() {
            self.value_mut(self.field).pop();
        }
    }

    /// Steps a select control through `""` (all) and its options.
    pub fn cycle(&mut self, options: &FilterOptions, forward: bool) {
        let choices: Vec<String> = match self.field {
            FilterField::Search | FilterField::Country => return,
            FilterField::Type => options.types.clone(),
            FilterField::Category => options.categories.clone(),
            FilterField::Rating => options.ratings.clone(),
            FilterField::YearFrom | FilterField::YearTo => {
                options.years.iter().map(ToString::to_string).collect()
            }
        };

        let mut all = vec![String::new()];
        all.extend(choices);
        let last = all.len().saturating_sub(1);
        let current = all
            .iter()
            .position(|c| c == self.value(self.field))
            .unwrap_or(0);
        let next = if forward {
            if current >= last {
                0
            } else {
                current.saturating_add(1)
            }
        } else if current == 0 {
            last
        } else {
            current.saturating_sub(1)
        };
        if let Some(value) = all.get(next) {
            value.clone_into(self.value_mut(self.field));
        }
    }
}

/// Target of a pagination strip click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTarget {
    /// Previous page.
    Prev,
    /// Next page.
    Next,
    /// A numbered page.
    Page(u32),
}

/// Screen regions from the last draw, used for mouse hit testing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hitboxes {
    /// Table body (one row per line).
    pub rows: Rect,
    /// Clickable pagination controls.
    pub pages: Vec<(Rect, PageTarget)>,
    /// Detail overlay, when open.
    pub popup: Option<Rect>,
}

/// What the event loop should do after an input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Nothing beyond the local state change.
    None,
    /// Leave the browser.
    Quit,
    /// Fetch a page.
    GoTo(u32),
    /// Fetch the next page.
    Next,
    /// Fetch the previous page.
    Prev,
    /// Apply the given filters.
    Apply(FilterState),
    /// Clear all filters.
    Reset,
    /// Open the detail overlay for a row.
    OpenDetail(usize),
    /// Close the detail overlay.
    CloseDetail,
}

/// Read-only facts about the current view needed to map input.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    /// Rendered rows.
    pub rows: usize,
    /// Final page number.
    pub total_pages: u32,
    /// Whether the detail overlay is open.
    pub detail_open: bool,
    /// Active filters.
    pub filters: &'a FilterState,
    /// Filter options.
    pub options: &'a FilterOptions,
}

/// State for the browser TUI.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct BrowserState {
    /// Current input mode.
    pub input_mode: InputMode,
    /// Table state for the grid (selection and scroll).
    pub table_state: TableState,
    /// Filter form (meaningful in `Filter` mode).
    pub form: FilterForm,
    /// Footer status message.
    pub status: Option<String>,
    /// Regions from the last draw.
    pub hitboxes: Hitboxes,
}

impl Default for BrowserState {
    fn default() -> Self {
        Self {
            input_mode: InputMode::Normal,
            table_state: TableState::default(),
            form: FilterForm::new(&FilterState::default()),
            status: None,
            hitboxes: Hitboxes::default(),
        }
    }
}

impl BrowserState {
    /// Returns the cursor position.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    /// Scrolls back to the top after the listing changed.
    pub fn reset_viewport(&mut self, rows: usize) {
        *self.table_state.offset_mut() = 0;
        self.table_state
            .select(if rows == 0 { None } else { Some(0) });
    }

    /// Moves the cursor up.
    pub fn move_up(&mut self) {
        let cursor = self.cursor();
        if cursor > 0 {
            self.table_state.select(Some(cursor.saturating_sub(1)));
        }
    }

    /// Moves the cursor down, bounded by `rows`.
    pub fn move_down(&mut self, rows: usize) {
        let cursor = self.cursor();
        if cursor.saturating_add(1) < rows {
            self.table_state.select(Some(cursor.saturating_add(1)));
        }
    }

    /// Maps a key press to an action.
    pub fn handle_key(&mut self, key: KeyEvent, view: &View<'_>) -> Action {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }
        match self.input_mode {
            InputMode::Filter => self.handle_filter_key(key.code, view),
            InputMode::Normal if view.detail_open => match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Action::CloseDetail,
                _ => Action::None,
            },
            InputMode::Normal => self.handle_normal_key(key.code, view),
        }
    }

    fn handle_normal_key(&mut self, key: KeyCode, view: &View<'_>) -> Action {
        match key {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_up();
                Action::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_down(view.rows);
                Action::None
            }
            KeyCode::Enter if view.rows > 0 => Action::OpenDetail(self.cursor()),
            KeyCode::Right | KeyCode::PageDown | KeyCode::Char('n') => Action::Next,
            KeyCode::Left | KeyCode::PageUp | KeyCode::Char('p') => Action::Prev,
            KeyCode::Home | KeyCode::Char('g') => Action::GoTo(1),
            KeyCode::End | KeyCode::Char('G') => Action::GoTo(view.total_pages),
            KeyCode::Char('/' | 'f') => {
                self.form = FilterForm::new(view.filters);
                self.input_mode = InputMode::Filter;
                Action::None
            }
            KeyCode::Char('r') => Action::Reset,
            _ => Action::None,
        }
    }

    fn handle_filter_key(&mut self, key: KeyCode, view: &View<'_>) -> Action {
        match key {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                Action::None
            }
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                Action::Apply(self.form.draft.clone())
            }
            KeyCode::Tab | KeyCode::Down => {
                self.form.next_field();
                Action::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.form.prev_field();
                Action::None
            }
            KeyCode::Right => {
                self.form.cycle(view.options, true);
                Action::None
            }
            KeyCode::Left => {
                self.form.cycle(view.options, false);
                Action::None
            }
            KeyCode::Backspace => {
                self.form.pop();
                Action::None
            }
            KeyCode::Char(c) => {
                self.form.push(c);
                Action::None
            }
            _ => Action::None,
        }
    }

    /// Maps a mouse event to an action using the last drawn regions.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, view: &View<'_>) -> Action {
        if self.input_mode == InputMode::Filter {
            return Action::None;
        }
        let pos = Position::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::ScrollDown if !view.detail_open => {
                self.move_down(view.rows);
                Action::None
            }
            MouseEventKind::ScrollUp if !view.detail_open => {
                self.move_up();
                Action::None
            }
            MouseEventKind::Down(MouseButton::Left) if view.detail_open => {
                match self.hitboxes.popup {
                    Some(popup) if popup.contains(pos) => Action::None,
                    _ => Action::CloseDetail,
                }
            }
            MouseEventKind::Down(MouseButton::Left) => self.click(pos, view),
            _ => Action::None,
        }
    }

    fn click(&mut self, pos: Position, view: &View<'_>) -> Action {
        if let Some((_, target)) = self.hitboxes.pages.iter().find(|(r, _)| r.contains(pos)) {
            return match *target {
                PageTarget::Prev => Action::Prev,
                PageTarget::Next => Action::Next,
                PageTarget::Page(page) => Action::GoTo(page),
            };
        }
        if self.hitboxes.rows.contains(pos) {
            let line = usize::from(pos.y.saturating_sub(self.hitboxes.rows.y));
            let index = self.table_state.offset().saturating_add(line);
            if index < view.rows {
                self.table_state.select(Some(index));
                return Action::OpenDetail(index);
            }
        }
        Action::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> FilterOptions {
        FilterOptions {
            types: vec![String::from("Movie"), String::from("TV Show")],
            categories: vec![String::from("Documentaries")],
            ratings: vec![String::from("TV-MA")],
            years: vec![2021, 2020],
            countries: Vec::new(),
        }
    }

    fn view<'a>(filters: &'a FilterState, options: &'a FilterOptions) -> View<'a> {
        View {
            rows: 3,
            total_pages: 10,
            detail_open: false,
            filters,
            options,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click_at(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_cursor_bounds() {
        // Arrange
        let mut state = BrowserState::default();
        state.reset_viewport(2);

        // Act & Assert
        state.move_down(2);
        assert_eq!(state.cursor(), 1);
        state.move_down(2); // at end, should not move
        assert_eq!(state.cursor(), 1);
        state.move_up();
        state.move_up(); // at start, should not move
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn test_reset_viewport_empty_clears_selection() {
        // Arrange
        let mut state = BrowserState::default();
        state.reset_viewport(3);

        // Act
        state.reset_viewport(0);

        // Assert
        assert!(state.table_state.selected().is_none());
        assert_eq!(state.table_state.offset(), 0);
    }

    #[test]
    fn test_normal_keys() {
        // Arrange
        let filters = FilterState::default();
        let options = options();
        let view = view(&filters, &options);
        let mut state = BrowserState::default();
        state.reset_viewport(3);

        // Act & Assert
        assert_eq!(state.handle_key(key(KeyCode::Right), &view), Action::Next);
        assert_eq!(state.handle_key(key(KeyCode::Left), &view), Action::Prev);
        assert_eq!(state.handle_key(key(KeyCode::Home), &view), Action::GoTo(1));
        assert_eq!(state.handle_key(key(KeyCode::End), &view), Action::GoTo(10));
        assert_eq!(state.handle_key(key(KeyCode::Char('r')), &view), Action::Reset);
        assert_eq!(state.handle_key(key(KeyCode::Down), &view), Action::None);
        assert_eq!(
            state.handle_key(key(KeyCode::Enter), &view),
            Action::OpenDetail(1)
        );
        assert_eq!(state.handle_key(key(KeyCode::Char('q')), &view), Action::Quit);
        assert_eq!(
            state.handle_key(
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                &view
            ),
            Action::Quit
        );
    }

    #[test]
    fn test_detail_open_keys_only_close() {
        // Arrange
        let filters = FilterState::default();
        let options = options();
        let view = View {
            detail_open: true,
            ..view(&filters, &options)
        };
        let mut state = BrowserState::default();

        // Act & Assert
        assert_eq!(state.handle_key(key(KeyCode::Right), &view), Action::None);
        assert_eq!(
            state.handle_key(key(KeyCode::Esc), &view),
            Action::CloseDetail
        );
    }

    #[test]
    fn test_filter_form_editing_and_apply() {
        // Arrange
        let filters = FilterState {
            search: String::from("wat"),
            ..FilterState::default()
        };
        let options = options();
        let view = view(&filters, &options);
        let mut state = BrowserState::default();

        // Act: open form, type into search, pick the second type
        state.handle_key(key(KeyCode::Char('/')), &view);
        assert_eq!(state.input_mode, InputMode::Filter);
        state.handle_key(key(KeyCode::Char('e')), &view);
        state.handle_key(key(KeyCode::Char('r')), &view);
        state.handle_key(key(KeyCode::Tab), &view);
        state.handle_key(key(KeyCode::Right), &view);
        state.handle_key(key(KeyCode::Right), &view);
        let action = state.handle_key(key(KeyCode::Enter), &view);

        // Assert
        assert_eq!(
            action,
            Action::Apply(FilterState {
                search: String::from("water"),
                kind: String::from("TV Show"),
                ..FilterState::default()
            })
        );
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_filter_form_cancel_applies_nothing() {
        // Arrange
        let filters = FilterState::default();
        let options = options();
        let view = view(&filters, &options);
        let mut state = BrowserState::default();
        state.handle_key(key(KeyCode::Char('f')), &view);

        // Act
        state.handle_key(key(KeyCode::Char('x')), &view);
        let action = state.handle_key(key(KeyCode::Esc), &view);

        // Assert
        assert_eq!(action, Action::None);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_cycle_wraps_through_all() {
        // Arrange
        let options = options();
        let mut form = FilterForm::new(&FilterState::default());
        form.field = FilterField::YearFrom;

        // Act & Assert
        form.cycle(&options, true);
        assert_eq!(form.draft.year_from, "2021");
        form.cycle(&options, true);
        assert_eq!(form.draft.year_from, "2020");
        form.cycle(&options, true);
        assert_eq!(form.draft.year_from, "");
        form.cycle(&options, false);
        assert_eq!(form.draft.year_from, "2020");
    }

    #[test]
    fn test_select_fields_ignore_typing() {
        // Arrange
        let mut form = FilterForm::new(&FilterState::default());
        form.field = FilterField::Rating;

        // Act
        form.push('x');

        // Assert
        assert!(form.draft.rating.is_empty());
    }

    #[test]
    fn test_field_navigation_wraps() {
        // Arrange
        let mut form = FilterForm::new(&FilterState::default());

        // Act & Assert
        form.prev_field();
        assert_eq!(form.field, FilterField::Country);
        form.next_field();
        assert_eq!(form.field, FilterField::Search);
    }

    #[test]
    fn test_click_outside_popup_closes_detail() {
        // Arrange
        let filters = FilterState::default();
        let options = options();
        let view = View {
            detail_open: true,
            ..view(&filters, &options)
        };
        let mut state = BrowserState::default();
        state.hitboxes.popup = Some(Rect::new(10, 5, 40, 10));

        // Act & Assert
        assert_eq!(state.handle_mouse(click_at(20, 8), &view), Action::None);
        assert_eq!(
            state.handle_mouse(click_at(2, 2), &view),
            Action::CloseDetail
        );
    }

    #[test]
    fn test_click_row_and_page() {
        // Arrange
        let filters = FilterState::default();
        let options = options();
        let view = view(&filters, &options);
        let mut state = BrowserState::default();
        state.hitboxes.rows = Rect::new(1, 4, 60, 10);
        state.hitboxes.pages = vec![
            (Rect::new(1, 20, 6, 1), PageTarget::Prev),
            (Rect::new(8, 20, 1, 1), PageTarget::Page(1)),
        ];

        // Act & Assert
        assert_eq!(
            state.handle_mouse(click_at(5, 6), &view),
            Action::OpenDetail(2)
        );
        assert_eq!(state.cursor(), 2);
        assert_eq!(state.handle_mouse(click_at(5, 9), &view), Action::None);
        assert_eq!(state.handle_mouse(click_at(3, 20), &view), Action::Prev);
        assert_eq!(state.handle_mouse(click_at(8, 20), &view), Action::GoTo(1));
    }
}
