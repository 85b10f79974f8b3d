//! TUI rendering logic for the catalog browser.

use catalog_api::{LocalCatalogApi, ShowKind};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Row, Table, Wrap};

use super::state::{BrowserState, FilterField, InputMode, PageTarget};
use crate::controller::CatalogController;
use crate::controller::detail::DetailView;
use crate::controller::listing::{EMPTY_HINT, EMPTY_TITLE, ERROR_TITLE, ListingView};
use crate::controller::pagination::{PageItem, PaginationStrip};

/// Label for an unset select control.
const ALL: &str = "All";

/// Draws the browser UI and records hit regions in `state`.
#[allow(clippy::indexing_slicing)]
pub fn draw<A: LocalCatalogApi>(
    frame: &mut Frame,
    ctl: &CatalogController<A>,
    state: &mut BrowserState,
) {
    let header_height = if state.input_mode == InputMode::Filter {
        9
    } else {
        3
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_height), // filters + stats
            Constraint::Min(5),                // grid
            Constraint::Length(3),             // pagination strip
            Constraint::Length(3),             // footer
        ])
        .split(frame.area());

    if state.input_mode == InputMode::Filter {
        draw_filter_form(frame, chunks[0], state);
    } else {
        draw_header(frame, chunks[0], ctl);
    }
    draw_listing(frame, chunks[1], ctl.listing(), state);
    draw_pagination(frame, chunks[2], ctl.pagination(), state);
    draw_footer(frame, chunks[3], state);

    state.hitboxes.popup = ctl.detail().map(|detail| draw_detail(frame, detail));
}

/// Draws the active filter summary and stats line.
#[allow(clippy::indexing_slicing)]
fn draw_header<A: LocalCatalogApi>(frame: &mut Frame, area: Rect, ctl: &CatalogController<A>) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let summary: Vec<String> = ctl
        .filters()
        .entries()
        .map(|(key, value)| format!("{key}={value}"))
        .collect();
    let summary = if summary.is_empty() {
        String::from("(none)")
    } else {
        summary.join("  ")
    };
    let filters = Paragraph::new(summary)
        .block(Block::default().borders(Borders::ALL).title(" Filters: / "));
    frame.render_widget(filters, header_chunks[0]);

    let title = ctl.session().user().map_or_else(
        || String::from(" Catalog "),
        |user| format!(" Catalog ({}) ", user.username),
    );
    let stats = Paragraph::new(ctl.listing().stats().unwrap_or_default())
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(stats, header_chunks[1]);
}

/// Draws the filter form while editing.
fn draw_filter_form(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let lines: Vec<Line> = FilterField::ALL
        .iter()
        .map(|&field| {
            let focused = field == state.form.field;
            let value = state.form.value(field);
            let shown = if field.is_text() {
                String::from(value)
            } else if value.is_empty() {
                format!("< {ALL} >")
            } else {
                format!("< {value} >")
            };
            let style = if focused {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(if focused { "> " } else { "  " }, style),
                Span::styled(format!("{:<10}", field.label()), style),
                Span::raw(shown),
            ])
        })
        .collect();

    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Filters ")
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(form, area);
}

/// Draws the show grid or its placeholder.
fn draw_listing(frame: &mut Frame, area: Rect, listing: &ListingView, state: &mut BrowserState) {
    let block = Block::default().borders(Borders::ALL).title(" Shows ");

    let placeholder = match listing {
        ListingView::Rendered { .. } => None,
        ListingView::Idle => Some(Vec::new()),
        ListingView::Loading { page } => Some(vec![Line::from(format!(
            "Loading page {page}..."
        ))]),
        ListingView::Empty => Some(vec![
            Line::styled(EMPTY_TITLE, Style::default().add_modifier(Modifier::BOLD)),
            Line::from(EMPTY_HINT),
        ]),
        ListingView::Error { message } => Some(vec![
            Line::styled(
                ERROR_TITLE,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Line::from(message.as_str()),
        ]),
    };

    if let Some(lines) = placeholder {
        state.hitboxes.rows = Rect::default();
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec![
        "Type",
        "Title",
        "Year",
        "Duration",
        "Rating",
        "Categories",
        "Description",
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
    .bottom_margin(1);

    let rows: Vec<Row> = listing
        .cards()
        .into_iter()
        .map(|card| {
            let badge_style = match card.kind {
                ShowKind::Movie => Style::default().fg(Color::Magenta),
                ShowKind::Series => Style::default().fg(Color::Green),
            };
            Row::new(vec![
                Line::styled(card.badge, badge_style),
                Line::from(card.title),
                Line::from(card.year),
                Line::from(card.duration),
                Line::from(card.rating.unwrap_or_default()),
                Line::from(card.categories.join(", ")),
                Line::from(card.description.unwrap_or_default()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(8),  // Type
        Constraint::Min(20),    // Title
        Constraint::Length(5),  // Year
        Constraint::Length(10), // Duration
        Constraint::Length(8),  // Rating
        Constraint::Length(28), // Categories
        Constraint::Min(20),    // Description
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    // Border plus header row and its margin.
    state.hitboxes.rows = Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(3),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(4),
    };
    frame.render_stateful_widget(table, area, &mut state.table_state);
}

/// Draws the pagination strip and records its clickable controls.
fn draw_pagination(
    frame: &mut Frame,
    area: Rect,
    strip: Option<&PaginationStrip>,
    state: &mut BrowserState,
) {
    state.hitboxes.pages.clear();

    let Some(strip) = strip else {
        frame.render_widget(Block::default().borders(Borders::ALL), area);
        return;
    };

    let enabled = Style::default().fg(Color::Cyan);
    let disabled = Style::default().fg(Color::DarkGray);

    let mut pieces: Vec<(String, Style, Option<PageTarget>)> = Vec::new();
    pieces.push(if strip.prev_enabled() {
        (String::from("< Prev"), enabled, Some(PageTarget::Prev))
    } else {
        (String::from("< Prev"), disabled, None)
    });
    for item in &strip.items {
        pieces.push((String::from(" "), Style::default(), None));
        match *item {
            PageItem::Page { number, active } => {
                let style = if active {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                pieces.push((format!(" {number} "), style, Some(PageTarget::Page(number))));
            }
            PageItem::Ellipsis => pieces.push((String::from("..."), disabled, None)),
        }
    }
    pieces.push((String::from(" "), Style::default(), None));
    pieces.push(if strip.next_enabled() {
        (String::from("Next >"), enabled, Some(PageTarget::Next))
    } else {
        (String::from("Next >"), disabled, None)
    });

    let y = area.y.saturating_add(1);
    let mut x = area.x.saturating_add(1);
    let mut spans = Vec::with_capacity(pieces.len());
    for (text, style, target) in pieces {
        let width = u16::try_from(text.chars().count()).unwrap_or(u16::MAX);
        if let Some(target) = target {
            state
                .hitboxes
                .pages
                .push((Rect::new(x, y, width, 1), target));
        }
        x = x.saturating_add(width);
        spans.push(Span::styled(text, style));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", strip.info())),
    );
    frame.render_widget(paragraph, area);
}

/// Draws the footer with key hints or the latest status message.
fn draw_footer(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let help_text = match (&state.status, state.input_mode) {
        (Some(status), _) => Line::styled(status.as_str(), Style::default().fg(Color::Yellow)),
        (None, InputMode::Filter) => Line::from(
            "Tab/\u{2191}\u{2193}: field  \u{2190}\u{2192}: choose  type to edit  Enter: apply  Esc: cancel",
        ),
        (None, InputMode::Normal) => Line::from(vec![Span::raw(
            "\u{2191}\u{2193}/j/k: move  Enter: details  \u{2190}\u{2192}: page  g/G: first/last  /: filter  r: reset  q: quit",
        )]),
    };

    let footer = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

/// Draws the detail overlay centred on screen. Returns its area.
fn draw_detail(frame: &mut Frame, detail: &DetailView) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage(15),
        Constraint::Percentage(70),
        Constraint::Percentage(15),
    ])
    .areas(frame.area());
    let [_, popup, _] = Layout::horizontal([
        Constraint::Percentage(15),
        Constraint::Percentage(70),
        Constraint::Percentage(15),
    ])
    .areas(middle);

    let label = Style::default().add_modifier(Modifier::BOLD);
    let heading = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut meta = Vec::new();
    for (name, value) in &detail.meta {
        meta.push(Span::styled(format!("{name}: "), label));
        meta.push(Span::raw(format!("{value}   ")));
    }

    let mut lines = vec![Line::from(meta), Line::default()];
    for section in &detail.sections {
        lines.push(Line::styled(section.heading, heading));
        lines.push(Line::from(section.body.as_str()));
        lines.push(Line::default());
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", detail.title))
            .title_bottom(" Esc: close ")
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
    popup
}
