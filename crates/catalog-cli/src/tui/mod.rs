//! TUI module for the interactive catalog browser.
//!
//! Uses `ratatui` + `crossterm` for rendering. Fetches are awaited inside
//! the event loop, so input is not read while a request is in flight.
#![allow(clippy::future_not_send)]

/// Browser state types.
pub mod state;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use catalog_api::{Authed, LocalCatalogApi};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use self::state::{Action, BrowserState, View};
use crate::controller::CatalogController;
use crate::controller::listing::ListingView;

/// How the browser ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseExit {
    /// The user quit.
    Quit,
    /// The backend rejected the session.
    Unauthenticated,
}

type Term = Terminal<CrosstermBackend<io::Stdout>>;

/// Runs the catalog browser TUI.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
pub async fn run_browser<A: LocalCatalogApi>(
    ctl: &mut CatalogController<A>,
) -> Result<BrowseExit> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let mut state = BrowserState::default();
    let result = run_event_loop(&mut terminal, ctl, &mut state).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

fn redraw<A: LocalCatalogApi>(
    terminal: &mut Term,
    ctl: &CatalogController<A>,
    state: &mut BrowserState,
) -> Result<()> {
    terminal
        .draw(|frame| ui::draw(frame, ctl, state))
        .context("failed to draw TUI")?;
    Ok(())
}

/// Main event loop.
async fn run_event_loop<A: LocalCatalogApi>(
    terminal: &mut Term,
    ctl: &mut CatalogController<A>,
    state: &mut BrowserState,
) -> Result<BrowseExit> {
    state.status = Some(String::from("Loading filters..."));
    redraw(terminal, ctl, state)?;
    if ctl.load_filters().await.is_unauthenticated() {
        return Ok(BrowseExit::Unauthenticated);
    }
    state.status = None;
    if let Some(exit) = perform(terminal, ctl, state, Action::GoTo(1)).await? {
        return Ok(exit);
    }

    loop {
        redraw(terminal, ctl, state)?;

        if !event::poll(Duration::from_millis(100)).context("failed to poll events")? {
            continue;
        }

        let action = {
            let view = View {
                rows: ctl.listing().shows().len(),
                total_pages: ctl.page().total,
                detail_open: ctl.detail().is_some(),
                filters: ctl.filters(),
                options: ctl.options(),
            };
            match event::read().context("failed to read event")? {
                Event::Key(key) if key.kind == KeyEventKind::Press => state.handle_key(key, &view),
                Event::Mouse(mouse) => state.handle_mouse(mouse, &view),
                _ => Action::None,
            }
        };

        if let Some(exit) = perform(terminal, ctl, state, action).await? {
            return Ok(exit);
        }
    }
}

/// Carries out `action`. Returns `Some` when the browser should exit.
async fn perform<A: LocalCatalogApi>(
    terminal: &mut Term,
    ctl: &mut CatalogController<A>,
    state: &mut BrowserState,
    action: Action,
) -> Result<Option<BrowseExit>> {
    let outcome = match action {
        Action::None => return Ok(None),
        Action::Quit => return Ok(Some(BrowseExit::Quit)),
        Action::OpenDetail(index) => {
            ctl.open_detail(index);
            return Ok(None);
        }
        Action::CloseDetail => {
            ctl.close_detail();
            return Ok(None);
        }
        Action::GoTo(page) => {
            loading(terminal, ctl, state)?;
            ctl.go_to_page(page).await
        }
        Action::Next => {
            loading(terminal, ctl, state)?;
            ctl.next_page().await
        }
        Action::Prev => {
            loading(terminal, ctl, state)?;
            ctl.prev_page().await
        }
        Action::Apply(filters) => {
            loading(terminal, ctl, state)?;
            ctl.apply_filters(filters).await.map(|()| true)
        }
        Action::Reset => {
            loading(terminal, ctl, state)?;
            ctl.reset_filters().await.map(|()| true)
        }
    };

    state.status = None;
    match outcome {
        Authed::Unauthenticated => Ok(Some(BrowseExit::Unauthenticated)),
        Authed::Ok(fetched) => {
            if fetched {
                state.reset_viewport(ctl.listing().shows().len());
                if let ListingView::Error { message } = ctl.listing() {
                    state.status = Some(format!("Error: {message}"));
                }
            }
            Ok(None)
        }
    }
}

fn loading<A: LocalCatalogApi>(
    terminal: &mut Term,
    ctl: &CatalogController<A>,
    state: &mut BrowserState,
) -> Result<()> {
    state.status = Some(String::from("Loading shows..."));
    redraw(terminal, ctl, state)
}
