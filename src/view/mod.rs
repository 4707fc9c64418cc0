//! TUI rendering and terminal management (impure shell)

pub mod constants;
mod detail;
mod grid;
mod help;
mod layout;
mod lightbox;
pub mod markup;
mod styles;

pub use detail::{render_card_detail, DetailLayout, ElementArea};
pub use grid::{render_grid, CardHit};
pub use help::{centered_rect, render_help_overlay};
pub use layout::{render_layout, FrameLayout};
pub use lightbox::render_lightbox;
pub use styles::{CardStyles, ColorConfig};

use crate::config::KeyBindings;
use crate::model::{AppError, KeyAction};
use crate::state::{card_handler, handle_card_action, AppState, ExternalLink};
use crate::view_state::columns::ColumnCount;
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Lines one mouse wheel notch scrolls the detail body.
const WHEEL_SCROLL_LINES: i32 = 3;

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<TuiError> for AppError {
    fn from(err: TuiError) -> Self {
        match err {
            TuiError::Io(source) => AppError::Terminal(source),
        }
    }
}

/// Hands external URLs to something outside the terminal.
pub trait LinkOpener {
    fn open(&self, url: &str) -> io::Result<()>;
}

/// Opens links in the system's default browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBrowser;

impl LinkOpener for SystemBrowser {
    fn open(&self, url: &str) -> io::Result<()> {
        webbrowser::open(url)
    }
}

/// Startup options for the shell.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub colors: ColorConfig,
    /// Pixel width of one terminal cell, for mapping widths to breakpoints.
    pub cell_width: u16,
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    key_bindings: KeyBindings,
    styles: CardStyles,
    link_opener: Box<dyn LinkOpener>,
    cell_width: u16,
    /// Areas from the last frame (mouse hit testing, detail scroll limit)
    layout: FrameLayout,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(app_state: AppState, options: RunOptions) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self::with_terminal(
            terminal,
            app_state,
            KeyBindings::default(),
            CardStyles::new(options.colors),
            Box::new(SystemBrowser),
            options.cell_width,
        ))
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C)
    pub fn run(&mut self) -> Result<(), TuiError> {
        const POLL_INTERVAL: Duration = Duration::from_millis(500);

        self.draw()?;

        loop {
            if !event::poll(POLL_INTERVAL)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) => {
                    if self.handle_key(key) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                Event::Resize(width, height) => self.handle_resize(width, height),
                _ => continue,
            }
            self.draw()?;
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    fn with_terminal(
        terminal: Terminal<B>,
        app_state: AppState,
        key_bindings: KeyBindings,
        styles: CardStyles,
        link_opener: Box<dyn LinkOpener>,
        cell_width: u16,
    ) -> Self {
        Self {
            terminal,
            app_state,
            key_bindings,
            styles,
            link_opener,
            cell_width,
            layout: FrameLayout::default(),
        }
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Release and repeat events arrive on some platforms; act on presses only
        if key.kind != KeyEventKind::Press {
            return false;
        }

        self.app_state.status_message = None;

        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };
        if action == KeyAction::Quit {
            return true;
        }

        if let Some(link) =
            handle_card_action(&mut self.app_state, action, self.layout.detail_viewport)
        {
            self.open_link(&link);
        }
        false
    }

    fn open_link(&mut self, link: &ExternalLink) {
        match self.link_opener.open(&link.url) {
            Ok(()) => {
                info!(url = %link.url, "Opened external link");
                self.app_state.status_message = Some(format!("Opened {}", link.url));
            }
            Err(err) => {
                warn!(url = %link.url, error = %err, "Failed to open external link");
                self.app_state.status_message = Some(format!("Could not open {}: {err}", link.url));
            }
        }
    }

    /// Handle a single mouse event
    ///
    /// Left click opens a grid card, activates the link or image under it in
    /// the open card, or dismisses the topmost overlay when it lands outside
    /// it. The wheel scrolls the open card.
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.scroll_detail(-WHEEL_SCROLL_LINES),
            MouseEventKind::ScrollDown => self.scroll_detail(WHEEL_SCROLL_LINES),
            MouseEventKind::Down(MouseButton::Left) => self.handle_click(mouse.column, mouse.row),
            _ => {}
        }
    }

    fn scroll_detail(&mut self, delta: i32) {
        let state = &mut self.app_state;
        if state.lightbox.is_showing() || state.help_visible || !state.navigation().is_open() {
            return;
        }
        state
            .detail
            .scroll_by(delta, self.layout.detail_viewport.max_scroll);
    }

    fn handle_click(&mut self, column: u16, row: u16) {
        if let Some(link) = self.click_overlays(column, row) {
            self.open_link(&link);
        }
    }

    /// Route a click to the topmost overlay, or to the grid when none is
    /// showing. Returns a link leaving the application, if one was clicked.
    fn click_overlays(&mut self, column: u16, row: u16) -> Option<ExternalLink> {
        let state = &mut self.app_state;

        if state.lightbox.is_showing() {
            state.lightbox.close();
            return None;
        }
        if state.help_visible {
            state.help_visible = false;
            return None;
        }
        if state.navigation().is_open() {
            let inside = self
                .layout
                .detail
                .is_some_and(|area| area.contains((column, row).into()));
            if !inside {
                card_handler::close(state);
                return None;
            }
            let element = self.layout.element_at(column, row)?;
            state.detail.focused_element = Some(element);
            let interaction = state.open_card_interactions().into_iter().nth(element)?;
            debug!(element, ?interaction, "Clicked card element");
            return card_handler::activate(state, interaction);
        }

        let index = self.layout.card_at(column, row)?;
        state.grid.selected = index;
        if let Some(id) = state.deck().card_at(index).map(|card| card.id().clone()) {
            card_handler::expand(state, &id);
        }
        None
    }

    /// Handle a terminal resize event
    fn handle_resize(&mut self, width: u16, height: u16) {
        debug!("Handling resize to {}x{}", width, height);
        self.app_state
            .relayout(ColumnCount::for_terminal_width(width, self.cell_width));
    }

    /// Render the current frame
    fn draw(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        self.app_state
            .relayout(ColumnCount::for_terminal_width(size.width, self.cell_width));

        let state = &self.app_state;
        let styles = self.styles;
        let bindings = &self.key_bindings;
        let mut layout = FrameLayout::default();
        self.terminal.draw(|frame| {
            layout = render_layout(frame, state, styles, bindings);
        })?;
        self.layout = layout;

        Ok(())
    }
}

// ===== Test Helpers =====
//
// The following methods are ONLY for testing within the crate.

#[cfg(test)]
#[allow(dead_code)] // Not all helpers used in every test module
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create TuiApp for testing (test-only constructor)
    ///
    /// This allows tests to construct TuiApp directly without going through
    /// terminal initialization. Used by acceptance test harness.
    pub(crate) fn new_for_test(
        terminal: Terminal<B>,
        app_state: AppState,
        key_bindings: KeyBindings,
        link_opener: Box<dyn LinkOpener>,
    ) -> Self {
        Self::with_terminal(
            terminal,
            app_state,
            key_bindings,
            CardStyles::default(),
            link_opener,
            crate::config::DEFAULT_CELL_WIDTH,
        )
    }

    pub(crate) fn app_state(&self) -> &AppState {
        &self.app_state
    }

    pub(crate) fn handle_key_test(&mut self, key: KeyEvent) -> bool {
        self.handle_key(key)
    }

    pub(crate) fn handle_mouse_test(&mut self, mouse: MouseEvent) {
        self.handle_mouse(mouse)
    }

    pub(crate) fn handle_resize_test(&mut self, width: u16, height: u16) {
        self.handle_resize(width, height)
    }

    /// Render a single frame to the backend.
    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    pub(crate) fn last_layout(&self) -> &FrameLayout {
        &self.layout
    }

    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Initialize and run the TUI application
///
/// Handles terminal setup, runs the event loop, and ensures cleanup on exit.
/// Logging must be initialized by the caller.
pub fn run(app_state: AppState, options: RunOptions) -> Result<(), TuiError> {
    let mut app = TuiApp::new(app_state, options)?;

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
