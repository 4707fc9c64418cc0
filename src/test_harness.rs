//! Acceptance Test Harness for TUI testing
//!
//! Provides a high-level API for acceptance testing user stories by wrapping
//! TuiApp<TestBackend> with convenient methods for simulating user interactions.

use crate::analytics::{Analytics, EventName, MemorySink, TelemetrySink};
use crate::config::KeyBindings;
use crate::model::Deck;
use crate::parser::bundled_deck;
use crate::state::{hydrate_from_location, AppState, Location};
use crate::view::{LinkOpener, TuiApp, TuiError};
use crate::view_state::columns::ColumnPolicy;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::io;
use std::sync::{Arc, Mutex};

/// Convert a ratatui buffer to a string representation for snapshot testing.
///
/// Captures the visual output character by character, preserving layout.
/// Empty lines are removed to keep snapshots clean.
pub fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buffer[(x, y)].symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

/// Link opener that records URLs instead of launching a browser.
#[derive(Clone, Default)]
pub struct RecordingOpener {
    opened: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl RecordingOpener {
    /// An opener whose every attempt fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().map(|urls| urls.clone()).unwrap_or_default()
    }
}

impl LinkOpener for RecordingOpener {
    fn open(&self, url: &str) -> io::Result<()> {
        if let Ok(mut urls) = self.opened.lock() {
            urls.push(url.to_string());
        }
        if self.fail {
            Err(io::Error::other("no browser available"))
        } else {
            Ok(())
        }
    }
}

/// Test harness for acceptance testing
///
/// Wraps TuiApp<TestBackend> to provide a clean API for simulating user
/// interactions in acceptance tests.
pub struct AcceptanceTestHarness {
    app: TuiApp<TestBackend>,
    sink: Arc<MemorySink>,
    opener: RecordingOpener,
    running: bool,
}

impl AcceptanceTestHarness {
    /// Bundled deck at the root location, 80x24 terminal
    pub fn bundled() -> Result<Self, TuiError> {
        Self::builder().build()
    }

    pub fn builder() -> HarnessBuilder {
        HarnessBuilder::default()
    }

    /// Send a single key event
    ///
    /// Returns `true` if the app quit as a result of this key.
    pub fn send_key(&mut self, key: KeyCode) -> bool {
        self.send_key_with_mods(key, KeyModifiers::NONE)
    }

    /// Send key with modifiers (e.g., Ctrl+C)
    pub fn send_key_with_mods(&mut self, key: KeyCode, mods: KeyModifiers) -> bool {
        if !self.running {
            return true; // Already quit
        }

        // Render first so scroll limits and hit areas reflect the screen
        let _ = self.app.render_test();
        let quit = self.app.handle_key_test(KeyEvent::new(key, mods));
        if quit {
            self.running = false;
        }
        quit
    }

    /// Send a sequence of keys, stopping early if the app quits
    pub fn send_keys(&mut self, keys: &[KeyCode]) {
        for key in keys {
            if self.send_key(*key) {
                break;
            }
        }
    }

    /// Access app state for assertions
    pub fn state(&self) -> &AppState {
        self.app.app_state()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Analytics events recorded so far, oldest first.
    pub fn event_names(&self) -> Vec<EventName> {
        self.sink.names()
    }

    pub fn events(&self) -> Vec<crate::analytics::AnalyticsEvent> {
        self.sink.events()
    }

    /// URLs handed to the link opener.
    pub fn opened_links(&self) -> Vec<String> {
        self.opener.opened()
    }

    /// Render the current frame to a string
    ///
    /// # Panics
    /// Panics if rendering fails (should never happen with TestBackend)
    pub fn render_to_string(&mut self) -> String {
        self.app
            .render_test()
            .expect("Rendering should succeed in test harness");
        buffer_to_string(self.app.terminal().backend().buffer())
    }

    /// Send a left click at the specified cell
    pub fn click_at(&mut self, column: u16, row: u16) {
        if !self.running {
            return;
        }

        // Render first to ensure layout is calculated
        let _ = self.app.render_test();
        self.app.handle_mouse_test(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }

    pub fn scroll(&mut self, kind: MouseEventKind) {
        let _ = self.app.render_test();
        self.app.handle_mouse_test(MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.app.handle_resize_test(width, height);
    }

    /// Cell in the middle of the first drawn grid card showing `index`.
    pub fn card_cell(&mut self, index: usize) -> Option<(u16, u16)> {
        let _ = self.app.render_test();
        self.app
            .last_layout()
            .cards
            .iter()
            .find(|hit| hit.index == index)
            .map(|hit| (hit.area.x + hit.area.width / 2, hit.area.y + hit.area.height / 2))
    }

    /// First cell inside the detail overlay where `needle` is drawn.
    pub fn detail_text_cell(&mut self, needle: &str) -> Option<(u16, u16)> {
        let _ = self.app.render_test();
        let area = self.app.last_layout().detail?;
        let buffer = self.app.terminal().backend().buffer();

        for y in area.top()..area.bottom() {
            let mut row = String::new();
            let mut starts = Vec::new();
            for x in area.left()..area.right() {
                starts.push((row.len(), x));
                row.push_str(buffer[(x, y)].symbol());
            }
            if let Some(offset) = row.find(needle) {
                return starts
                    .iter()
                    .rev()
                    .find(|(start, _)| *start <= offset)
                    .map(|(_, x)| (*x, y));
            }
        }
        None
    }
}

/// Configures a harness before the app starts.
pub struct HarnessBuilder {
    deck: Option<Deck>,
    location: Location,
    width: u16,
    height: u16,
    policy: ColumnPolicy,
    opener: RecordingOpener,
}

impl Default for HarnessBuilder {
    fn default() -> Self {
        Self {
            deck: None,
            location: Location::default(),
            width: 80,
            height: 24,
            policy: ColumnPolicy::RoundRobin,
            opener: RecordingOpener::default(),
        }
    }
}

impl HarnessBuilder {
    pub fn deck(mut self, deck: Deck) -> Self {
        self.deck = Some(deck);
        self
    }

    /// Initial location, hydrated at startup.
    pub fn location(mut self, raw: &str) -> Self {
        self.location = Location::parse(raw);
        self
    }

    pub fn size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn policy(mut self, policy: ColumnPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn opener(mut self, opener: RecordingOpener) -> Self {
        self.opener = opener;
        self
    }

    pub fn build(self) -> Result<AcceptanceTestHarness, TuiError> {
        let terminal = Terminal::new(TestBackend::new(self.width, self.height))?;
        let deck = match self.deck {
            Some(deck) => deck,
            None => bundled_deck().map_err(|err| io::Error::other(err.to_string()))?,
        };

        let sink = Arc::new(MemorySink::new());
        let analytics = Analytics::new("test-site", vec![sink.clone() as Arc<dyn TelemetrySink>]);
        let mut app_state = AppState::new(deck, self.location, analytics, self.policy);
        hydrate_from_location(&mut app_state);

        let app = TuiApp::new_for_test(
            terminal,
            app_state,
            KeyBindings::default(),
            Box::new(self.opener.clone()),
        );

        Ok(AcceptanceTestHarness {
            app,
            sink,
            opener: self.opener,
            running: true,
        })
    }
}
