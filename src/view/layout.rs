//! Screen layout rendering.
//!
//! Pure layout logic: header, card grid and status bar, with the detail,
//! help and image overlays stacked on top in that order.

use super::constants::{HEADER_HEIGHT, STATUS_BAR_HEIGHT};
use super::detail::{render_card_detail, ElementArea};
use super::grid::{render_grid, CardHit};
use super::help::render_help_overlay;
use super::lightbox::render_lightbox;
use super::styles::CardStyles;
use crate::config::KeyBindings;
use crate::state::{AppState, DetailViewport};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Areas of the last rendered frame, used for mouse hit testing and
/// detail scroll limits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameLayout {
    pub cards: Vec<CardHit>,
    pub detail: Option<Rect>,
    pub lightbox: Option<Rect>,
    pub detail_viewport: DetailViewport,
    /// Clickable elements of the open card's body.
    pub detail_elements: Vec<ElementArea>,
}

impl FrameLayout {
    /// Deck position of the grid card under a cell.
    pub fn card_at(&self, column: u16, row: u16) -> Option<usize> {
        self.cards
            .iter()
            .find(|hit| hit.area.contains((column, row).into()))
            .map(|hit| hit.index)
    }

    /// Interactive element of the open card under a cell.
    pub fn element_at(&self, column: u16, row: u16) -> Option<usize> {
        self.detail_elements
            .iter()
            .find(|hit| hit.area.contains((column, row).into()))
            .map(|hit| hit.element)
    }
}

/// Render the whole screen.
pub fn render_layout(
    frame: &mut Frame,
    state: &AppState,
    styles: CardStyles,
    bindings: &KeyBindings,
) -> FrameLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], state, styles);
    let cards = render_grid(frame, chunks[1], state, styles);
    render_status_bar(frame, chunks[2], state, styles);

    let detail = render_card_detail(frame, state, styles);
    if state.help_visible {
        render_help_overlay(frame, bindings);
    }
    let lightbox = render_lightbox(frame, &state.lightbox, styles);

    let (detail, detail_viewport, detail_elements) = match detail {
        Some(layout) => (Some(layout.area), layout.viewport, layout.elements),
        None => (None, DetailViewport::default(), Vec::new()),
    };
    FrameLayout {
        cards,
        detail,
        lightbox,
        detail_viewport,
        detail_elements,
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState, styles: CardStyles) {
    let deck = state.deck();
    let mut lines = vec![Line::from(Span::styled(deck.title().to_string(), styles.title()))];
    if let Some(subtitle) = deck.subtitle() {
        lines.push(Line::from(Span::styled(subtitle.to_string(), styles.muted())));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, styles: CardStyles) {
    let right = match &state.status_message {
        Some(message) => message.clone(),
        None => format!(
            "{} cards · {} columns · ?: help · q: quit",
            state.deck().len(),
            state.grid.assignment().column_count()
        ),
    };
    let line = Line::from(vec![
        Span::styled(format!(" {} ", state.location()), styles.card_link()),
        Span::raw(" "),
        Span::styled(right, styles.muted()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
