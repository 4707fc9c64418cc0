//! Card detail overlay.
//!
//! Centered modal showing the open card's full body. The border color
//! cycles with deck position; the bar above the body carries the back
//! affordance (only while there is history), previous/next controls dimmed
//! at the deck boundaries, and the category badge.

use super::constants::{DETAIL_POPUP_HEIGHT_PERCENT, DETAIL_POPUP_WIDTH_PERCENT};
use super::help::centered_rect;
use super::markup::wrap_body;
use super::styles::CardStyles;
use crate::markup::render_blocks;
use crate::state::{AppState, DetailViewport};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

const FOOTER_HINT: &str = " Tab: next link · Enter: open · ←/→: prev/next · b: back · Esc: close ";

/// Screen area of one interactive element of the open card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementArea {
    pub area: Rect,
    /// Index into the open card's interactions.
    pub element: usize,
}

/// Where the overlay was drawn and how far its body can scroll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailLayout {
    pub area: Rect,
    pub viewport: DetailViewport,
    /// Visible interactive elements, one entry per wrapped row they cover.
    pub elements: Vec<ElementArea>,
}

/// Render the overlay for the open card. Returns `None` when closed.
pub fn render_card_detail(
    frame: &mut Frame,
    state: &AppState,
    styles: CardStyles,
) -> Option<DetailLayout> {
    let card = state.open_card()?;
    let position = state.open_position()?;
    let total = state.deck().len();

    let area = centered_rect(
        DETAIL_POPUP_WIDTH_PERCENT,
        DETAIL_POPUP_HEIGHT_PERCENT,
        frame.area(),
    );
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(styles.detail_border(position))
        .title(Line::from(Span::styled(
            format!(" {} ", card.title()),
            styles.title(),
        )))
        .title_bottom(Line::from(format!(" {} of {total} ", position + 1)).right_aligned());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Navigation bar
            Constraint::Length(1), // Spacer
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Footer hints
        ])
        .split(inner);
    let body_area = chunks[2];

    frame.render_widget(
        Paragraph::new(navigation_bar(state, position, total, styles)),
        chunks[0],
    );

    let wrapped = wrap_body(
        &render_blocks(card.body()),
        styles,
        |id| state.deck().contains(id),
        state.detail.focused_element,
        body_area.width,
    );
    let max_scroll = u16::try_from(wrapped.lines.len().saturating_sub(usize::from(body_area.height)))
        .unwrap_or(u16::MAX);
    let scroll = state.detail.scroll.min(max_scroll);

    let elements = wrapped
        .elements
        .iter()
        .filter_map(|hit| {
            let row = hit.row.checked_sub(usize::from(scroll))?;
            let row = u16::try_from(row).ok().filter(|row| *row < body_area.height)?;
            Some(ElementArea {
                area: Rect::new(body_area.x + hit.x, body_area.y + row, hit.width, 1)
                    .intersection(body_area),
                element: hit.element,
            })
        })
        .collect();

    frame.render_widget(Paragraph::new(wrapped.lines).scroll((scroll, 0)), body_area);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(FOOTER_HINT, styles.muted()))),
        chunks[3],
    );

    Some(DetailLayout {
        area,
        viewport: DetailViewport {
            height: body_area.height,
            max_scroll,
        },
        elements,
    })
}

fn navigation_bar(state: &AppState, position: usize, total: usize, styles: CardStyles) -> Line<'static> {
    let mut spans = Vec::new();
    if state.navigation().can_go_back() {
        spans.push(Span::styled("← Back", styles.card_link()));
        spans.push(Span::raw("   "));
    }

    let step_style = |enabled: bool| {
        if enabled {
            styles.bold()
        } else {
            styles.muted()
        }
    };
    spans.push(Span::styled("‹ Prev", step_style(position > 0)));
    spans.push(Span::raw("  "));
    spans.push(Span::styled("Next ›", step_style(position + 1 < total)));

    if let Some(card) = state.open_card() {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            format!("[{}]", card.category().label()),
            styles.category(card.category()),
        ));
    }
    Line::from(spans)
}
