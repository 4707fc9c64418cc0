//! Card grid widget.
//!
//! Lays the distributed columns side by side and draws each card as a small
//! bordered box: title, category badge and a preview of the body. Only the
//! rows around the selection are drawn when the grid is taller than the
//! viewport.

use super::constants::{GRID_CARD_HEIGHT, PREVIEW_CHARS};
use super::markup::render_body;
use super::styles::CardStyles;
use crate::markup::render_blocks;
use crate::model::Card;
use crate::state::AppState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

/// Screen area of a drawn card, for mouse hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardHit {
    pub area: Rect,
    /// Deck position of the card.
    pub index: usize,
}

/// First grid row to draw so the selected row stays visible.
pub fn first_visible_row(selected_row: usize, visible_rows: usize) -> usize {
    selected_row.saturating_sub(visible_rows.saturating_sub(1))
}

/// Render the grid into `area`, returning where each card landed.
pub fn render_grid(frame: &mut Frame, area: Rect, state: &AppState, styles: CardStyles) -> Vec<CardHit> {
    let assignment = state.grid.assignment();
    let column_count = assignment.column_count();
    if column_count == 0 || area.height == 0 {
        return Vec::new();
    }

    let visible_rows = usize::from((area.height / GRID_CARD_HEIGHT).max(1));
    let selected_row = assignment
        .locate(state.grid.selected)
        .map(|(_, row)| row)
        .unwrap_or(0);
    let first_row = first_visible_row(selected_row, visible_rows);

    let constraints = vec![Constraint::Ratio(1, column_count as u32); column_count];
    let column_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    let mut hits = Vec::new();
    for (column, column_area) in assignment.columns().iter().zip(column_areas.iter()) {
        for (offset, &index) in column.iter().skip(first_row).take(visible_rows).enumerate() {
            let Some(card) = state.deck().card_at(index) else {
                continue;
            };
            let y = column_area.y + offset as u16 * GRID_CARD_HEIGHT;
            let height = GRID_CARD_HEIGHT.min(column_area.bottom().saturating_sub(y));
            if height == 0 {
                break;
            }
            let card_area = Rect::new(column_area.x, y, column_area.width, height);
            render_card(frame, card_area, card, index == state.grid.selected, styles);
            hits.push(CardHit {
                area: card_area,
                index,
            });
        }
    }
    hits
}

fn render_card(frame: &mut Frame, area: Rect, card: &Card, selected: bool, styles: CardStyles) {
    let category_style = styles.category(card.category());
    let border_style = if selected {
        styles.selected_border()
    } else {
        category_style
    };

    let mut lines = vec![
        Line::from(Span::styled(card.title().to_string(), styles.title())),
        Line::from(Span::styled(
            format!("[{}]", card.category().label()),
            category_style,
        )),
    ];
    let preview = render_blocks(&card.preview(PREVIEW_CHARS));
    lines.extend(render_body(&preview, styles, |_| true, None));

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(border_style),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(widget, area);
}
