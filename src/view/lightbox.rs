//! Image overlay.
//!
//! Terminals cannot show the picture itself, so the overlay names the image
//! source and its alt text as caption.

use super::constants::{LIGHTBOX_HEIGHT_PERCENT, LIGHTBOX_WIDTH_PERCENT};
use super::help::centered_rect;
use super::styles::CardStyles;
use crate::state::LightboxState;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the overlay when an image is showing, returning its area.
pub fn render_lightbox(frame: &mut Frame, lightbox: &LightboxState, styles: CardStyles) -> Option<Rect> {
    let LightboxState::Showing { src, alt } = lightbox else {
        return None;
    };

    let area = centered_rect(LIGHTBOX_WIDTH_PERCENT, LIGHTBOX_HEIGHT_PERCENT, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled(src.clone(), styles.image())),
    ];
    if !alt.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(alt.clone(), styles.italic())));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Esc, Enter or click to close",
        styles.muted(),
    )));

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Image ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(styles.image()),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
    Some(area)
}
