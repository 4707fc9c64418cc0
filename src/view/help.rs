//! Help overlay widget displaying keyboard shortcuts.
//!
//! Shows a centered modal overlay with the bound keys grouped by context.
//! Triggered by '?' key, dismissed by 'Esc' or '?'.

use super::constants::{HELP_POPUP_HEIGHT_PERCENT, HELP_POPUP_WIDTH_PERCENT};
use super::styles::{MUTED_TEXT, SECTION_HEADER};
use crate::config::KeyBindings;
use crate::model::KeyAction;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Width of the key column, in cells.
const KEY_COLUMN_WIDTH: usize = 22;

const SECTIONS: &[(&str, &[(KeyAction, &str)])] = &[
    (
        "Grid",
        &[
            (KeyAction::MoveUp, "Select card above"),
            (KeyAction::MoveDown, "Select card below"),
            (KeyAction::MoveLeft, "Select card to the left"),
            (KeyAction::MoveRight, "Select card to the right"),
            (KeyAction::PageDown, "Jump down three rows"),
            (KeyAction::PageUp, "Jump up three rows"),
            (KeyAction::Activate, "Open selected card"),
        ],
    ),
    (
        "Open Card",
        &[
            (KeyAction::MoveDown, "Scroll down"),
            (KeyAction::MoveUp, "Scroll up"),
            (KeyAction::PageDown, "Page down"),
            (KeyAction::PageUp, "Page up"),
            (KeyAction::MoveLeft, "Previous card"),
            (KeyAction::MoveRight, "Next card"),
            (KeyAction::FocusNextElement, "Focus next link or image"),
            (KeyAction::FocusPrevElement, "Focus previous link or image"),
            (KeyAction::Activate, "Follow focused link / view image"),
            (KeyAction::Back, "Back to the previous card"),
            (KeyAction::CloseOverlay, "Close card or image"),
        ],
    ),
    (
        "Application",
        &[
            (KeyAction::Help, "Toggle this help"),
            (KeyAction::Quit, "Quit"),
        ],
    ),
];

/// Render the help overlay centered on the screen.
pub fn render_help_overlay(frame: &mut Frame, bindings: &KeyBindings) {
    let popup_area = centered_rect(
        HELP_POPUP_WIDTH_PERCENT,
        HELP_POPUP_HEIGHT_PERCENT,
        frame.area(),
    );

    frame.render_widget(Clear, popup_area);

    let help_paragraph = Paragraph::new(build_help_content(bindings))
        .block(
            Block::default()
                .title(" Keyboard Shortcuts ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);

    // Dismissal hint on the bottom border
    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(1),
        width: popup_area.width,
        height: 1,
    };
    let hint = Paragraph::new(Line::from(vec![Span::styled(
        " Press Esc or ? to close ",
        MUTED_TEXT.add_modifier(Modifier::DIM),
    )]))
    .alignment(Alignment::Center);

    frame.render_widget(hint, hint_area);
}

/// Rect centered in `area` covering the given percentages of it.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_width = area.width * percent_x / 100;
    let popup_height = area.height * percent_y / 100;
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    Rect {
        x: area.x + popup_x,
        y: area.y + popup_y,
        width: popup_width,
        height: popup_height,
    }
}

/// Shortcut lines grouped by context, keys taken from `bindings`.
fn build_help_content(bindings: &KeyBindings) -> Vec<Line<'static>> {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(Color::White);

    let mut lines = Vec::new();
    for (index, (title, entries)) in SECTIONS.iter().enumerate() {
        if index > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(*title, SECTION_HEADER)));
        for (action, description) in entries.iter() {
            let keys = bindings.labels_for(*action).join("/");
            lines.push(Line::from(vec![
                Span::styled(format!("  {keys:<width$}", width = KEY_COLUMN_WIDTH), key_style),
                Span::styled(*description, desc_style),
            ]));
        }
    }
    lines
}
