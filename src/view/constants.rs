//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for all layout-related numeric values to enable
//! consistent tuning across the application.

/// Height of the deck header in lines (title, subtitle, spacer).
pub const HEADER_HEIGHT: u16 = 3;

/// Height of the status bar in lines.
///
/// Single line for the current location and keyboard hints.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Height of one card in the grid, borders included.
///
/// Border, title, category badge, four preview lines, border.
pub const GRID_CARD_HEIGHT: u16 = 8;

/// Characters of body text shown on a grid card.
pub const PREVIEW_CHARS: usize = 200;

/// Width percentage for the card detail overlay.
pub const DETAIL_POPUP_WIDTH_PERCENT: u16 = 80;

/// Height percentage for the card detail overlay.
pub const DETAIL_POPUP_HEIGHT_PERCENT: u16 = 85;

/// Width percentage for the image overlay.
pub const LIGHTBOX_WIDTH_PERCENT: u16 = 60;

/// Height percentage for the image overlay.
pub const LIGHTBOX_HEIGHT_PERCENT: u16 = 40;

/// Width percentage for help overlay popup.
///
/// Percentage of screen width (0-100) for the help overlay modal.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 70;

/// Height percentage for help overlay popup.
///
/// Percentage of screen height (0-100) for the help overlay modal.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 80;
