//! Card styling configuration.
//!
//! Category badges, card borders and inline markup styles, all collapsing to
//! the terminal default when colors are disabled.

use crate::model::Category;
use ratatui::style::{Color, Modifier, Style};

/// Muted hint text (status bar, footer hints, dimmed controls).
pub const MUTED_TEXT: Style = Style::new().fg(Color::DarkGray);

/// Section header inside overlays.
pub const SECTION_HEADER: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Colors on, regardless of environment.
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self::enabled()
    }
}

// ===== CardStyles =====

/// Styles used by the grid, the detail overlay and the markup renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardStyles {
    colors: bool,
}

impl CardStyles {
    pub fn new(config: ColorConfig) -> Self {
        Self {
            colors: config.colors_enabled(),
        }
    }

    fn fg(self, color: Color) -> Style {
        if self.colors {
            Style::default().fg(color)
        } else {
            Style::default()
        }
    }

    /// Badge and grid border color for a category.
    pub fn category(self, category: Category) -> Style {
        self.fg(match category {
            Category::Concept => Color::Green,
            Category::Technical => Color::Blue,
            Category::Framework => Color::Magenta,
            Category::General => Color::Gray,
        })
    }

    /// Detail overlay border; cycles through three colors by deck position.
    pub fn detail_border(self, position: usize) -> Style {
        self.fg(match position % 3 {
            0 => Color::Green,
            1 => Color::Blue,
            _ => Color::Magenta,
        })
    }

    pub fn selected_border(self) -> Style {
        self.fg(Color::Yellow).add_modifier(Modifier::BOLD)
    }

    pub fn title(self) -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    pub fn bold(self) -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    pub fn italic(self) -> Style {
        Style::default().add_modifier(Modifier::ITALIC)
    }

    pub fn code(self) -> Style {
        if self.colors {
            Style::default().fg(Color::LightRed).bg(Color::Black)
        } else {
            Style::default()
        }
    }

    /// In-body link to another card.
    pub fn card_link(self) -> Style {
        self.fg(Color::Cyan).add_modifier(Modifier::UNDERLINED)
    }

    /// Link leaving the application.
    pub fn external_link(self) -> Style {
        self.fg(Color::LightBlue).add_modifier(Modifier::UNDERLINED)
    }

    /// Card link whose target is not in the deck.
    pub fn inactive_link(self) -> Style {
        self.fg(Color::DarkGray)
    }

    pub fn image(self) -> Style {
        self.fg(Color::LightGreen).add_modifier(Modifier::ITALIC)
    }

    /// Highlight over the focused interactive element.
    pub fn focused(self) -> Style {
        Style::default().add_modifier(Modifier::REVERSED)
    }

    pub fn muted(self) -> Style {
        if self.colors {
            MUTED_TEXT
        } else {
            Style::default().add_modifier(Modifier::DIM)
        }
    }

    pub fn list_marker(self) -> Style {
        self.fg(Color::Yellow)
    }
}

impl Default for CardStyles {
    fn default() -> Self {
        Self::new(ColorConfig::default())
    }
}

// ===== Tests =====
