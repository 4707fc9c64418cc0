//! Error types for cheatdeck.
//!
//! Errors are split by concern using `thiserror`. They compose via `?` and `From`
//! conversions into [`AppError`] at the top of the shell.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level startup error
//!   - [`ConfigError`] - Config file cannot be read or parsed
//!   - [`LoggingError`] - Log file setup failures
//!   - [`DeckError`] - Deck content is unreadable or invalid
//!   - `std::io::Error` - Terminal/TUI failures
//!
//! # Runtime behaviour
//!
//! None of these occur once the UI is running. Navigation and rendering have no
//! failure modes: unknown card ids are ignored, malformed markup renders as plain
//! text, and boundary moves are no-ops.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::model::CardId;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all startup failure modes.
///
/// All variants are fatal: `main` prints the error and exits non-zero.
///
/// # Examples
///
/// ```no_run
/// use cheatdeck::model::{AppError, DeckError};
///
/// fn startup() -> Result<(), AppError> {
///     // DeckError automatically converts to AppError via From
///     let _deck = load()?;
///     Ok(())
/// }
/// # fn load() -> Result<(), DeckError> { Ok(()) }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration file exists but could not be used.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Deck content could not be loaded.
    #[error("Deck error: {0}")]
    Deck(#[from] DeckError),

    /// Terminal or TUI rendering error.
    ///
    /// Without a working terminal the TUI cannot function. The shell restores
    /// the terminal before the error is reported.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors encountered while loading and validating a deck.
///
/// Validation happens once at load so that the rest of the program can treat
/// the deck as trusted, read-only data.
///
/// # Examples
///
/// ```
/// use cheatdeck::model::{CardId, DeckError};
///
/// let err = DeckError::DuplicateId(CardId::new("rag").unwrap());
/// assert!(err.to_string().contains("rag"));
/// ```
#[derive(Debug, Error)]
pub enum DeckError {
    /// Deck file could not be read.
    #[error("Failed to read deck file at {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Deck TOML is syntactically invalid or does not match the schema.
    ///
    /// Covers unknown categories, empty ids, missing fields and unknown keys.
    #[error("Invalid deck TOML: {0}")]
    Parse(String),

    /// Deck contains no cards.
    #[error("Deck contains no cards")]
    Empty,

    /// Two cards share an id; cross-references would be ambiguous.
    #[error("Duplicate card id: {0}")]
    DuplicateId(CardId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deck_error_converts_into_app_error() {
        fn fails() -> Result<(), AppError> {
            Err(DeckError::Empty)?;
            Ok(())
        }

        let err = fails().expect_err("should propagate");
        assert!(matches!(err, AppError::Deck(DeckError::Empty)));
        assert_eq!(err.to_string(), "Deck error: Deck contains no cards");
    }

    #[test]
    fn read_error_mentions_path() {
        let err = DeckError::Read {
            path: PathBuf::from("/tmp/missing-deck.toml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("/tmp/missing-deck.toml"));
    }

    #[test]
    fn io_error_converts_into_terminal_variant() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: AppError = io.into();
        assert!(matches!(err, AppError::Terminal(_)));
    }
}
