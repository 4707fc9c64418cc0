//! Deck content loading.
//!
//! Decks are TOML documents:
//!
//! ```toml
//! title = "Understand AI for Devs"
//! subtitle = "optional tagline"
//!
//! [[cards]]
//! id = "rag"
//! title = "RAG (Retrieval Augmented Generation)"
//! category = "technical"   # concept | technical | framework | general
//! body = '''
//! Before handing input text to a model...
//! '''
//! ```
//!
//! Parsing is followed by [`Deck::new`] validation, so callers always receive a
//! deck with unique ids and at least one card.

use crate::model::{Card, Deck, DeckError};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// Deck compiled into the binary.
const BUNDLED_DECK: &str = include_str!("../../content/deck.toml");

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DeckFile {
    title: String,
    #[serde(default)]
    subtitle: Option<String>,
    #[serde(default)]
    cards: Vec<Card>,
}

/// Parse and validate a deck from TOML source.
///
/// # Errors
///
/// Returns [`DeckError::Parse`] for invalid TOML or schema violations (unknown
/// category, empty id, unknown key), and the [`Deck::new`] validation errors.
pub fn parse_deck(source: &str) -> Result<Deck, DeckError> {
    let file: DeckFile = toml::from_str(source).map_err(|e| DeckError::Parse(e.to_string()))?;
    let deck = Deck::new(file.title, file.subtitle, file.cards)?;

    // Dangling cross references are content bugs, not load failures
    for dangling in deck.dangling_links() {
        warn!(
            card = %dangling.card,
            target = %dangling.target,
            "Card links to an id that is not in the deck"
        );
    }

    debug!(cards = deck.len(), title = deck.title(), "Deck parsed");
    Ok(deck)
}

/// The deck shipped with the binary.
pub fn bundled_deck() -> Result<Deck, DeckError> {
    parse_deck(BUNDLED_DECK)
}

/// Load a deck from a TOML file on disk.
///
/// # Errors
///
/// Returns [`DeckError::Read`] if the file cannot be read, otherwise the
/// errors of [`parse_deck`].
pub fn load_deck(path: &Path) -> Result<Deck, DeckError> {
    let source = std::fs::read_to_string(path).map_err(|source| DeckError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_deck(&source)
}
