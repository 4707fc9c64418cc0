//! Card entries and their categories.

use crate::model::CardId;
use serde::Deserialize;

/// Category of a card, used for badge and border styling.
///
/// Closed set validated when the deck is loaded: an unknown category string
/// is a load error rather than a silent fallback at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Concept,
    Technical,
    Framework,
    #[default]
    General,
}

impl Category {
    /// Lowercase label shown in the card badge.
    pub fn label(self) -> &'static str {
        match self {
            Category::Concept => "concept",
            Category::Technical => "technical",
            Category::Framework => "framework",
            Category::General => "general",
        }
    }
}

/// One static content unit: shown as a card in the grid and, when opened,
/// in the detail overlay.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Card {
    id: CardId,
    title: String,
    #[serde(default)]
    category: Category,
    body: String,
}

impl Card {
    pub fn new(id: CardId, title: impl Into<String>, category: Category, body: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            category,
            body: body.into(),
        }
    }

    pub fn id(&self) -> &CardId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Raw body in the markup dialect (see [`crate::markup`]).
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Body truncated to `max_chars` characters for grid previews.
    ///
    /// Appends `...` when anything was cut off.
    pub fn preview(&self, max_chars: usize) -> String {
        match self.body.char_indices().nth(max_chars) {
            Some((byte_index, _)) => format!("{}...", &self.body[..byte_index]),
            None => self.body.clone(),
        }
    }
}
