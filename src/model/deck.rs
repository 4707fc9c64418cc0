//! The content store: an immutable, validated, ordered list of cards.

use crate::markup::{render_blocks, InlineSpan, LinkTarget};
use crate::model::{Card, CardId, DeckError};
use std::collections::HashMap;

/// Ordered, read-only list of cards with an id index.
///
/// Built once at startup. Construction guarantees:
/// - at least one card
/// - ids are unique
#[derive(Debug, Clone)]
pub struct Deck {
    title: String,
    subtitle: Option<String>,
    cards: Vec<Card>,
    index: HashMap<CardId, usize>,
}

/// A card-link whose target does not exist in the deck.
///
/// A content-authoring defect: rendered as inactive text, reported at load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingLink {
    pub card: CardId,
    pub target: CardId,
}

impl Deck {
    pub fn new(
        title: impl Into<String>,
        subtitle: Option<String>,
        cards: Vec<Card>,
    ) -> Result<Self, DeckError> {
        if cards.is_empty() {
            return Err(DeckError::Empty);
        }

        let mut index = HashMap::with_capacity(cards.len());
        for (position, card) in cards.iter().enumerate() {
            if index.insert(card.id().clone(), position).is_some() {
                return Err(DeckError::DuplicateId(card.id().clone()));
            }
        }

        Ok(Self {
            title: title.into(),
            subtitle,
            cards,
            index,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Always false for a constructed deck; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, id: &CardId) -> Option<&Card> {
        self.position(id).map(|position| &self.cards[position])
    }

    pub fn card_at(&self, position: usize) -> Option<&Card> {
        self.cards.get(position)
    }

    /// Deck order position of a card.
    pub fn position(&self, id: &CardId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn contains(&self, id: &CardId) -> bool {
        self.index.contains_key(id)
    }

    /// Card-links in any body that point at ids missing from the deck.
    pub fn dangling_links(&self) -> Vec<DanglingLink> {
        let mut dangling = Vec::new();
        for card in &self.cards {
            for block in render_blocks(card.body()) {
                for span in block.spans() {
                    if let InlineSpan::Link {
                        target: LinkTarget::Card(target),
                        ..
                    } = span
                    {
                        if !self.contains(target) {
                            dangling.push(DanglingLink {
                                card: card.id().clone(),
                                target: target.clone(),
                            });
                        }
                    }
                }
            }
        }
        dangling
    }
}
