//! Card navigation state machine (pure).
//!
//! The detail overlay is either closed or showing one card. While open, a
//! history stack records the cards left by following in-body links so `back`
//! can retrace them. Opening from the grid and stepping with previous/next
//! start a fresh history.
//!
//! Every operation returns whether the state changed. Targets that are not
//! in the deck are ignored.
//!
//! # Invariants
//! - The top of the history stack is never the current card.
//! - `Closed` carries no history.

use crate::model::{CardId, Deck};
use tracing::debug;

/// Navigation state of the detail overlay.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NavigationState {
    #[default]
    Closed,
    Open {
        current: CardId,
        /// Cards to return to, oldest first.
        history: Vec<CardId>,
    },
}

impl NavigationState {
    pub fn is_open(&self) -> bool {
        matches!(self, NavigationState::Open { .. })
    }

    /// Id of the card being shown.
    pub fn current(&self) -> Option<&CardId> {
        match self {
            NavigationState::Open { current, .. } => Some(current),
            NavigationState::Closed => None,
        }
    }

    pub fn history(&self) -> &[CardId] {
        match self {
            NavigationState::Open { history, .. } => history,
            NavigationState::Closed => &[],
        }
    }

    /// Whether `back` would do anything.
    pub fn can_go_back(&self) -> bool {
        !self.history().is_empty()
    }

    /// Open `id` with an empty history, from any state.
    pub fn expand(&mut self, deck: &Deck, id: &CardId) -> bool {
        if !deck.contains(id) {
            debug!(card = %id, "Ignoring expand of unknown card");
            return false;
        }
        self.replace(NavigationState::Open {
            current: id.clone(),
            history: Vec::new(),
        })
    }

    /// Follow an in-body link, pushing the current card onto the history.
    ///
    /// No-op when closed, when the target is unknown, or when the target is
    /// already the current card.
    pub fn follow_link(&mut self, deck: &Deck, id: &CardId) -> bool {
        if !deck.contains(id) {
            debug!(card = %id, "Ignoring link to unknown card");
            return false;
        }
        let NavigationState::Open { current, history } = self else {
            return false;
        };
        if *current == *id {
            return false;
        }

        let left = std::mem::replace(current, id.clone());
        history.push(left);
        true
    }

    /// Step to the next card in deck order. No-op at the last card.
    pub fn next(&mut self, deck: &Deck) -> bool {
        self.step(deck, |position, len| (position + 1 < len).then_some(position + 1))
    }

    /// Step to the previous card in deck order. No-op at the first card.
    pub fn previous(&mut self, deck: &Deck) -> bool {
        self.step(deck, |position, _| position.checked_sub(1))
    }

    /// Return to the most recently left card.
    pub fn back(&mut self) -> bool {
        let NavigationState::Open { current, history } = self else {
            return false;
        };
        match history.pop() {
            Some(previous) => {
                *current = previous;
                true
            }
            None => false,
        }
    }

    /// Close the overlay and forget the history.
    pub fn close(&mut self) -> bool {
        self.replace(NavigationState::Closed)
    }

    fn step(&mut self, deck: &Deck, target: impl Fn(usize, usize) -> Option<usize>) -> bool {
        let Some(position) = self.current().and_then(|id| deck.position(id)) else {
            return false;
        };
        let Some(card) = target(position, deck.len()).and_then(|index| deck.card_at(index)) else {
            return false;
        };
        self.replace(NavigationState::Open {
            current: card.id().clone(),
            history: Vec::new(),
        })
    }

    fn replace(&mut self, next: NavigationState) -> bool {
        if *self == next {
            return false;
        }
        *self = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Card, Category};

    fn id(raw: &str) -> CardId {
        CardId::new(raw).expect("valid id")
    }

    fn deck(ids: &[&str]) -> Deck {
        let cards = ids
            .iter()
            .map(|raw| Card::new(id(raw), raw.to_uppercase(), Category::General, ""))
            .collect();
        Deck::new("Test", None, cards).expect("valid deck")
    }

    fn open(current: &str, history: &[&str]) -> NavigationState {
        NavigationState::Open {
            current: id(current),
            history: history.iter().map(|raw| id(raw)).collect(),
        }
    }

    #[test]
    fn expand_opens_with_empty_history_from_any_state() {
        let deck = deck(&["a", "b", "c"]);
        let mut state = open("a", &["b", "c"]);

        assert!(state.expand(&deck, &id("c")));
        assert_eq!(state, open("c", &[]));

        let mut closed = NavigationState::Closed;
        assert!(closed.expand(&deck, &id("b")));
        assert_eq!(closed, open("b", &[]));
    }

    #[test]
    fn expand_same_card_clears_history() {
        let deck = deck(&["a", "b"]);
        let mut state = open("a", &["b"]);
        assert!(state.expand(&deck, &id("a")));
        assert_eq!(state, open("a", &[]));
        assert!(!state.expand(&deck, &id("a")), "already in that state");
    }

    #[test]
    fn expand_unknown_card_is_ignored() {
        let deck = deck(&["a"]);
        let mut state = NavigationState::Closed;
        assert!(!state.expand(&deck, &id("nope")));
        assert_eq!(state, NavigationState::Closed);
    }

    #[test]
    fn follow_link_pushes_current_card() {
        let deck = deck(&["a", "b", "c"]);
        let mut state = open("a", &[]);
        assert!(state.follow_link(&deck, &id("b")));
        assert_eq!(state, open("b", &["a"]));
    }

    #[test]
    fn follow_link_to_current_card_is_a_no_op() {
        let deck = deck(&["a", "b"]);
        let mut state = open("b", &["a"]);
        assert!(!state.follow_link(&deck, &id("b")));
        assert_eq!(state, open("b", &["a"]));
    }

    #[test]
    fn follow_link_when_closed_or_unknown_is_a_no_op() {
        let deck = deck(&["a", "b"]);
        let mut closed = NavigationState::Closed;
        assert!(!closed.follow_link(&deck, &id("a")));
        assert_eq!(closed, NavigationState::Closed);

        let mut state = open("a", &[]);
        assert!(!state.follow_link(&deck, &id("zzz")));
        assert_eq!(state, open("a", &[]));
    }

    #[test]
    fn link_chain_unwinds_with_back() {
        let deck = deck(&["a", "b", "c"]);
        let mut state = NavigationState::Closed;

        state.expand(&deck, &id("a"));
        state.follow_link(&deck, &id("b"));
        state.follow_link(&deck, &id("c"));
        assert_eq!(state, open("c", &["a", "b"]));

        assert!(state.back());
        assert_eq!(state, open("b", &["a"]));
        assert!(state.back());
        assert_eq!(state, open("a", &[]));
        assert!(!state.back(), "third back is a no-op");
        assert_eq!(state, open("a", &[]));
    }

    #[test]
    fn link_back_and_forth_keeps_alternating_history() {
        let deck = deck(&["a", "b"]);
        let mut state = open("a", &[]);
        state.follow_link(&deck, &id("b"));
        state.follow_link(&deck, &id("a"));
        assert_eq!(state, open("a", &["a", "b"]));
        state.back();
        assert_eq!(state, open("b", &["a"]));
    }

    #[test]
    fn next_and_previous_follow_deck_order_and_clear_history() {
        let deck = deck(&["a", "b", "c"]);
        let mut state = open("b", &["c"]);

        assert!(state.next(&deck));
        assert_eq!(state, open("c", &[]));
        assert!(state.previous(&deck));
        assert!(state.previous(&deck));
        assert_eq!(state, open("a", &[]));
    }

    #[test]
    fn next_at_last_and_previous_at_first_are_no_ops() {
        let deck = deck(&["a", "b"]);
        let mut last = open("b", &["a"]);
        assert!(!last.next(&deck));
        assert_eq!(last, open("b", &["a"]), "history survives a boundary no-op");

        let mut first = open("a", &[]);
        assert!(!first.previous(&deck));
        assert_eq!(first, open("a", &[]));
    }

    #[test]
    fn stepping_when_closed_is_a_no_op() {
        let deck = deck(&["a", "b"]);
        let mut state = NavigationState::Closed;
        assert!(!state.next(&deck));
        assert!(!state.previous(&deck));
        assert!(!state.back());
        assert_eq!(state, NavigationState::Closed);
    }

    #[test]
    fn close_forgets_history() {
        let mut state = open("a", &["b"]);
        assert!(state.close());
        assert_eq!(state, NavigationState::Closed);
        assert!(state.history().is_empty());
        assert!(!state.close());
    }

    #[test]
    fn can_go_back_reflects_history() {
        assert!(!open("a", &[]).can_go_back());
        assert!(open("a", &["b"]).can_go_back());
        assert!(!NavigationState::Closed.can_go_back());
    }
}
