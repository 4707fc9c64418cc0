//! Application state and transitions.
//!
//! AppState is the root state type containing all UI state. Navigation
//! changes funnel through [`AppState::navigate`], which keeps the location's
//! `card` parameter and the detail view in step with the navigation state.

use crate::analytics::Analytics;
use crate::markup::{interactions, render_blocks, Interaction};
use crate::model::{Card, CardId, Deck};
use crate::state::{LightboxState, Location, NavigationState};
use crate::view_state::columns::{ColumnAssignment, ColumnCount, ColumnPolicy, GridMove};
use tracing::debug;

// ===== AppState =====

/// Application state.
///
/// # Overlays
///
/// Three overlays can stack above the grid, topmost first:
///
/// - **Image**: `lightbox`, opened from an image inside a card
/// - **Help**: `help_visible`
/// - **Detail**: shown while `navigation` is open
///
/// Closing one never changes the ones below it.
#[derive(Debug, Clone)]
pub struct AppState {
    deck: Deck,

    /// Which card (if any) the detail overlay shows, plus back history.
    navigation: NavigationState,

    /// Shareable location, rewritten on every navigation change.
    location: Location,

    analytics: Analytics,

    /// Card grid layout and selection.
    pub grid: GridState,

    /// Scroll and element focus inside the open card.
    pub detail: DetailState,

    pub lightbox: LightboxState,

    /// Whether the help overlay is currently visible.
    pub help_visible: bool,

    /// One-line feedback shown in the status bar, cleared on the next key.
    pub status_message: Option<String>,
}

impl AppState {
    /// Create state with the detail overlay closed and the first card selected.
    pub fn new(deck: Deck, location: Location, analytics: Analytics, policy: ColumnPolicy) -> Self {
        let grid = GridState::new(&deck, ColumnCount::for_viewport_width(0), policy);
        Self {
            deck,
            navigation: NavigationState::Closed,
            location,
            analytics,
            grid,
            detail: DetailState::default(),
            lightbox: LightboxState::default(),
            help_visible: false,
            status_message: None,
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn analytics(&self) -> &Analytics {
        &self.analytics
    }

    /// The card shown in the detail overlay.
    pub fn open_card(&self) -> Option<&Card> {
        self.navigation.current().and_then(|id| self.deck.get(id))
    }

    /// Deck position of the open card.
    pub fn open_position(&self) -> Option<usize> {
        self.navigation
            .current()
            .and_then(|id| self.deck.position(id))
    }

    /// Interactive elements of the open card, in reading order.
    ///
    /// Links to ids outside the deck are left out.
    pub fn open_card_interactions(&self) -> Vec<Interaction> {
        let Some(card) = self.open_card() else {
            return Vec::new();
        };
        interactions(&render_blocks(card.body()), |id| self.deck.contains(id))
    }

    /// Apply a navigation transition and sync derived state when it changes.
    ///
    /// On change the location's `card` parameter is set to the open card (or
    /// removed when closed) and the detail view resets to the top with no
    /// element focused. Closing moves the grid selection to the card that was
    /// open. Returns whether the state changed.
    pub fn navigate(&mut self, transition: impl FnOnce(&mut NavigationState, &Deck) -> bool) -> bool {
        let previous = self.navigation.current().cloned();
        if !transition(&mut self.navigation, &self.deck) {
            return false;
        }

        self.sync_location();
        self.detail = DetailState::default();

        match (&previous, self.navigation.current()) {
            (Some(closed), None) => {
                if let Some(position) = self.deck.position(closed) {
                    self.grid.selected = position;
                }
            }
            (_, Some(current)) => {
                if let Some(position) = self.deck.position(current) {
                    self.grid.selected = position;
                }
            }
            (None, None) => {}
        }

        debug!(
            from = previous.as_ref().map(CardId::as_str),
            to = self.navigation.current().map(CardId::as_str),
            history = self.navigation.history().len(),
            location = %self.location,
            "Navigation changed"
        );
        true
    }

    /// Write the open card id into the location's `card` parameter.
    fn sync_location(&mut self) {
        self.location.replace_card_param(self.navigation.current());
    }

    /// Recompute the grid for a new viewport width.
    pub fn relayout(&mut self, count: ColumnCount) {
        self.grid.relayout(&self.deck, count);
    }

    /// The card selected in the grid.
    pub fn selected_card(&self) -> Option<&Card> {
        self.deck.card_at(self.grid.selected)
    }
}

// ===== GridState =====

/// Card grid: column assignment plus the selected card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridState {
    policy: ColumnPolicy,
    count: ColumnCount,
    assignment: ColumnAssignment,
    /// Deck position of the selected card.
    pub selected: usize,
}

impl GridState {
    pub fn new(deck: &Deck, count: ColumnCount, policy: ColumnPolicy) -> Self {
        Self {
            policy,
            count,
            assignment: ColumnAssignment::distribute(deck.cards(), count, policy),
            selected: 0,
        }
    }

    pub fn policy(&self) -> ColumnPolicy {
        self.policy
    }

    pub fn column_count(&self) -> ColumnCount {
        self.count
    }

    pub fn assignment(&self) -> &ColumnAssignment {
        &self.assignment
    }

    /// Redistribute when the column count changes. Same count: no work.
    pub fn relayout(&mut self, deck: &Deck, count: ColumnCount) {
        if count == self.count {
            return;
        }
        debug!(from = self.count.get(), to = count.get(), "Grid columns changed");
        self.count = count;
        self.assignment = ColumnAssignment::distribute(deck.cards(), count, self.policy);
    }

    /// Move the selection one step in the grid.
    pub fn move_selection(&mut self, direction: GridMove) {
        self.selected = self.assignment.neighbor(self.selected, direction);
    }
}

// ===== DetailState =====

/// View state of the open card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetailState {
    /// Lines scrolled off the top of the body.
    pub scroll: u16,
    /// Index into [`AppState::open_card_interactions`].
    pub focused_element: Option<usize>,
}

impl DetailState {
    /// Move focus forward, wrapping; starts at the first element.
    pub fn focus_next(&mut self, element_count: usize) {
        if element_count == 0 {
            self.focused_element = None;
            return;
        }
        self.focused_element = Some(match self.focused_element {
            Some(index) => (index + 1) % element_count,
            None => 0,
        });
    }

    /// Move focus backward, wrapping; starts at the last element.
    pub fn focus_prev(&mut self, element_count: usize) {
        if element_count == 0 {
            self.focused_element = None;
            return;
        }
        self.focused_element = Some(match self.focused_element {
            Some(0) | None => element_count - 1,
            Some(index) => (index - 1).min(element_count - 1),
        });
    }

    pub fn scroll_by(&mut self, delta: i32, max_scroll: u16) {
        let target = i32::from(self.scroll).saturating_add(delta);
        self.scroll = target.clamp(0, i32::from(max_scroll)) as u16;
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
