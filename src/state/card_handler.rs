//! Card navigation keyboard action handler.
//!
//! Maps domain actions onto navigation transitions and overlays, and emits
//! the matching analytics event for every change. Analytics is recorded only
//! after a transition succeeds; a no-op transition records nothing.

use crate::analytics::EventName;
use crate::markup::Interaction;
use crate::model::{CardId, Deck, KeyAction};
use crate::state::{AppState, NavigationState};
use crate::view_state::columns::GridMove;
use serde_json::{json, Value};

/// Rows the grid selection jumps on page up/down.
pub const GRID_PAGE_ROWS: usize = 3;

/// An external URL the shell should hand to the system browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalLink {
    pub url: String,
    pub label: String,
}

/// Viewport facts the handler needs from the last render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetailViewport {
    /// Visible body lines.
    pub height: u16,
    /// Largest useful scroll offset for the open card.
    pub max_scroll: u16,
}

fn card_payload(state: &AppState, id: &CardId) -> Value {
    let title = state.deck().get(id).map(|card| card.title()).unwrap_or_default();
    json!({ "cardId": id.as_str(), "cardTitle": title })
}

fn with_field(mut payload: Value, key: &str, value: Value) -> Value {
    if let Value::Object(map) = &mut payload {
        map.insert(key.to_string(), value);
    }
    payload
}

/// Open a card from the grid (fresh history).
pub fn expand(state: &mut AppState, id: &CardId) -> bool {
    let was_open = state.navigation().is_open();
    if !state.navigate(|nav, deck| nav.expand(deck, id)) {
        return false;
    }

    let payload = card_payload(state, id);
    state.analytics().track(EventName::CheatSheetExpand, payload.clone());
    if !was_open {
        state
            .analytics()
            .track(EventName::ModalOpen, with_field(payload, "source", json!("grid")));
    }
    true
}

/// Follow an in-body cross reference.
pub fn follow_link(state: &mut AppState, id: &CardId) -> bool {
    let from = state.navigation().current().cloned();
    if !state.navigate(|nav, deck| nav.follow_link(deck, id)) {
        return false;
    }

    let payload = with_field(
        card_payload(state, id),
        "fromCardId",
        json!(from.as_ref().map(CardId::as_str)),
    );
    state.analytics().track(EventName::CardClick, payload);
    true
}

/// Step to the next card in deck order.
pub fn next(state: &mut AppState) -> bool {
    step(state, "next", |nav, deck| nav.next(deck))
}

/// Step to the previous card in deck order.
pub fn previous(state: &mut AppState) -> bool {
    step(state, "previous", |nav, deck| nav.previous(deck))
}

fn step(
    state: &mut AppState,
    direction: &str,
    transition: impl FnOnce(&mut NavigationState, &Deck) -> bool,
) -> bool {
    if !state.navigate(transition) {
        return false;
    }
    if let Some(id) = state.navigation().current().cloned() {
        let payload = with_field(card_payload(state, &id), "direction", json!(direction));
        state.analytics().track(EventName::CardNavigate, payload);
    }
    true
}

/// Return to the card left by the last followed link.
pub fn back(state: &mut AppState) -> bool {
    if !state.navigate(|nav, _| nav.back()) {
        return false;
    }
    if let Some(id) = state.navigation().current().cloned() {
        let payload = card_payload(state, &id);
        state.analytics().track(EventName::CardBack, payload);
    }
    true
}

/// Close the detail overlay.
pub fn close(state: &mut AppState) -> bool {
    let Some(open) = state.navigation().current().cloned() else {
        return false;
    };
    if !state.navigate(|nav, _| nav.close()) {
        return false;
    }
    let payload = card_payload(state, &open);
    state.analytics().track(EventName::ModalClose, payload);
    true
}

/// Show the image overlay. Navigation is untouched.
pub fn show_image(state: &mut AppState, src: &str, alt: &str) {
    state.lightbox.show(src, alt);
    let card = state.navigation().current().map(|id| id.as_str().to_string());
    state.analytics().track(
        EventName::ImageView,
        json!({ "src": src, "alt": alt, "cardId": card }),
    );
}

/// Apply the initial location: open the card its `card` parameter names.
///
/// Runs once at startup. Unknown ids leave the overlay closed and the
/// location as it was.
pub fn hydrate_from_location(state: &mut AppState) -> bool {
    state.analytics().track(
        EventName::PageView,
        json!({ "url": state.location().to_url() }),
    );

    let Some(id) = state.location().card_param() else {
        return false;
    };
    if !state.navigate(|nav, deck| nav.expand(deck, &id)) {
        return false;
    }

    let payload = with_field(card_payload(state, &id), "source", json!("location"));
    state.analytics().track(EventName::ModalOpen, payload);
    true
}

/// Perform an interaction from the open card's body.
///
/// Returns the link for the shell to open when the interaction leaves the
/// application.
pub fn activate(state: &mut AppState, interaction: Interaction) -> Option<ExternalLink> {
    match interaction {
        Interaction::FollowCard(id) => {
            follow_link(state, &id);
            None
        }
        Interaction::ViewImage { src, alt } => {
            show_image(state, &src, &alt);
            None
        }
        Interaction::OpenExternal { url, label } => {
            state.analytics().track_outbound_link(&url, &label);
            Some(ExternalLink { url, label })
        }
    }
}

/// Activate the focused element of the open card, if any.
pub fn activate_focused(state: &mut AppState) -> Option<ExternalLink> {
    let index = state.detail.focused_element?;
    let interaction = state.open_card_interactions().into_iter().nth(index)?;
    activate(state, interaction)
}

/// Handle a key action routed to the card views.
///
/// Overlays take precedence topmost first: image, help, detail, grid.
pub fn handle_card_action(
    state: &mut AppState,
    action: KeyAction,
    viewport: DetailViewport,
) -> Option<ExternalLink> {
    if state.lightbox.is_showing() {
        if matches!(action, KeyAction::CloseOverlay | KeyAction::Activate) {
            state.lightbox.close();
        }
        return None;
    }

    if state.help_visible {
        if matches!(action, KeyAction::CloseOverlay | KeyAction::Help) {
            state.help_visible = false;
        }
        return None;
    }

    if action == KeyAction::Help {
        state.help_visible = true;
        return None;
    }

    if state.navigation().is_open() {
        return handle_detail_action(state, action, viewport);
    }

    handle_grid_action(state, action);
    None
}

fn handle_detail_action(
    state: &mut AppState,
    action: KeyAction,
    viewport: DetailViewport,
) -> Option<ExternalLink> {
    let page = i32::from(viewport.height.saturating_sub(1).max(1));
    match action {
        KeyAction::MoveUp => state.detail.scroll_by(-1, viewport.max_scroll),
        KeyAction::MoveDown => state.detail.scroll_by(1, viewport.max_scroll),
        KeyAction::PageUp => state.detail.scroll_by(-page, viewport.max_scroll),
        KeyAction::PageDown => state.detail.scroll_by(page, viewport.max_scroll),
        KeyAction::MoveLeft => {
            previous(state);
        }
        KeyAction::MoveRight => {
            next(state);
        }
        KeyAction::FocusNextElement => {
            let count = state.open_card_interactions().len();
            state.detail.focus_next(count);
        }
        KeyAction::FocusPrevElement => {
            let count = state.open_card_interactions().len();
            state.detail.focus_prev(count);
        }
        KeyAction::Activate => return activate_focused(state),
        KeyAction::Back => {
            back(state);
        }
        KeyAction::CloseOverlay => {
            close(state);
        }
        KeyAction::Quit | KeyAction::Help => {}
    }
    None
}

fn handle_grid_action(state: &mut AppState, action: KeyAction) {
    match action {
        KeyAction::MoveUp => state.grid.move_selection(GridMove::Up),
        KeyAction::MoveDown => state.grid.move_selection(GridMove::Down),
        KeyAction::MoveLeft => state.grid.move_selection(GridMove::Left),
        KeyAction::MoveRight => state.grid.move_selection(GridMove::Right),
        KeyAction::PageUp => {
            for _ in 0..GRID_PAGE_ROWS {
                state.grid.move_selection(GridMove::Up);
            }
        }
        KeyAction::PageDown => {
            for _ in 0..GRID_PAGE_ROWS {
                state.grid.move_selection(GridMove::Down);
            }
        }
        KeyAction::Activate => {
            if let Some(id) = state.selected_card().map(|card| card.id().clone()) {
                expand(state, &id);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
#[path = "card_handler_tests.rs"]
mod tests;
