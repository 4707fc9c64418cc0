//! Acceptance tests for browsing the bundled deck from the keyboard.
//!
//! Bundled deck order: basic-models (0), models-inference (1), ... ,
//! calling-ai-models (15), ai-app-architecture (16).

use crate::analytics::EventName;
use crate::model::CardId;
use crate::test_harness::AcceptanceTestHarness;
use crossterm::event::{KeyCode, KeyModifiers};
use serde_json::json;

fn id(raw: &str) -> CardId {
    CardId::new(raw).expect("valid id")
}

fn current(harness: &AcceptanceTestHarness) -> Option<String> {
    harness
        .state()
        .navigation()
        .current()
        .map(|id| id.as_str().to_string())
}

#[test]
fn startup_records_page_view_and_shows_grid() {
    let harness = AcceptanceTestHarness::bundled().expect("harness");

    assert!(!harness.state().navigation().is_open());
    assert_eq!(harness.state().grid.selected, 0);
    assert_eq!(harness.event_names(), vec![EventName::PageView]);
    assert_eq!(harness.events()[0].data["url"], json!("/"));
}

#[test]
fn enter_opens_selected_card_and_writes_location() {
    let mut harness = AcceptanceTestHarness::bundled().expect("harness");

    harness.send_key(KeyCode::Char('j'));
    harness.send_key(KeyCode::Enter);

    assert_eq!(current(&harness).as_deref(), Some("models-inference"));
    assert_eq!(
        harness.state().location().card_param(),
        Some(id("models-inference"))
    );
    assert_eq!(
        harness.event_names(),
        vec![
            EventName::PageView,
            EventName::CheatSheetExpand,
            EventName::ModalOpen
        ]
    );
}

#[test]
fn following_links_builds_history_and_back_unwinds_it() {
    let mut harness = AcceptanceTestHarness::bundled().expect("harness");
    harness.send_key(KeyCode::Enter); // basic-models

    // First element of basic-models links to ai-app-architecture
    harness.send_keys(&[KeyCode::Tab, KeyCode::Enter]);
    assert_eq!(current(&harness).as_deref(), Some("ai-app-architecture"));
    assert_eq!(harness.state().navigation().history(), &[id("basic-models")]);
    assert_eq!(
        harness.state().location().card_param(),
        Some(id("ai-app-architecture"))
    );

    harness.send_key(KeyCode::Char('b'));
    assert_eq!(current(&harness).as_deref(), Some("basic-models"));
    assert!(!harness.state().navigation().can_go_back());

    // Nothing left to go back to
    harness.send_key(KeyCode::Backspace);
    assert_eq!(current(&harness).as_deref(), Some("basic-models"));
    assert_eq!(
        harness.event_names().last(),
        Some(&EventName::CardBack),
        "no-op back records nothing"
    );
}

#[test]
fn arrows_step_through_deck_order_and_clear_history() {
    let mut harness = AcceptanceTestHarness::bundled().expect("harness");
    harness.send_key(KeyCode::Enter);
    harness.send_keys(&[KeyCode::Tab, KeyCode::Enter]); // into ai-app-architecture

    // Last card: next is a no-op, history survives
    harness.send_key(KeyCode::Right);
    assert_eq!(current(&harness).as_deref(), Some("ai-app-architecture"));
    assert!(harness.state().navigation().can_go_back());

    harness.send_key(KeyCode::Left);
    assert_eq!(current(&harness).as_deref(), Some("calling-ai-models"));
    assert!(!harness.state().navigation().can_go_back());
    assert_eq!(harness.events().last().map(|e| e.data["direction"].clone()), Some(json!("previous")));
}

#[test]
fn escape_closes_detail_and_selects_the_closed_card() {
    let mut harness = AcceptanceTestHarness::builder()
        .location("/?card=rag")
        .build()
        .expect("harness");
    assert_eq!(current(&harness).as_deref(), Some("rag"));

    harness.send_key(KeyCode::Esc);

    assert!(!harness.state().navigation().is_open());
    assert_eq!(harness.state().location().card_param(), None);
    assert_eq!(harness.state().grid.selected, 5, "rag is the sixth card");
    assert_eq!(harness.event_names().last(), Some(&EventName::ModalClose));
}

#[test]
fn hydration_opens_card_from_location() {
    let harness = AcceptanceTestHarness::builder()
        .location("/deck?card=mcp&ref=share")
        .build()
        .expect("harness");

    assert_eq!(current(&harness).as_deref(), Some("mcp"));
    assert!(!harness.state().navigation().can_go_back());
    assert_eq!(harness.state().location().param("ref"), Some("share"));
    assert_eq!(
        harness.event_names(),
        vec![EventName::PageView, EventName::ModalOpen]
    );
    assert_eq!(harness.events()[1].data["source"], json!("location"));
}

#[test]
fn hydration_ignores_unknown_card() {
    let harness = AcceptanceTestHarness::builder()
        .location("/?card=does-not-exist")
        .build()
        .expect("harness");

    assert!(!harness.state().navigation().is_open());
    assert_eq!(
        harness.state().location().param("card"),
        Some("does-not-exist"),
        "location left untouched"
    );
    assert_eq!(harness.event_names(), vec![EventName::PageView]);
}

#[test]
fn focus_cycles_and_wraps() {
    let mut harness = AcceptanceTestHarness::builder()
        .location("/?card=mcp")
        .build()
        .expect("harness");

    harness.send_key(KeyCode::Tab);
    assert_eq!(harness.state().detail.focused_element, Some(0));
    harness.send_key(KeyCode::Tab);
    assert_eq!(harness.state().detail.focused_element, Some(1));
    harness.send_key(KeyCode::Tab);
    assert_eq!(harness.state().detail.focused_element, Some(0), "wraps");
    harness.send_key_with_mods(KeyCode::BackTab, KeyModifiers::SHIFT);
    assert_eq!(harness.state().detail.focused_element, Some(1));
}

#[test]
fn image_opens_lightbox_above_detail() {
    let mut harness = AcceptanceTestHarness::builder()
        .location("/?card=ai-app-architecture")
        .build()
        .expect("harness");

    harness.send_keys(&[KeyCode::Tab, KeyCode::Enter]);
    assert!(harness.state().lightbox.is_showing());
    assert_eq!(harness.event_names().last(), Some(&EventName::ImageView));

    // Keys other than close do nothing while the image shows
    harness.send_key(KeyCode::Left);
    assert_eq!(current(&harness).as_deref(), Some("ai-app-architecture"));

    harness.send_key(KeyCode::Esc);
    assert!(!harness.state().lightbox.is_showing());
    assert_eq!(
        current(&harness).as_deref(),
        Some("ai-app-architecture"),
        "closing the image leaves the card open"
    );
}

#[test]
fn help_overlay_blocks_navigation_until_closed() {
    let mut harness = AcceptanceTestHarness::bundled().expect("harness");

    harness.send_key(KeyCode::Char('?'));
    assert!(harness.state().help_visible);

    harness.send_key(KeyCode::Enter);
    assert!(!harness.state().navigation().is_open());

    harness.send_key(KeyCode::Esc);
    assert!(!harness.state().help_visible);
    harness.send_key(KeyCode::Char('?'));
    harness.send_key(KeyCode::Char('?'));
    assert!(!harness.state().help_visible, "? toggles");
}

#[test]
fn quit_keys_stop_the_app() {
    let mut harness = AcceptanceTestHarness::bundled().expect("harness");
    assert!(harness.send_key(KeyCode::Char('q')));
    assert!(!harness.is_running());

    let mut harness = AcceptanceTestHarness::bundled().expect("harness");
    assert!(harness.send_key_with_mods(KeyCode::Char('c'), KeyModifiers::CONTROL));
}

#[test]
fn detail_scroll_is_bounded_by_content() {
    let mut harness = AcceptanceTestHarness::builder()
        .location("/?card=dev-agent-features")
        .size(60, 16)
        .build()
        .expect("harness");

    for _ in 0..200 {
        harness.send_key(KeyCode::Char('j'));
    }
    let scrolled = harness.state().detail.scroll;
    assert!(scrolled > 0, "long card scrolls in a small terminal");
    harness.send_key(KeyCode::Char('j'));
    assert_eq!(harness.state().detail.scroll, scrolled, "clamped at the end");

    harness.send_key(KeyCode::Right);
    assert_eq!(harness.state().detail.scroll, 0, "new card starts at the top");
}
