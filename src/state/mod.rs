//! UI state machine.
//!
//! State transitions are plain functions over [`AppState`], testable without
//! a terminal. The only side effect is analytics recording.

pub mod app_state;
pub mod card_handler;
pub mod lightbox;
pub mod location;
pub mod navigation;

// Re-export for convenience
pub use app_state::{AppState, DetailState, GridState};
pub use card_handler::{handle_card_action, hydrate_from_location, DetailViewport, ExternalLink};
pub use lightbox::LightboxState;
pub use location::Location;
pub use navigation::NavigationState;
