//! cheatdeck
//!
//! Terminal browser for a deck of cross-linked reference cards.
//!
//! The library follows a pure core / impure shell split: `markup`,
//! `view_state` and `state` are plain data and transitions, while `view`
//! owns the terminal and the system browser.

pub mod analytics;
pub mod config;
pub mod logging;
pub mod markup;
pub mod model;
pub mod parser;
pub mod state;
pub mod view;
pub mod view_state;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
