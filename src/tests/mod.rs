//! Internal test modules - whitebox tests with crate access
//!
//! Tests here drive the TUI through the acceptance harness and can inspect
//! private state directly.

mod acceptance_navigation;
