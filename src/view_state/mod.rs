//! Derived layout state, computed from the deck and the viewport.

pub mod columns;
