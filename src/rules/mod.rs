//! Game-state contract consumed by the search.
//!
//! Games implement `GameState` to define:
//! - Legal moves for each side
//! - How a move modifies the position
//! - Whose turn it is
//!
//! The search calls into `GameState` but never interprets the board
//! directly.

pub mod engine;

pub use engine::GameState;
