//! Core value types: sides, cells, moves, RNG.
//!
//! These are shared by the search engine and every game implementation.

pub mod cell;
pub mod moves;
pub mod player;
pub mod rng;

pub use cell::Cell;
pub use moves::{Move, MoveRecord, Relocation};
pub use player::{InvalidPlayerId, PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::GameRng;
