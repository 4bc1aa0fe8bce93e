//! Game of the Amazons.
//!
//! Two sides each own a set of amazons on a rectangular board. A turn
//! moves one amazon like a chess queen over empty squares, then fires an
//! arrow from its new square, again like a queen, which blocks the square
//! it lands on for the rest of the game. The side that cannot move loses.
//!
//! Boards from 1x1 up to 26x26 are supported; the standard game is 10x10
//! with four amazons a side.

mod board;
mod game;

pub use board::{Board, BoardError, Square, DIRECTIONS, MAX_SIDE};
pub use game::{AmazonSet, Amazons, AmazonsBuilder};
