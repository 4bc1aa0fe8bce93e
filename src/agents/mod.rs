//! Agents and the game loop that pits them against each other.

mod game;
mod players;

pub use game::{play_game, GameRecord};
pub use players::{MctsPlayer, Player, RandomPlayer};
