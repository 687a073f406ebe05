//! `othello-engine` is the rules engine for Othello (Reversi) on the standard 8x8 board.
//!
//! This package implements three levels of abstraction:
//!
//!  - [`bitboard`] contains the raw [`Bitboard`](bitboard::Bitboard) set type that
//!    every other type is packed into.
//!  - [`Board`] holds the discs of both colors and implements the directional scan
//!    that decides legality and flips. It performs no turn bookkeeping.
//!  - [`GameEngine`] is the authoritative, safe interface: it owns a board and the
//!    turn state, validates every move before mutating, skips stalemated players
//!    and detects the end of the game.
//!
//! A presentation layer should only call [`GameEngine`] and re-render from
//! [`GameEngine::board_snapshot`].

pub mod bitboard;
pub mod test_utils;

mod board;
mod engine;
mod location;
mod player;
mod utils;

pub use board::*;
pub use engine::*;
pub use location::*;
pub use player::*;

/// The number of spaces on one edge of an Othello board.
pub const EDGE_LENGTH: usize = 8;

/// The number of spaces on an Othello board.
pub const NUM_SPACES: usize = 64;
