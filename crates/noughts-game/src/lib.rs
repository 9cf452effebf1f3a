//! Game rules for Noughts.
//!
//! - [`Board`]: the 3×3 grid, move legality, win detection
//! - [`Game`]: the referee that tracks turns and decides win or draw
//! - [`GameError`]: why a move was refused
//!
//! Nothing here performs I/O. The session crate drives a [`Game`] with
//! values read off the wire and turns each result into messages.

mod board;
mod error;
mod game;

pub use board::{Board, Cell, Square};
pub use error::GameError;
pub use game::{Game, MAX_MOVES, Move, Progress};
