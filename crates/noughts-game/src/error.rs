//! Error types for the game rules.

use noughts_protocol::PlayerId;

use crate::Square;

/// Reasons a move is refused.
///
/// These are ordinary outcomes during play, not faults: the session turns
/// them into an `INV` reply and asks the same player again.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// The value is not a cell index (0–8) nor the player-count query.
    #[error("move {0} is out of range")]
    OutOfRange(i32),

    /// The target cell already holds a mark.
    #[error("cell {0} is occupied")]
    CellOccupied(Square),

    /// A player tried to move while it was the opponent's turn.
    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),

    /// The game has already been won or drawn.
    #[error("game is over")]
    GameOver,
}
