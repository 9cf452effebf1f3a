//! Error types for the session layer.

use noughts_game::GameError;
use noughts_protocol::{PlayerId, ProtocolError};

/// Errors that end a game session early.
///
/// An illegal move is not one of these: the session answers it with
/// `INV` and keeps going. Everything here means a seat can no longer be
/// talked to, so the session aborts.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A read or write on one of the seats failed, or the peer sent
    /// bytes that are not a valid frame.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The referee refused a move the session had already classified as
    /// legal.
    #[error(transparent)]
    Game(#[from] GameError),

    /// Both seats handed to a session hold the same identity.
    #[error("both seats are {0}")]
    DuplicateSeat(PlayerId),
}
