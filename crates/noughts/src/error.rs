//! Unified error type for Noughts.

use noughts_game::GameError;
use noughts_lobby::LobbyError;
use noughts_protocol::ProtocolError;
use noughts_session::SessionError;
use noughts_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// The server and client entry points return this, so `?` works on the
/// error of any layer below.
#[derive(Debug, thiserror::Error)]
pub enum NoughtsError {
    /// Binding, accepting, or connecting failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A frame could not be read or written, or made no sense.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The server sent a board update the rules do not allow.
    #[error(transparent)]
    Game(#[from] GameError),

    /// A game session ended early.
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Lobby(#[from] LobbyError),

    /// Reading user input or writing to the terminal failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_transport_error() {
        let err = TransportError::ConnectionClosed("gone".into());
        let noughts_err: NoughtsError = err.into();
        assert!(matches!(noughts_err, NoughtsError::Transport(_)));
        assert!(noughts_err.to_string().contains("gone"));
    }

    #[test]
    fn test_from_protocol_error() {
        let err = ProtocolError::InvalidPlayerId(7);
        let noughts_err: NoughtsError = err.into();
        assert!(matches!(noughts_err, NoughtsError::Protocol(_)));
        assert_eq!(noughts_err.to_string(), "invalid player id 7");
    }

    #[test]
    fn test_from_game_error() {
        let square = noughts_game::Square::new(4).unwrap();
        let noughts_err: NoughtsError = GameError::CellOccupied(square).into();
        assert!(matches!(noughts_err, NoughtsError::Game(_)));
        assert_eq!(noughts_err.to_string(), "cell 4 is occupied");
    }

    #[test]
    fn test_from_session_error() {
        let err = SessionError::Game(GameError::GameOver);
        let noughts_err: NoughtsError = err.into();
        assert!(matches!(noughts_err, NoughtsError::Session(_)));
        assert_eq!(noughts_err.to_string(), "game is over");
    }

    #[test]
    fn test_from_lobby_error() {
        let err = LobbyError::Protocol(ProtocolError::InvalidMessage("bad".into()));
        let noughts_err: NoughtsError = err.into();
        assert!(matches!(noughts_err, NoughtsError::Lobby(_)));
    }

    #[test]
    fn test_from_io_error() {
        let err = std::io::Error::from(std::io::ErrorKind::UnexpectedEof);
        let noughts_err: NoughtsError = err.into();
        assert!(matches!(noughts_err, NoughtsError::Io(_)));
    }
}
