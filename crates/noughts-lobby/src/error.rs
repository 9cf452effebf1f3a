//! Error types for the lobby.

use noughts_protocol::ProtocolError;

/// Errors that can occur while admitting a connection.
///
/// An admission error costs only the connection being admitted. A player
/// already waiting for an opponent is unaffected.
#[derive(Debug, thiserror::Error)]
pub enum LobbyError {
    /// Sending the identity or `HLD` to the new connection failed.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
