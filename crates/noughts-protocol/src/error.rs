//! Error types for the protocol layer.
//!
//! Each crate in Noughts defines its own error enum. When you see a
//! `ProtocolError`, the problem is in framing or in the bytes a peer
//! sent, not in game rules.

use noughts_transport::TransportError;

/// Errors that can occur while reading or writing protocol frames.
///
/// None of these are recoverable on the same connection: the protocol
/// has no way to resynchronise once a frame is lost or garbled.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The underlying stream failed or the peer disconnected.
    ///
    /// A short read (fewer bytes than the frame size before end-of-stream)
    /// arrives here as [`TransportError::ConnectionClosed`].
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Three bytes arrived that are not a known command token.
    #[error("unknown command token {0:?}")]
    UnknownCommand(String),

    /// A known command arrived where a different one was required.
    #[error("expected {expected}, got {got}")]
    UnexpectedCommand {
        expected: &'static str,
        got: &'static str,
    },

    /// The identity integer was neither 0 nor 1.
    #[error("invalid player id {0}")]
    InvalidPlayerId(i32),

    /// The frame decoded but violates protocol rules, e.g. a board update
    /// naming a cell outside 0–8.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
