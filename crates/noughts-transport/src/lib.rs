//! Transport abstraction layer for Noughts.
//!
//! Provides the [`Transport`] and [`Connection`] traits that abstract over
//! the byte streams games are played on. The wire protocol is made of
//! fixed-size frames, so a connection is read in exact lengths rather than
//! in messages.
//!
//! # Feature Flags
//!
//! - `memory`: in-process connections over `tokio::io::duplex`, used by
//!   tests that drive the protocol without opening sockets

mod error;
#[cfg(any(test, feature = "memory"))]
mod memory;
mod stream;

pub use error::TransportError;
#[cfg(any(test, feature = "memory"))]
pub use memory::{MemoryConnection, MemoryConnector, MemoryTransport, pair};
pub use stream::{StreamConnection, TcpConnection, TcpTransport};

use std::fmt;
use std::future::Future;

/// Opaque identifier for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Creates a new `ConnectionId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Accepts new incoming connections.
pub trait Transport: Send + 'static {
    /// The connection type produced by this transport.
    type Connection: Connection;

    /// Waits for and accepts the next incoming connection.
    ///
    /// Returns [`TransportError::Shutdown`] once the transport can never
    /// produce another connection.
    fn accept(
        &mut self,
    ) -> impl Future<Output = Result<Self::Connection, TransportError>> + Send;
}

/// A single bidirectional byte stream.
///
/// Both halves are guarded independently, so one task may be blocked in
/// [`recv_exact`](Connection::recv_exact) while another writes.
pub trait Connection: Send + Sync + 'static {
    /// Writes all of `data` to the remote peer and flushes it.
    fn send(
        &self,
        data: &[u8],
    ) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Reads exactly `len` bytes.
    ///
    /// End-of-stream before `len` bytes arrive is reported as
    /// [`TransportError::ConnectionClosed`]; the bytes already read are
    /// discarded.
    fn recv_exact(
        &self,
        len: usize,
    ) -> impl Future<Output = Result<Vec<u8>, TransportError>> + Send;

    /// Shuts down the write half, signalling end-of-stream to the peer.
    fn close(&self) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Returns the unique identifier for this connection.
    fn id(&self) -> ConnectionId;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_id_new_and_into_inner() {
        let id = ConnectionId::new(42);
        assert_eq!(id.into_inner(), 42);
    }

    #[test]
    fn test_connection_id_display() {
        let id = ConnectionId::new(7);
        assert_eq!(id.to_string(), "conn-7");
    }

    #[test]
    fn test_connection_id_equality() {
        let a = ConnectionId::new(1);
        let b = ConnectionId::new(1);
        let c = ConnectionId::new(2);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
