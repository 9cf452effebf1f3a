//! In-process connections for tests.
//!
//! [`pair`] returns two connected ends of a `tokio::io::duplex` pipe.
//! [`MemoryTransport`] accepts connections opened through its
//! [`MemoryConnector`], so an accept loop can be driven without sockets.

use tokio::io::DuplexStream;
use tokio::sync::mpsc;

use crate::{StreamConnection, Transport, TransportError};

/// Buffer size of each direction of an in-memory pipe.
const PIPE_CAPACITY: usize = 64 * 1024;

/// A connection over an in-memory pipe.
pub type MemoryConnection = StreamConnection<DuplexStream>;

/// Creates two connected in-memory connections.
pub fn pair() -> (MemoryConnection, MemoryConnection) {
    let (a, b) = tokio::io::duplex(PIPE_CAPACITY);
    (StreamConnection::new(a), StreamConnection::new(b))
}

/// A [`Transport`] fed by [`MemoryConnector::connect`].
///
/// `accept` returns [`TransportError::Shutdown`] once every connector has
/// been dropped and no connection is pending.
pub struct MemoryTransport {
    incoming: mpsc::UnboundedReceiver<MemoryConnection>,
}

/// The client side of a [`MemoryTransport`].
#[derive(Clone)]
pub struct MemoryConnector {
    outgoing: mpsc::UnboundedSender<MemoryConnection>,
}

impl MemoryTransport {
    /// Creates a transport and the connector that feeds it.
    pub fn new() -> (Self, MemoryConnector) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { incoming: rx }, MemoryConnector { outgoing: tx })
    }
}

impl MemoryConnector {
    /// Opens a connection; the other end is handed to the transport.
    pub fn connect(&self) -> Result<MemoryConnection, TransportError> {
        let (client, server) = pair();
        self.outgoing
            .send(server)
            .map_err(|_| TransportError::Shutdown)?;
        Ok(client)
    }
}

impl Transport for MemoryTransport {
    type Connection = MemoryConnection;

    async fn accept(&mut self) -> Result<Self::Connection, TransportError> {
        self.incoming.recv().await.ok_or(TransportError::Shutdown)
    }
}
