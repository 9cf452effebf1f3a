//! Stream-backed connections and the TCP transport.

use std::io::ErrorKind;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, ReadHalf, WriteHalf};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;

use crate::{Connection, ConnectionId, Transport, TransportError};

/// Counter for generating unique connection IDs.
static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

pub(crate) fn next_connection_id() -> ConnectionId {
    ConnectionId::new(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed))
}

/// A TCP-based [`Transport`] that listens for incoming connections.
pub struct TcpTransport {
    listener: TcpListener,
}

impl TcpTransport {
    /// Binds a new TCP transport to the given address.
    pub async fn bind(addr: &str) -> Result<Self, TransportError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(TransportError::AcceptFailed)?;
        tracing::info!(addr, "TCP transport listening");
        Ok(Self { listener })
    }

    /// Returns the address the listener is bound to.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

impl Transport for TcpTransport {
    type Connection = TcpConnection;

    async fn accept(&mut self) -> Result<Self::Connection, TransportError> {
        let (stream, addr) = self
            .listener
            .accept()
            .await
            .map_err(TransportError::AcceptFailed)?;

        let conn = StreamConnection::new(stream);
        tracing::debug!(id = %conn.id(), %addr, "accepted TCP connection");
        Ok(conn)
    }
}

/// A [`Connection`] over any async byte stream.
///
/// The stream is split so reads and writes never wait on each other.
pub struct StreamConnection<S> {
    id: ConnectionId,
    reader: Mutex<ReadHalf<S>>,
    writer: Mutex<WriteHalf<S>>,
}

impl<S> std::fmt::Debug for StreamConnection<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamConnection").field("id", &self.id).finish_non_exhaustive()
    }
}

/// A connection over a TCP socket.
pub type TcpConnection = StreamConnection<TcpStream>;

impl<S> StreamConnection<S>
where
    S: AsyncRead + AsyncWrite + Send + 'static,
{
    /// Wraps a stream, assigning it a fresh [`ConnectionId`].
    pub fn new(stream: S) -> Self {
        let (reader, writer) = tokio::io::split(stream);
        Self {
            id: next_connection_id(),
            reader: Mutex::new(reader),
            writer: Mutex::new(writer),
        }
    }
}

impl StreamConnection<TcpStream> {
    /// Opens a TCP connection to a server.
    pub async fn connect(addr: &str) -> Result<Self, TransportError> {
        let stream = TcpStream::connect(addr)
            .await
            .map_err(TransportError::ConnectFailed)?;
        // Frames are tiny and latency matters more than packet count.
        stream.set_nodelay(true).map_err(TransportError::ConnectFailed)?;
        let conn = Self::new(stream);
        tracing::debug!(id = %conn.id(), addr, "connected");
        Ok(conn)
    }
}

impl<S> Connection for StreamConnection<S>
where
    S: AsyncRead + AsyncWrite + Send + 'static,
{
    async fn send(&self, data: &[u8]) -> Result<(), TransportError> {
        let mut writer = self.writer.lock().await;
        writer
            .write_all(data)
            .await
            .map_err(TransportError::SendFailed)?;
        writer.flush().await.map_err(TransportError::SendFailed)
    }

    async fn recv_exact(&self, len: usize) -> Result<Vec<u8>, TransportError> {
        let mut buf = vec![0; len];
        let mut reader = self.reader.lock().await;
        match reader.read_exact(&mut buf).await {
            Ok(_) => Ok(buf),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                Err(TransportError::ConnectionClosed(format!(
                    "{} ended before a {len}-byte frame",
                    self.id
                )))
            }
            Err(e) => Err(TransportError::ReceiveFailed(e)),
        }
    }

    async fn close(&self) -> Result<(), TransportError> {
        self.writer
            .lock()
            .await
            .shutdown()
            .await
            .map_err(TransportError::SendFailed)
    }

    fn id(&self) -> ConnectionId {
        self.id
    }
}
