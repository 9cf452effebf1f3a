//! `NoughtsServer` builder and accept loop.
//!
//! This is the entry point for running a Noughts server. It ties the
//! layers together: transport → lobby → session.

use noughts_lobby::{Lobby, LobbyConfig};
use noughts_session::PlayerRegistry;
use noughts_transport::{TcpTransport, Transport, TransportError};

use crate::NoughtsError;

/// Players per game; the accept loop waits for this much room before it
/// starts a new pairing.
const PLAYERS_PER_GAME: usize = 2;

/// Builder for configuring and starting a Noughts server.
///
/// # Example
///
/// ```rust,no_run
/// use noughts::prelude::*;
///
/// # async fn start() -> Result<(), NoughtsError> {
/// let server = NoughtsServer::builder()
///     .bind("0.0.0.0:4000")
///     .max_players(10)
///     .build()
///     .await?;
/// server.run().await
/// # }
/// ```
pub struct NoughtsServerBuilder {
    bind_addr: String,
    lobby_config: LobbyConfig,
}

impl NoughtsServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            lobby_config: LobbyConfig::default(),
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets the most players counted at once.
    pub fn max_players(mut self, max_players: usize) -> Self {
        self.lobby_config.max_players = max_players;
        self
    }

    /// Replaces the whole lobby configuration.
    pub fn lobby_config(mut self, config: LobbyConfig) -> Self {
        self.lobby_config = config;
        self
    }

    /// Binds a TCP listener and builds the server.
    pub async fn build(self) -> Result<NoughtsServer<TcpTransport>, NoughtsError> {
        let transport = TcpTransport::bind(&self.bind_addr).await?;
        Ok(self.build_with(transport))
    }

    /// Builds the server on an already constructed transport.
    pub fn build_with<T: Transport>(self, transport: T) -> NoughtsServer<T> {
        let config = self.lobby_config.validated();
        let registry = PlayerRegistry::new(config.max_players);
        NoughtsServer {
            transport,
            lobby: Lobby::new(registry.clone()),
            registry,
        }
    }
}

impl Default for NoughtsServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A Noughts game server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct NoughtsServer<T: Transport> {
    transport: T,
    lobby: Lobby<T::Connection>,
    registry: PlayerRegistry,
}

impl NoughtsServer<TcpTransport> {
    /// Creates a new builder.
    pub fn builder() -> NoughtsServerBuilder {
        NoughtsServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.local_addr()
    }
}

impl<T: Transport> NoughtsServer<T> {
    /// The shared player count, for observing the server from outside.
    pub fn registry(&self) -> &PlayerRegistry {
        &self.registry
    }

    /// Runs the accept loop.
    ///
    /// Admits connections into the lobby in arrival order and spawns a
    /// session task for every completed pairing. Before starting a new
    /// pairing it waits until two more players fit under the ceiling; a
    /// connection completing a pairing is accepted without waiting.
    ///
    /// Runs until the transport shuts down.
    pub async fn run(mut self) -> Result<(), NoughtsError> {
        tracing::info!(
            max_players = self.registry.max_players(),
            "Noughts server running"
        );

        loop {
            if !self.lobby.has_waiting_player() {
                self.registry.wait_for_capacity(PLAYERS_PER_GAME).await;
            }

            let conn = match self.transport.accept().await {
                Ok(conn) => conn,
                Err(TransportError::Shutdown) => {
                    tracing::info!("transport shut down, accept loop stopping");
                    return Ok(());
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                    continue;
                }
            };

            match self.lobby.admit(conn).await {
                Ok(Some(pairing)) => match pairing.into_session(self.registry.clone()) {
                    Ok(session) => {
                        tracing::debug!(session_id = %session.id(), "spawning session");
                        tokio::spawn(session.run());
                    }
                    Err(e) => tracing::error!(error = %e, "pairing rejected"),
                },
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "admission failed, connection dropped");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use noughts_protocol::{PlayerId, ServerMessage, WireExt};
    use noughts_transport::MemoryTransport;

    use super::*;

    #[tokio::test]
    async fn test_run_stops_when_transport_shuts_down() {
        let (transport, connector) = MemoryTransport::new();
        let server = NoughtsServerBuilder::new().build_with(transport);
        let handle = tokio::spawn(server.run());

        drop(connector);
        let result = tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("accept loop should stop")
            .unwrap();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_run_pairs_memory_connections() {
        let (transport, connector) = MemoryTransport::new();
        let server = NoughtsServerBuilder::new().build_with(transport);
        let registry = server.registry().clone();
        tokio::spawn(server.run());

        let c0 = connector.connect().unwrap();
        assert_eq!(c0.recv_identity().await.unwrap(), PlayerId::First);
        assert_eq!(c0.recv_server_message().await.unwrap(), ServerMessage::Hold);

        let c1 = connector.connect().unwrap();
        assert_eq!(c1.recv_identity().await.unwrap(), PlayerId::Second);
        assert_eq!(c0.recv_server_message().await.unwrap(), ServerMessage::Start);
        assert_eq!(c1.recv_server_message().await.unwrap(), ServerMessage::Start);
        assert_eq!(registry.count(), 2);
    }

    #[test]
    fn test_builder_takes_lobby_config() {
        let (transport, _connector) = MemoryTransport::new();
        let config = LobbyConfig { max_players: 10 };
        let server = NoughtsServerBuilder::new().lobby_config(config).build_with(transport);
        assert_eq!(server.registry().max_players(), 10);
    }

    #[test]
    fn test_builder_raises_low_ceiling() {
        let (transport, _connector) = MemoryTransport::new();
        let server = NoughtsServerBuilder::new().max_players(1).build_with(transport);
        assert_eq!(server.registry().max_players(), 2);
    }
}
