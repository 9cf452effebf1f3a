//! Pairing: turns a stream of accepted connections into pairs of seats.
//!
//! Connections are paired strictly in arrival order. The first one of a
//! pair is told it is player 0 and asked to hold; the second is told it
//! is player 1 and completes the pairing.

use noughts_protocol::{PlayerId, ServerMessage, WireExt};
use noughts_session::{PlayerRegistry, Seat, Session, SessionError};
use noughts_transport::Connection;

use crate::LobbyError;

/// Two seats ready to play.
pub struct Pairing<C> {
    pub first: Seat<C>,
    pub second: Seat<C>,
}

impl<C> std::fmt::Debug for Pairing<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pairing")
            .field("first", &self.first)
            .field("second", &self.second)
            .finish()
    }
}

impl<C: Connection> Pairing<C> {
    /// Builds the session that will referee this pairing.
    ///
    /// # Errors
    /// [`SessionError::DuplicateSeat`] if the fields were set by hand to
    /// two seats with the same identity.
    pub fn into_session(self, registry: PlayerRegistry) -> Result<Session<C>, SessionError> {
        Session::new(self.first, self.second, registry)
    }
}

/// Holds at most one connection waiting for an opponent.
///
/// The lobby is owned by the accept loop, so it needs no locking. The
/// only shared state it touches is the [`PlayerRegistry`].
pub struct Lobby<C> {
    registry: PlayerRegistry,
    waiting: Option<Seat<C>>,
}

impl<C: Connection> Lobby<C> {
    pub fn new(registry: PlayerRegistry) -> Self {
        Self {
            registry,
            waiting: None,
        }
    }

    /// Returns `true` if a player 0 is holding for an opponent.
    pub fn has_waiting_player(&self) -> bool {
        self.waiting.is_some()
    }

    /// Admits a freshly accepted connection.
    ///
    /// Counts the player, sends its identity, and either parks it as the
    /// waiting player (after sending `HLD`) or pairs it with the one
    /// already waiting.
    ///
    /// Returns `Ok(None)` when the connection is now waiting and
    /// `Ok(Some(pairing))` when a game is ready to start.
    ///
    /// # Errors
    /// [`LobbyError::Protocol`] if a write to the new connection fails.
    /// The connection and its slot in the count are released; a player
    /// who was already waiting keeps waiting.
    pub async fn admit(&mut self, conn: C) -> Result<Option<Pairing<C>>, LobbyError> {
        let ticket = self.registry.admit();
        let conn_id = conn.id();
        let player = if self.waiting.is_some() {
            PlayerId::Second
        } else {
            PlayerId::First
        };

        conn.send_int(player.to_wire()).await?;
        tracing::info!(
            %conn_id,
            %player,
            count = self.registry.count(),
            "player connected"
        );

        let seat = Seat::new(player, conn, ticket);
        match self.waiting.take() {
            Some(first) => {
                tracing::info!(
                    first = %first.conn().id(),
                    second = %conn_id,
                    "players paired"
                );
                Ok(Some(Pairing {
                    first,
                    second: seat,
                }))
            }
            None => {
                seat.conn().send_message(&ServerMessage::Hold).await?;
                tracing::debug!(%conn_id, "waiting for an opponent");
                self.waiting = Some(seat);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use noughts_transport::pair;

    use super::*;

    #[tokio::test]
    async fn test_admit_first_connection_waits() {
        let registry = PlayerRegistry::new(6);
        let mut lobby = Lobby::new(registry.clone());
        let (server, client) = pair();

        let pairing = lobby.admit(server).await.unwrap();

        assert!(pairing.is_none());
        assert!(lobby.has_waiting_player());
        assert_eq!(registry.count(), 1);
        assert_eq!(client.recv_identity().await.unwrap(), PlayerId::First);
        assert_eq!(client.recv_server_message().await.unwrap(), ServerMessage::Hold);
    }

    #[tokio::test]
    async fn test_admit_second_connection_pairs() {
        let registry = PlayerRegistry::new(6);
        let mut lobby = Lobby::new(registry.clone());
        let (s0, _c0) = pair();
        let (s1, c1) = pair();

        lobby.admit(s0).await.unwrap();
        let pairing = lobby.admit(s1).await.unwrap().expect("should pair");

        assert_eq!(pairing.first.player(), PlayerId::First);
        assert_eq!(pairing.second.player(), PlayerId::Second);
        assert!(!lobby.has_waiting_player());
        assert_eq!(registry.count(), 2);
        assert_eq!(c1.recv_identity().await.unwrap(), PlayerId::Second);
    }

    #[tokio::test]
    async fn test_dropping_pairing_releases_both_slots() {
        let registry = PlayerRegistry::new(6);
        let mut lobby = Lobby::new(registry.clone());
        let (s0, _c0) = pair();
        let (s1, _c1) = pair();

        lobby.admit(s0).await.unwrap();
        let pairing = lobby.admit(s1).await.unwrap();
        assert_eq!(registry.count(), 2);

        drop(pairing);
        assert_eq!(registry.count(), 0);
    }
}
