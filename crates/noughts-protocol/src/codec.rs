//! Encoding and decoding of protocol frames.
//!
//! There are only two frame shapes on the wire:
//!
//! ```text
//! command:  [b0 b1 b2]          3 ASCII bytes, no terminator
//! integer:  [b0 b1 b2 b3]       i32, big-endian (network byte order)
//! ```
//!
//! A [`ServerMessage`] is a command followed by zero, one, or two
//! integers. The encoder writes the whole message as one buffer so it goes
//! out in a single `send`; the decoder reads it back frame by frame.
//!
//! Reading is done through [`WireExt`], an extension trait implemented for
//! every [`Connection`]. Any short read surfaces as a transport error and
//! is treated by callers as a disconnect. There is deliberately no
//! resynchronisation: after a bad frame the stream position is unknown.

use std::future::Future;

use noughts_transport::Connection;

use crate::types::{COMMAND_LEN, INT_LEN};
use crate::{Command, PlayerId, ProtocolError, ServerMessage};

/// Encodes an integer as it travels on the wire.
///
/// The byte order is fixed to big-endian on both ends so client and
/// server agree regardless of host architecture.
pub fn encode_int(value: i32) -> [u8; INT_LEN] {
    value.to_be_bytes()
}

/// Decodes a wire integer.
pub fn decode_int(frame: [u8; INT_LEN]) -> i32 {
    i32::from_be_bytes(frame)
}

impl ServerMessage {
    /// Serializes the message: the command token followed by its
    /// integer payload, if any.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(COMMAND_LEN + 2 * INT_LEN);
        buf.extend_from_slice(self.command().token());
        match *self {
            Self::Count(count) => buf.extend_from_slice(&encode_int(count)),
            Self::Update { player, position } => {
                buf.extend_from_slice(&encode_int(player.to_wire()));
                buf.extend_from_slice(&encode_int(position));
            }
            _ => {}
        }
        buf
    }
}

/// Frame-level reads and writes on a [`Connection`].
///
/// The server uses the `send_*` methods plus [`recv_int`](Self::recv_int)
/// (moves); the client uses the `recv_*` methods plus
/// [`send_int`](Self::send_int).
pub trait WireExt: Connection {
    /// Sends one complete server message.
    fn send_message(
        &self,
        msg: &ServerMessage,
    ) -> impl Future<Output = Result<(), ProtocolError>> + Send;

    /// Sends a bare integer (a player identity or a move).
    fn send_int(&self, value: i32) -> impl Future<Output = Result<(), ProtocolError>> + Send;

    /// Reads one integer frame.
    fn recv_int(&self) -> impl Future<Output = Result<i32, ProtocolError>> + Send;

    /// Reads one command token.
    fn recv_command(&self) -> impl Future<Output = Result<Command, ProtocolError>> + Send;

    /// Reads a command token and its payload.
    fn recv_server_message(
        &self,
    ) -> impl Future<Output = Result<ServerMessage, ProtocolError>> + Send;

    /// Reads the identity integer the server sends first after accept.
    fn recv_identity(&self) -> impl Future<Output = Result<PlayerId, ProtocolError>> + Send;
}

impl<C: Connection> WireExt for C {
    async fn send_message(&self, msg: &ServerMessage) -> Result<(), ProtocolError> {
        self.send(&msg.encode()).await?;
        Ok(())
    }

    async fn send_int(&self, value: i32) -> Result<(), ProtocolError> {
        self.send(&encode_int(value)).await?;
        Ok(())
    }

    async fn recv_int(&self) -> Result<i32, ProtocolError> {
        let bytes = self.recv_exact(INT_LEN).await?;
        let frame: [u8; INT_LEN] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| ProtocolError::InvalidMessage("integer frame has wrong length".into()))?;
        Ok(decode_int(frame))
    }

    async fn recv_command(&self) -> Result<Command, ProtocolError> {
        let token = self.recv_exact(COMMAND_LEN).await?;
        Command::from_token(&token).ok_or_else(|| {
            ProtocolError::UnknownCommand(String::from_utf8_lossy(&token).into_owned())
        })
    }

    async fn recv_server_message(&self) -> Result<ServerMessage, ProtocolError> {
        let msg = match self.recv_command().await? {
            Command::Hold => ServerMessage::Hold,
            Command::Start => ServerMessage::Start,
            Command::Turn => ServerMessage::Turn,
            Command::Invalid => ServerMessage::Invalid,
            Command::Count => ServerMessage::Count(self.recv_int().await?),
            Command::Update => {
                let raw = self.recv_int().await?;
                let player =
                    PlayerId::from_wire(raw).ok_or(ProtocolError::InvalidPlayerId(raw))?;
                let position = self.recv_int().await?;
                ServerMessage::Update { player, position }
            }
            Command::Wait => ServerMessage::Wait,
            Command::Win => ServerMessage::Win,
            Command::Lose => ServerMessage::Lose,
            Command::Draw => ServerMessage::Draw,
        };
        Ok(msg)
    }

    async fn recv_identity(&self) -> Result<PlayerId, ProtocolError> {
        let raw = self.recv_int().await?;
        PlayerId::from_wire(raw).ok_or(ProtocolError::InvalidPlayerId(raw))
    }
}

#[cfg(test)]
mod tests {
    //! Tests pin the exact bytes, because a mismatch here means an
    //! independently written client could not talk to this server.

    use super::*;
    use noughts_transport::{TransportError, pair};

    #[test]
    fn test_encode_int_is_big_endian() {
        assert_eq!(encode_int(1), [0, 0, 0, 1]);
        assert_eq!(encode_int(0x0102_0304), [1, 2, 3, 4]);
        assert_eq!(encode_int(-1), [0xff, 0xff, 0xff, 0xff]);
        assert_eq!(decode_int([0, 0, 0, 9]), 9);
    }

    #[test]
    fn test_encode_bare_command_is_three_bytes() {
        assert_eq!(ServerMessage::Turn.encode(), b"TRN");
        assert_eq!(ServerMessage::Hold.encode(), b"HLD");
    }

    #[test]
    fn test_encode_count_appends_one_int() {
        assert_eq!(ServerMessage::Count(4).encode(), b"CNT\x00\x00\x00\x04");
    }

    #[test]
    fn test_encode_update_appends_player_then_position() {
        let msg = ServerMessage::Update {
            player: PlayerId::Second,
            position: 8,
        };
        assert_eq!(msg.encode(), b"UPD\x00\x00\x00\x01\x00\x00\x00\x08");
    }

    #[tokio::test]
    async fn test_recv_server_message_reads_payloads() {
        let (server, client) = pair();
        server.send_message(&ServerMessage::Count(2)).await.unwrap();
        server
            .send_message(&ServerMessage::Update {
                player: PlayerId::First,
                position: 4,
            })
            .await
            .unwrap();
        server.send_message(&ServerMessage::Draw).await.unwrap();

        assert_eq!(
            client.recv_server_message().await.unwrap(),
            ServerMessage::Count(2)
        );
        assert_eq!(
            client.recv_server_message().await.unwrap(),
            ServerMessage::Update {
                player: PlayerId::First,
                position: 4
            }
        );
        assert_eq!(
            client.recv_server_message().await.unwrap(),
            ServerMessage::Draw
        );
    }

    #[tokio::test]
    async fn test_recv_identity() {
        let (server, client) = pair();
        server.send_int(1).await.unwrap();
        assert_eq!(client.recv_identity().await.unwrap(), PlayerId::Second);
    }

    #[tokio::test]
    async fn test_recv_identity_rejects_out_of_range() {
        let (server, client) = pair();
        server.send_int(5).await.unwrap();
        assert!(matches!(
            client.recv_identity().await,
            Err(ProtocolError::InvalidPlayerId(5))
        ));
    }

    #[tokio::test]
    async fn test_recv_command_unknown_token_is_error() {
        let (server, client) = pair();
        server.send(b"BAD").await.unwrap();
        let result = client.recv_command().await;
        assert!(
            matches!(&result, Err(ProtocolError::UnknownCommand(t)) if t == "BAD"),
            "got {result:?}"
        );
    }

    #[tokio::test]
    async fn test_recv_update_with_bad_player_is_error() {
        let (server, client) = pair();
        let mut frame = b"UPD".to_vec();
        frame.extend_from_slice(&encode_int(7));
        frame.extend_from_slice(&encode_int(0));
        server.send(&frame).await.unwrap();

        assert!(matches!(
            client.recv_server_message().await,
            Err(ProtocolError::InvalidPlayerId(7))
        ));
    }

    #[tokio::test]
    async fn test_recv_int_short_frame_is_disconnect() {
        let (server, client) = pair();
        server.send(&[0, 0, 0]).await.unwrap();
        drop(server);

        assert!(matches!(
            client.recv_int().await,
            Err(ProtocolError::Transport(TransportError::ConnectionClosed(_)))
        ));
    }

    #[tokio::test]
    async fn test_recv_count_missing_payload_is_disconnect() {
        let (server, client) = pair();
        server.send(b"CNT").await.unwrap();
        drop(server);

        assert!(matches!(
            client.recv_server_message().await,
            Err(ProtocolError::Transport(_))
        ));
    }
}
