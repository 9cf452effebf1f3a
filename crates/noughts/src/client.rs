//! The client side of the protocol.
//!
//! [`GameClient`] speaks the wire protocol and keeps a local copy of the
//! board. Everything a person sees or types goes through a [`Frontend`],
//! so the same driver runs the terminal client and the tests.

use std::future::Future;
use std::io;

use noughts_game::{Board, Square};
use noughts_protocol::{Command, PlayerId, ProtocolError, ServerMessage, WireExt};
use noughts_transport::{Connection, TcpConnection};

use crate::NoughtsError;

/// How a finished game turned out for this client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Won,
    Lost,
    Draw,
}

/// Something the frontend should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// The server told us which seat we have.
    Assigned(PlayerId),
    /// We are player 0 and the server is waiting for an opponent.
    Holding,
    /// Both players are present.
    Started(PlayerId),
    /// The server wants a move from us.
    YourTurn,
    /// The server refused our last move; another is requested.
    Rejected,
    /// Reply to a player-count query.
    PlayerCount(i32),
    /// A mark was placed; the board passed alongside already shows it.
    BoardUpdated { player: PlayerId, square: Square },
    /// The opponent is moving.
    OpponentTurn,
    Finished(GameResult),
}

/// What the client needs from a user interface.
pub trait Frontend: Send {
    /// Shows an event. `board` is the client's board after the event.
    fn show(&mut self, event: &ClientEvent, board: &Board) -> io::Result<()>;

    /// Asks the user for a move value (0–8, or 9 for the player count).
    ///
    /// An error ends the game; frontends report closed input as
    /// [`io::ErrorKind::UnexpectedEof`].
    fn choose_move(&mut self, board: &Board) -> impl Future<Output = io::Result<i32>> + Send;
}

/// Drives one game from the client side.
pub struct GameClient<C> {
    conn: C,
    board: Board,
}

impl GameClient<TcpConnection> {
    /// Opens a TCP connection to a server.
    pub async fn connect(addr: &str) -> Result<Self, NoughtsError> {
        let conn = TcpConnection::connect(addr).await?;
        Ok(Self::new(conn))
    }
}

impl<C: Connection> GameClient<C> {
    pub fn new(conn: C) -> Self {
        Self {
            conn,
            board: Board::new(),
        }
    }

    /// Plays until the server announces the result.
    ///
    /// # Errors
    /// Any read or write failure, a message that is not allowed at that
    /// point, or an error from the frontend. The server sends nothing
    /// after a disconnect, so a dropped opponent also ends up here as a
    /// closed connection.
    pub async fn play<F: Frontend>(mut self, frontend: &mut F) -> Result<GameResult, NoughtsError> {
        let me = self.conn.recv_identity().await?;
        tracing::debug!(conn_id = %self.conn.id(), player = %me, "identity received");
        frontend.show(&ClientEvent::Assigned(me), &self.board)?;

        loop {
            match self.conn.recv_command().await? {
                Command::Hold => frontend.show(&ClientEvent::Holding, &self.board)?,
                Command::Start => break,
                other => {
                    return Err(ProtocolError::UnexpectedCommand {
                        expected: "SRT",
                        got: other.as_str(),
                    }
                    .into());
                }
            }
        }
        frontend.show(&ClientEvent::Started(me), &self.board)?;

        loop {
            let msg = self.conn.recv_server_message().await?;
            tracing::trace!(?msg, "server message");
            let event = match msg {
                ServerMessage::Turn => ClientEvent::YourTurn,
                ServerMessage::Invalid => ClientEvent::Rejected,
                ServerMessage::Count(n) => ClientEvent::PlayerCount(n),
                ServerMessage::Update { player, position } => {
                    let square = Square::new(position).ok_or_else(|| {
                        ProtocolError::InvalidMessage(format!("update for cell {position}"))
                    })?;
                    self.board.apply(square, player)?;
                    ClientEvent::BoardUpdated { player, square }
                }
                ServerMessage::Wait => ClientEvent::OpponentTurn,
                ServerMessage::Win => ClientEvent::Finished(GameResult::Won),
                ServerMessage::Lose => ClientEvent::Finished(GameResult::Lost),
                ServerMessage::Draw => ClientEvent::Finished(GameResult::Draw),
                ServerMessage::Hold | ServerMessage::Start => {
                    return Err(ProtocolError::UnexpectedCommand {
                        expected: "a game message",
                        got: msg.command().as_str(),
                    }
                    .into());
                }
            };

            frontend.show(&event, &self.board)?;
            match event {
                // After INV the server waits for another value without
                // sending TRN again.
                ClientEvent::YourTurn | ClientEvent::Rejected => {
                    let value = frontend.choose_move(&self.board).await?;
                    self.conn.send_int(value).await?;
                }
                ClientEvent::Finished(result) => return Ok(result),
                _ => {}
            }
        }
    }
}
