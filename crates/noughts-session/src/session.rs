//! A single game between two paired connections.
//!
//! A [`Session`] owns both [`Seat`]s and the [`Game`] they play. It runs
//! as its own Tokio task: nothing else touches its board, and its only
//! link to the rest of the server is the shared [`PlayerRegistry`] it
//! reads when a player asks for the count.
//!
//! # Turn protocol
//!
//! ```text
//! both     ← SRT
//! other    ← WAT            (only when the acting player changed)
//! acting   ← TRN
//! acting   → int
//!   9       acting ← CNT n, prompt the same player again
//!   illegal acting ← INV,   read again (no new TRN)
//!   legal   both   ← UPD player square
//!           win:  acting ← WIN, other ← LSE
//!           9th move without a line: both ← DRW
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use noughts_game::{Game, Move, Progress};
use noughts_protocol::{PlayerId, ServerMessage, WireExt};
use noughts_transport::Connection;

use crate::{Phase, PlayerRegistry, PlayerTicket, SessionError};

/// Counter for generating unique session IDs.
static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies one game in the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl SessionId {
    fn next() -> Self {
        Self(NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G-{}", self.0)
    }
}

/// A paired connection: who it is, how to reach it, and the slot it
/// holds in the player count.
pub struct Seat<C> {
    player: PlayerId,
    conn: C,
    ticket: PlayerTicket,
}

impl<C: Connection> Seat<C> {
    pub fn new(player: PlayerId, conn: C, ticket: PlayerTicket) -> Self {
        Self {
            player,
            conn,
            ticket,
        }
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn conn(&self) -> &C {
        &self.conn
    }
}

impl<C> fmt::Debug for Seat<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seat")
            .field("player", &self.player)
            .field("ticket", &self.ticket)
            .finish_non_exhaustive()
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won(PlayerId),
    Draw,
    /// A seat disconnected or sent garbage before the game finished.
    Aborted,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Won(p) => write!(f, "won by {p}"),
            Self::Draw => write!(f, "draw"),
            Self::Aborted => write!(f, "aborted"),
        }
    }
}

/// One game from `SRT` to a terminal outcome.
pub struct Session<C> {
    id: SessionId,
    /// Indexed by [`PlayerId::index`].
    seats: [Seat<C>; 2],
    game: Game,
    registry: PlayerRegistry,
    /// The player who most recently received `TRN`.
    last_prompted: PlayerId,
}

impl<C: Connection> Session<C> {
    /// Creates a session for two seats, in either order.
    ///
    /// # Errors
    /// [`SessionError::DuplicateSeat`] if both seats hold the same
    /// identity. The seats are dropped, releasing their slots.
    pub fn new(a: Seat<C>, b: Seat<C>, registry: PlayerRegistry) -> Result<Self, SessionError> {
        if a.player == b.player {
            return Err(SessionError::DuplicateSeat(a.player));
        }
        let seats = if a.player == PlayerId::First {
            [a, b]
        } else {
            [b, a]
        };
        Ok(Self {
            id: SessionId::next(),
            seats,
            game: Game::new(),
            registry,
            // The second seat counts as prompted last, so it gets WAT
            // before the first seat's opening TRN.
            last_prompted: PlayerId::Second,
        })
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Plays the game to the end, closes both connections, and releases
    /// both player slots.
    pub async fn run(mut self) -> Outcome {
        let session_id = self.id;
        tracing::info!(
            %session_id,
            first = %self.seat(PlayerId::First).conn.id(),
            second = %self.seat(PlayerId::Second).conn.id(),
            "game started"
        );

        let mut phase = Phase::AwaitingStart;
        while !phase.is_terminal() {
            phase = match self.step(phase).await {
                Ok(next) => next,
                Err(e) => {
                    tracing::warn!(
                        %session_id,
                        %phase,
                        player = ?phase.acting_player(),
                        error = %e,
                        "session aborted"
                    );
                    Phase::Aborted
                }
            };
        }

        self.close().await;

        let outcome = match phase {
            Phase::Winner(p) => Outcome::Won(p),
            Phase::Draw => Outcome::Draw,
            _ => Outcome::Aborted,
        };
        tracing::info!(%session_id, %outcome, moves = self.game.moves(), "game over");
        outcome
    }

    /// Performs the I/O for one phase and returns the next.
    async fn step(&mut self, phase: Phase) -> Result<Phase, SessionError> {
        let next = match phase {
            Phase::AwaitingStart => {
                self.broadcast(ServerMessage::Start).await?;
                Phase::PlayerTurn(PlayerId::First)
            }

            Phase::PlayerTurn(player) => {
                if self.last_prompted != player {
                    self.send(player.opponent(), ServerMessage::Wait).await?;
                }
                self.send(player, ServerMessage::Turn).await?;
                self.last_prompted = player;
                Phase::AwaitingMove(player)
            }

            Phase::AwaitingMove(player) => {
                let value = self.seat(player).conn.recv_int().await?;
                tracing::debug!(session_id = %self.id, %player, value, "move received");
                match self.game.classify(value) {
                    Ok(Move::QueryPlayers) => {
                        let count = self.registry.count();
                        let count = i32::try_from(count).unwrap_or(i32::MAX);
                        self.send(player, ServerMessage::Count(count)).await?;
                        Phase::PlayerTurn(player)
                    }
                    Ok(Move::Place(square)) => Phase::MoveValid { player, square },
                    Err(reason) => {
                        tracing::debug!(session_id = %self.id, %player, %reason, "move rejected");
                        Phase::MoveInvalid(player)
                    }
                }
            }

            Phase::MoveInvalid(player) => {
                self.send(player, ServerMessage::Invalid).await?;
                Phase::AwaitingMove(player)
            }

            Phase::MoveValid { player, square } => {
                let progress = self.game.place(player, square)?;
                tracing::debug!(
                    session_id = %self.id,
                    "board after {player} took {square}:\n{}",
                    self.game.board()
                );
                Phase::BoardUpdated {
                    player,
                    square,
                    progress,
                }
            }

            Phase::BoardUpdated {
                player,
                square,
                progress,
            } => {
                let update = ServerMessage::Update {
                    player,
                    position: square.to_wire(),
                };
                self.broadcast(update).await?;
                Phase::CheckOutcome(progress)
            }

            Phase::CheckOutcome(Progress::Won(winner)) => {
                self.send(winner, ServerMessage::Win).await?;
                self.send(winner.opponent(), ServerMessage::Lose).await?;
                Phase::Winner(winner)
            }
            Phase::CheckOutcome(Progress::Drawn) => {
                self.broadcast(ServerMessage::Draw).await?;
                Phase::Draw
            }
            Phase::CheckOutcome(Progress::Continue(next)) => Phase::NextTurn(next),

            Phase::NextTurn(player) => Phase::PlayerTurn(player),

            terminal @ (Phase::Winner(_) | Phase::Draw | Phase::Aborted) => terminal,
        };
        Ok(next)
    }

    fn seat(&self, player: PlayerId) -> &Seat<C> {
        &self.seats[player.index()]
    }

    async fn send(&self, player: PlayerId, msg: ServerMessage) -> Result<(), SessionError> {
        self.seat(player).conn.send_message(&msg).await?;
        Ok(())
    }

    /// Sends `msg` to the first seat, then the second.
    async fn broadcast(&self, msg: ServerMessage) -> Result<(), SessionError> {
        for player in PlayerId::BOTH {
            self.send(player, msg).await?;
        }
        Ok(())
    }

    async fn close(&self) {
        for seat in &self.seats {
            if let Err(e) = seat.conn.close().await {
                tracing::debug!(
                    session_id = %self.id,
                    conn_id = %seat.conn.id(),
                    error = %e,
                    "close failed"
                );
            }
        }
    }
}
