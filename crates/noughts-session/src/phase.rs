//! The session state machine.

use std::fmt;

use noughts_game::{Progress, Square};
use noughts_protocol::PlayerId;

/// Where a session is in its turn loop.
///
/// ```text
/// AwaitingStart → PlayerTurn(p) → AwaitingMove(p) ──(9, CNT)──→ PlayerTurn(p)
///                      ↑               │    ↑
///                      │       illegal ▼    │ INV
///                      │          MoveInvalid(p)
///                      │
///                      │   legal: MoveValid → BoardUpdated → CheckOutcome
///                      │                                        │
///                      └─────────── NextTurn(opponent) ←────────┤
///                                                               ├→ Winner(p)
///                                                               └→ Draw
/// ```
///
/// Any phase can move to `Aborted` when a seat disconnects. `Winner`,
/// `Draw`, and `Aborted` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Both seats are paired; `SRT` has not been sent yet.
    AwaitingStart,
    /// About to prompt this player with `TRN`.
    PlayerTurn(PlayerId),
    /// Waiting for the acting player's move value.
    AwaitingMove(PlayerId),
    /// The last value was rejected; `INV` goes out next.
    MoveInvalid(PlayerId),
    /// A legal square was chosen and will be applied.
    MoveValid { player: PlayerId, square: Square },
    /// The mark is on the board; `UPD` goes to both seats next.
    BoardUpdated {
        player: PlayerId,
        square: Square,
        progress: Progress,
    },
    /// `UPD` has been broadcast; decide whether the game is over.
    CheckOutcome(Progress),
    /// The other player moves next.
    NextTurn(PlayerId),
    Winner(PlayerId),
    Draw,
    Aborted,
}

impl Phase {
    /// Returns `true` once the session has nothing left to do.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Winner(_) | Self::Draw | Self::Aborted)
    }

    /// The player the session is currently dealing with, if any.
    pub fn acting_player(&self) -> Option<PlayerId> {
        match *self {
            Self::PlayerTurn(p)
            | Self::AwaitingMove(p)
            | Self::MoveInvalid(p)
            | Self::NextTurn(p) => Some(p),
            Self::MoveValid { player, .. } | Self::BoardUpdated { player, .. } => Some(player),
            _ => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AwaitingStart => write!(f, "AwaitingStart"),
            Self::PlayerTurn(p) => write!(f, "PlayerTurn({p})"),
            Self::AwaitingMove(p) => write!(f, "AwaitingMove({p})"),
            Self::MoveInvalid(p) => write!(f, "MoveInvalid({p})"),
            Self::MoveValid { player, square } => write!(f, "MoveValid({player}, {square})"),
            Self::BoardUpdated { player, square, .. } => {
                write!(f, "BoardUpdated({player}, {square})")
            }
            Self::CheckOutcome(_) => write!(f, "CheckOutcome"),
            Self::NextTurn(p) => write!(f, "NextTurn({p})"),
            Self::Winner(p) => write!(f, "Winner({p})"),
            Self::Draw => write!(f, "Draw"),
            Self::Aborted => write!(f, "Aborted"),
        }
    }
}
