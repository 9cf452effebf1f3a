//! The referee: one board plus whose turn it is and how many moves were
//! made.
//!
//! `Game` is pure state with no I/O, so the session can ask it questions
//! ("what did this value mean?", "did that move end the game?") and
//! tests can replay whole games without any connections.

use noughts_protocol::{PlayerId, QUERY_PLAYER_COUNT};

use crate::{Board, GameError, Square};

/// Number of valid moves after which a game without a winner is drawn.
pub const MAX_MOVES: u8 = 9;

/// What a value received from the acting player asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Place a mark on an empty square.
    Place(Square),
    /// Report the active player count; changes nothing.
    QueryPlayers,
}

/// State of the game after a mark has been placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// The mover completed a line.
    Won(PlayerId),
    /// Nine moves and no line.
    Drawn,
    /// Play continues with the given player.
    Continue(PlayerId),
}

/// A single game between two seats.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    to_move: PlayerId,
    moves: u8,
    finished: bool,
}

impl Game {
    /// A fresh game; the first seat moves first.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            to_move: PlayerId::First,
            moves: 0,
            finished: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The player whose turn it is.
    pub fn to_move(&self) -> PlayerId {
        self.to_move
    }

    /// Count of valid moves applied so far.
    pub fn moves(&self) -> u8 {
        self.moves
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Interprets a raw value sent by the acting player.
    ///
    /// # Errors
    /// - [`GameError::OutOfRange`] for values other than 0–9
    /// - [`GameError::CellOccupied`] for a square that already has a mark
    pub fn classify(&self, value: i32) -> Result<Move, GameError> {
        if value == QUERY_PLAYER_COUNT {
            return Ok(Move::QueryPlayers);
        }
        let square = Square::new(value).ok_or(GameError::OutOfRange(value))?;
        if !self.board.is_legal(value) {
            return Err(GameError::CellOccupied(square));
        }
        Ok(Move::Place(square))
    }

    /// Applies a move for `player` and reports how the game stands.
    ///
    /// Nothing changes if an error is returned.
    pub fn place(&mut self, player: PlayerId, square: Square) -> Result<Progress, GameError> {
        if self.finished {
            return Err(GameError::GameOver);
        }
        if player != self.to_move {
            return Err(GameError::NotYourTurn(player));
        }
        self.board.apply(square, player)?;
        self.moves += 1;

        let progress = if self.board.check_win(square) {
            Progress::Won(player)
        } else if self.moves == MAX_MOVES {
            Progress::Drawn
        } else {
            self.to_move = player.opponent();
            Progress::Continue(self.to_move)
        };

        if !matches!(progress, Progress::Continue(_)) {
            self.finished = true;
        }
        tracing::trace!(%player, %square, moves = self.moves, ?progress, "move applied");
        Ok(progress)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
