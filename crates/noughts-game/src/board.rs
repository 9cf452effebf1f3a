//! The 3×3 board and its move rules.

use std::fmt;

use noughts_protocol::{PlayerId, QUERY_PLAYER_COUNT};

use crate::GameError;

/// State of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    O,
    X,
}

impl Cell {
    /// The mark a player places.
    pub fn of(player: PlayerId) -> Self {
        match player {
            PlayerId::First => Self::O,
            PlayerId::Second => Self::X,
        }
    }

    /// Character used when drawing the board.
    pub fn symbol(self) -> char {
        match self {
            Self::Empty => ' ',
            Self::O => 'O',
            Self::X => 'X',
        }
    }
}

/// A cell index known to be in `0..=8`.
///
/// Cells are numbered row by row: `row = index / 3`, `col = index % 3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// All nine squares in index order.
    pub const ALL: [Square; 9] = [
        Square(0),
        Square(1),
        Square(2),
        Square(3),
        Square(4),
        Square(5),
        Square(6),
        Square(7),
        Square(8),
    ];

    /// Validates a raw index.
    pub fn new(index: i32) -> Option<Self> {
        u8::try_from(index).ok().filter(|i| *i < 9).map(Self)
    }

    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    pub fn row(self) -> usize {
        self.index() / 3
    }

    pub fn col(self) -> usize {
        self.index() % 3
    }

    /// The integer sent on the wire for this square.
    pub fn to_wire(self) -> i32 {
        i32::from(self.0)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A 3×3 grid of [`Cell`]s.
///
/// Cells only ever go from `Empty` to a mark; nothing clears them. The
/// number of non-empty cells therefore always equals the number of moves
/// applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, square: Square) -> Cell {
        self.cells[square.index()]
    }

    /// Returns `true` if `value` may be submitted as a move.
    ///
    /// The player-count query (9) is always legal. Otherwise the value
    /// must name an empty cell.
    pub fn is_legal(&self, value: i32) -> bool {
        value == QUERY_PLAYER_COUNT
            || Square::new(value).is_some_and(|square| self.get(square) == Cell::Empty)
    }

    /// Places `player`'s mark on `square`.
    ///
    /// # Errors
    /// [`GameError::CellOccupied`] if the cell already holds a mark; the
    /// board is left unchanged.
    pub fn apply(&mut self, square: Square, player: PlayerId) -> Result<(), GameError> {
        let cell = &mut self.cells[square.index()];
        if *cell != Cell::Empty {
            return Err(GameError::CellOccupied(square));
        }
        *cell = Cell::of(player);
        Ok(())
    }

    /// Returns `true` if the move on `last` completed a line.
    ///
    /// Only lines through `last` are examined: its row, its column, and,
    /// when `last` is an even index, the diagonal(s) it lies on. Odd
    /// indices sit on no diagonal, and every diagonal passes through the
    /// centre (4), so this covers every line the last move could finish.
    pub fn check_win(&self, last: Square) -> bool {
        let row = last.row() * 3;
        let col = last.col();

        if self.uniform([row, row + 1, row + 2]) || self.uniform([col, col + 3, col + 6]) {
            return true;
        }

        let index = last.index();
        if index % 2 == 0 {
            if matches!(index, 0 | 4 | 8) && self.uniform([0, 4, 8]) {
                return true;
            }
            if matches!(index, 2 | 4 | 6) && self.uniform([2, 4, 6]) {
                return true;
            }
        }

        false
    }

    /// Number of cells holding a mark.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| **c != Cell::Empty).count()
    }

    pub fn is_full(&self) -> bool {
        self.occupied() == self.cells.len()
    }

    fn uniform(&self, line: [usize; 3]) -> bool {
        let first = self.cells[line[0]];
        first != Cell::Empty && line.iter().all(|i| self.cells[*i] == first)
    }
}

/// Renders the board the way both the server log and the terminal
/// client show it:
///
/// ```text
///  O | X |
/// -----------
///    | O |
/// -----------
///    |   | X
/// ```
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.cells.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f, "-----------")?;
            }
            writeln!(
                f,
                " {} | {} | {} ",
                cells[0].symbol(),
                cells[1].symbol(),
                cells[2].symbol()
            )?;
        }
        Ok(())
    }
}
