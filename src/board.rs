/// Tic-tac-toe board state: a 3x3 grid with incremental win detection.
use std::fmt;

use self::Cell::{Empty, Full};
use self::Player::{P1, P2};

/// Width of the grid; the board holds `SIZE * SIZE` cells.
pub const SIZE: usize = 3;
/// Total number of cells on the board.
pub const NUM_CELLS: usize = SIZE * SIZE;

/// Did the game end in a draw or was there a winner?
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndState {
    Winner(Player),
    Draw,
}

/// One of the two players. P1 goes first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    P1,
    P2,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            P1 => P2,
            P2 => P1,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            P1 => 'x',
            P2 => 'o',
        }
    }
}

/// A single cell of the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Full(Player),
}

/// Why a move was rejected. The board is left untouched in every case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    #[display("cell {} is already taken", _0)]
    CellTaken(usize),
    #[display("index {} is outside the board", _0)]
    OutOfRange(usize),
}

impl std::error::Error for MoveError {}

/// The 3x3 grid, indexed row-major: `index = row * SIZE + col`.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; NUM_CELLS],
    // The player whose move completed a line, recorded by enter_move rather
    // than recomputed by scanning the whole grid.
    last_winner: Option<Player>,
}

impl fmt::Debug for Board {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        let mut cells_repr = String::new();
        for cell in self.cells.iter() {
            cells_repr.push(match cell {
                Empty => '.',
                Full(p) => p.symbol(),
            });
        }
        write!(
            formatter,
            "Board {{ cells: [{}], last_winner: {:?} }}",
            cells_repr, self.last_winner
        )
    }
}

impl fmt::Display for Board {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..SIZE {
            write!(formatter, "|")?;
            for col in 0..SIZE {
                let cell = match self.cells[row * SIZE + col] {
                    Empty => ' ',
                    Full(p) => p.symbol(),
                };
                write!(formatter, " {} |", cell)?;
            }
            if row + 1 < SIZE {
                writeln!(formatter)?;
            }
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

impl Board {
    /// Return a fresh board with all cells empty.
    pub fn new() -> Board {
        Board {
            cells: [Empty; NUM_CELLS],
            last_winner: None,
        }
    }

    /// The grid of 1-indexed position numbers, for prompting human players.
    pub fn legend() -> String {
        let mut out = String::new();
        for row in 0..SIZE {
            out.push('|');
            for col in 0..SIZE {
                out.push_str(&format!(" {} |", row * SIZE + col + 1));
            }
            if row + 1 < SIZE {
                out.push('\n');
            }
        }
        out
    }

    pub fn cell(&self, idx: usize) -> Cell {
        self.cells[idx]
    }

    /// The player whose move most recently completed a line, if any.
    pub fn winner(&self) -> Option<Player> {
        self.last_winner
    }

    /// All empty cell indices, in ascending order. The stable ordering gives
    /// agents deterministic behavior when scores tie.
    pub fn available_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Empty)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell == Empty).count()
    }

    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }

    /// Place `player`'s mark at `idx`. On success this also runs the win
    /// check for the lines through `idx` and records the winner, if any.
    /// A rejected move leaves the board exactly as it was.
    pub fn enter_move(&mut self, idx: usize, player: Player) -> Result<(), MoveError> {
        if idx >= NUM_CELLS {
            return Err(MoveError::OutOfRange(idx));
        }
        match self.cells[idx] {
            Empty => self.cells[idx] = Full(player),
            _ => return Err(MoveError::CellTaken(idx)),
        }
        if self.move_wins_game(idx, player) {
            self.last_winner = Some(player);
        }
        Ok(())
    }

    /// Backtracking support for search agents: clear the cell at `idx` and
    /// forget any recorded winner. The winner flag is dropped unconditionally
    /// rather than restored to its prior value; search never recurses past a
    /// won position, so the stale flag is never observed. Callers should only
    /// undo a cell they just entered.
    pub fn undo_move(&mut self, idx: usize) {
        self.cells[idx] = Empty;
        self.last_winner = None;
    }

    /// Did the move just played at `idx` by `player` complete a line? Only
    /// the lines through `idx` are checked: its row, its column, and both
    /// diagonals when `idx` is a corner or the center (even index).
    fn move_wins_game(&self, idx: usize, player: Player) -> bool {
        let row = idx / SIZE;
        let col = idx % SIZE;

        if (0..SIZE).all(|c| self.cells[row * SIZE + c] == Full(player)) {
            return true;
        }
        if (0..SIZE).all(|r| self.cells[r * SIZE + col] == Full(player)) {
            return true;
        }
        if idx % 2 == 0 {
            // check \ diag
            if (0..SIZE).all(|i| self.cells[i * SIZE + i] == Full(player)) {
                return true;
            }
            // check / diag
            if (0..SIZE).all(|i| self.cells[i * SIZE + (SIZE - 1 - i)] == Full(player)) {
                return true;
            }
        }
        false
    }
}

#[test]
fn test_enter_move_completes_each_line() {
    // rows
    for row in 0..SIZE {
        let mut board = Board::new();
        for col in 0..SIZE {
            assert_eq!(board.winner(), None);
            assert!(board.enter_move(row * SIZE + col, P1).is_ok());
        }
        assert_eq!(board.winner(), Some(P1));
    }

    // cols
    for col in 0..SIZE {
        let mut board = Board::new();
        for row in 0..SIZE {
            assert_eq!(board.winner(), None);
            assert!(board.enter_move(row * SIZE + col, P2).is_ok());
        }
        assert_eq!(board.winner(), Some(P2));
    }

    // diag \
    let mut board = Board::new();
    for idx in [0, 4, 8] {
        assert_eq!(board.winner(), None);
        assert!(board.enter_move(idx, P1).is_ok());
    }
    assert_eq!(board.winner(), Some(P1));

    // diag /
    let mut board = Board::new();
    for idx in [2, 4, 6] {
        assert_eq!(board.winner(), None);
        assert!(board.enter_move(idx, P1).is_ok());
    }
    assert_eq!(board.winner(), Some(P1));
}

#[test]
fn test_enter_move_rejects_taken_cell() {
    let mut board = Board::new();
    assert!(board.enter_move(4, P1).is_ok());

    let before = board.clone();
    assert_eq!(board.enter_move(4, P2), Err(MoveError::CellTaken(4)));
    assert_eq!(board, before);
}

#[test]
fn test_enter_move_rejects_out_of_range() {
    let mut board = Board::new();
    let before = board.clone();
    assert_eq!(
        board.enter_move(NUM_CELLS, P1),
        Err(MoveError::OutOfRange(NUM_CELLS))
    );
    assert_eq!(board, before);
}

#[test]
fn test_enter_then_undo_restores_board() {
    let mut board = Board::new();
    assert!(board.enter_move(0, P1).is_ok());
    assert!(board.enter_move(4, P2).is_ok());

    let before = board.clone();
    assert!(board.enter_move(8, P1).is_ok());
    board.undo_move(8);
    assert_eq!(board, before);

    // same round trip when the move being undone completed a line
    let mut board = Board::new();
    assert!(board.enter_move(0, P1).is_ok());
    assert!(board.enter_move(1, P1).is_ok());
    let before = board.clone();
    assert!(board.enter_move(2, P1).is_ok());
    assert_eq!(board.winner(), Some(P1));
    board.undo_move(2);
    assert_eq!(board, before);
    assert_eq!(board.winner(), None);
}

#[test]
fn test_available_moves_after_center() {
    let mut board = Board::new();
    assert_eq!(board.available_moves(), vec![0, 1, 2, 3, 4, 5, 6, 7, 8]);

    assert!(board.enter_move(4, P1).is_ok());
    assert_eq!(board.cell(4), Full(P1));
    assert_eq!(board.available_moves(), vec![0, 1, 2, 3, 5, 6, 7, 8]);
    assert_eq!(board.winner(), None);
}

#[test]
fn test_row_completion_sets_winner() {
    // | x | x |   |
    // | o | o |   |
    // |   |   |   |
    let mut board = Board::new();
    assert!(board.enter_move(0, P1).is_ok());
    assert!(board.enter_move(3, P2).is_ok());
    assert!(board.enter_move(1, P1).is_ok());
    assert!(board.enter_move(4, P2).is_ok());
    assert_eq!(board.winner(), None);

    assert!(board.enter_move(2, P1).is_ok());
    assert_eq!(board.winner(), Some(P1));
}

#[test]
fn test_empty_count_and_is_full() {
    let mut board = Board::new();
    assert_eq!(board.empty_count(), NUM_CELLS);
    assert!(!board.is_full());

    // fill in a draw pattern
    for (idx, player) in [
        (0, P1),
        (1, P2),
        (2, P1),
        (3, P2),
        (4, P1),
        (5, P1),
        (6, P2),
        (7, P1),
        (8, P2),
    ] {
        assert!(board.enter_move(idx, player).is_ok());
    }
    assert_eq!(board.empty_count(), 0);
    assert!(board.is_full());
    assert_eq!(board.winner(), None);
}
