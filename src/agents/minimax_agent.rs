/// Exhaustive minimax search agent.
use std::time::Instant;

use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};
use tracing::debug;

use crate::agents::Agent;
use crate::board::{Board, Player, NUM_CELLS};

// Opening reply on an empty board: any corner or the center. All five are
// minimax-optimal first moves, so picking one at random skips the most
// expensive full-depth search without changing the agent's strength.
const OPENING_MOVES: [usize; 5] = [0, 2, 4, 6, 8];

/// Agent that plays perfectly by searching the entire game tree. No pruning
/// and no caching: the 3x3 tree tops out around 9! leaf states, small enough
/// to walk whole.
#[derive(Clone, Debug)]
pub struct MinimaxAgent<R = ThreadRng> {
    player: Player,
    rng: R,
}

impl MinimaxAgent<ThreadRng> {
    pub fn new(player: Player) -> MinimaxAgent<ThreadRng> {
        MinimaxAgent {
            player,
            rng: thread_rng(),
        }
    }
}

impl<R: Rng> MinimaxAgent<R> {
    /// Same agent with a caller-supplied rng, for reproducible games.
    pub fn with_rng(player: Player, rng: R) -> MinimaxAgent<R> {
        MinimaxAgent { player, rng }
    }

    /// Full-depth minimax over the open cells, maximizing for this agent's
    /// own mark. Returns the best index for `to_move` together with its
    /// score; the index is None only at a terminal position.
    ///
    /// Terminal scores are scaled by the number of open cells plus one, so a
    /// nearer win outranks a farther win and a farther loss outranks a nearer
    /// loss. A draw scores zero.
    ///
    /// The board is mutated in place while the tree is walked, each entered
    /// move undone on the way back up, and comes back in the state it went
    /// in (there is no early exit between an enter and its undo).
    pub fn minimax(&self, board: &mut Board, to_move: Player) -> (Option<usize>, isize) {
        let rival = to_move.opponent();

        // The move that produced this position was the rival's; if it won,
        // score the position and stop.
        if board.winner() == Some(rival) {
            let score = board.empty_count() as isize + 1;
            return (None, if rival == self.player { score } else { -score });
        }
        if board.is_full() {
            return (None, 0);
        }

        let maximizing = to_move == self.player;
        let mut best_idx = None;
        let mut best_score = if maximizing { isize::MIN } else { isize::MAX };

        for idx in board.available_moves() {
            board
                .enter_move(idx, to_move)
                .expect("entering a move on an open cell");
            let (_, score) = self.minimax(board, rival);
            board.undo_move(idx);

            // Strict comparisons: on a tie the earliest (lowest) index wins.
            if (maximizing && score > best_score) || (!maximizing && score < best_score) {
                best_score = score;
                best_idx = Some(idx);
            }
        }

        (best_idx, best_score)
    }
}

impl<R: Rng> Agent for MinimaxAgent<R> {
    fn choose_move(&mut self, board: &Board) -> usize {
        if board.available_moves().len() == NUM_CELLS {
            return *OPENING_MOVES
                .choose(&mut self.rng)
                .expect("opening move table is non-empty");
        }

        let now = Instant::now();
        // Search mutates a scratch copy so the caller's board comes back
        // untouched no matter how the search exits.
        let mut scratch = board.clone();
        let (best_idx, score) = self.minimax(&mut scratch, self.player);
        let idx = best_idx.expect("search always finds a move while cells remain open");
        debug!(
            player = ?self.player,
            idx,
            score,
            elapsed = ?now.elapsed(),
            "minimax chose a move"
        );
        idx
    }

    fn player(&self) -> Player {
        self.player
    }
}

#[cfg(test)]
use rand::{rngs::StdRng, SeedableRng};

#[cfg(test)]
use crate::board::Player::{P1, P2};

#[cfg(test)]
fn board_from(p1_cells: &[usize], p2_cells: &[usize]) -> Board {
    let mut board = Board::new();
    for &idx in p1_cells {
        board.enter_move(idx, P1).unwrap();
    }
    for &idx in p2_cells {
        board.enter_move(idx, P2).unwrap();
    }
    board
}

#[test]
fn test_opening_move_is_corner_or_center() {
    let board = Board::new();
    for seed in 0..20 {
        let mut agent = MinimaxAgent::with_rng(P1, StdRng::seed_from_u64(seed));
        let idx = agent.choose_move(&board);
        assert!(OPENING_MOVES.contains(&idx));
    }
}

#[test]
fn test_blocks_immediate_threat() {
    // | x | x |   |
    // |   | o |   |
    // |   |   |   |   o to move: anything but 2 loses
    let board = board_from(&[0, 1], &[4]);
    let mut agent = MinimaxAgent::with_rng(P2, StdRng::seed_from_u64(0));
    assert_eq!(agent.choose_move(&board), 2);
}

#[test]
fn test_takes_win_over_block() {
    // | x | x |   |
    // | o | o |   |
    // |   |   |   |   x to move: winning at 2 beats blocking at 5
    let board = board_from(&[0, 1], &[3, 4]);
    let mut agent = MinimaxAgent::with_rng(P1, StdRng::seed_from_u64(0));
    assert_eq!(agent.choose_move(&board), 2);
}

#[test]
fn test_equal_wins_break_toward_lowest_index() {
    // | x | x |   |
    // | o | x | o |
    // |   |   |   |   x to move: 2, 7, and 8 all win immediately
    let board = board_from(&[0, 1, 4], &[3, 5]);
    let mut agent = MinimaxAgent::with_rng(P1, StdRng::seed_from_u64(0));
    assert_eq!(agent.choose_move(&board), 2);
}

#[test]
fn test_minimax_reports_win_score() {
    // x to move wins at 2 with 4 cells left after the move: score 5
    let board = board_from(&[0, 1], &[3, 4]);
    let agent = MinimaxAgent::with_rng(P1, StdRng::seed_from_u64(0));
    let (idx, score) = agent.minimax(&mut board.clone(), P1);
    assert_eq!(idx, Some(2));
    assert_eq!(score, 5);
}

#[test]
fn test_choose_move_returns_open_cell() {
    // | x |   |   |
    // |   | o |   |
    // |   |   |   |
    let board = board_from(&[0], &[4]);
    let before = board.clone();
    let mut agent = MinimaxAgent::with_rng(P1, StdRng::seed_from_u64(0));
    let idx = agent.choose_move(&board);
    assert!(board.available_moves().contains(&idx));
    // the caller's board is untouched by the search
    assert_eq!(board, before);
}

#[test]
fn test_search_leaves_scratch_board_restored() {
    let mut board = board_from(&[0], &[4]);
    let before = board.clone();
    let agent = MinimaxAgent::with_rng(P1, StdRng::seed_from_u64(0));
    let _ = agent.minimax(&mut board, P1);
    assert_eq!(board, before);
}
