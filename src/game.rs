/// Game driver: alternates turns between two agents until the game ends.
use tracing::warn;

use crate::agents::Agent;
use crate::board::{Board, EndState, Player};

/// Play a single game on `board`, `p1` moving first. Returns how it ended.
///
/// Every move an agent hands back goes through `enter_move` and its result is
/// checked; a rejected move leaves the board unchanged and the same agent is
/// simply asked again. With `show` set, the board is printed after each move.
pub fn play(board: &mut Board, p1: &mut dyn Agent, p2: &mut dyn Agent, show: bool) -> EndState {
    if show {
        println!("{}\n", Board::legend());
    }

    let mut to_move = Player::P1;
    loop {
        let agent: &mut dyn Agent = match to_move {
            Player::P1 => &mut *p1,
            Player::P2 => &mut *p2,
        };
        debug_assert_eq!(agent.player(), to_move);

        let idx = agent.choose_move(board);
        if let Err(err) = board.enter_move(idx, to_move) {
            warn!(%err, player = ?to_move, "move rejected, asking again");
            continue;
        }
        if show {
            println!("{} moves to square {}\n{}\n", to_move.symbol(), idx + 1, board);
        }

        if let Some(winner) = board.winner() {
            return EndState::Winner(winner);
        }
        if board.is_full() {
            return EndState::Draw;
        }
        to_move = to_move.opponent();
    }
}

#[cfg(test)]
use crate::agents::{MinimaxAgent, RandomAgent};

#[cfg(test)]
use crate::board::Player::{P1, P2};

#[cfg(test)]
use rand::{rngs::StdRng, SeedableRng};

#[test]
fn test_random_vs_random_finishes() {
    for seed in 0..10 {
        let mut p1 = RandomAgent::with_rng(P1, StdRng::seed_from_u64(seed));
        let mut p2 = RandomAgent::with_rng(P2, StdRng::seed_from_u64(seed + 100));
        let mut board = Board::new();
        let end = play(&mut board, &mut p1, &mut p2, false);
        match end {
            EndState::Winner(player) => assert_eq!(board.winner(), Some(player)),
            EndState::Draw => assert!(board.is_full()),
        }
    }
}

#[test]
fn test_minimax_vs_minimax_always_draws() {
    for seed in 0..5 {
        let mut p1 = MinimaxAgent::with_rng(P1, StdRng::seed_from_u64(seed));
        let mut p2 = MinimaxAgent::with_rng(P2, StdRng::seed_from_u64(seed + 100));
        let mut board = Board::new();
        assert_eq!(play(&mut board, &mut p1, &mut p2, false), EndState::Draw);
    }
}

#[test]
fn test_minimax_first_never_loses_to_random() {
    for seed in 0..20 {
        let mut p1 = MinimaxAgent::with_rng(P1, StdRng::seed_from_u64(seed));
        let mut p2 = RandomAgent::with_rng(P2, StdRng::seed_from_u64(seed + 100));
        let mut board = Board::new();
        let end = play(&mut board, &mut p1, &mut p2, false);
        assert_ne!(end, EndState::Winner(P2));
    }
}

#[test]
fn test_minimax_second_never_loses_to_random() {
    for seed in 0..20 {
        let mut p1 = RandomAgent::with_rng(P1, StdRng::seed_from_u64(seed));
        let mut p2 = MinimaxAgent::with_rng(P2, StdRng::seed_from_u64(seed + 100));
        let mut board = Board::new();
        let end = play(&mut board, &mut p1, &mut p2, false);
        assert_ne!(end, EndState::Winner(P1));
    }
}
