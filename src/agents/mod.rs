/// Agents for the tic-tac-toe engine.
mod minimax_agent;
pub use minimax_agent::MinimaxAgent;

use std::io;

use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};

use crate::board::{Board, Player, NUM_CELLS};

const BAD_INPUT: &str = "bad input";

/// An agent that will choose a legal move given the state of the board.
/// Agents are only asked for a move while at least one cell is empty. Self is
/// mutable because agents may carry state, such as a random number generator.
pub trait Agent {
    fn choose_move(&mut self, board: &Board) -> usize;

    /// The mark this agent plays.
    fn player(&self) -> Player;
}

/*
 * -----------
 * Human Agent
 * -----------
 */

/// An agent controlled by the user running the program. Prompts for a
/// 1-indexed position and translates it to the board's 0-indexed convention.
pub struct HumanAgent {
    player: Player,
}

impl HumanAgent {
    pub fn new(player: Player) -> HumanAgent {
        HumanAgent { player }
    }

    /// Accept input from stdin and parse it into a 0-indexed cell index.
    fn get_user_input(&self) -> Result<usize, &'static str> {
        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            return Err(BAD_INPUT);
        }
        let position: usize = input.trim().parse().map_err(|_| BAD_INPUT)?;
        if !(1..=NUM_CELLS).contains(&position) {
            return Err(BAD_INPUT);
        }
        Ok(position - 1)
    }
}

impl Agent for HumanAgent {
    /// Keep prompting until the user names a cell that is actually open.
    fn choose_move(&mut self, board: &Board) -> usize {
        loop {
            println!(
                "{}'s turn. Enter a move (1-{}):",
                self.player.symbol(),
                NUM_CELLS
            );
            match self.get_user_input() {
                Ok(idx) if board.available_moves().contains(&idx) => return idx,
                Ok(_) | Err(_) => println!("Invalid square. Try again."),
            }
        }
    }

    fn player(&self) -> Player {
        self.player
    }
}

/*
 * ------------
 * Random Agent
 * ------------
 */

/// Agent that picks uniformly at random among the open cells. Stateless
/// between calls apart from its rng.
#[derive(Clone, Debug)]
pub struct RandomAgent<R = ThreadRng> {
    player: Player,
    rng: R,
}

impl RandomAgent<ThreadRng> {
    pub fn new(player: Player) -> RandomAgent<ThreadRng> {
        RandomAgent {
            player,
            rng: thread_rng(),
        }
    }
}

impl<R: Rng> RandomAgent<R> {
    /// Same agent with a caller-supplied rng, for reproducible games.
    pub fn with_rng(player: Player, rng: R) -> RandomAgent<R> {
        RandomAgent { player, rng }
    }
}

impl<R: Rng> Agent for RandomAgent<R> {
    fn choose_move(&mut self, board: &Board) -> usize {
        let moves = board.available_moves();
        *moves
            .choose(&mut self.rng)
            .expect("asked for a move on a full board")
    }

    fn player(&self) -> Player {
        self.player
    }
}

#[cfg(test)]
use rand::{rngs::StdRng, SeedableRng};

#[test]
fn test_random_agent_picks_open_cells() {
    let mut board = Board::new();
    assert!(board.enter_move(0, Player::P1).is_ok());
    assert!(board.enter_move(4, Player::P2).is_ok());

    let mut agent = RandomAgent::with_rng(Player::P1, StdRng::seed_from_u64(7));
    for _ in 0..50 {
        let idx = agent.choose_move(&board);
        assert!(board.available_moves().contains(&idx));
    }
}

#[test]
fn test_random_agent_reaches_every_open_cell() {
    let mut board = Board::new();
    assert!(board.enter_move(4, Player::P1).is_ok());

    let mut agent = RandomAgent::with_rng(Player::P2, StdRng::seed_from_u64(42));
    let mut seen = std::collections::HashSet::new();
    for _ in 0..200 {
        seen.insert(agent.choose_move(&board));
    }
    assert_eq!(seen.len(), board.available_moves().len());
}
