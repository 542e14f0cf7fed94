//! Tic-tac-toe engine with pluggable agents and an exhaustive minimax search.
//!
//! [`board::Board`] holds the 3x3 grid and detects wins incrementally as
//! moves are entered. Decision making lives behind the [`agents::Agent`]
//! trait: a stdin-driven human agent, a uniform random agent, and a perfect
//! player that walks the full game tree with backtracking. [`game::play`]
//! runs two agents against each other until a win or a draw.

pub mod agents;
pub mod board;
pub mod game;
