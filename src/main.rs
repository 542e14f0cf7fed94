use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use tictactoe::agents::{Agent, HumanAgent, MinimaxAgent, RandomAgent};
use tictactoe::board::{Board, EndState, Player};
use tictactoe::game;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AgentKind {
    /// Prompt for moves on stdin.
    Human,
    /// Uniform random over the open cells.
    Random,
    /// Exhaustive minimax search; plays perfectly.
    Minimax,
}

impl AgentKind {
    fn build(self, player: Player) -> Box<dyn Agent> {
        match self {
            AgentKind::Human => Box::new(HumanAgent::new(player)),
            AgentKind::Random => Box::new(RandomAgent::new(player)),
            AgentKind::Minimax => Box::new(MinimaxAgent::new(player)),
        }
    }
}

/// Play tic-tac-toe between any mix of human, random, and minimax players.
#[derive(Debug, Parser)]
struct Args {
    /// Agent for the first player (x).
    #[arg(long, value_enum, default_value = "human")]
    first: AgentKind,
    /// Agent for the second player (o).
    #[arg(long, value_enum, default_value = "minimax")]
    second: AgentKind,
    /// Number of games to play.
    #[arg(long, default_value_t = 1)]
    games: usize,
    /// Suppress the board printout between moves.
    #[arg(long)]
    quiet: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let (mut p1_wins, mut p2_wins, mut draws) = (0, 0, 0);

    for game_num in 1..=args.games {
        if args.games > 1 {
            println!("Game {}:", game_num);
        }
        let mut p1 = args.first.build(Player::P1);
        let mut p2 = args.second.build(Player::P2);
        let mut board = Board::new();

        match game::play(&mut board, p1.as_mut(), p2.as_mut(), !args.quiet) {
            EndState::Winner(Player::P1) => {
                p1_wins += 1;
                println!("x wins!");
            }
            EndState::Winner(Player::P2) => {
                p2_wins += 1;
                println!("o wins!");
            }
            EndState::Draw => {
                draws += 1;
                println!("It's a tie!");
            }
        }
    }

    if args.games > 1 {
        println!("\nx wins: {}\no wins: {}\nTies:   {}", p1_wins, p2_wins, draws);
    }
}
