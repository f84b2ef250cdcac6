use anyhow::Result;
use clap::Parser;

use std::io::{stdin, stdout, Write};

use connect4_minimax::{grid::GameState, Grid, Minimax, Player};

/// Play Connect 4 against a depth-limited minimax agent
#[derive(Parser)]
#[command(name = "connect4_minimax", about = "Play Connect 4 against a minimax agent")]
struct Cli {
    /// Number of plies the agent looks ahead
    #[arg(long, default_value_t = 5)]
    depth: usize,

    /// Let the agent play the first move
    #[arg(long)]
    engine_first: bool,

    /// Starting position as 1-indexed column digits, e.g. 4453
    #[arg(long, default_value = "")]
    moves: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut grid = Grid::from_moves(&cli.moves)?;
    let engine = if cli.engine_first { Player::One } else { Player::Two };
    // rejects a zero depth before the game starts
    let agent = Minimax::new(grid, cli.depth)?.with_engine(engine);
    // from_moves always starts with player one
    let mut player = if cli.moves.len() % 2 == 0 {
        Player::One
    } else {
        Player::Two
    };

    let stdin = stdin();

    println!("Welcome to Connect 4\n");
    println!(
        "You are player {}, the AI is player {} searching {} moves ahead",
        agent.engine().other(),
        agent.engine(),
        agent.max_depth()
    );

    // game loop
    loop {
        grid.display().expect("Failed to draw board!");

        match grid.state() {
            GameState::Playing => {
                let next_move =
                    // AI player
                    if player == agent.engine() {
                        println!("AI is thinking...");
                        stdout().flush().expect("Failed to flush to stdout!");

                        let mut minimax = Minimax::new(grid, agent.max_depth())?.with_engine(agent.engine());
                        let best_move = minimax.select_move()?;

                        println!("Best move: {} ({} positions searched)", best_move + 1, minimax.node_count);
                        best_move + 1

                    // human player
                    } else {
                        print!("Move input > ");
                        stdout().flush().expect("Failed to flush to stdout!");
                        let mut input_str = String::new();
                        stdin.read_line(&mut input_str)?;

                        match input_str.trim().parse::<usize>() {
                            Err(_) => {
                                println!("Invalid number: {}", input_str);
                                continue;
                            }
                            Ok(column) => column,
                        }
                    };

                if let Err(err) = grid.play_checked(next_move, player) {
                    println!("{}", err);
                    // try the move again
                    continue;
                }
                player = player.other();
            }

            // end states
            GameState::PlayerOneWin => {
                println!("Player 1 wins!");
                break;
            }
            GameState::PlayerTwoWin => {
                println!("Player 2 wins!");
                break;
            }
            GameState::Draw => {
                println!("Draw!");
                break;
            }
        }
    }
    Ok(())
}
