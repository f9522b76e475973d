//! Omok-Rust: A layered heuristic Gomoku engine.
//!
//! ## Usage
//!
//! - `omok-rust` - Show a demo game
//! - `omok-rust demo` - Watch two engine tiers play each other
//! - `omok-rust play` - Play against the engine on the terminal

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use omok_rust::board::{Board, Player, parse_coord, str_coord};
use omok_rust::engine::{Difficulty, Engine, GameStatus, TurnOutcome, move_completed};

/// Omok-Rust: A layered heuristic Gomoku engine
#[derive(Parser)]
#[command(name = "omok-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch two engine tiers play a full game against each other
    Demo {
        /// Board size (minimum 5)
        #[arg(long, default_value_t = 13)]
        size: usize,
        /// RNG seed for a reproducible game
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Play against the engine on the terminal
    Play {
        /// Difficulty tier (easy, medium, hard, expert, master,
        /// ultra-master); unknown names fall back to medium
        #[arg(long, default_value = "ultra-master")]
        difficulty: String,
        /// Board size (minimum 5)
        #[arg(long, default_value_t = 13)]
        size: usize,
        /// RNG seed for a reproducible opponent
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play {
            difficulty,
            size,
            seed,
        }) => {
            // Parsing never fails; unknown tiers become Medium.
            let Ok(tier) = difficulty.parse::<Difficulty>();
            run_play(tier, size, seed)
        }
        Some(Commands::Demo { size, seed }) => run_demo(size, seed),
        None => run_demo(13, None),
    }
}

fn run_demo(size: usize, seed: Option<u64>) -> Result<()> {
    println!("Omok-Rust: Layered Heuristic Gomoku Engine\n");
    println!(
        "=== Demo: master (Black) vs ultra-master (White) on {size}x{size} ===",
    );

    let mut board = Board::new(size);
    let mut black = match seed {
        Some(s) => Engine::with_seed(Player::Black, s),
        None => Engine::new(Player::Black),
    };
    let mut white = match seed {
        Some(s) => Engine::with_seed(Player::White, s.wrapping_add(1)),
        None => Engine::new(Player::White),
    };

    loop {
        for (engine, tier) in [
            (&mut black, Difficulty::Master),
            (&mut white, Difficulty::UltraMaster),
        ] {
            match engine.computer_move(&mut board, tier) {
                TurnOutcome::Placed { pos, status } => {
                    println!("{} plays {}", engine.player(), str_coord(&board, pos));
                    match status {
                        GameStatus::Continue => {}
                        GameStatus::Win { winner, line } => {
                            println!("{board}");
                            let cells: Vec<String> =
                                line.iter().map(|&p| str_coord(&board, p)).collect();
                            println!("{winner} wins: {}", cells.join(" "));
                            return Ok(());
                        }
                        GameStatus::Draw => {
                            println!("{board}");
                            println!("Draw: board is full");
                            return Ok(());
                        }
                    }
                }
                TurnOutcome::Draw => {
                    println!("{board}");
                    println!("Draw: board is full");
                    return Ok(());
                }
            }
        }
    }
}

fn run_play(tier: Difficulty, size: usize, seed: Option<u64>) -> Result<()> {
    let mut board = Board::new(size);
    let mut engine = match seed {
        Some(s) => Engine::with_seed(Player::White, s),
        None => Engine::new(Player::White),
    };

    println!("Omok-Rust ({tier}). You play Black; enter coordinates like H7.");
    println!("Type 'quit' to leave.\n");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        println!("{board}");
        print!("your move> ");
        io::stdout().flush().context("failed to flush stdout")?;

        let Some(line) = lines.next() else {
            println!();
            return Ok(());
        };
        let input = line.context("failed to read from stdin")?;
        let input = input.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit") {
            return Ok(());
        }

        let Some(pos) = parse_coord(&board, input) else {
            println!("cannot read '{input}' as a coordinate");
            continue;
        };
        if board.place(pos, Player::Black).is_err() {
            println!("{} is taken", str_coord(&board, pos));
            continue;
        }
        if report_status(&board, pos) {
            return Ok(());
        }

        match engine.computer_move(&mut board, tier) {
            TurnOutcome::Placed { pos, status } => {
                println!("computer plays {}", str_coord(&board, pos));
                if report(&board, status) {
                    return Ok(());
                }
            }
            TurnOutcome::Draw => {
                println!("{board}");
                println!("Draw: board is full");
                return Ok(());
            }
        }
    }
}

/// Prints the outcome of the stone just placed; true when the game ended.
fn report_status(board: &Board, pos: (usize, usize)) -> bool {
    report(board, move_completed(board, pos))
}

fn report(board: &Board, status: GameStatus) -> bool {
    match status {
        GameStatus::Continue => false,
        GameStatus::Win { winner, line } => {
            println!("{board}");
            let cells: Vec<String> = line.iter().map(|&p| str_coord(board, p)).collect();
            println!("{winner} wins: {}", cells.join(" "));
            true
        }
        GameStatus::Draw => {
            println!("{board}");
            println!("Draw: board is full");
            true
        }
    }
}
