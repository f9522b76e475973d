//! Omok-Rust: A layered heuristic Gomoku engine.
//!
//! This crate provides a five-in-a-row (Gomoku / omok) move-selection
//! engine. Instead of tree search it plays through an ordered cascade of
//! pattern tactics, with six difficulty tiers from pure random up to a
//! deep tactical pipeline.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions, directions and scoring weights
//! - [`board`] - Board state, placement and coordinate handling
//! - [`scan`] - Directional run counting primitives
//! - [`win`] - Five-in-a-row detection
//! - [`tactics`] - Pattern detectors (fours, open threes, double threats)
//! - [`strategy`] - Positional scoring fallbacks
//! - [`engine`] - Difficulty tiers and the move-selection cascade
//!
//! ## Example
//!
//! ```
//! use omok_rust::board::{Board, Player};
//! use omok_rust::engine::{Difficulty, Engine, TurnOutcome};
//!
//! // Start a game on the default 13x13 board
//! let mut board = Board::default();
//! board.place((6, 6), Player::Black).unwrap();
//!
//! // Ask the computer for its answer
//! let mut engine = Engine::with_seed(Player::White, 42);
//! match engine.computer_move(&mut board, Difficulty::UltraMaster) {
//!     TurnOutcome::Placed { pos, .. } => println!("computer plays {pos:?}"),
//!     TurnOutcome::Draw => println!("board is full"),
//! }
//! ```

pub mod board;
pub mod constants;
pub mod engine;
pub mod scan;
pub mod strategy;
pub mod tactics;
pub mod win;
