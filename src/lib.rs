//! Othello-MCTS: a bitboard Othello engine with Monte Carlo Tree Search.
//!
//! This crate plays Othello (Reversi) without hand-coded heuristics: move
//! generation is bit-parallel over 64-bit occupancy masks, and move choice
//! comes from plain UCT search over uniformly random playouts.
//!
//! ## Modules
//!
//! - [`constants`] - Board layout, direction tables, search parameters
//! - [`board`] - Core game logic (bitboards, moves, captures, notation)
//! - [`mcts`] - Monte Carlo Tree Search over an arena-allocated tree
//! - [`playout`] - Random game simulation for position evaluation
//! - [`export`] - JSON persistence of per-move search statistics
//! - [`selfplay`] - Full-game drivers (self-play, vs. random, collection)
//! - [`session`] - Interactive human-vs-agent play on stdin
//!
//! ## Example
//!
//! ```
//! use othello_mcts::board::GameBoard;
//! use othello_mcts::mcts::Mcts;
//!
//! // Search the opening position with a fixed seed.
//! let mut mcts = Mcts::new(GameBoard::opening(), 100, false);
//! let mut rng = fastrand::Rng::with_seed(1);
//!
//! let best = mcts.search(&mut rng).expect("the opening has legal moves");
//! println!("Best move: {}", best.notation());
//! ```

pub mod board;
pub mod constants;
pub mod export;
pub mod mcts;
pub mod playout;
pub mod selfplay;
pub mod session;
