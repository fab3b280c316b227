//! draughts-mcts: a bit-packed international draughts engine driven by leaf-parallel MCTS.
//!
//! ## Modules
//!
//! - [`bitboard`] - 32-bit packed board primitives, diagonal tables, coordinate conversions
//! - [`position`] - position representation, move generation, mandatory-capture enumeration
//! - [`simulator`] - the random-rollout interface the search hands batches of leaves to
//! - [`mcts`] - the arena-allocated search tree itself
//! - [`controller`] - the narrow capability boundary a game driver calls into
//! - [`notation`] - square/move formatting for move logs
//! - [`constants`] - search/arena tuning defaults
//!
//! ## Example
//!
//! ```
//! use std::sync::atomic::AtomicBool;
//!
//! use draughts_mcts::mcts::{SearchConfig, Tree};
//! use draughts_mcts::position::Position;
//! use draughts_mcts::simulator::HostSimulator;
//!
//! let mut tree = Tree::new(HostSimulator::new(), SearchConfig { max_iterations: 50, ..Default::default() });
//! let cancelled = AtomicBool::new(false);
//! let best = tree.find_best_move(Position::starting(), &cancelled);
//! assert!(Position::starting().legal_successors().contains(&best));
//! ```

pub mod bitboard;
pub mod constants;
pub mod controller;
pub mod mcts;
pub mod notation;
pub mod position;
pub mod simulator;
