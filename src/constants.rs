//! Tunable constants for the search engine.
//!
//! Mirrors the way the original engine grouped its magic numbers as named constants rather than
//! scattering literals through the algorithm - but since this search is driven by a caller-owned
//! [`crate::mcts::SearchConfig`] rather than compiled-in parameters, most of these are only the
//! *defaults* that config struct falls back to.

// =============================================================================
// Arena sizing
// =============================================================================

/// Initial node-arena reservation. The original C++ tree reserves 250,000 nodes up front to
/// avoid reallocating mid-search; we do the same with `Vec::with_capacity`.
pub const ARENA_RESERVE: usize = 250_000;

// =============================================================================
// Search defaults (see `mcts::SearchConfig::default`)
// =============================================================================

/// Default exploration constant in the UCB1 formula, `sqrt(2)`.
pub const DEFAULT_EXPLORATION_CONSTANT: f32 = 1.414_213_56;

/// Default per-iteration cap on freshly expanded leaves ("leaf-parallel" batch size).
pub const DEFAULT_MAX_SELECTED_PER_ITER: usize = 8;

/// Default virtual-loss increment applied to every node on a path during batch selection.
pub const DEFAULT_VIRTUAL_LOSS_STEP: f32 = 0.01;

/// Default iteration ceiling; in practice `max_time` is almost always the binding constraint.
pub const DEFAULT_MAX_ITERATIONS: u32 = 1_000_000_000;

/// Default wall-clock search budget.
pub const DEFAULT_MAX_TIME_MS: u64 = 1_000;

/// Safety margin subtracted from `max_time` so the loop has time to unwind cleanly.
pub const TIME_MARGIN_MS: u64 = 1;

// =============================================================================
// Playout
// =============================================================================

/// Half-moves a random rollout is allowed to run before being scored as a draw.
pub const MAX_SIMULATE_PLIES: u32 = 40;
