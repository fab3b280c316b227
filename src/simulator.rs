//! Random self-play rollouts used to score freshly expanded search leaves.
//!
//! The search core never plays out a game itself - it hands a batch of leaf [`Position`]s to a
//! [`Simulator`] and reads back win/draw/visit increments. That keeps the tree-search code free
//! of playout policy, and leaves room for a different simulator (a batched, GPU-resident one, for
//! instance) to be dropped in without touching [`crate::mcts`].

use crate::constants::MAX_SIMULATE_PLIES;
use crate::position::Position;

/// Runs one or more random rollouts per leaf position and reports the results.
///
/// `positions`, `black_inc`, `white_inc`, and `visits_inc` all have the same length. Implementors
/// write into the three `_inc` slices; `positions` is read-only. Per entry *i*, a single rollout
/// contributes 2 to `visits_inc[i]`, and either 2 to the winner's `*_inc[i]` or 1 to each side's
/// on a draw.
pub trait Simulator {
    fn simulate(&mut self, positions: &[Position], black_inc: &mut [i32], white_inc: &mut [i32], visits_inc: &mut [i32]);
}

/// Reference simulator: one single-threaded uniform-random rollout per batch entry.
///
/// Seeded nondeterministically at construction, matching the original's
/// `std::random_device`-seeded host generator.
pub struct HostSimulator {
    rng: fastrand::Rng,
}

impl HostSimulator {
    pub fn new() -> Self {
        Self { rng: fastrand::Rng::new() }
    }

    /// Play one random game from `position` to a terminal state or the move cap, scoring it.
    fn simulate_one(&mut self, mut position: Position) -> (i32, i32) {
        let mut plies = 0;
        while !position.has_lost() && !position.is_draw() && plies < MAX_SIMULATE_PLIES {
            self.random_move(&mut position);
            position.end_turn();
            plies += 1;
        }

        if position.is_draw() || plies == MAX_SIMULATE_PLIES {
            return (1, 1);
        }

        // The side to move here has no moves left, i.e. lost; the other side just moved in.
        if position.black_turn { (0, 2) } else { (2, 0) }
    }

    /// Play a uniformly random legal move from `position`, respecting mandatory capture and
    /// chaining a randomly chosen compound-capture sequence to its end.
    fn random_move(&mut self, position: &mut Position) {
        let capturing = position.get_all_capturing();

        if capturing != 0 {
            let mut from = self.random_bit(capturing);
            loop {
                let captures = position.get_captures(crate::bitboard::from_index(from));
                debug_assert!(captures != 0);
                let to = self.random_bit(captures);
                position.capture(from, to);

                let next_captures = position.get_captures(crate::bitboard::from_index(to));
                if next_captures == 0 {
                    break;
                }
                from = to;
            }
            return;
        }

        let moving = position.get_all_moving();
        let from = self.random_bit(moving);
        let moves = position.get_moves(crate::bitboard::from_index(from));
        debug_assert!(moves != 0);
        let to = self.random_bit(moves);
        position.make_move(from, to);
    }

    /// Uniformly pick a set bit index out of `board`, which must be nonzero.
    fn random_bit(&mut self, board: u32) -> u32 {
        debug_assert!(board != 0);
        if board.count_ones() == 1 {
            return board.trailing_zeros();
        }
        let choices: Vec<u32> = crate::bitboard::bits_of(board).collect();
        choices[self.rng.usize(0..choices.len())]
    }
}

impl Default for HostSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator for HostSimulator {
    fn simulate(&mut self, positions: &[Position], black_inc: &mut [i32], white_inc: &mut [i32], visits_inc: &mut [i32]) {
        debug_assert_eq!(positions.len(), black_inc.len());
        debug_assert_eq!(positions.len(), white_inc.len());
        debug_assert_eq!(positions.len(), visits_inc.len());

        for i in 0..positions.len() {
            let (b, w) = self.simulate_one(positions[i]);
            black_inc[i] = b;
            white_inc[i] = w;
            visits_inc[i] = 2;
        }
    }
}
