//! Monte Carlo Tree Search over draughts positions.
//!
//! The tree lives in a single append-only arena (`Vec<Node>`), addressed by integer index rather
//! than pointers; index 0 is always the root, and 0 doubles as the "no child/no sibling" sentinel
//! since the root can never be anyone's child or sibling. Each call to [`Tree::find_best_move`]
//! clears the arena and runs iterations of select/expand/simulate/back-propagate until the time
//! budget, iteration cap, or cooperative cancellation flag stops it.
//!
//! Expansion is "leaf-parallel": each iteration grows up to `max_selected_per_iter` leaves before
//! handing the whole batch to the [`Simulator`] in one call, and a small virtual-loss penalty
//! keeps the batch-building walk from selecting the same leaf twice.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::constants::{
    ARENA_RESERVE, DEFAULT_EXPLORATION_CONSTANT, DEFAULT_MAX_ITERATIONS, DEFAULT_MAX_SELECTED_PER_ITER,
    DEFAULT_MAX_TIME_MS, DEFAULT_VIRTUAL_LOSS_STEP, TIME_MARGIN_MS,
};
use crate::position::Position;
use crate::simulator::Simulator;

type NodeIndex = u32;

/// One node of the search tree: a position plus intrusive child/sibling links into the arena.
#[derive(Clone, Copy, Debug)]
struct Node {
    position: Position,
    first_child: NodeIndex,
    next_sibling: NodeIndex,
    visits: u32,
    wins: u32,
}

/// Tunable parameters of a search. Construct via `SearchConfig::default()` and override the
/// fields a caller cares about with struct-update syntax.
#[derive(Clone, Copy, Debug)]
pub struct SearchConfig {
    /// Hard cap on iterations; in practice `max_time` almost always triggers first.
    pub max_iterations: u32,
    /// Wall-clock search budget.
    pub max_time: Duration,
    /// Maximum freshly expanded leaves gathered into one simulation batch per iteration.
    pub max_selected_per_iter: usize,
    /// Exploration constant `c` in the UCB1 score `winrate + c * sqrt(ln(N) / n)`.
    pub c_explore: f32,
    /// Penalty added to a node's score for each in-flight selection path through it this batch.
    pub virtual_loss_step: f32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_time: Duration::from_millis(DEFAULT_MAX_TIME_MS),
            max_selected_per_iter: DEFAULT_MAX_SELECTED_PER_ITER,
            c_explore: DEFAULT_EXPLORATION_CONSTANT,
            virtual_loss_step: DEFAULT_VIRTUAL_LOSS_STEP,
        }
    }
}

/// Signal an in-flight [`Tree::find_best_move`] call to return as soon as it next checks - at
/// the top of its current iteration, not mid-iteration. Idempotent; safe to call after the
/// search has already finished.
pub fn cancel_search(flag: &AtomicBool) {
    flag.store(true, Ordering::Relaxed);
}

/// An MCTS search tree over draughts positions, generic over the simulator used to score leaves.
pub struct Tree<S: Simulator> {
    simulator: S,
    config: SearchConfig,

    nodes: Vec<Node>,
    virtual_loss: Vec<f32>,
    selected: Vec<Position>,
    paths: Vec<Vec<NodeIndex>>,
}

impl<S: Simulator> Tree<S> {
    pub fn new(simulator: S, config: SearchConfig) -> Self {
        Tree {
            simulator,
            config,
            nodes: Vec::with_capacity(ARENA_RESERVE),
            virtual_loss: Vec::with_capacity(ARENA_RESERVE),
            selected: Vec::new(),
            paths: Vec::new(),
        }
    }

    /// Run a fresh search from `position` until the time/iteration budget is spent or
    /// `cancelled` is set, then return the most-visited root child's position.
    ///
    /// Returns [`Position::default`] (the all-zero sentinel) if cancelled before a result is
    /// available; returns `position` itself unchanged if the position has no legal successors
    /// (a terminal position handed in directly).
    pub fn find_best_move(&mut self, position: Position, cancelled: &AtomicBool) -> Position {
        self.nodes.clear();
        self.virtual_loss.clear();
        self.nodes.push(Node { position, first_child: 0, next_sibling: 0, visits: 0, wins: 0 });
        self.virtual_loss.push(0.0);

        let start = Instant::now();
        let max_time = self.config.max_time.saturating_sub(Duration::from_millis(TIME_MARGIN_MS));

        for _ in 0..self.config.max_iterations {
            if cancelled.load(Ordering::Relaxed) {
                return Position::default();
            }

            if start.elapsed() > max_time {
                break;
            }

            self.run_iteration();
        }

        self.best_move()
    }

    fn run_iteration(&mut self) {
        self.paths.clear();
        self.selected.clear();

        let mut path_count = 0usize;
        while self.selected.len() < self.config.max_selected_per_iter {
            let leaf = self.select_node();

            if leaf == 0 && self.nodes[0].first_child != 0 {
                // Carried over from the reference implementation: select_node can only return
                // the root once it has no children of its own, so this never actually fires,
                // but it guards against that invariant changing under future edits.
                break;
            }

            self.expand(leaf);

            for path in &self.paths[path_count..] {
                for &idx in path {
                    self.virtual_loss[idx as usize] += self.config.virtual_loss_step;
                }
            }
            path_count = self.paths.len();
        }

        let n = self.selected.len();
        let mut black_inc = vec![0i32; n];
        let mut white_inc = vec![0i32; n];
        let mut visits_inc = vec![0i32; n];

        self.simulator.simulate(&self.selected, &mut black_inc, &mut white_inc, &mut visits_inc);

        self.back_propagate(&black_inc, &white_inc, &visits_inc);
    }

    /// Descend from the root by maximum UCB score (minus virtual loss) until a childless node,
    /// recording the root-to-parent path as a new entry in `self.paths`. The leaf itself is
    /// appended to that path by [`Tree::expand`], not here.
    fn select_node(&mut self) -> NodeIndex {
        self.paths.push(Vec::new());

        let mut node_index: NodeIndex = 0;

        while self.nodes[node_index as usize].first_child != 0 {
            let node = self.nodes[node_index as usize];
            self.paths.last_mut().unwrap().push(node_index);

            let total_visits = node.visits as f32;
            let mut best_score = f32::MIN;
            let mut best_child = node_index;

            let mut child_index = node.first_child;
            while child_index != 0 {
                let child = self.nodes[child_index as usize];
                let visits = if child.visits == 0 { 1.0 } else { child.visits as f32 };
                let winrate = child.wins as f32 / visits;

                let mut score = winrate + self.config.c_explore * (total_visits.ln() / visits).sqrt();
                score -= self.virtual_loss[child_index as usize];

                if score > best_score {
                    best_score = score;
                    best_child = child_index;
                }
                child_index = child.next_sibling;
            }

            node_index = best_child;
        }

        node_index
    }

    /// Expand leaf `index`: if it is unvisited or terminal, select it as-is for simulation;
    /// otherwise materialise its legal successors as contiguous arena siblings and select the
    /// first `max_selected_per_iter` of them (cloning a fresh path for each beyond the first).
    fn expand(&mut self, index: NodeIndex) {
        self.paths.last_mut().unwrap().push(index);

        let node = self.nodes[index as usize];
        if node.visits == 0 || node.first_child != 0 || node.position.has_lost() || node.position.is_draw() {
            self.selected.push(node.position);
            return;
        }

        let successors = node.position.legal_successors();
        debug_assert!(!successors.is_empty(), "non-terminal visited leaf must have a legal successor");

        let first_child_index = self.nodes.len() as NodeIndex;
        self.nodes[index as usize].first_child = first_child_index;

        let count = successors.len();
        for (i, succ) in successors.into_iter().enumerate() {
            let next_sibling = if i + 1 < count { self.nodes.len() as NodeIndex + 1 } else { 0 };
            self.nodes.push(Node { position: succ, first_child: 0, next_sibling, visits: 0, wins: 0 });
            self.virtual_loss.push(0.0);
        }

        let mut child = first_child_index;
        self.paths.last_mut().unwrap().push(child);
        self.selected.push(self.nodes[child as usize].position);
        child = self.nodes[child as usize].next_sibling;

        while child != 0 && self.selected.len() < self.config.max_selected_per_iter {
            let mut path = self.paths.last().unwrap().clone();
            path.pop();
            path.push(child);
            self.paths.push(path);
            self.selected.push(self.nodes[child as usize].position);

            child = self.nodes[child as usize].next_sibling;
        }
    }

    fn back_propagate(&mut self, black_inc: &[i32], white_inc: &[i32], visits_inc: &[i32]) {
        for (i, path) in self.paths.iter().enumerate() {
            for &idx in path {
                let node = &mut self.nodes[idx as usize];
                node.visits += visits_inc[i] as u32;
                node.wins += if !node.position.black_turn { black_inc[i] as u32 } else { white_inc[i] as u32 };
                self.virtual_loss[idx as usize] = 0.0;
            }
        }
    }

    /// Most-visited child of the root, or the root's own position if it has none.
    fn best_move(&self) -> Position {
        let mut max_visits = 0u32;
        let mut max_index: NodeIndex = 0;

        let mut child = self.nodes[0].first_child;
        while child != 0 {
            if self.nodes[child as usize].visits > max_visits {
                max_visits = self.nodes[child as usize].visits;
                max_index = child;
            }
            child = self.nodes[child as usize].next_sibling;
        }

        self.nodes[max_index as usize].position
    }

    /// Total visits recorded at the root so far (for diagnostics/logging).
    pub fn root_visits(&self) -> u32 {
        self.nodes.first().map(|n| n.visits).unwrap_or(0)
    }
}
