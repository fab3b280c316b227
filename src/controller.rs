//! A narrow capability boundary between a game driver and whatever decides moves.
//!
//! This mirrors the original engine's `Controller`/`ComputerController` split: a UI thread posts
//! clicks and cancellation requests, a game thread blocks on `make_move` waiting for a result. The
//! only implementation in this crate is [`ComputerController`], which runs an MCTS search; an
//! interactive `PlayerController` would implement the same trait but needs the renderer and
//! click-routing this crate does not provide.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::mcts::{SearchConfig, Tree};
use crate::position::Position;
use crate::simulator::Simulator;

/// The capability a game driver depends on to get a move out of either a human or an engine.
pub trait Controller {
    /// UI-thread hook for a pointing-device click; a no-op for non-interactive controllers.
    fn on_click(&mut self, x: f32, y: f32);

    /// Game-thread blocking call: decide on and return a move from `position`.
    fn make_move(&mut self, position: Position) -> Position;

    /// UI-thread non-blocking call: ask an in-flight `make_move` to return soon. Idempotent.
    fn cancel_move(&mut self);
}

/// A [`Controller`] backed by an MCTS [`Tree`].
pub struct ComputerController<S: Simulator> {
    tree: Tree<S>,
    cancelled: AtomicBool,
}

impl<S: Simulator> ComputerController<S> {
    pub fn new(simulator: S, config: SearchConfig) -> Self {
        ComputerController { tree: Tree::new(simulator, config), cancelled: AtomicBool::new(false) }
    }
}

impl<S: Simulator> Controller for ComputerController<S> {
    fn on_click(&mut self, _x: f32, _y: f32) {}

    fn make_move(&mut self, position: Position) -> Position {
        self.cancelled.store(false, Ordering::Relaxed);
        self.tree.find_best_move(position, &self.cancelled)
    }

    fn cancel_move(&mut self) {
        crate::mcts::cancel_search(&self.cancelled);
    }
}
