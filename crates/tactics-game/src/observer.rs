//! `GameObserver` — tick-boundary and per-action instrumentation hooks.
//!
//! Rather than a structured-logging crate, the tick loop is instrumented
//! via an observer trait: called at fixed points with default no-op
//! methods so an implementor only overrides what it cares about — tick
//! start/end, and each action as it resolves. `log::error!` calls (see
//! `pipeline.rs`) cover the one place real structured logging is called
//! for: a panicking listener callback.

use tactics_action::Action;

/// Callbacks invoked by [`crate::Game::run_tick`] at key points in the
/// tick loop.
pub trait GameObserver: Send + Sync {
    /// Called once at the start of `run_tick`, before any action is
    /// dequeued.
    fn on_tick_start(&mut self, _tick: u64) {}

    /// Called after every `execute()` call, whether the action ran from
    /// the FIFO queue or recursed in as a reaction/counter-action.
    fn on_action_executed(&mut self, _action: &Action, _applied: bool) {}

    /// Called once after the queue has drained to a fixed point.
    /// `executed` is the number of top-level queue pops processed.
    fn on_tick_end(&mut self, _tick: u64, _executed: usize) {}
}

/// A [`GameObserver`] that does nothing. The default for a fresh `Game`.
pub struct NoopObserver;

impl GameObserver for NoopObserver {}
