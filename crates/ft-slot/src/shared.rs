//! Lock-serialized engine handle for multiple callers

use std::sync::Arc;

use parking_lot::Mutex;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::engine::{EngineState, SlotEngine};
use crate::spin::RoundResult;
use crate::stats::SessionStats;

/// Cloneable handle; every call holds the engine lock for its whole duration,
/// so rounds never interleave.
pub struct SharedSlotEngine<R = ChaCha8Rng> {
    inner: Arc<Mutex<SlotEngine<R>>>,
}

impl<R> Clone for SharedSlotEngine<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Rng> SharedSlotEngine<R> {
    pub fn new(engine: SlotEngine<R>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// `trigger_bonus()` then `play()` under one lock
    pub fn spin(&self) -> RoundResult {
        let mut engine = self.inner.lock();
        engine.trigger_bonus();
        engine.play()
    }

    pub fn play(&self) -> RoundResult {
        self.inner.lock().play()
    }

    pub fn trigger_bonus(&self) -> bool {
        self.inner.lock().trigger_bonus()
    }

    pub fn set_bet(&self, amount: f64) -> f64 {
        self.inner.lock().set_bet(amount)
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> EngineState {
        self.inner.lock().state().clone()
    }

    pub fn stats(&self) -> SessionStats {
        self.inner.lock().stats().clone()
    }

    /// Run `f` with exclusive access
    pub fn with<T>(&self, f: impl FnOnce(&mut SlotEngine<R>) -> T) -> T {
        f(&mut self.inner.lock())
    }
}
