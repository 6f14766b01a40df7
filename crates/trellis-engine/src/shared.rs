//! Shared access to one engine from many callers.
//!
//! Renumbering a sibling scope is a read-modify-write over that scope's
//! positions, so all mutations must be serialized per scope. A single
//! `RwLock` over the whole engine gives a stronger, simpler guarantee:
//! writers never interleave anywhere, and readers (views, metrics, lists)
//! run concurrently against committed state without blocking each other.

use std::sync::{Arc, PoisonError, RwLock};

use crate::engine::Engine;

#[derive(Clone)]
pub struct SharedEngine {
    inner: Arc<RwLock<Engine>>,
}

impl SharedEngine {
    pub fn new(engine: Engine) -> Self {
        Self {
            inner: Arc::new(RwLock::new(engine)),
        }
    }

    /// Run a read-only closure under the shared read lock.
    pub fn read<R>(&self, f: impl FnOnce(&Engine) -> R) -> R {
        let guard = self
            .inner
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Run a mutating closure under the exclusive write lock. The lock is
    /// held for the whole closure, so a renumber-and-insert sequence is
    /// never observed half-done.
    pub fn write<R>(&self, f: impl FnOnce(&mut Engine) -> R) -> R {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

impl Default for SharedEngine {
    fn default() -> Self {
        Self::new(Engine::new())
    }
}
