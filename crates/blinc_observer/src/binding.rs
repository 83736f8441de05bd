//! Binding handles
//!
//! [`BindingState`] is the explicit record of what an observer last applied:
//! the cached mapping used as the baseline for the next diff, plus counters.
//! It is shared between the running effect and the caller's [`Binding`].

use crate::config::CacheStrategy;
use crate::diff::{self, Patch};
use crate::graph::lock_graph;
use crate::snapshot::Snapshot;
use blinc_core::reactive::{Effect, SharedReactiveGraph};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Counters for one binding
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BindingStats {
    /// Selector invocations
    pub runs: u64,
    /// Patches handed to the render sink
    pub pushes: u64,
    /// Runs skipped because the selector returned a falsy value
    pub skips: u64,
    /// Runs that failed with a `BindError`
    pub errors: u64,
}

#[derive(Default)]
struct StateInner {
    cache: Snapshot,
    stats: BindingStats,
}

/// Shared state of one binding
#[derive(Clone, Default)]
pub struct BindingState {
    inner: Arc<Mutex<StateInner>>,
}

impl BindingState {
    fn lock(&self) -> MutexGuard<'_, StateInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The baseline the next snapshot will be diffed against
    pub fn cached(&self) -> Snapshot {
        self.lock().cache.clone()
    }

    pub fn stats(&self) -> BindingStats {
        self.lock().stats
    }

    /// Diff `snapshot` against the cache and move the cache forward
    ///
    /// With [`CacheStrategy::Patch`] the new baseline is the patch itself,
    /// so keys that did not change drop out of the cache.
    pub(crate) fn advance(&self, snapshot: Snapshot, strategy: CacheStrategy) -> Patch {
        let mut inner = self.lock();
        let patch = diff::diff(&inner.cache, &snapshot);
        inner.cache = match strategy {
            CacheStrategy::Patch => patch.clone(),
            CacheStrategy::Snapshot => snapshot,
        };
        patch
    }

    pub(crate) fn record_run(&self) {
        self.lock().stats.runs += 1;
    }

    pub(crate) fn record_push(&self) {
        self.lock().stats.pushes += 1;
    }

    pub(crate) fn record_skip(&self) {
        self.lock().stats.skips += 1;
    }

    pub(crate) fn record_error(&self) {
        self.lock().stats.errors += 1;
    }
}

impl fmt::Debug for BindingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("BindingState")
            .field("cache", &inner.cache)
            .field("stats", &inner.stats)
            .finish()
    }
}

/// Stops one binding's effect
///
/// Disposal is permanent. Calling it again re-runs the stop logic, which
/// finds nothing left to stop. Clones share the disposed flag.
///
/// Locks the reactive graph: never call it from inside a reactive update.
#[derive(Clone)]
pub struct Disposer {
    graph: SharedReactiveGraph,
    effect: Effect,
    disposed: Arc<AtomicBool>,
}

impl Disposer {
    pub(crate) fn new(graph: SharedReactiveGraph, effect: Effect) -> Self {
        Self {
            graph,
            effect,
            disposed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn dispose(&self) {
        lock_graph(&self.graph).dispose_effect(self.effect);
        if !self.disposed.swap(true, Ordering::SeqCst) {
            tracing::debug!(effect = ?self.effect.id(), "observer disposed");
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }
}

impl fmt::Debug for Disposer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Disposer")
            .field("effect", &self.effect)
            .field("disposed", &self.is_disposed())
            .finish_non_exhaustive()
    }
}

/// A live observer binding
///
/// Dropping the binding does not dispose it; the effect keeps running until
/// [`Binding::dispose`] or a wrapped lifecycle hook stops it.
#[derive(Debug)]
pub struct Binding {
    disposer: Disposer,
    state: BindingState,
}

impl Binding {
    pub(crate) fn new(disposer: Disposer, state: BindingState) -> Self {
        Self { disposer, state }
    }

    pub fn dispose(&self) {
        self.disposer.dispose();
    }

    pub fn is_disposed(&self) -> bool {
        self.disposer.is_disposed()
    }

    /// A clone of the disposer, for manual or early teardown elsewhere
    pub fn disposer(&self) -> Disposer {
        self.disposer.clone()
    }

    pub fn state(&self) -> &BindingState {
        &self.state
    }
}
