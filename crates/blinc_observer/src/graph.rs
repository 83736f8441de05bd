//! Shared reactive graph helpers
//!
//! Observers register against a `blinc_core` [`SharedReactiveGraph`]. A
//! selector that panics poisons the graph mutex while the graph itself stays
//! usable, so access goes through [`lock_graph`], which recovers the guard.

use blinc_core::reactive::{ReactiveGraph, SharedReactiveGraph};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Create a new shared reactive graph
pub fn shared_graph() -> SharedReactiveGraph {
    Arc::new(Mutex::new(ReactiveGraph::new()))
}

/// Lock a shared graph, recovering the guard if a previous holder panicked
pub fn lock_graph(graph: &SharedReactiveGraph) -> MutexGuard<'_, ReactiveGraph> {
    graph.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Batch several writes so each dependent observer runs once
///
/// The batch is closed even if `f` panics; the panic is resumed after the
/// pending effects are flushed.
pub fn batch<R, F>(graph: &SharedReactiveGraph, f: F) -> R
where
    F: FnOnce(&mut ReactiveGraph) -> R,
{
    let mut guard = lock_graph(graph);
    guard.batch_start();
    let result = panic::catch_unwind(AssertUnwindSafe(|| f(&mut *guard)));
    guard.batch_end();
    match result {
        Ok(value) => value,
        Err(payload) => {
            drop(guard);
            panic::resume_unwind(payload)
        }
    }
}
