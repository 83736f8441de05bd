//! Blinc Observer
//!
//! Binds a reactive state selector to a page or component's render data:
//!
//! - **Selector**: reads signals from the reactive graph and returns a
//!   key/value view model; it re-runs whenever a signal it read changes
//! - **Patch**: only keys that are new or changed are pushed to the sink
//! - **Teardown**: the binding stops when the host unloads or unmounts
//!
//! # Example
//!
//! ```rust
//! use blinc_observer::{lock_graph, shared_graph, LifecycleHooks, ObserverBuilder, Patch};
//! use serde_json::json;
//! use std::sync::{Arc, Mutex};
//!
//! let graph = shared_graph();
//! let count = lock_graph(&graph).create_signal(1i64);
//!
//! let rendered = Arc::new(Mutex::new(Vec::new()));
//! let rendered_in_sink = rendered.clone();
//! let mut hooks = LifecycleHooks::new();
//!
//! let binding = ObserverBuilder::new(graph.clone())
//!     .sink(move |patch: &Patch| rendered_in_sink.lock().unwrap().push(patch.clone()))
//!     .hooks(&mut hooks)
//!     .selector(move |g| json!({ "count": g.get(count), "title": "Cart" }))
//!     .bind()
//!     .unwrap();
//!
//! lock_graph(&graph).set(count, 2);
//! assert_eq!(rendered.lock().unwrap().len(), 2);
//!
//! // The host unloads the page: the binding stops
//! hooks.fire_unload(&[]);
//! assert!(binding.is_disposed());
//! ```

pub mod binding;
pub mod config;
pub mod diff;
pub mod error;
pub mod graph;
pub mod hooks;
pub mod observer;
pub mod sink;
pub mod snapshot;

pub use binding::{Binding, BindingState, BindingStats, Disposer};
pub use config::{CacheStrategy, ObserverConfig};
pub use diff::{diff, structurally_equal, Patch};
pub use error::{BindError, Result};
pub use graph::{batch, lock_graph, shared_graph};
pub use hooks::{Hook, LifecycleHooks};
pub use observer::{observe, ErrorHandler, ObserverBuilder};
pub use sink::RenderSink;
pub use snapshot::Snapshot;

pub use blinc_core::reactive::{Effect, ReactiveGraph, SharedReactiveGraph, Signal};
