//! Observer binding
//!
//! Registers a selector as an effect on the reactive graph. Every run
//! structurally clones the selector output, diffs it against the binding's
//! cached baseline and pushes the resulting patch into the render sink.
//!
//! ```ignore
//! let binding = ObserverBuilder::new(graph.clone())
//!     .sink(move |patch: &Patch| page.set_data(patch))
//!     .hooks(&mut page_hooks)
//!     .selector(move |g| json!({ "count": g.get(count) }))
//!     .bind()?;
//! ```

use crate::binding::{Binding, BindingState, Disposer};
use crate::config::ObserverConfig;
use crate::diff::Patch;
use crate::error::{BindError, Result};
use crate::hooks::LifecycleHooks;
use crate::sink::RenderSink;
use crate::snapshot;
use crate::graph::lock_graph;
use blinc_core::reactive::{ReactiveGraph, SharedReactiveGraph};
use serde::Serialize;
use serde_json::Value;

/// Receives errors raised inside a reactive update
pub type ErrorHandler = Box<dyn FnMut(&BindError) + Send>;

type Selector = Box<dyn FnMut(&ReactiveGraph) -> Result<Value> + Send>;

/// Builder for an observer binding
pub struct ObserverBuilder<'h> {
    graph: SharedReactiveGraph,
    sink: Option<Box<dyn RenderSink>>,
    hooks: Option<&'h mut LifecycleHooks>,
    config: ObserverConfig,
    on_error: Option<ErrorHandler>,
    selector: Option<Selector>,
}

impl<'h> ObserverBuilder<'h> {
    pub fn new(graph: SharedReactiveGraph) -> Self {
        Self {
            graph,
            sink: None,
            hooks: None,
            config: ObserverConfig::default(),
            on_error: None,
            selector: None,
        }
    }

    /// Where patches are pushed (required)
    pub fn sink<K: RenderSink + 'static>(mut self, sink: K) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Teardown slots to wrap (optional)
    pub fn hooks(mut self, hooks: &'h mut LifecycleHooks) -> Self {
        self.hooks = Some(hooks);
        self
    }

    pub fn config(mut self, config: ObserverConfig) -> Self {
        self.config = config;
        self
    }

    /// Handle errors raised inside reactive updates
    ///
    /// Without a handler they are logged at error level.
    pub fn on_error<F: FnMut(&BindError) + Send + 'static>(mut self, handler: F) -> Self {
        self.on_error = Some(Box::new(handler));
        self
    }

    /// The state selector (required)
    ///
    /// Signals read through the graph handle become dependencies of the
    /// binding. A falsy result skips the cycle.
    pub fn selector<S, F>(mut self, mut selector: F) -> Self
    where
        S: Serialize,
        F: FnMut(&ReactiveGraph) -> S + Send + 'static,
    {
        self.selector = Some(Box::new(move |graph: &ReactiveGraph| {
            snapshot::structural_clone(&selector(graph))
        }));
        self
    }

    /// Register the binding
    ///
    /// Fails before anything is registered if the selector or sink is
    /// missing. Otherwise the selector runs once before this returns, unless
    /// the graph is inside a batch, in which case it runs when the batch ends.
    pub fn bind(self) -> Result<Binding> {
        let selector = self
            .selector
            .ok_or(BindError::Validation("selector must be a function"))?;
        let sink = self
            .sink
            .ok_or(BindError::Validation("context must provide a render sink"))?;

        let label = self.config.label.clone();
        let on_error: ErrorHandler = match self.on_error {
            Some(handler) => handler,
            None => {
                let label = label.clone();
                Box::new(move |err: &BindError| {
                    tracing::error!(observer = %label, error = %err, "observer update failed");
                })
            }
        };

        let state = BindingState::default();
        let mut update = Update {
            selector,
            sink,
            state: state.clone(),
            config: self.config,
            on_error,
        };

        let effect = lock_graph(&self.graph).create_effect(move |graph| update.run(graph));
        let disposer = Disposer::new(self.graph, effect);

        if let Some(hooks) = self.hooks {
            hooks.wrap_teardown(&disposer);
        }

        tracing::debug!(observer = %label, effect = ?effect.id(), "observer bound");
        Ok(Binding::new(disposer, state))
    }
}

/// Bind `selector` to `sink`, wrapping `hooks` when given
///
/// Shorthand for [`ObserverBuilder`] with the default configuration.
pub fn observe<S, F, K>(
    graph: SharedReactiveGraph,
    sink: K,
    hooks: Option<&mut LifecycleHooks>,
    selector: F,
) -> Result<Binding>
where
    S: Serialize,
    F: FnMut(&ReactiveGraph) -> S + Send + 'static,
    K: RenderSink + 'static,
{
    let builder = ObserverBuilder::new(graph).sink(sink).selector(selector);
    match hooks {
        Some(hooks) => builder.hooks(hooks).bind(),
        None => builder.bind(),
    }
}

/// State owned by the binding's effect
struct Update {
    selector: Selector,
    sink: Box<dyn RenderSink>,
    state: BindingState,
    config: ObserverConfig,
    on_error: ErrorHandler,
}

impl Update {
    fn run(&mut self, graph: &ReactiveGraph) {
        self.state.record_run();
        match self.evaluate(graph) {
            Ok(Some(patch)) => self.push(patch),
            Ok(None) => {
                self.state.record_skip();
                tracing::trace!(observer = %self.config.label, "falsy selector result, skipped");
            }
            Err(err) => {
                self.state.record_error();
                (self.on_error)(&err);
            }
        }
    }

    fn evaluate(&mut self, graph: &ReactiveGraph) -> Result<Option<Patch>> {
        let value = (self.selector)(graph)?;
        let Some(snapshot) = snapshot::into_snapshot(value)? else {
            return Ok(None);
        };
        Ok(Some(self.state.advance(snapshot, self.config.cache)))
    }

    fn push(&mut self, patch: Patch) {
        if patch.is_empty() && self.config.skip_empty_patches {
            return;
        }
        tracing::trace!(observer = %self.config.label, keys = patch.len(), "pushing patch");
        self.state.record_push();
        self.sink.set_data(&patch);
    }
}
