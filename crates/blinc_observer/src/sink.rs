//! Render-data sink

use crate::diff::Patch;

/// The host's render-data surface (a page or component `setData`)
///
/// Called from inside a reactive update while the graph is locked, so an
/// implementation must not write signals or fire lifecycle hooks.
pub trait RenderSink: Send {
    fn set_data(&mut self, patch: &Patch);
}

impl<F> RenderSink for F
where
    F: FnMut(&Patch) + Send,
{
    fn set_data(&mut self, patch: &Patch) {
        self(patch)
    }
}
