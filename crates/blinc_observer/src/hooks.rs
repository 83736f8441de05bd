//! Host lifecycle hooks
//!
//! Pages and components tear down through different slots depending on the
//! host runtime (`onUnload` for pages, `didUnmount` for components). Binding
//! an observer wraps both so the effect is stopped whichever one fires.

use crate::binding::Disposer;
use serde_json::Value;
use std::fmt;

/// A lifecycle callback; receives the host's argument list
pub type Hook = Box<dyn FnMut(&[Value]) + Send>;

/// The teardown slots of a page or component
#[derive(Default)]
pub struct LifecycleHooks {
    on_unload: Option<Hook>,
    did_unmount: Option<Hook>,
}

impl LifecycleHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_on_unload<F: FnMut(&[Value]) + Send + 'static>(mut self, hook: F) -> Self {
        self.on_unload = Some(Box::new(hook));
        self
    }

    pub fn with_did_unmount<F: FnMut(&[Value]) + Send + 'static>(mut self, hook: F) -> Self {
        self.did_unmount = Some(Box::new(hook));
        self
    }

    pub fn set_on_unload<F: FnMut(&[Value]) + Send + 'static>(&mut self, hook: F) {
        self.on_unload = Some(Box::new(hook));
    }

    pub fn set_did_unmount<F: FnMut(&[Value]) + Send + 'static>(&mut self, hook: F) {
        self.did_unmount = Some(Box::new(hook));
    }

    pub fn has_on_unload(&self) -> bool {
        self.on_unload.is_some()
    }

    pub fn has_did_unmount(&self) -> bool {
        self.did_unmount.is_some()
    }

    /// Fire the page teardown slot, as the host does on unload
    pub fn fire_unload(&mut self, args: &[Value]) {
        if let Some(hook) = self.on_unload.as_mut() {
            hook(args);
        }
    }

    /// Fire the component teardown slot, as the host does on unmount
    pub fn fire_unmount(&mut self, args: &[Value]) {
        if let Some(hook) = self.did_unmount.as_mut() {
            hook(args);
        }
    }

    /// Wrap both slots so each stops `disposer` before calling what was
    /// installed there
    pub(crate) fn wrap_teardown(&mut self, disposer: &Disposer) {
        self.on_unload = Some(wrap(self.on_unload.take(), disposer.clone()));
        self.did_unmount = Some(wrap(self.did_unmount.take(), disposer.clone()));
    }
}

fn wrap(original: Option<Hook>, disposer: Disposer) -> Hook {
    let mut original = original;
    Box::new(move |args: &[Value]| {
        disposer.dispose();
        if let Some(hook) = original.as_mut() {
            hook(args);
        }
    })
}

impl fmt::Debug for LifecycleHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleHooks")
            .field("on_unload", &self.on_unload.is_some())
            .field("did_unmount", &self.did_unmount.is_some())
            .finish()
    }
}
