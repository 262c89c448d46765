use std::collections::BTreeMap;

use crate::animation::value::PropertyBag;
use crate::foundation::core::ElementId;
use crate::foundation::error::{ScrollweaveError, ScrollweaveResult};

/// Boundary between the choreography engine and a concrete view layer.
///
/// Lifecycle contract: `setup` is called once at mount with every managed element id,
/// `apply_state` any number of times while mounted, and `teardown` exactly once when the
/// choreographer unmounts (including failed mounts).
pub trait BindingLayer {
    /// Resolve view handles for the managed elements.
    fn setup(&mut self, elements: &[ElementId]) -> ScrollweaveResult<()>;
    /// Apply the current property snapshot of one element.
    fn apply_state(&mut self, element: &ElementId, properties: &PropertyBag);
    /// Release every handle acquired in `setup`.
    fn teardown(&mut self);
}

impl<B: BindingLayer + ?Sized> BindingLayer for &mut B {
    fn setup(&mut self, elements: &[ElementId]) -> ScrollweaveResult<()> {
        (**self).setup(elements)
    }

    fn apply_state(&mut self, element: &ElementId, properties: &PropertyBag) {
        (**self).apply_state(element, properties);
    }

    fn teardown(&mut self) {
        (**self).teardown();
    }
}

/// Indexed registry from element id to an opaque view handle.
///
/// Owned by binding implementations so the engine never holds view references.
#[derive(Debug)]
pub struct HandleRegistry<H> {
    handles: BTreeMap<ElementId, H>,
}

impl<H> Default for HandleRegistry<H> {
    fn default() -> Self {
        Self {
            handles: BTreeMap::new(),
        }
    }
}

impl<H> HandleRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handle; an id can only be bound once.
    pub fn insert(&mut self, element: ElementId, handle: H) -> ScrollweaveResult<()> {
        if self.handles.contains_key(&element) {
            return Err(ScrollweaveError::validation(format!(
                "element '{element}' is already bound"
            )));
        }
        self.handles.insert(element, handle);
        Ok(())
    }

    pub fn get(&self, element: &str) -> Option<&H> {
        self.handles.get(element)
    }

    pub fn get_mut(&mut self, element: &str) -> Option<&mut H> {
        self.handles.get_mut(element)
    }

    pub fn remove(&mut self, element: &str) -> Option<H> {
        self.handles.remove(element)
    }

    /// Drop every handle, returning them for release.
    pub fn drain(&mut self) -> Vec<(ElementId, H)> {
        std::mem::take(&mut self.handles).into_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

/// In-memory binding for tests, tooling and debugging.
///
/// Handles are slot indices; every applied snapshot is recorded.
#[derive(Debug, Default)]
pub struct RecordingBinding {
    registry: HandleRegistry<usize>,
    latest: BTreeMap<ElementId, PropertyBag>,
    applied: usize,
    applied_while_unbound: usize,
    setups: usize,
    teardowns: usize,
    fail_setup: bool,
}

impl RecordingBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// A binding whose `setup` always fails, for exercising mount error paths.
    pub fn failing() -> Self {
        Self {
            fail_setup: true,
            ..Self::default()
        }
    }

    /// Latest snapshot applied to `element`.
    pub fn latest(&self, element: &str) -> Option<&PropertyBag> {
        self.latest.get(element)
    }

    pub fn snapshots(&self) -> &BTreeMap<ElementId, PropertyBag> {
        &self.latest
    }

    /// Number of `apply_state` calls so far.
    pub fn applied(&self) -> usize {
        self.applied
    }

    /// `apply_state` calls for elements without a live handle. Always zero for a correct engine.
    pub fn applied_while_unbound(&self) -> usize {
        self.applied_while_unbound
    }

    pub fn bound(&self) -> usize {
        self.registry.len()
    }

    pub fn setups(&self) -> usize {
        self.setups
    }

    pub fn teardowns(&self) -> usize {
        self.teardowns
    }
}

impl BindingLayer for RecordingBinding {
    fn setup(&mut self, elements: &[ElementId]) -> ScrollweaveResult<()> {
        self.setups += 1;
        for (slot, element) in elements.iter().enumerate() {
            self.registry.insert(element.clone(), slot)?;
        }
        if self.fail_setup {
            return Err(ScrollweaveError::validation("binding setup refused"));
        }
        Ok(())
    }

    fn apply_state(&mut self, element: &ElementId, properties: &PropertyBag) {
        self.applied += 1;
        if self.registry.get(element.as_str()).is_none() {
            self.applied_while_unbound += 1;
            return;
        }
        self.latest.insert(element.clone(), properties.clone());
    }

    fn teardown(&mut self) {
        self.teardowns += 1;
        self.registry.drain();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/binding/layer.rs"]
mod tests;
