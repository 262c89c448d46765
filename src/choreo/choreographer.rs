use std::collections::{BTreeMap, BTreeSet};

use crate::animation::value::{Property, PropertyBag};
use crate::binding::layer::BindingLayer;
use crate::choreo::entry::EntrySchedule;
use crate::choreo::state::ElementState;
use crate::foundation::core::ElementId;
use crate::foundation::error::{ScrollweaveError, ScrollweaveResult};
use crate::plan::element::ElementAnimationPlan;

/// Lifecycle of a [`Choreographer`].
///
/// `Unmounted -> Mounting -> ScrollDriven -> Unmounted`. Tearing down happens synchronously
/// inside [`Choreographer::unmount`], so there is no intermediate state to observe. Once an
/// instance has been unmounted it stays unmounted; a new mount needs a new instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum Lifecycle {
    Unmounted,
    /// Entry animations are in flight and scrolling has not started.
    Mounting,
    ScrollDriven,
}

/// Drives managed element state from scroll position and the entry schedule.
///
/// Scroll-driven values are a pure function of the position passed to [`Choreographer::tick`].
/// Entry animations write into the same property bags; until scrolling engages they own the
/// properties they animate, afterwards the plan does.
pub struct Choreographer<B: BindingLayer> {
    plan: ElementAnimationPlan,
    entries: EntrySchedule,
    binding: B,
    states: BTreeMap<ElementId, ElementState>,
    lifecycle: Lifecycle,
    retired: bool,
    scroll_engaged: bool,
    position: Option<f64>,
}

impl<B: BindingLayer> Choreographer<B> {
    pub fn new(plan: ElementAnimationPlan, entries: EntrySchedule, binding: B) -> Self {
        Self {
            plan,
            entries,
            binding,
            states: BTreeMap::new(),
            lifecycle: Lifecycle::Unmounted,
            retired: false,
            scroll_engaged: false,
            position: None,
        }
    }

    pub fn plan(&self) -> &ElementAnimationPlan {
        &self.plan
    }

    pub fn entries(&self) -> &EntrySchedule {
        &self.entries
    }

    pub fn binding(&self) -> &B {
        &self.binding
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// `true` while mounted (entry animations in flight or scroll driven).
    pub fn is_active(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Mounting | Lifecycle::ScrollDriven)
    }

    pub fn is_scroll_engaged(&self) -> bool {
        self.scroll_engaged
    }

    /// Clamped position of the last tick.
    pub fn position(&self) -> Option<f64> {
        self.position
    }

    pub fn total_span(&self) -> f64 {
        self.plan.total_span()
    }

    pub fn state(&self, element: &str) -> Option<&ElementState> {
        self.states.get(element)
    }

    /// Property bags of every managed element.
    pub fn snapshot(&self) -> BTreeMap<ElementId, PropertyBag> {
        self.states
            .iter()
            .map(|(id, s)| (id.clone(), s.properties.clone()))
            .collect()
    }

    /// Plan elements followed by entry-only elements, without duplicates.
    fn managed_ids(&self) -> Vec<ElementId> {
        let mut seen = BTreeSet::new();
        self.plan
            .elements()
            .iter()
            .chain(self.entries.entries().iter().map(|e| &e.element))
            .filter(|id| seen.insert((*id).clone()))
            .cloned()
            .collect()
    }

    /// Create element state, bind it and start the entry schedule at wall-clock `now` (seconds).
    ///
    /// A failed mount releases the binding and retires the instance.
    #[tracing::instrument(skip(self), fields(elements = self.plan.elements().len()))]
    pub fn mount(&mut self, now: f64) -> ScrollweaveResult<()> {
        if self.retired || self.lifecycle != Lifecycle::Unmounted {
            return Err(ScrollweaveError::lifecycle(
                "choreographer can only be mounted once; construct a new instance",
            ));
        }

        let ids = self.managed_ids();
        if let Err(e) = self.binding.setup(&ids) {
            tracing::warn!(error = %e, "binding setup failed; releasing");
            self.binding.teardown();
            self.retired = true;
            return Err(e);
        }
        if let Err(e) = self.entries.start(now) {
            self.binding.teardown();
            self.retired = true;
            return Err(e);
        }

        for id in ids {
            let mut bag = self.plan.evaluate_element(id.as_str(), 0.0);
            for property in Property::ALL {
                if let Some(v) = self.entries.start_value(id.as_str(), property) {
                    bag.insert(property, v);
                }
            }
            self.states.insert(id.clone(), ElementState::mounted(id, bag));
        }

        self.lifecycle = if self.entries.is_empty() {
            Lifecycle::ScrollDriven
        } else {
            Lifecycle::Mounting
        };
        tracing::debug!(lifecycle = ?self.lifecycle, "mounted");

        for state in self.states.values() {
            self.binding.apply_state(&state.id, &state.properties);
        }
        Ok(())
    }

    /// Advance entry animations to wall-clock `now` and apply what changed.
    ///
    /// Does nothing unless mounted. Entry writes to plan-animated properties are dropped once
    /// scrolling has engaged.
    pub fn advance(&mut self, now: f64) {
        if !self.is_active() {
            tracing::debug!(lifecycle = ?self.lifecycle, "advance ignored");
            return;
        }

        let mut dirty = BTreeSet::new();
        for write in self.entries.advance(now) {
            if self.scroll_engaged && self.plan.animates(write.element.as_str(), write.property) {
                tracing::trace!(element = %write.element, property = %write.property, "entry write superseded");
                continue;
            }
            if let Some(state) = self.states.get_mut(write.element.as_str()) {
                if state.write(write.property, write.value) {
                    dirty.insert(write.element);
                }
            }
        }

        if self.lifecycle == Lifecycle::Mounting && self.entries.is_finished() {
            self.lifecycle = Lifecycle::ScrollDriven;
            tracing::debug!("entry animations finished");
        }

        for id in dirty {
            if let Some(state) = self.states.get(&id) {
                self.binding.apply_state(&state.id, &state.properties);
            }
        }
    }

    /// Evaluate every plan-animated property at `position` on the duration axis and apply it.
    ///
    /// `position` is clamped to `[0, total_span]` (NaN reads as `0`). Calling `tick` again with
    /// the same position yields the same state.
    pub fn tick(&mut self, position: f64) -> ScrollweaveResult<()> {
        if !self.is_active() {
            return Err(ScrollweaveError::lifecycle(format!(
                "tick while {:?}",
                self.lifecycle
            )));
        }

        let position = if position.is_nan() {
            0.0
        } else {
            position.clamp(0.0, self.plan.total_span())
        };
        if position > 0.0 && !self.scroll_engaged {
            self.scroll_engaged = true;
            tracing::debug!(position, "scroll engaged");
        }
        if self.scroll_engaged {
            self.lifecycle = Lifecycle::ScrollDriven;
        }
        self.position = Some(position);

        for id in self.plan.elements() {
            let Some(state) = self.states.get_mut(id.as_str()) else {
                continue;
            };
            for property in Property::ALL {
                if !self.plan.animates(id.as_str(), property) {
                    continue;
                }
                if !self.scroll_engaged && self.entries.owns(id.as_str(), property) {
                    continue;
                }
                state.write(property, self.plan.evaluate(id.as_str(), property, position));
            }
            self.binding.apply_state(&state.id, &state.properties);
        }
        Ok(())
    }

    /// [`Choreographer::tick`] with a normalized `[0, 1]` scroll fraction.
    pub fn tick_normalized(&mut self, fraction: f64) -> ScrollweaveResult<()> {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        self.tick(fraction * self.plan.total_span())
    }

    /// Cancel in-flight entry animations, release the binding and destroy element state.
    ///
    /// Unmounting an instance that is not mounted is a no-op.
    #[tracing::instrument(skip(self))]
    pub fn unmount(&mut self) {
        if !self.is_active() {
            return;
        }
        let cancelled = self.entries.cancel();
        self.binding.teardown();
        self.states.clear();
        self.lifecycle = Lifecycle::Unmounted;
        self.retired = true;
        tracing::debug!(cancelled, "unmounted");
    }
}

impl<B: BindingLayer> Drop for Choreographer<B> {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/choreo/choreographer.rs"]
mod tests;
