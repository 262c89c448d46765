use std::collections::BTreeMap;

use crate::animation::ease::Ease;
use crate::animation::value::{Property, PropertyValue};
use crate::foundation::core::ElementId;
use crate::foundation::error::{ScrollweaveError, ScrollweaveResult};
use crate::plan::element::ElementAnimationPlan;
use crate::plan::segment::{Anchor, KeyframeSegment};
use crate::timeline::phase::PhaseTimeline;

/// Builder for [`ElementAnimationPlan`].
///
/// Elements are declared with [`PlanBuilder::element`] before any segment targets them.
/// Besides raw segments it offers tween-style helpers: [`PlanBuilder::to`] starts each property
/// from the last target declared for it (or its initial value), so staged transforms on one
/// element chain without repeating values.
pub struct PlanBuilder {
    plan: ElementAnimationPlan,
    last_target: BTreeMap<(ElementId, Property), PropertyValue>,
}

impl PlanBuilder {
    pub fn new(timeline: PhaseTimeline) -> Self {
        Self {
            plan: ElementAnimationPlan::new(timeline),
            last_target: BTreeMap::new(),
        }
    }

    /// Register an element with its initial property values.
    pub fn element<I>(mut self, id: impl Into<ElementId>, initial: I) -> ScrollweaveResult<Self>
    where
        I: IntoIterator<Item = (Property, PropertyValue)>,
    {
        let id = id.into();
        if self.plan.contains_element(id.as_str()) {
            return Err(ScrollweaveError::validation(format!(
                "duplicate element '{id}'"
            )));
        }
        self.plan.register_element(id.clone());
        for (property, value) in initial {
            self.plan.set_initial(id.clone(), property, value)?;
        }
        Ok(self)
    }

    /// Set initial property values on an element that is already registered.
    pub fn initial<I>(mut self, id: &str, initial: I) -> ScrollweaveResult<Self>
    where
        I: IntoIterator<Item = (Property, PropertyValue)>,
    {
        self.require(id)?;
        for (property, value) in initial {
            self.plan.set_initial(id, property, value)?;
        }
        Ok(self)
    }

    /// Append a fully specified segment.
    pub fn segment(mut self, segment: KeyframeSegment) -> ScrollweaveResult<Self> {
        self.push(segment)?;
        Ok(self)
    }

    /// Tween every target from explicit values to explicit values.
    pub fn from_to<I>(
        mut self,
        targets: &[ElementId],
        at: impl Into<Anchor>,
        duration: f64,
        ease: Ease,
        props: I,
    ) -> ScrollweaveResult<Self>
    where
        I: IntoIterator<Item = (Property, PropertyValue, PropertyValue)>,
    {
        let at = at.into();
        let props: Vec<_> = props.into_iter().collect();
        for target in targets {
            for &(property, from, to) in &props {
                let seg = KeyframeSegment::new(target.clone(), property, from, to, at.clone(), duration)
                    .ease(ease);
                self.push(seg)?;
            }
        }
        Ok(self)
    }

    /// Tween every target to explicit values, starting from whatever was last declared.
    pub fn to<I>(
        mut self,
        targets: &[ElementId],
        at: impl Into<Anchor>,
        duration: f64,
        ease: Ease,
        props: I,
    ) -> ScrollweaveResult<Self>
    where
        I: IntoIterator<Item = (Property, PropertyValue)>,
    {
        let at = at.into();
        let props: Vec<_> = props.into_iter().collect();
        for target in targets {
            for &(property, to) in &props {
                let from = self.current_target(target, property);
                let seg = KeyframeSegment::new(target.clone(), property, from, to, at.clone(), duration)
                    .ease(ease);
                self.push(seg)?;
            }
        }
        Ok(self)
    }

    fn current_target(&self, element: &ElementId, property: Property) -> PropertyValue {
        self.last_target
            .get(&(element.clone(), property))
            .copied()
            .unwrap_or_else(|| self.plan.initial_value(element.as_str(), property))
    }

    fn require(&self, element: &str) -> ScrollweaveResult<()> {
        if self.plan.contains_element(element) {
            Ok(())
        } else {
            Err(ScrollweaveError::validation(format!(
                "unknown element '{element}'"
            )))
        }
    }

    fn push(&mut self, segment: KeyframeSegment) -> ScrollweaveResult<()> {
        self.require(segment.element.as_str())?;
        let key = (segment.element.clone(), segment.property);
        let to = segment.to;
        self.plan.add_keyframe(segment)?;
        self.last_target.insert(key, to);
        Ok(())
    }

    /// Finish the plan.
    pub fn build(self) -> ElementAnimationPlan {
        self.plan
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plan/builder.rs"]
mod tests;
