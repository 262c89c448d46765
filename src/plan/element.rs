use std::collections::BTreeMap;

use crate::animation::value::{Lerp, Property, PropertyBag, PropertyValue};
use crate::foundation::core::ElementId;
use crate::foundation::error::{ScrollweaveError, ScrollweaveResult};
use crate::plan::segment::KeyframeSegment;
use crate::timeline::phase::PhaseTimeline;

/// Segment with its window resolved against the timeline.
#[derive(Clone, Debug)]
pub(crate) struct ResolvedSegment {
    pub(crate) segment: KeyframeSegment,
    pub(crate) start: f64,
    pub(crate) end: f64,
    // declaration index within its property track
    pub(crate) seq: usize,
}

impl ResolvedSegment {
    /// Contribution at `position`, or `None` while the window has not opened.
    fn is_open(&self, position: f64) -> bool {
        position >= self.start && position < self.end
    }

    fn sample(&self, position: f64) -> Option<PropertyValue> {
        let seg = &self.segment;
        if position < self.start {
            return None;
        }
        if position >= self.end {
            return Some(seg.to);
        }
        let t = ((position - self.start) / seg.duration).clamp(0.0, 1.0);
        Some(PropertyValue::lerp(&seg.from, &seg.to, seg.ease.apply(t)))
    }
}

#[derive(Clone, Debug, Default)]
struct ElementTracks {
    initial: PropertyBag,
    // start order within each property, declaration order among equal starts
    tracks: BTreeMap<Property, Vec<ResolvedSegment>>,
}

/// Keyframe segments of every managed element, bound to one [`PhaseTimeline`].
///
/// The plan is a pure function of the position on the duration axis: evaluating never mutates
/// it and never fails.
#[derive(Clone, Debug)]
pub struct ElementAnimationPlan {
    timeline: PhaseTimeline,
    elements: BTreeMap<ElementId, ElementTracks>,
    order: Vec<ElementId>,
    total_span: f64,
}

impl ElementAnimationPlan {
    pub fn new(timeline: PhaseTimeline) -> Self {
        let total_span = timeline.max_offset();
        Self {
            timeline,
            elements: BTreeMap::new(),
            order: Vec::new(),
            total_span,
        }
    }

    pub fn timeline(&self) -> &PhaseTimeline {
        &self.timeline
    }

    /// End of the last segment window, or the furthest marker if that lies beyond it.
    pub fn total_span(&self) -> f64 {
        self.total_span
    }

    /// Managed elements in registration order.
    pub fn elements(&self) -> &[ElementId] {
        &self.order
    }

    pub fn contains_element(&self, element: &str) -> bool {
        self.elements.contains_key(element)
    }

    /// Add `element` to the managed set. Registering twice is a no-op.
    pub fn register_element(&mut self, element: impl Into<ElementId>) {
        let element = element.into();
        if !self.elements.contains_key(&element) {
            self.order.push(element.clone());
            self.elements.insert(element, ElementTracks::default());
        }
    }

    /// Declare the value a property holds before any segment writes it.
    pub fn set_initial(
        &mut self,
        element: impl Into<ElementId>,
        property: Property,
        value: impl Into<PropertyValue>,
    ) -> ScrollweaveResult<()> {
        let element = element.into();
        let value = value.into();
        property.validate_value(&value).map_err(|e| {
            ScrollweaveError::validation(format!("initial {element}.{property}: {e}"))
        })?;
        self.register_element(element.clone());
        if let Some(tracks) = self.elements.get_mut(&element) {
            tracks.initial.insert(property, value);
        }
        Ok(())
    }

    /// Append a segment after validating it against the bound timeline.
    pub fn add_keyframe(&mut self, segment: KeyframeSegment) -> ScrollweaveResult<()> {
        let marker = self.timeline.resolve(&segment.start_marker)?;
        segment.validate()?;

        let start = marker + segment.offset;
        if start < 0.0 {
            return Err(ScrollweaveError::validation(format!(
                "segment {}.{} starts before the timeline origin ({start})",
                segment.element, segment.property
            )));
        }
        let end = start + segment.duration;

        self.register_element(segment.element.clone());
        self.total_span = self.total_span.max(end);
        if let Some(tracks) = self.elements.get_mut(&segment.element) {
            let track = tracks.tracks.entry(segment.property).or_default();
            // after every segment starting at or before `start`, so ties keep declaration order
            let seq = track.len();
            let at = track.partition_point(|s| s.start <= start);
            track.insert(
                at,
                ResolvedSegment {
                    segment,
                    start,
                    end,
                    seq,
                },
            );
        }
        Ok(())
    }

    /// Declared initial value, falling back to the property default.
    pub fn initial_value(&self, element: &str, property: Property) -> PropertyValue {
        self.elements
            .get(element)
            .and_then(|t| t.initial.get(&property))
            .copied()
            .unwrap_or_else(|| property.default_value())
    }

    /// `true` when at least one segment writes `element.property`.
    pub fn animates(&self, element: &str, property: Property) -> bool {
        self.elements
            .get(element)
            .is_some_and(|t| t.tracks.get(&property).is_some_and(|s| !s.is_empty()))
    }

    /// Properties with an initial value or a segment, in property order.
    pub fn properties_of(&self, element: &str) -> Vec<Property> {
        let Some(tracks) = self.elements.get(element) else {
            return Vec::new();
        };
        let mut props: Vec<Property> = tracks
            .initial
            .keys()
            .chain(tracks.tracks.keys())
            .copied()
            .collect();
        props.sort();
        props.dedup();
        props
    }

    /// Segment windows `(start, end)` for one property in start order.
    pub fn windows(&self, element: &str, property: Property) -> Vec<(f64, f64)> {
        self.segments(element, property)
            .iter()
            .map(|s| (s.start, s.end))
            .collect()
    }

    fn segments(&self, element: &str, property: Property) -> &[ResolvedSegment] {
        self.elements
            .get(element)
            .and_then(|t| t.tracks.get(&property))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Value of `element.property` at `position` on the duration axis.
    ///
    /// Segments are folded by window start, declaration order breaking ties. Before the first
    /// window opens the first segment's `from` holds. An open window contributes the eased
    /// interpolation and a closed window holds `to` until a later-starting segment writes.
    /// While several windows are open at once the most recently declared one wins.
    pub fn evaluate(&self, element: &str, property: Property, position: f64) -> PropertyValue {
        let segments = self.segments(element, property);
        let Some(first) = segments.first() else {
            return self.initial_value(element, property);
        };
        let mut value = first.segment.from;
        let mut open_seq: Option<usize> = None;
        for seg in segments {
            let Some(v) = seg.sample(position) else {
                break;
            };
            let open = seg.is_open(position);
            if open && open_seq.is_some_and(|seq| seq > seg.seq) {
                continue;
            }
            value = v;
            open_seq = open.then_some(seg.seq);
        }
        value
    }

    /// Evaluate every property of `element`.
    pub fn evaluate_element(&self, element: &str, position: f64) -> PropertyBag {
        self.properties_of(element)
            .into_iter()
            .map(|p| (p, self.evaluate(element, p, position)))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plan/element.rs"]
mod tests;
