use crate::foundation::error::{ScrollweaveError, ScrollweaveResult};

/// Slack allowed when a marker is declared slightly before the furthest offset seen so far.
pub const OFFSET_TOLERANCE: f64 = 1e-9;

/// Named point on the choreography's internal duration axis.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhaseMarker {
    pub name: String,
    pub offset: f64,
}

/// Ordered set of phase markers.
///
/// Markers are appended in non-decreasing offset order; equal offsets express parallel phases.
/// A timeline is only ever built up front, then frozen inside an
/// [`ElementAnimationPlan`](crate::ElementAnimationPlan).
#[derive(Clone, Debug, Default)]
pub struct PhaseTimeline {
    markers: Vec<PhaseMarker>,
    max_offset: f64,
}

impl PhaseTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a timeline from markers in declaration order.
    pub fn from_markers<I, S>(markers: I) -> ScrollweaveResult<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut tl = Self::new();
        for (name, offset) in markers {
            tl.add_phase(name, offset)?;
        }
        Ok(tl)
    }

    /// Append a marker.
    ///
    /// Fails with [`ScrollweaveError::DuplicatePhase`] when the name exists and
    /// [`ScrollweaveError::PhaseOrder`] when `offset` precedes an earlier marker.
    pub fn add_phase(&mut self, name: impl Into<String>, offset: f64) -> ScrollweaveResult<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ScrollweaveError::validation("phase name must be non-empty"));
        }
        if !offset.is_finite() || offset < 0.0 {
            return Err(ScrollweaveError::validation(format!(
                "phase '{name}' offset must be finite and >= 0 (got {offset})"
            )));
        }
        if self.markers.iter().any(|m| m.name == name) {
            return Err(ScrollweaveError::DuplicatePhase { name });
        }
        if !self.markers.is_empty() && offset < self.max_offset - OFFSET_TOLERANCE {
            return Err(ScrollweaveError::PhaseOrder {
                name,
                offset,
                previous: self.max_offset,
            });
        }

        self.max_offset = self.max_offset.max(offset);
        self.markers.push(PhaseMarker { name, offset });
        Ok(())
    }

    /// Builder-style [`PhaseTimeline::add_phase`].
    pub fn phase(mut self, name: impl Into<String>, offset: f64) -> ScrollweaveResult<Self> {
        self.add_phase(name, offset)?;
        Ok(self)
    }

    /// Offset of marker `name`.
    pub fn resolve(&self, name: &str) -> ScrollweaveResult<f64> {
        self.get(name)
            .map(|m| m.offset)
            .ok_or_else(|| ScrollweaveError::unknown_phase(name))
    }

    pub fn get(&self, name: &str) -> Option<&PhaseMarker> {
        self.markers.iter().find(|m| m.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Markers in declaration order.
    pub fn markers(&self) -> &[PhaseMarker] {
        &self.markers
    }

    /// Largest declared offset, `0.0` for an empty timeline.
    pub fn max_offset(&self) -> f64 {
        self.max_offset
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/phase.rs"]
mod tests;
