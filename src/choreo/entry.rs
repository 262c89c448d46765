use crate::animation::ease::Ease;
use crate::animation::value::{Lerp, Property, PropertyValue};
use crate::foundation::core::ElementId;
use crate::foundation::error::{ScrollweaveError, ScrollweaveResult};

/// One-shot, wall-clock scheduled animation that runs once per mount.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EntryAnimation {
    pub element: ElementId,
    pub property: Property,
    pub from: PropertyValue,
    pub to: PropertyValue,
    /// Seconds after mount before the animation starts.
    pub delay: f64,
    /// Seconds.
    pub duration: f64,
    pub ease: Ease,
}

impl EntryAnimation {
    fn validate(&self) -> ScrollweaveResult<()> {
        if !self.delay.is_finite() || self.delay < 0.0 {
            return Err(ScrollweaveError::validation(format!(
                "entry {}.{} delay must be finite and >= 0",
                self.element, self.property
            )));
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(ScrollweaveError::validation(format!(
                "entry {}.{} duration must be finite and >= 0",
                self.element, self.property
            )));
        }
        self.property.validate_value(&self.from)?;
        self.property.validate_value(&self.to)
    }

    fn sample(&self, elapsed: f64) -> PropertyValue {
        if elapsed >= self.duration {
            return self.to;
        }
        if elapsed <= 0.0 {
            return self.from;
        }
        let t = elapsed / self.duration;
        PropertyValue::lerp(&self.from, &self.to, self.ease.apply(t))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum EntryStatus {
    /// Waiting for its delay to elapse.
    Pending,
    Running,
    Done,
    Cancelled,
}

/// Property write produced by the entry schedule for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct EntryWrite {
    pub element: ElementId,
    pub property: Property,
    pub value: PropertyValue,
}

/// Fixed delay/duration table of entry animations.
///
/// The schedule starts once; after every animation has completed or been cancelled it never
/// writes again.
#[derive(Clone, Debug, Default)]
pub struct EntrySchedule {
    entries: Vec<EntryAnimation>,
    status: Vec<EntryStatus>,
    started_at: Option<f64>,
}

impl EntrySchedule {
    pub fn new(entries: Vec<EntryAnimation>) -> ScrollweaveResult<Self> {
        for e in &entries {
            e.validate()?;
        }
        let status = vec![EntryStatus::Pending; entries.len()];
        Ok(Self {
            entries,
            status,
            started_at: None,
        })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[EntryAnimation] {
        &self.entries
    }

    pub fn status(&self) -> &[EntryStatus] {
        &self.status
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// `true` when at least one entry writes `element.property`.
    pub fn owns(&self, element: &str, property: Property) -> bool {
        self.entries
            .iter()
            .any(|e| e.element.as_str() == element && e.property == property)
    }

    /// Value written to `element.property` before any entry has started, if an entry owns it.
    ///
    /// The earliest-starting entry wins so staggered entries reveal in order.
    pub fn start_value(&self, element: &str, property: Property) -> Option<PropertyValue> {
        self.entries
            .iter()
            .filter(|e| e.element.as_str() == element && e.property == property)
            .min_by(|a, b| a.delay.total_cmp(&b.delay))
            .map(|e| e.from)
    }

    /// Start the wall clock. An already started schedule cannot be re-triggered.
    pub fn start(&mut self, now: f64) -> ScrollweaveResult<()> {
        if self.started_at.is_some() {
            return Err(ScrollweaveError::lifecycle(
                "entry animations already started for this mount",
            ));
        }
        if !now.is_finite() {
            return Err(ScrollweaveError::lifecycle("entry start time must be finite"));
        }
        self.started_at = Some(now);
        Ok(())
    }

    /// Advance to wall-clock time `now` and collect the writes for this frame.
    ///
    /// Running entries write their eased value; completed entries emit their final value
    /// exactly once.
    pub fn advance(&mut self, now: f64) -> Vec<EntryWrite> {
        let Some(started_at) = self.started_at else {
            return Vec::new();
        };
        let mut writes = Vec::new();
        for (entry, status) in self.entries.iter().zip(self.status.iter_mut()) {
            if matches!(status, EntryStatus::Done | EntryStatus::Cancelled) {
                continue;
            }
            let elapsed = now - started_at - entry.delay;
            // pending entries keep the start value written at mount
            if elapsed < 0.0 {
                continue;
            }
            *status = if elapsed >= entry.duration {
                EntryStatus::Done
            } else {
                EntryStatus::Running
            };
            writes.push(EntryWrite {
                element: entry.element.clone(),
                property: entry.property,
                value: entry.sample(elapsed),
            });
        }
        writes
    }

    /// Cancel everything still pending or running.
    pub fn cancel(&mut self) -> usize {
        let mut cancelled = 0;
        for status in &mut self.status {
            if matches!(status, EntryStatus::Pending | EntryStatus::Running) {
                *status = EntryStatus::Cancelled;
                cancelled += 1;
            }
        }
        cancelled
    }

    /// Entries that would still write on a later frame.
    pub fn in_flight(&self) -> usize {
        self.status
            .iter()
            .filter(|s| matches!(s, EntryStatus::Pending | EntryStatus::Running))
            .count()
    }

    pub fn is_finished(&self) -> bool {
        self.in_flight() == 0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/choreo/entry.rs"]
mod tests;
