use std::collections::VecDeque;

use crate::animation::ease::Ease;
use crate::animation::value::Lerp;
use crate::foundation::error::{ScrollweaveError, ScrollweaveResult};

/// Supplies the normalized scroll progress for one animation frame.
///
/// Implementations own all input handling and smoothing; consumers only ever see the
/// resulting fraction. Values may transiently leave `[0, 1]` and are clamped downstream.
pub trait ProgressSource {
    /// Progress at wall-clock time `now` (seconds).
    fn progress(&mut self, now: f64) -> f64;
}

impl<S: ProgressSource + ?Sized> ProgressSource for &mut S {
    fn progress(&mut self, now: f64) -> f64 {
        (**self).progress(now)
    }
}

/// Scroll range over which the choreography is pinned, in pixels of raw scroll offset.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PinnedRegion {
    pub start: f64,
    pub distance: f64,
}

impl PinnedRegion {
    pub fn new(start: f64, distance: f64) -> ScrollweaveResult<Self> {
        if !start.is_finite() {
            return Err(ScrollweaveError::validation("pin start must be finite"));
        }
        if !distance.is_finite() || distance <= 0.0 {
            return Err(ScrollweaveError::validation(format!(
                "pin distance must be finite and > 0, got {distance}"
            )));
        }
        Ok(Self { start, distance })
    }

    pub fn end(&self) -> f64 {
        self.start + self.distance
    }

    /// Fraction of the region traversed at raw scroll `offset`, clamped to `[0, 1]`.
    pub fn progress_at(&self, offset: f64) -> f64 {
        let p = (offset - self.start) / self.distance;
        if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    Wheel,
    Touch,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SmoothScrollOptions {
    /// Seconds to settle on a new target.
    pub duration: f64,
    pub ease: Ease,
    pub wheel_multiplier: f64,
    pub touch_multiplier: f64,
    /// Largest reachable scroll offset.
    pub limit: f64,
}

impl Default for SmoothScrollOptions {
    fn default() -> Self {
        Self {
            duration: 1.2,
            ease: Ease::SmoothScroll,
            wheel_multiplier: 1.0,
            touch_multiplier: 2.0,
            limit: f64::MAX,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Glide {
    from: f64,
    // set on the first frame after the input
    started_at: Option<f64>,
}

/// Eases raw wheel/touch input into a displayed scroll offset and reports progress through a
/// [`PinnedRegion`].
#[derive(Clone, Debug)]
pub struct SmoothScroll {
    region: PinnedRegion,
    opts: SmoothScrollOptions,
    current: f64,
    target: f64,
    glide: Option<Glide>,
}

impl SmoothScroll {
    pub fn new(region: PinnedRegion, opts: SmoothScrollOptions) -> ScrollweaveResult<Self> {
        if !opts.duration.is_finite() || opts.duration < 0.0 {
            return Err(ScrollweaveError::validation(
                "smooth scroll duration must be finite and >= 0",
            ));
        }
        for (name, m) in [
            ("wheel", opts.wheel_multiplier),
            ("touch", opts.touch_multiplier),
        ] {
            if !m.is_finite() {
                return Err(ScrollweaveError::validation(format!(
                    "{name} multiplier must be finite"
                )));
            }
        }
        if opts.limit.is_nan() || opts.limit < 0.0 {
            return Err(ScrollweaveError::validation("scroll limit must be >= 0"));
        }
        Ok(Self {
            region,
            opts,
            current: 0.0,
            target: 0.0,
            glide: None,
        })
    }

    pub fn region(&self) -> PinnedRegion {
        self.region
    }

    pub fn options(&self) -> &SmoothScrollOptions {
        &self.opts
    }

    /// Displayed scroll offset as of the last frame.
    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_gliding(&self) -> bool {
        self.glide.is_some()
    }

    /// Feed a raw input delta in pixels.
    pub fn scroll_by(&mut self, delta: f64, kind: InputKind) {
        if !delta.is_finite() {
            return;
        }
        let multiplier = match kind {
            InputKind::Wheel => self.opts.wheel_multiplier,
            InputKind::Touch => self.opts.touch_multiplier,
        };
        self.glide_to(self.target + delta * multiplier);
    }

    /// Move to an absolute offset, either gliding or jumping immediately.
    pub fn scroll_to(&mut self, offset: f64, immediate: bool) {
        if !offset.is_finite() {
            return;
        }
        if immediate {
            self.target = offset.clamp(0.0, self.opts.limit);
            self.current = self.target;
            self.glide = None;
        } else {
            self.glide_to(offset);
        }
    }

    fn glide_to(&mut self, offset: f64) {
        self.target = offset.clamp(0.0, self.opts.limit);
        self.glide = Some(Glide {
            from: self.current,
            started_at: None,
        });
    }

    /// Advance the glide to wall-clock `now` and return the displayed offset.
    pub fn raf(&mut self, now: f64) -> f64 {
        let Some(glide) = self.glide.as_mut() else {
            return self.current;
        };
        let started_at = *glide.started_at.get_or_insert(now);
        let from = glide.from;
        let elapsed = now - started_at;
        if self.opts.duration <= 0.0 || elapsed >= self.opts.duration {
            self.current = self.target;
            self.glide = None;
            return self.current;
        }
        let t = (elapsed / self.opts.duration).max(0.0);
        self.current = f64::lerp(&from, &self.target, self.opts.ease.apply(t));
        self.current
    }
}

impl ProgressSource for SmoothScroll {
    fn progress(&mut self, now: f64) -> f64 {
        let offset = self.raf(now);
        self.region.progress_at(offset)
    }
}

/// Progress source that replays queued values, then repeats the last one.
#[derive(Clone, Debug, Default)]
pub struct ScriptedProgress {
    queue: VecDeque<f64>,
    last: f64,
    reads: usize,
}

impl ScriptedProgress {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            queue: values.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn push(&mut self, value: f64) {
        self.queue.push_back(value);
    }

    /// Number of times the source has been polled.
    pub fn reads(&self) -> usize {
        self.reads
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl ProgressSource for ScriptedProgress {
    fn progress(&mut self, _now: f64) -> f64 {
        self.reads += 1;
        if let Some(v) = self.queue.pop_front() {
            self.last = v;
        }
        self.last
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/progress.rs"]
mod tests;
