use std::{fmt, str::FromStr};

use crate::animation::ease::Ease;
use crate::animation::value::{Property, PropertyValue};
use crate::foundation::core::ElementId;
use crate::foundation::error::{ScrollweaveError, ScrollweaveResult};

/// Start position of a segment: a phase marker plus a relative offset.
///
/// Written `"marker"`, `"marker+=0.1"` or `"marker-=0.1"` in configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Anchor {
    pub marker: String,
    pub offset: f64,
}

impl Anchor {
    pub fn at(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            offset: 0.0,
        }
    }

    /// Shift the anchor by `delta` along the duration axis.
    pub fn plus(mut self, delta: f64) -> Self {
        self.offset += delta;
        self
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.offset == 0.0 {
            f.write_str(&self.marker)
        } else if self.offset > 0.0 {
            write!(f, "{}+={}", self.marker, self.offset)
        } else {
            write!(f, "{}-={}", self.marker, -self.offset)
        }
    }
}

impl FromStr for Anchor {
    type Err = ScrollweaveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parse_delta = |d: &str| {
            d.trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ScrollweaveError::validation(format!("malformed anchor \"{s}\"")))
        };

        let (marker, offset) = if let Some((m, d)) = s.split_once("+=") {
            (m, parse_delta(d)?)
        } else if let Some((m, d)) = s.split_once("-=") {
            (m, -parse_delta(d)?)
        } else {
            (s, 0.0)
        };
        let marker = marker.trim();
        if marker.is_empty() {
            return Err(ScrollweaveError::validation(format!(
                "anchor \"{s}\" names no phase"
            )));
        }
        Ok(Self {
            marker: marker.to_string(),
            offset,
        })
    }
}

impl TryFrom<String> for Anchor {
    type Error = ScrollweaveError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Anchor> for String {
    fn from(value: Anchor) -> Self {
        value.to_string()
    }
}

impl From<&str> for Anchor {
    fn from(value: &str) -> Self {
        Self::at(value)
    }
}

/// Interpolation of one element property over a window anchored to a phase marker.
///
/// The window is `[marker + offset, marker + offset + duration]` on the shared duration axis.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KeyframeSegment {
    pub element: ElementId,
    pub property: Property,
    pub from: PropertyValue,
    pub to: PropertyValue,
    pub start_marker: String,
    #[serde(default)]
    pub offset: f64,
    pub duration: f64,
    #[serde(default)]
    pub ease: Ease,
}

impl KeyframeSegment {
    pub fn new(
        element: impl Into<ElementId>,
        property: Property,
        from: impl Into<PropertyValue>,
        to: impl Into<PropertyValue>,
        start: impl Into<Anchor>,
        duration: f64,
    ) -> Self {
        let start = start.into();
        Self {
            element: element.into(),
            property,
            from: from.into(),
            to: to.into(),
            start_marker: start.marker,
            offset: start.offset,
            duration,
            ease: Ease::default(),
        }
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn anchor(&self) -> Anchor {
        Anchor {
            marker: self.start_marker.clone(),
            offset: self.offset,
        }
    }

    pub(crate) fn validate(&self) -> ScrollweaveResult<()> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(ScrollweaveError::validation(format!(
                "segment {}.{} duration must be finite and >= 0 (got {})",
                self.element, self.property, self.duration
            )));
        }
        if !self.offset.is_finite() {
            return Err(ScrollweaveError::validation(format!(
                "segment {}.{} offset must be finite",
                self.element, self.property
            )));
        }
        self.property.validate_value(&self.from)?;
        self.property.validate_value(&self.to)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plan/segment.rs"]
mod tests;
