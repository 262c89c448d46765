use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::animation::ease::Ease;
use crate::animation::value::{Property, PropertyValue, ValueKind};
use crate::foundation::core::{ElementId, Rgba8, Viewport};
use crate::foundation::error::{ScrollweaveError, ScrollweaveResult};
use crate::plan::segment::Anchor;
use crate::scene::text::SplitMode;
use crate::timeline::phase::PhaseMarker;

/// JSON-facing description of a complete choreography.
///
/// Nothing here is validated until [`ChoreographyDef::build`] runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChoreographyDef {
    #[serde(default)]
    pub viewport: Viewport,
    pub phases: Vec<PhaseMarker>,
    #[serde(default)]
    pub elements: Vec<ElementDef>,
    #[serde(default)]
    pub badges: Vec<BadgeDescriptor>,
    #[serde(default)]
    pub texts: Vec<TextBlockDef>,
    #[serde(default)]
    pub steps: Vec<StepDef>,
    #[serde(default)]
    pub entries: Vec<EntryDef>,
}

impl ChoreographyDef {
    /// Parse a choreography from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ScrollweaveResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ScrollweaveError::serde(format!("parse choreography JSON: {e}")))
    }

    /// Parse a choreography from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ScrollweaveResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ScrollweaveError::serde(format!("open choreography JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn to_json_pretty(&self) -> ScrollweaveResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ScrollweaveError::serde(format!("serialize choreography: {e}")))
    }
}

/// A value as authored: a bare number, or a string carrying a unit (`px`, `vh`, `vw`) or a hex
/// colour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueDef {
    Number(f64),
    Text(String),
}

impl ValueDef {
    /// Resolve against `property` and the viewport into a validated runtime value.
    pub fn resolve(&self, property: Property, viewport: Viewport) -> ScrollweaveResult<PropertyValue> {
        let value = match (property.kind(), self) {
            (ValueKind::Scalar, Self::Number(v)) => PropertyValue::Scalar(*v),
            (ValueKind::Scalar, Self::Text(s)) => PropertyValue::Scalar(parse_length(s, viewport)?),
            (ValueKind::Color, Self::Text(s)) => PropertyValue::Color(s.parse::<Rgba8>()?),
            (ValueKind::Color, Self::Number(v)) => {
                return Err(ScrollweaveError::validation(format!(
                    "{property} expects a colour, got {v}"
                )));
            }
        };
        property.validate_value(&value)?;
        Ok(value)
    }
}

impl From<f64> for ValueDef {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for ValueDef {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<Rgba8> for ValueDef {
    fn from(c: Rgba8) -> Self {
        Self::Text(c.to_string())
    }
}

fn parse_length(s: &str, viewport: Viewport) -> ScrollweaveResult<f64> {
    let s = s.trim();
    let number = |n: &str| {
        n.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ScrollweaveError::validation(format!("malformed length \"{s}\"")))
    };
    if let Some(n) = s.strip_suffix("vh") {
        Ok(viewport.vh(number(n)?))
    } else if let Some(n) = s.strip_suffix("vw") {
        Ok(viewport.vw(number(n)?))
    } else if let Some(n) = s.strip_suffix("px") {
        number(n)
    } else {
        number(s)
    }
}

/// Per-property values keyed by camelCase property name.
pub type PropsDef = BTreeMap<Property, ValueDef>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementDef {
    pub id: ElementId,
    #[serde(default)]
    pub initial: PropsDef,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeShape {
    Circle,
    Square,
    Hexagon,
}

/// Static description of one badge. The badge colour becomes its initial background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeDescriptor {
    pub id: ElementId,
    pub color: Rgba8,
    pub shape: BadgeShape,
    pub glyph: String,
}

/// A text literal split into units addressed as `<id>.<index>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBlockDef {
    pub id: ElementId,
    pub text: String,
    #[serde(default)]
    pub split: SplitMode,
}

/// One authored timeline step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepDef {
    Tween(TweenDef),
    Layout(LayoutDef),
    TextReveal(TextRevealDef),
}

/// Tween one or more targets. Target patterns ending in `.*` expand to every known element with
/// that prefix, in declaration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TweenDef {
    pub targets: Vec<String>,
    pub at: Anchor,
    /// Added to the anchor offset per target index.
    #[serde(default)]
    pub stagger: f64,
    pub duration: f64,
    #[serde(default)]
    pub ease: Ease,
    /// Explicit start values; properties missing here continue from their last target.
    #[serde(default)]
    pub from: PropsDef,
    pub to: PropsDef,
}

/// Explicit per-element final placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutDef {
    pub at: Anchor,
    pub duration: f64,
    #[serde(default)]
    pub ease: Ease,
    pub targets: Vec<LayoutTargetDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutTargetDef {
    pub element: ElementId,
    pub x: ValueDef,
    pub y: ValueDef,
    pub scale: f64,
}

/// Slide every unit of a text block in from its side while fading and recolouring it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextRevealDef {
    pub block: ElementId,
    pub at: Anchor,
    #[serde(default)]
    pub stagger: f64,
    pub duration: f64,
    #[serde(default)]
    pub ease: Ease,
    /// Horizontal start distance in pixels.
    pub distance: f64,
    pub from_color: Rgba8,
    pub to_color: Rgba8,
}

/// Entry animations for one or more targets, scheduled in seconds after mount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryDef {
    pub targets: Vec<String>,
    #[serde(default)]
    pub delay: f64,
    #[serde(default)]
    pub stagger: f64,
    pub duration: f64,
    #[serde(default)]
    pub ease: Ease,
    /// Missing start values fall back to the element's initial value.
    #[serde(default)]
    pub from: PropsDef,
    pub to: PropsDef,
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
