use std::{collections::BTreeMap, fmt};

use crate::foundation::core::Rgba8;
use crate::foundation::error::{ScrollweaveError, ScrollweaveResult};

/// Interpolation contract for animatable value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with factor `t`; `t` may leave `[0, 1]` for overshooting eases.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Rgba8 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        }
    }
}

/// Animatable property of a managed element.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Property {
    /// Horizontal offset in pixels.
    X,
    /// Vertical offset in pixels (viewport units are resolved at build time).
    Y,
    /// Uniform scale factor, `>= 0`.
    Scale,
    /// Opacity in `[0, 1]`.
    Opacity,
    BackgroundColor,
    /// Foreground (text/glyph) colour.
    Color,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Scalar,
    Color,
}

impl Property {
    pub const ALL: [Property; 6] = [
        Self::X,
        Self::Y,
        Self::Scale,
        Self::Opacity,
        Self::BackgroundColor,
        Self::Color,
    ];

    pub fn kind(self) -> ValueKind {
        match self {
            Self::X | Self::Y | Self::Scale | Self::Opacity => ValueKind::Scalar,
            Self::BackgroundColor | Self::Color => ValueKind::Color,
        }
    }

    /// Value an element has when nothing was declared for this property.
    pub fn default_value(self) -> PropertyValue {
        match self {
            Self::X | Self::Y => PropertyValue::Scalar(0.0),
            Self::Scale | Self::Opacity => PropertyValue::Scalar(1.0),
            Self::BackgroundColor => PropertyValue::Color(Rgba8::transparent()),
            Self::Color => PropertyValue::Color(Rgba8::rgb(0, 0, 0)),
        }
    }

    /// Pull an out-of-domain runtime value back into range: opacity into `[0, 1]`, scale to
    /// `>= 0`. Overshooting eases produce such values.
    pub fn clamp_value(self, value: PropertyValue) -> PropertyValue {
        match (self, value) {
            (Self::Opacity, PropertyValue::Scalar(v)) => PropertyValue::Scalar(v.clamp(0.0, 1.0)),
            (Self::Scale, PropertyValue::Scalar(v)) => PropertyValue::Scalar(v.max(0.0)),
            _ => value,
        }
    }

    /// Check that `value` has the right kind and lies in the property's domain.
    pub fn validate_value(self, value: &PropertyValue) -> ScrollweaveResult<()> {
        match (self.kind(), value) {
            (ValueKind::Scalar, PropertyValue::Scalar(v)) => {
                if !v.is_finite() {
                    return Err(ScrollweaveError::validation(format!(
                        "{self} value must be finite"
                    )));
                }
                match self {
                    Self::Scale if *v < 0.0 => Err(ScrollweaveError::validation(format!(
                        "scale must be >= 0 (got {v})"
                    ))),
                    Self::Opacity if !(0.0..=1.0).contains(v) => Err(
                        ScrollweaveError::validation(format!("opacity must be in [0, 1] (got {v})")),
                    ),
                    _ => Ok(()),
                }
            }
            (ValueKind::Color, PropertyValue::Color(_)) => Ok(()),
            _ => Err(ScrollweaveError::validation(format!(
                "{self} does not accept value {value}"
            ))),
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Scale => "scale",
            Self::Opacity => "opacity",
            Self::BackgroundColor => "backgroundColor",
            Self::Color => "color",
        };
        f.write_str(s)
    }
}

/// A concrete property value.
///
/// Serialized untagged: scalars as JSON numbers, colours as `"#rrggbb[aa]"` strings.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Scalar(f64),
    Color(Rgba8),
}

impl PropertyValue {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            Self::Color(_) => None,
        }
    }

    pub fn as_color(&self) -> Option<Rgba8> {
        match self {
            Self::Color(c) => Some(*c),
            Self::Scalar(_) => None,
        }
    }
}

impl Lerp for PropertyValue {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        match (a, b) {
            (Self::Scalar(a), Self::Scalar(b)) => Self::Scalar(f64::lerp(a, b, t)),
            (Self::Color(a), Self::Color(b)) => Self::Color(Rgba8::lerp(a, b, t)),
            // mixed kinds are rejected at build time; step at the end of the window
            _ => {
                if t >= 1.0 {
                    *b
                } else {
                    *a
                }
            }
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(v) => write!(f, "{v}"),
            Self::Color(c) => write!(f, "{c}"),
        }
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<Rgba8> for PropertyValue {
    fn from(value: Rgba8) -> Self {
        Self::Color(value)
    }
}

/// Property snapshot of one element, ordered by property for stable output.
pub type PropertyBag = BTreeMap<Property, PropertyValue>;

#[cfg(test)]
#[path = "../../tests/unit/animation/value.rs"]
mod tests;
