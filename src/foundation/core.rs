use std::{borrow::Borrow, fmt, str::FromStr};

use crate::foundation::error::{ScrollweaveError, ScrollweaveResult};

pub use kurbo::Vec2;

/// Stable identifier of a managed element.
///
/// The engine only ever addresses elements by id; concrete view handles live behind the
/// binding layer.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Build an id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive a child id (`"{self}.{suffix}"`), used for split text units and badges.
    pub fn child(&self, suffix: impl fmt::Display) -> Self {
        Self(format!("{}.{suffix}", self.0))
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ElementId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for ElementId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Straight (non-premultiplied) RGBA8 colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn transparent() -> Self {
        Self::rgba(0, 0, 0, 0)
    }

    /// Replace alpha with a unit-interval opacity (`rgba(0, 0, 0, 0.9)` style).
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    pub fn alpha_f64(self) -> f64 {
        f64::from(self.a) / 255.0
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> ScrollweaveResult<Self> {
        let hex = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| ScrollweaveError::validation(format!("colour '{s}' must start with '#'")))?;
        if !hex.is_ascii() {
            return Err(ScrollweaveError::validation(format!("colour '{s}' is not hex")));
        }

        fn nibble(s: &str, c: u8) -> ScrollweaveResult<u8> {
            (c as char)
                .to_digit(16)
                .map(|d| d as u8)
                .ok_or_else(|| ScrollweaveError::validation(format!("colour '{s}' is not hex")))
        }
        fn byte(s: &str, hi: u8, lo: u8) -> ScrollweaveResult<u8> {
            Ok(nibble(s, hi)? << 4 | nibble(s, lo)?)
        }

        let b = hex.as_bytes();
        match b.len() {
            3 => {
                let r = nibble(s, b[0])?;
                let g = nibble(s, b[1])?;
                let bl = nibble(s, b[2])?;
                Ok(Self::rgb(r * 17, g * 17, bl * 17))
            }
            6 => Ok(Self::rgb(
                byte(s, b[0], b[1])?,
                byte(s, b[2], b[3])?,
                byte(s, b[4], b[5])?,
            )),
            8 => Ok(Self::rgba(
                byte(s, b[0], b[1])?,
                byte(s, b[2], b[3])?,
                byte(s, b[4], b[5])?,
                byte(s, b[6], b[7])?,
            )),
            _ => Err(ScrollweaveError::validation(format!(
                "colour '{s}' must have 3, 6 or 8 hex digits"
            ))),
        }
    }
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "#{:02x}{:02x}{:02x}{:02x}",
                self.r, self.g, self.b, self.a
            )
        }
    }
}

impl FromStr for Rgba8 {
    type Err = ScrollweaveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Rgba8 {
    type Error = ScrollweaveError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Rgba8> for String {
    fn from(value: Rgba8) -> Self {
        value.to_string()
    }
}

/// Viewport size used to resolve viewport-relative lengths into pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1440.0,
            height: 900.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> ScrollweaveResult<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(ScrollweaveError::validation(
                "viewport width and height must be finite and > 0",
            ));
        }
        Ok(Self { width, height })
    }

    /// `v` percent of the viewport height, in pixels.
    pub fn vh(self, v: f64) -> f64 {
        self.height * v / 100.0
    }

    /// `v` percent of the viewport width, in pixels.
    pub fn vw(self, v: f64) -> f64 {
        self.width * v / 100.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
