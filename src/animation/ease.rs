use std::{f64::consts::TAU, fmt, str::FromStr};

use crate::foundation::error::{ScrollweaveError, ScrollweaveResult};

/// Easing curves, named after the `power<N>.<dir>` family used by web animation tooling.
///
/// `power1` is quadratic, `power2` cubic, `power3` quartic and `power4` quintic.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Ease {
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InQuart,
    OutQuart,
    InOutQuart,
    InQuint,
    OutQuint,
    InOutQuint,
    OutExpo,
    /// `min(1, 1.001 - 2^(-10t))`, the inertia curve used by smooth-scroll sources.
    SmoothScroll,
    /// Decaying sine overshoot. Not monotonic: values exceed 1 before settling.
    OutElastic {
        amplitude: f64,
        period: f64,
    },
}

impl Default for Ease {
    /// `power1.out`, the default for segments that do not name an ease.
    fn default() -> Self {
        Self::OutQuad
    }
}

impl Ease {
    pub const fn elastic_out(amplitude: f64, period: f64) -> Self {
        Self::OutElastic { amplitude, period }
    }

    /// Map normalized time `t` (clamped to `[0, 1]`) to eased progress.
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::InQuad => power_in(t, 2),
            Self::OutQuad => power_out(t, 2),
            Self::InOutQuad => power_in_out(t, 2),
            Self::InCubic => power_in(t, 3),
            Self::OutCubic => power_out(t, 3),
            Self::InOutCubic => power_in_out(t, 3),
            Self::InQuart => power_in(t, 4),
            Self::OutQuart => power_out(t, 4),
            Self::InOutQuart => power_in_out(t, 4),
            Self::InQuint => power_in(t, 5),
            Self::OutQuint => power_out(t, 5),
            Self::InOutQuint => power_in_out(t, 5),
            Self::OutExpo => {
                if t == 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
            Self::SmoothScroll => (1.001 - 2f64.powf(-10.0 * t)).min(1.0),
            Self::OutElastic { amplitude, period } => elastic_out(t, amplitude, period),
        }
    }

    /// `false` for curves that overshoot their target before settling.
    pub fn is_monotonic(self) -> bool {
        !matches!(self, Self::OutElastic { .. })
    }
}

fn power_in(t: f64, n: i32) -> f64 {
    t.powi(n)
}

fn power_out(t: f64, n: i32) -> f64 {
    1.0 - (1.0 - t).powi(n)
}

fn power_in_out(t: f64, n: i32) -> f64 {
    if t < 0.5 {
        2f64.powi(n - 1) * t.powi(n)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(n) / 2.0
    }
}

fn elastic_out(t: f64, amplitude: f64, period: f64) -> f64 {
    if t == 0.0 || t == 1.0 {
        return t;
    }
    // amplitude below 1 stretches the period instead of shrinking the swing
    let a = amplitude.max(1.0);
    let p = period / amplitude.clamp(f64::MIN_POSITIVE, 1.0);
    let s = p / TAU * (1.0 / a).asin();
    a * 2f64.powf(-10.0 * t) * ((t - s) * TAU / p).sin() + 1.0
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Linear => "none",
            Self::InQuad => "power1.in",
            Self::OutQuad => "power1.out",
            Self::InOutQuad => "power1.inOut",
            Self::InCubic => "power2.in",
            Self::OutCubic => "power2.out",
            Self::InOutCubic => "power2.inOut",
            Self::InQuart => "power3.in",
            Self::OutQuart => "power3.out",
            Self::InOutQuart => "power3.inOut",
            Self::InQuint => "power4.in",
            Self::OutQuint => "power4.out",
            Self::InOutQuint => "power4.inOut",
            Self::OutExpo => "expo.out",
            Self::SmoothScroll => "smoothScroll",
            Self::OutElastic { amplitude, period } => {
                return write!(f, "elastic.out({amplitude}, {period})");
            }
        };
        f.write_str(s)
    }
}

impl FromStr for Ease {
    type Err = ScrollweaveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(rest) = s.strip_prefix("elastic.out") {
            return parse_elastic(s, rest);
        }

        let (family, dir) = s.split_once('.').unwrap_or((s, "out"));
        let ease = match (family, dir) {
            ("none" | "linear" | "power0", _) => Self::Linear,
            ("power1" | "quad", "in") => Self::InQuad,
            ("power1" | "quad", "out") => Self::OutQuad,
            ("power1" | "quad", "inOut") => Self::InOutQuad,
            ("power2" | "cubic", "in") => Self::InCubic,
            ("power2" | "cubic", "out") => Self::OutCubic,
            ("power2" | "cubic", "inOut") => Self::InOutCubic,
            ("power3" | "quart", "in") => Self::InQuart,
            ("power3" | "quart", "out") => Self::OutQuart,
            ("power3" | "quart", "inOut") => Self::InOutQuart,
            ("power4" | "quint", "in") => Self::InQuint,
            ("power4" | "quint", "out") => Self::OutQuint,
            ("power4" | "quint", "inOut") => Self::InOutQuint,
            ("expo", "out") => Self::OutExpo,
            ("smoothScroll", _) => Self::SmoothScroll,
            _ => {
                return Err(ScrollweaveError::validation(format!("unknown ease \"{s}\"")));
            }
        };
        Ok(ease)
    }
}

fn parse_elastic(full: &str, rest: &str) -> ScrollweaveResult<Ease> {
    let rest = rest.trim();
    if rest.is_empty() {
        return Ok(Ease::elastic_out(1.0, 0.3));
    }
    let args = rest
        .strip_prefix('(')
        .and_then(|r| r.strip_suffix(')'))
        .ok_or_else(|| ScrollweaveError::validation(format!("malformed ease \"{full}\"")))?;

    let mut nums = args.split(',').map(|p| p.trim().parse::<f64>());
    let amplitude = match nums.next() {
        Some(Ok(v)) => v,
        _ => return Err(ScrollweaveError::validation(format!("malformed ease \"{full}\""))),
    };
    let period = match nums.next() {
        Some(Ok(v)) => v,
        None => 0.3,
        Some(Err(_)) => {
            return Err(ScrollweaveError::validation(format!("malformed ease \"{full}\"")));
        }
    };
    if nums.next().is_some() || amplitude <= 0.0 || period <= 0.0 {
        return Err(ScrollweaveError::validation(format!(
            "elastic ease \"{full}\" needs a positive amplitude and period"
        )));
    }
    Ok(Ease::elastic_out(amplitude, period))
}

impl TryFrom<String> for Ease {
    type Error = ScrollweaveError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Ease> for String {
    fn from(value: Ease) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
