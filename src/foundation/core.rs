use crate::foundation::error::{SceneError, SceneResult};

pub use kurbo::{Point, Vec2};

/// Scene times are kept at millisecond resolution so that JSON output is byte-stable.
pub fn round_time(t: f64) -> f64 {
    (t * 1000.0).round() / 1000.0
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas with non-zero dimensions.
    pub fn new(width: u32, height: u32) -> SceneResult<Self> {
        let canvas = Self { width, height };
        canvas.validate()?;
        Ok(canvas)
    }

    /// Reject zero-sized canvases.
    pub fn validate(self) -> SceneResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SceneError::validation("canvas width and height must be > 0"));
        }
        Ok(())
    }

    /// Horizontal center in pixels.
    pub fn center_x(self) -> f64 {
        f64::from(self.width) * 0.5
    }

    /// Width as `f64`.
    pub fn w(self) -> f64 {
        f64::from(self.width)
    }

    /// Height as `f64`.
    pub fn h(self) -> f64 {
        f64::from(self.height)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 800,
            height: 450,
        }
    }
}

/// Half-open time interval `[start, end)` in seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Span {
    /// Inclusive start.
    pub start: f64,
    /// Exclusive end.
    pub end: f64,
}

impl Span {
    /// Create a validated span with `0 <= start < end`.
    pub fn new(start: f64, end: f64) -> SceneResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(SceneError::timing("span bounds must be finite"));
        }
        if start < 0.0 {
            return Err(SceneError::timing(format!("span start {start} must be >= 0")));
        }
        if end <= start {
            return Err(SceneError::timing(format!(
                "span end {end} must be > start {start}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Span length in seconds.
    pub fn len(self) -> f64 {
        self.end - self.start
    }

    /// Return `true` when both spans share a non-empty interval.
    pub fn overlaps(self, other: Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Shift both bounds by `delta` seconds.
    pub fn shift(self, delta: f64) -> Self {
        Self {
            start: round_time(self.start + delta),
            end: round_time(self.end + delta),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
