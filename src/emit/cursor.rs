use crate::foundation::core::{Span, round_time};
use crate::foundation::error::{SceneError, SceneResult};

/// Monotonic emission clock, kept at millisecond resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TimeCursor {
    now: f64,
}

impl TimeCursor {
    /// Cursor starting at `start` seconds.
    pub fn starting_at(start: f64) -> SceneResult<Self> {
        if !start.is_finite() || start < 0.0 {
            return Err(SceneError::timing(format!(
                "cursor start must be finite and >= 0 (got {start})"
            )));
        }
        Ok(Self {
            now: round_time(start),
        })
    }

    /// Current time.
    pub fn now(self) -> f64 {
        self.now
    }

    /// Window `[now, now + duration)` without moving the cursor.
    pub fn window(self, duration: f64) -> SceneResult<Span> {
        Span::new(self.now, round_time(self.now + duration))
    }

    /// Move forward by `duration`; negative or non-finite steps are rejected.
    pub fn advance(&mut self, duration: f64) -> SceneResult<f64> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(SceneError::timing(format!(
                "cursor cannot move by {duration}"
            )));
        }
        self.now = round_time(self.now + duration);
        Ok(self.now)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/emit/cursor.rs"]
mod tests;
