use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::emit::emitter::EmitOpts;
use crate::emit::narrate::NarrativeLevel;
use crate::emit::style::{Palette, TimingTable};
use crate::foundation::core::Canvas;
use crate::foundation::error::{SceneError, SceneResult};

/// Knobs of [`Compiler`](crate::Compiler). Every field has a default, so a config file only
/// lists what it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    pub canvas: Canvas,
    pub level: NarrativeLevel,
    /// Multiplier applied to every event duration.
    pub pace: f64,
    /// Per-event overrides, merged over the built-in table.
    pub timing: TimingTable,
    pub palette: Palette,
    /// Seconds at the end of a highlight spent returning to the resting colour.
    pub reset: f64,
    pub lead_in: f64,
    pub reveal: f64,
    pub reveal_stagger: f64,
    pub tail_padding: f64,
    /// Event budget per simulation.
    pub max_events: usize,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            level: NarrativeLevel::default(),
            pace: 1.0,
            timing: TimingTable::defaults(),
            palette: Palette::default(),
            reset: 0.2,
            lead_in: 0.5,
            reveal: 0.5,
            reveal_stagger: 0.1,
            tail_padding: 2.0,
            max_events: 20_000,
        }
    }
}

impl CompilerConfig {
    /// Defaults tuned for one audience: pace and, for kids, a brighter palette.
    pub fn for_level(level: NarrativeLevel) -> Self {
        let pace = match level {
            NarrativeLevel::Kids => 1.25,
            NarrativeLevel::Beginner => 1.0,
            NarrativeLevel::Intermediate => 0.75,
            NarrativeLevel::Advanced => 0.6,
        };
        let palette = match level {
            NarrativeLevel::Kids => Palette::kids(),
            _ => Palette::default(),
        };
        Self {
            level,
            pace,
            palette,
            ..Self::default()
        }
    }

    /// Parse a config from a JSON reader and validate it.
    pub fn from_reader<R: std::io::Read>(r: R) -> SceneResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| SceneError::serde(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SceneError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> SceneResult<()> {
        self.canvas.validate()?;
        self.timing.validate()?;
        if !self.pace.is_finite() || self.pace <= 0.0 {
            return Err(SceneError::timing(format!(
                "pace must be finite and > 0 (got {})",
                self.pace
            )));
        }
        for (name, v) in [
            ("reset", self.reset),
            ("lead_in", self.lead_in),
            ("reveal_stagger", self.reveal_stagger),
            ("tail_padding", self.tail_padding),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(SceneError::timing(format!(
                    "{name} must be finite and >= 0 (got {v})"
                )));
            }
        }
        if !self.reveal.is_finite() || self.reveal <= 0.0 {
            return Err(SceneError::timing(format!(
                "reveal must be finite and > 0 (got {})",
                self.reveal
            )));
        }
        if self.max_events == 0 {
            return Err(SceneError::validation("max_events must be > 0"));
        }
        Ok(())
    }

    /// Timing table with `pace` applied.
    pub fn effective_timing(&self) -> SceneResult<TimingTable> {
        self.timing.scaled(self.pace)
    }

    pub(crate) fn emit_opts<'a>(&'a self, timing: &'a TimingTable) -> EmitOpts<'a> {
        EmitOpts {
            timing,
            palette: &self.palette,
            reset: self.reset,
            lead_in: self.lead_in,
            reveal: self.reveal,
            reveal_stagger: self.reveal_stagger,
            tail_padding: self.tail_padding,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/config.rs"]
mod tests;
