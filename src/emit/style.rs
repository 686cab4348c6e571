use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::foundation::core::round_time;
use crate::foundation::error::{SceneError, SceneResult};

/// Shortest event duration, in seconds. Anything shorter rounds away on the millisecond grid.
pub const MIN_DURATION: f64 = 0.001;

/// Kind of a semantic event, used as the key of the timing table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum EventKind {
    Pass,
    Compare,
    Swap,
    SetMin,
    ClearMin,
    SetPivot,
    Split,
    Assign,
    MarkSorted,
    Probe,
    Discard,
    MoveBound,
    Found,
    NotFound,
    Visit,
    PushFrontier,
    SetDistance,
    RelaxEdge,
    NegativeCycle,
    ConsiderVia,
    ReleaseVia,
    ProbeCell,
    FillCell,
    TryCell,
    PlaceQueen,
    RejectCell,
    RemoveQueen,
    Descend,
    InsertNode,
    ConsiderEdge,
    AcceptEdge,
    RejectEdge,
    ScanStep,
    NewBest,
    BestRange,
    Tally,
    SortBucket,
    Gather,
    Finish,
}

impl EventKind {
    /// Every event kind, in declaration order.
    pub const ALL: [EventKind; 39] = [
        Self::Pass,
        Self::Compare,
        Self::Swap,
        Self::SetMin,
        Self::ClearMin,
        Self::SetPivot,
        Self::Split,
        Self::Assign,
        Self::MarkSorted,
        Self::Probe,
        Self::Discard,
        Self::MoveBound,
        Self::Found,
        Self::NotFound,
        Self::Visit,
        Self::PushFrontier,
        Self::SetDistance,
        Self::RelaxEdge,
        Self::NegativeCycle,
        Self::ConsiderVia,
        Self::ReleaseVia,
        Self::ProbeCell,
        Self::FillCell,
        Self::TryCell,
        Self::PlaceQueen,
        Self::RejectCell,
        Self::RemoveQueen,
        Self::Descend,
        Self::InsertNode,
        Self::ConsiderEdge,
        Self::AcceptEdge,
        Self::RejectEdge,
        Self::ScanStep,
        Self::NewBest,
        Self::BestRange,
        Self::Tally,
        Self::SortBucket,
        Self::Gather,
        Self::Finish,
    ];

    /// Snake-case name, as used in configuration files and action ids.
    pub fn key(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Compare => "compare",
            Self::Swap => "swap",
            Self::SetMin => "set_min",
            Self::ClearMin => "clear_min",
            Self::SetPivot => "set_pivot",
            Self::Split => "split",
            Self::Assign => "assign",
            Self::MarkSorted => "mark_sorted",
            Self::Probe => "probe",
            Self::Discard => "discard",
            Self::MoveBound => "move_bound",
            Self::Found => "found",
            Self::NotFound => "not_found",
            Self::Visit => "visit",
            Self::PushFrontier => "push_frontier",
            Self::SetDistance => "set_distance",
            Self::RelaxEdge => "relax_edge",
            Self::NegativeCycle => "negative_cycle",
            Self::ConsiderVia => "consider_via",
            Self::ReleaseVia => "release_via",
            Self::ProbeCell => "probe_cell",
            Self::FillCell => "fill_cell",
            Self::TryCell => "try_cell",
            Self::PlaceQueen => "place_queen",
            Self::RejectCell => "reject_cell",
            Self::RemoveQueen => "remove_queen",
            Self::Descend => "descend",
            Self::InsertNode => "insert_node",
            Self::ConsiderEdge => "consider_edge",
            Self::AcceptEdge => "accept_edge",
            Self::RejectEdge => "reject_edge",
            Self::ScanStep => "scan_step",
            Self::NewBest => "new_best",
            Self::BestRange => "best_range",
            Self::Tally => "tally",
            Self::SortBucket => "sort_bucket",
            Self::Gather => "gather",
            Self::Finish => "finish",
        }
    }

    /// `true` for events that only inspect data.
    pub fn is_inspection(self) -> bool {
        matches!(
            self,
            Self::Compare
                | Self::Probe
                | Self::ProbeCell
                | Self::TryCell
                | Self::Descend
                | Self::ConsiderEdge
        )
    }

    fn default_style(self) -> (f64, &'static str) {
        match self {
            Self::Pass => (0.4, "#89b4fa"),
            Self::Compare => (1.0, "#e74c3c"),
            Self::Swap => (2.0, "#f9e2af"),
            Self::SetMin => (0.5, "#fab387"),
            Self::ClearMin => (0.3, "#89b4fa"),
            Self::SetPivot => (1.0, "#f38ba8"),
            Self::Split => (0.8, "#b4befe"),
            Self::Assign => (1.2, "#94e2d5"),
            Self::MarkSorted => (0.5, "#a6e3a1"),
            Self::Probe => (1.0, "#e74c3c"),
            Self::Discard => (1.0, "#45475a"),
            Self::MoveBound => (0.5, "#f9e2af"),
            Self::Found => (1.0, "#a6e3a1"),
            Self::NotFound => (1.0, "#f38ba8"),
            Self::Visit => (0.8, "#a6e3a1"),
            Self::PushFrontier => (0.5, "#fab387"),
            Self::SetDistance => (0.8, "#a6e3a1"),
            Self::RelaxEdge => (1.2, "#f9e2af"),
            Self::NegativeCycle => (1.0, "#f38ba8"),
            Self::ConsiderVia => (0.8, "#585b70"),
            Self::ReleaseVia => (0.3, "#313244"),
            Self::ProbeCell => (0.2, "#89b4fa"),
            Self::FillCell => (0.4, "#a6e3a1"),
            Self::TryCell => (0.3, "#89b4fa"),
            Self::PlaceQueen => (0.8, "#a6e3a1"),
            Self::RejectCell => (0.4, "#f38ba8"),
            Self::RemoveQueen => (0.6, "#fab387"),
            Self::Descend => (0.5, "#89b4fa"),
            Self::InsertNode => (0.6, "#a6e3a1"),
            Self::ConsiderEdge => (0.6, "#f9e2af"),
            Self::AcceptEdge => (1.0, "#a6e3a1"),
            Self::RejectEdge => (0.8, "#f38ba8"),
            Self::ScanStep => (0.8, "#89b4fa"),
            Self::NewBest => (0.8, "#a6e3a1"),
            Self::BestRange => (1.2, "#a6e3a1"),
            Self::Tally => (0.8, "#fab387"),
            Self::SortBucket => (0.8, "#b4befe"),
            Self::Gather => (1.0, "#94e2d5"),
            Self::Finish => (1.0, "#a6e3a1"),
        }
    }
}

/// Duration and highlight colour of one event kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventStyle {
    /// Seconds the event occupies on the timeline.
    pub duration: f64,
    /// Highlight colour applied by the event.
    pub color: String,
}

#[derive(Deserialize)]
struct StyleOverride {
    duration: Option<f64>,
    color: Option<String>,
}

/// Per-event-kind timing and colour table.
///
/// Always complete: entries missing from a configuration fall back to the built-in defaults.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TimingTable {
    styles: BTreeMap<EventKind, EventStyle>,
}

impl TimingTable {
    /// Built-in timings (beginner pace).
    pub fn defaults() -> Self {
        let styles = EventKind::ALL
            .iter()
            .map(|&kind| {
                let (duration, color) = kind.default_style();
                (
                    kind,
                    EventStyle {
                        duration,
                        color: color.to_owned(),
                    },
                )
            })
            .collect();
        Self { styles }
    }

    /// Defaults overridden by `overrides`, validated.
    pub fn new(overrides: BTreeMap<EventKind, EventStyle>) -> SceneResult<Self> {
        let mut table = Self::defaults();
        table.styles.extend(overrides);
        table.validate()?;
        Ok(table)
    }

    /// Reject durations below [`MIN_DURATION`], non-finite durations and empty colours.
    pub fn validate(&self) -> SceneResult<()> {
        for (kind, style) in &self.styles {
            if !style.duration.is_finite() || style.duration < MIN_DURATION {
                return Err(SceneError::timing(format!(
                    "{kind:?} duration must be finite and >= {MIN_DURATION} (got {})",
                    style.duration
                )));
            }
            if style.color.trim().is_empty() {
                return Err(SceneError::validation(format!(
                    "{kind:?} colour must be non-empty"
                )));
            }
        }
        Ok(())
    }

    /// Copy with every duration multiplied by `pace`.
    pub fn scaled(&self, pace: f64) -> SceneResult<Self> {
        if !pace.is_finite() || pace <= 0.0 {
            return Err(SceneError::timing(format!(
                "pace must be finite and > 0 (got {pace})"
            )));
        }
        let styles = self
            .styles
            .iter()
            .map(|(kind, style)| {
                (
                    *kind,
                    EventStyle {
                        duration: round_time(style.duration * pace),
                        color: style.color.clone(),
                    },
                )
            })
            .collect();
        let table = Self { styles };
        table.validate()?;
        Ok(table)
    }

    /// Seconds occupied by `kind`.
    pub fn duration(&self, kind: EventKind) -> f64 {
        self.styles
            .get(&kind)
            .map(|s| s.duration)
            .unwrap_or_else(|| kind.default_style().0)
    }

    /// Highlight colour of `kind`.
    pub fn color(&self, kind: EventKind) -> &str {
        self.styles
            .get(&kind)
            .map(|s| s.color.as_str())
            .unwrap_or(kind.default_style().1)
    }
}

impl Default for TimingTable {
    fn default() -> Self {
        Self::defaults()
    }
}

impl<'de> Deserialize<'de> for TimingTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let overrides = BTreeMap::<EventKind, StyleOverride>::deserialize(deserializer)?;
        let mut table = Self::defaults();
        for (kind, o) in overrides {
            let (duration, color) = kind.default_style();
            table.styles.insert(
                kind,
                EventStyle {
                    duration: o.duration.unwrap_or(duration),
                    color: o.color.unwrap_or_else(|| color.to_owned()),
                },
            );
        }
        Ok(table)
    }
}

/// Resting colours and glyph colours used by layouts and by highlight resets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Canvas background.
    pub background: String,
    /// Title text.
    pub title: String,
    /// Status and label text.
    pub text: String,
    /// Array bars at rest.
    pub bar: String,
    /// Value labels above bars.
    pub value_label: String,
    /// Graph/tree nodes at rest.
    pub node: String,
    /// Node outline.
    pub node_border: String,
    /// Edges at rest.
    pub edge: String,
    /// Edges that joined the traversal.
    pub edge_active: String,
    /// Table and matrix cells at rest.
    pub cell: String,
    /// Alternate board cells.
    pub cell_alt: String,
    /// Cells whose value has been computed.
    pub filled: String,
    /// Permanently sorted elements.
    pub sorted: String,
    /// Elements ruled out of a search.
    pub discarded: String,
    /// Visited graph nodes.
    pub visited: String,
    /// Search pointers.
    pub pointer: String,
    /// Queen glyphs.
    pub queen: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: "#1e1e2e".to_owned(),
            title: "#89b4fa".to_owned(),
            text: "#cdd6f4".to_owned(),
            bar: "#89b4fa".to_owned(),
            value_label: "#ffffff".to_owned(),
            node: "#313244".to_owned(),
            node_border: "#cdd6f4".to_owned(),
            edge: "#45475a".to_owned(),
            edge_active: "#89b4fa".to_owned(),
            cell: "#313244".to_owned(),
            cell_alt: "#45475a".to_owned(),
            filled: "#3b4d3f".to_owned(),
            sorted: "#a6e3a1".to_owned(),
            discarded: "#45475a".to_owned(),
            visited: "#a6e3a1".to_owned(),
            pointer: "#f9e2af".to_owned(),
            queen: "#f9e2af".to_owned(),
        }
    }
}

impl Palette {
    /// Warmer bars used for the kids narrative level.
    pub fn kids() -> Self {
        Self {
            bar: "#f9e2af".to_owned(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/emit/style.rs"]
mod tests;
