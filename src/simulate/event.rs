use serde::Serialize;

use crate::emit::style::EventKind;

/// Binary search bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bound {
    Low,
    High,
}

/// Why a table cell received its value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum FillReason {
    /// Base row or column.
    Base,
    /// Characters match (LCS, edit distance).
    Match,
    /// Characters differ.
    Mismatch,
    /// Item taken (knapsack).
    Take,
    /// Item skipped or does not fit (knapsack).
    Skip,
    /// Path through `via` is shorter (Floyd-Warshall).
    ShorterPath { via: usize },
    /// Sum of the two previous cells (Fibonacci); `left` is the nearer one.
    Sum { left: i64, right: i64 },
}

/// Algorithm-level occurrence, independent of how it is drawn.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SemanticEvent {
    /// Start of outer pass/round `number` (1-based).
    Pass { number: usize },
    Compare { i: usize, j: usize, left: i64, right: i64 },
    /// Exchange slots `i` and `j`, which held `left` and `right`.
    Swap { i: usize, j: usize, left: i64, right: i64 },
    SetMin { index: usize, value: i64 },
    ClearMin { index: usize },
    SetPivot { index: usize, value: i64 },
    /// Sub-array `low..=high` is split at `mid`.
    Split { low: usize, mid: usize, high: usize },
    /// Slot `index` changes from `previous` to `value`.
    Assign { index: usize, value: i64, previous: i64 },
    MarkSorted { index: usize },
    Probe { low: usize, mid: usize, high: usize, value: i64, target: i64 },
    /// Slots `from..=to` are ruled out.
    Discard { from: usize, to: usize },
    /// Pointer moves; may sit one past either end.
    MoveBound { bound: Bound, index: isize },
    Found { index: usize, value: i64 },
    NotFound { target: i64 },
    /// Node taken from the frontier, reached over the edge from `from`; `order` is 1-based.
    Visit { node: usize, order: usize, from: Option<usize> },
    PushFrontier { node: usize, from: Option<usize> },
    SetDistance { node: usize, distance: i64 },
    RelaxEdge { from: usize, to: usize, weight: i64 },
    NegativeCycle { from: usize, to: usize },
    ConsiderVia { k: usize },
    ReleaseVia { k: usize },
    ProbeCell { row: usize, col: usize },
    FillCell { row: usize, col: usize, value: i64, reason: FillReason },
    TryCell { row: usize, col: usize },
    PlaceQueen { row: usize, col: usize },
    RejectCell { row: usize, col: usize },
    RemoveQueen { row: usize, col: usize },
    /// `key` is compared against `node` on the way down; `left` tells the branch taken.
    Descend { node: usize, key: i64, left: bool },
    InsertNode { node: usize, parent: Option<usize>, key: i64 },
    /// Edge `from - to` becomes a spanning-tree candidate.
    ConsiderEdge { from: usize, to: usize, weight: i64 },
    /// Edge joins the spanning tree, whose weight is now `total`.
    AcceptEdge { from: usize, to: usize, weight: i64, total: i64 },
    /// Edge would close a cycle.
    RejectEdge { from: usize, to: usize, weight: i64 },
    /// Running-sum step at `index`; `restart` means the subarray restarts there.
    ScanStep { index: usize, value: i64, current: i64, best: i64, restart: bool },
    /// Slots `from..=to` hold the best sum so far.
    NewBest { from: usize, to: usize, sum: i64 },
    /// Final answer of a range scan.
    BestRange { from: usize, to: usize, sum: i64 },
    /// Value of slot `index` dropped into `bucket`, which now holds `count` values.
    Tally { index: usize, value: i64, bucket: usize, count: usize },
    SortBucket { bucket: usize, size: usize },
    /// Value taken out of `bucket` and written to slot `index`.
    Gather { bucket: usize, index: usize, value: i64, previous: i64, remaining: usize },
    Finish,
}

impl SemanticEvent {
    /// Timing-table key of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Pass { .. } => EventKind::Pass,
            Self::Compare { .. } => EventKind::Compare,
            Self::Swap { .. } => EventKind::Swap,
            Self::SetMin { .. } => EventKind::SetMin,
            Self::ClearMin { .. } => EventKind::ClearMin,
            Self::SetPivot { .. } => EventKind::SetPivot,
            Self::Split { .. } => EventKind::Split,
            Self::Assign { .. } => EventKind::Assign,
            Self::MarkSorted { .. } => EventKind::MarkSorted,
            Self::Probe { .. } => EventKind::Probe,
            Self::Discard { .. } => EventKind::Discard,
            Self::MoveBound { .. } => EventKind::MoveBound,
            Self::Found { .. } => EventKind::Found,
            Self::NotFound { .. } => EventKind::NotFound,
            Self::Visit { .. } => EventKind::Visit,
            Self::PushFrontier { .. } => EventKind::PushFrontier,
            Self::SetDistance { .. } => EventKind::SetDistance,
            Self::RelaxEdge { .. } => EventKind::RelaxEdge,
            Self::NegativeCycle { .. } => EventKind::NegativeCycle,
            Self::ConsiderVia { .. } => EventKind::ConsiderVia,
            Self::ReleaseVia { .. } => EventKind::ReleaseVia,
            Self::ProbeCell { .. } => EventKind::ProbeCell,
            Self::FillCell { .. } => EventKind::FillCell,
            Self::TryCell { .. } => EventKind::TryCell,
            Self::PlaceQueen { .. } => EventKind::PlaceQueen,
            Self::RejectCell { .. } => EventKind::RejectCell,
            Self::RemoveQueen { .. } => EventKind::RemoveQueen,
            Self::Descend { .. } => EventKind::Descend,
            Self::InsertNode { .. } => EventKind::InsertNode,
            Self::ConsiderEdge { .. } => EventKind::ConsiderEdge,
            Self::AcceptEdge { .. } => EventKind::AcceptEdge,
            Self::RejectEdge { .. } => EventKind::RejectEdge,
            Self::ScanStep { .. } => EventKind::ScanStep,
            Self::NewBest { .. } => EventKind::NewBest,
            Self::BestRange { .. } => EventKind::BestRange,
            Self::Tally { .. } => EventKind::Tally,
            Self::SortBucket { .. } => EventKind::SortBucket,
            Self::Gather { .. } => EventKind::Gather,
            Self::Finish => EventKind::Finish,
        }
    }
}
