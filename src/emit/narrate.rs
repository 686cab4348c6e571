use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::SceneError;
use crate::simulate::event::{Bound, FillReason, SemanticEvent};

/// Audience the narrative is written for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeLevel {
    Kids,
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl NarrativeLevel {
    pub const ALL: [NarrativeLevel; 4] = [
        Self::Kids,
        Self::Beginner,
        Self::Intermediate,
        Self::Advanced,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Kids => "kids",
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for NarrativeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NarrativeLevel {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kids" | "kid" | "child" => Ok(Self::Kids),
            "beginner" | "basic" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" | "expert" => Ok(Self::Advanced),
            other => Err(SceneError::validation(format!(
                "unknown narrative level '{other}'"
            ))),
        }
    }
}

/// Wording used for passes and the closing line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flavor {
    Sort,
    Search,
    Traversal,
    ShortestPath,
    Table,
    Backtracking,
    Tree,
    SpanningTree,
    Scan,
}

/// Turns semantic events into captions and status lines.
#[derive(Clone, Debug)]
pub struct Narrator {
    level: NarrativeLevel,
    flavor: Flavor,
    node_labels: Vec<String>,
}

impl Narrator {
    pub fn new(level: NarrativeLevel, flavor: Flavor, node_labels: Vec<String>) -> Self {
        Self {
            level,
            flavor,
            node_labels,
        }
    }

    pub fn level(&self) -> NarrativeLevel {
        self.level
    }

    fn node(&self, idx: usize) -> String {
        self.node_labels
            .get(idx)
            .cloned()
            .unwrap_or_else(|| idx.to_string())
    }

    /// Caption for `event`, if it has one.
    pub fn narrative(&self, event: &SemanticEvent) -> Option<String> {
        use NarrativeLevel::*;
        let lvl = self.level;
        let text = match *event {
            SemanticEvent::Pass { number } => match (self.flavor, lvl) {
                (Flavor::ShortestPath, _) => format!("Relaxation round {number}: check every edge."),
                (_, Kids) => format!("Round {number}!"),
                (_, Beginner) => format!("Pass {number}."),
                (_, Intermediate) => {
                    format!("Pass {number}: one more value reaches its final place.")
                }
                (_, Advanced) => format!("Outer loop, i = {}.", number - 1),
            },
            SemanticEvent::Compare { left, right, .. } => match lvl {
                Kids => format!("Is {left} bigger than {right}?"),
                Beginner => format!("Compare {left} and {right}."),
                Intermediate => {
                    format!("Check if {left} > {right}. If so, they are out of order.")
                }
                Advanced => format!(
                    "Check inversion property: arr[j] > arr[j+1] where {left} and {right} are being evaluated."
                ),
            },
            SemanticEvent::Swap { left, right, .. } => match lvl {
                Kids => "Switch them! Pop!".to_owned(),
                Beginner => format!("Swap {left} and {right}."),
                Intermediate => format!("Perform a swap to move {left} further right."),
                Advanced => "Reorder elements via temporary storage or XOR swap.".to_owned(),
            },
            SemanticEvent::SetMin { value, .. } => match lvl {
                Kids => format!("{value} is the smallest so far!"),
                _ => format!("New minimum found: {value}."),
            },
            SemanticEvent::ClearMin { .. } => return None,
            SemanticEvent::SetPivot { value, .. } => match lvl {
                Kids => format!("{value} is the pivot. Smaller numbers go left!"),
                Advanced => format!("Lomuto partition around pivot {value}."),
                _ => format!("Choose {value} as the pivot."),
            },
            SemanticEvent::Split { low, mid, high } => match lvl {
                Kids => "Cut the list in half!".to_owned(),
                _ => format!(
                    "Dividing array of size {} into two halves at index {mid}.",
                    high - low + 1
                ),
            },
            SemanticEvent::Assign {
                index,
                value,
                previous,
            } => match lvl {
                Kids => format!("Put {value} in spot {index}."),
                Advanced => format!("arr[{index}] = {value}"),
                _ => format!("Write {value} into position {index} (was {previous})."),
            },
            SemanticEvent::MarkSorted { .. } => return None,
            SemanticEvent::Probe { mid, value, .. } => match lvl {
                Kids => format!("Look at the middle number: {value}"),
                Beginner => format!("Middle element is {value}."),
                Intermediate => {
                    format!("Calculate pivot: (low + high) // 2 = {mid}. Value is {value}.")
                }
                Advanced => {
                    "Evaluating median element at index mid for comparison with target.".to_owned()
                }
            },
            SemanticEvent::Discard { from, to } => match lvl {
                Kids => "We can skip these!".to_owned(),
                _ => format!("Discard indices {from}..{to}; the target cannot be there."),
            },
            SemanticEvent::MoveBound { bound, index } => match (bound, lvl) {
                (_, Kids) => return None,
                (Bound::Low, _) => format!("low = {index}"),
                (Bound::High, _) => format!("high = {index}"),
            },
            SemanticEvent::Found { index, value } => match lvl {
                Kids => "We found it! Yay!".to_owned(),
                _ => format!("Found target {value} at index {index}!"),
            },
            SemanticEvent::NotFound { target } => match lvl {
                Kids => format!("{target} is not here."),
                _ => format!("Target {target} not found."),
            },
            SemanticEvent::Visit { node, .. } => format!("Visiting node {}.", self.node(node)),
            SemanticEvent::PushFrontier { node, from } => match (from, self.flavor) {
                (None, _) => format!("Start from node {}.", self.node(node)),
                (Some(_), Flavor::Traversal) if lvl == Kids => {
                    format!("Found {}!", self.node(node))
                }
                (Some(p), _) => format!(
                    "Discovered {} from {}, adding it to the frontier.",
                    self.node(node),
                    self.node(p)
                ),
            },
            SemanticEvent::SetDistance { node, distance } => {
                format!("Distance to {} is now {distance}.", self.node(node))
            }
            SemanticEvent::RelaxEdge { from, to, weight } => match lvl {
                Kids | Beginner => format!(
                    "Try the road {} -> {} (cost {weight}).",
                    self.node(from),
                    self.node(to)
                ),
                _ => format!(
                    "Relaxing edge ({}, {}) with weight {weight}.",
                    self.node(from),
                    self.node(to)
                ),
            },
            SemanticEvent::NegativeCycle { from, to } => format!(
                "Edge {} -> {} still improves: negative cycle detected.",
                self.node(from),
                self.node(to)
            ),
            SemanticEvent::ConsiderVia { k } => {
                format!("Using {} to find shorter paths.", self.node(k))
            }
            SemanticEvent::ReleaseVia { .. } | SemanticEvent::ProbeCell { .. } => return None,
            SemanticEvent::FillCell {
                row,
                col,
                value,
                reason,
            } => match reason {
                FillReason::Base => return None,
                FillReason::Sum { left, right } => match lvl {
                    Kids => format!("{left} + {right} = {value}"),
                    _ => format!(
                        "F({col}) = F({}) + F({}) = {left} + {right} = {value}",
                        col.saturating_sub(1),
                        col.saturating_sub(2)
                    ),
                },
                FillReason::ShorterPath { via } => format!(
                    "{}->{} through {} is shorter: {value}",
                    self.node(row),
                    self.node(col),
                    self.node(via)
                ),
                FillReason::Match => match lvl {
                    Kids => "They match!".to_owned(),
                    _ => format!("Characters match: cell ({row}, {col}) = {value}."),
                },
                FillReason::Mismatch => {
                    format!("Characters differ: cell ({row}, {col}) = {value}.")
                }
                FillReason::Take => match lvl {
                    Kids => format!("Take item {row}!"),
                    _ => format!("Taking item {row} pays off: best value {value} at capacity {col}."),
                },
                FillReason::Skip => format!("Skip item {row} at capacity {col}: best stays {value}."),
            },
            SemanticEvent::TryCell { .. } => return None,
            SemanticEvent::PlaceQueen { row, col } => format!("Place queen at row {row}, col {col}"),
            SemanticEvent::RejectCell { row, col } => match lvl {
                Kids => "Oops, that queen would be attacked!".to_owned(),
                _ => format!("Row {row}, col {col} is under attack."),
            },
            SemanticEvent::RemoveQueen { row, col } => {
                format!("Backtrack: remove the queen at row {row}, col {col}.")
            }
            SemanticEvent::Descend { node, key, left } => {
                let here = self.node(node);
                let side = if left { "left" } else { "right" };
                match lvl {
                    Kids => format!("{key} goes {side} of {here}."),
                    _ => format!("Compare {key} with {here}: go {side}."),
                }
            }
            SemanticEvent::InsertNode { parent, key, .. } => match parent {
                None => format!("Root node {key} created."),
                Some(_) => format!("Inserted {key} at its correct position."),
            },
            SemanticEvent::ConsiderEdge { from, to, weight } => match lvl {
                Kids => format!(
                    "Look at the road {}-{} (cost {weight}).",
                    self.node(from),
                    self.node(to)
                ),
                _ => format!(
                    "Consider edge {}-{} with weight {weight}.",
                    self.node(from),
                    self.node(to)
                ),
            },
            SemanticEvent::AcceptEdge {
                from, to, total, ..
            } => match lvl {
                Kids => format!("Keep the road {}-{}!", self.node(from), self.node(to)),
                _ => format!(
                    "Add edge {}-{} to the tree (total weight {total}).",
                    self.node(from),
                    self.node(to)
                ),
            },
            SemanticEvent::RejectEdge { from, to, .. } => format!(
                "Edge {}-{} would form a cycle, skip it.",
                self.node(from),
                self.node(to)
            ),
            SemanticEvent::ScanStep {
                value,
                current,
                restart,
                ..
            } => match (restart, lvl) {
                (_, Kids) => format!("Add {value}: the sum is {current}."),
                (true, _) => format!("Start a new subarray at {value}: current sum {current}."),
                (false, _) => format!("Extend the subarray with {value}: current sum {current}."),
            },
            SemanticEvent::NewBest { from, to, sum } => match lvl {
                Kids => format!("{sum} is the best so far!"),
                _ => format!("New best sum {sum} over indices {from}..{to}."),
            },
            SemanticEvent::BestRange { from, to, sum } => match lvl {
                Kids => format!("The biggest sum is {sum}!"),
                _ => format!("The maximum subarray is indices {from}..{to} with sum {sum}."),
            },
            SemanticEvent::Tally {
                value,
                bucket,
                count,
                ..
            } => match lvl {
                Kids => format!("Put {value} in box {bucket}."),
                _ => format!("Drop {value} into bucket {bucket} (now {count})."),
            },
            SemanticEvent::SortBucket { bucket, size } => {
                format!("Sort bucket {bucket} ({size} values).")
            }
            SemanticEvent::Gather { value, index, .. } => match lvl {
                Kids => format!("Put {value} back in line!"),
                _ => format!("Place {value} in sorted position {index}."),
            },
            SemanticEvent::Finish => match self.flavor {
                Flavor::Sort => match lvl {
                    Kids => "All sorted! Great job!".to_owned(),
                    _ => "The array is sorted.".to_owned(),
                },
                Flavor::Search | Flavor::Scan => return None,
                Flavor::Traversal => "Traversal complete.".to_owned(),
                Flavor::ShortestPath => "All shortest distances are final.".to_owned(),
                Flavor::Table => "The table is complete.".to_owned(),
                Flavor::Backtracking => "Every queen is safe.".to_owned(),
                Flavor::Tree => "All keys inserted.".to_owned(),
                Flavor::SpanningTree => "Minimum spanning tree complete.".to_owned(),
            },
        };
        Some(text)
    }

    /// Short text for the status line, for events that change it.
    pub fn status(&self, event: &SemanticEvent) -> Option<String> {
        let text = match *event {
            SemanticEvent::Pass { number } => match self.flavor {
                Flavor::ShortestPath => format!("Round {number}"),
                _ => format!("Pass {number}"),
            },
            SemanticEvent::SetPivot { value, .. } => format!("Pivot: {value}"),
            SemanticEvent::Split { low, high, .. } => format!("Split [{low}..{high}]"),
            SemanticEvent::Found { .. } => "Found!".to_owned(),
            SemanticEvent::NotFound { .. } => "Not found".to_owned(),
            SemanticEvent::Visit { node, order, .. } => format!("Visit #{order}: {}", self.node(node)),
            SemanticEvent::NegativeCycle { .. } => "Negative cycle!".to_owned(),
            SemanticEvent::ConsiderVia { k } => {
                format!("Considering intermediate vertex {}", self.node(k))
            }
            SemanticEvent::AcceptEdge { total, .. } => format!("MST weight: {total}"),
            SemanticEvent::ScanStep { current, best, .. } => {
                format!("Current sum: {current}, Max sum: {best}")
            }
            SemanticEvent::BestRange { sum, .. } => format!("Max sum: {sum}"),
            SemanticEvent::Finish => match self.flavor {
                Flavor::Sort => "Array Sorted!".to_owned(),
                Flavor::Search | Flavor::Scan => return None,
                Flavor::SpanningTree => "MST Complete".to_owned(),
                Flavor::Traversal => "Traversal Complete!".to_owned(),
                Flavor::ShortestPath => "Distances Final".to_owned(),
                Flavor::Table => "Table Complete".to_owned(),
                Flavor::Backtracking => "Solved!".to_owned(),
                Flavor::Tree => "Tree Built".to_owned(),
            },
            _ => return None,
        };
        Some(text)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/emit/narrate.rs"]
mod tests;
