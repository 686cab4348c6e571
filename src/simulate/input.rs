use serde::{Deserialize, Serialize};

use crate::emit::narrate::NarrativeLevel;
use crate::foundation::error::SceneError;
use crate::foundation::sample::SampleSource;
use crate::layout::shape::{GraphEdge, GraphNode};
use crate::simulate::stepper::AlgorithmKind;

/// Knapsack item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub weight: usize,
    pub value: i64,
}

/// Explicit input handed to a stepper factory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "input", rename_all = "snake_case")]
pub enum AlgorithmInput {
    /// Values to sort.
    Array { values: Vec<i64> },
    /// Sorted values and the key to look for.
    Search { values: Vec<i64>, target: i64 },
    /// Graph traversed or relaxed from `source`.
    Graph {
        nodes: Vec<GraphNode>,
        edges: Vec<GraphEdge>,
        #[serde(default)]
        source: usize,
        /// Undirected edges are walked both ways by traversals.
        #[serde(default)]
        directed: bool,
    },
    /// Distance matrix; `null` means no direct edge.
    Matrix { cells: Vec<Vec<Option<i64>>> },
    Knapsack { items: Vec<Item>, capacity: usize },
    /// Two strings compared by LCS or edit distance.
    Strings { a: String, b: String },
    /// Board size for N-Queens.
    Board { n: usize },
    /// Keys inserted into a BST, in order.
    Keys { keys: Vec<i64> },
    /// Number of sequence terms to compute.
    Sequence { n: usize },
}

impl AlgorithmInput {
    /// Default input for `kind`.
    ///
    /// Array-shaped inputs are drawn from `src`; graphs, tables and boards use fixed textbook
    /// instances.
    pub fn sample(kind: AlgorithmKind, src: &mut SampleSource, level: NarrativeLevel) -> Self {
        let kids = level == NarrativeLevel::Kids;
        match kind {
            AlgorithmKind::BubbleSort
            | AlgorithmKind::SelectionSort
            | AlgorithmKind::QuickSort
            | AlgorithmKind::MergeSort => {
                let values = if kids {
                    src.ints(5, 1, 10)
                } else {
                    src.ints(6, 10, 99)
                };
                Self::Array { values }
            }
            AlgorithmKind::CountingSort => Self::Array {
                values: src.ints(if kids { 6 } else { 8 }, 0, 9),
            },
            AlgorithmKind::BucketSort => Self::Array {
                values: src.ints(if kids { 6 } else { 10 }, 0, 99),
            },
            AlgorithmKind::MaxSubarray => Self::Array {
                values: vec![-2, 1, -3, 4, -1, 2, 1, -5, 4],
            },
            AlgorithmKind::BinarySearch => {
                let values = if kids {
                    src.sorted_ints(5, 1, 15)
                } else {
                    src.sorted_ints(9, 10, 99)
                };
                let target = src.choose(&values).unwrap_or_default();
                Self::Search { values, target }
            }
            AlgorithmKind::Bfs | AlgorithmKind::Dfs => Self::Graph {
                nodes: vec![
                    GraphNode::at("A", 400.0, 150.0),
                    GraphNode::at("B", 200.0, 250.0),
                    GraphNode::at("C", 600.0, 250.0),
                    GraphNode::at("D", 100.0, 370.0),
                    GraphNode::at("E", 300.0, 370.0),
                    GraphNode::at("F", 500.0, 370.0),
                    GraphNode::at("G", 700.0, 370.0),
                ],
                edges: vec![
                    GraphEdge::new(0, 1),
                    GraphEdge::new(0, 2),
                    GraphEdge::new(1, 3),
                    GraphEdge::new(1, 4),
                    GraphEdge::new(2, 5),
                    GraphEdge::new(2, 6),
                ],
                source: 0,
                directed: false,
            },
            AlgorithmKind::Dijkstra => Self::Graph {
                nodes: vec![
                    GraphNode::at("A", 100.0, 225.0),
                    GraphNode::at("B", 300.0, 130.0),
                    GraphNode::at("C", 300.0, 330.0),
                    GraphNode::at("D", 500.0, 225.0),
                    GraphNode::at("E", 700.0, 225.0),
                ],
                edges: vec![
                    GraphEdge::weighted(0, 1, 4),
                    GraphEdge::weighted(0, 2, 2),
                    GraphEdge::weighted(1, 2, 5),
                    GraphEdge::weighted(1, 3, 10),
                    GraphEdge::weighted(2, 3, 3),
                    GraphEdge::weighted(3, 4, 1),
                ],
                source: 0,
                directed: false,
            },
            AlgorithmKind::KruskalMst | AlgorithmKind::PrimMst => Self::Graph {
                nodes: vec![
                    GraphNode::at("A", 200.0, 150.0),
                    GraphNode::at("B", 400.0, 110.0),
                    GraphNode::at("C", 600.0, 150.0),
                    GraphNode::at("D", 300.0, 320.0),
                    GraphNode::at("E", 500.0, 320.0),
                ],
                edges: vec![
                    GraphEdge::weighted(0, 1, 4),
                    GraphEdge::weighted(0, 3, 2),
                    GraphEdge::weighted(1, 2, 3),
                    GraphEdge::weighted(1, 3, 5),
                    GraphEdge::weighted(1, 4, 6),
                    GraphEdge::weighted(2, 4, 1),
                    GraphEdge::weighted(3, 4, 7),
                ],
                source: 0,
                directed: false,
            },
            AlgorithmKind::BellmanFord => Self::Graph {
                nodes: vec![
                    GraphNode::at("S", 100.0, 260.0),
                    GraphNode::at("A", 300.0, 150.0),
                    GraphNode::at("B", 300.0, 370.0),
                    GraphNode::at("C", 500.0, 150.0),
                    GraphNode::at("D", 500.0, 370.0),
                    GraphNode::at("E", 700.0, 260.0),
                ],
                edges: vec![
                    GraphEdge::weighted(0, 1, 6),
                    GraphEdge::weighted(0, 2, 7),
                    GraphEdge::weighted(1, 3, 5),
                    GraphEdge::weighted(1, 2, 8),
                    GraphEdge::weighted(1, 4, -4),
                    GraphEdge::weighted(2, 3, -3),
                    GraphEdge::weighted(2, 4, 9),
                    GraphEdge::weighted(3, 1, -2),
                    GraphEdge::weighted(4, 3, 7),
                    GraphEdge::weighted(4, 5, 2),
                    GraphEdge::weighted(3, 5, -1),
                ],
                source: 0,
                directed: true,
            },
            AlgorithmKind::FloydWarshall => Self::Matrix {
                cells: vec![
                    vec![Some(0), Some(3), None, Some(7)],
                    vec![Some(8), Some(0), Some(2), None],
                    vec![Some(5), None, Some(0), Some(1)],
                    vec![Some(2), None, None, Some(0)],
                ],
            },
            AlgorithmKind::Fibonacci => Self::Sequence {
                n: if kids { 7 } else { 10 },
            },
            AlgorithmKind::Knapsack => Self::Knapsack {
                items: [(2, 3), (3, 4), (4, 5), (5, 6)]
                    .into_iter()
                    .map(|(weight, value)| Item { weight, value })
                    .collect(),
                capacity: 8,
            },
            AlgorithmKind::Lcs => Self::Strings {
                a: "AGGTAB".to_owned(),
                b: "GXTXAYB".to_owned(),
            },
            AlgorithmKind::EditDistance => Self::Strings {
                a: "SUNDAY".to_owned(),
                b: "SATURDAY".to_owned(),
            },
            AlgorithmKind::NQueens => Self::Board { n: 4 },
            AlgorithmKind::BstInsert => {
                let keys = if kids {
                    vec![50, 30, 70, 20, 40]
                } else {
                    vec![50, 30, 70, 20, 40, 60, 80]
                };
                Self::Keys { keys }
            }
        }
    }

    /// Short name of the variant, for error messages.
    pub fn variant(&self) -> &'static str {
        match self {
            Self::Array { .. } => "array",
            Self::Search { .. } => "search",
            Self::Graph { .. } => "graph",
            Self::Matrix { .. } => "matrix",
            Self::Knapsack { .. } => "knapsack",
            Self::Strings { .. } => "strings",
            Self::Board { .. } => "board",
            Self::Keys { .. } => "keys",
            Self::Sequence { .. } => "sequence",
        }
    }

    /// Error for a factory that received the wrong variant.
    pub(crate) fn mismatch(&self, kind: AlgorithmKind, expected: &str) -> SceneError {
        SceneError::validation(format!(
            "{kind} expects a '{expected}' input, got '{}'",
            self.variant()
        ))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/simulate/input.rs"]
mod tests;
