use serde::{Deserialize, Serialize};

use crate::foundation::core::Point;
use crate::foundation::error::{SceneError, SceneResult};

/// A labelled graph vertex with optional fixed coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Text drawn inside the node.
    pub label: String,
    /// Canvas position; nodes without one are placed on a circle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<Point>,
}

impl GraphNode {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            pos: None,
        }
    }

    pub fn at(label: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            label: label.into(),
            pos: Some(Point::new(x, y)),
        }
    }
}

/// Edge between two node indices, in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: usize,
    pub to: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
}

impl GraphEdge {
    pub fn new(from: usize, to: usize) -> Self {
        Self {
            from,
            to,
            weight: None,
        }
    }

    pub fn weighted(from: usize, to: usize, weight: i64) -> Self {
        Self {
            from,
            to,
            weight: Some(weight),
        }
    }
}

/// How a grid of cells is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridStyle {
    /// Bracketed matrix; missing values read as infinity.
    Matrix,
    /// DP table; missing values are blank until filled.
    #[default]
    Table,
    /// Checkerboard.
    Board,
}

/// The data an algorithm operates on, as far as layout is concerned.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum DatasetShape {
    /// Bars with value labels, optionally with low/high/mid pointers.
    Array {
        values: Vec<i64>,
        #[serde(default)]
        pointers: bool,
    },
    /// Bars over a row of labelled bins, for distribution sorts.
    Buckets { values: Vec<i64>, labels: Vec<String> },
    /// Binary search tree built from `keys` in insertion order.
    Tree { keys: Vec<i64> },
    /// Node-link diagram.
    Graph {
        nodes: Vec<GraphNode>,
        edges: Vec<GraphEdge>,
        /// Draw a distance label under each node.
        #[serde(default)]
        distances: bool,
    },
    /// Matrix, DP table or board.
    Grid {
        cells: Vec<Vec<Option<i64>>>,
        #[serde(default)]
        row_labels: Vec<String>,
        #[serde(default)]
        col_labels: Vec<String>,
        #[serde(default)]
        style: GridStyle,
    },
}

impl DatasetShape {
    /// Number of logical elements.
    pub fn len(&self) -> usize {
        match self {
            Self::Array { values, .. } | Self::Buckets { values, .. } => values.len(),
            Self::Tree { keys } => keys.len(),
            Self::Graph { nodes, .. } => nodes.len(),
            Self::Grid { cells, .. } => cells.iter().map(Vec::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Structural checks that do not depend on the canvas.
    pub fn validate(&self) -> SceneResult<()> {
        match self {
            Self::Array { .. } | Self::Tree { .. } => Ok(()),
            Self::Buckets { values, labels } => {
                if labels.is_empty() && !values.is_empty() {
                    return Err(SceneError::validation("bucket row needs at least one bucket"));
                }
                Ok(())
            }
            Self::Graph { nodes, edges, .. } => {
                for (idx, e) in edges.iter().enumerate() {
                    if e.from >= nodes.len() || e.to >= nodes.len() {
                        return Err(SceneError::validation(format!(
                            "edge {idx} ({} -> {}) references a missing node (have {})",
                            e.from,
                            e.to,
                            nodes.len()
                        )));
                    }
                    if e.from == e.to {
                        return Err(SceneError::validation(format!(
                            "edge {idx} is a self-loop on node {}",
                            e.from
                        )));
                    }
                    let dup = edges[..idx].iter().any(|o| {
                        (o.from, o.to) == (e.from, e.to) || (o.from, o.to) == (e.to, e.from)
                    });
                    if dup {
                        return Err(SceneError::validation(format!(
                            "edge {idx} ({} -> {}) is declared twice",
                            e.from, e.to
                        )));
                    }
                }
                Ok(())
            }
            Self::Grid {
                cells,
                row_labels,
                col_labels,
                ..
            } => {
                let cols = cells.first().map_or(0, Vec::len);
                if cells.iter().any(|row| row.len() != cols) {
                    return Err(SceneError::validation("grid rows must all have the same length"));
                }
                if !row_labels.is_empty() && row_labels.len() != cells.len() {
                    return Err(SceneError::validation(format!(
                        "expected {} row labels, got {}",
                        cells.len(),
                        row_labels.len()
                    )));
                }
                if !col_labels.is_empty() && col_labels.len() != cols {
                    return Err(SceneError::validation(format!(
                        "expected {cols} column labels, got {}",
                        col_labels.len()
                    )));
                }
                Ok(())
            }
        }
    }
}

/// Parent link of one key inserted into a binary search tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BstLink {
    /// Insertion index of the parent, `None` for the root.
    pub parent: Option<usize>,
    /// Depth below the root.
    pub depth: usize,
}

/// Insert `keys` in order into a BST (`<` goes left) and report each key's parent and depth.
pub fn bst_links(keys: &[i64]) -> Vec<BstLink> {
    let mut left: Vec<Option<usize>> = vec![None; keys.len()];
    let mut right: Vec<Option<usize>> = vec![None; keys.len()];
    let mut links = Vec::with_capacity(keys.len());
    for (idx, &key) in keys.iter().enumerate() {
        if idx == 0 {
            links.push(BstLink {
                parent: None,
                depth: 0,
            });
            continue;
        }
        let mut cur = 0usize;
        let mut depth = 1usize;
        loop {
            let slot = if key < keys[cur] {
                &mut left[cur]
            } else {
                &mut right[cur]
            };
            match *slot {
                Some(next) => {
                    cur = next;
                    depth += 1;
                }
                None => {
                    *slot = Some(idx);
                    links.push(BstLink {
                        parent: Some(cur),
                        depth,
                    });
                    break;
                }
            }
        }
    }
    links
}

/// In-order rank of every key of the BST built by [`bst_links`].
pub fn bst_in_order_ranks(keys: &[i64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..keys.len()).collect();
    // Equal keys go right, so later insertions sort after earlier ones.
    order.sort_by(|&a, &b| keys[a].cmp(&keys[b]).then(a.cmp(&b)));
    let mut ranks = vec![0; keys.len()];
    for (rank, idx) in order.into_iter().enumerate() {
        ranks[idx] = rank;
    }
    ranks
}
