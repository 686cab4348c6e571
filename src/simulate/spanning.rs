//! Minimum spanning trees over an undirected weighted graph.

use crate::emit::narrate::NarrativeLevel;
use crate::foundation::error::{SceneError, SceneResult};
use crate::layout::shape::DatasetShape;
use crate::simulate::event::SemanticEvent;
use crate::simulate::graph::GraphData;
use crate::simulate::input::AlgorithmInput;
use crate::simulate::stepper::{AlgorithmKind, Stepper, Trace};

fn undirected(input: &AlgorithmInput, kind: AlgorithmKind) -> SceneResult<GraphData> {
    let graph = GraphData::from_input(input, kind)?;
    if graph.directed {
        return Err(SceneError::validation(format!(
            "{kind}: spanning trees need an undirected graph"
        )));
    }
    Ok(graph)
}

pub fn kruskal(input: &AlgorithmInput) -> SceneResult<Box<dyn Stepper>> {
    Ok(Box::new(SpanningTree {
        graph: undirected(input, AlgorithmKind::KruskalMst)?,
        grow_from_source: false,
    }))
}

pub fn prim(input: &AlgorithmInput) -> SceneResult<Box<dyn Stepper>> {
    Ok(Box::new(SpanningTree {
        graph: undirected(input, AlgorithmKind::PrimMst)?,
        grow_from_source: true,
    }))
}

/// Disjoint-set forest with path halving and union by size.
#[derive(Clone, Debug)]
struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Merge the sets of `a` and `b`; `false` if they were already one set.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        let (big, small) = if self.size[ra] >= self.size[rb] {
            (ra, rb)
        } else {
            (rb, ra)
        };
        self.parent[small] = big;
        self.size[big] += self.size[small];
        true
    }
}

const KRUSKAL_SOURCE: &str = "\
def kruskal(n, edges):
    parent = list(range(n))
    mst, total = [], 0
    for w, u, v in sorted(edges):
        ru, rv = find(parent, u), find(parent, v)
        if ru != rv:
            parent[ru] = rv
            mst.append((u, v, w))
            total += w
        if len(mst) == n - 1:
            break
    return mst, total";

const PRIM_SOURCE: &str = "\
def prim(graph, start):
    in_tree = {start}
    mst, total = [], 0
    while True:
        edges = [(w, u, v) for u in in_tree
                 for v, w in graph[u] if v not in in_tree]
        if not edges:
            break
        w, u, v = min(edges)
        in_tree.add(v)
        mst.append((u, v, w))
        total += w
    return mst, total";

/// Kruskal (global edge order with union-find) or Prim (grown from the source).
///
/// Every edge the algorithm looks at is announced once and later either accepted or rejected.
/// A disconnected graph yields a spanning forest (Kruskal) or the tree of the source's
/// component (Prim).
#[derive(Clone, Debug)]
pub struct SpanningTree {
    graph: GraphData,
    grow_from_source: bool,
}

impl SpanningTree {
    fn weight(&self, edge: usize) -> i64 {
        self.graph.edges[edge].weight.unwrap_or(1)
    }

    fn add(&self, total: i64, weight: i64) -> SceneResult<i64> {
        total.checked_add(weight).ok_or_else(|| {
            SceneError::validation(format!("{}: tree weight overflows", self.kind()))
        })
    }

    fn kruskal(&self, trace: &mut Trace) -> SceneResult<()> {
        let n = self.graph.nodes.len();
        let mut order: Vec<usize> = (0..self.graph.edges.len()).collect();
        order.sort_by_key(|&e| self.weight(e));
        let mut sets = UnionFind::new(n);
        let mut accepted = 0;
        let mut total = 0i64;
        for e in order {
            if accepted + 1 >= n {
                break;
            }
            let edge = self.graph.edges[e];
            let (from, to, weight) = (edge.from, edge.to, self.weight(e));
            trace.push(SemanticEvent::ConsiderEdge { from, to, weight })?;
            if sets.union(from, to) {
                accepted += 1;
                total = self.add(total, weight)?;
                trace.push(SemanticEvent::AcceptEdge {
                    from,
                    to,
                    weight,
                    total,
                })?;
            } else {
                trace.push(SemanticEvent::RejectEdge { from, to, weight })?;
            }
        }
        Ok(())
    }

    fn prim(&self, trace: &mut Trace) -> SceneResult<()> {
        let edges = &self.graph.edges;
        let mut in_tree = vec![false; self.graph.nodes.len()];
        let mut taken = vec![false; edges.len()];
        let mut total = 0i64;

        let src = self.graph.source;
        in_tree[src] = true;
        trace.push(SemanticEvent::Visit {
            node: src,
            order: 1,
            from: None,
        })?;
        self.join(trace, src, &in_tree, &taken)?;

        loop {
            let crossing = (0..edges.len())
                .filter(|&e| in_tree[edges[e].from] != in_tree[edges[e].to])
                .min_by_key(|&e| (self.weight(e), e));
            let Some(e) = crossing else {
                break;
            };
            let (from, to, weight) = (edges[e].from, edges[e].to, self.weight(e));
            taken[e] = true;
            total = self.add(total, weight)?;
            trace.push(SemanticEvent::AcceptEdge {
                from,
                to,
                weight,
                total,
            })?;
            let joined = if in_tree[from] { to } else { from };
            in_tree[joined] = true;
            self.join(trace, joined, &in_tree, &taken)?;
        }
        Ok(())
    }

    /// Announce the edges of a node that just joined the tree: new candidates, and cycles.
    fn join(
        &self,
        trace: &mut Trace,
        node: usize,
        in_tree: &[bool],
        taken: &[bool],
    ) -> SceneResult<()> {
        for (e, edge) in self.graph.edges.iter().enumerate() {
            if taken[e] || (edge.from != node && edge.to != node) {
                continue;
            }
            let other = if edge.from == node { edge.to } else { edge.from };
            let (from, to, weight) = (edge.from, edge.to, self.weight(e));
            if in_tree[other] {
                trace.push(SemanticEvent::RejectEdge { from, to, weight })?;
            } else {
                trace.push(SemanticEvent::ConsiderEdge { from, to, weight })?;
            }
        }
        Ok(())
    }
}

impl Stepper for SpanningTree {
    fn kind(&self) -> AlgorithmKind {
        if self.grow_from_source {
            AlgorithmKind::PrimMst
        } else {
            AlgorithmKind::KruskalMst
        }
    }

    fn title(&self) -> String {
        if self.grow_from_source {
            "Prim's Minimum Spanning Tree".to_owned()
        } else {
            "Kruskal's Minimum Spanning Tree".to_owned()
        }
    }

    fn shape(&self) -> DatasetShape {
        self.graph.shape(false)
    }

    fn simulate(&self, trace: &mut Trace) -> SceneResult<()> {
        if self.grow_from_source {
            self.prim(trace)?;
        } else {
            self.kruskal(trace)?;
        }
        trace.push(SemanticEvent::Finish)
    }

    fn source(&self, _level: NarrativeLevel) -> &'static str {
        if self.grow_from_source {
            PRIM_SOURCE
        } else {
            KRUSKAL_SOURCE
        }
    }

    fn code_line(&self, event: &SemanticEvent, _level: NarrativeLevel) -> Option<u32> {
        match (event, self.grow_from_source) {
            (SemanticEvent::ConsiderEdge { .. }, false) => Some(5),
            (SemanticEvent::AcceptEdge { .. }, false) => Some(8),
            (SemanticEvent::RejectEdge { .. }, false) => Some(6),
            (SemanticEvent::Visit { .. }, true) => Some(2),
            (SemanticEvent::ConsiderEdge { .. }, true) => Some(5),
            (SemanticEvent::AcceptEdge { .. }, true) => Some(10),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/simulate/spanning.rs"]
mod tests;
