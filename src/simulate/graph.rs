use std::collections::VecDeque;

use crate::emit::narrate::NarrativeLevel;
use crate::foundation::error::{SceneError, SceneResult};
use crate::layout::shape::{DatasetShape, GraphEdge, GraphNode, GridStyle};
use crate::simulate::event::{FillReason, SemanticEvent};
use crate::simulate::input::AlgorithmInput;
use crate::simulate::stepper::{AlgorithmKind, Stepper, Trace};

/// Graph input shared by the traversal, relaxation and spanning-tree steppers.
#[derive(Clone, Debug)]
pub(crate) struct GraphData {
    pub(crate) nodes: Vec<GraphNode>,
    pub(crate) edges: Vec<GraphEdge>,
    pub(crate) source: usize,
    pub(crate) directed: bool,
}

impl GraphData {
    pub(crate) fn from_input(input: &AlgorithmInput, kind: AlgorithmKind) -> SceneResult<Self> {
        let AlgorithmInput::Graph {
            nodes,
            edges,
            source,
            directed,
        } = input
        else {
            return Err(input.mismatch(kind, "graph"));
        };
        if nodes.is_empty() {
            return Err(SceneError::shape(format!("{kind}: graph has no nodes")));
        }
        if *source >= nodes.len() {
            return Err(SceneError::validation(format!(
                "{kind}: source {source} is not a node (have {})",
                nodes.len()
            )));
        }
        let data = Self {
            nodes: nodes.clone(),
            edges: edges.clone(),
            source: *source,
            directed: *directed,
        };
        data.shape(false).validate()?;
        Ok(data)
    }

    pub(crate) fn shape(&self, distances: bool) -> DatasetShape {
        DatasetShape::Graph {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
            distances,
        }
    }

    /// Neighbours in edge-declaration order.
    fn adjacency(&self) -> Vec<Vec<usize>> {
        let mut adj = vec![Vec::new(); self.nodes.len()];
        for e in &self.edges {
            adj[e.from].push(e.to);
            if !self.directed {
                adj[e.to].push(e.from);
            }
        }
        adj
    }

    /// Weighted neighbours in edge-declaration order; a missing weight counts as 1.
    fn weighted_adjacency(&self) -> Vec<Vec<(usize, i64)>> {
        let mut adj = vec![Vec::new(); self.nodes.len()];
        for e in &self.edges {
            let w = e.weight.unwrap_or(1);
            adj[e.from].push((e.to, w));
            if !self.directed {
                adj[e.to].push((e.from, w));
            }
        }
        adj
    }
}

pub fn bfs(input: &AlgorithmInput) -> SceneResult<Box<dyn Stepper>> {
    Ok(Box::new(Traversal {
        graph: GraphData::from_input(input, AlgorithmKind::Bfs)?,
        depth_first: false,
    }))
}

pub fn dfs(input: &AlgorithmInput) -> SceneResult<Box<dyn Stepper>> {
    Ok(Box::new(Traversal {
        graph: GraphData::from_input(input, AlgorithmKind::Dfs)?,
        depth_first: true,
    }))
}

const BFS_SOURCE: &str = "\
def bfs(graph, start):
    visited = {start}
    queue = deque([start])
    while queue:
        u = queue.popleft()
        print(u)
        for v in graph[u]:
            if v not in visited:
                visited.add(v)
                queue.append(v)";

const DFS_SOURCE: &str = "\
def dfs(graph, start):
    visited = set()
    stack = [start]
    while stack:
        u = stack.pop()
        if u not in visited:
            visited.add(u)
            print(u)
            for v in reversed(graph[u]):
                if v not in visited:
                    stack.append(v)";

/// Breadth- or depth-first traversal from the source node.
#[derive(Clone, Debug)]
pub struct Traversal {
    graph: GraphData,
    depth_first: bool,
}

impl Traversal {
    fn walk_breadth(&self, trace: &mut Trace) -> SceneResult<()> {
        let adj = self.graph.adjacency();
        let src = self.graph.source;
        let mut parent: Vec<Option<usize>> = vec![None; adj.len()];
        let mut seen = vec![false; adj.len()];
        let mut queue = VecDeque::from([src]);
        seen[src] = true;
        trace.push(SemanticEvent::PushFrontier {
            node: src,
            from: None,
        })?;
        let mut order = 0;
        while let Some(u) = queue.pop_front() {
            order += 1;
            trace.push(SemanticEvent::Visit {
                node: u,
                order,
                from: parent[u],
            })?;
            for &v in &adj[u] {
                if !seen[v] {
                    seen[v] = true;
                    parent[v] = Some(u);
                    trace.push(SemanticEvent::PushFrontier {
                        node: v,
                        from: Some(u),
                    })?;
                    queue.push_back(v);
                }
            }
        }
        Ok(())
    }

    fn walk_depth(&self, trace: &mut Trace) -> SceneResult<()> {
        let adj = self.graph.adjacency();
        let src = self.graph.source;
        let mut visited = vec![false; adj.len()];
        let mut stack: Vec<(usize, Option<usize>)> = vec![(src, None)];
        trace.push(SemanticEvent::PushFrontier {
            node: src,
            from: None,
        })?;
        let mut order = 0;
        while let Some((u, from)) = stack.pop() {
            if visited[u] {
                continue;
            }
            visited[u] = true;
            order += 1;
            trace.push(SemanticEvent::Visit {
                node: u,
                order,
                from,
            })?;
            // Reverse push so the first neighbour is explored first.
            for &v in adj[u].iter().rev() {
                if !visited[v] {
                    stack.push((v, Some(u)));
                    trace.push(SemanticEvent::PushFrontier {
                        node: v,
                        from: Some(u),
                    })?;
                }
            }
        }
        Ok(())
    }
}

impl Stepper for Traversal {
    fn kind(&self) -> AlgorithmKind {
        if self.depth_first {
            AlgorithmKind::Dfs
        } else {
            AlgorithmKind::Bfs
        }
    }

    fn title(&self) -> String {
        if self.depth_first {
            "DFS Graph Traversal".to_owned()
        } else {
            "BFS Graph Traversal".to_owned()
        }
    }

    fn shape(&self) -> DatasetShape {
        self.graph.shape(false)
    }

    fn simulate(&self, trace: &mut Trace) -> SceneResult<()> {
        if self.depth_first {
            self.walk_depth(trace)?;
        } else {
            self.walk_breadth(trace)?;
        }
        trace.push(SemanticEvent::Finish)
    }

    fn source(&self, _level: NarrativeLevel) -> &'static str {
        if self.depth_first {
            DFS_SOURCE
        } else {
            BFS_SOURCE
        }
    }

    fn code_line(&self, event: &SemanticEvent, _level: NarrativeLevel) -> Option<u32> {
        match (event, self.depth_first) {
            (SemanticEvent::Visit { .. }, false) => Some(5),
            (SemanticEvent::PushFrontier { from: Some(_), .. }, false) => Some(10),
            (SemanticEvent::Visit { .. }, true) => Some(7),
            (SemanticEvent::PushFrontier { from: Some(_), .. }, true) => Some(11),
            _ => None,
        }
    }
}

pub fn bellman_ford(input: &AlgorithmInput) -> SceneResult<Box<dyn Stepper>> {
    Ok(Box::new(BellmanFord {
        graph: GraphData::from_input(input, AlgorithmKind::BellmanFord)?,
    }))
}

const BELLMAN_FORD_SOURCE: &str = "\
def bellman_ford(edges, V, src):
    dist = [float('inf')] * V
    dist[src] = 0
    for _ in range(V - 1):
        for u, v, w in edges:
            if dist[u] + w < dist[v]:
                dist[v] = dist[u] + w
    for u, v, w in edges:
        if dist[u] + w < dist[v]:
            raise ValueError('negative cycle')
    return dist";

/// Edge relaxation rounds with early exit and a final negative-cycle check.
#[derive(Clone, Debug)]
pub struct BellmanFord {
    graph: GraphData,
}

impl BellmanFord {
    /// Directed edges as relaxed; undirected input is relaxed both ways.
    fn arcs(&self) -> Vec<(usize, usize, i64)> {
        let mut arcs = Vec::with_capacity(self.graph.edges.len() * 2);
        for e in &self.graph.edges {
            let w = e.weight.unwrap_or(1);
            arcs.push((e.from, e.to, w));
            if !self.graph.directed {
                arcs.push((e.to, e.from, w));
            }
        }
        arcs
    }
}

fn improves(dist: &[Option<i64>], u: usize, v: usize, w: i64) -> Option<i64> {
    let candidate = dist[u]?.saturating_add(w);
    match dist[v] {
        Some(current) if current <= candidate => None,
        _ => Some(candidate),
    }
}

impl Stepper for BellmanFord {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::BellmanFord
    }

    fn title(&self) -> String {
        "Bellman-Ford Algorithm".to_owned()
    }

    fn shape(&self) -> DatasetShape {
        self.graph.shape(true)
    }

    fn simulate(&self, trace: &mut Trace) -> SceneResult<()> {
        let v = self.graph.nodes.len();
        let arcs = self.arcs();
        let mut dist: Vec<Option<i64>> = vec![None; v];
        dist[self.graph.source] = Some(0);
        trace.push(SemanticEvent::SetDistance {
            node: self.graph.source,
            distance: 0,
        })?;

        for round in 1..v {
            trace.push(SemanticEvent::Pass { number: round })?;
            let mut changed = false;
            for &(from, to, weight) in &arcs {
                if dist[from].is_none() {
                    continue;
                }
                trace.push(SemanticEvent::RelaxEdge { from, to, weight })?;
                if let Some(d) = improves(&dist, from, to, weight) {
                    dist[to] = Some(d);
                    changed = true;
                    trace.push(SemanticEvent::SetDistance {
                        node: to,
                        distance: d,
                    })?;
                }
            }
            if !changed {
                break;
            }
        }

        let cycle = arcs
            .iter()
            .find(|&&(from, to, weight)| improves(&dist, from, to, weight).is_some());
        if let Some(&(from, to, _)) = cycle {
            trace.push(SemanticEvent::NegativeCycle { from, to })?;
        }
        trace.push(SemanticEvent::Finish)
    }

    fn source(&self, _level: NarrativeLevel) -> &'static str {
        BELLMAN_FORD_SOURCE
    }

    fn code_line(&self, event: &SemanticEvent, _level: NarrativeLevel) -> Option<u32> {
        match event {
            SemanticEvent::Pass { .. } => Some(4),
            SemanticEvent::RelaxEdge { .. } => Some(6),
            SemanticEvent::SetDistance { .. } => Some(7),
            SemanticEvent::NegativeCycle { .. } => Some(10),
            _ => None,
        }
    }
}

pub fn dijkstra(input: &AlgorithmInput) -> SceneResult<Box<dyn Stepper>> {
    let kind = AlgorithmKind::Dijkstra;
    let graph = GraphData::from_input(input, kind)?;
    if let Some(e) = graph.edges.iter().find(|e| e.weight.is_some_and(|w| w < 0)) {
        return Err(SceneError::validation(format!(
            "{kind}: edge {} -> {} has a negative weight",
            e.from, e.to
        )));
    }
    Ok(Box::new(Dijkstra { graph }))
}

const DIJKSTRA_SOURCE: &str = "\
def dijkstra(graph, src):
    dist = {v: float('inf') for v in graph}
    dist[src] = 0
    done = set()
    while len(done) < len(graph):
        u = min((v for v in graph if v not in done), key=dist.get)
        if dist[u] == float('inf'):
            break
        done.add(u)
        for v, w in graph[u]:
            if v not in done and dist[u] + w < dist[v]:
                dist[v] = dist[u] + w
    return dist";

/// Greedy shortest paths over non-negative weights; ties pick the lowest node index.
#[derive(Clone, Debug)]
pub struct Dijkstra {
    graph: GraphData,
}

impl Stepper for Dijkstra {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Dijkstra
    }

    fn title(&self) -> String {
        "Dijkstra's Shortest Path".to_owned()
    }

    fn shape(&self) -> DatasetShape {
        self.graph.shape(true)
    }

    fn simulate(&self, trace: &mut Trace) -> SceneResult<()> {
        let adj = self.graph.weighted_adjacency();
        let src = self.graph.source;
        let mut dist: Vec<Option<i64>> = vec![None; adj.len()];
        let mut parent: Vec<Option<usize>> = vec![None; adj.len()];
        let mut done = vec![false; adj.len()];
        dist[src] = Some(0);
        trace.push(SemanticEvent::SetDistance {
            node: src,
            distance: 0,
        })?;

        let mut order = 0;
        loop {
            let next = (0..adj.len())
                .filter(|&v| !done[v])
                .filter_map(|v| dist[v].map(|d| (d, v)))
                .min();
            let Some((_, u)) = next else {
                break;
            };
            done[u] = true;
            order += 1;
            trace.push(SemanticEvent::Visit {
                node: u,
                order,
                from: parent[u],
            })?;
            for &(v, weight) in &adj[u] {
                if done[v] {
                    continue;
                }
                trace.push(SemanticEvent::RelaxEdge {
                    from: u,
                    to: v,
                    weight,
                })?;
                if let Some(d) = improves(&dist, u, v, weight) {
                    dist[v] = Some(d);
                    parent[v] = Some(u);
                    trace.push(SemanticEvent::SetDistance {
                        node: v,
                        distance: d,
                    })?;
                }
            }
        }
        trace.push(SemanticEvent::Finish)
    }

    fn source(&self, _level: NarrativeLevel) -> &'static str {
        DIJKSTRA_SOURCE
    }

    fn code_line(&self, event: &SemanticEvent, _level: NarrativeLevel) -> Option<u32> {
        match event {
            SemanticEvent::Visit { .. } => Some(9),
            SemanticEvent::RelaxEdge { .. } => Some(11),
            SemanticEvent::SetDistance { node, .. } if *node != self.graph.source => Some(12),
            SemanticEvent::SetDistance { .. } => Some(3),
            _ => None,
        }
    }
}

pub fn floyd_warshall(input: &AlgorithmInput) -> SceneResult<Box<dyn Stepper>> {
    let kind = AlgorithmKind::FloydWarshall;
    let AlgorithmInput::Matrix { cells } = input else {
        return Err(input.mismatch(kind, "matrix"));
    };
    if cells.is_empty() {
        return Err(SceneError::shape(format!("{kind}: matrix is empty")));
    }
    if cells.iter().any(|row| row.len() != cells.len()) {
        return Err(SceneError::validation(format!(
            "{kind}: distance matrix must be square"
        )));
    }
    Ok(Box::new(FloydWarshall {
        dist: cells.clone(),
    }))
}

const FLOYD_WARSHALL_SOURCE: &str = "\
def floyd_warshall(dist):
    V = len(dist)
    for k in range(V):
        for i in range(V):
            for j in range(V):
                if dist[i][k] + dist[k][j] < dist[i][j]:
                    dist[i][j] = dist[i][k] + dist[k][j]
    return dist";

/// All-pairs shortest paths over a distance matrix.
#[derive(Clone, Debug)]
pub struct FloydWarshall {
    dist: Vec<Vec<Option<i64>>>,
}

impl Stepper for FloydWarshall {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::FloydWarshall
    }

    fn title(&self) -> String {
        "Floyd-Warshall (All-Pairs Shortest Path)".to_owned()
    }

    fn shape(&self) -> DatasetShape {
        let labels: Vec<String> = (0..self.dist.len()).map(|i| format!("V{i}")).collect();
        DatasetShape::Grid {
            cells: self.dist.clone(),
            row_labels: labels.clone(),
            col_labels: labels,
            style: GridStyle::Matrix,
        }
    }

    fn simulate(&self, trace: &mut Trace) -> SceneResult<()> {
        let mut d = self.dist.clone();
        let v = d.len();
        for k in 0..v {
            trace.push(SemanticEvent::ConsiderVia { k })?;
            for i in (0..v).filter(|&i| i != k) {
                for j in (0..v).filter(|&j| j != k) {
                    trace.push(SemanticEvent::ProbeCell { row: i, col: j })?;
                    let (Some(ik), Some(kj)) = (d[i][k], d[k][j]) else {
                        continue;
                    };
                    let through = ik.saturating_add(kj);
                    if d[i][j].is_none_or(|cur| through < cur) {
                        d[i][j] = Some(through);
                        trace.push(SemanticEvent::FillCell {
                            row: i,
                            col: j,
                            value: through,
                            reason: FillReason::ShorterPath { via: k },
                        })?;
                    }
                }
            }
            trace.push(SemanticEvent::ReleaseVia { k })?;
        }
        trace.push(SemanticEvent::Finish)
    }

    fn source(&self, _level: NarrativeLevel) -> &'static str {
        FLOYD_WARSHALL_SOURCE
    }

    fn code_line(&self, event: &SemanticEvent, _level: NarrativeLevel) -> Option<u32> {
        match event {
            SemanticEvent::ConsiderVia { .. } => Some(3),
            SemanticEvent::ProbeCell { .. } => Some(6),
            SemanticEvent::FillCell { .. } => Some(7),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/simulate/graph.rs"]
mod tests;
