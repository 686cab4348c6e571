use super::*;
use crate::foundation::sample::SampleSource;

fn sample(kind: AlgorithmKind) -> AlgorithmInput {
    AlgorithmInput::sample(kind, &mut SampleSource::new(0), NarrativeLevel::Beginner)
}

fn run(stepper: &dyn Stepper) -> Vec<SemanticEvent> {
    let mut trace = Trace::new(10_000);
    stepper.simulate(&mut trace).unwrap();
    trace.into_events()
}

fn visit_order(events: &[SemanticEvent]) -> Vec<usize> {
    events
        .iter()
        .filter_map(|e| match *e {
            SemanticEvent::Visit { node, .. } => Some(node),
            _ => None,
        })
        .collect()
}

#[test]
fn bfs_visits_level_by_level() {
    let s = bfs(&sample(AlgorithmKind::Bfs)).unwrap();
    let events = run(s.as_ref());
    assert_eq!(visit_order(&events), vec![0, 1, 2, 3, 4, 5, 6]);
    assert!(events.contains(&SemanticEvent::Visit {
        node: 4,
        order: 5,
        from: Some(1)
    }));
}

#[test]
fn dfs_explores_the_first_child_first() {
    let s = dfs(&sample(AlgorithmKind::Dfs)).unwrap();
    let events = run(s.as_ref());
    assert_eq!(visit_order(&events), vec![0, 1, 3, 4, 2, 5, 6]);
}

#[test]
fn traversals_only_reach_connected_nodes() {
    let input = AlgorithmInput::Graph {
        nodes: vec![GraphNode::new("A"), GraphNode::new("B"), GraphNode::new("C")],
        edges: vec![GraphEdge::new(1, 0)],
        source: 0,
        directed: true,
    };
    let s = bfs(&input).unwrap();
    assert_eq!(visit_order(&run(s.as_ref())), vec![0]);
}

#[test]
fn bellman_ford_settles_textbook_distances() {
    let s = bellman_ford(&sample(AlgorithmKind::BellmanFord)).unwrap();
    let events = run(s.as_ref());
    let mut dist = [None; 6];
    for e in &events {
        if let SemanticEvent::SetDistance { node, distance } = *e {
            dist[node] = Some(distance);
        }
    }
    assert_eq!(
        dist,
        [Some(0), Some(2), Some(7), Some(4), Some(-2), Some(0)]
    );
    let rounds = events
        .iter()
        .filter(|e| matches!(e, SemanticEvent::Pass { .. }))
        .count();
    assert_eq!(rounds, 3);
    assert!(!events
        .iter()
        .any(|e| matches!(e, SemanticEvent::NegativeCycle { .. })));
}

#[test]
fn bellman_ford_reports_negative_cycles() {
    let input = AlgorithmInput::Graph {
        nodes: vec![GraphNode::new("S"), GraphNode::new("A"), GraphNode::new("B")],
        edges: vec![
            GraphEdge::weighted(0, 1, 1),
            GraphEdge::weighted(1, 2, -2),
            GraphEdge::weighted(2, 1, 1),
        ],
        source: 0,
        directed: true,
    };
    let s = bellman_ford(&input).unwrap();
    let events = run(s.as_ref());
    assert!(events
        .iter()
        .any(|e| matches!(e, SemanticEvent::NegativeCycle { .. })));
    assert_eq!(events.last(), Some(&SemanticEvent::Finish));
}

#[test]
fn dijkstra_finishes_the_nearest_node_first() {
    let s = dijkstra(&sample(AlgorithmKind::Dijkstra)).unwrap();
    let events = run(s.as_ref());
    assert_eq!(visit_order(&events), vec![0, 2, 1, 3, 4]);
    let mut dist = [None; 5];
    for e in &events {
        if let SemanticEvent::SetDistance { node, distance } = *e {
            dist[node] = Some(distance);
        }
    }
    assert_eq!(dist, [Some(0), Some(4), Some(2), Some(5), Some(6)]);
    assert!(events.contains(&SemanticEvent::Visit {
        node: 4,
        order: 5,
        from: Some(3)
    }));
    // B is already finished when D is reached, so the 10-weight road is never relaxed
    assert!(!events.iter().any(|e| matches!(
        e,
        SemanticEvent::RelaxEdge { from: 3, to: 1, .. }
    )));
}

#[test]
fn dijkstra_rejects_negative_weights() {
    let input = AlgorithmInput::Graph {
        nodes: vec![GraphNode::new("A"), GraphNode::new("B")],
        edges: vec![GraphEdge::weighted(0, 1, -1)],
        source: 0,
        directed: true,
    };
    assert!(matches!(dijkstra(&input), Err(SceneError::Validation(_))));
}

#[test]
fn floyd_warshall_probes_every_off_axis_cell() {
    let s = floyd_warshall(&sample(AlgorithmKind::FloydWarshall)).unwrap();
    let events = run(s.as_ref());
    let probes = events
        .iter()
        .filter(|e| matches!(e, SemanticEvent::ProbeCell { .. }))
        .count();
    assert_eq!(probes, 4 * 3 * 3);
    let mut d = [[None; 4]; 4];
    for e in &events {
        if let SemanticEvent::FillCell {
            row, col, value, ..
        } = *e
        {
            d[row][col] = Some(value);
        }
    }
    assert_eq!(d[0][2], Some(5));
    assert_eq!(d[3][1], Some(5));
    assert!(events.contains(&SemanticEvent::FillCell {
        row: 1,
        col: 3,
        value: 15,
        reason: FillReason::ShorterPath { via: 0 }
    }));
}

#[test]
fn malformed_graphs_are_rejected() {
    let bad_source = AlgorithmInput::Graph {
        nodes: vec![GraphNode::new("A")],
        edges: vec![],
        source: 3,
        directed: false,
    };
    assert!(matches!(bfs(&bad_source), Err(SceneError::Validation(_))));
    let empty = AlgorithmInput::Graph {
        nodes: vec![],
        edges: vec![],
        source: 0,
        directed: false,
    };
    assert!(matches!(dfs(&empty), Err(SceneError::Shape(_))));
    let ragged = AlgorithmInput::Matrix {
        cells: vec![vec![Some(0), Some(1)]],
    };
    assert!(floyd_warshall(&ragged).is_err());
}
