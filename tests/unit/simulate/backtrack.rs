use super::*;

fn run(n: usize) -> Vec<SemanticEvent> {
    let s = n_queens(&AlgorithmInput::Board { n }).unwrap();
    let mut trace = Trace::new(50_000);
    s.simulate(&mut trace).unwrap();
    trace.into_events()
}

fn final_queens(events: &[SemanticEvent]) -> Vec<(usize, usize)> {
    let mut queens = Vec::new();
    for e in events {
        match *e {
            SemanticEvent::PlaceQueen { row, col } => queens.push((row, col)),
            SemanticEvent::RemoveQueen { row, col } => {
                assert_eq!(queens.pop(), Some((row, col)));
            }
            _ => {}
        }
    }
    queens
}

#[test]
fn four_queens_first_solution() {
    let events = run(4);
    assert_eq!(final_queens(&events), vec![(0, 1), (1, 3), (2, 0), (3, 2)]);
    assert_eq!(events[0], SemanticEvent::TryCell { row: 0, col: 0 });
    assert!(events.contains(&SemanticEvent::RemoveQueen { row: 0, col: 0 }));
    assert_eq!(events.last(), Some(&SemanticEvent::Finish));
}

#[test]
fn every_try_is_resolved() {
    let events = run(6);
    let tries = events
        .iter()
        .filter(|e| matches!(e, SemanticEvent::TryCell { .. }))
        .count();
    let resolved = events
        .iter()
        .filter(|e| matches!(e, SemanticEvent::PlaceQueen { .. } | SemanticEvent::RejectCell { .. }))
        .count();
    assert_eq!(tries, resolved);
    let queens = final_queens(&events);
    assert_eq!(queens.len(), 6);
    for (i, a) in queens.iter().enumerate() {
        for b in &queens[i + 1..] {
            assert_ne!(a.1, b.1);
            assert_ne!(a.0.abs_diff(b.0), a.1.abs_diff(b.1));
        }
    }
}

#[test]
fn board_sizes_are_bounded() {
    assert!(matches!(
        n_queens(&AlgorithmInput::Board { n: 0 }),
        Err(SceneError::Shape(_))
    ));
    assert!(n_queens(&AlgorithmInput::Board { n: 3 }).is_err());
    assert!(n_queens(&AlgorithmInput::Board { n: 9 }).is_err());
    assert_eq!(run(1).len(), 3);
}
