use super::*;

fn run(values: Vec<i64>) -> Vec<SemanticEvent> {
    let s = max_subarray(&AlgorithmInput::Array { values }).unwrap();
    let mut trace = Trace::new(1_000);
    s.simulate(&mut trace).unwrap();
    trace.into_events()
}

fn answer(events: &[SemanticEvent]) -> Option<(usize, usize, i64)> {
    events.iter().find_map(|e| match *e {
        SemanticEvent::BestRange { from, to, sum } => Some((from, to, sum)),
        _ => None,
    })
}

#[test]
fn textbook_array_peaks_at_six() {
    let events = run(vec![-2, 1, -3, 4, -1, 2, 1, -5, 4]);
    assert_eq!(answer(&events), Some((3, 6, 6)));
    let restarts: Vec<usize> = events
        .iter()
        .filter_map(|e| match *e {
            SemanticEvent::ScanStep {
                index,
                restart: true,
                ..
            } => Some(index),
            _ => None,
        })
        .collect();
    assert_eq!(restarts, vec![0, 1, 3]);
    assert_eq!(events.last(), Some(&SemanticEvent::Finish));
}

#[test]
fn all_negative_input_picks_the_largest_single_value() {
    assert_eq!(answer(&run(vec![-8, -3, -6, -2, -5])), Some((3, 3, -2)));
}

#[test]
fn ties_keep_the_earliest_range() {
    assert_eq!(answer(&run(vec![3, -5, 3])), Some((0, 0, 3)));
}

#[test]
fn running_sum_overflow_is_a_validation_error() {
    let s = max_subarray(&AlgorithmInput::Array {
        values: vec![i64::MAX, 1],
    })
    .unwrap();
    let mut trace = Trace::new(100);
    assert!(matches!(
        s.simulate(&mut trace),
        Err(SceneError::Validation(_))
    ));
}

#[test]
fn empty_arrays_are_shape_errors() {
    assert!(matches!(
        max_subarray(&AlgorithmInput::Array { values: vec![] }),
        Err(SceneError::Shape(_))
    ));
}
