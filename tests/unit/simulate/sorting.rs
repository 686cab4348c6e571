use super::*;

fn run(stepper: &dyn Stepper) -> Vec<SemanticEvent> {
    let mut trace = Trace::new(100_000);
    stepper.simulate(&mut trace).unwrap();
    trace.into_events()
}

fn replay(values: &[i64], events: &[SemanticEvent]) -> Vec<i64> {
    let mut a = values.to_vec();
    for e in events {
        match *e {
            SemanticEvent::Swap { i, j, left, right } => {
                assert_eq!((a[i], a[j]), (left, right));
                a.swap(i, j);
            }
            SemanticEvent::Assign {
                index,
                value,
                previous,
            } => {
                assert_eq!(a[index], previous);
                a[index] = value;
            }
            _ => {}
        }
    }
    a
}

fn array(values: &[i64]) -> AlgorithmInput {
    AlgorithmInput::Array {
        values: values.to_vec(),
    }
}

#[test]
fn bubble_sort_example_has_four_passes() {
    let input = [5, 3, 8, 1, 4];
    let s = bubble(&array(&input)).unwrap();
    let events = run(s.as_ref());

    let passes = events
        .iter()
        .filter(|e| matches!(e, SemanticEvent::Pass { .. }))
        .count();
    assert_eq!(passes, 4);

    let pass2 = events
        .iter()
        .position(|e| *e == SemanticEvent::Pass { number: 2 })
        .unwrap();
    let last_compare = events[..pass2]
        .iter()
        .rev()
        .find_map(|e| match *e {
            SemanticEvent::Compare { left, right, .. } => Some((left, right)),
            _ => None,
        })
        .unwrap();
    assert_eq!(last_compare, (8, 4));
    assert!(matches!(
        events[..pass2].iter().rev().find(|e| matches!(e, SemanticEvent::Swap { .. })),
        Some(SemanticEvent::Swap { left: 8, right: 4, .. })
    ));

    assert_eq!(replay(&input, &events), vec![1, 3, 4, 5, 8]);
    let mut marked: Vec<usize> = events
        .iter()
        .filter_map(|e| match *e {
            SemanticEvent::MarkSorted { index } => Some(index),
            _ => None,
        })
        .collect();
    marked.sort_unstable();
    assert_eq!(marked, vec![0, 1, 2, 3, 4]);
    assert_eq!(events.last(), Some(&SemanticEvent::Finish));
}

#[test]
fn bubble_sort_exits_early_on_sorted_input() {
    let s = bubble(&array(&[1, 2, 3, 4])).unwrap();
    let events = run(s.as_ref());
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, SemanticEvent::Pass { .. }))
            .count(),
        1
    );
    assert!(!events.iter().any(|e| matches!(e, SemanticEvent::Swap { .. })));
}

#[test]
fn selection_sort_keeps_the_first_of_equal_minimums() {
    let s = selection(&array(&[3, 1, 1])).unwrap();
    let events = run(s.as_ref());
    let first_swap = events
        .iter()
        .find(|e| matches!(e, SemanticEvent::Swap { .. }))
        .unwrap();
    assert_eq!(
        *first_swap,
        SemanticEvent::Swap {
            i: 0,
            j: 1,
            left: 3,
            right: 1
        }
    );
    assert_eq!(replay(&[3, 1, 1], &events), vec![1, 1, 3]);
}

#[test]
fn selection_sort_balances_min_markers() {
    let s = selection(&array(&[4, 2, 9, 1])).unwrap();
    let events = run(s.as_ref());
    let sets = events
        .iter()
        .filter(|e| matches!(e, SemanticEvent::SetMin { .. }))
        .count();
    let clears = events
        .iter()
        .filter(|e| matches!(e, SemanticEvent::ClearMin { .. }))
        .count();
    assert_eq!(sets, clears);
}

#[test]
fn quick_sort_marks_every_slot_once() {
    let input = [9, 4, 7, 4, 1, 8, 2];
    let s = quick(&array(&input)).unwrap();
    let events = run(s.as_ref());
    let mut sorted = input.to_vec();
    sorted.sort_unstable();
    assert_eq!(replay(&input, &events), sorted);
    let mut marked: Vec<usize> = events
        .iter()
        .filter_map(|e| match *e {
            SemanticEvent::MarkSorted { index } => Some(index),
            _ => None,
        })
        .collect();
    marked.sort_unstable();
    assert_eq!(marked, (0..input.len()).collect::<Vec<_>>());
    // first pivot is the last element
    assert_eq!(
        events[0],
        SemanticEvent::SetPivot { index: 6, value: 2 }
    );
}

#[test]
fn merge_sort_splits_at_half_and_writes_via_assign() {
    let input = [5, 2, 4, 6, 1, 3];
    let s = merge(&array(&input)).unwrap();
    let events = run(s.as_ref());
    assert_eq!(
        events[0],
        SemanticEvent::Split {
            low: 0,
            mid: 3,
            high: 5
        }
    );
    assert!(!events.iter().any(|e| matches!(e, SemanticEvent::Swap { .. })));
    assert_eq!(replay(&input, &events), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn single_element_arrays_finish_immediately() {
    for factory in [bubble, selection, quick, merge] {
        let s = factory(&array(&[7])).unwrap();
        let events = run(s.as_ref());
        assert_eq!(
            events,
            vec![SemanticEvent::MarkSorted { index: 0 }, SemanticEvent::Finish]
        );
    }
}

#[test]
fn empty_or_mismatched_inputs_are_rejected() {
    assert!(matches!(bubble(&array(&[])), Err(SceneError::Shape(_))));
    assert!(matches!(
        merge(&AlgorithmInput::Board { n: 4 }),
        Err(SceneError::Validation(_))
    ));
}

#[test]
fn code_lines_point_into_the_listing() {
    let s = bubble(&array(&[2, 1])).unwrap();
    for level in NarrativeLevel::ALL {
        let lines = s.source(level).lines().count() as u32;
        for e in run(s.as_ref()) {
            if let Some(line) = s.code_line(&e, level) {
                assert!(line >= 1 && line <= lines, "{e:?} -> {line}");
            }
        }
    }
}
