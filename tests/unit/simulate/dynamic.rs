use super::*;
use crate::foundation::sample::SampleSource;

fn final_table(stepper: &dyn Stepper, rows: usize, cols: usize) -> (Vec<SemanticEvent>, Vec<Vec<Option<i64>>>) {
    let mut trace = Trace::new(10_000);
    stepper.simulate(&mut trace).unwrap();
    let events = trace.into_events();
    let mut table = vec![vec![None; cols]; rows];
    for e in &events {
        if let SemanticEvent::FillCell { row, col, value, .. } = *e {
            assert!(table[row][col].is_none(), "cell ({row}, {col}) filled twice");
            table[row][col] = Some(value);
        }
    }
    (events, table)
}

fn sample(kind: AlgorithmKind) -> AlgorithmInput {
    AlgorithmInput::sample(kind, &mut SampleSource::new(1), NarrativeLevel::Beginner)
}

#[test]
fn knapsack_fills_every_cell_once_and_finds_the_optimum() {
    let s = knapsack(&sample(AlgorithmKind::Knapsack)).unwrap();
    let (events, table) = final_table(s.as_ref(), 5, 9);
    assert!(table.iter().flatten().all(Option::is_some));
    assert_eq!(table[4][8], Some(10));
    // base row and column come first
    let first_interior = events
        .iter()
        .position(|e| matches!(e, SemanticEvent::FillCell { reason, .. } if *reason != FillReason::Base))
        .unwrap();
    assert_eq!(first_interior, 9 + 4);
    assert!(events.contains(&SemanticEvent::FillCell {
        row: 1,
        col: 1,
        value: 0,
        reason: FillReason::Skip
    }));
}

#[test]
fn lcs_of_textbook_strings_is_four() {
    let s = lcs(&sample(AlgorithmKind::Lcs)).unwrap();
    let (_, table) = final_table(s.as_ref(), 7, 8);
    assert_eq!(table[6][7], Some(4));
}

#[test]
fn edit_distance_of_sunday_saturday_is_three() {
    let s = edit_distance(&sample(AlgorithmKind::EditDistance)).unwrap();
    let (events, table) = final_table(s.as_ref(), 7, 9);
    assert_eq!(table[6][8], Some(3));
    assert_eq!(table[0][5], Some(5));
    assert_eq!(table[4][0], Some(4));
    assert!(events.iter().any(|e| matches!(
        e,
        SemanticEvent::FillCell {
            reason: FillReason::Match,
            ..
        }
    )));
}

#[test]
fn table_shape_matches_the_inputs() {
    let s = lcs(&AlgorithmInput::Strings {
        a: "AB".into(),
        b: "B".into(),
    })
    .unwrap();
    let DatasetShape::Grid {
        cells,
        row_labels,
        col_labels,
        ..
    } = s.shape()
    else {
        panic!("expected a grid");
    };
    assert_eq!((cells.len(), cells[0].len()), (3, 2));
    assert_eq!(row_labels, vec!["", "A", "B"]);
    assert_eq!(col_labels, vec!["", "B"]);
}

#[test]
fn degenerate_and_oversized_inputs_are_rejected() {
    let empty = AlgorithmInput::Strings {
        a: String::new(),
        b: String::new(),
    };
    assert!(matches!(lcs(&empty), Err(SceneError::Shape(_))));
    let huge = AlgorithmInput::Knapsack {
        items: vec![Item { weight: 1, value: 1 }],
        capacity: 500,
    };
    assert!(matches!(knapsack(&huge), Err(SceneError::Validation(_))));
    assert!(matches!(
        edit_distance(&AlgorithmInput::Board { n: 3 }),
        Err(SceneError::Validation(_))
    ));
}

#[test]
fn knapsack_overflow_is_a_validation_error() {
    let max_capacity = AlgorithmInput::Knapsack {
        items: vec![Item { weight: 1, value: 1 }],
        capacity: usize::MAX,
    };
    assert!(matches!(knapsack(&max_capacity), Err(SceneError::Validation(_))));

    let rich = AlgorithmInput::Knapsack {
        items: vec![
            Item {
                weight: 1,
                value: i64::MAX,
            },
            Item {
                weight: 1,
                value: i64::MAX,
            },
        ],
        capacity: 2,
    };
    assert!(matches!(knapsack(&rich), Err(SceneError::Validation(_))));
}

#[test]
fn knapsack_with_one_huge_value_still_simulates() {
    let input = AlgorithmInput::Knapsack {
        items: vec![
            Item {
                weight: 1,
                value: i64::MAX,
            },
            Item {
                weight: 1,
                value: -5,
            },
        ],
        capacity: 2,
    };
    let s = knapsack(&input).unwrap();
    let (_, table) = final_table(s.as_ref(), 3, 3);
    assert_eq!(table[2][2], Some(i64::MAX));
}

#[test]
fn fibonacci_reads_the_two_previous_cells() {
    let s = fibonacci(&sample(AlgorithmKind::Fibonacci)).unwrap();
    let (events, table) = final_table(s.as_ref(), 1, 10);
    let row: Vec<i64> = table[0].iter().map(|v| v.unwrap()).collect();
    assert_eq!(row, vec![0, 1, 1, 2, 3, 5, 8, 13, 21, 34]);
    let at = events
        .iter()
        .position(|e| matches!(e, SemanticEvent::FillCell { col: 5, .. }))
        .unwrap();
    assert_eq!(
        events[at - 2..=at],
        [
            SemanticEvent::ProbeCell { row: 0, col: 4 },
            SemanticEvent::ProbeCell { row: 0, col: 3 },
            SemanticEvent::FillCell {
                row: 0,
                col: 5,
                value: 5,
                reason: FillReason::Sum { left: 3, right: 2 },
            },
        ]
    );
}

#[test]
fn fibonacci_bounds_are_checked() {
    assert!(matches!(
        fibonacci(&AlgorithmInput::Sequence { n: 0 }),
        Err(SceneError::Shape(_))
    ));
    assert!(matches!(
        fibonacci(&AlgorithmInput::Sequence { n: 32 }),
        Err(SceneError::Validation(_))
    ));
    let one = fibonacci(&AlgorithmInput::Sequence { n: 1 }).unwrap();
    let (_, table) = final_table(one.as_ref(), 1, 1);
    assert_eq!(table, vec![vec![Some(0)]]);
}
