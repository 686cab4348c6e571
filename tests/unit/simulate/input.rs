use super::*;

#[test]
fn samples_are_reproducible_per_seed() {
    let a = AlgorithmInput::sample(
        AlgorithmKind::BubbleSort,
        &mut SampleSource::new(42),
        NarrativeLevel::Beginner,
    );
    let b = AlgorithmInput::sample(
        AlgorithmKind::BubbleSort,
        &mut SampleSource::new(42),
        NarrativeLevel::Beginner,
    );
    assert_eq!(a, b);
    let AlgorithmInput::Array { values } = a else {
        panic!("expected an array");
    };
    assert_eq!(values.len(), 6);
    assert!(values.iter().all(|v| (10..=99).contains(v)));
}

#[test]
fn kids_get_smaller_arrays() {
    let input = AlgorithmInput::sample(
        AlgorithmKind::SelectionSort,
        &mut SampleSource::new(3),
        NarrativeLevel::Kids,
    );
    let AlgorithmInput::Array { values } = input else {
        panic!("expected an array");
    };
    assert_eq!(values.len(), 5);
    assert!(values.iter().all(|v| (1..=10).contains(v)));
}

#[test]
fn search_samples_are_sorted_and_contain_the_target() {
    for seed in 0..20 {
        let input = AlgorithmInput::sample(
            AlgorithmKind::BinarySearch,
            &mut SampleSource::new(seed),
            NarrativeLevel::Intermediate,
        );
        let AlgorithmInput::Search { values, target } = input else {
            panic!("expected a search input");
        };
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
        assert!(values.contains(&target));
    }
}

#[test]
fn inputs_round_trip_through_tagged_json() {
    let json = r#"{"input": "strings", "a": "ABC", "b": "AC"}"#;
    let input: AlgorithmInput = serde_json::from_str(json).unwrap();
    assert_eq!(
        input,
        AlgorithmInput::Strings {
            a: "ABC".into(),
            b: "AC".into()
        }
    );
    let graph: AlgorithmInput = serde_json::from_str(
        r#"{"input": "graph", "nodes": [{"label": "A"}, {"label": "B"}], "edges": [{"from": 0, "to": 1, "weight": 3}]}"#,
    )
    .unwrap();
    assert!(matches!(graph, AlgorithmInput::Graph { source: 0, directed: false, .. }));
    assert_eq!(graph.variant(), "graph");
}

#[test]
fn sequences_and_bounded_samples() {
    let seq: AlgorithmInput = serde_json::from_str(r#"{"input": "sequence", "n": 5}"#).unwrap();
    assert_eq!(seq, AlgorithmInput::Sequence { n: 5 });
    assert_eq!(seq.variant(), "sequence");

    let counting = AlgorithmInput::sample(
        AlgorithmKind::CountingSort,
        &mut SampleSource::new(9),
        NarrativeLevel::Beginner,
    );
    let AlgorithmInput::Array { values } = counting else {
        panic!("expected an array");
    };
    assert_eq!(values.len(), 8);
    assert!(values.iter().all(|v| (0..=9).contains(v)));
}
