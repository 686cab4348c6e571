use super::*;
use crate::foundation::sample::SampleSource;

#[test]
fn kinds_parse_from_classifier_keys_and_aliases() {
    for kind in AlgorithmKind::ALL {
        assert_eq!(kind.key().parse::<AlgorithmKind>().unwrap(), kind);
    }
    assert_eq!("bubble".parse::<AlgorithmKind>().unwrap(), AlgorithmKind::BubbleSort);
    assert_eq!("N-Queens".parse::<AlgorithmKind>().unwrap(), AlgorithmKind::NQueens);
    assert_eq!(" Floyd ".parse::<AlgorithmKind>().unwrap(), AlgorithmKind::FloydWarshall);
    assert_eq!("kadane".parse::<AlgorithmKind>().unwrap(), AlgorithmKind::MaxSubarray);
    assert_eq!("mst".parse::<AlgorithmKind>().unwrap(), AlgorithmKind::KruskalMst);
    assert_eq!("prim".parse::<AlgorithmKind>().unwrap(), AlgorithmKind::PrimMst);
    assert!(matches!(
        "bogo_sort".parse::<AlgorithmKind>(),
        Err(SceneError::Validation(_))
    ));
}

#[test]
fn kinds_serialize_as_snake_case() {
    let json = serde_json::to_string(&AlgorithmKind::EditDistance).unwrap();
    assert_eq!(json, "\"edit_distance\"");
}

#[test]
fn trace_enforces_its_budget() {
    let mut t = Trace::new(2);
    t.push(SemanticEvent::Finish).unwrap();
    t.push(SemanticEvent::Finish).unwrap();
    assert!(matches!(
        t.push(SemanticEvent::Finish),
        Err(SceneError::Simulation(_))
    ));
    assert_eq!(t.len(), 2);
}

#[test]
fn default_registry_covers_every_kind_with_sample_inputs() {
    let registry = StepperRegistry::global();
    for kind in AlgorithmKind::ALL {
        assert!(registry.contains(kind), "{kind}");
        let input = AlgorithmInput::sample(kind, &mut SampleSource::new(7), NarrativeLevel::Beginner);
        let stepper = registry.resolve(kind, &input).unwrap();
        assert_eq!(stepper.kind(), kind);
        assert!(!stepper.title().is_empty());
        assert!(!stepper.shape().is_empty());
        let mut trace = Trace::new(50_000);
        stepper.simulate(&mut trace).unwrap();
        assert_eq!(trace.events().last(), Some(&SemanticEvent::Finish), "{kind}");
    }
}

#[test]
fn registry_rejects_unregistered_kinds_and_factory_mismatches() {
    let mut r = StepperRegistry::new();
    let input = AlgorithmInput::Array { values: vec![1] };
    assert!(matches!(
        r.resolve(AlgorithmKind::BubbleSort, &input),
        Err(SceneError::Validation(_))
    ));
    r.register(AlgorithmKind::BubbleSort, crate::simulate::sorting::merge);
    assert!(r.resolve(AlgorithmKind::BubbleSort, &input).is_err());
    assert_eq!(r.kinds().collect::<Vec<_>>(), vec![AlgorithmKind::BubbleSort]);
}

#[test]
fn runaway_steppers_hit_the_budget() {
    let input = AlgorithmInput::Array {
        values: (0..20).rev().collect(),
    };
    let stepper = StepperRegistry::global()
        .resolve(AlgorithmKind::BubbleSort, &input)
        .unwrap();
    let mut trace = Trace::new(10);
    assert!(matches!(
        stepper.simulate(&mut trace),
        Err(SceneError::Simulation(_))
    ));
}
