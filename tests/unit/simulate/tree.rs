use super::*;
use crate::layout::shape::bst_links;

#[test]
fn insertion_descends_and_links_like_the_layout() {
    let keys = vec![50, 30, 70, 20, 40, 60, 80];
    let s = bst_insert(&AlgorithmInput::Keys { keys: keys.clone() }).unwrap();
    let mut trace = Trace::new(1_000);
    s.simulate(&mut trace).unwrap();
    let events = trace.into_events();

    assert_eq!(
        events[0],
        SemanticEvent::InsertNode {
            node: 0,
            parent: None,
            key: 50
        }
    );
    let links = bst_links(&keys);
    for e in &events {
        if let SemanticEvent::InsertNode { node, parent, .. } = *e {
            assert_eq!(parent, links[node].parent);
        }
    }
    let descents_for_40 = events
        .iter()
        .filter(|e| matches!(e, SemanticEvent::Descend { key: 40, .. }))
        .count();
    assert_eq!(descents_for_40, links[4].depth);
    assert!(events.contains(&SemanticEvent::Descend {
        node: 1,
        key: 40,
        left: false
    }));
}

#[test]
fn rejects_empty_and_oversized_key_sets() {
    assert!(matches!(
        bst_insert(&AlgorithmInput::Keys { keys: vec![] }),
        Err(SceneError::Shape(_))
    ));
    let many: Vec<i64> = (0..40).collect();
    assert!(bst_insert(&AlgorithmInput::Keys { keys: many }).is_err());
}
