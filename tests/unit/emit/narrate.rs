use super::*;

fn sort(level: NarrativeLevel) -> Narrator {
    Narrator::new(level, Flavor::Sort, Vec::new())
}

#[test]
fn compare_wording_depends_on_level() {
    let e = SemanticEvent::Compare {
        i: 0,
        j: 1,
        left: 5,
        right: 3,
    };
    assert_eq!(
        sort(NarrativeLevel::Kids).narrative(&e).as_deref(),
        Some("Is 5 bigger than 3?")
    );
    assert_eq!(
        sort(NarrativeLevel::Beginner).narrative(&e).as_deref(),
        Some("Compare 5 and 3.")
    );
    let texts: std::collections::BTreeSet<_> = NarrativeLevel::ALL
        .iter()
        .filter_map(|&l| sort(l).narrative(&e))
        .collect();
    assert_eq!(texts.len(), 4);
}

#[test]
fn graph_events_use_node_labels() {
    let n = Narrator::new(
        NarrativeLevel::Beginner,
        Flavor::Traversal,
        vec!["A".into(), "B".into()],
    );
    assert_eq!(
        n.narrative(&SemanticEvent::Visit { node: 1, order: 2, from: Some(0) }).as_deref(),
        Some("Visiting node B.")
    );
    assert_eq!(
        n.status(&SemanticEvent::Visit { node: 0, order: 1, from: None }).as_deref(),
        Some("Visit #1: A")
    );
    // unknown nodes fall back to their index
    assert_eq!(
        n.narrative(&SemanticEvent::Visit { node: 7, order: 3, from: None }).as_deref(),
        Some("Visiting node 7.")
    );
}

#[test]
fn silent_events_have_no_caption() {
    let n = sort(NarrativeLevel::Advanced);
    assert!(n.narrative(&SemanticEvent::MarkSorted { index: 0 }).is_none());
    assert!(n.narrative(&SemanticEvent::ClearMin { index: 0 }).is_none());
    assert!(n.status(&SemanticEvent::Compare { i: 0, j: 1, left: 1, right: 2 }).is_none());
    assert_eq!(n.status(&SemanticEvent::Finish).as_deref(), Some("Array Sorted!"));
}

#[test]
fn levels_parse_from_strings() {
    assert_eq!("Kids".parse::<NarrativeLevel>().unwrap(), NarrativeLevel::Kids);
    assert_eq!(" advanced ".parse::<NarrativeLevel>().unwrap(), NarrativeLevel::Advanced);
    assert!("guru".parse::<NarrativeLevel>().is_err());
    assert_eq!(NarrativeLevel::Intermediate.to_string(), "intermediate");
}

#[test]
fn pass_caption_does_not_assume_bubbling() {
    let n = sort(NarrativeLevel::Intermediate);
    let text = n.narrative(&SemanticEvent::Pass { number: 2 }).unwrap();
    assert_eq!(text, "Pass 2: one more value reaches its final place.");
    assert!(!text.contains("bubble"));
}

#[test]
fn spanning_tree_events_read_as_roads_and_totals() {
    let n = Narrator::new(
        NarrativeLevel::Beginner,
        Flavor::SpanningTree,
        vec!["A".into(), "B".into(), "C".into()],
    );
    let accept = SemanticEvent::AcceptEdge {
        from: 0,
        to: 2,
        weight: 4,
        total: 9,
    };
    assert_eq!(
        n.narrative(&accept).as_deref(),
        Some("Add edge A-C to the tree (total weight 9).")
    );
    assert_eq!(n.status(&accept).as_deref(), Some("MST weight: 9"));
    assert_eq!(
        n.narrative(&SemanticEvent::RejectEdge { from: 1, to: 2, weight: 5 }).as_deref(),
        Some("Edge B-C would form a cycle, skip it.")
    );
    assert_eq!(n.status(&SemanticEvent::Finish).as_deref(), Some("MST Complete"));
}

#[test]
fn scans_and_sums_report_running_values() {
    let n = Narrator::new(NarrativeLevel::Beginner, Flavor::Scan, Vec::new());
    let step = SemanticEvent::ScanStep {
        index: 3,
        value: 4,
        current: 4,
        best: 4,
        restart: true,
    };
    assert_eq!(n.status(&step).as_deref(), Some("Current sum: 4, Max sum: 4"));
    assert_eq!(
        n.narrative(&step).as_deref(),
        Some("Start a new subarray at 4: current sum 4.")
    );
    assert!(n.narrative(&SemanticEvent::Finish).is_none());

    let table = Narrator::new(NarrativeLevel::Beginner, Flavor::Table, Vec::new());
    let fill = SemanticEvent::FillCell {
        row: 0,
        col: 5,
        value: 5,
        reason: FillReason::Sum { left: 3, right: 2 },
    };
    assert_eq!(
        table.narrative(&fill).as_deref(),
        Some("F(5) = F(4) + F(3) = 3 + 2 = 5")
    );
}
