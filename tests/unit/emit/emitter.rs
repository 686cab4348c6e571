use super::*;
use crate::emit::narrate::{Flavor, NarrativeLevel};
use crate::foundation::core::Canvas;
use crate::layout::shape::DatasetShape;
use crate::layout::solver::{LayoutOpts, layout};

fn array_layout(values: &[i64], pointers: bool, palette: &Palette) -> Layout {
    let shape = DatasetShape::Array {
        values: values.to_vec(),
        pointers,
    };
    layout(
        &shape,
        &LayoutOpts {
            canvas: Canvas::default(),
            palette,
            title: "Demo",
        },
    )
    .unwrap()
}

fn opts<'a>(timing: &'a TimingTable, palette: &'a Palette) -> EmitOpts<'a> {
    EmitOpts {
        timing,
        palette,
        reset: 0.2,
        lead_in: 0.5,
        reveal: 0.5,
        reveal_stagger: 0.1,
        tail_padding: 2.0,
    }
}

fn sort_narrator() -> Narrator {
    Narrator::new(NarrativeLevel::Beginner, Flavor::Sort, Vec::new())
}

fn run(events: &[SemanticEvent], values: &[i64]) -> SceneResult<EmitOutput> {
    let timing = TimingTable::defaults();
    let palette = Palette::default();
    let l = array_layout(values, false, &palette);
    emit(events, l, &sort_narrator(), |_| None, &opts(&timing, &palette))
}

fn colors_of<'a>(out: &'a EmitOutput, object: &str) -> Vec<&'a Action> {
    out.actions
        .iter()
        .filter(|a| a.object_id == object && a.kind == ActionKind::Color)
        .collect()
}

#[test]
fn reveal_phase_precedes_the_first_event() {
    let out = run(&[SemanticEvent::Compare { i: 0, j: 1, left: 5, right: 3 }], &[5, 3]).unwrap();
    let reveals: Vec<&Action> = out
        .actions
        .iter()
        .filter(|a| a.id.starts_with("reveal_"))
        .collect();
    // title, status, two bars, two labels
    assert_eq!(reveals.len(), 6);
    assert_eq!(reveals[0].start, 0.5);
    assert_eq!(reveals[1].start, 0.6);
    let reveal_end = reveals.iter().map(|a| a.end).fold(0.0, f64::max);

    let first_event = out
        .actions
        .iter()
        .filter(|a| !a.id.starts_with("reveal_"))
        .map(|a| a.start)
        .fold(f64::INFINITY, f64::min);
    assert_eq!(first_event, reveal_end);
    assert_eq!(out.end, round_time(reveal_end + 1.0 + 2.0));
}

#[test]
fn transient_highlight_returns_to_resting_colour() {
    let out = run(&[SemanticEvent::Compare { i: 0, j: 1, left: 5, right: 3 }], &[5, 3]).unwrap();
    let palette = Palette::default();
    for bar in ["bar_0", "bar_1"] {
        let colors = colors_of(&out, bar);
        assert_eq!(colors.len(), 2);
        assert_eq!(colors[0].params["color"], "#e74c3c");
        assert_eq!(colors[1].params["color"], palette.bar.as_str());
        assert_eq!(colors[0].end, colors[1].start);
        assert_eq!(round_time(colors[1].end - colors[1].start), 0.2);
        assert_eq!(round_time(colors[1].end - colors[0].start), 1.0);
    }
}

#[test]
fn permanent_marks_change_the_resting_colour() {
    let out = run(
        &[
            SemanticEvent::MarkSorted { index: 1 },
            SemanticEvent::Compare { i: 0, j: 1, left: 5, right: 3 },
        ],
        &[5, 3],
    )
    .unwrap();
    let palette = Palette::default();
    let colors = colors_of(&out, "bar_1");
    assert_eq!(colors.len(), 3);
    assert_eq!(colors[0].params["color"], palette.sorted.as_str());
    assert_eq!(colors[2].params["color"], palette.sorted.as_str());
}

#[test]
fn swap_moves_glyphs_and_rebinds_slots() {
    let palette = Palette::default();
    let timing = TimingTable::defaults();
    let l = array_layout(&[5, 3], false, &palette);
    let Geometry::Array(geo) = l.geometry.clone() else {
        panic!("expected array geometry");
    };
    let out = emit(
        &[SemanticEvent::Swap { i: 0, j: 1, left: 5, right: 3 }],
        l,
        &sort_narrator(),
        |_| None,
        &opts(&timing, &palette),
    )
    .unwrap();

    assert_eq!(out.binding.slot_values(), vec![Some(3), Some(5)]);
    assert_eq!(out.binding.slot_bodies(), vec!["bar_1", "bar_0"]);

    let moves: Vec<&Action> = out
        .actions
        .iter()
        .filter(|a| a.kind == ActionKind::Translate)
        .collect();
    assert_eq!(moves.len(), 4);
    let bar0 = moves.iter().find(|a| a.object_id == "bar_0").unwrap();
    assert_eq!(bar0.params["to"]["x"], geo.bar_x(1));
    assert_eq!(bar0.params["to"]["y"], geo.bar_top(5));
    let val1 = moves.iter().find(|a| a.object_id == "val_1").unwrap();
    assert_eq!(val1.params["to"]["x"], geo.label_pos(0, 3).x);
    assert_eq!(round_time(bar0.end - bar0.start), 2.0);
}

#[test]
fn assign_resizes_and_relabels_the_slot() {
    let out = run(
        &[SemanticEvent::Assign { index: 1, value: 9, previous: 3 }],
        &[5, 3],
    )
    .unwrap();
    assert_eq!(out.binding.slot_values(), vec![Some(5), Some(9)]);
    let resize = out
        .actions
        .iter()
        .find(|a| a.kind == ActionKind::Resize)
        .unwrap();
    assert_eq!(resize.object_id, "bar_1");
    assert!(resize.params.contains_key("height"));
    let relabel = out
        .actions
        .iter()
        .find(|a| a.object_id == "val_1" && a.params.contains_key("text"))
        .unwrap();
    assert_eq!(relabel.params["text"], "9");
}

#[test]
fn unbound_key_is_a_binding_error() {
    let err = run(&[SemanticEvent::Compare { i: 0, j: 7, left: 5, right: 0 }], &[5, 3]).unwrap_err();
    assert!(matches!(err, SceneError::Binding(_)));
}

#[test]
fn grid_events_need_a_grid_layout() {
    let err = run(&[SemanticEvent::ConsiderVia { k: 0 }], &[5, 3]).unwrap_err();
    assert!(matches!(err, SceneError::Binding(_)));
}

#[test]
fn narrative_goes_to_the_earliest_action_of_its_event() {
    let out = run(&[SemanticEvent::Compare { i: 0, j: 1, left: 5, right: 3 }], &[5, 3]).unwrap();
    let narrated: Vec<&Action> = out
        .actions
        .iter()
        .filter(|a| a.narrative.is_some())
        .collect();
    assert_eq!(narrated.len(), 1);
    assert_eq!(narrated[0].object_id, "bar_0");
    let event_start = out
        .actions
        .iter()
        .filter(|a| a.id.starts_with("compare_"))
        .map(|a| a.start)
        .fold(f64::INFINITY, f64::min);
    assert_eq!(narrated[0].start, event_start);
}

#[test]
fn silent_event_with_code_line_waits_on_status() {
    let timing = TimingTable::defaults();
    let palette = Palette::default();
    let l = array_layout(&[1, 2, 3], true, &palette);
    let narrator = Narrator::new(NarrativeLevel::Beginner, Flavor::Search, Vec::new());
    let out = emit(
        &[SemanticEvent::Finish],
        l,
        &narrator,
        |_| Some(7),
        &opts(&timing, &palette),
    )
    .unwrap();
    let wait = out
        .actions
        .iter()
        .find(|a| a.kind == ActionKind::Wait)
        .unwrap();
    assert_eq!(wait.object_id, "status");
    assert_eq!(wait.code_line, Some(7));
    assert!(wait.params.is_empty());
}

#[test]
fn silent_event_without_caption_emits_nothing() {
    let timing = TimingTable::defaults();
    let palette = Palette::default();
    let l = array_layout(&[1, 2, 3], true, &palette);
    let narrator = Narrator::new(NarrativeLevel::Beginner, Flavor::Search, Vec::new());
    let out = emit(
        &[SemanticEvent::Finish],
        l,
        &narrator,
        |_| None,
        &opts(&timing, &palette),
    )
    .unwrap();
    assert!(out.actions.iter().all(|a| a.id.starts_with("reveal_")));
}

#[test]
fn pointer_moves_show_the_pointer() {
    let timing = TimingTable::defaults();
    let palette = Palette::default();
    let l = array_layout(&[1, 2, 3], true, &palette);
    let narrator = Narrator::new(NarrativeLevel::Beginner, Flavor::Search, Vec::new());
    let out = emit(
        &[SemanticEvent::MoveBound {
            bound: Bound::High,
            index: 3,
        }],
        l,
        &narrator,
        |_| None,
        &opts(&timing, &palette),
    )
    .unwrap();
    let on_pointer: Vec<&Action> = out
        .actions
        .iter()
        .filter(|a| a.object_id == "ptr_high")
        .collect();
    assert_eq!(on_pointer.len(), 2);
    assert!(on_pointer.iter().any(|a| a.kind == ActionKind::Fade));
    assert!(on_pointer.iter().any(|a| a.kind == ActionKind::Translate));
}

#[test]
fn action_ids_are_unique_and_windows_never_collide() {
    let events = [
        SemanticEvent::Pass { number: 1 },
        SemanticEvent::Compare { i: 0, j: 1, left: 5, right: 3 },
        SemanticEvent::Swap { i: 0, j: 1, left: 5, right: 3 },
        SemanticEvent::Compare { i: 1, j: 2, left: 5, right: 8 },
        SemanticEvent::MarkSorted { index: 2 },
        SemanticEvent::MarkSorted { index: 1 },
        SemanticEvent::MarkSorted { index: 0 },
        SemanticEvent::Finish,
    ];
    let out = run(&events, &[5, 3, 8]).unwrap();

    let mut ids: Vec<&str> = out.actions.iter().map(|a| a.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), out.actions.len());

    for (n, a) in out.actions.iter().enumerate() {
        for b in &out.actions[n + 1..] {
            if a.object_id != b.object_id || !a.span().unwrap().overlaps(b.span().unwrap()) {
                continue;
            }
            assert!(
                a.params.keys().all(|k| !b.params.contains_key(k)),
                "{} and {} write the same key",
                a.id,
                b.id
            );
        }
    }
    assert!(out.actions.iter().all(|a| a.end <= out.end));
}

#[test]
fn gather_counts_down_the_bucket_and_writes_the_slot() {
    let timing = TimingTable::defaults();
    let palette = Palette::default();
    let shape = DatasetShape::Buckets {
        values: vec![2, 0],
        labels: vec!["0".into(), "1".into(), "2".into()],
    };
    let l = layout(
        &shape,
        &LayoutOpts {
            canvas: Canvas::default(),
            palette: &palette,
            title: "Demo",
        },
    )
    .unwrap();
    let events = [
        SemanticEvent::Tally { index: 0, value: 2, bucket: 2, count: 1 },
        SemanticEvent::Tally { index: 1, value: 0, bucket: 0, count: 1 },
        SemanticEvent::Gather { bucket: 0, index: 0, value: 0, previous: 2, remaining: 0 },
    ];
    let out = emit(&events, l, &sort_narrator(), |_| None, &opts(&timing, &palette)).unwrap();

    let counts: Vec<&str> = out
        .actions
        .iter()
        .filter(|a| a.object_id == "count_0")
        .filter_map(|a| a.params.get("text").and_then(|t| t.as_str()))
        .collect();
    assert_eq!(counts, vec!["1", "0"]);
    assert_eq!(out.binding.get(LogicalKey::Bucket(0)).unwrap().value, Some(0));
    assert_eq!(out.binding.get(LogicalKey::Bucket(2)).unwrap().value, Some(1));
    assert_eq!(out.binding.slot_values(), vec![Some(0), Some(0)]);
    let last = colors_of(&out, "bar_0").last().copied().unwrap();
    assert_eq!(last.params["color"], palette.sorted.as_str());
}
