use super::*;

#[test]
fn defaults_cover_every_kind_and_inspection_is_cheaper() {
    let t = TimingTable::defaults();
    t.validate().unwrap();
    for kind in EventKind::ALL {
        assert!(t.duration(kind) > 0.0, "{kind:?}");
        assert!(!t.color(kind).is_empty(), "{kind:?}");
    }
    assert!(t.duration(EventKind::Compare) < t.duration(EventKind::Swap));
    assert!(t.duration(EventKind::ProbeCell) < t.duration(EventKind::FillCell));
    assert!(EventKind::Compare.is_inspection());
    assert!(!EventKind::Swap.is_inspection());
}

#[test]
fn json_overrides_merge_over_defaults() {
    let t: TimingTable =
        serde_json::from_str(r##"{"compare": {"duration": 0.25}, "swap": {"color": "#000"}}"##)
            .unwrap();
    assert_eq!(t.duration(EventKind::Compare), 0.25);
    assert_eq!(t.color(EventKind::Compare), "#e74c3c");
    assert_eq!(t.duration(EventKind::Swap), 2.0);
    assert_eq!(t.color(EventKind::Swap), "#000");
}

#[test]
fn non_positive_durations_are_timing_errors() {
    let mut overrides = BTreeMap::new();
    overrides.insert(
        EventKind::Swap,
        EventStyle {
            duration: -1.0,
            color: "#fff".to_string(),
        },
    );
    assert!(matches!(
        TimingTable::new(overrides),
        Err(SceneError::Timing(_))
    ));

    let t: TimingTable = serde_json::from_str(r#"{"visit": {"duration": 0.0}}"#).unwrap();
    assert!(t.validate().is_err());
}

#[test]
fn scaling_multiplies_durations() {
    let t = TimingTable::defaults().scaled(0.5).unwrap();
    assert_eq!(t.duration(EventKind::Swap), 1.0);
    assert!(TimingTable::defaults().scaled(0.0).is_err());
}

#[test]
fn palette_fields_default_individually() {
    let p: Palette = serde_json::from_str(r##"{"bar": "#123456"}"##).unwrap();
    assert_eq!(p.bar, "#123456");
    assert_eq!(p.sorted, Palette::default().sorted);
    assert_eq!(Palette::kids().bar, "#f9e2af");
}

#[test]
fn keys_match_the_serde_names() {
    for kind in EventKind::ALL {
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, format!("\"{}\"", kind.key()));
    }
}

#[test]
fn sub_millisecond_durations_are_timing_errors() {
    let t: TimingTable = serde_json::from_str(r#"{"swap": {"duration": 0.0004}}"#).unwrap();
    assert!(matches!(t.validate(), Err(SceneError::Timing(_))));

    let t: TimingTable = serde_json::from_str(r#"{"swap": {"duration": 0.001}}"#).unwrap();
    t.validate().unwrap();
    assert!(matches!(t.scaled(0.4), Err(SceneError::Timing(_))));
}
