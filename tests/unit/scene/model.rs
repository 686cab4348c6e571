use super::*;

fn span(start: f64, end: f64) -> Span {
    Span::new(start, end).unwrap()
}

fn two_object_scene() -> Scene {
    Scene {
        scene_id: "t".to_string(),
        width: 800,
        height: 450,
        duration: 4.0,
        code: String::new(),
        objects: vec![
            VisualObject::new("a", ObjectKind::Rect).with("x", 10.0),
            VisualObject::new("b", ObjectKind::Text).with("text", "hi"),
        ],
        actions: vec![],
    }
}

#[test]
fn json_uses_renderer_field_names() {
    let mut scene = two_object_scene();
    let mut a = Action::new("a0", "a", ActionKind::FollowPath, span(0.0, 1.0)).param("pathId", "b");
    a.code_line = Some(3);
    scene.actions.push(a);

    let v: serde_json::Value = serde_json::from_str(&scene.to_json().unwrap()).unwrap();
    assert_eq!(v["sceneId"], "t");
    assert_eq!(v["objects"][0]["type"], "rect");
    assert_eq!(v["actions"][0]["objectId"], "a");
    assert_eq!(v["actions"][0]["type"], "followPath");
    assert_eq!(v["actions"][0]["codeLine"], 3);
    assert!(v["actions"][0].get("narrative").is_none());
}

#[test]
fn scene_round_trips_through_reader() {
    let scene = two_object_scene();
    let json = scene.to_json_pretty().unwrap();
    let back = Scene::from_reader(json.as_bytes()).unwrap();
    assert_eq!(back, scene);
}

#[test]
fn validate_rejects_unknown_object_and_late_actions() {
    let mut scene = two_object_scene();
    scene
        .actions
        .push(Action::new("x", "missing", ActionKind::Wait, span(0.0, 1.0)));
    assert!(scene.validate().is_err());

    let mut scene = two_object_scene();
    scene
        .actions
        .push(Action::new("x", "a", ActionKind::Wait, span(3.0, 5.0)));
    assert!(matches!(scene.validate(), Err(SceneError::Timing(_))));
}

#[test]
fn validate_rejects_conflicting_overlaps_only() {
    let mut scene = two_object_scene();
    scene.actions.push(
        Action::new("c0", "a", ActionKind::Color, span(0.0, 1.0)).param("color", "#fff"),
    );
    scene.actions.push(
        Action::new("t0", "a", ActionKind::Translate, span(0.5, 1.5))
            .param("to", serde_json::json!({"x": 1.0})),
    );
    scene.validate().unwrap();

    scene.actions.push(
        Action::new("c1", "a", ActionKind::Color, span(0.5, 2.0)).param("color", "#000"),
    );
    assert!(scene.validate().is_err());
}

#[test]
fn validate_rejects_duplicate_ids() {
    let mut scene = two_object_scene();
    scene.objects.push(VisualObject::new("a", ObjectKind::Circle));
    assert!(scene.validate().is_err());

    let mut scene = two_object_scene();
    scene
        .actions
        .push(Action::new("w", "a", ActionKind::Wait, span(0.0, 1.0)));
    scene
        .actions
        .push(Action::new("w", "b", ActionKind::Wait, span(1.0, 2.0)));
    assert!(scene.validate().is_err());
}

#[test]
fn no_op_scene_is_valid() {
    let scene = Scene::no_op("empty", Canvas::default(), "");
    scene.validate().unwrap();
    assert_eq!(scene.duration, 0.0);
    assert_eq!(scene.max_action_end(), 0.0);
}

#[test]
fn missing_opacity_means_visible() {
    let obj = VisualObject::new("a", ObjectKind::Rect);
    assert_eq!(obj.initial_opacity(), 1.0);
    assert_eq!(obj.with("opacity", 0.0).initial_opacity(), 0.0);
}
