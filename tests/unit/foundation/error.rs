use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SceneError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(SceneError::shape("x").to_string().contains("shape error:"));
    assert!(
        SceneError::binding("x")
            .to_string()
            .contains("binding error:")
    );
    assert!(
        SceneError::reference("x")
            .to_string()
            .contains("reference error:")
    );
    assert!(SceneError::timing("x").to_string().contains("timing error:"));
    assert!(
        SceneError::simulation("x")
            .to_string()
            .contains("simulation error:")
    );
    assert!(
        SceneError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn constructors_build_their_variant() {
    assert!(matches!(SceneError::validation("v"), SceneError::Validation(m) if m == "v"));
    assert!(matches!(SceneError::shape("s"), SceneError::Shape(m) if m == "s"));
    assert!(matches!(SceneError::binding("b"), SceneError::Binding(m) if m == "b"));
    assert!(matches!(SceneError::reference("r"), SceneError::Reference(m) if m == "r"));
    assert!(matches!(SceneError::timing("t"), SceneError::Timing(m) if m == "t"));
    assert!(matches!(SceneError::simulation("x"), SceneError::Simulation(m) if m == "x"));
    assert!(matches!(SceneError::serde("j"), SceneError::Serde(m) if m == "j"));
}

#[test]
fn only_shape_errors_are_soft() {
    assert!(SceneError::shape("empty").is_shape());
    assert!(!SceneError::binding("missing").is_shape());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SceneError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
