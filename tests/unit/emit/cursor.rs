use super::*;

#[test]
fn advances_monotonically_at_millisecond_resolution() {
    let mut c = TimeCursor::starting_at(0.5).unwrap();
    let w = c.window(0.3).unwrap();
    assert_eq!((w.start, w.end), (0.5, 0.8));
    assert_eq!(c.now(), 0.5);
    for _ in 0..10 {
        c.advance(0.1).unwrap();
    }
    assert_eq!(c.now(), 1.5);
}

#[test]
fn rejects_backwards_and_non_finite_steps() {
    let mut c = TimeCursor::default();
    assert!(matches!(c.advance(-0.1), Err(SceneError::Timing(_))));
    assert!(c.advance(f64::NAN).is_err());
    assert!(TimeCursor::starting_at(-1.0).is_err());
    assert!(c.window(0.0).is_err());
    assert_eq!(c.now(), 0.0);
}
