use super::*;

#[test]
fn span_rejects_empty_and_negative_intervals() {
    assert!(Span::new(1.0, 1.0).is_err());
    assert!(Span::new(2.0, 1.0).is_err());
    assert!(Span::new(-0.5, 1.0).is_err());
    assert!(Span::new(0.0, f64::INFINITY).is_err());
    assert!(Span::new(0.0, 0.25).is_ok());
}

#[test]
fn span_overlap_is_half_open() {
    let a = Span::new(0.0, 1.0).unwrap();
    let b = Span::new(1.0, 2.0).unwrap();
    let c = Span::new(0.5, 1.5).unwrap();
    assert!(!a.overlaps(b));
    assert!(a.overlaps(c));
    assert!(c.overlaps(b));
}

#[test]
fn shift_rounds_to_milliseconds() {
    let s = Span::new(0.1, 0.2).unwrap().shift(0.2);
    assert_eq!(s.start, 0.3);
    assert_eq!(s.end, 0.4);
}

#[test]
fn canvas_defaults_and_validation() {
    let c = Canvas::default();
    assert_eq!((c.width, c.height), (800, 450));
    assert_eq!(c.center_x(), 400.0);
    assert!(Canvas::new(0, 10).is_err());
}
