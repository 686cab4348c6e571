use super::*;

#[test]
fn same_seed_same_samples() {
    let mut a = SampleSource::new(42);
    let mut b = SampleSource::new(42);
    assert_eq!(a.ints(16, 1, 99), b.ints(16, 1, 99));
    assert_eq!(a.choose(&[1, 2, 3, 4]), b.choose(&[1, 2, 3, 4]));
}

#[test]
fn ints_stay_in_range_and_sorted_ints_are_sorted() {
    let mut s = SampleSource::new(7);
    let v = s.ints(200, 10, 20);
    assert!(v.iter().all(|x| (10..=20).contains(x)));
    let sorted = s.sorted_ints(50, -5, 5);
    assert!(sorted.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn degenerate_range_returns_lower_bound() {
    let mut s = SampleSource::new(0);
    assert_eq!(s.int_in(3, 3), 3);
    assert_eq!(s.int_in(5, 1), 5);
    assert_eq!(s.choose::<i64>(&[]), None);
    assert_eq!(s.seed(), 0);
}
