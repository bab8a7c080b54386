use super::*;

#[test]
fn merge_covers_both() {
    let merged = Span::new(10, 20).merge(Span::new(4, 12));
    assert_eq!(merged, Span::new(4, 20));
    assert_eq!(merged.len(), 16);
}

#[test]
fn from_range_round_trips() {
    let span = Span::from_range(3..9);
    assert_eq!(span.to_range(), 3..9);
    assert!(!span.is_empty());
    assert!(Span::DUMMY.is_empty());
}

#[test]
fn debug_and_display_agree() {
    let span = Span::new(1, 5);
    assert_eq!(format!("{span:?}"), "1..5");
    assert_eq!(span.to_string(), "1..5");
}
