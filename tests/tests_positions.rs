use rstest::rstest;
use text_size::TextSize;
use treetext::{LineIndex, Position, Span};

#[test]
fn test_position_total_order() {
    assert!(Position::new(1, 9) < Position::new(2, 1));
    assert!(Position::new(3, 4) < Position::new(3, 5));
    assert!(Position::new(3, 5) == Position::new(3, 5));
    assert!(Position::new(4, 1) > Position::new(3, 80));
}

#[test]
fn test_span_contains_position() {
    let span = Span::from_coords(5, 10, 5, 20);

    // Inside
    assert!(span.contains(Position::new(5, 15)));
    assert!(span.contains(Position::new(5, 10))); // Start boundary
    assert!(span.contains(Position::new(5, 20))); // End boundary

    // Outside
    assert!(!span.contains(Position::new(4, 15))); // Before line
    assert!(!span.contains(Position::new(6, 15))); // After line
    assert!(!span.contains(Position::new(5, 9))); // Before column
    assert!(!span.contains(Position::new(5, 21))); // After column
}

#[test]
fn test_span_multiline() {
    let span = Span::from_coords(5, 10, 7, 5);

    assert!(span.contains(Position::new(5, 15))); // First line
    assert!(span.contains(Position::new(6, 1))); // Middle line
    assert!(span.contains(Position::new(7, 3))); // Last line

    assert!(!span.contains(Position::new(5, 9))); // Before start
    assert!(!span.contains(Position::new(7, 6))); // After end
}

#[test]
fn test_unknown_span_sentinel() {
    assert!(Span::UNKNOWN.is_unknown());
    assert!(!Span::from_coords(1, 1, 1, 1).is_unknown());
}

#[rstest]
#[case("a\nb")]
#[case("a\rb")]
#[case("a\r\nb")]
#[case("a\n\rb")]
fn test_each_terminator_ends_one_line(#[case] text: &str) {
    let index = LineIndex::new(text);
    assert_eq!(index.line_count(), 2);
    let b_offset = TextSize::new(text.find('b').unwrap() as u32);
    assert_eq!(index.offset(Position::new(2, 1)), Some(b_offset));
    assert_eq!(index.position(b_offset), Position::new(2, 1));
}

#[test]
fn test_offset_rejects_unknown_and_out_of_range() {
    let index = LineIndex::new("one line");
    assert_eq!(index.offset(Span::UNKNOWN.begin), None);
    assert_eq!(index.offset(Position::new(2, 1)), None);
}

#[test]
fn test_slice_covers_inclusive_span() {
    let text = "int f;\nvoid foo() {}";
    let index = LineIndex::new(text);
    assert_eq!(index.slice(text, Span::from_coords(1, 1, 1, 6)), Some("int f;"));
    assert_eq!(
        index.slice(text, Span::from_coords(2, 1, 2, 13)),
        Some("void foo() {}")
    );
    assert_eq!(
        index.slice(text, Span::from_coords(1, 5, 2, 4)),
        Some("f;\nvoid")
    );
}
