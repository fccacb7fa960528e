use crate::{Position, position_of};

#[test]
fn start_of_input() {
    assert_eq!(position_of("abc", 0), Position { line: 1, column: 1 });
}

#[test]
fn counts_newlines_before_offset() {
    let input = "ab\ncd\nef";
    assert_eq!(position_of(input, 3), Position { line: 2, column: 1 });
    assert_eq!(position_of(input, 7), Position { line: 3, column: 2 });
}

#[test]
fn offset_on_newline_stays_on_its_line() {
    assert_eq!(position_of("ab\ncd", 2), Position { line: 1, column: 3 });
}

#[test]
fn columns_count_characters() {
    // `é` is two bytes
    assert_eq!(position_of("éx", 2), Position { line: 1, column: 2 });
}

#[test]
fn clamps_past_end() {
    assert_eq!(position_of("ab", 10), Position { line: 1, column: 3 });
}

#[test]
fn serializes_as_object() {
    let json = serde_json::to_string(&position_of("a\nb", 2)).unwrap();
    assert_eq!(json, r#"{"line":2,"column":1}"#);
}
