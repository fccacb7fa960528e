//! Line and column math for byte offsets into parser input.

use serde::Serialize;

/// 1-based line and column of a byte offset.
///
/// Columns count characters, not bytes, since the last newline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// Compute the position of `index` within `input`.
///
/// Offsets past the end are clamped to the input length. An offset inside a
/// multi-byte character counts that character as already passed.
pub fn position_of(input: &str, index: usize) -> Position {
    let index = index.min(input.len());
    let before = &input.as_bytes()[..index];

    let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
    let line_start = before
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |nl| nl + 1);
    let column = String::from_utf8_lossy(&before[line_start..]).chars().count() + 1;

    Position { line, column }
}
