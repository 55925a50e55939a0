//! Conversions between 0-based (row, column) indexes and Excel A1-style references.

/// Converts a 0-based column index to its column letters (0 → "A", 26 → "AA").
pub fn col_to_letters(col: usize) -> String {
    let mut column = col + 1;
    let mut letters = String::new();
    while column > 0 {
        column -= 1;
        letters.insert(0, char::from(b'A' + (column % 26) as u8));
        column /= 26;
    }
    letters
}

/// Converts a 0-based (row, column) pair to an A1-style reference.
pub fn index_to_reference(row: usize, col: usize) -> String {
    format!("{}{}", col_to_letters(col), row + 1)
}

/// Converts an A1-style range between two 0-based positions, e.g. `D4:D7`.
pub fn range_reference(first: (usize, usize), last: (usize, usize)) -> String {
    format!(
        "{}:{}",
        index_to_reference(first.0, first.1),
        index_to_reference(last.0, last.1)
    )
}
