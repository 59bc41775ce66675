//! Getting rows into a pasteable shape.

use std::fmt::Display;

/// Renders each row on its own line, ready to paste into a spreadsheet.
pub fn join_rows<T: Display>(rows: &[T]) -> String {
    rows.iter()
        .map(|row| row.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
