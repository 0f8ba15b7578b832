//! City id lists from the command line or a file.

use std::fs;
use std::path::Path;

use crate::error::{TspError, TspResult};

/// Parses ids separated by commas and/or whitespace.
///
/// Empty tokens (repeated separators) are skipped. Range and duplicate
/// checks are left to [`validate_ids`](crate::tsp::validate_ids).
pub fn parse_ids(text: &str) -> TspResult<Vec<usize>> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<usize>().map_err(|_| TspError::InvalidCityId {
                token: token.to_string(),
            })
        })
        .collect()
}

/// Reads an id list from a file: one per line, comma separated, or both.
pub fn read_ids_file(path: impl AsRef<Path>) -> TspResult<Vec<usize>> {
    let text = fs::read_to_string(path)?;
    parse_ids(&text)
}
