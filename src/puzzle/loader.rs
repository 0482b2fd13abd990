//! Puzzle file reader.
//!
//! # Format
//!
//! ```text
//! 4        <- dimension N
//! 1200     <- top row    (y = 3)
//! 0034
//! 2001
//! 0400     <- bottom row (y = 0)
//! ```
//!
//! Each data line holds at least `N` characters; the character at position
//! `x` of the `k`-th data line is the value at `(x, N - 1 - k)`. Digits
//! `0`–`9` are taken literally, anything else is blank. Characters past
//! `N` are ignored.

use std::fs;
use std::path::Path;

use super::grid::Grid;
use crate::error::{Result, SearchError};

/// Reads and parses a puzzle file.
///
/// # Errors
/// - [`SearchError::Io`] if the file cannot be read (`NotFound` if missing)
/// - [`SearchError::Parse`] if the text is malformed
/// - [`SearchError::Config`] if the dimension or a value is invalid
pub fn load<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| SearchError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let grid = parse(&text)?;
    log::info!(
        "loaded {0}x{0} puzzle from {1} ({2} blank cells)",
        grid.dimension(),
        path.display(),
        grid.blank_count()
    );
    Ok(grid)
}

/// Parses puzzle text.
///
/// # Errors
/// [`SearchError::Parse`] if the header is not an integer or a data line
/// is missing or shorter than `N`; [`SearchError::Config`] as for
/// [`Grid::from_rows`].
pub fn parse(text: &str) -> Result<Grid> {
    let mut lines = text.lines().map(|l| l.trim_end_matches('\r'));

    let header = lines.next().ok_or_else(|| SearchError::Parse {
        line: 1,
        reason: "empty input".into(),
    })?;
    let size: usize = header.trim().parse().map_err(|_| SearchError::Parse {
        line: 1,
        reason: format!("dimension {header:?} is not an integer"),
    })?;

    // Rows are read before anything is sized from the header, so a bogus
    // dimension fails on the first missing row.
    let mut rows = Vec::new();
    for k in 0..size {
        let line_no = k + 2;
        let line = lines.next().ok_or_else(|| SearchError::Parse {
            line: line_no,
            reason: format!("expected {size} rows, found {k}"),
        })?;
        let row: Vec<u32> = line
            .chars()
            .take(size)
            .map(|c| c.to_digit(10).unwrap_or(0))
            .collect();
        if row.len() < size {
            return Err(SearchError::Parse {
                line: line_no,
                reason: format!("row has {} characters, expected {size}", row.len()),
            });
        }
        rows.push(row);
    }

    Grid::from_rows(&rows)
}
