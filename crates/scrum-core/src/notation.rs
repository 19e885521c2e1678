//! Compact text notation for boards.
//!
//! Rows are listed from the top (`y = 0`) and separated by `/`. Within a row,
//! pieces are written as letters (`d` Developer, `s` Designer, `p` Product
//! Owner; uppercase for White, lowercase for Black) and runs of empty cells
//! as decimal counts:
//!
//! ```text
//! 3sdp/6/6/6/6/PDS3
//! ```

use crate::{Dimensions, Piece};
use thiserror::Error;

/// Errors that can occur when parsing board notation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("expected {expected} rows, got {got}")]
    RowCount { expected: u8, got: usize },

    #[error("row {row} has width {got}, expected {expected}")]
    RowWidth { row: usize, expected: u8, got: usize },

    #[error("invalid character '{ch}' in row {row}")]
    InvalidCharacter { row: usize, ch: char },

    #[error("empty-cell count of zero in row {row}")]
    ZeroRun { row: usize },
}

/// Parses `text` into row-major cells for a board of size `dims`.
pub(crate) fn parse(dims: Dimensions, text: &str) -> Result<Vec<Option<Piece>>, NotationError> {
    let rows: Vec<&str> = text.trim().split('/').collect();
    if rows.len() != dims.rows() as usize {
        return Err(NotationError::RowCount {
            expected: dims.rows(),
            got: rows.len(),
        });
    }

    let mut cells = Vec::with_capacity(dims.area());
    for (row, line) in rows.iter().enumerate() {
        let start = cells.len();
        let mut run = 0usize;
        let mut in_run = false;

        for ch in line.chars() {
            if let Some(digit) = ch.to_digit(10) {
                run = run.saturating_mul(10).saturating_add(digit as usize);
                in_run = true;
                if run > dims.cols() as usize {
                    return Err(NotationError::RowWidth {
                        row,
                        expected: dims.cols(),
                        got: cells.len() - start + run,
                    });
                }
                continue;
            }
            flush_run(&mut cells, &mut run, &mut in_run, row)?;
            let piece = Piece::from_char(ch).ok_or(NotationError::InvalidCharacter { row, ch })?;
            cells.push(Some(piece));
        }
        flush_run(&mut cells, &mut run, &mut in_run, row)?;

        let width = cells.len() - start;
        if width != dims.cols() as usize {
            return Err(NotationError::RowWidth {
                row,
                expected: dims.cols(),
                got: width,
            });
        }
    }

    Ok(cells)
}

fn flush_run(
    cells: &mut Vec<Option<Piece>>,
    run: &mut usize,
    in_run: &mut bool,
    row: usize,
) -> Result<(), NotationError> {
    if !*in_run {
        return Ok(());
    }
    if *run == 0 {
        return Err(NotationError::ZeroRun { row });
    }
    cells.resize(cells.len() + *run, None);
    *run = 0;
    *in_run = false;
    Ok(())
}

/// Formats row-major cells as notation.
pub(crate) fn format(dims: Dimensions, cells: &[Option<Piece>]) -> String {
    let mut out = String::new();
    for (y, row) in cells.chunks(dims.cols() as usize).enumerate() {
        if y > 0 {
            out.push('/');
        }
        let mut empty = 0;
        for cell in row {
            match cell {
                Some(piece) => {
                    if empty > 0 {
                        out.push_str(&empty.to_string());
                        empty = 0;
                    }
                    out.push(piece.to_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            out.push_str(&empty.to_string());
        }
    }
    out
}
