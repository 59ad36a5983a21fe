//! Layout text format.
//!
//! ```text
//! W H
//! 00110
//! 00110
//! 22003
//! ```
//!
//! First line: width and height, space-separated.  Then `H` rows of `W`
//! digit codes (`0` empty, `1` storage, `2` obstacle, `3` output).
//! Parse and write round-trip exactly.

use std::path::Path;

use mapd_core::Coord;

use crate::{CellKind, GridError, GridResult, Layout};

impl Layout {
    /// Parse a layout from its text form.
    pub fn parse(input: &str) -> GridResult<Layout> {
        let mut lines = input.lines();

        let header = lines
            .next()
            .ok_or_else(|| GridError::InvalidHeader(String::new()))?;
        let mut parts = header.split_whitespace();
        let width: u32 = parts
            .next()
            .and_then(|t| t.parse().ok())
            .ok_or_else(|| GridError::InvalidHeader(header.to_string()))?;
        let height: u32 = parts
            .next()
            .and_then(|t| t.parse().ok())
            .ok_or_else(|| GridError::InvalidHeader(header.to_string()))?;
        if parts.next().is_some() {
            return Err(GridError::InvalidHeader(header.to_string()));
        }
        if width == 0 || height == 0 {
            return Err(GridError::EmptyLayout);
        }

        let mut layout = Layout::new(width, height);
        let mut rows: u32 = 0;

        for line in lines {
            let line = line.trim_end();
            if line.is_empty() {
                continue; // tolerate a trailing blank line
            }
            if rows >= height {
                return Err(GridError::RowCountMismatch { expected: height, got: rows + 1 });
            }
            let got = line.chars().count() as u32;
            if got != width {
                return Err(GridError::RowWidthMismatch { row: rows, expected: width, got });
            }
            for (col, ch) in line.chars().enumerate() {
                let kind = CellKind::from_digit(ch).ok_or(GridError::BadCellCode {
                    row: rows,
                    col: col as u32,
                    code: ch,
                })?;
                layout.set(Coord::new(col as u32, rows), kind);
            }
            rows += 1;
        }

        if rows != height {
            return Err(GridError::RowCountMismatch { expected: height, got: rows });
        }

        Ok(layout)
    }

    /// Render the layout to its text form.  `parse(to_text(l)) == l`.
    pub fn to_text(&self) -> String {
        let w = self.width() as usize;
        let h = self.height() as usize;
        // header + h rows of w digits + newlines
        let mut out = String::with_capacity(16 + h * (w + 1));
        out.push_str(&format!("{} {}\n", self.width(), self.height()));
        for y in 0..self.height() {
            for x in 0..self.width() {
                out.push(self.get(Coord::new(x, y)).digit());
            }
            out.push('\n');
        }
        out
    }
}

/// Read and parse a layout file.
pub fn read_layout_file(path: &Path) -> GridResult<Layout> {
    let text = std::fs::read_to_string(path)?;
    Layout::parse(&text)
}

/// Write a layout to a file in the text format.
pub fn write_layout_file(path: &Path, layout: &Layout) -> GridResult<()> {
    std::fs::write(path, layout.to_text())?;
    Ok(())
}
