use serde::Serialize;

use crate::error::{HostError, HostResult};

/// A 1-based line and column pair. Columns count bytes within the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineCol {
    pub line: usize,
    pub column: usize,
}

impl LineCol {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Byte offsets of every line start, rebuilt whenever a script's text changes.
///
/// `\n`, `\r\n` and a lone `\r` all terminate a line. The first entry is
/// always 0, so an empty text has exactly one (empty) line.
///
/// Byte offsets that fall inside a multi-byte character are also kept, so
/// conversions never hand out an offset that an edit would reject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    starts: Vec<usize>,
    inside_char: Vec<usize>,
    len: usize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut starts = vec![0];
        let inside_char = (0..text.len())
            .filter(|&i| !text.is_char_boundary(i))
            .collect();
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                    starts.push(i + 2);
                    i += 2;
                    continue;
                }
                b'\r' | b'\n' => starts.push(i + 1),
                _ => {}
            }
            i += 1;
        }
        Self {
            starts,
            inside_char,
            len: text.len(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    pub fn line_starts(&self) -> &[usize] {
        &self.starts
    }

    /// Whether `offset` sits between two characters (or at either end).
    pub fn is_char_boundary(&self, offset: usize) -> bool {
        offset <= self.len && self.inside_char.binary_search(&offset).is_err()
    }

    /// Convert a 1-based line/column to a 0-based byte offset.
    ///
    /// The column may address any byte of the line including its terminator;
    /// on the last line it may also address the end of the text. A column
    /// that lands inside a multi-byte character is out of range.
    pub fn offset(&self, line: usize, column: usize) -> HostResult<usize> {
        let out_of_range = HostError::OutOfRange { line, column };
        if line < 1 || line > self.starts.len() || column < 1 {
            return Err(out_of_range);
        }
        let start = self.starts[line - 1];
        let offset = start + (column - 1);
        let in_line = match self.starts.get(line) {
            Some(&next) => offset < next,
            None => offset <= self.len,
        };
        if in_line && self.is_char_boundary(offset) {
            Ok(offset)
        } else {
            Err(out_of_range)
        }
    }

    /// Convert a 0-based byte offset to a 1-based line/column.
    ///
    /// Offsets past the end or inside a character are a [`HostError::Range`].
    pub fn line_col(&self, offset: usize) -> HostResult<LineCol> {
        if !self.is_char_boundary(offset) {
            return Err(HostError::Range {
                start: offset,
                end: offset,
                len: self.len,
            });
        }
        // partition_point counts starts <= offset, which is the 1-based line
        let line = self.starts.partition_point(|&start| start <= offset);
        let column = offset - self.starts[line - 1] + 1;
        Ok(LineCol::new(line, column))
    }
}
