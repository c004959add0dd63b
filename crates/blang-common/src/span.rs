use std::ops::Range;

use serde::Serialize;

/// Byte-offset span into source text. Start is inclusive, end is exclusive.
///
/// Tokens carry both a span and a 1-based line/column pair. The span is what
/// diagnostic renderers need to underline source; the line/column pair is what
/// humans read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Create a new span from byte offsets.
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end, "span start ({start}) must be <= end ({end})");
        Self { start, end }
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Whether the span is empty (zero-length).
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The span as a `usize` range, suitable for slicing or for report labels.
    pub fn range(&self) -> Range<usize> {
        self.start as usize..self.end as usize
    }
}

/// Pre-computed index of line start positions for on-demand line/column lookup.
///
/// The lexer tracks line and column incrementally while scanning; this index
/// recovers the same information from a bare byte offset, e.g. for a position
/// that did not come from a token.
#[derive(Debug)]
pub struct LineIndex<'src> {
    source: &'src str,
    /// Byte offset of the start of each line. The first entry is always 0.
    line_starts: Vec<u32>,
}

impl<'src> LineIndex<'src> {
    /// Build a line index by scanning the source text for newline characters.
    pub fn new(source: &'src str) -> Self {
        let mut line_starts = vec![0u32];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push((i + 1) as u32);
            }
        }
        Self {
            source,
            line_starts,
        }
    }

    /// Convert a byte offset to a 1-based (line, column) pair.
    ///
    /// Column is counted in characters from the start of the line, so a
    /// multi-byte character advances it by one.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        // partition_point returns the index of the first line_start > offset,
        // so the line index is one less than that.
        let line_idx = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let line_start = self.line_starts[line_idx] as usize;
        let end = (offset as usize).min(self.source.len());
        let col = self.source[line_start..end].chars().count() as u32 + 1;
        (line_idx as u32 + 1, col)
    }

    /// Return the number of lines in the source.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
