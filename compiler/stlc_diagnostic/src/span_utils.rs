//! Line and column arithmetic over source text.
//!
//! Lines and columns are 1-based and columns count characters, not bytes.

use stlc_ir::Span;

/// Byte offsets of every line start, for O(log L) lookups.
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                offsets.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        LineOffsetTable { offsets }
    }

    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(line_idx).unwrap_or(u32::MAX - 1) + 1
    }

    pub fn offset_to_line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line_from_offset(offset);
        let line_start = self
            .offsets
            .get((line - 1) as usize)
            .copied()
            .unwrap_or(0) as usize;
        let end = (offset as usize).min(source.len()).max(line_start);
        let col = source
            .get(line_start..end)
            .map_or(0, |text| text.chars().count());
        (line, u32::try_from(col).unwrap_or(u32::MAX - 1) + 1)
    }

    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}

/// 1-based `(line, column)` of a byte offset.
pub fn offset_to_line_col(source: &str, offset: u32) -> (u32, u32) {
    LineOffsetTable::build(source).offset_to_line_col(source, offset)
}

/// Human-readable location of a span.
///
/// - empty span: `line:col`
/// - single character: `line:col`
/// - single line: `line:start-end` (end column inclusive)
/// - multi line: `line:col-line:col`
pub fn describe_span(source: &str, span: Span) -> String {
    let table = LineOffsetTable::build(source);
    let (line, col) = table.offset_to_line_col(source, span.start);
    if span.is_empty() {
        return format!("{line}:{col}");
    }
    let (end_line, end_col) = table.offset_to_line_col(source, span.end.saturating_sub(1));
    if line == end_line && col == end_col {
        format!("{line}:{col}")
    } else if line == end_line {
        format!("{line}:{col}-{end_col}")
    } else {
        format!("{line}:{col}-{end_line}:{end_col}")
    }
}
