use xi_rope::Rope;
use xi_rope::delta::Builder;

use crate::editing::{
    EditHistory, EditRecord, LineCol, LineIndex, ScriptSnapshot, Span, TextChangeRange,
    VersionDelta,
};
use crate::error::{HostError, HostResult};

/// One tracked script: its current text, version counter and edit history.
///
/// The rope buffer is the only copy of the text. Every change bumps `version`
/// by one and rebuilds the line index. Sub-range edits append to the history;
/// a full replacement clears it, because no range can describe the change.
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) name: String,
    pub(crate) buffer: Rope,
    pub(crate) version: u64,
    pub(crate) history: EditHistory,
    pub(crate) lines: LineIndex,
    pub(crate) open: bool,
}

impl Document {
    /// A fresh document at version 1. `history_limit` caps the retained edits.
    pub fn new(name: impl Into<String>, text: &str, history_limit: Option<usize>) -> Self {
        Self {
            name: name.into(),
            buffer: Rope::from(text),
            version: 1,
            history: EditHistory::new(1, history_limit),
            lines: LineIndex::new(text),
            open: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Get the current text content
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.lines
    }

    /// Text of `span`, which must lie on char boundaries inside the document.
    pub fn slice(&self, span: Span) -> HostResult<String> {
        self.check_span(span)?;
        Ok(self.buffer.slice_to_cow(span.range()).into_owned())
    }

    /// Replace the whole text. Older versions can no longer be diffed.
    pub fn replace(&mut self, text: &str) {
        self.buffer = Rope::from(text);
        self.lines = LineIndex::new(text);
        self.version += 1;
        self.history.reset(self.version);
        tracing::debug!(script = %self.name, version = self.version, len = text.len(), "replaced content");
    }

    /// Splice `text` over `span` and record the edit.
    ///
    /// Leaves the document untouched if the span is invalid.
    pub fn edit(&mut self, span: Span, text: &str) -> HostResult<EditRecord> {
        self.check_span(span)?;

        let mut builder = Builder::new(self.buffer.len());
        builder.replace(span.range(), Rope::from(text));
        let delta = builder.build();
        self.buffer = delta.apply(&self.buffer);
        self.lines = LineIndex::new(&self.buffer.slice_to_cow(..));

        let record = EditRecord {
            resulting_length: self.buffer.len(),
            change: TextChangeRange::new(span, text.len()),
        };
        self.history.push(record);
        self.version += 1;
        tracing::debug!(
            script = %self.name,
            version = self.version,
            start = span.start,
            end = span.end,
            inserted = text.len(),
            "applied edit"
        );
        Ok(record)
    }

    /// Everything that changed between `from_version` and now.
    pub fn delta_since(&self, from_version: u64) -> HostResult<VersionDelta> {
        if from_version > self.version {
            return Err(HostError::VersionOutOfRange {
                requested: from_version,
                current: self.version,
            });
        }
        Ok(self.history.delta_between(from_version, self.version))
    }

    pub fn line_col_to_offset(&self, line: usize, column: usize) -> HostResult<usize> {
        self.lines.offset(line, column)
    }

    pub fn offset_to_line_col(&self, offset: usize) -> HostResult<LineCol> {
        self.lines.line_col(offset)
    }

    /// Immutable view of the current version; later edits do not affect it.
    pub fn snapshot(&self) -> ScriptSnapshot {
        ScriptSnapshot::new(self)
    }

    fn check_span(&self, span: Span) -> HostResult<()> {
        check_rope_span(&self.buffer, span)
    }
}

/// `span` must be ordered, inside the rope and on codepoint boundaries.
pub(crate) fn check_rope_span(rope: &Rope, span: Span) -> HostResult<()> {
    let len = rope.len();
    let valid = span.start <= span.end
        && span.end <= len
        && rope.is_codepoint_boundary(span.start)
        && rope.is_codepoint_boundary(span.end);
    if valid {
        Ok(())
    } else {
        Err(HostError::Range {
            start: span.start,
            end: span.end,
            len,
        })
    }
}
