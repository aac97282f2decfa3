use xi_rope::Rope;

use crate::editing::document::check_rope_span;
use crate::editing::{Document, EditHistory, LineIndex, Span, VersionDelta};
use crate::error::{HostError, HostResult};

/// A frozen view of one script at one version, handed to the language service.
///
/// Cloning the rope is cheap; the snapshot shares structure with the document
/// until the document is next edited.
#[derive(Debug, Clone)]
pub struct ScriptSnapshot {
    version: u64,
    text: Rope,
    lines: LineIndex,
    history: EditHistory,
}

impl ScriptSnapshot {
    pub(crate) fn new(doc: &Document) -> Self {
        Self {
            version: doc.version,
            text: doc.buffer.clone(),
            lines: doc.lines.clone(),
            history: doc.history.clone(),
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Text between `start` and `end`.
    pub fn text(&self, start: usize, end: usize) -> HostResult<String> {
        let span = Span::new(start, end);
        check_rope_span(&self.text, span)?;
        Ok(self.text.slice_to_cow(span.range()).into_owned())
    }

    pub fn line_start_positions(&self) -> &[usize] {
        self.lines.line_starts()
    }

    /// What changed between `version` and this snapshot's version.
    pub fn change_range_since_version(&self, version: u64) -> HostResult<VersionDelta> {
        if version > self.version {
            return Err(HostError::VersionOutOfRange {
                requested: version,
                current: self.version,
            });
        }
        Ok(self.history.delta_between(version, self.version))
    }

    /// What changed between `older` and this snapshot. Both must be snapshots
    /// of the same script.
    pub fn change_range_since(&self, older: &ScriptSnapshot) -> HostResult<VersionDelta> {
        self.change_range_since_version(older.version)
    }
}
