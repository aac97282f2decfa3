use std::collections::VecDeque;

use serde::Serialize;

use crate::editing::Span;

/// A replaced span of old text plus the length of the text that replaced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextChangeRange {
    /// Replaced interval, in the coordinates of the older text.
    pub span: Span,
    pub new_length: usize,
}

impl TextChangeRange {
    pub fn new(span: Span, new_length: usize) -> Self {
        Self { span, new_length }
    }

    /// Where the replacement lives in the newer text.
    pub fn new_span(&self) -> Span {
        Span::new(self.span.start, self.span.start + self.new_length)
    }

    /// Net change in text length.
    pub fn delta(&self) -> isize {
        self.new_length as isize - self.span.len() as isize
    }
}

/// Result of asking what changed since an earlier version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VersionDelta {
    /// The requested version is the current one.
    Unchanged,
    /// Everything that changed lies inside this range.
    Changed(TextChangeRange),
    /// The version is older than the retained history, so the whole text must
    /// be treated as changed.
    Unknown,
}

/// One applied edit, kept so deltas across versions can be rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EditRecord {
    /// Text length right after this edit.
    pub resulting_length: usize,
    pub change: TextChangeRange,
}

impl EditRecord {
    pub fn delta(&self) -> isize {
        self.change.delta()
    }

    /// Bytes between the end of the inserted text and the end of the text.
    fn distance_from_end(&self) -> usize {
        self.resulting_length - self.change.new_span().end
    }
}

/// Collapse consecutive edits into one range covering all of them.
///
/// The start is the smallest edit start, the end is the smallest distance from
/// the end of the text after each edit, and the length delta is the sum of the
/// individual deltas. Returns `None` for an empty slice.
pub fn collapse(records: &[EditRecord]) -> Option<TextChangeRange> {
    let last = records.last()?;
    let start = records.iter().map(|r| r.change.span.start).min()?;
    let tail = records.iter().map(EditRecord::distance_from_end).min()?;
    let delta: isize = records.iter().map(EditRecord::delta).sum();

    let new_end = last.resulting_length - tail;
    let old_end = (new_end as isize - delta) as usize;
    Some(TextChangeRange::new(
        Span::new(start, old_end),
        new_end - start,
    ))
}

/// The retained window of edit records for one script.
///
/// `base_version` is the version the oldest retained record was applied to;
/// record `i` moves the script from `base_version + i` to `base_version + i + 1`.
#[derive(Debug, Clone)]
pub struct EditHistory {
    records: VecDeque<EditRecord>,
    base_version: u64,
    limit: Option<usize>,
}

impl EditHistory {
    pub fn new(version: u64, limit: Option<usize>) -> Self {
        Self {
            records: VecDeque::new(),
            base_version: version,
            limit,
        }
    }

    pub fn base_version(&self) -> u64 {
        self.base_version
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &EditRecord> {
        self.records.iter()
    }

    pub fn push(&mut self, record: EditRecord) {
        self.records.push_back(record);
        if let Some(limit) = self.limit {
            while self.records.len() > limit {
                self.records.pop_front();
                self.base_version += 1;
            }
        }
    }

    /// Forget every record; the next delta can only start at `version`.
    pub fn reset(&mut self, version: u64) {
        self.records.clear();
        self.base_version = version;
    }

    /// Delta from `from_version` to `current_version`. The caller guarantees
    /// `from_version <= current_version`.
    pub fn delta_between(&self, from_version: u64, current_version: u64) -> VersionDelta {
        if from_version == current_version {
            return VersionDelta::Unchanged;
        }
        if from_version < self.base_version {
            return VersionDelta::Unknown;
        }
        let first = (from_version - self.base_version) as usize;
        let entries: Vec<EditRecord> = self.records.range(first..).copied().collect();
        match collapse(&entries) {
            Some(range) => VersionDelta::Changed(range),
            None => VersionDelta::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(start: usize, end: usize, new_length: usize, resulting_length: usize) -> EditRecord {
        EditRecord {
            resulting_length,
            change: TextChangeRange::new(Span::new(start, end), new_length),
        }
    }

    #[test]
    fn single_record_collapses_to_itself() {
        // "hello" -> "Xhello"
        let r = record(0, 0, 1, 6);
        assert_eq!(collapse(&[r]), Some(r.change));
    }

    #[test]
    fn collapse_spans_both_edits() {
        // "abcdef" -> "aXYcdef" (1..2 -> "XY") -> "aXYcdf" (5..6 deleted)
        let records = [record(1, 2, 2, 7), record(5, 6, 0, 6)];

        let range = collapse(&records).unwrap();

        // "bcde" in the original became "XYcd"
        assert_eq!(range, TextChangeRange::new(Span::new(1, 5), 4));
        assert_eq!(range.delta(), 0);
    }

    #[test]
    fn collapse_of_nothing_is_none() {
        assert_eq!(collapse(&[]), None);
    }

    #[test]
    fn insta_collapsed_range_shape() {
        let range = collapse(&[record(3, 3, 2, 8), record(0, 1, 0, 7)]).unwrap();
        insta::assert_yaml_snapshot!(range, @r"
        span:
          start: 0
          end: 3
        new_length: 4
        ");
    }

    #[test]
    fn window_evicts_oldest_and_advances_base() {
        let mut history = EditHistory::new(1, Some(2));
        history.push(record(0, 0, 1, 2));
        history.push(record(0, 0, 1, 3));
        history.push(record(0, 0, 1, 4));

        assert_eq!(history.len(), 2);
        assert_eq!(history.base_version(), 2);
        assert_eq!(history.delta_between(1, 4), VersionDelta::Unknown);
        assert!(matches!(
            history.delta_between(2, 4),
            VersionDelta::Changed(_)
        ));
    }

    #[test]
    fn reset_makes_older_versions_unknown() {
        let mut history = EditHistory::new(1, None);
        history.push(record(0, 0, 1, 2));
        history.reset(3);

        assert!(history.is_empty());
        assert_eq!(history.delta_between(2, 3), VersionDelta::Unknown);
        assert_eq!(history.delta_between(3, 3), VersionDelta::Unchanged);
    }
}
