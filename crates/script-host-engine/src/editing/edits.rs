//! Batches of text edits proposed against one shared base text, as produced by
//! a rename or refactoring.

use serde::Serialize;

use crate::editing::Span;
use crate::error::{HostError, HostResult};

/// Replace `span` of the base text with `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    pub span: Span,
    pub text: String,
}

impl TextEdit {
    pub fn new(start: usize, end: usize, text: impl Into<String>) -> Self {
        Self {
            span: Span::new(start, end),
            text: text.into(),
        }
    }

    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::new(at, at, text)
    }

    pub fn delete(start: usize, end: usize) -> Self {
        Self::new(start, end, String::new())
    }
}

/// Sort edits by start offset and drop edits nested inside an earlier one.
///
/// Ties on the start offset keep their input order. An edit that lies entirely
/// within the edit before it is dropped; any other overlap is rejected with
/// [`HostError::ConflictingEdits`].
pub fn normalize_edits(edits: Vec<TextEdit>) -> HostResult<Vec<TextEdit>> {
    for edit in &edits {
        if edit.span.start > edit.span.end {
            return Err(HostError::InvertedRange {
                start: edit.span.start,
                end: edit.span.end,
            });
        }
    }

    let mut sorted = edits;
    // stable, so equal starts stay in input order
    sorted.sort_by_key(|edit| edit.span.start);

    let mut result: Vec<TextEdit> = Vec::with_capacity(sorted.len());
    for edit in sorted {
        let Some(current) = result.last() else {
            result.push(edit);
            continue;
        };
        if edit.span.start >= current.span.end {
            result.push(edit);
        } else if current.span.contains_span(edit.span) {
            tracing::trace!(dropped = ?edit.span, kept = ?current.span, "dropping nested edit");
        } else {
            tracing::warn!(first = ?current.span, second = ?edit.span, "overlapping edits");
            return Err(HostError::ConflictingEdits {
                first: current.span,
                second: edit.span,
            });
        }
    }
    Ok(result)
}

/// Normalize `edits` and apply them to `base`, highest offset first so the
/// offsets of the remaining edits stay valid.
pub fn apply_edits(base: &str, edits: Vec<TextEdit>) -> HostResult<String> {
    let edits = normalize_edits(edits)?;
    for edit in &edits {
        edit.span.check_within(base)?;
    }

    let mut result = base.to_string();
    for edit in edits.iter().rev() {
        result.replace_range(edit.span.range(), &edit.text);
    }
    Ok(result)
}

/// Edits that turn `apply_edits(base, edits)` back into `base`.
///
/// The returned edits are normalized and expressed against the edited text.
pub fn invert_edits(base: &str, edits: Vec<TextEdit>) -> HostResult<Vec<TextEdit>> {
    let edits = normalize_edits(edits)?;
    let mut inverse = Vec::with_capacity(edits.len());
    let mut shift: isize = 0;
    for edit in &edits {
        edit.span.check_within(base)?;
        let start = (edit.span.start as isize + shift) as usize;
        inverse.push(TextEdit::new(
            start,
            start + edit.text.len(),
            &base[edit.span.range()],
        ));
        shift += edit.text.len() as isize - edit.span.len() as isize;
    }
    Ok(inverse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn disjoint_edits_pass_through_sorted() {
        let edits = vec![TextEdit::insert(4, "Y"), TextEdit::new(1, 2, "X")];

        let normalized = normalize_edits(edits).unwrap();

        assert_eq!(
            normalized,
            vec![TextEdit::new(1, 2, "X"), TextEdit::insert(4, "Y")]
        );
    }

    #[test]
    fn equal_starts_keep_input_order() {
        let edits = vec![TextEdit::insert(2, "first"), TextEdit::insert(2, "second")];

        let normalized = normalize_edits(edits.clone()).unwrap();

        assert_eq!(normalized, edits);
        assert_eq!(apply_edits("abcd", edits).unwrap(), "abfirstsecondcd");
    }

    #[test]
    fn nested_edit_is_dropped() {
        let edits = vec![TextEdit::new(0, 5, "Z"), TextEdit::new(1, 2, "Q")];

        let normalized = normalize_edits(edits).unwrap();

        assert_eq!(normalized, vec![TextEdit::new(0, 5, "Z")]);
    }

    #[test]
    fn edit_sharing_the_outer_end_is_nested() {
        let edits = vec![TextEdit::new(1, 4, "A"), TextEdit::new(2, 4, "B")];
        assert_eq!(normalize_edits(edits).unwrap().len(), 1);
    }

    #[rstest]
    #[case(vec![TextEdit::new(0, 3, "A"), TextEdit::new(2, 5, "B")])]
    #[case(vec![TextEdit::new(2, 5, "B"), TextEdit::new(0, 3, "A")])]
    #[case(vec![TextEdit::new(1, 3, "A"), TextEdit::new(2, 4, "B")])]
    fn partial_overlap_conflicts(#[case] edits: Vec<TextEdit>) {
        assert!(matches!(
            normalize_edits(edits),
            Err(HostError::ConflictingEdits { .. })
        ));
    }

    #[test]
    fn insertion_at_edit_start_is_dropped_not_conflicting() {
        // A point insert at the start of a wider edit sorts after it and is nested.
        let edits = vec![TextEdit::new(1, 3, "A"), TextEdit::insert(1, "B")];
        assert_eq!(
            normalize_edits(edits).unwrap(),
            vec![TextEdit::new(1, 3, "A")]
        );
    }

    #[test]
    fn inverted_span_is_rejected_before_any_text_is_seen() {
        let err = normalize_edits(vec![TextEdit::new(3, 1, "x")]).unwrap_err();

        assert_eq!(err, HostError::InvertedRange { start: 3, end: 1 });
        assert_eq!(err.to_string(), "Range 3..1 ends before it starts");
    }

    #[test]
    fn normalize_is_idempotent() {
        let edits = vec![
            TextEdit::new(6, 8, "c"),
            TextEdit::new(0, 4, "a"),
            TextEdit::new(1, 2, "nested"),
            TextEdit::insert(4, "b"),
        ];

        let once = normalize_edits(edits).unwrap();
        let twice = normalize_edits(once.clone()).unwrap();

        assert_eq!(once, twice);
    }

    #[rstest]
    #[case("abcdef", vec![TextEdit::new(1, 2, "X"), TextEdit::insert(4, "Y")], "aXcdYef")]
    #[case("abcdef", vec![TextEdit::new(0, 5, "Z"), TextEdit::new(1, 2, "Q")], "Zf")]
    #[case("abcdef", vec![], "abcdef")]
    #[case("abcdef", vec![TextEdit::delete(0, 6)], "")]
    #[case("héllo", vec![TextEdit::new(1, 3, "e")], "hello")]
    fn apply_produces_expected_text(
        #[case] base: &str,
        #[case] edits: Vec<TextEdit>,
        #[case] expected: &str,
    ) {
        assert_eq!(apply_edits(base, edits).unwrap(), expected);
    }

    #[test]
    fn apply_rejects_edits_past_the_end() {
        let result = apply_edits("abc", vec![TextEdit::new(2, 9, "x")]);
        assert_eq!(
            result,
            Err(HostError::Range {
                start: 2,
                end: 9,
                len: 3
            })
        );
    }

    #[test]
    fn apply_rejects_conflicts() {
        let edits = vec![TextEdit::new(0, 3, "A"), TextEdit::new(2, 5, "B")];
        assert!(apply_edits("abcdef", edits).is_err());
    }

    #[test]
    fn apply_then_invert_round_trips() {
        let base = "fn main() {\n    let x = 1;\n}\n";
        let edits = vec![
            TextEdit::new(20, 21, "value"),
            TextEdit::new(3, 7, "start"),
            TextEdit::insert(26, " // done"),
            TextEdit::delete(16, 20),
        ];

        let edited = apply_edits(base, edits.clone()).unwrap();
        let inverse = invert_edits(base, edits).unwrap();

        assert_eq!(edited, "fn start() {\n    value = 1; // done\n}\n");
        assert_eq!(apply_edits(&edited, inverse).unwrap(), base);
    }
}
