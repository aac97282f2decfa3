use crate::editing::Span;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("No script with name '{0}'")]
    NotFound(String),
    #[error("Script '{0}' is already registered")]
    DuplicateName(String),
    #[error("Range {start}..{end} is invalid for text of length {len}")]
    Range { start: usize, end: usize, len: usize },
    #[error("Range {start}..{end} ends before it starts")]
    InvertedRange { start: usize, end: usize },
    #[error("Line {line}, column {column} is outside the script")]
    OutOfRange { line: usize, column: usize },
    #[error("Version {requested} is newer than current version {current}")]
    VersionOutOfRange { requested: u64, current: u64 },
    #[error("Trying to apply overlapping edits at {first:?} and {second:?}")]
    ConflictingEdits { first: Span, second: Span },
}

pub type HostResult<T> = Result<T, HostError>;
