//! Error types for score entry, CSV import, and the state store.
//!
//! The grading functions themselves never fail; every error here comes from a
//! boundary (user input, file input, or a store edit).

use thiserror::Error;

use crate::model::Criterion;

/// A rejected score entry. Never causes a state change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The input was empty or not an integer.
    #[error("score must be a whole number, got '{0}'")]
    NotANumber(String),

    /// The value is outside `[0, 8]`.
    #[error("Score must be 0-8 (got {0})")]
    OutOfRange(i64),
}

/// Failures of a CSV import. Each one aborts the whole import.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The file could not be read.
    #[error("failed to read import file")]
    Read(#[source] std::io::Error),

    /// The file content is not valid UTF-8 text.
    #[error("failed to decode import file as UTF-8")]
    Decode(#[source] std::string::FromUtf8Error),

    /// Parsing finished without a single usable score.
    #[error("no valid grades found in the CSV")]
    NoValidGrades,
}

impl ImportError {
    /// Returns `true` for read/decode failures, as opposed to a file that was
    /// read fine but held nothing usable.
    pub fn is_structural(&self) -> bool {
        matches!(self, ImportError::Read(_) | ImportError::Decode(_))
    }
}

/// Errors from editing the subject document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No subject with this id in the roster.
    #[error("unknown subject: {0}")]
    UnknownSubject(String),

    /// Removal index past the end of the criterion's list.
    #[error("subject {subject} criterion {criterion} has {len} score(s), no entry at index {index}")]
    IndexOutOfRange {
        subject: String,
        criterion: Criterion,
        index: usize,
        len: usize,
    },

    /// The score itself was rejected.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_vs_semantic() {
        let read = ImportError::Read(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(read.is_structural());
        assert!(!ImportError::NoValidGrades.is_structural());
    }

    #[test]
    fn out_of_range_message_matches_inline_hint() {
        let msg = ValidationError::OutOfRange(9).to_string();
        assert!(msg.starts_with("Score must be 0-8"));
    }
}
