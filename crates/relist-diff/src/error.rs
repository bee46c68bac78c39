//! Error types for the diff crate.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which of the two snapshots an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    From,
    To,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::From => f.write_str("from"),
            Side::To => f.write_str("to"),
        }
    }
}

/// Errors that can occur during diff operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DiffError {
    /// Two items in one snapshot share an identity.
    #[error("duplicate identity {identity} in `{side}` snapshot at positions {first} and {second}")]
    DuplicateIdentity {
        /// The snapshot containing the duplicate.
        side: Side,
        /// `Debug` rendering of the repeated identity.
        identity: String,
        /// Position of the first occurrence.
        first: usize,
        /// Position of the repeated occurrence.
        second: usize,
    },

    /// The rows of one section failed to diff or validate.
    #[error("rows of section {section} in `{side}` snapshot: {source}")]
    Rows {
        /// The snapshot `section` indexes into.
        side: Side,
        /// Index of the section in that snapshot.
        section: usize,
        #[source]
        source: Box<DiffError>,
    },

    /// A section reported as surviving has no same-identity section in `to`.
    ///
    /// This is an internal defect, never a property of the inputs.
    #[error("surviving section {section} has no counterpart in the `to` snapshot")]
    UnmatchedSection {
        /// Index of the section in the `from` snapshot.
        section: usize,
    },

    /// An edit script does not fit the snapshots it was replayed against.
    #[error("inconsistent edit script: {reason}")]
    Replay {
        /// What did not fit.
        reason: String,
    },
}

impl DiffError {
    pub(crate) fn replay(reason: impl Into<String>) -> Self {
        DiffError::Replay {
            reason: reason.into(),
        }
    }
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
