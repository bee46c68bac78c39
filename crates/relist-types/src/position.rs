use std::fmt;

use serde::{Deserialize, Serialize};

/// A matched item whose position changed between two flat snapshots.
///
/// `from` is the index in the old list, `to` the index in the new list.
/// Ordering is by `from`, then `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IndexMove {
    pub from: usize,
    pub to: usize,
}

impl IndexMove {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for IndexMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// A two-level position: a row within a section.
///
/// Ordering is by section, then row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IndexPath {
    pub section: usize,
    pub row: usize,
}

impl IndexPath {
    pub fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.section, self.row)
    }
}

/// A row whose position changed in a sectioned collection.
///
/// `from` is expressed against the old structure, `to` against the new one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowMove {
    pub from: IndexPath,
    pub to: IndexPath,
}

impl RowMove {
    pub fn new(from: IndexPath, to: IndexPath) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for RowMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}
