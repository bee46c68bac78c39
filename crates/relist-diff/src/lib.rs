//! Diff engine for relist.
//!
//! Computes the structural edits (delete, insert, move, reload) that turn one
//! ordered snapshot of [`Diffable`](relist_types::Diffable) items into another,
//! and the two-level variant for collections grouped into sections.
//!
//! # Key Types
//!
//! - [`diff_indexed`] / [`IndexedDiff`] -- Flat diff over one ordered list
//! - [`diff_sectioned`] / [`SectionedDiff`] / [`SectionedRowDiff`] -- Section-level
//!   diff plus per-section row diffs in `(section, row)` positions
//! - [`replay_indexed`] / [`replay_sectioned`] -- Apply an edit script the way a
//!   batching list view would, to verify it against its inputs

pub mod error;
pub mod indexed;
pub mod replay;
pub mod sectioned;

pub use error::{DiffError, DiffResult, Side};
pub use indexed::{diff_indexed, validate_identities, IndexedDiff};
pub use replay::{replay_indexed, replay_sectioned};
pub use sectioned::{diff_sectioned, validate_sections, SectionedDiff, SectionedRowDiff};
