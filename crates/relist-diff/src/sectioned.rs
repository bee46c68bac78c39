//! Sectioned diff: compare two collections grouped into ordered sections.
//!
//! Sections are diffed as whole units first. Rows are then diffed only inside
//! sections present in both snapshots; the rows of inserted or deleted
//! sections are covered by the section-level edit and only checked for
//! repeated identities.
//!
//! Row deletes are expressed against the old section index, row inserts,
//! reloads and move destinations against the new one.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use relist_types::{Diffable, IndexPath, RowMove, SectionDiffable};

use crate::error::{DiffError, DiffResult, Side};
use crate::indexed::{diff_indexed, index_identities, validate_identities, IndexedDiff};

/// Row-level edits aggregated over every surviving section.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionedRowDiff {
    /// Removed rows, in old section coordinates.
    pub deletes: Vec<IndexPath>,
    /// Added rows, in new section coordinates.
    pub inserts: Vec<IndexPath>,
    /// Rows refreshed in place, tagged with the new section index.
    pub reloads: Vec<IndexPath>,
    /// Rows whose relative position changed.
    pub moves: BTreeSet<RowMove>,
}

impl SectionedRowDiff {
    /// Create an empty row diff.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of structural row edits: deletes, inserts and moves.
    pub fn changed_count(&self) -> usize {
        self.deletes.len() + self.inserts.len() + self.moves.len()
    }

    /// Returns `true` if there are no row edits of any kind.
    pub fn is_empty(&self) -> bool {
        self.deletes.is_empty()
            && self.inserts.is_empty()
            && self.reloads.is_empty()
            && self.moves.is_empty()
    }
}

/// The result of comparing two sectioned collections.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionedDiff {
    /// Edits to the sections themselves.
    pub sections: IndexedDiff,
    /// Edits to rows inside sections that survived.
    pub rows: SectionedRowDiff,
}

impl SectionedDiff {
    /// Returns `true` if neither sections nor rows changed.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.rows.is_empty()
    }

    /// Structural edits at both levels.
    pub fn changed_count(&self) -> usize {
        self.sections.changed_count() + self.rows.changed_count()
    }

    /// Split into the section-level and row-level results.
    pub fn into_parts(self) -> (IndexedDiff, SectionedRowDiff) {
        (self.sections, self.rows)
    }
}

/// Check that section identities are unique, and row identities are unique
/// within every section.
///
/// A repeated row identity is reported as [`DiffError::Rows`] naming the
/// section's index in `sections`.
pub fn validate_sections<S: SectionDiffable>(sections: &[S], side: Side) -> DiffResult<()> {
    validate_identities(sections, side)?;
    for (section, item) in sections.iter().enumerate() {
        validate_rows(item, section, side)?;
    }
    Ok(())
}

fn validate_rows<S: SectionDiffable>(item: &S, section: usize, side: Side) -> DiffResult<()> {
    validate_identities(item.section_items(), side).map_err(|e| DiffError::Rows {
        side,
        section,
        source: Box::new(e),
    })
}

/// Compare two sectioned collections.
///
/// Fails with [`DiffError::DuplicateIdentity`] if section identities repeat,
/// or with [`DiffError::Rows`] if any section of either snapshot repeats a row
/// identity.
pub fn diff_sectioned<S: SectionDiffable>(from: &[S], to: &[S]) -> DiffResult<SectionedDiff> {
    let sections = diff_indexed(from, to)?;

    // Rows of surviving sections are checked by their row diff below.
    for &section in &sections.deletes {
        validate_rows(&from[section], section, Side::From)?;
    }
    for &section in &sections.inserts {
        validate_rows(&to[section], section, Side::To)?;
    }

    let to_ids: Vec<S::Id> = to.iter().map(Diffable::diff_id).collect();
    let to_positions = index_identities(&to_ids, Side::To)?;

    let mut rows = SectionedRowDiff::new();
    let mut deleted_paths = HashSet::new();

    for (section, item) in from.iter().enumerate() {
        if sections.deletes.contains(&section) {
            continue;
        }

        let Some(&to_section) = to_positions.get(&item.diff_id()) else {
            error!(section, "surviving section missing from target snapshot");
            return Err(DiffError::UnmatchedSection { section });
        };

        let row_diff = diff_indexed(item.section_items(), to[to_section].section_items())
            .map_err(|e| {
                let (side, section) = match &e {
                    DiffError::DuplicateIdentity { side: Side::To, .. } => (Side::To, to_section),
                    _ => (Side::From, section),
                };
                DiffError::Rows {
                    side,
                    section,
                    source: Box::new(e),
                }
            })?;

        for &row in &row_diff.deletes {
            let path = IndexPath::new(section, row);
            deleted_paths.insert(path);
            rows.deletes.push(path);
        }
        for &row in &row_diff.inserts {
            rows.inserts.push(IndexPath::new(to_section, row));
        }
        for &row in &row_diff.reloads {
            rows.reloads.push(IndexPath::new(to_section, row));
        }
        for mv in &row_diff.moves {
            let source = IndexPath::new(section, mv.from);
            if deleted_paths.contains(&source) {
                continue;
            }
            rows.moves
                .insert(RowMove::new(source, IndexPath::new(to_section, mv.to)));
        }
    }

    debug!(
        from = from.len(),
        to = to.len(),
        section_changes = sections.changed_count(),
        row_changes = rows.changed_count(),
        "computed sectioned diff"
    );

    Ok(SectionedDiff { sections, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use relist_types::{Keyed, Section, SingleSection};

    type Rows = Section<&'static str, Keyed<&'static str, u32>>;

    fn section(id: &'static str, rows: &[(&'static str, u32)]) -> Rows {
        Section::new(id, rows.iter().map(|&(k, v)| Keyed::new(k, v)).collect())
    }

    fn path(section: usize, row: usize) -> IndexPath {
        IndexPath::new(section, row)
    }

    #[test]
    fn identical_sections_no_diff() {
        let data = vec![section("A", &[("a", 1)]), section("B", &[("b", 1), ("c", 1)])];
        let diff = diff_sectioned(&data, &data).unwrap();
        assert!(diff.is_empty());
    }

    #[test]
    fn replaced_section_is_not_diffed_row_by_row() {
        let from = vec![section("S1", &[("a", 0), ("b", 0)]), section("S2", &[("c", 0)])];
        let to = vec![section("S1", &[("a", 0), ("b", 0)]), section("S3", &[("c", 0)])];

        let diff = diff_sectioned(&from, &to).unwrap();
        assert_eq!(diff.sections.deletes, BTreeSet::from([1]));
        assert_eq!(diff.sections.inserts, BTreeSet::from([1]));
        assert!(diff.rows.is_empty());
    }

    #[test]
    fn row_edits_use_old_and_new_section_indexes() {
        let from = vec![
            section("gone", &[("z", 0)]),
            section("A", &[("a", 0), ("b", 0), ("c", 0)]),
        ];
        let to = vec![
            section("A", &[("b", 1), ("x", 0), ("c", 0)]),
            section("new", &[("y", 0)]),
        ];

        let diff = diff_sectioned(&from, &to).unwrap();
        assert_eq!(diff.sections.deletes, BTreeSet::from([0]));
        assert_eq!(diff.sections.inserts, BTreeSet::from([1]));

        // "A" lives at 1 before the update and at 0 after it.
        assert_eq!(diff.rows.deletes, vec![path(1, 0)]);
        assert_eq!(diff.rows.inserts, vec![path(0, 1)]);
        // "b" stays in place relative to its neighbours but changed content;
        // the reload carries the old row index and the new section index.
        assert_eq!(diff.rows.reloads, vec![path(0, 1)]);
        assert!(diff.rows.moves.is_empty());
    }

    #[test]
    fn row_moves_map_between_sections_indexes() {
        let from = vec![section("A", &[("a", 0)]), section("B", &[("b", 0), ("c", 0)])];
        let to = vec![section("B", &[("c", 0), ("b", 0)]), section("A", &[("a", 0)])];

        let diff = diff_sectioned(&from, &to).unwrap();
        assert_eq!(diff.sections.moves.len(), 2);
        assert_eq!(
            diff.rows.moves,
            BTreeSet::from([
                RowMove::new(path(1, 0), path(0, 1)),
                RowMove::new(path(1, 1), path(0, 0)),
            ])
        );
        assert!(diff.rows.deletes.is_empty());
        assert!(diff.rows.inserts.is_empty());
    }

    #[test]
    fn rows_accumulate_in_section_order() {
        let from = vec![
            section("A", &[("a1", 0), ("a2", 0)]),
            section("B", &[("b1", 0), ("b2", 0)]),
        ];
        let to = vec![section("A", &[("a2", 0)]), section("B", &[("b2", 0)])];

        let diff = diff_sectioned(&from, &to).unwrap();
        assert_eq!(diff.rows.deletes, vec![path(0, 0), path(1, 0)]);
        assert_eq!(diff.rows.changed_count(), 2);
        assert_eq!(diff.changed_count(), 2);
    }

    #[test]
    fn move_sources_never_reference_deleted_rows() {
        let from = vec![section("A", &[("a", 0), ("b", 0), ("c", 0), ("d", 0)])];
        let to = vec![section("A", &[("d", 0), ("c", 0), ("a", 0)])];

        let diff = diff_sectioned(&from, &to).unwrap();
        let deleted: HashSet<IndexPath> = diff.rows.deletes.iter().copied().collect();
        assert_eq!(diff.rows.deletes, vec![path(0, 1)]);
        assert!(diff.rows.moves.iter().all(|m| !deleted.contains(&m.from)));
        assert!(!diff.rows.moves.is_empty());
    }

    #[test]
    fn single_section_reports_rows_in_section_zero() {
        let from = vec![SingleSection::new(vec!["a", "b"])];
        let to = vec![SingleSection::new(vec!["b", "c"])];

        let diff = diff_sectioned(&from, &to).unwrap();
        assert!(diff.sections.is_empty());
        assert_eq!(diff.rows.deletes, vec![path(0, 0)]);
        assert_eq!(diff.rows.inserts, vec![path(0, 1)]);
    }

    #[test]
    fn duplicate_section_identity_is_rejected() {
        let from = vec![section("A", &[]), section("A", &[])];
        let err = diff_sectioned(&from, &[]).unwrap_err();
        assert!(matches!(
            err,
            DiffError::DuplicateIdentity { side: Side::From, .. }
        ));
    }

    #[test]
    fn duplicate_row_identity_reports_section() {
        let from = vec![section("A", &[]), section("B", &[("x", 0), ("x", 1)])];
        let to = vec![section("B", &[("x", 0)])];

        match diff_sectioned(&from, &to).unwrap_err() {
            DiffError::Rows { side, section, source } => {
                assert_eq!(side, Side::From);
                assert_eq!(section, 1);
                assert!(matches!(
                    *source,
                    DiffError::DuplicateIdentity { side: Side::From, first: 0, second: 1, .. }
                ));
            }
            other => panic!("expected Rows, got {:?}", other),
        }
    }

    #[test]
    fn duplicate_row_in_surviving_target_section_uses_target_index() {
        let from = vec![section("A", &[]), section("B", &[("x", 0)])];
        let to = vec![section("B", &[("x", 0), ("x", 1)]), section("A", &[])];

        match diff_sectioned(&from, &to).unwrap_err() {
            DiffError::Rows { side, section, .. } => {
                assert_eq!(side, Side::To);
                assert_eq!(section, 0);
            }
            other => panic!("expected Rows, got {:?}", other),
        }
    }

    #[test]
    fn duplicate_row_in_inserted_section_is_rejected() {
        let to = vec![section("A", &[("x", 0), ("x", 1)])];

        match diff_sectioned(&[], &to).unwrap_err() {
            DiffError::Rows { side, section, source } => {
                assert_eq!(side, Side::To);
                assert_eq!(section, 0);
                assert!(matches!(
                    *source,
                    DiffError::DuplicateIdentity { side: Side::To, first: 0, second: 1, .. }
                ));
            }
            other => panic!("expected Rows, got {:?}", other),
        }
    }

    #[test]
    fn duplicate_row_in_deleted_section_is_rejected() {
        let from = vec![section("A", &[]), section("gone", &[("x", 0), ("x", 1)])];
        let to = vec![section("A", &[])];

        let err = diff_sectioned(&from, &to).unwrap_err();
        assert!(matches!(
            err,
            DiffError::Rows { side: Side::From, section: 1, .. }
        ));
    }

    #[test]
    fn validate_sections_checks_sections_and_rows() {
        let good = vec![section("A", &[("x", 0)]), section("B", &[("x", 0)])];
        assert!(validate_sections(&good, Side::To).is_ok());

        let repeated_section = vec![section("A", &[]), section("A", &[])];
        assert!(matches!(
            validate_sections(&repeated_section, Side::To).unwrap_err(),
            DiffError::DuplicateIdentity { side: Side::To, first: 0, second: 1, .. }
        ));

        let repeated_row = vec![section("A", &[]), section("B", &[("y", 0), ("y", 0)])];
        let err = validate_sections(&repeated_row, Side::From).unwrap_err();
        assert!(matches!(err, DiffError::Rows { side: Side::From, section: 1, .. }));
        assert!(err.to_string().starts_with("rows of section 1 in `from` snapshot"));
    }

    #[test]
    fn into_parts_splits_levels() {
        let from = vec![section("A", &[("a", 0)])];
        let to = vec![section("A", &[("a", 1)])];
        let (sections, rows) = diff_sectioned(&from, &to).unwrap().into_parts();
        assert!(sections.is_empty());
        assert_eq!(rows.reloads, vec![path(0, 0)]);
    }
}
