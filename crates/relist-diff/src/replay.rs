//! Replay an edit script against its source snapshot.
//!
//! A batching list view applies deletes and reloads against the old layout,
//! places inserts and move destinations at their new positions, and lets every
//! untouched survivor slide into the remaining gaps in its original order.
//! Replaying a script the same way and comparing the outcome with the target
//! snapshot verifies that the script is complete and consistent.

use std::collections::{BTreeSet, HashSet};

use relist_types::{Diffable, IndexMove, SectionDiffable};

use crate::error::{DiffError, DiffResult, Side};
use crate::indexed::{index_identities, IndexedDiff};
use crate::sectioned::SectionedDiff;

/// Section identities paired with their row identities, in display order.
pub type SectionLayout<S> = Vec<(
    <S as Diffable>::Id,
    Vec<<<S as SectionDiffable>::Row as Diffable>::Id>,
)>;

/// Apply `diff` to `from` and return the resulting identity order.
///
/// Inserted slots are filled from `to`. For a script produced by
/// [`diff_indexed`](crate::diff_indexed) the result equals the identities of
/// `to`.
pub fn replay_indexed<T: Diffable>(
    from: &[T],
    to: &[T],
    diff: &IndexedDiff,
) -> DiffResult<Vec<T::Id>> {
    let from_ids: Vec<T::Id> = from.iter().map(Diffable::diff_id).collect();
    let to_ids: Vec<T::Id> = to.iter().map(Diffable::diff_id).collect();
    replay_ids(&from_ids, &to_ids, diff)
}

/// Apply a sectioned diff to `from` and return the resulting layout.
///
/// Sections are replayed first. Rows of inserted sections come from `to`;
/// rows of surviving sections are replayed with the deletes recorded under
/// their old index and the inserts, reloads and moves recorded under their
/// new index.
pub fn replay_sectioned<S: SectionDiffable>(
    from: &[S],
    to: &[S],
    diff: &SectionedDiff,
) -> DiffResult<SectionLayout<S>> {
    let from_ids: Vec<S::Id> = from.iter().map(Diffable::diff_id).collect();
    let to_ids: Vec<S::Id> = to.iter().map(Diffable::diff_id).collect();
    let order = replay_ids(&from_ids, &to_ids, &diff.sections)?;
    let old_positions = index_identities(&from_ids, Side::From)?;

    let rows = &diff.rows;
    let mut consumed = 0;
    let mut layout = Vec::with_capacity(order.len());

    for (new_section, id) in order.into_iter().enumerate() {
        let target_rows = row_ids(&to[new_section]);

        if diff.sections.inserts.contains(&new_section) {
            layout.push((id, target_rows));
            continue;
        }

        let old_section = *old_positions
            .get(&id)
            .ok_or_else(|| DiffError::replay(format!("section {id:?} has no source")))?;

        let row_diff = IndexedDiff {
            deletes: rows
                .deletes
                .iter()
                .filter(|p| p.section == old_section)
                .map(|p| p.row)
                .collect(),
            inserts: rows
                .inserts
                .iter()
                .filter(|p| p.section == new_section)
                .map(|p| p.row)
                .collect(),
            reloads: rows
                .reloads
                .iter()
                .filter(|p| p.section == new_section)
                .map(|p| p.row)
                .collect(),
            moves: rows
                .moves
                .iter()
                .filter(|m| m.from.section == old_section && m.to.section == new_section)
                .map(|m| IndexMove::new(m.from.row, m.to.row))
                .collect::<BTreeSet<_>>(),
        };
        consumed += row_diff.deletes.len()
            + row_diff.inserts.len()
            + row_diff.reloads.len()
            + row_diff.moves.len();

        let replayed = replay_ids(&row_ids(&from[old_section]), &target_rows, &row_diff)
            .map_err(|e| DiffError::Rows {
                side: Side::From,
                section: old_section,
                source: Box::new(e),
            })?;
        layout.push((id, replayed));
    }

    let total = rows.deletes.len() + rows.inserts.len() + rows.reloads.len() + rows.moves.len();
    if consumed != total {
        return Err(DiffError::replay(format!(
            "{} row edits reference sections that were not replayed",
            total - consumed
        )));
    }

    Ok(layout)
}

fn row_ids<S: SectionDiffable>(section: &S) -> Vec<<S::Row as Diffable>::Id> {
    section
        .section_items()
        .iter()
        .map(Diffable::diff_id)
        .collect()
}

fn replay_ids<I: Clone>(from: &[I], to: &[I], diff: &IndexedDiff) -> DiffResult<Vec<I>> {
    if let Some(&pos) = diff.deletes.iter().find(|&&pos| pos >= from.len()) {
        return Err(DiffError::replay(format!(
            "delete at {pos} is outside the source list of {}",
            from.len()
        )));
    }

    let len = from.len() - diff.deletes.len() + diff.inserts.len();
    if len != to.len() {
        return Err(DiffError::replay(format!(
            "replay yields {len} items but the target has {}",
            to.len()
        )));
    }

    let mut slots: Vec<Option<I>> = vec![None; len];

    for &pos in &diff.inserts {
        let slot = slots
            .get_mut(pos)
            .ok_or_else(|| DiffError::replay(format!("insert at {pos} is out of range")))?;
        *slot = Some(to[pos].clone());
    }

    let mut moved = HashSet::new();
    for mv in &diff.moves {
        if mv.from >= from.len() || mv.to >= len {
            return Err(DiffError::replay(format!("move {mv} is out of range")));
        }
        if diff.deletes.contains(&mv.from) {
            return Err(DiffError::replay(format!("move {mv} starts at a deleted position")));
        }
        if !moved.insert(mv.from) {
            return Err(DiffError::replay(format!("position {} moves twice", mv.from)));
        }
        let slot = &mut slots[mv.to];
        if slot.is_some() {
            return Err(DiffError::replay(format!("move {mv} lands on an occupied slot")));
        }
        *slot = Some(from[mv.from].clone());
    }

    for &pos in &diff.reloads {
        if pos >= from.len() || diff.deletes.contains(&pos) || moved.contains(&pos) {
            return Err(DiffError::replay(format!(
                "reload at {pos} does not name an item left in place"
            )));
        }
    }

    let mut remaining = from
        .iter()
        .enumerate()
        .filter(|(pos, _)| !diff.deletes.contains(pos) && !moved.contains(pos))
        .map(|(_, id)| id);

    for slot in slots.iter_mut().filter(|slot| slot.is_none()) {
        *slot = remaining.next().cloned();
    }
    if remaining.next().is_some() {
        return Err(DiffError::replay("surviving items outnumber free slots"));
    }

    slots
        .into_iter()
        .collect::<Option<Vec<I>>>()
        .ok_or_else(|| DiffError::replay("free slots outnumber surviving items"))
}
