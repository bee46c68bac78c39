//! Flat diff: compare two ordered lists of diffable items.
//!
//! Deletes and inserts are computed first. A surviving item is reported as a
//! move only when its position still differs from where the deletes and
//! inserts alone would put it; otherwise it is left in place and reloaded if
//! its content changed. This mirrors how a batching list view composes
//! updates, so the distinction between move and reload is significant.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use relist_types::{Diffable, IndexMove};

use crate::error::{DiffError, DiffResult, Side};

/// The result of comparing two flat lists.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedDiff {
    /// Positions in `from` with no surviving match in `to`.
    pub deletes: BTreeSet<usize>,
    /// Positions in `to` with no predecessor in `from`.
    pub inserts: BTreeSet<usize>,
    /// Positions in `from` whose item stayed in place but changed content.
    pub reloads: BTreeSet<usize>,
    /// Matched items whose relative position changed.
    pub moves: BTreeSet<IndexMove>,
}

impl IndexedDiff {
    /// Create an empty diff.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of structural edits: deletes, inserts and moves.
    ///
    /// Reloads are not counted; this answers whether the list needs
    /// restructuring, not whether anything changed visually.
    pub fn changed_count(&self) -> usize {
        self.deletes.len() + self.inserts.len() + self.moves.len()
    }

    /// Returns `true` if any delete, insert or move is present.
    pub fn has_structural_changes(&self) -> bool {
        self.changed_count() > 0
    }

    /// Returns `true` if there are no edits of any kind, reloads included.
    pub fn is_empty(&self) -> bool {
        self.deletes.is_empty()
            && self.inserts.is_empty()
            && self.reloads.is_empty()
            && self.moves.is_empty()
    }
}

/// Check that no two items in `items` share an identity.
///
/// `side` only labels the error.
pub fn validate_identities<T: Diffable>(items: &[T], side: Side) -> DiffResult<()> {
    let ids: Vec<T::Id> = items.iter().map(Diffable::diff_id).collect();
    index_identities(&ids, side).map(|_| ())
}

pub(crate) fn index_identities<I>(ids: &[I], side: Side) -> DiffResult<HashMap<&I, usize>>
where
    I: Eq + std::hash::Hash + std::fmt::Debug,
{
    let mut positions = HashMap::with_capacity(ids.len());
    for (pos, id) in ids.iter().enumerate() {
        if let Some(first) = positions.insert(id, pos) {
            return Err(DiffError::DuplicateIdentity {
                side,
                identity: format!("{id:?}"),
                first,
                second: pos,
            });
        }
    }
    Ok(positions)
}

/// Compare two ordered lists and produce their edit script.
///
/// Fails with [`DiffError::DuplicateIdentity`] if either list repeats an
/// identity. Empty, identical and fully disjoint inputs are ordinary cases.
pub fn diff_indexed<T: Diffable>(from: &[T], to: &[T]) -> DiffResult<IndexedDiff> {
    let from_ids: Vec<T::Id> = from.iter().map(Diffable::diff_id).collect();
    let to_ids: Vec<T::Id> = to.iter().map(Diffable::diff_id).collect();

    let old_positions = index_identities(&from_ids, Side::From)?;
    let new_positions = index_identities(&to_ids, Side::To)?;

    let mut deletes = BTreeSet::new();
    let mut inserts = BTreeSet::new();
    let mut reloads = BTreeSet::new();
    let mut moves = BTreeSet::new();

    // (old_pos, new_pos) for every matched item, in `from` order.
    let mut survivors = Vec::with_capacity(from.len().min(to.len()));
    for (old_pos, id) in from_ids.iter().enumerate() {
        match new_positions.get(id) {
            Some(&new_pos) => survivors.push((old_pos, new_pos)),
            None => {
                deletes.insert(old_pos);
            }
        }
    }

    for (new_pos, id) in to_ids.iter().enumerate() {
        if !old_positions.contains_key(id) {
            inserts.insert(new_pos);
        }
    }

    // Inserts are spliced in ascending order, so each lands on its own `to`
    // position and survivors fill the remaining slots in `from` order.
    let expected_slots = (0..to.len()).filter(|slot| !inserts.contains(slot));

    for ((old_pos, new_pos), expected_pos) in survivors.into_iter().zip(expected_slots) {
        if expected_pos == new_pos {
            if !from[old_pos].is_content_equal(&to[new_pos]) {
                trace!(old_pos, new_pos, "reload in place");
                reloads.insert(old_pos);
            }
        } else {
            trace!(old_pos, expected_pos, new_pos, "move");
            moves.insert(IndexMove::new(old_pos, new_pos));
        }
    }

    debug!(
        from = from.len(),
        to = to.len(),
        deletes = deletes.len(),
        inserts = inserts.len(),
        moves = moves.len(),
        reloads = reloads.len(),
        "computed indexed diff"
    );

    Ok(IndexedDiff {
        deletes,
        inserts,
        reloads,
        moves,
    })
}
