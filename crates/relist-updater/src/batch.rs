//! A sectioned diff arranged for application by a list surface.
//!
//! Deletes and reloads address the layout before the update; inserts and move
//! destinations address the layout after it. Surfaces apply deletes, then
//! inserts, then moves, then reloads, sections before rows in each phase.

use serde::{Deserialize, Serialize};

use relist_diff::SectionedDiff;
use relist_types::{IndexMove, IndexPath, RowMove};

/// One phase of a batch, in application order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatchStep<'a> {
    DeleteSections(&'a [usize]),
    DeleteRows(&'a [IndexPath]),
    InsertSections(&'a [usize]),
    InsertRows(&'a [IndexPath]),
    MoveSection(IndexMove),
    MoveRow(RowMove),
    ReloadSections(&'a [usize]),
    ReloadRows(&'a [IndexPath]),
}

/// The edits of one update, sorted and grouped by kind.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchUpdate {
    pub delete_sections: Vec<usize>,
    pub insert_sections: Vec<usize>,
    pub move_sections: Vec<IndexMove>,
    pub reload_sections: Vec<usize>,
    pub delete_rows: Vec<IndexPath>,
    pub insert_rows: Vec<IndexPath>,
    pub move_rows: Vec<RowMove>,
    pub reload_rows: Vec<IndexPath>,
}

impl BatchUpdate {
    /// Number of structural edits at both levels. Reloads are not counted.
    pub fn changed_count(&self) -> usize {
        self.delete_sections.len()
            + self.insert_sections.len()
            + self.move_sections.len()
            + self.delete_rows.len()
            + self.insert_rows.len()
            + self.move_rows.len()
    }

    /// Returns `true` if the batch carries no edits, reloads included.
    pub fn is_empty(&self) -> bool {
        self.changed_count() == 0 && self.reload_sections.is_empty() && self.reload_rows.is_empty()
    }

    /// The non-empty phases of this batch, in application order.
    pub fn steps(&self) -> Vec<BatchStep<'_>> {
        let mut steps = Vec::new();

        if !self.delete_sections.is_empty() {
            steps.push(BatchStep::DeleteSections(&self.delete_sections));
        }
        if !self.delete_rows.is_empty() {
            steps.push(BatchStep::DeleteRows(&self.delete_rows));
        }
        if !self.insert_sections.is_empty() {
            steps.push(BatchStep::InsertSections(&self.insert_sections));
        }
        if !self.insert_rows.is_empty() {
            steps.push(BatchStep::InsertRows(&self.insert_rows));
        }
        steps.extend(self.move_sections.iter().copied().map(BatchStep::MoveSection));
        steps.extend(self.move_rows.iter().copied().map(BatchStep::MoveRow));
        if !self.reload_sections.is_empty() {
            steps.push(BatchStep::ReloadSections(&self.reload_sections));
        }
        if !self.reload_rows.is_empty() {
            steps.push(BatchStep::ReloadRows(&self.reload_rows));
        }

        steps
    }
}

impl From<SectionedDiff> for BatchUpdate {
    fn from(diff: SectionedDiff) -> Self {
        let (sections, rows) = diff.into_parts();
        let sorted = |mut paths: Vec<IndexPath>| {
            paths.sort_unstable();
            paths
        };

        Self {
            delete_sections: sections.deletes.into_iter().collect(),
            insert_sections: sections.inserts.into_iter().collect(),
            move_sections: sections.moves.into_iter().collect(),
            reload_sections: sections.reloads.into_iter().collect(),
            delete_rows: sorted(rows.deletes),
            insert_rows: sorted(rows.inserts),
            move_rows: rows.moves.into_iter().collect(),
            reload_rows: sorted(rows.reloads),
        }
    }
}
