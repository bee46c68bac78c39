//! The data-source side of a list surface.
//!
//! [`ListUpdater`] owns the sections currently on display. Each new snapshot
//! is diffed against them; the target receives one batch for the difference,
//! or a full reload when animation is off, nothing is displayed yet, or the
//! change is too large to animate.

use tracing::{debug, trace};

use relist_diff::{diff_sectioned, validate_sections, Side};
use relist_types::{Diffable, IndexPath, SectionDiffable, SingleSection};

use crate::batch::BatchUpdate;
use crate::config::UpdaterConfig;
use crate::error::UpdaterResult;
use crate::target::UpdateTarget;

/// How an update reached the target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The target rebuilt its whole layout.
    Reloaded,
    /// The target applied this batch.
    Batched(BatchUpdate),
    /// Nothing changed; the target was not called.
    Unchanged,
}

/// Holds displayed sections and keeps a target in sync with them.
#[derive(Debug)]
pub struct ListUpdater<S, T> {
    sections: Vec<S>,
    target: T,
    config: UpdaterConfig,
}

impl<S: SectionDiffable, T: UpdateTarget> ListUpdater<S, T> {
    /// Create an updater with no data and the default configuration.
    pub fn new(target: T) -> Self {
        Self::with_config(target, UpdaterConfig::default())
    }

    pub fn with_config(target: T, config: UpdaterConfig) -> Self {
        Self {
            sections: Vec::new(),
            target,
            config,
        }
    }

    /// Replace the displayed sections, animating per the configuration.
    pub fn set_sections(&mut self, sections: Vec<S>) -> UpdaterResult<UpdateOutcome> {
        let animated = self.config.animated;
        self.set_sections_animated(sections, animated)
    }

    /// Replace the displayed sections.
    ///
    /// On error (a snapshot repeating an identity, or a failing target) the
    /// previous sections stay in place.
    pub fn set_sections_animated(
        &mut self,
        sections: Vec<S>,
        animated: bool,
    ) -> UpdaterResult<UpdateOutcome> {
        if !animated || self.sections.is_empty() {
            return self.reload(sections);
        }

        let diff = diff_sectioned(&self.sections, &sections)?;
        if diff.is_empty() {
            trace!(sections = sections.len(), "snapshot unchanged");
            self.sections = sections;
            return Ok(UpdateOutcome::Unchanged);
        }

        let changes = diff.changed_count();
        if !self.config.allows(changes) {
            debug!(
                changes,
                max = ?self.config.max_animated_changes,
                "change count above animation cap"
            );
            return self.reload(sections);
        }

        let batch = BatchUpdate::from(diff);
        self.target.perform_batch(&batch)?;
        debug!(changes, steps = batch.steps().len(), "applied batch update");
        self.sections = sections;
        Ok(UpdateOutcome::Batched(batch))
    }

    fn reload(&mut self, sections: Vec<S>) -> UpdaterResult<UpdateOutcome> {
        validate_sections(&sections, Side::To)?;
        self.target.reload_data()?;
        debug!(sections = sections.len(), "reloaded all data");
        self.sections = sections;
        Ok(UpdateOutcome::Reloaded)
    }

    /// The displayed sections.
    pub fn sections(&self) -> &[S] {
        &self.sections
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Returns `true` if nothing is displayed.
    pub fn is_empty(&self) -> bool {
        self.sections
            .iter()
            .all(|section| section.section_items().is_empty())
    }

    pub fn section(&self, index: usize) -> Option<&S> {
        self.sections.get(index)
    }

    /// Number of rows in `section`, or 0 if there is no such section.
    pub fn item_count(&self, section: usize) -> usize {
        self.section(section)
            .map_or(0, |section| section.section_items().len())
    }

    pub fn item(&self, path: IndexPath) -> Option<&S::Row> {
        self.section(path.section)?.section_items().get(path.row)
    }

    /// The rows of a single-section layout; empty for any other layout.
    pub fn items(&self) -> &[S::Row] {
        match self.sections.as_slice() {
            [only] => only.section_items(),
            _ => &[],
        }
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn config(&self) -> &UpdaterConfig {
        &self.config
    }

    /// Consume the updater and return its target.
    pub fn into_target(self) -> T {
        self.target
    }
}

impl<R: Diffable, T: UpdateTarget> ListUpdater<SingleSection<R>, T> {
    /// Replace the displayed rows of a flat list, animating per the
    /// configuration.
    pub fn set_items(&mut self, items: Vec<R>) -> UpdaterResult<UpdateOutcome> {
        let animated = self.config.animated;
        self.set_items_animated(items, animated)
    }

    pub fn set_items_animated(
        &mut self,
        items: Vec<R>,
        animated: bool,
    ) -> UpdaterResult<UpdateOutcome> {
        self.set_sections_animated(vec![SingleSection::new(items)], animated)
    }
}
