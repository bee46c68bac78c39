use crate::batch::BatchUpdate;
use crate::error::UpdaterResult;

/// A surface that displays the data held by a [`ListUpdater`](crate::ListUpdater).
///
/// Implementations must satisfy these invariants:
/// - `perform_batch` applies the whole batch as one update, in the order
///   given by [`BatchUpdate::steps`].
/// - After either call returns `Ok`, the surface reflects the updater's new
///   data. On `Err` the updater keeps its previous data.
pub trait UpdateTarget {
    /// Discard the displayed layout and rebuild it from scratch.
    fn reload_data(&mut self) -> UpdaterResult<()>;

    /// Apply one batch of edits.
    fn perform_batch(&mut self, batch: &BatchUpdate) -> UpdaterResult<()>;
}

/// A call received by a [`RecordingTarget`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TargetEvent {
    ReloadData,
    Batch(BatchUpdate),
}

/// An [`UpdateTarget`] that records every call instead of rendering.
#[derive(Clone, Debug, Default)]
pub struct RecordingTarget {
    events: Vec<TargetEvent>,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls received so far, oldest first.
    pub fn events(&self) -> &[TargetEvent] {
        &self.events
    }

    /// Drain the recorded calls.
    pub fn take_events(&mut self) -> Vec<TargetEvent> {
        std::mem::take(&mut self.events)
    }
}

impl UpdateTarget for RecordingTarget {
    fn reload_data(&mut self) -> UpdaterResult<()> {
        self.events.push(TargetEvent::ReloadData);
        Ok(())
    }

    fn perform_batch(&mut self, batch: &BatchUpdate) -> UpdaterResult<()> {
        self.events.push(TargetEvent::Batch(batch.clone()));
        Ok(())
    }
}

impl<T: UpdateTarget + ?Sized> UpdateTarget for &mut T {
    fn reload_data(&mut self) -> UpdaterResult<()> {
        (**self).reload_data()
    }

    fn perform_batch(&mut self, batch: &BatchUpdate) -> UpdaterResult<()> {
        (**self).perform_batch(batch)
    }
}
