//! Batch update driver for relist.
//!
//! Holds the data a list surface displays, diffs every new snapshot against
//! it, and hands the surface either one ordered batch of edits or a request
//! to reload everything. No UI toolkit is involved: surfaces plug in through
//! the [`UpdateTarget`] trait.

pub mod batch;
pub mod config;
pub mod error;
pub mod target;
pub mod updater;

pub use batch::{BatchStep, BatchUpdate};
pub use config::UpdaterConfig;
pub use error::{UpdaterError, UpdaterResult};
pub use target::{RecordingTarget, TargetEvent, UpdateTarget};
pub use updater::{ListUpdater, UpdateOutcome};
