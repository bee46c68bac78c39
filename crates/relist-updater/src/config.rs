use serde::{Deserialize, Serialize};

/// Configuration for a [`ListUpdater`](crate::ListUpdater).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdaterConfig {
    /// Whether updates are applied as animated batches by default.
    /// When `false`, every update is a full reload.
    pub animated: bool,
    /// Fall back to a full reload when a diff has more structural edits
    /// than this. `None` never falls back.
    pub max_animated_changes: Option<usize>,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            animated: true,
            max_animated_changes: None,
        }
    }
}

impl UpdaterConfig {
    /// A configuration that always reloads.
    pub fn static_reload() -> Self {
        Self {
            animated: false,
            ..Default::default()
        }
    }

    /// Whether `changes` structural edits should be animated.
    pub fn allows(&self, changes: usize) -> bool {
        self.max_animated_changes.map_or(true, |max| changes <= max)
    }
}
