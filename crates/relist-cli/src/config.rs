use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Output rendering for diff results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Settings read from an optional TOML file. Command-line flags win.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Member holding an object's identity.
    pub id_key: String,
    /// Member holding a section's rows.
    pub items_key: String,
    pub format: OutputFormat,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            id_key: "id".into(),
            items_key: "items".into(),
            format: OutputFormat::Text,
        }
    }
}

impl CliConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Defaults, then the config file if given.
    pub fn resolve(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn with_overrides(
        mut self,
        id_key: Option<String>,
        items_key: Option<String>,
        format: Option<OutputFormat>,
    ) -> Self {
        if let Some(id_key) = id_key {
            self.id_key = id_key;
        }
        if let Some(items_key) = items_key {
            self.items_key = items_key;
        }
        if let Some(format) = format {
            self.format = format;
        }
        self
    }
}
