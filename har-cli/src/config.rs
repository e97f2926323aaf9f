use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use har_data::{DatasetConfig, ValidationMode};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct RunConfig {
    #[serde(default)]
    pub dataset: DatasetSection,
}

#[derive(Debug, Default, Deserialize)]
pub struct DatasetSection {
    pub root: Option<PathBuf>,
    #[serde(default)]
    pub validation: ValidationMode,
}

/// Reads a TOML run configuration. A relative dataset root is resolved
/// against the directory holding the configuration file.
pub fn load_config(path: &Path) -> Result<RunConfig> {
    let content =
        fs::read_to_string(path).with_context(|| format!("read config at {}", path.display()))?;
    let mut config: RunConfig = toml::from_str(&content)
        .with_context(|| format!("parse TOML configuration {}", path.display()))?;
    if let (Some(root), Some(parent)) = (config.dataset.root.as_mut(), path.parent()) {
        if root.is_relative() {
            *root = parent.join(&*root);
        }
    }
    Ok(config)
}

impl RunConfig {
    /// Merges command-line overrides into the loader configuration.
    pub fn into_dataset_config(
        self,
        root_override: Option<PathBuf>,
        lenient: bool,
    ) -> Result<DatasetConfig> {
        let root = root_override
            .or(self.dataset.root)
            .context("no dataset root given; pass ROOT or set [dataset] root in the config")?;
        let validation = if lenient {
            ValidationMode::Lenient
        } else {
            self.dataset.validation
        };
        Ok(DatasetConfig { root, validation })
    }
}
