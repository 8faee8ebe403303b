//! Validator configuration.
//!
//! Every setting has a default; a file only needs the keys it changes, and
//! running without a file uses [`ValidatorConfig::default`].
//!
//! # Example YAML
//!
//! ```yaml
//! metadata_file: rayforge-package.yaml
//! placeholder_markers:
//!   - your-github-username
//!   - you@example.com
//! mode: collect-all
//! ```

use std::io::BufReader;
use std::path::Path;

use rayforge_package_core::{DEFAULT_PLACEHOLDER_MARKERS, METADATA_FILENAME};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// How many failures a run reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationMode {
    /// Stop at the first failing check.
    #[default]
    FailFast,
    /// Run every independent check and report all failures.
    CollectAll,
}

/// Settings for a validation run.
///
/// # Examples
///
/// ```
/// # use rayforge_package_validate::{ValidationMode, ValidatorConfig};
/// let config: ValidatorConfig = serde_yaml::from_str("mode: collect-all").unwrap();
/// assert_eq!(config.mode, ValidationMode::CollectAll);
/// assert_eq!(config.metadata_file, "rayforge-package.yaml");
/// assert_eq!(config.placeholder_markers, vec!["your-github-username"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Metadata file name, relative to the package root.
    pub metadata_file: String,
    /// Substrings that mark `author.name` as unedited template text.
    pub placeholder_markers: Vec<String>,
    /// Failure reporting mode.
    pub mode: ValidationMode,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            metadata_file: METADATA_FILENAME.to_string(),
            placeholder_markers: DEFAULT_PLACEHOLDER_MARKERS
                .iter()
                .map(|marker| marker.to_string())
                .collect(),
            mode: ValidationMode::default(),
        }
    }
}

impl ValidatorConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](ConfigError::IoError) if the file cannot be read,
    /// [`YamlError`](ConfigError::YamlError) if parsing fails, or
    /// [`InvalidConfig`](ConfigError::InvalidConfig) if a setting is unusable.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config: Self = serde_yaml::from_reader(reader)?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        let file = Path::new(&self.metadata_file);
        if self.metadata_file.trim().is_empty() || file.is_absolute() {
            return Err(ConfigError::InvalidConfig(format!(
                "metadata_file must be a relative file name, got '{}'",
                self.metadata_file
            )));
        }
        if self.placeholder_markers.iter().any(|m| m.is_empty()) {
            return Err(ConfigError::InvalidConfig(
                "placeholder_markers must not contain empty strings".to_string(),
            ));
        }
        Ok(())
    }
}
