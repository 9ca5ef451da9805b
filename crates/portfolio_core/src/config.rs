//! Runtime configuration for the project store and its helpers.
//!
//! # Responsibility
//! - Hold storage keys, export naming and pagination sizes in one place.
//! - Load optional JSON overrides from disk.
//!
//! # Invariants
//! - Every field has a default; an empty JSON object is a valid config.
//! - A loaded config has passed `validate()`.

use crate::model::project::DEFAULT_PROJECT_ICON;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Slot holding the serialized admin project list.
pub const DEFAULT_STORAGE_KEY: &str = "cybersecurity-projects-admin";
/// File name prefix for exports.
pub const DEFAULT_EXPORT_PREFIX: &str = "cybersecurity-projects";
/// Slot holding per-project view counters.
pub const DEFAULT_VIEWS_KEY: &str = "projectViews";
/// Slot holding per-project star ratings.
pub const DEFAULT_RATINGS_KEY: &str = "projectRatings";
pub const DEFAULT_INITIAL_VISIBLE: usize = 6;
pub const DEFAULT_LOAD_MORE_STEP: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PortfolioConfig {
    pub storage_key: String,
    pub export_prefix: String,
    pub default_icon: String,
    pub initial_visible: usize,
    pub load_more_step: usize,
    pub views_key: String,
    pub ratings_key: String,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            export_prefix: DEFAULT_EXPORT_PREFIX.to_string(),
            default_icon: DEFAULT_PROJECT_ICON.to_string(),
            initial_visible: DEFAULT_INITIAL_VISIBLE,
            load_more_step: DEFAULT_LOAD_MORE_STEP,
            views_key: DEFAULT_VIEWS_KEY.to_string(),
            ratings_key: DEFAULT_RATINGS_KEY.to_string(),
        }
    }
}

impl PortfolioConfig {
    /// Reads and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|err| ConfigError::Io(format!("{}: {err}", path.display())))?;
        Self::from_json(&content)
    }

    /// Parses and validates a JSON config document.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("storageKey", &self.storage_key),
            ("exportPrefix", &self.export_prefix),
            ("defaultIcon", &self.default_icon),
            ("viewsKey", &self.views_key),
            ("ratingsKey", &self.ratings_key),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{field} cannot be empty")));
            }
        }
        if self.storage_key == self.views_key || self.storage_key == self.ratings_key {
            return Err(ConfigError::Invalid(
                "storageKey must differ from viewsKey and ratingsKey".to_string(),
            ));
        }
        if self.load_more_step == 0 {
            return Err(ConfigError::Invalid(
                "loadMoreStep must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Io(String),
    Parse(String),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(message) => write!(f, "failed to read config: {message}"),
            Self::Parse(message) => write!(f, "invalid config json: {message}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {}
