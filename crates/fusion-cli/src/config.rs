//! Optional TOML configuration file.
//!
//! ```toml
//! [fusion]
//! separator = "_"
//! disambiguate_duplicate_names = true
//! switch_to_output = true
//!
//! [ui]
//! language = "zh"
//! product = "feishu"
//! ```
//!
//! Every key is optional. Command-line flags override file values.

use std::path::{Path, PathBuf};

use fusion_core::FusionOptions;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::text::Language;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub fusion: FusionOptions,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiConfig {
    /// Host language tag, e.g. `en`, `zh-TW`.
    pub language: Option<String>,
    /// Host product, consulted when the language tag is unsupported.
    pub product: Option<String>,
}

impl UiConfig {
    /// Resolves the message language, preferring `override_tag` over the file.
    pub fn language(&self, override_tag: Option<&str>) -> Language {
        let tag = override_tag.or(self.language.as_deref()).unwrap_or_default();
        Language::resolve(tag, self.product.as_deref())
    }
}

impl CliConfig {
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&content, path)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}
