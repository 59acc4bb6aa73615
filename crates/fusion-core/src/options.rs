//! Configuration options for a fusion run.

use serde::{Deserialize, Serialize};

pub const DEFAULT_SEPARATOR: &str = "_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FusionOptions {
    /// Joins the source prefix and the original field name.
    pub separator: String,
    /// Give later sources sharing a display name a prefix that includes the
    /// table identifier. When off, such sources fail with a duplicate-field
    /// error instead.
    pub disambiguate_duplicate_names: bool,
    /// Bring the output table into focus before clearing it.
    pub switch_to_output: bool,
}

impl Default for FusionOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            disambiguate_duplicate_names: true,
            switch_to_output: true,
        }
    }
}

impl FusionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_disambiguation(mut self, enable: bool) -> Self {
        self.disambiguate_duplicate_names = enable;
        self
    }

    pub fn with_switch_to_output(mut self, enable: bool) -> Self {
        self.switch_to_output = enable;
        self
    }
}
