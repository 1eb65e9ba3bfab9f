//! Processing options.
//!
//! Options can be built in code or, with the `serde` feature, loaded from TOML:
//!
//! ```toml
//! max_name_len = 48
//! extract = "fields"
//! default_locator = "Field"
//! ```

#[cfg(feature = "serde")]
use std::path::Path;

#[cfg(feature = "serde")]
use serde::Deserialize;
#[cfg(feature = "serde")]
use thiserror::Error;

use crate::format::{DEFAULT_MAX_NAME_LEN, FIELD_PREFIX};

/// Which buffers the materializer attaches to a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(rename_all = "lowercase"))]
pub enum ExtractMode {
    /// Per-field when the table declares fields, whole-table otherwise.
    #[default]
    Auto,
    /// One `(records, elements_per_row)` buffer.
    Whole,
    /// One `(records, width)` buffer per declared field; whole-table when there are none.
    Fields,
}

/// Options for [`crate::process_document`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(default, deny_unknown_fields))]
pub struct ProcessOptions {
    /// Maximum byte length of a disambiguated object or group name.
    pub max_name_len: usize,
    pub extract: ExtractMode,
    /// Locator used for tables with no field child declaring a type.
    pub default_locator: String,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            max_name_len: DEFAULT_MAX_NAME_LEN,
            extract: ExtractMode::Auto,
            default_locator: FIELD_PREFIX.to_string(),
        }
    }
}

/// Errors loading [`ProcessOptions`].
#[cfg(feature = "serde")]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid options: {0}")]
    Toml(#[from] toml::de::Error),
}

#[cfg(feature = "serde")]
impl ProcessOptions {
    /// Parse options from TOML. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load options from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
