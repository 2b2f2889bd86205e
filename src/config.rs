//! File-based configuration.
//!
//! The only runtime configuration is the path-pattern set plus whether the sample row is also
//! inserted. It can be loaded from JSON; missing keys take their defaults:
//!
//! ```json
//! { "patterns": ["Orders.*", "Customers.Name"], "include_sample_row": false }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConversionResult;
use crate::schema::{PathFilter, ACCEPT_ALL};

/// Serializable conversion settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConversionConfig {
    /// Path patterns (`sheet`, `sheet.column`, `sheet.*`, `*.*`).
    pub patterns: Vec<String>,
    /// Also emit an INSERT for the type-sample row.
    pub include_sample_row: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            patterns: vec![ACCEPT_ALL.to_string()],
            include_sample_row: false,
        }
    }
}

impl ConversionConfig {
    /// Parse a JSON document.
    pub fn from_json_str(json: &str) -> ConversionResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON file.
    pub fn from_json_path(path: impl AsRef<Path>) -> ConversionResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Build the path filter described by `patterns`.
    pub fn path_filter(&self) -> PathFilter {
        PathFilter::new(&self.patterns)
    }
}
