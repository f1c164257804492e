//! Column names used by the join.
//!
//! The defaults describe the English export layout. A JSON file can replace any
//! subset of them, e.g. to run against exports with localized headers.

use crate::error::{JoinError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Every column name the loader, join and writer refer to.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ColumnSchema {
    /// Canonical BOX ID column; joins and the output use this spelling
    pub key_column: String,
    /// Alternate spelling accepted on input and copied into `key_column`
    pub key_column_alias: String,
    /// Category table source fields (primary, secondary, tertiary)
    pub category_fields: [String; 3],
    /// Technology table source fields (primary, secondary, tertiary)
    pub technology_fields: [String; 3],
    /// Output names for the category fields
    pub category_outputs: [String; 3],
    /// Output names for the technology fields
    pub technology_outputs: [String; 3],
    /// Detail columns written first, in this order
    pub detail_outputs: Vec<String>,
}

impl Default for ColumnSchema {
    fn default() -> Self {
        Self {
            key_column: "file BOX ID".to_string(),
            key_column_alias: "fileBOXID".to_string(),
            category_fields: [
                "primary domain".to_string(),
                "secondary domain".to_string(),
                "tertiary domain".to_string(),
            ],
            technology_fields: [
                "primary element".to_string(),
                "secondary element".to_string(),
                "tertiary element".to_string(),
            ],
            category_outputs: [
                "category-primary".to_string(),
                "category-secondary".to_string(),
                "category-tertiary".to_string(),
            ],
            technology_outputs: [
                "tech-primary".to_string(),
                "tech-secondary".to_string(),
                "tech-tertiary".to_string(),
            ],
            detail_outputs: [
                "No",
                "file BOX ID",
                "completeness",
                "creation date",
                "organization date",
                "related folder",
                "file name",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl ColumnSchema {
    /// Load a schema override. Fields missing from the JSON keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| JoinError::Schema(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_json_str(&content)
            .map_err(|e| JoinError::Schema(format!("{}: {}", path.display(), e)))
    }

    pub fn from_json_str(content: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Full output header: detail columns, then category, then technology fields.
    pub fn output_columns(&self) -> Vec<&str> {
        self.detail_outputs
            .iter()
            .chain(self.category_outputs.iter())
            .chain(self.technology_outputs.iter())
            .map(String::as_str)
            .collect()
    }
}
