//! Per-industry dashboard profiles.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::error::{ConfigError, ConfigResult};
use crate::models::SemanticRole;

/// Canonical field with the header aliases that map onto it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldAliases {
    /// Canonical field name (e.g. `costCol`)
    pub name: String,
    /// Accepted header spellings; compared after normalization
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl FieldAliases {
    pub fn new(name: &str, aliases: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// One dashboard section: which insights key to read and how to present it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionConfig {
    /// Key under `insights`
    pub key: String,
    /// Display title; defaults to the key title-cased
    #[serde(default)]
    pub title: Option<String>,
    pub role: SemanticRole,
    /// Render each child of an object value as its own section
    #[serde(default)]
    pub expand: bool,
    /// Apply the request's window spec to array values
    #[serde(default)]
    pub windowed: bool,
    /// Preferred value key when a record exposes more than one candidate
    #[serde(default)]
    pub value_key: Option<String>,
}

impl SectionConfig {
    pub fn new(key: &str, role: SemanticRole) -> Self {
        Self {
            key: key.to_string(),
            title: None,
            role,
            expand: false,
            windowed: false,
            value_key: None,
        }
    }

    pub fn titled(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn expanded(mut self) -> Self {
        self.expand = true;
        self
    }

    pub fn windowed(mut self) -> Self {
        self.windowed = true;
        self
    }

    pub fn with_value_key(mut self, key: &str) -> Self {
        self.value_key = Some(key.to_string());
        self
    }
}

/// Everything that differs between the industry dashboards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryProfile {
    pub display_name: String,
    /// Chart colors, applied in order
    #[serde(default)]
    pub palette: Vec<String>,
    #[serde(default)]
    pub fields: Vec<FieldAliases>,
    #[serde(default)]
    pub sections: Vec<SectionConfig>,
}

impl IndustryProfile {
    /// Canonical field names in declaration order.
    pub fn canonical_fields(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn section(&self, key: &str) -> Option<&SectionConfig> {
        self.sections.iter().find(|s| s.key == key)
    }

    /// Structural checks that do not involve alias normalization.
    pub(crate) fn validate(&self, industry: &str) -> ConfigResult<()> {
        if self.palette.is_empty() {
            return Err(ConfigError::InvalidProfile {
                industry: industry.to_string(),
                message: "palette must contain at least one color".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for section in &self.sections {
            if !seen.insert(section.key.as_str()) {
                return Err(ConfigError::DuplicateSection {
                    industry: industry.to_string(),
                    section: section.key.clone(),
                });
            }
        }

        let mut field_names = HashSet::new();
        for field in &self.fields {
            if !field_names.insert(field.name.as_str()) {
                return Err(ConfigError::InvalidProfile {
                    industry: industry.to_string(),
                    message: format!("canonical field '{}' declared twice", field.name),
                });
            }
        }

        Ok(())
    }
}
