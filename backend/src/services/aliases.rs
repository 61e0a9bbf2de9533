//! Column header → canonical field resolution.
//!
//! Matching is exact after normalization. There is no fuzzy matching, so a
//! mapping decision can always be traced back to one declared alias.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::config::{ConfigError, ConfigResult, DashboardConfig, IndustryProfile};

/// Normalize a header for alias comparison.
///
/// Lower-cases, trims, and collapses every run of whitespace, underscores or
/// other punctuation into a single space: `" Unit_Cost "` → `"unit cost"`.
pub fn normalize(header: &str) -> String {
    let mut out = String::with_capacity(header.len());
    let mut pending_separator = false;

    for ch in header.chars() {
        if ch.is_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push(' ');
            }
            pending_separator = false;
            out.extend(ch.to_lowercase());
        } else {
            pending_separator = true;
        }
    }

    out
}

/// Outcome of resolving one header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Resolution {
    Resolved { field: String },
    Unresolved,
}

impl Resolution {
    pub fn field(&self) -> Option<&str> {
        match self {
            Resolution::Resolved { field } => Some(field),
            Resolution::Unresolved => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved { .. })
    }
}

/// Normalized alias index for one industry.
#[derive(Debug, Clone, Default)]
struct AliasTable {
    /// Canonical fields in declaration order
    fields: Vec<String>,
    /// normalized alias → index into `fields`
    index: HashMap<String, usize>,
}

impl AliasTable {
    fn build(industry: &str, profile: &IndustryProfile) -> ConfigResult<Self> {
        let mut table = AliasTable::default();

        for (position, field) in profile.fields.iter().enumerate() {
            table.fields.push(field.name.clone());

            for alias in &field.aliases {
                let normalized = normalize(alias);
                if normalized.is_empty() {
                    return Err(ConfigError::EmptyAlias {
                        industry: industry.to_string(),
                        field: field.name.clone(),
                    });
                }

                match table.index.get(&normalized) {
                    Some(&existing) if existing != position => {
                        return Err(ConfigError::DuplicateAlias {
                            industry: industry.to_string(),
                            alias: normalized,
                            first: table.fields[existing].clone(),
                            second: field.name.clone(),
                        });
                    }
                    Some(_) => {}
                    None => {
                        table.index.insert(normalized, position);
                    }
                }
            }
        }

        Ok(table)
    }

    fn lookup(&self, header: &str) -> Resolution {
        match self.index.get(&normalize(header)) {
            Some(&i) => Resolution::Resolved {
                field: self.fields[i].clone(),
            },
            None => Resolution::Unresolved,
        }
    }
}

/// A header matched to its canonical field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappedHeader {
    pub header: String,
    pub field: String,
}

/// Resolution of a whole header row, as shown on the upload guidance page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderMapping {
    pub industry: String,
    /// First header per canonical field, in input order
    pub mapped: Vec<MappedHeader>,
    /// Headers that resolved to a field already taken by an earlier header
    pub duplicates: Vec<MappedHeader>,
    pub unresolved: Vec<String>,
    /// Canonical fields no header covered, in declaration order
    pub missing: Vec<String>,
}

/// Resolves headers against the alias tables of every configured industry.
#[derive(Debug, Clone, Default)]
pub struct AliasResolver {
    tables: HashMap<String, AliasTable>,
}

impl AliasResolver {
    /// Build alias tables for every industry, failing on ambiguous or empty aliases.
    pub fn from_config(config: &DashboardConfig) -> ConfigResult<Self> {
        let mut tables = HashMap::new();
        for (industry, profile) in &config.industries {
            let table = AliasTable::build(industry, profile)?;
            tables.insert(industry.trim().to_lowercase(), table);
        }
        Ok(Self { tables })
    }

    fn table(&self, industry: &str) -> ConfigResult<&AliasTable> {
        self.tables
            .get(&industry.trim().to_lowercase())
            .ok_or_else(|| ConfigError::unknown_industry(industry))
    }

    /// Resolve one header for `industry`.
    ///
    /// # Errors
    /// `ConfigError::UnknownIndustry` when no alias table exists for `industry`.
    /// An unmatched header is `Ok(Resolution::Unresolved)`.
    pub fn resolve(&self, industry: &str, header: &str) -> ConfigResult<Resolution> {
        Ok(self.table(industry)?.lookup(header))
    }

    /// Canonical fields of `industry` in declaration order.
    pub fn canonical_fields(&self, industry: &str) -> ConfigResult<&[String]> {
        Ok(&self.table(industry)?.fields)
    }

    /// Resolve an uploaded header row in one pass.
    pub fn map_headers<S: AsRef<str>>(
        &self,
        industry: &str,
        headers: &[S],
    ) -> ConfigResult<HeaderMapping> {
        let table = self.table(industry)?;

        let mut mapped = Vec::new();
        let mut duplicates = Vec::new();
        let mut unresolved = Vec::new();
        let mut covered = HashSet::new();

        for header in headers {
            let header = header.as_ref();
            match table.lookup(header) {
                Resolution::Resolved { field } => {
                    let entry = MappedHeader {
                        header: header.to_string(),
                        field: field.clone(),
                    };
                    if covered.insert(field) {
                        mapped.push(entry);
                    } else {
                        duplicates.push(entry);
                    }
                }
                Resolution::Unresolved => unresolved.push(header.to_string()),
            }
        }

        let missing = table
            .fields
            .iter()
            .filter(|f| !covered.contains(*f))
            .cloned()
            .collect();

        log::debug!(
            "Mapped {} of {} headers for industry={} ({} unresolved)",
            mapped.len(),
            headers.len(),
            industry,
            unresolved.len()
        );

        Ok(HeaderMapping {
            industry: industry.trim().to_lowercase(),
            mapped,
            duplicates,
            unresolved,
            missing,
        })
    }
}
