//! Dashboard configuration: industry profiles and alias tables.
//!
//! Profiles are built in and may be replaced wholesale by a TOML file:
//!
//! ```toml
//! [industries.retail]
//! display_name = "Retail"
//! palette = ["#2563eb", "#16a34a"]
//!
//! [[industries.retail.fields]]
//! name = "quantityCol"
//! aliases = ["qty", "quantity", "units sold"]
//!
//! [[industries.retail.sections]]
//! key = "kpis"
//! role = "kpi-set"
//! title = "Sales KPIs"
//! ```

pub mod error;
pub mod industry;
pub mod presets;

pub use error::{ConfigError, ConfigResult};
pub use industry::{FieldAliases, IndustryProfile, SectionConfig};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::services::aliases::AliasResolver;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "DASHBOARD_CONFIG";

/// Complete dashboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub industries: BTreeMap<String, IndustryProfile>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

impl DashboardConfig {
    /// Configuration with the four built-in industries.
    pub fn builtin() -> Self {
        Self {
            industries: presets::builtin_profiles(),
        }
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str, origin: &str) -> ConfigResult<Self> {
        let mut config: DashboardConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        // Industry keys are matched case-insensitively.
        let mut industries = BTreeMap::new();
        for (key, profile) in config.industries {
            let normalized = key.trim().to_lowercase();
            if industries.contains_key(&normalized) {
                return Err(ConfigError::InvalidProfile {
                    industry: key,
                    message: format!("industry '{}' is declared more than once", normalized),
                });
            }
            industries.insert(normalized, profile);
        }
        config.industries = industries;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(DashboardConfig)` if read, parsed and validated
    /// * `Err(ConfigError)` otherwise
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `dashboard.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> ConfigResult<Self> {
        let search_paths = [
            PathBuf::from("dashboard.toml"),
            PathBuf::from("backend/dashboard.toml"),
            PathBuf::from("../dashboard.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(ConfigError::NotFound)
    }

    /// Resolve the configuration used at startup.
    ///
    /// `DASHBOARD_CONFIG` wins when set; otherwise the default locations are
    /// searched, falling back to the built-in profiles. A file that exists but
    /// is invalid is an error, never silently replaced by the built-ins.
    pub fn load() -> ConfigResult<Self> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.trim().is_empty() {
                log::info!("Loading dashboard config from {}", path);
                return Self::from_file(path.trim());
            }
        }

        match Self::from_default_location() {
            Ok(config) => Ok(config),
            Err(ConfigError::NotFound) => {
                log::info!("No dashboard.toml found, using built-in industry profiles");
                Ok(Self::builtin())
            }
            Err(e) => Err(e),
        }
    }

    /// Validate every profile, including building its alias table.
    pub fn validate(&self) -> ConfigResult<()> {
        for (industry, profile) in &self.industries {
            profile.validate(industry)?;
        }
        AliasResolver::from_config(self)?;
        Ok(())
    }

    /// Look up a profile; industry keys are case-insensitive.
    pub fn profile(&self, industry: &str) -> ConfigResult<&IndustryProfile> {
        self.industries
            .get(&industry.trim().to_lowercase())
            .ok_or_else(|| ConfigError::unknown_industry(industry))
    }

    pub fn industry_keys(&self) -> impl Iterator<Item = &str> {
        self.industries.keys().map(|k| k.as_str())
    }
}
