//! Error types for dashboard configuration.
//!
//! Configuration errors are programmer/deployment errors: a missing alias
//! table, an ambiguous alias, an unreadable config file. They are surfaced
//! eagerly at load time and are the only errors the presentation core lets
//! escape.

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Error type for configuration loading, validation and lookup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No profile is registered under this industry key.
    #[error("Unknown industry: '{industry}'")]
    UnknownIndustry { industry: String },

    /// The same normalized alias is declared for two canonical fields.
    #[error(
        "Ambiguous alias '{alias}' in industry '{industry}': declared for both '{first}' and '{second}'"
    )]
    DuplicateAlias {
        industry: String,
        alias: String,
        first: String,
        second: String,
    },

    /// An alias normalizes to the empty string.
    #[error("Empty alias for field '{field}' in industry '{industry}'")]
    EmptyAlias { industry: String, field: String },

    /// Two sections of one profile read the same insights key.
    #[error("Duplicate section '{section}' in industry '{industry}'")]
    DuplicateSection { industry: String, section: String },

    /// Profile is structurally unusable (e.g. no palette colors).
    #[error("Invalid profile for industry '{industry}': {message}")]
    InvalidProfile { industry: String, message: String },

    /// Config file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config file could not be parsed.
    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: String, message: String },

    /// No config file in any of the searched locations.
    #[error("No dashboard.toml found in standard locations")]
    NotFound,
}

impl ConfigError {
    pub fn unknown_industry(industry: impl Into<String>) -> Self {
        ConfigError::UnknownIndustry {
            industry: industry.into(),
        }
    }

    /// Whether this error names a missing industry rather than a broken table.
    pub fn is_unknown_industry(&self) -> bool {
        matches!(self, ConfigError::UnknownIndustry { .. })
    }
}
