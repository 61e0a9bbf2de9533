use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Calendar date with day granularity, rendered `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalDate(NaiveDate);

impl CanonicalDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for CanonicalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for CanonicalDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

/// Temporal range applied to a time series before charting.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum WindowSpec {
    /// Last `days` records of the series
    FixedDays { days: usize },
    /// Whole series
    #[default]
    All,
    /// Records whose date falls inside the inclusive bounds
    Custom {
        #[serde(default)]
        start: Option<CanonicalDate>,
        #[serde(default)]
        end: Option<CanonicalDate>,
    },
}

impl WindowSpec {
    pub fn fixed_days(days: usize) -> Self {
        WindowSpec::FixedDays { days }
    }

    pub fn custom(start: Option<CanonicalDate>, end: Option<CanonicalDate>) -> Self {
        WindowSpec::Custom { start, end }
    }

    /// Build a spec from the UI's query form (`window`, `start`, `end`).
    ///
    /// `window` accepts a day count (`30`, `30d`), `all`, or `custom`. A
    /// missing `window` means `custom` when a bound is present, else `all`.
    pub fn from_parts(
        window: Option<&str>,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Self, WindowSpecError> {
        let start = parse_bound(start)?;
        let end = parse_bound(end)?;

        let window = window.map(str::trim).filter(|w| !w.is_empty());
        match window.map(|w| w.to_lowercase()) {
            None if start.is_some() || end.is_some() => Ok(WindowSpec::custom(start, end)),
            None => Ok(WindowSpec::All),
            Some(w) if w == "all" => Ok(WindowSpec::All),
            Some(w) if w == "custom" => Ok(WindowSpec::custom(start, end)),
            Some(w) => {
                let digits = w.strip_suffix('d').unwrap_or(&w);
                digits
                    .parse::<usize>()
                    .map(WindowSpec::fixed_days)
                    .map_err(|_| WindowSpecError::InvalidWindow(w.clone()))
            }
        }
    }
}

fn parse_bound(raw: Option<&str>) -> Result<Option<CanonicalDate>, WindowSpecError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => crate::services::temporal::parse_date_str(s)
            .map(Some)
            .ok_or_else(|| WindowSpecError::InvalidDate(s.to_string())),
    }
}

/// Malformed window request from the UI.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WindowSpecError {
    #[error("Invalid window '{0}': expected a day count, 'all' or 'custom'")]
    InvalidWindow(String),
    #[error("Invalid window bound '{0}': not a recognizable date")]
    InvalidDate(String),
}
