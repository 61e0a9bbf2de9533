//! Data Transfer Objects for the HTTP API.
//!
//! Response views (`DashboardView`, `HeaderMapping`, `AnalysisInfo`) are
//! already serializable and are returned as-is; this module only holds the
//! request bodies, query strings and small envelopes.

use serde::{Deserialize, Serialize};

use crate::config::IndustryProfile;
use crate::db::AnalysisInfo;
use crate::models::{AnalysisPayload, WindowSpec, WindowSpecError};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Analysis store status
    pub storage: String,
}

/// One configured industry dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndustryDto {
    pub key: String,
    pub display_name: String,
    /// Canonical column fields, in declaration order
    pub canonical_fields: Vec<String>,
    pub palette: Vec<String>,
    /// Insights keys the dashboard reads
    pub sections: Vec<String>,
}

impl IndustryDto {
    pub fn from_profile(key: &str, profile: &IndustryProfile) -> Self {
        Self {
            key: key.to_string(),
            display_name: profile.display_name.clone(),
            canonical_fields: profile
                .canonical_fields()
                .into_iter()
                .map(str::to_string)
                .collect(),
            palette: profile.palette.clone(),
            sections: profile.sections.iter().map(|s| s.key.clone()).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndustryListResponse {
    pub industries: Vec<IndustryDto>,
    pub total: usize,
}

/// Request body for resolving an uploaded header row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveHeadersRequest {
    pub headers: Vec<String>,
}

/// The UI's window controls: `window=7|30|90|all|custom` plus optional bounds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WindowParams {
    #[serde(default)]
    pub window: Option<String>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

impl WindowParams {
    pub fn to_spec(&self) -> Result<WindowSpec, WindowSpecError> {
        WindowSpec::from_parts(
            self.window.as_deref(),
            self.start.as_deref(),
            self.end.as_deref(),
        )
    }
}

/// Request body for a stateless render of an inline payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderRequest {
    pub payload: AnalysisPayload,
    #[serde(flatten)]
    pub window: WindowParams,
    /// The "show summary" toggle
    #[serde(default)]
    pub include_summary: bool,
}

/// Query parameters for rendering a stored analysis.
///
/// Kept flat: query strings carry every value as text, which `flatten`
/// cannot coerce back into non-string fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardQuery {
    pub industry: String,
    #[serde(default)]
    pub window: Option<String>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    /// The "show summary" toggle
    #[serde(default)]
    pub summary: bool,
}

impl DashboardQuery {
    pub fn window_spec(&self) -> Result<WindowSpec, WindowSpecError> {
        WindowSpec::from_parts(
            self.window.as_deref(),
            self.start.as_deref(),
            self.end.as_deref(),
        )
    }
}

/// Analysis list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisListResponse {
    pub analyses: Vec<AnalysisInfo>,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_request_flattens_window() {
        let request: RenderRequest = serde_json::from_value(json!({
            "payload": {"insights": {}},
            "window": "30",
            "include_summary": true
        }))
        .unwrap();
        assert_eq!(request.window.to_spec().unwrap(), WindowSpec::fixed_days(30));
        assert!(request.include_summary);
    }

    #[test]
    fn test_render_request_defaults() {
        let request: RenderRequest =
            serde_json::from_value(json!({"payload": {}})).unwrap();
        assert_eq!(request.window.to_spec().unwrap(), WindowSpec::All);
        assert!(!request.include_summary);
    }
}
