//! Repository trait for analysis payload storage.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::RepositoryResult;
use crate::models::AnalysisPayload;

/// Lightweight listing entry for a stored analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisInfo {
    pub file_id: String,
    /// SHA-256 of the payload's JSON encoding
    pub checksum: String,
    pub stored_at: DateTime<Utc>,
    /// Insights keys present in the payload, in payload order
    pub insight_keys: Vec<String>,
    pub summary_fields: usize,
}

/// Repository trait for analysis payloads keyed by file identifier.
///
/// File identifiers are trimmed by every operation, so `" q1"` and `"q1"`
/// name the same analysis.
///
/// Payloads are handed out as `Arc`s so a render never holds a lock.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait AnalysisRepository: Send + Sync {
    /// Check that the backing store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Store `payload` under `file_id`, replacing any previous payload.
    ///
    /// Storing a payload identical to the current one is a no-op and keeps
    /// the original `stored_at`.
    async fn store_analysis(
        &self,
        file_id: &str,
        payload: AnalysisPayload,
    ) -> RepositoryResult<AnalysisInfo>;

    /// # Errors
    /// `RepositoryError::NotFound` when nothing is stored under `file_id`.
    async fn fetch_analysis(&self, file_id: &str) -> RepositoryResult<Arc<AnalysisPayload>>;

    async fn get_analysis_info(&self, file_id: &str) -> RepositoryResult<AnalysisInfo>;

    /// All stored analyses, ordered by file identifier.
    async fn list_analyses(&self) -> RepositoryResult<Vec<AnalysisInfo>>;

    /// # Errors
    /// `RepositoryError::NotFound` when nothing is stored under `file_id`.
    async fn delete_analysis(&self, file_id: &str) -> RepositoryResult<()>;
}
