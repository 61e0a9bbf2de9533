//! In-memory local repository implementation.
//!
//! Analyses live in a `BTreeMap` behind a `parking_lot::RwLock`. Payloads
//! are stored as `Arc`s, so readers clone a pointer and release the lock
//! before rendering.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use parking_lot::RwLock;

use crate::db::checksum::payload_checksum;
use crate::db::repository::{
    AnalysisInfo, AnalysisRepository, ErrorContext, RepositoryError, RepositoryResult,
};
use crate::models::AnalysisPayload;

/// In-memory analysis store for local development and tests.
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    analyses: BTreeMap<String, StoredAnalysis>,
    is_healthy: bool,
}

struct StoredAnalysis {
    payload: Arc<AnalysisPayload>,
    info: AnalysisInfo,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData {
                analyses: BTreeMap::new(),
                is_healthy: true,
            })),
        }
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    pub fn clear(&self) {
        self.data.write().analyses.clear();
    }

    pub fn analysis_count(&self) -> usize {
        self.data.read().analyses.len()
    }

    pub fn has_analysis(&self, file_id: &str) -> bool {
        self.data.read().analyses.contains_key(file_id.trim())
    }

    fn check_health(&self) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            return Err(RepositoryError::connection("Analysis store is not healthy"));
        }
        Ok(())
    }

    fn not_found(operation: &str, file_id: &str) -> RepositoryError {
        RepositoryError::not_found_with_context(
            format!("Analysis '{}' not found", file_id),
            ErrorContext::new(operation).with_entity_id(file_id),
        )
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalysisRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn store_analysis(
        &self,
        file_id: &str,
        payload: AnalysisPayload,
    ) -> RepositoryResult<AnalysisInfo> {
        self.check_health()?;

        let file_id = file_id.trim();
        if file_id.is_empty() {
            return Err(RepositoryError::validation_with_context(
                "File identifier must not be empty",
                ErrorContext::new("store_analysis"),
            ));
        }

        // Checksum outside the lock; large payloads take a while to encode.
        let checksum = payload_checksum(&payload)
            .map_err(|e| RepositoryError::from(e).with_operation("store_analysis"))?;

        let mut data = self.data.write();
        if let Some(existing) = data.analyses.get(file_id) {
            if existing.info.checksum == checksum {
                debug!("Analysis {} unchanged, keeping stored copy", file_id);
                return Ok(existing.info.clone());
            }
        }

        let info = AnalysisInfo {
            file_id: file_id.to_string(),
            checksum,
            stored_at: Utc::now(),
            insight_keys: payload.insights.keys().cloned().collect(),
            summary_fields: payload.summary.len(),
        };
        data.analyses.insert(
            file_id.to_string(),
            StoredAnalysis {
                payload: Arc::new(payload),
                info: info.clone(),
            },
        );
        debug!("Stored analysis {} ({})", file_id, info.checksum);
        Ok(info)
    }

    async fn fetch_analysis(&self, file_id: &str) -> RepositoryResult<Arc<AnalysisPayload>> {
        self.check_health()?;
        let file_id = file_id.trim();
        self.data
            .read()
            .analyses
            .get(file_id)
            .map(|stored| Arc::clone(&stored.payload))
            .ok_or_else(|| Self::not_found("fetch_analysis", file_id))
    }

    async fn get_analysis_info(&self, file_id: &str) -> RepositoryResult<AnalysisInfo> {
        self.check_health()?;
        let file_id = file_id.trim();
        self.data
            .read()
            .analyses
            .get(file_id)
            .map(|stored| stored.info.clone())
            .ok_or_else(|| Self::not_found("get_analysis_info", file_id))
    }

    async fn list_analyses(&self) -> RepositoryResult<Vec<AnalysisInfo>> {
        self.check_health()?;
        Ok(self
            .data
            .read()
            .analyses
            .values()
            .map(|stored| stored.info.clone())
            .collect())
    }

    async fn delete_analysis(&self, file_id: &str) -> RepositoryResult<()> {
        self.check_health()?;
        let file_id = file_id.trim();
        match self.data.write().analyses.remove(file_id) {
            Some(_) => Ok(()),
            None => Err(Self::not_found("delete_analysis", file_id)),
        }
    }
}
