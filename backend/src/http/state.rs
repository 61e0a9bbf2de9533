//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::AnalysisRepository;
use crate::services::DashboardEngine;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Store of uploaded analysis payloads
    pub repository: Arc<dyn AnalysisRepository>,
    /// Rendering engine built from the validated configuration
    pub engine: Arc<DashboardEngine>,
}

impl AppState {
    pub fn new(repository: Arc<dyn AnalysisRepository>, engine: Arc<DashboardEngine>) -> Self {
        Self { repository, engine }
    }
}
