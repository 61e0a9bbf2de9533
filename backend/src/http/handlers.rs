//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! dashboard engine or the analysis repository.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::dto::{
    AnalysisListResponse, DashboardQuery, HealthResponse, IndustryDto, IndustryListResponse,
    RenderRequest, ResolveHeadersRequest,
};
use super::error::AppError;
use super::state::AppState;
use crate::db::AnalysisInfo;
use crate::models::{AnalysisPayload, WindowSpec};
use crate::services::{DashboardEngine, DashboardView, HeaderMapping, RenderOptions};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let storage = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        storage,
    }))
}

// =============================================================================
// Industries
// =============================================================================

/// GET /v1/industries
pub async fn list_industries(State(state): State<AppState>) -> HandlerResult<IndustryListResponse> {
    let industries: Vec<IndustryDto> = state
        .engine
        .config()
        .industries
        .iter()
        .map(|(key, profile)| IndustryDto::from_profile(key, profile))
        .collect();
    let total = industries.len();

    Ok(Json(IndustryListResponse { industries, total }))
}

/// POST /v1/industries/{industry}/headers
///
/// Resolve an uploaded file's header row against the industry's aliases.
pub async fn resolve_headers(
    State(state): State<AppState>,
    Path(industry): Path<String>,
    Json(request): Json<ResolveHeadersRequest>,
) -> HandlerResult<HeaderMapping> {
    let mapping = state
        .engine
        .resolver()
        .map_headers(&industry, &request.headers)?;
    Ok(Json(mapping))
}

/// POST /v1/industries/{industry}/dashboard
///
/// Render an inline payload without storing it.
pub async fn render_dashboard(
    State(state): State<AppState>,
    Path(industry): Path<String>,
    Json(request): Json<RenderRequest>,
) -> HandlerResult<DashboardView> {
    let window = request.window.to_spec()?;
    let options = RenderOptions {
        include_summary: request.include_summary,
    };
    let view = render_blocking(
        Arc::clone(&state.engine),
        industry,
        Arc::new(request.payload),
        window,
        options,
    )
    .await?;
    Ok(Json(view))
}

// =============================================================================
// Analyses
// =============================================================================

/// GET /v1/analyses
pub async fn list_analyses(State(state): State<AppState>) -> HandlerResult<AnalysisListResponse> {
    let analyses = state.repository.list_analyses().await?;
    let total = analyses.len();
    Ok(Json(AnalysisListResponse { analyses, total }))
}

/// POST /v1/analyses
///
/// Store a payload under a generated file id.
pub async fn create_analysis(
    State(state): State<AppState>,
    Json(payload): Json<AnalysisPayload>,
) -> Result<(StatusCode, Json<AnalysisInfo>), AppError> {
    let file_id = Uuid::new_v4().to_string();
    let info = state.repository.store_analysis(&file_id, payload).await?;
    Ok((StatusCode::CREATED, Json(info)))
}

/// PUT /v1/analyses/{file_id}
pub async fn store_analysis(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
    Json(payload): Json<AnalysisPayload>,
) -> HandlerResult<AnalysisInfo> {
    let info = state.repository.store_analysis(&file_id, payload).await?;
    Ok(Json(info))
}

/// GET /v1/analyses/{file_id}
pub async fn get_analysis(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
) -> HandlerResult<AnalysisPayload> {
    let payload = state.repository.fetch_analysis(&file_id).await?;
    Ok(Json(payload.as_ref().clone()))
}

/// DELETE /v1/analyses/{file_id}
pub async fn delete_analysis(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.repository.delete_analysis(&file_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /v1/analyses/{file_id}/dashboard?industry=..&window=..&start=..&end=..&summary=..
pub async fn get_analysis_dashboard(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
    Query(query): Query<DashboardQuery>,
) -> HandlerResult<DashboardView> {
    let window = query.window_spec()?;
    let payload = state.repository.fetch_analysis(&file_id).await?;
    let options = RenderOptions {
        include_summary: query.summary,
    };
    let view = render_blocking(
        Arc::clone(&state.engine),
        query.industry,
        payload,
        window,
        options,
    )
    .await?;
    Ok(Json(view))
}

/// Rendering walks every section of a possibly large payload; keep it off
/// the async workers.
async fn render_blocking(
    engine: Arc<DashboardEngine>,
    industry: String,
    payload: Arc<AnalysisPayload>,
    window: WindowSpec,
    options: RenderOptions,
) -> Result<DashboardView, AppError> {
    let view = tokio::task::spawn_blocking(move || {
        engine.render(&industry, &payload, &window, options)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;
    Ok(view)
}
