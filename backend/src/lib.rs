//! # Insight Dashboard Backend
//!
//! Presentation core for industry analytics dashboards.
//!
//! An external analytics service turns an uploaded spreadsheet into a JSON
//! analysis payload (per-column statistics plus KPIs, totals, trends, top and
//! bottom performers, hypotheses). This crate decides how each part of that
//! payload is shown, for retail, finance, healthcare and manufacturing, with
//! one generic engine driven by per-industry configuration.
//!
//! ## Features
//!
//! - **Alias Resolution**: map free-form column headers to canonical fields
//! - **Shape Classification**: categorize untyped JSON values by structure
//! - **Visualization Dispatch**: pick a rendering strategy per role and shape
//! - **Time Windows**: normalize mixed date encodings and slice series
//! - **HTTP API**: RESTful endpoints for the dashboard UI
//!
//! ## Architecture
//!
//! - [`config`]: Industry profiles, alias tables and TOML loading
//! - [`models`]: Payload, window and role types
//! - [`services`]: Classification, dispatch, windowing and the dashboard engine
//! - [`db`]: Analysis storage behind the repository pattern
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod config;
pub mod db;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
