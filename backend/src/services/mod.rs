//! Service layer: the presentation core of the dashboard.
//!
//! Services turn an untyped analysis payload into render-ready sections.
//! They are synchronous, hold no mutable state, and are shared freely
//! between request handlers.

pub mod aliases;
pub mod dashboard;
pub mod dispatch;
pub mod format;
pub mod render;
pub mod shape;
pub mod summary;
pub mod temporal;

pub use aliases::{normalize, AliasResolver, HeaderMapping, MappedHeader, Resolution};
pub use dashboard::{DashboardEngine, DashboardView, RenderOptions, SectionView};
pub use dispatch::{dispatch, Strategy, VisualizationDecision};
pub use render::{materialize, SectionData};
pub use shape::{classify, Shape, ShapeTag};
pub use summary::{summarize, SummaryCard};
pub use temporal::{apply_window, filter_window, normalize_date, parse_date_str, Windowed};
