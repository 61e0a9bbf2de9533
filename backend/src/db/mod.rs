//! Storage for analysis payloads.
//!
//! Storage sits behind the [`AnalysisRepository`] trait so the HTTP layer
//! does not depend on a particular backend.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                             │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Trait (repository/) - Abstract Interface    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────▼──────────────────────────────┐
//!     │             Local Repository                  │
//!     │               (in-memory)                     │
//!     └──────────────────────────────────────────────┘
//! ```

pub mod checksum;
pub mod repositories;
pub mod repository;

pub use checksum::{calculate_checksum, payload_checksum};
pub use repositories::LocalRepository;
pub use repository::{
    AnalysisInfo, AnalysisRepository, ErrorContext, RepositoryError, RepositoryResult,
};
