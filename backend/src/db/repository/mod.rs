//! Repository traits and error types.

pub mod analysis;
pub mod error;

pub use analysis::{AnalysisInfo, AnalysisRepository};
pub use error::{ErrorContext, RepositoryError, RepositoryResult};
