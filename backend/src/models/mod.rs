pub mod payload;
pub mod role;
pub mod window;

pub use payload::*;
pub use role::SemanticRole;
pub use window::{CanonicalDate, WindowSpec, WindowSpecError};
