//! Repository implementations module.
//!
//! - `local`: in-memory implementation for local development and tests

pub mod local;

pub use local::LocalRepository;
