//! Configuration schema and JSON5 loading for the recap pipeline.

mod error;
mod loader;
mod model;

/// Public error type returned by config loading and validation APIs.
pub use error::ConfigError;
/// Configuration schema models.
pub use model::*;
