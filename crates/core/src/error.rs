//! Error taxonomy for map generation.
//!
//! Only configuration problems reach callers as values. Degenerate regions are
//! resolved inside the generator, and grid indexing defects panic.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("map width {value} is outside {min}..={max}")]
    Width { value: usize, min: usize, max: usize },
    #[error("map height {value} is outside {min}..={max}")]
    Height { value: usize, min: usize, max: usize },
    #[error("split iterations {value} is outside {min}..={max}")]
    SplitIterations { value: u32, min: u32, max: u32 },
    #[error("level must be at least 1, got {0}")]
    Level(u32),
    #[error("invalid generator setting `{name}`: {reason}")]
    Setting { name: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell ({x}, {y}) is outside a {width}x{height} grid")]
    IndexOutOfRange { x: i64, y: i64, width: usize, height: usize },
}
