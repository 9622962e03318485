//! Configuration error types.

/// Errors raised when a world or physics configuration cannot be used.
///
/// Everything past construction is infallible: grid reads degrade to solid
/// stone and collision resolution always produces an answer.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// World dimensions must both be positive.
    #[error("invalid world dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    /// Tile size must be a positive, finite pixel length.
    #[error("invalid tile size {0}")]
    InvalidTileSize(f32),

    /// A physics tuning value is out of range.
    #[error("invalid physics tuning: {field} = {value}")]
    InvalidTuning { field: &'static str, value: f32 },

    /// Noise field parameters are out of range.
    #[error("invalid noise parameters: {0}")]
    InvalidNoise(String),

    /// Failed to read a config file from disk.
    #[error("failed to read config: {0}")]
    Read(#[source] std::io::Error),

    /// Failed to parse JSON config content.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
