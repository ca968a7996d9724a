use thiserror::Error;

/// Errors raised at the configuration boundary.
///
/// Reward and policy decisions themselves never fail; only loading or
/// parsing tables and enum names can.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid reward range: min {min} exceeds max {max}")]
    InvalidRange { min: u32, max: u32 },
    #[error("invalid overdrive ratio {0} (must be finite and >= 1.0)")]
    InvalidOverdrive(f64),
    #[error("unknown content rating: {0}")]
    UnknownRating(String),
    #[error("unknown owner visibility: {0}")]
    UnknownVisibility(String),
    #[error("unknown duration class: {0}")]
    UnknownDurationClass(String),
    #[error("unknown achievement tier: {0}")]
    UnknownTier(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("entropy source unavailable: {0}")]
    Entropy(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;
