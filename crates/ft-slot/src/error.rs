//! Error types for the round engine

use thiserror::Error;

use crate::symbols::Symbol;

/// Configuration rejected at load/construction time
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("symbol weights sum to {sum}, expected 1.0 (tolerance {tolerance})")]
    WeightSum { sum: f64, tolerance: f64 },

    #[error("symbol {symbol} has invalid weight {weight}")]
    InvalidWeight { symbol: Symbol, weight: f64 },

    #[error("symbol {symbol} has invalid payout {payout}")]
    InvalidPayout { symbol: Symbol, payout: f64 },

    #[error("symbol {0} is listed more than once")]
    DuplicateSymbol(Symbol),

    #[error("symbol {0} is missing from the table")]
    MissingSymbol(Symbol),

    #[error("invalid bet limits: {0}")]
    BetLimits(String),

    #[error("invalid bonus parameters: {0}")]
    Bonus(String),

    #[error("invalid value: {0}")]
    InvalidValue(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Crate-level error
#[derive(Error, Debug)]
pub enum SlotError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("entropy source unavailable: {0}")]
    Entropy(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type alias
pub type SlotResult<T> = Result<T, SlotError>;
