use thiserror::Error;

/// Validation and contract errors exposed by `pricebar-core`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },
    #[error("field '{field}' must be greater than zero")]
    NonPositiveValue { field: &'static str },

    #[error("invalid asset '{value}', expected one of crypto, metal")]
    InvalidAsset { value: String },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },

    #[error("duration '{field}' must be greater than zero")]
    ZeroDuration { field: &'static str },
    #[error("fast freshness threshold ({fast_ms} ms) must be below the normal one ({normal_ms} ms)")]
    FreshnessOrder { fast_ms: u64, normal_ms: u64 },
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
