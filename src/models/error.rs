use thiserror::Error;

#[derive(Error, Debug)]
pub enum RiskScoreError {
    #[error("Invalid address format: {0}")]
    InvalidAddress(String),

    #[error("Explorer error for {address}: {message}")]
    ExplorerError { address: String, message: String },

    #[error("Rate limit exceeded for {service}")]
    RateLimitExceeded { service: String },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Input table is missing column: {0}")]
    MissingColumn(String),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl RiskScoreError {
    /// Transient failures worth another attempt against the explorer.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RiskScoreError::RateLimitExceeded { .. } | RiskScoreError::HttpError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, RiskScoreError>;
