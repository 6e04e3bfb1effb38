//! Error types for the multisig client.

use thiserror::Error;

/// Main error type for client operations
#[derive(Error, Debug)]
pub enum ClientError {
    /// Error reported by the Soroban RPC server
    #[error("Soroban RPC error: {0}")]
    SorobanRpcError(String),

    /// Network communication error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Simulation rejected the operation before submission
    #[error("Simulation failed: {0}")]
    SimulationFailed(String),

    /// Transaction submission failed
    #[error("Transaction submission failed: {0}")]
    TransactionSubmissionError(String),

    /// Transaction not found
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    /// Transaction timeout
    #[error("Transaction timeout after {0} seconds")]
    TransactionTimeout(u64),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {0} seconds")]
    RateLimitExceeded(u64),

    /// Max retries exceeded
    #[error("Max retries ({0}) exceeded")]
    MaxRetriesExceeded(usize),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// An XDR value could not be decoded as the expected type
    #[error("ScVal decode error: {0}")]
    ScValDecodeError(String),

    /// A contract event did not have the expected shape
    #[error("Malformed event {id}: {reason}")]
    MalformedEvent {
        /// RPC event id
        id: String,
        /// What was wrong with it
        reason: String,
    },

    /// Base64 decode error
    #[error("Base64 decode error: {0}")]
    Base64DecodeError(#[from] base64::DecodeError),

    /// URL parse error
    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Error context for retryable operations
#[derive(Debug, Clone)]
pub struct RetryContext {
    /// Number of attempts made
    pub attempts: usize,
    /// Last error encountered
    pub last_error: String,
    /// Total time spent retrying (in milliseconds)
    pub total_time_ms: u64,
}

impl RetryContext {
    /// Create a new retry context
    pub fn new() -> Self {
        Self {
            attempts: 0,
            last_error: String::new(),
            total_time_ms: 0,
        }
    }

    /// Record an attempt
    pub fn record_attempt(&mut self, error: &str, duration_ms: u64) {
        self.attempts += 1;
        self.last_error = error.to_string();
        self.total_time_ms += duration_ms;
    }
}

impl Default for RetryContext {
    fn default() -> Self {
        Self::new()
    }
}
