//! Retry logic for RPC operations.
//!
//! Transient failures (network errors, rate limiting, 5xx responses, a
//! transaction the node has not seen yet) are retried with exponential
//! backoff; everything else is returned to the caller immediately.

use crate::config::ClientConfig;
use crate::error::{ClientError, Result, RetryContext};
use backoff::{backoff::Backoff, ExponentialBackoff, ExponentialBackoffBuilder};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Retry strategy configuration
#[derive(Debug, Clone)]
pub struct RetryStrategy {
    /// Maximum number of retries
    pub max_retries: usize,
    /// Initial retry delay
    pub initial_delay: Duration,
    /// Maximum retry delay
    pub max_delay: Duration,
    /// Backoff multiplier
    pub multiplier: f64,
}

impl RetryStrategy {
    /// Create a new retry strategy from client config
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            initial_delay: Duration::from_millis(config.retry_initial_delay_ms),
            max_delay: Duration::from_millis(config.retry_max_delay_ms),
            multiplier: config.retry_multiplier,
        }
    }

    fn create_backoff(&self) -> ExponentialBackoff {
        ExponentialBackoffBuilder::new()
            .with_initial_interval(self.initial_delay)
            .with_max_interval(self.max_delay)
            .with_multiplier(self.multiplier)
            .with_max_elapsed_time(None)
            .build()
    }

    /// Check if an error is retryable
    pub fn is_retryable(error: &ClientError) -> bool {
        match error {
            ClientError::NetworkError(_) => true,
            ClientError::RateLimitExceeded(_) => true,
            ClientError::SorobanRpcError(msg) => {
                msg.contains("500") || msg.contains("502") || msg.contains("503")
            }
            // Still pending on the node
            ClientError::TransactionNotFound(_) => true,
            ClientError::InvalidResponse(_) => true,
            _ => false,
        }
    }

    /// Execute a function with retry logic
    pub async fn retry<F, Fut, T>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.retry_with_predicate(operation, Self::is_retryable)
            .await
    }

    /// Execute a function with retry logic and custom retry predicate
    pub async fn retry_with_predicate<F, Fut, T, P>(
        &self,
        operation: F,
        should_retry: P,
    ) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
        P: Fn(&ClientError) -> bool,
    {
        let mut backoff = self.create_backoff();
        let mut retry_ctx = RetryContext::new();
        let mut attempts = 0;

        loop {
            attempts += 1;
            debug!("Attempt {} of {}", attempts, self.max_retries + 1);

            match operation().await {
                Ok(result) => {
                    if attempts > 1 {
                        debug!(
                            "Operation succeeded after {} attempts ({} ms backing off)",
                            attempts, retry_ctx.total_time_ms
                        );
                    }
                    return Ok(result);
                }
                Err(error) => {
                    if !should_retry(&error) {
                        warn!("Non-retryable error: {:?}", error);
                        return Err(error);
                    }

                    if attempts > self.max_retries {
                        warn!(
                            "Max retries ({}) exceeded. Last error: {}",
                            self.max_retries, retry_ctx.last_error
                        );
                        return Err(ClientError::MaxRetriesExceeded(self.max_retries));
                    }

                    let delay = match backoff.next_backoff() {
                        Some(d) => d,
                        None => {
                            warn!("Backoff exhausted");
                            return Err(ClientError::MaxRetriesExceeded(self.max_retries));
                        }
                    };

                    retry_ctx.record_attempt(&error.to_string(), delay.as_millis() as u64);

                    warn!(
                        "Attempt {} failed: {:?}. Retrying in {:?}",
                        attempts, error, delay
                    );

                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
