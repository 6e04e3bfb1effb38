//! Transaction monitoring.
//!
//! Polls `getTransaction` until a submitted multisig operation lands in a
//! ledger, fails, or the configured timeout elapses.

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::soroban_rpc::SorobanRpcClient;
use crate::types::{SorobanInvocationResult, TransactionStatus};
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Transaction monitor for tracking transaction status
#[derive(Clone)]
pub struct TransactionMonitor {
    soroban_rpc: SorobanRpcClient,
    defaults: MonitorOptions,
}

/// Monitoring options
#[derive(Debug, Clone)]
pub struct MonitorOptions {
    /// Poll interval (in milliseconds)
    pub poll_interval_ms: u64,
    /// Timeout (in seconds)
    pub timeout_secs: u64,
}

impl MonitorOptions {
    /// Create from client config
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            poll_interval_ms: config.tx_poll_interval_ms,
            timeout_secs: config.tx_timeout_secs,
        }
    }

    /// Set custom poll interval
    pub fn with_poll_interval(mut self, interval_ms: u64) -> Self {
        self.poll_interval_ms = interval_ms;
        self
    }

    /// Set custom timeout
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Transaction monitoring result
#[derive(Debug, Clone)]
pub enum MonitorResult {
    /// Transaction completed successfully
    Success(SorobanInvocationResult),
    /// Transaction failed; carries the result XDR
    Failed(String),
    /// Transaction timed out
    Timeout,
}

impl TransactionMonitor {
    /// Create a new transaction monitor sharing `soroban_rpc`
    pub fn new(soroban_rpc: SorobanRpcClient, config: &ClientConfig) -> Self {
        Self {
            soroban_rpc,
            defaults: MonitorOptions::from_config(config),
        }
    }

    /// Options derived from the client config
    pub fn default_options(&self) -> MonitorOptions {
        self.defaults.clone()
    }

    /// Poll a transaction until it completes or times out
    pub async fn monitor(&self, tx_hash: &str, options: MonitorOptions) -> Result<MonitorResult> {
        info!(
            "Monitoring transaction: {} (timeout: {}s)",
            tx_hash, options.timeout_secs
        );

        let start = Instant::now();
        let timeout = Duration::from_secs(options.timeout_secs);
        let poll_interval = Duration::from_millis(options.poll_interval_ms);

        loop {
            if start.elapsed() >= timeout {
                warn!("Transaction monitoring timed out: {}", tx_hash);
                return Ok(MonitorResult::Timeout);
            }

            match self.soroban_rpc.get_transaction(tx_hash).await {
                Ok(result) => match result.status {
                    TransactionStatus::Success => {
                        info!("Transaction succeeded: {} (ledger {})", tx_hash, result.ledger);
                        return Ok(MonitorResult::Success(result));
                    }
                    TransactionStatus::Failed => {
                        warn!("Transaction failed: {}", tx_hash);
                        return Ok(MonitorResult::Failed(result.result_xdr));
                    }
                    TransactionStatus::Pending | TransactionStatus::NotFound => {
                        debug!("Transaction still pending: {}", tx_hash);
                    }
                },
                Err(ClientError::TransactionNotFound(_)) | Err(ClientError::MaxRetriesExceeded(_)) => {
                    debug!("Transaction not yet in ledger: {}", tx_hash);
                }
                Err(e) => {
                    debug!("Error fetching transaction: {:?}", e);
                }
            }

            sleep(poll_interval).await;
        }
    }

    /// Wait for a transaction with the default options.
    ///
    /// Returns true if the transaction succeeded, false if it failed or
    /// timed out.
    pub async fn wait_for_confirmation(&self, tx_hash: &str) -> Result<bool> {
        let result = self.monitor(tx_hash, self.default_options()).await?;
        Ok(matches!(result, MonitorResult::Success(_)))
    }

    /// Like [`Self::wait_for_confirmation`] but turns a timeout into
    /// [`ClientError::TransactionTimeout`] and a failure into
    /// [`ClientError::TransactionSubmissionError`].
    pub async fn require_success(&self, tx_hash: &str) -> Result<SorobanInvocationResult> {
        let options = self.default_options();
        let timeout_secs = options.timeout_secs;
        match self.monitor(tx_hash, options).await? {
            MonitorResult::Success(result) => Ok(result),
            MonitorResult::Failed(result_xdr) => Err(ClientError::TransactionSubmissionError(
                format!("{} failed: {}", tx_hash, result_xdr),
            )),
            MonitorResult::Timeout => Err(ClientError::TransactionTimeout(timeout_secs)),
        }
    }

    /// Get current transaction status (single check, no monitoring)
    pub async fn get_status(&self, tx_hash: &str) -> Result<TransactionStatus> {
        match self.soroban_rpc.get_transaction(tx_hash).await {
            Ok(result) => Ok(result.status),
            Err(ClientError::TransactionNotFound(_)) => Ok(TransactionStatus::NotFound),
            Err(e) => Err(e),
        }
    }
}
