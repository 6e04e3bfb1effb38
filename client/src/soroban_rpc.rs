//! Soroban RPC client.
//!
//! Thin JSON-RPC wrapper over the endpoints the multisig client needs:
//! simulating and sending prepared invocations, polling transactions, and
//! reading contract events.

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::retry::RetryStrategy;
use crate::types::{EventPage, SorobanInvocationResult, TransactionHash, TransactionStatus};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info};

/// JSON-RPC request ID type
type RequestId = u64;

/// Soroban RPC client
#[derive(Clone)]
pub struct SorobanRpcClient {
    client: Client,
    base_url: String,
    retry_strategy: RetryStrategy,
    request_id: Arc<AtomicU64>,
}

#[derive(Debug, Serialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    id: RequestId,
    method: String,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// Transaction simulation result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulateTransactionResult {
    /// Result value in XDR format
    pub result_xdr: Option<String>,
    /// Transaction data XDR
    pub transaction_data: Option<String>,
    /// Resource fee estimate
    pub min_resource_fee: String,
    /// Events emitted during simulation
    pub events: Option<Vec<String>>,
    /// Whether simulation was successful
    pub success: bool,
    /// Error message if simulation failed
    pub error: Option<String>,
}

/// Filter for [`SorobanRpcClient::get_events`]
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Contracts whose events are returned
    pub contract_ids: Vec<String>,
    /// Topic patterns: base64 XDR segments or `"*"`
    pub topics: Vec<Vec<String>>,
}

/// Where an event query starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventStart {
    /// First page, from this ledger on
    Ledger(u64),
    /// Continue after a cursor returned by a previous page
    Cursor(String),
}

impl SorobanRpcClient {
    /// Create a new Soroban RPC client
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(ClientError::NetworkError)?;

        Ok(Self {
            client,
            base_url: config.soroban_rpc_url.clone(),
            retry_strategy: RetryStrategy::from_config(config),
            request_id: Arc::new(AtomicU64::new(1)),
        })
    }

    fn next_request_id(&self) -> RequestId {
        self.request_id.fetch_add(1, Ordering::SeqCst)
    }

    async fn call_rpc(&self, method: &str, params: Value) -> Result<Value> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: self.next_request_id(),
            method: method.to_string(),
            params,
        };

        debug!("Soroban RPC request: {} (id: {})", method, request.id);

        self.retry_strategy
            .retry(|| async {
                let response = self
                    .client
                    .post(&self.base_url)
                    .json(&request)
                    .send()
                    .await
                    .map_err(ClientError::NetworkError)?;

                let status = response.status();
                if status.as_u16() == 429 {
                    let retry_after = response
                        .headers()
                        .get("retry-after")
                        .and_then(|v| v.to_str().ok())
                        .and_then(|v| v.parse().ok())
                        .unwrap_or(1);
                    return Err(ClientError::RateLimitExceeded(retry_after));
                }
                if !status.is_success() {
                    let error_text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    return Err(ClientError::SorobanRpcError(format!(
                        "HTTP {}: {}",
                        status, error_text
                    )));
                }

                let rpc_response: JsonRpcResponse = response
                    .json()
                    .await
                    .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

                if let Some(error) = rpc_response.error {
                    error!(
                        "Soroban RPC error: {} (code: {})",
                        error.message, error.code
                    );
                    return Err(ClientError::SorobanRpcError(format!(
                        "{} (code: {})",
                        error.message, error.code
                    )));
                }

                rpc_response.result.ok_or_else(|| {
                    ClientError::SorobanRpcError("Missing result in response".to_string())
                })
            })
            .await
    }

    /// Get latest ledger sequence
    pub async fn get_latest_ledger(&self) -> Result<u64> {
        let result = self.call_rpc("getLatestLedger", json!({})).await?;

        let sequence = result["sequence"].as_u64().ok_or_else(|| {
            ClientError::InvalidResponse("Missing sequence in ledger response".to_string())
        })?;

        debug!("Latest ledger: {}", sequence);
        Ok(sequence)
    }

    /// Simulate a transaction
    pub async fn simulate_transaction(
        &self,
        transaction_xdr: &str,
    ) -> Result<SimulateTransactionResult> {
        info!("Simulating transaction");

        let result = self
            .call_rpc(
                "simulateTransaction",
                json!({ "transaction": transaction_xdr }),
            )
            .await?;

        let error = result["error"].as_str().map(|s| s.to_string());
        let success = error.is_none();

        let result_xdr = result["results"][0]["xdr"].as_str().map(|s| s.to_string());
        let transaction_data = result["transactionData"].as_str().map(|s| s.to_string());
        if success && transaction_data.is_none() {
            return Err(ClientError::InvalidResponse(
                "Missing transactionData in simulation".to_string(),
            ));
        }

        let min_resource_fee = result["minResourceFee"].as_str().unwrap_or("0").to_string();

        let events = result["events"].as_array().map(|arr| {
            arr.iter()
                .filter_map(|e| e.as_str().map(String::from))
                .collect()
        });

        debug!(
            "Transaction simulation completed. Success: {}, Fee: {}",
            success, min_resource_fee
        );

        Ok(SimulateTransactionResult {
            result_xdr,
            transaction_data,
            min_resource_fee,
            events,
            success,
            error,
        })
    }

    /// Send a transaction to the network
    pub async fn send_transaction(&self, transaction_xdr: &str) -> Result<TransactionHash> {
        info!("Sending transaction via Soroban RPC");

        let result = self
            .call_rpc("sendTransaction", json!({ "transaction": transaction_xdr }))
            .await?;

        let hash = result["hash"]
            .as_str()
            .ok_or_else(|| {
                ClientError::InvalidResponse("Missing hash in send response".to_string())
            })?
            .to_string();

        let status = result["status"].as_str().unwrap_or("PENDING");
        if status == "ERROR" {
            let detail = result["errorResultXdr"].as_str().unwrap_or("no detail");
            return Err(ClientError::TransactionSubmissionError(format!(
                "{} rejected: {}",
                hash, detail
            )));
        }
        if status == "TRY_AGAIN_LATER" {
            return Err(ClientError::RateLimitExceeded(1));
        }

        info!("Transaction sent: {} (status: {})", hash, status);
        Ok(hash)
    }

    /// Get transaction status and result
    pub async fn get_transaction(&self, tx_hash: &str) -> Result<SorobanInvocationResult> {
        debug!("Fetching Soroban transaction: {}", tx_hash);

        let result = self
            .call_rpc("getTransaction", json!({ "hash": tx_hash }))
            .await?;

        let status_str = result["status"].as_str().ok_or_else(|| {
            ClientError::InvalidResponse("Missing status in transaction response".to_string())
        })?;

        let status = match status_str {
            "SUCCESS" => TransactionStatus::Success,
            "FAILED" => TransactionStatus::Failed,
            "NOT_FOUND" => return Err(ClientError::TransactionNotFound(tx_hash.to_string())),
            _ => TransactionStatus::Pending,
        };

        let ledger = result["ledger"].as_u64().unwrap_or(0);
        let result_xdr = result["resultXdr"].as_str().unwrap_or("").to_string();

        debug!(
            "Transaction retrieved: {} (status: {:?}, ledger: {})",
            tx_hash, status, ledger
        );

        Ok(SorobanInvocationResult {
            result_xdr,
            transaction_hash: tx_hash.to_string(),
            ledger,
            status,
        })
    }

    /// Get one page of contract events
    pub async fn get_events(
        &self,
        start: &EventStart,
        filter: &EventFilter,
        limit: u32,
    ) -> Result<EventPage> {
        let mut rpc_filter = json!({ "type": "contract" });
        if !filter.contract_ids.is_empty() {
            rpc_filter["contractIds"] = json!(filter.contract_ids);
        }
        if !filter.topics.is_empty() {
            rpc_filter["topics"] = json!(filter.topics);
        }

        let mut params = json!({
            "filters": [rpc_filter],
            "pagination": { "limit": limit }
        });
        match start {
            EventStart::Ledger(ledger) => {
                debug!("Fetching events from ledger {}", ledger);
                params["startLedger"] = json!(ledger);
            }
            EventStart::Cursor(cursor) => {
                debug!("Fetching events after cursor {}", cursor);
                params["pagination"]["cursor"] = json!(cursor);
            }
        }

        let result = self.call_rpc("getEvents", params).await?;
        let page: EventPage = serde_json::from_value(result)?;

        debug!(
            "Fetched {} events (latest ledger {})",
            page.events.len(),
            page.latest_ledger
        );
        Ok(page)
    }

    /// Health check - verify connection to Soroban RPC
    pub async fn health_check(&self) -> Result<bool> {
        match self.get_latest_ledger().await {
            Ok(_) => {
                info!("Soroban RPC health check passed");
                Ok(true)
            }
            Err(e) => {
                error!("Soroban RPC health check failed: {:?}", e);
                Err(e)
            }
        }
    }
}
