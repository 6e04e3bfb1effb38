//! Common types shared by the RPC layer, the monitor and the event feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Transaction status enumeration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    /// Transaction is pending
    Pending,
    /// Transaction was successful
    Success,
    /// Transaction failed
    Failed,
    /// Transaction not found
    NotFound,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionStatus::Pending => write!(f, "PENDING"),
            TransactionStatus::Success => write!(f, "SUCCESS"),
            TransactionStatus::Failed => write!(f, "FAILED"),
            TransactionStatus::NotFound => write!(f, "NOT_FOUND"),
        }
    }
}

/// Transaction hash type
pub type TransactionHash = String;

/// Base64 XDR of a signed transaction envelope
pub type TransactionEnvelopeXdr = String;

/// Soroban contract invocation result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SorobanInvocationResult {
    /// Result value in XDR format
    pub result_xdr: String,
    /// Transaction hash
    pub transaction_hash: TransactionHash,
    /// Ledger number
    pub ledger: u64,
    /// Status
    pub status: TransactionStatus,
}

/// One contract event as returned by `getEvents`, topics and value still
/// in base64 XDR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContractEvent {
    /// Unique event id assigned by the RPC node
    pub id: String,
    /// Ledger the event was emitted in
    pub ledger: u64,
    /// Close time of that ledger
    pub ledger_closed_at: DateTime<Utc>,
    /// Emitting contract
    pub contract_id: String,
    /// Topic values
    pub topic: Vec<String>,
    /// Data payload
    pub value: String,
    /// Hash of the transaction that emitted the event
    #[serde(default)]
    pub tx_hash: Option<String>,
}

/// A page of events plus the position to resume from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPage {
    /// Events in this page
    pub events: Vec<RawContractEvent>,
    /// Latest ledger known to the node
    pub latest_ledger: u64,
    /// Opaque cursor for the next page
    #[serde(default)]
    pub cursor: Option<String>,
}
