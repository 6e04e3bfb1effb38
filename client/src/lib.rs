//! Operator client for the treasury multisig contract.
//!
//! Owners prepare and sign their multisig invocations (`submit_transaction`,
//! `confirm_transaction`, `revoke_transaction`, `execute_transaction`) with
//! their usual tooling. This crate takes the signed envelopes from there:
//! it simulates them, submits them through Soroban RPC, waits for them to
//! land, and follows the contract's event stream to keep an off-chain view
//! of every proposal.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use multisig_client::{ClientConfig, MultisigClient, ProposalTracker};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     tracing_subscriber::fmt::init();
//!
//!     let config = Arc::new(ClientConfig::testnet(
//!         "CDLZFC3SYJYDZT7K67VZ75HPJVIEUVNIXF47ZG2FB2RMQQVU2HHGCYSC",
//!     ));
//!     let client = MultisigClient::new(config)?;
//!     client.health_check().await?;
//!
//!     let mut tracker = ProposalTracker::new(client.latest_ledger().await?);
//!     tracker.sync(&client).await?;
//!     println!("pending proposals: {:?}", tracker.pending());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod error;
pub mod events;
pub mod monitor;
pub mod retry;
pub mod scval;
pub mod soroban_rpc;
pub mod tracker;
pub mod types;

pub use config::{ClientConfig, Network};
pub use error::{ClientError, Result};
pub use events::{DecodedEvent, MultisigEvent, MultisigEventKind};
pub use monitor::{MonitorOptions, MonitorResult, TransactionMonitor};
pub use retry::RetryStrategy;
pub use soroban_rpc::{EventFilter, EventStart, SimulateTransactionResult, SorobanRpcClient};
pub use tracker::{EventSource, ProposalTracker, TrackedProposal};
pub use types::{
    EventPage, RawContractEvent, SorobanInvocationResult, TransactionEnvelopeXdr,
    TransactionHash, TransactionStatus,
};

use async_trait::async_trait;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// `getEvents` accepts at most this many topic patterns per filter.
const MAX_TOPIC_FILTERS: usize = 5;

/// Client bound to one deployed multisig contract.
#[derive(Clone)]
pub struct MultisigClient {
    soroban_rpc: SorobanRpcClient,
    monitor: TransactionMonitor,
    config: Arc<ClientConfig>,
}

impl MultisigClient {
    /// Create a new client
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use multisig_client::{ClientConfig, MultisigClient};
    /// use std::sync::Arc;
    ///
    /// let config = Arc::new(ClientConfig::testnet(
    ///     "CDLZFC3SYJYDZT7K67VZ75HPJVIEUVNIXF47ZG2FB2RMQQVU2HHGCYSC",
    /// ));
    /// let client = MultisigClient::new(config).unwrap();
    /// ```
    pub fn new(config: Arc<ClientConfig>) -> Result<Self> {
        config.validate()?;

        info!(
            "Initializing multisig client for {} on {:?}",
            config.contract_id, config.network
        );

        let soroban_rpc = SorobanRpcClient::new(&config)?;
        let monitor = TransactionMonitor::new(soroban_rpc.clone(), &config);

        Ok(Self {
            soroban_rpc,
            monitor,
            config,
        })
    }

    /// Get the Soroban RPC client
    pub fn soroban_rpc(&self) -> &SorobanRpcClient {
        &self.soroban_rpc
    }

    /// Get the transaction monitor
    pub fn monitor(&self) -> &TransactionMonitor {
        &self.monitor
    }

    /// Get configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Simulate a signed multisig invocation and, if the contract accepts
    /// it, submit it.
    ///
    /// A contract error such as `QuorumNotMet` surfaces here as
    /// [`ClientError::SimulationFailed`] without spending a fee.
    pub async fn submit_operation(&self, envelope_xdr: &str) -> Result<TransactionHash> {
        let simulation = self.soroban_rpc.simulate_transaction(envelope_xdr).await?;
        if !simulation.success {
            let error_msg = simulation
                .error
                .unwrap_or_else(|| "Unknown simulation error".to_string());
            warn!("Simulation rejected operation: {}", error_msg);
            return Err(ClientError::SimulationFailed(error_msg));
        }
        debug!(
            "Simulation successful. Estimated fee: {}",
            simulation.min_resource_fee
        );

        self.soroban_rpc.send_transaction(envelope_xdr).await
    }

    /// [`Self::submit_operation`], then wait until the transaction lands.
    pub async fn submit_and_wait(&self, envelope_xdr: &str) -> Result<SorobanInvocationResult> {
        let hash = self.submit_operation(envelope_xdr).await?;
        self.monitor.require_success(&hash).await
    }

    /// Wait for several submitted operations concurrently, e.g. the
    /// confirmations of every owner. Results are in input order.
    pub async fn wait_for_all(&self, tx_hashes: &[TransactionHash]) -> Vec<Result<bool>> {
        join_all(
            tx_hashes
                .iter()
                .map(|hash| self.monitor.wait_for_confirmation(hash)),
        )
        .await
    }

    /// Latest ledger sequence known to the RPC node
    pub async fn latest_ledger(&self) -> Result<u64> {
        self.soroban_rpc.get_latest_ledger().await
    }

    /// Fetch the multisig's events from `start_ledger` on, optionally
    /// restricted to `kinds`, following pagination to the end.
    ///
    /// Returns the decoded events, oldest first, and the ledger to resume
    /// from. The resume ledger is re-scanned next time; consumers
    /// deduplicate by event id.
    pub async fn fetch_events(
        &self,
        start_ledger: u64,
        kinds: &[MultisigEventKind],
    ) -> Result<(Vec<DecodedEvent>, u64)> {
        let mut filter = EventFilter {
            contract_ids: vec![self.config.contract_id.clone()],
            topics: Vec::new(),
        };
        if !kinds.is_empty() && kinds.len() <= MAX_TOPIC_FILTERS {
            for kind in kinds {
                filter.topics.push(kind.topic_filter()?);
            }
        }

        let limit = self.config.event_page_limit;
        let mut start = EventStart::Ledger(start_ledger);
        let mut decoded = Vec::new();
        let mut resume = start_ledger;

        loop {
            let page = self.soroban_rpc.get_events(&start, &filter, limit).await?;
            resume = resume.max(page.latest_ledger);
            let page_len = page.events.len();

            for raw in &page.events {
                match DecodedEvent::from_raw(raw)? {
                    Some(event) if kinds.is_empty() || kinds.contains(&event.event.kind()) => {
                        decoded.push(event)
                    }
                    Some(_) => {}
                    None => debug!("Ignoring non-multisig event {}", raw.id),
                }
            }

            match page.cursor {
                Some(cursor) if page_len as u32 == limit => start = EventStart::Cursor(cursor),
                _ => break,
            }
        }

        debug!(
            "Fetched {} multisig events from ledger {}",
            decoded.len(),
            start_ledger
        );
        Ok((decoded, resume))
    }

    /// Health check - verify connectivity to Soroban RPC
    pub async fn health_check(&self) -> Result<bool> {
        self.soroban_rpc.health_check().await
    }
}

#[async_trait]
impl EventSource for MultisigClient {
    async fn events_since(&self, start_ledger: u64) -> Result<(Vec<DecodedEvent>, u64)> {
        self.fetch_events(start_ledger, &[]).await
    }
}
