//! Network and contract configuration for the multisig client.
//!
//! A [`ClientConfig`] names the Soroban RPC endpoint to talk to, the network
//! passphrase transactions are signed for, and the deployed multisig
//! contract whose proposals the client follows.

use crate::error::{ClientError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Length of a strkey-encoded contract id (`C...`).
const CONTRACT_ID_LEN: usize = 56;

/// Network type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Network {
    /// Stellar testnet
    Testnet,
    /// Stellar mainnet (public network)
    Mainnet,
    /// Stellar futurenet (for testing upcoming features)
    Futurenet,
    /// Custom network with user-defined endpoints
    Custom,
}

impl Network {
    /// Get the network passphrase
    pub fn passphrase(&self) -> &'static str {
        match self {
            Network::Testnet => "Test SDF Network ; September 2015",
            Network::Mainnet => "Public Global Stellar Network ; September 2015",
            Network::Futurenet => "Test SDF Future Network ; October 2022",
            Network::Custom => "Custom Network",
        }
    }

    /// Get the default Soroban RPC URL for this network
    pub fn default_soroban_rpc_url(&self) -> &'static str {
        match self {
            Network::Testnet => "https://soroban-testnet.stellar.org",
            Network::Mainnet => "https://soroban-mainnet.stellar.org",
            Network::Futurenet => "https://rpc-futurenet.stellar.org",
            Network::Custom => "",
        }
    }
}

/// Configuration for [`crate::MultisigClient`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Network to connect to
    pub network: Network,

    /// Soroban RPC endpoint URL
    pub soroban_rpc_url: String,

    /// Network passphrase
    pub network_passphrase: String,

    /// Strkey id of the deployed multisig contract
    pub contract_id: String,

    /// HTTP request timeout
    pub request_timeout: Duration,

    /// Maximum number of retries for failed requests
    pub max_retries: usize,

    /// Initial retry delay (in milliseconds)
    pub retry_initial_delay_ms: u64,

    /// Maximum retry delay (in milliseconds)
    pub retry_max_delay_ms: u64,

    /// Retry backoff multiplier
    pub retry_multiplier: f64,

    /// Transaction polling interval (in milliseconds)
    pub tx_poll_interval_ms: u64,

    /// Transaction timeout (in seconds)
    pub tx_timeout_secs: u64,

    /// Maximum events requested per `getEvents` page
    pub event_page_limit: u32,
}

impl ClientConfig {
    /// Create a new configuration for the specified network
    pub fn new(network: Network, contract_id: impl Into<String>) -> Self {
        Self {
            network,
            soroban_rpc_url: network.default_soroban_rpc_url().to_string(),
            network_passphrase: network.passphrase().to_string(),
            contract_id: contract_id.into(),
            request_timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_initial_delay_ms: 100,
            retry_max_delay_ms: 5000,
            retry_multiplier: 2.0,
            tx_poll_interval_ms: 1000,
            tx_timeout_secs: 60,
            event_page_limit: 100,
        }
    }

    /// Create configuration for testnet
    pub fn testnet(contract_id: impl Into<String>) -> Self {
        Self::new(Network::Testnet, contract_id)
    }

    /// Create configuration for mainnet
    pub fn mainnet(contract_id: impl Into<String>) -> Self {
        Self::new(Network::Mainnet, contract_id)
    }

    /// Create configuration for futurenet
    pub fn futurenet(contract_id: impl Into<String>) -> Self {
        Self::new(Network::Futurenet, contract_id)
    }

    /// Create a custom configuration
    pub fn custom(
        soroban_rpc_url: String,
        network_passphrase: String,
        contract_id: String,
    ) -> Result<Self> {
        let config = Self {
            soroban_rpc_url,
            network_passphrase,
            ..Self::new(Network::Custom, contract_id)
        };
        config.validate()?;
        Ok(config)
    }

    /// Set request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set maximum retries
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set retry delays
    pub fn with_retry_config(
        mut self,
        initial_delay_ms: u64,
        max_delay_ms: u64,
        multiplier: f64,
    ) -> Self {
        self.retry_initial_delay_ms = initial_delay_ms;
        self.retry_max_delay_ms = max_delay_ms;
        self.retry_multiplier = multiplier;
        self
    }

    /// Set transaction polling configuration
    pub fn with_tx_config(mut self, poll_interval_ms: u64, timeout_secs: u64) -> Self {
        self.tx_poll_interval_ms = poll_interval_ms;
        self.tx_timeout_secs = timeout_secs;
        self
    }

    /// Set the `getEvents` page size
    pub fn with_event_page_limit(mut self, limit: u32) -> Self {
        self.event_page_limit = limit;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.soroban_rpc_url.is_empty() {
            return Err(ClientError::ConfigError(
                "Soroban RPC URL cannot be empty".to_string(),
            ));
        }
        let url = Url::parse(&self.soroban_rpc_url)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ClientError::ConfigError(format!(
                "Unsupported RPC scheme: {}",
                url.scheme()
            )));
        }
        if self.network_passphrase.is_empty() {
            return Err(ClientError::ConfigError(
                "Network passphrase cannot be empty".to_string(),
            ));
        }
        if self.contract_id.len() != CONTRACT_ID_LEN || !self.contract_id.starts_with('C') {
            return Err(ClientError::ConfigError(format!(
                "Invalid multisig contract id: {}",
                self.contract_id
            )));
        }
        if self.max_retries == 0 {
            return Err(ClientError::ConfigError(
                "Max retries must be greater than 0".to_string(),
            ));
        }
        if self.retry_initial_delay_ms == 0 {
            return Err(ClientError::ConfigError(
                "Retry initial delay must be greater than 0".to_string(),
            ));
        }
        if self.retry_multiplier <= 1.0 {
            return Err(ClientError::ConfigError(
                "Retry multiplier must be greater than 1.0".to_string(),
            ));
        }
        if self.tx_poll_interval_ms == 0 {
            return Err(ClientError::ConfigError(
                "Transaction poll interval must be greater than 0".to_string(),
            ));
        }
        if self.tx_timeout_secs == 0 {
            return Err(ClientError::ConfigError(
                "Transaction timeout must be greater than 0".to_string(),
            ));
        }
        if self.event_page_limit == 0 {
            return Err(ClientError::ConfigError(
                "Event page limit must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
