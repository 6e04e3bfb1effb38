//! Example: submit a signed multisig invocation and wait for it
//!
//! The envelope is any signed `submit_transaction`, `confirm_transaction`,
//! `revoke_transaction` or `execute_transaction` call against the multisig.
//!
//! Usage: `MULTISIG_CONTRACT_ID=C... cargo run --example submit_operation -- <envelope-xdr>`

use anyhow::{bail, Context};
use multisig_client::{ClientConfig, ClientError, MultisigClient};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("multisig_client=debug")),
        )
        .init();

    let Some(envelope) = std::env::args().nth(1) else {
        bail!("usage: submit_operation <envelope-xdr>");
    };
    let contract_id =
        std::env::var("MULTISIG_CONTRACT_ID").context("MULTISIG_CONTRACT_ID is not set")?;

    let client = MultisigClient::new(Arc::new(ClientConfig::testnet(contract_id)))?;

    match client.submit_and_wait(&envelope).await {
        Ok(result) => {
            println!("✓ Landed in ledger {}", result.ledger);
            println!("  - Hash: {}", result.transaction_hash);
        }
        Err(ClientError::SimulationFailed(reason)) => {
            // Quorum not met, submitter removed, already executed, ...
            println!("✗ Contract rejected the call: {}", reason);
        }
        Err(ClientError::TransactionTimeout(secs)) => {
            println!("… Not confirmed after {}s; check again later", secs);
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
