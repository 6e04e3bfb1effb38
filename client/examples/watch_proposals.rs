//! Example: follow a multisig's proposals from its event stream
//!
//! Usage: `MULTISIG_CONTRACT_ID=C... cargo run --example watch_proposals`

use anyhow::Context;
use multisig_client::{ClientConfig, MultisigClient, ProposalTracker};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("multisig_client=info")),
        )
        .init();

    let contract_id =
        std::env::var("MULTISIG_CONTRACT_ID").context("MULTISIG_CONTRACT_ID is not set")?;
    let config = Arc::new(ClientConfig::testnet(contract_id));
    let client = MultisigClient::new(config).context("building client")?;

    // Look back roughly a day of ledgers.
    let latest = client.latest_ledger().await?;
    let mut tracker = ProposalTracker::new(latest.saturating_sub(17_280));

    println!("=== Watching proposals from ledger {} ===\n", tracker.next_ledger());

    loop {
        let applied = tracker.sync(&client).await?;
        if applied > 0 {
            for id in tracker.pending() {
                println!(
                    "proposal {:>4}: {} live confirmation(s)",
                    id,
                    tracker.live_confirmations(id)
                );
            }
            for id in tracker.orphaned() {
                println!("proposal {:>4}: submitter removed, cannot execute", id);
            }
            println!();
        }
        tokio::time::sleep(Duration::from_secs(5)).await;
    }
}
