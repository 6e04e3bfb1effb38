//! Off-chain view of multisig proposals, rebuilt from contract events.
//!
//! The tracker folds [`DecodedEvent`]s in ledger order. It knows which
//! proposals exist, who confirmed them, and which have executed. It does
//! not know the threshold, so "enough confirmations" stays the contract's
//! call; the tracker only reports live confirmation counts.

use crate::error::Result;
use crate::events::{DecodedEvent, MultisigEvent};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// Anything that can hand out multisig events from a ledger onwards.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Events emitted at or after `start_ledger`, oldest first, and the
    /// ledger to resume from next time.
    async fn events_since(&self, start_ledger: u64) -> Result<(Vec<DecodedEvent>, u64)>;
}

/// What the tracker knows about one proposal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedProposal {
    /// Proposal id
    pub id: u64,
    /// Submitter address XDR; `None` if the submission predates tracking
    pub submitter: Option<String>,
    /// Owners with an active confirmation, as address XDR
    pub confirmers: BTreeSet<String>,
    /// Whether the proposal executed
    pub executed: bool,
    /// When it was submitted
    pub submitted_at: Option<DateTime<Utc>>,
    /// When it executed
    pub executed_at: Option<DateTime<Utc>>,
}

impl TrackedProposal {
    fn new(id: u64) -> Self {
        Self {
            id,
            submitter: None,
            confirmers: BTreeSet::new(),
            executed: false,
            submitted_at: None,
            executed_at: None,
        }
    }
}

/// Event-sourced proposal index
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProposalTracker {
    proposals: BTreeMap<u64, TrackedProposal>,
    removed_owners: BTreeSet<String>,
    seen: BTreeSet<String>,
    next_ledger: u64,
}

impl ProposalTracker {
    /// Start tracking from `start_ledger`
    pub fn new(start_ledger: u64) -> Self {
        Self {
            next_ledger: start_ledger,
            ..Self::default()
        }
    }

    /// Ledger the next [`Self::sync`] starts from
    pub fn next_ledger(&self) -> u64 {
        self.next_ledger
    }

    /// Apply one event. Replays of an event id already applied are ignored.
    pub fn apply(&mut self, decoded: &DecodedEvent) {
        if !self.seen.insert(decoded.id.clone()) {
            debug!("Skipping replayed event {}", decoded.id);
            return;
        }

        match &decoded.event {
            MultisigEvent::ProposalSubmitted { id, submitter } => {
                let proposal = self.entry(*id);
                proposal.submitter = Some(submitter.clone());
                proposal.submitted_at = Some(decoded.ledger_closed_at);
            }
            MultisigEvent::ProposalConfirmed { id, owner } => {
                self.entry(*id).confirmers.insert(owner.clone());
            }
            MultisigEvent::ConfirmationRevoked { id, owner } => {
                self.entry(*id).confirmers.remove(owner);
            }
            MultisigEvent::ProposalExecuted { id } => {
                let proposal = self.entry(*id);
                if proposal.executed {
                    warn!("Proposal {} reported executed twice", id);
                }
                proposal.executed = true;
                proposal.executed_at = Some(decoded.ledger_closed_at);
            }
            MultisigEvent::OwnerAdded { owner } => {
                self.removed_owners.remove(owner);
            }
            MultisigEvent::OwnerRemoved { owner } => {
                self.removed_owners.insert(owner.clone());
            }
            MultisigEvent::Initialized | MultisigEvent::ThresholdChanged => {}
        }
    }

    /// Pull everything new from `source` and apply it.
    ///
    /// Returns the number of events applied.
    pub async fn sync<S: EventSource + ?Sized>(&mut self, source: &S) -> Result<usize> {
        let (events, next_ledger) = source.events_since(self.next_ledger).await?;
        let before = self.seen.len();
        for event in &events {
            self.apply(event);
        }
        self.next_ledger = next_ledger.max(self.next_ledger);

        let applied = self.seen.len() - before;
        debug!(
            "Tracker applied {} of {} events, next ledger {}",
            applied,
            events.len(),
            self.next_ledger
        );
        Ok(applied)
    }

    /// Look up one proposal
    pub fn get(&self, id: u64) -> Option<&TrackedProposal> {
        self.proposals.get(&id)
    }

    /// Confirmations held by owners that have not been removed.
    pub fn live_confirmations(&self, id: u64) -> usize {
        self.proposals
            .get(&id)
            .map(|p| {
                p.confirmers
                    .iter()
                    .filter(|owner| !self.removed_owners.contains(*owner))
                    .count()
            })
            .unwrap_or(0)
    }

    /// Ids of proposals not yet executed, ascending
    pub fn pending(&self) -> Vec<u64> {
        self.proposals
            .values()
            .filter(|p| !p.executed)
            .map(|p| p.id)
            .collect()
    }

    /// Pending proposals whose submitter has since been removed; these can
    /// never execute.
    pub fn orphaned(&self) -> Vec<u64> {
        self.proposals
            .values()
            .filter(|p| !p.executed)
            .filter(|p| {
                p.submitter
                    .as_ref()
                    .is_some_and(|s| self.removed_owners.contains(s))
            })
            .map(|p| p.id)
            .collect()
    }

    fn entry(&mut self, id: u64) -> &mut TrackedProposal {
        self.proposals
            .entry(id)
            .or_insert_with(|| TrackedProposal::new(id))
    }
}
