//! Typed view of the events the multisig contract publishes.
//!
//! Each contract event's first topic is the snake_case name of the event
//! struct. Proposal events carry the proposal id as the second topic, and
//! owner-related events carry the owner address after that. Addresses are
//! kept as their base64 XDR so they can be compared without a strkey codec.

use crate::error::{ClientError, Result};
use crate::scval::{decode_symbol, decode_u64, encode_symbol};
use crate::types::RawContractEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event kinds published by the multisig contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MultisigEventKind {
    /// Owner set and threshold installed
    Initialized,
    /// New proposal
    ProposalSubmitted,
    /// Owner confirmed a proposal
    ProposalConfirmed,
    /// Owner withdrew a confirmation
    ConfirmationRevoked,
    /// Proposal dispatched
    ProposalExecuted,
    /// Governance added an owner
    OwnerAdded,
    /// Governance removed an owner
    OwnerRemoved,
    /// Governance changed the threshold
    ThresholdChanged,
}

impl MultisigEventKind {
    /// Every kind, in contract declaration order
    pub const ALL: [MultisigEventKind; 8] = [
        MultisigEventKind::Initialized,
        MultisigEventKind::ProposalSubmitted,
        MultisigEventKind::ProposalConfirmed,
        MultisigEventKind::ConfirmationRevoked,
        MultisigEventKind::ProposalExecuted,
        MultisigEventKind::OwnerAdded,
        MultisigEventKind::OwnerRemoved,
        MultisigEventKind::ThresholdChanged,
    ];

    /// Leading topic symbol
    pub fn name(&self) -> &'static str {
        match self {
            MultisigEventKind::Initialized => "multisig_initialized_event",
            MultisigEventKind::ProposalSubmitted => "proposal_submitted_event",
            MultisigEventKind::ProposalConfirmed => "proposal_confirmed_event",
            MultisigEventKind::ConfirmationRevoked => "confirmation_revoked_event",
            MultisigEventKind::ProposalExecuted => "proposal_executed_event",
            MultisigEventKind::OwnerAdded => "owner_added_event",
            MultisigEventKind::OwnerRemoved => "owner_removed_event",
            MultisigEventKind::ThresholdChanged => "threshold_changed_event",
        }
    }

    /// Number of topics, name included
    pub fn topic_count(&self) -> usize {
        match self {
            MultisigEventKind::Initialized | MultisigEventKind::ThresholdChanged => 1,
            MultisigEventKind::ProposalExecuted
            | MultisigEventKind::OwnerAdded
            | MultisigEventKind::OwnerRemoved => 2,
            MultisigEventKind::ProposalSubmitted
            | MultisigEventKind::ProposalConfirmed
            | MultisigEventKind::ConfirmationRevoked => 3,
        }
    }

    /// Look a kind up by its leading topic symbol
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }

    /// `getEvents` topic pattern matching only this kind
    pub fn topic_filter(&self) -> Result<Vec<String>> {
        let mut filter = vec![encode_symbol(self.name())?];
        filter.resize(self.topic_count(), "*".to_string());
        Ok(filter)
    }
}

/// A decoded multisig event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MultisigEvent {
    /// Owner set and threshold installed
    Initialized,
    /// New proposal `id` from `submitter`
    ProposalSubmitted {
        /// Proposal id
        id: u64,
        /// Submitter address XDR
        submitter: String,
    },
    /// `owner` confirmed proposal `id`
    ProposalConfirmed {
        /// Proposal id
        id: u64,
        /// Owner address XDR
        owner: String,
    },
    /// `owner` withdrew their confirmation of proposal `id`
    ConfirmationRevoked {
        /// Proposal id
        id: u64,
        /// Owner address XDR
        owner: String,
    },
    /// Proposal `id` was dispatched
    ProposalExecuted {
        /// Proposal id
        id: u64,
    },
    /// `owner` joined the registry
    OwnerAdded {
        /// Owner address XDR
        owner: String,
    },
    /// `owner` left the registry
    OwnerRemoved {
        /// Owner address XDR
        owner: String,
    },
    /// The threshold changed
    ThresholdChanged,
}

impl MultisigEvent {
    /// Kind of this event
    pub fn kind(&self) -> MultisigEventKind {
        match self {
            MultisigEvent::Initialized => MultisigEventKind::Initialized,
            MultisigEvent::ProposalSubmitted { .. } => MultisigEventKind::ProposalSubmitted,
            MultisigEvent::ProposalConfirmed { .. } => MultisigEventKind::ProposalConfirmed,
            MultisigEvent::ConfirmationRevoked { .. } => MultisigEventKind::ConfirmationRevoked,
            MultisigEvent::ProposalExecuted { .. } => MultisigEventKind::ProposalExecuted,
            MultisigEvent::OwnerAdded { .. } => MultisigEventKind::OwnerAdded,
            MultisigEvent::OwnerRemoved { .. } => MultisigEventKind::OwnerRemoved,
            MultisigEvent::ThresholdChanged => MultisigEventKind::ThresholdChanged,
        }
    }

    /// Proposal the event refers to, if any
    pub fn proposal_id(&self) -> Option<u64> {
        match self {
            MultisigEvent::ProposalSubmitted { id, .. }
            | MultisigEvent::ProposalConfirmed { id, .. }
            | MultisigEvent::ConfirmationRevoked { id, .. }
            | MultisigEvent::ProposalExecuted { id } => Some(*id),
            _ => None,
        }
    }

    /// Decode a raw RPC event.
    ///
    /// Returns `Ok(None)` for events whose leading topic is not a multisig
    /// event name.
    pub fn decode(raw: &RawContractEvent) -> Result<Option<Self>> {
        let Some(first) = raw.topic.first() else {
            return Ok(None);
        };
        let Ok(name) = decode_symbol(first) else {
            return Ok(None);
        };
        let Some(kind) = MultisigEventKind::from_name(&name) else {
            return Ok(None);
        };

        if raw.topic.len() != kind.topic_count() {
            return Err(malformed(
                raw,
                format!(
                    "{} expects {} topics, got {}",
                    kind.name(),
                    kind.topic_count(),
                    raw.topic.len()
                ),
            ));
        }

        let event = match kind {
            MultisigEventKind::Initialized => MultisigEvent::Initialized,
            MultisigEventKind::ThresholdChanged => MultisigEvent::ThresholdChanged,
            MultisigEventKind::ProposalSubmitted => MultisigEvent::ProposalSubmitted {
                id: proposal_id(raw)?,
                submitter: raw.topic[2].clone(),
            },
            MultisigEventKind::ProposalConfirmed => MultisigEvent::ProposalConfirmed {
                id: proposal_id(raw)?,
                owner: raw.topic[2].clone(),
            },
            MultisigEventKind::ConfirmationRevoked => MultisigEvent::ConfirmationRevoked {
                id: proposal_id(raw)?,
                owner: raw.topic[2].clone(),
            },
            MultisigEventKind::ProposalExecuted => MultisigEvent::ProposalExecuted {
                id: proposal_id(raw)?,
            },
            MultisigEventKind::OwnerAdded => MultisigEvent::OwnerAdded {
                owner: raw.topic[1].clone(),
            },
            MultisigEventKind::OwnerRemoved => MultisigEvent::OwnerRemoved {
                owner: raw.topic[1].clone(),
            },
        };
        Ok(Some(event))
    }
}

/// A decoded event with its position in the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedEvent {
    /// RPC event id
    pub id: String,
    /// Ledger the event was emitted in
    pub ledger: u64,
    /// Close time of that ledger
    pub ledger_closed_at: DateTime<Utc>,
    /// The event itself
    pub event: MultisigEvent,
}

impl DecodedEvent {
    /// Decode `raw`, keeping its ledger position
    pub fn from_raw(raw: &RawContractEvent) -> Result<Option<Self>> {
        Ok(MultisigEvent::decode(raw)?.map(|event| Self {
            id: raw.id.clone(),
            ledger: raw.ledger,
            ledger_closed_at: raw.ledger_closed_at,
            event,
        }))
    }
}

fn proposal_id(raw: &RawContractEvent) -> Result<u64> {
    decode_u64(&raw.topic[1]).map_err(|e| malformed(raw, format!("bad proposal id: {}", e)))
}

fn malformed(raw: &RawContractEvent, reason: String) -> ClientError {
    ClientError::MalformedEvent {
        id: raw.id.clone(),
        reason,
    }
}
