use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::errors::MultisigError;
use crate::types::Proposal;

/// Storage keys for the multisig treasury.
///
/// Registry and counters live in instance storage; proposals and their
/// confirmation sets are persistent entries keyed by proposal id.
#[contracttype]
#[derive(Clone)]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub enum MultisigDataKey {
    /// Owner set: Vec<Address>
    Owners,
    /// Confirmation threshold: u32
    Threshold,
    /// Last allocated proposal id: u64
    ProposalCounter,
    /// Number of unexecuted proposals: u64
    PendingCount,
    /// Proposal by id
    Proposal(u64),
    /// Active confirmations by proposal id: Vec<Address>
    Confirmations(u64),
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&MultisigDataKey::Owners)
}

pub fn load_owners(env: &Env) -> Result<Vec<Address>, MultisigError> {
    env.storage()
        .instance()
        .get(&MultisigDataKey::Owners)
        .ok_or(MultisigError::NotInitialized)
}

pub fn save_owners(env: &Env, owners: &Vec<Address>) {
    env.storage().instance().set(&MultisigDataKey::Owners, owners);
}

pub fn load_threshold(env: &Env) -> Result<u32, MultisigError> {
    env.storage()
        .instance()
        .get(&MultisigDataKey::Threshold)
        .ok_or(MultisigError::NotInitialized)
}

pub fn save_threshold(env: &Env, threshold: u32) {
    env.storage()
        .instance()
        .set(&MultisigDataKey::Threshold, &threshold);
}

pub fn load_proposal_counter(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&MultisigDataKey::ProposalCounter)
        .unwrap_or(0u64)
}

pub fn save_proposal_counter(env: &Env, id: u64) {
    env.storage()
        .instance()
        .set(&MultisigDataKey::ProposalCounter, &id);
}

pub fn load_pending_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&MultisigDataKey::PendingCount)
        .unwrap_or(0u64)
}

pub fn save_pending_count(env: &Env, count: u64) {
    env.storage()
        .instance()
        .set(&MultisigDataKey::PendingCount, &count);
}

pub fn load_proposal(env: &Env, id: u64) -> Result<Proposal, MultisigError> {
    env.storage()
        .persistent()
        .get(&MultisigDataKey::Proposal(id))
        .ok_or(MultisigError::UnknownProposal)
}

pub fn save_proposal(env: &Env, proposal: &Proposal) {
    env.storage()
        .persistent()
        .set(&MultisigDataKey::Proposal(proposal.id), proposal);
}

pub fn load_confirmations(env: &Env, id: u64) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&MultisigDataKey::Confirmations(id))
        .unwrap_or_else(|| Vec::new(env))
}

pub fn save_confirmations(env: &Env, id: u64, confirmers: &Vec<Address>) {
    env.storage()
        .persistent()
        .set(&MultisigDataKey::Confirmations(id), confirmers);
}
