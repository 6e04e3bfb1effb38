//! # Proposal Store
//!
//! Proposals are keyed by a strictly increasing id starting at 1 and are
//! never deleted. Only the `executed` flag changes after submission, and
//! only through [`crate::execution`].

use soroban_sdk::{log, Address, Env, Vec};

use crate::errors::MultisigError;
use crate::events::emit_submitted;
use crate::registry;
use crate::storage;
use crate::types::{Call, Proposal};

/// Records a new proposal from `submitter` and opens an empty confirmation
/// set for it. The submitter does not confirm implicitly.
///
/// # Errors
/// - [`MultisigError::NotOwner`] if `submitter` is not an owner.
/// - [`MultisigError::CounterOverflow`] if the id space is exhausted.
pub fn submit(
    env: &Env,
    submitter: Address,
    target: Address,
    call: Call,
) -> Result<u64, MultisigError> {
    registry::require_owner(env, &submitter)?;

    let id = storage::load_proposal_counter(env)
        .checked_add(1)
        .ok_or(MultisigError::CounterOverflow)?;
    let pending = storage::load_pending_count(env)
        .checked_add(1)
        .ok_or(MultisigError::CounterOverflow)?;

    let proposal = Proposal {
        id,
        target,
        call,
        submitter,
        executed: false,
    };

    storage::save_proposal_counter(env, id);
    storage::save_proposal(env, &proposal);
    storage::save_confirmations(env, id, &Vec::new(env));
    storage::save_pending_count(env, pending);

    emit_submitted(
        env,
        id,
        &proposal.submitter,
        &proposal.target,
        &proposal.call.function,
    );
    log!(env, "submit_transaction id={} submitter={}", id, proposal.submitter);

    Ok(id)
}

pub fn get(env: &Env, id: u64) -> Result<Proposal, MultisigError> {
    storage::load_proposal(env, id)
}

/// Last allocated proposal id; `0` before the first submission.
pub fn current_proposal_id(env: &Env) -> u64 {
    storage::load_proposal_counter(env)
}

pub fn pending_count(env: &Env) -> u64 {
    storage::load_pending_count(env)
}

/// Flips `executed` on and takes the proposal out of the pending count.
pub(crate) fn mark_executed(env: &Env, proposal: &mut Proposal) {
    proposal.executed = true;
    storage::save_proposal(env, proposal);
    storage::save_pending_count(env, storage::load_pending_count(env).saturating_sub(1));
}

/// Undoes [`mark_executed`] after a failed dispatch.
pub(crate) fn unmark_executed(env: &Env, proposal: &mut Proposal) {
    proposal.executed = false;
    storage::save_proposal(env, proposal);
    storage::save_pending_count(env, storage::load_pending_count(env).saturating_add(1));
}
