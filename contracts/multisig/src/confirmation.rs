//! # Confirmation Ledger
//!
//! One set of confirming owners per proposal. The quorum count is derived
//! on every read: only confirmers that are still owners are counted, so the
//! count never exceeds the owner set and drops automatically when a
//! confirming owner is removed.

use soroban_sdk::{Address, Env, Vec};

use crate::errors::MultisigError;
use crate::events::{emit_confirmed, emit_revoked};
use crate::registry;
use crate::storage;

/// Adds `owner`'s confirmation to proposal `id`.
///
/// Confirming twice is a successful no-op: the owner is counted once and no
/// second event is published.
///
/// # Errors
/// - [`MultisigError::NotOwner`] if `owner` is not an owner.
/// - [`MultisigError::UnknownProposal`] if the proposal does not exist.
/// - [`MultisigError::AlreadyExecuted`] if the proposal was executed.
pub fn confirm(env: &Env, id: u64, owner: Address) -> Result<(), MultisigError> {
    registry::require_owner(env, &owner)?;

    let proposal = storage::load_proposal(env, id)?;
    if proposal.executed {
        return Err(MultisigError::AlreadyExecuted);
    }

    let mut confirmers = storage::load_confirmations(env, id);
    if confirmers.contains(&owner) {
        return Ok(());
    }
    confirmers.push_back(owner.clone());
    storage::save_confirmations(env, id, &confirmers);

    emit_confirmed(env, id, &owner);
    Ok(())
}

/// Withdraws `owner`'s confirmation from proposal `id`, if there is one.
///
/// # Errors
/// - [`MultisigError::NotOwner`] if `owner` is not an owner.
/// - [`MultisigError::UnknownProposal`] if the proposal does not exist.
/// - [`MultisigError::AlreadyExecuted`] if the proposal was executed.
pub fn revoke(env: &Env, id: u64, owner: Address) -> Result<(), MultisigError> {
    registry::require_owner(env, &owner)?;

    let proposal = storage::load_proposal(env, id)?;
    if proposal.executed {
        return Err(MultisigError::AlreadyExecuted);
    }

    let mut confirmers = storage::load_confirmations(env, id);
    let Some(index) = confirmers.first_index_of(&owner) else {
        return Ok(());
    };
    confirmers.remove(index);
    storage::save_confirmations(env, id, &confirmers);

    emit_revoked(env, id, &owner);
    Ok(())
}

/// Number of active confirmations on `id` held by current owners.
pub fn confirmation_count(env: &Env, id: u64) -> u32 {
    let confirmers = storage::load_confirmations(env, id);
    let owners = match registry::owners(env) {
        Ok(owners) => owners,
        Err(_) => return 0,
    };
    confirmers
        .iter()
        .filter(|confirmer| owners.contains(confirmer))
        .count() as u32
}

/// Raw confirmation set, including confirmers since removed from the
/// registry.
pub fn confirmations(env: &Env, id: u64) -> Vec<Address> {
    storage::load_confirmations(env, id)
}

pub fn is_confirmed(env: &Env, id: u64, owner: &Address) -> bool {
    storage::load_confirmations(env, id).contains(owner)
}
