//! # Owner Registry
//!
//! Holds the owner set and the confirmation threshold.
//!
//! ## Invariants
//! - `owner_count() >= MIN_OWNERS` at all times.
//! - `MIN_THRESHOLD <= threshold() <= owner_count()` at all times.
//! - Owners are unique.
//!
//! After construction the registry is only mutated by [`add_owner`],
//! [`remove_owner`] and [`set_threshold`], which are crate-private and
//! reached solely through a self-targeted proposal executed by
//! [`crate::execution`]. None of them is a contract entry point.

use soroban_sdk::{Address, Env, Vec};

use crate::errors::MultisigError;
use crate::events::{emit_initialized, emit_owner_added, emit_owner_removed, emit_threshold_changed};
use crate::storage;
use crate::types::{MIN_OWNERS, MIN_THRESHOLD};

/// Installs the initial owner set and threshold. Callable once.
///
/// The owner count is checked before the threshold, so an undersized set
/// fails with [`MultisigError::TooFewOwners`] whatever threshold is asked
/// for.
///
/// # Errors
/// - [`MultisigError::AlreadyInitialized`] on a second call.
/// - [`MultisigError::TooFewOwners`] if fewer than `MIN_OWNERS` owners.
/// - [`MultisigError::InvalidThreshold`] if the threshold is out of range.
/// - [`MultisigError::OwnerAlreadyExists`] if an owner is listed twice.
pub fn initialize(env: &Env, owners: Vec<Address>, threshold: u32) -> Result<(), MultisigError> {
    if storage::is_initialized(env) {
        return Err(MultisigError::AlreadyInitialized);
    }

    if owners.len() < MIN_OWNERS {
        return Err(MultisigError::TooFewOwners);
    }
    validate_threshold(threshold, owners.len())?;

    for i in 0..owners.len() {
        let owner = owners.get_unchecked(i);
        if owners.first_index_of(&owner) != Some(i) {
            return Err(MultisigError::OwnerAlreadyExists);
        }
    }

    storage::save_owners(env, &owners);
    storage::save_threshold(env, threshold);
    storage::save_proposal_counter(env, 0);
    storage::save_pending_count(env, 0);

    emit_initialized(env, &owners, threshold);
    Ok(())
}

fn validate_threshold(threshold: u32, owner_count: u32) -> Result<(), MultisigError> {
    if threshold < MIN_THRESHOLD || threshold > owner_count {
        return Err(MultisigError::InvalidThreshold);
    }
    Ok(())
}

pub fn is_owner(env: &Env, identity: &Address) -> bool {
    storage::load_owners(env)
        .map(|owners| owners.contains(identity))
        .unwrap_or(false)
}

/// Fails with [`MultisigError::NotOwner`] unless `identity` is a current owner.
pub fn require_owner(env: &Env, identity: &Address) -> Result<(), MultisigError> {
    let owners = storage::load_owners(env)?;
    if !owners.contains(identity) {
        return Err(MultisigError::NotOwner);
    }
    Ok(())
}

pub fn owners(env: &Env) -> Result<Vec<Address>, MultisigError> {
    storage::load_owners(env)
}

pub fn owner_count(env: &Env) -> Result<u32, MultisigError> {
    Ok(storage::load_owners(env)?.len())
}

pub fn threshold(env: &Env) -> Result<u32, MultisigError> {
    storage::load_threshold(env)
}

pub(crate) fn add_owner(env: &Env, owner: Address) -> Result<(), MultisigError> {
    let mut owners = storage::load_owners(env)?;
    if owners.contains(&owner) {
        return Err(MultisigError::OwnerAlreadyExists);
    }
    owners.push_back(owner.clone());
    storage::save_owners(env, &owners);

    emit_owner_added(env, &owner);
    Ok(())
}

/// Removes `owner`, refusing any removal that would break a registry
/// invariant. The threshold is never lowered to make room.
pub(crate) fn remove_owner(env: &Env, owner: Address) -> Result<(), MultisigError> {
    let mut owners = storage::load_owners(env)?;
    let index = owners
        .first_index_of(&owner)
        .ok_or(MultisigError::OwnerNotFound)?;

    let remaining = owners.len() - 1;
    if remaining < MIN_OWNERS {
        return Err(MultisigError::TooFewOwners);
    }
    if storage::load_threshold(env)? > remaining {
        return Err(MultisigError::InvalidThreshold);
    }

    owners.remove(index);
    storage::save_owners(env, &owners);

    emit_owner_removed(env, &owner);
    Ok(())
}

pub(crate) fn set_threshold(env: &Env, threshold: u32) -> Result<(), MultisigError> {
    let owners = storage::load_owners(env)?;
    validate_threshold(threshold, owners.len())?;

    let old_threshold = storage::load_threshold(env)?;
    storage::save_threshold(env, threshold);

    emit_threshold_changed(env, old_threshold, threshold);
    Ok(())
}
