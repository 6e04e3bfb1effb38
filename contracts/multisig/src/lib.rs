//! # Multisig Treasury Contract
//!
//! A fixed but evolvable set of owners jointly authorizes arbitrary calls
//! made by this contract: token transfers out of the treasury, calls into
//! other contracts, and changes to the owner set itself.
//!
//! ## Flow
//! 1. An owner submits a proposal with [`MultisigContract::submit_transaction`].
//! 2. Owners confirm ([`MultisigContract::confirm_transaction`]) or withdraw
//!    a confirmation ([`MultisigContract::revoke_transaction`]).
//! 3. Once live confirmations reach the threshold, anyone may call
//!    [`MultisigContract::execute_transaction`].
//!
//! Governance changes (adding/removing owners, changing the threshold) are
//! proposals targeting this contract's own address. They go through the
//! same quorum and submitter checks as any other proposal; there is no
//! other way to mutate the owner registry.

#![no_std]
#![allow(deprecated)]

use soroban_sdk::{contract, contractimpl, Address, Env, Vec};

mod confirmation;
mod errors;
mod events;
mod execution;
mod proposal;
mod reentrancy;
mod registry;
mod storage;
mod types;

pub use errors::MultisigError;
pub use events::{
    ConfirmationRevokedEvent, MultisigInitializedEvent, OwnerAddedEvent, OwnerRemovedEvent,
    ProposalConfirmedEvent, ProposalExecutedEvent, ProposalSubmittedEvent, ThresholdChangedEvent,
};
pub use types::{
    Call, Proposal, ProposalStatus, ADD_OWNER, MIN_OWNERS, MIN_THRESHOLD, REMOVE_OWNER,
    SET_THRESHOLD,
};

#[cfg(test)]
mod tests;

/// The multisig treasury contract.
#[contract]
pub struct MultisigContract;

#[contractimpl]
impl MultisigContract {
    /// Install the owner set and confirmation threshold.
    ///
    /// # Arguments
    /// * `owners` - Initial owners; at least [`MIN_OWNERS`], no duplicates
    /// * `threshold` - Confirmations required; `MIN_THRESHOLD..=owners.len()`
    ///
    /// # Errors
    /// - `AlreadyInitialized` - Called a second time
    /// - `TooFewOwners` - Fewer than three owners, whatever the threshold
    /// - `InvalidThreshold` - Threshold out of range
    /// - `OwnerAlreadyExists` - An owner is listed twice
    pub fn initialize(env: Env, owners: Vec<Address>, threshold: u32) -> Result<(), MultisigError> {
        registry::initialize(&env, owners, threshold)
    }

    // ── Proposals ─────────────────────────────────────────────────────────────

    /// Submit a proposal to invoke `call` on `target`.
    ///
    /// Target this contract's own address with [`Call::add_owner`],
    /// [`Call::remove_owner`] or [`Call::set_threshold`] to change the
    /// registry.
    ///
    /// # Returns
    /// The new proposal id
    ///
    /// # Errors
    /// - `NotOwner` - `submitter` is not an owner
    pub fn submit_transaction(
        env: Env,
        submitter: Address,
        target: Address,
        call: Call,
    ) -> Result<u64, MultisigError> {
        submitter.require_auth();
        proposal::submit(&env, submitter, target, call)
    }

    /// Confirm proposal `id` as `owner`. Confirming twice is a no-op.
    ///
    /// # Errors
    /// - `NotOwner` - `owner` is not an owner
    /// - `UnknownProposal` - No such proposal
    /// - `AlreadyExecuted` - The proposal was executed
    pub fn confirm_transaction(env: Env, owner: Address, id: u64) -> Result<(), MultisigError> {
        owner.require_auth();
        confirmation::confirm(&env, id, owner)
    }

    /// Withdraw `owner`'s confirmation of proposal `id`, if any.
    ///
    /// # Errors
    /// - `NotOwner` - `owner` is not an owner
    /// - `UnknownProposal` - No such proposal
    /// - `AlreadyExecuted` - The proposal was executed
    pub fn revoke_transaction(env: Env, owner: Address, id: u64) -> Result<(), MultisigError> {
        owner.require_auth();
        confirmation::revoke(&env, id, owner)
    }

    /// Execute proposal `id`. Anyone may call this; `executor` is recorded
    /// in the execution event.
    ///
    /// # Errors
    /// - `UnknownProposal` - No such proposal
    /// - `AlreadyExecuted` - The proposal was executed
    /// - `QuorumNotMet` - Too few live confirmations for the current threshold
    /// - `SubmitterRevoked` - The submitter is no longer an owner
    /// - `DispatchFailed` - The target rejected the call; the proposal stays
    ///   executable
    /// - `Reentrancy` - Called from inside another execution
    /// - Registry errors for governance calls
    pub fn execute_transaction(env: Env, executor: Address, id: u64) -> Result<(), MultisigError> {
        executor.require_auth();
        execution::execute(&env, executor, id)
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    pub fn is_owner(env: Env, identity: Address) -> bool {
        registry::is_owner(&env, &identity)
    }

    pub fn owners(env: Env) -> Result<Vec<Address>, MultisigError> {
        registry::owners(&env)
    }

    pub fn owner_count(env: Env) -> Result<u32, MultisigError> {
        registry::owner_count(&env)
    }

    pub fn threshold(env: Env) -> Result<u32, MultisigError> {
        registry::threshold(&env)
    }

    /// Last allocated proposal id, `0` before the first submission.
    pub fn current_proposal_id(env: Env) -> u64 {
        proposal::current_proposal_id(&env)
    }

    /// Number of proposals not yet executed.
    pub fn pending_count(env: Env) -> u64 {
        proposal::pending_count(&env)
    }

    pub fn get_proposal(env: Env, id: u64) -> Result<Proposal, MultisigError> {
        proposal::get(&env, id)
    }

    /// Lifecycle state of proposal `id`, computed against the current
    /// threshold.
    pub fn proposal_status(env: Env, id: u64) -> Result<ProposalStatus, MultisigError> {
        execution::status(&env, id)
    }

    /// Live confirmation count: confirmers that are still owners.
    pub fn confirmation_count(env: Env, id: u64) -> u32 {
        confirmation::confirmation_count(&env, id)
    }

    pub fn confirmations(env: Env, id: u64) -> Vec<Address> {
        confirmation::confirmations(&env, id)
    }

    pub fn is_confirmed(env: Env, id: u64, owner: Address) -> bool {
        confirmation::is_confirmed(&env, id, &owner)
    }
}
