//! # Execution Engine
//!
//! Validates a proposal and dispatches its call.
//!
//! ## Validation order
//! 1. the proposal exists ([`MultisigError::UnknownProposal`])
//! 2. it has not been executed ([`MultisigError::AlreadyExecuted`])
//! 3. live confirmations reach the *current* threshold
//!    ([`MultisigError::QuorumNotMet`])
//! 4. the submitter is still an owner ([`MultisigError::SubmitterRevoked`])
//!
//! ## Dispatch
//! The proposal is marked executed before control leaves the contract. If
//! the target rejects the call the mark is undone and the error is returned,
//! so the proposal can be executed again once the target accepts it.
//!
//! A call whose target is this contract is a governance call. It is applied
//! in-process against the registry, after passing exactly the same checks as
//! any treasury action.

use soroban_sdk::{log, Address, Env, Error, Symbol, TryFromVal, Val, Vec};

use crate::confirmation;
use crate::errors::MultisigError;
use crate::events::emit_executed;
use crate::proposal;
use crate::reentrancy::ReentrancyGuard;
use crate::registry;
use crate::storage;
use crate::types::{Call, ProposalStatus, ADD_OWNER, REMOVE_OWNER, SET_THRESHOLD};

/// Executes proposal `id` on behalf of `executor`, who need not be an owner.
pub fn execute(env: &Env, executor: Address, id: u64) -> Result<(), MultisigError> {
    let _guard = ReentrancyGuard::new(env)?;

    let mut proposal = storage::load_proposal(env, id)?;
    if proposal.executed {
        return Err(MultisigError::AlreadyExecuted);
    }
    if confirmation::confirmation_count(env, id) < registry::threshold(env)? {
        return Err(MultisigError::QuorumNotMet);
    }
    if !registry::is_owner(env, &proposal.submitter) {
        return Err(MultisigError::SubmitterRevoked);
    }

    proposal::mark_executed(env, &mut proposal);

    if let Err(err) = dispatch(env, &proposal.target, &proposal.call) {
        proposal::unmark_executed(env, &mut proposal);
        log!(env, "execute_transaction id={} dispatch failed", id);
        return Err(err);
    }

    emit_executed(env, id, &executor);
    log!(env, "execute_transaction id={} executor={}", id, executor);
    Ok(())
}

/// Current lifecycle state of proposal `id`.
pub fn status(env: &Env, id: u64) -> Result<ProposalStatus, MultisigError> {
    let proposal = storage::load_proposal(env, id)?;
    if proposal.executed {
        return Ok(ProposalStatus::Executed);
    }
    if confirmation::confirmation_count(env, id) >= registry::threshold(env)? {
        Ok(ProposalStatus::Executable)
    } else {
        Ok(ProposalStatus::Pending)
    }
}

fn dispatch(env: &Env, target: &Address, call: &Call) -> Result<(), MultisigError> {
    if *target == env.current_contract_address() {
        return apply_governance(env, call);
    }

    match env.try_invoke_contract::<Val, Error>(target, &call.function, call.args.clone()) {
        Ok(Ok(_)) => Ok(()),
        _ => Err(MultisigError::DispatchFailed),
    }
}

fn apply_governance(env: &Env, call: &Call) -> Result<(), MultisigError> {
    if call.function == Symbol::new(env, ADD_OWNER) {
        registry::add_owner(env, single_arg(env, &call.args)?)
    } else if call.function == Symbol::new(env, REMOVE_OWNER) {
        registry::remove_owner(env, single_arg(env, &call.args)?)
    } else if call.function == Symbol::new(env, SET_THRESHOLD) {
        registry::set_threshold(env, single_arg(env, &call.args)?)
    } else {
        Err(MultisigError::UnsupportedGovernanceCall)
    }
}

fn single_arg<T: TryFromVal<Env, Val>>(env: &Env, args: &Vec<Val>) -> Result<T, MultisigError> {
    if args.len() != 1 {
        return Err(MultisigError::InvalidPayload);
    }
    let raw = args.get(0).ok_or(MultisigError::InvalidPayload)?;
    T::try_from_val(env, &raw).map_err(|_| MultisigError::InvalidPayload)
}
