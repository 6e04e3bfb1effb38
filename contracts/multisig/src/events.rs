//! # Multisig Treasury – Events
//!
//! Every state transition of the treasury publishes one `#[contractevent]`.
//! The snake_case struct name is the leading topic; the proposal id (and the
//! owner, where one is involved) are extra topics so indexers can filter on
//! them without decoding the data payload.
use soroban_sdk::{contractevent, Address, Env, Symbol, Vec};

/// Emitted once, when the owner set and threshold are first installed.
#[contractevent]
#[derive(Clone, Debug)]
pub struct MultisigInitializedEvent {
    pub owners: Vec<Address>,
    pub threshold: u32,
}

/// Emitted when an owner submits a new proposal.
#[contractevent]
#[derive(Clone, Debug)]
pub struct ProposalSubmittedEvent {
    #[topic]
    pub id: u64,
    #[topic]
    pub submitter: Address,
    pub target: Address,
    pub function: Symbol,
}

/// Emitted when an owner adds a confirmation. Re-confirmations emit nothing.
#[contractevent]
#[derive(Clone, Debug)]
pub struct ProposalConfirmedEvent {
    #[topic]
    pub id: u64,
    #[topic]
    pub owner: Address,
}

/// Emitted when an owner withdraws an active confirmation.
#[contractevent]
#[derive(Clone, Debug)]
pub struct ConfirmationRevokedEvent {
    #[topic]
    pub id: u64,
    #[topic]
    pub owner: Address,
}

/// Emitted after a proposal has been dispatched successfully.
#[contractevent]
#[derive(Clone, Debug)]
pub struct ProposalExecutedEvent {
    #[topic]
    pub id: u64,
    pub executor: Address,
}

#[contractevent]
#[derive(Clone, Debug)]
pub struct OwnerAddedEvent {
    #[topic]
    pub owner: Address,
}

#[contractevent]
#[derive(Clone, Debug)]
pub struct OwnerRemovedEvent {
    #[topic]
    pub owner: Address,
}

#[contractevent]
#[derive(Clone, Debug)]
pub struct ThresholdChangedEvent {
    pub old_threshold: u32,
    pub new_threshold: u32,
}

pub fn emit_initialized(env: &Env, owners: &Vec<Address>, threshold: u32) {
    MultisigInitializedEvent {
        owners: owners.clone(),
        threshold,
    }
    .publish(env);
}

pub fn emit_submitted(env: &Env, id: u64, submitter: &Address, target: &Address, function: &Symbol) {
    ProposalSubmittedEvent {
        id,
        submitter: submitter.clone(),
        target: target.clone(),
        function: function.clone(),
    }
    .publish(env);
}

pub fn emit_confirmed(env: &Env, id: u64, owner: &Address) {
    ProposalConfirmedEvent {
        id,
        owner: owner.clone(),
    }
    .publish(env);
}

pub fn emit_revoked(env: &Env, id: u64, owner: &Address) {
    ConfirmationRevokedEvent {
        id,
        owner: owner.clone(),
    }
    .publish(env);
}

pub fn emit_executed(env: &Env, id: u64, executor: &Address) {
    ProposalExecutedEvent {
        id,
        executor: executor.clone(),
    }
    .publish(env);
}

pub fn emit_owner_added(env: &Env, owner: &Address) {
    OwnerAddedEvent {
        owner: owner.clone(),
    }
    .publish(env);
}

pub fn emit_owner_removed(env: &Env, owner: &Address) {
    OwnerRemovedEvent {
        owner: owner.clone(),
    }
    .publish(env);
}

pub fn emit_threshold_changed(env: &Env, old_threshold: u32, new_threshold: u32) {
    ThresholdChangedEvent {
        old_threshold,
        new_threshold,
    }
    .publish(env);
}
