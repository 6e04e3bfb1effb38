use soroban_sdk::{contracttype, Address, Env, IntoVal, Symbol, Val, Vec};

// ========================================================================
// Registry bounds
// ========================================================================

/// Smallest owner set the registry will ever hold.
pub const MIN_OWNERS: u32 = 3;
/// Smallest confirmation threshold the registry will accept.
pub const MIN_THRESHOLD: u32 = 2;

// ========================================================================
// Governance calls (dispatched in-process when the target is the contract)
// ========================================================================

pub const ADD_OWNER: &str = "add_owner";
pub const REMOVE_OWNER: &str = "remove_owner";
pub const SET_THRESHOLD: &str = "set_threshold";

// ========================================================================
// Proposal Types
// ========================================================================

/// Opaque call descriptor forwarded to a proposal's target.
///
/// The engine never interprets `args` except for self-targeted governance
/// calls.
#[derive(Clone, Debug, PartialEq)]
#[contracttype]
pub struct Call {
    pub function: Symbol,
    pub args: Vec<Val>,
}

impl Call {
    pub fn new(function: Symbol, args: Vec<Val>) -> Self {
        Self { function, args }
    }

    /// Governance call adding `owner` to the registry.
    pub fn add_owner(env: &Env, owner: &Address) -> Self {
        Self::new(Symbol::new(env, ADD_OWNER), (owner.clone(),).into_val(env))
    }

    /// Governance call removing `owner` from the registry.
    pub fn remove_owner(env: &Env, owner: &Address) -> Self {
        Self::new(
            Symbol::new(env, REMOVE_OWNER),
            (owner.clone(),).into_val(env),
        )
    }

    /// Governance call replacing the confirmation threshold.
    pub fn set_threshold(env: &Env, threshold: u32) -> Self {
        Self::new(Symbol::new(env, SET_THRESHOLD), (threshold,).into_val(env))
    }
}

#[derive(Clone, Debug, PartialEq)]
#[contracttype]
pub struct Proposal {
    pub id: u64,
    pub target: Address,
    pub call: Call,
    /// Owner that submitted the proposal; fixed at submission.
    pub submitter: Address,
    pub executed: bool,
}

/// Lazily computed lifecycle of a proposal.
///
/// `Executable` is never stored: it is derived from the live confirmation
/// count and the current threshold, so a revocation or a threshold change
/// can move a proposal back to `Pending`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[contracttype]
pub enum ProposalStatus {
    Pending,
    Executable,
    Executed,
}
