use soroban_sdk::contracterror;

/// Errors returned by the multisig treasury.
///
/// Codes are part of the contract interface and must stay stable:
/// off-chain tooling matches on `Error(Contract, #n)`.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum MultisigError {
    // Construction
    /// `initialize` was already called
    AlreadyInitialized = 1,
    /// The contract has not been initialized yet
    NotInitialized = 2,
    /// Owner set would be smaller than [`crate::types::MIN_OWNERS`]
    TooFewOwners = 3,
    /// Threshold outside `MIN_THRESHOLD..=owner_count`
    InvalidThreshold = 4,

    // Registry
    /// Identity is already an owner (or listed twice at construction)
    OwnerAlreadyExists = 5,
    /// Identity is not an owner
    OwnerNotFound = 6,

    /// A dispatch target called back into `execute_transaction`
    Reentrancy = 7,

    // Authorization
    /// Caller is not a current owner
    NotOwner = 8,
    /// The proposal's submitter has since been removed from the owner set
    SubmitterRevoked = 9,

    // Proposal state
    /// No proposal with this id
    UnknownProposal = 10,
    /// The proposal has already been executed
    AlreadyExecuted = 11,
    /// Fewer active confirmations than the current threshold
    QuorumNotMet = 12,
    /// Proposal id counter exhausted
    CounterOverflow = 13,

    // Dispatch
    /// The target contract rejected the call
    DispatchFailed = 14,
    /// Self-targeted call names a function other than the governance calls
    UnsupportedGovernanceCall = 15,
    /// Governance call arguments are missing or of the wrong type
    InvalidPayload = 16,
}
