//! Registry changes made through self-targeted proposals.
//!
//! # Coverage
//! - add_owner / remove_owner / set_threshold applied on execution
//! - Registry invariants enforced at execution time; the proposal stays
//!   executable when a change is rejected
//! - Threshold and owner changes are picked up by proposals already in flight
//! - Malformed or unknown self-targeted calls
//! - Registry mutators are not reachable as entry points

use soroban_sdk::{testutils::Address as _, vec, Address, Error, IntoVal, Symbol, Val};

use super::test_helpers::{
    confirm_by, owner, propose_governance, setup, CountingTarget, CountingTargetClient,
};
use crate::{Call, MultisigError, ProposalStatus};

#[test]
fn test_add_owner() {
    let (env, client, owners) = setup(5, 3);
    let newcomer = Address::generate(&env);
    let o0 = owner(&owners, 0);

    let id = propose_governance(&client, &owners, &o0, &Call::add_owner(&env, &newcomer), 3);
    assert!(!client.is_owner(&newcomer));

    client.execute_transaction(&o0, &id);

    assert!(client.is_owner(&newcomer));
    assert_eq!(client.owner_count(), 6);
    assert_eq!(client.threshold(), 3);
}

#[test]
fn test_new_owner_can_participate() {
    let (env, client, owners) = setup(3, 2);
    let newcomer = Address::generate(&env);
    let o0 = owner(&owners, 0);
    let id = propose_governance(&client, &owners, &o0, &Call::add_owner(&env, &newcomer), 2);
    client.execute_transaction(&o0, &id);

    let target = env.register(CountingTarget, ());
    let ping = client.submit_transaction(
        &newcomer,
        &target,
        &Call::new(Symbol::new(&env, "ping"), vec![&env]),
    );
    client.confirm_transaction(&newcomer, &ping);
    client.confirm_transaction(&o0, &ping);
    client.execute_transaction(&newcomer, &ping);

    assert_eq!(CountingTargetClient::new(&env, &target).hits(), 1);
}

#[test]
fn test_add_existing_owner_rejected() {
    let (env, client, owners) = setup(5, 3);
    let o0 = owner(&owners, 0);
    let id = propose_governance(&client, &owners, &o0, &Call::add_owner(&env, &owner(&owners, 3)), 3);

    assert_eq!(
        client.try_execute_transaction(&o0, &id),
        Err(Ok(MultisigError::OwnerAlreadyExists))
    );
    assert_eq!(client.owner_count(), 5);
    assert_eq!(client.proposal_status(&id), ProposalStatus::Executable);
    assert_eq!(client.pending_count(), 1);
}

#[test]
fn test_remove_owner() {
    let (env, client, owners) = setup(5, 3);
    let o0 = owner(&owners, 0);
    let leaving = owner(&owners, 4);

    let id = propose_governance(&client, &owners, &o0, &Call::remove_owner(&env, &leaving), 3);
    client.execute_transaction(&o0, &id);

    assert!(!client.is_owner(&leaving));
    assert_eq!(client.owner_count(), 4);
}

#[test]
fn test_remove_unknown_owner_rejected() {
    let (env, client, owners) = setup(5, 3);
    let o0 = owner(&owners, 0);
    let stranger = Address::generate(&env);
    let id = propose_governance(&client, &owners, &o0, &Call::remove_owner(&env, &stranger), 3);

    assert_eq!(
        client.try_execute_transaction(&o0, &id),
        Err(Ok(MultisigError::OwnerNotFound))
    );
}

#[test]
fn test_remove_below_minimum_owners_rejected() {
    let (env, client, owners) = setup(3, 2);
    let o0 = owner(&owners, 0);
    let id = propose_governance(&client, &owners, &o0, &Call::remove_owner(&env, &owner(&owners, 2)), 2);

    assert_eq!(
        client.try_execute_transaction(&o0, &id),
        Err(Ok(MultisigError::TooFewOwners))
    );
    assert_eq!(client.owner_count(), 3);
}

#[test]
fn test_remove_below_threshold_rejected() {
    let (env, client, owners) = setup(4, 4);
    let o0 = owner(&owners, 0);
    let id = propose_governance(&client, &owners, &o0, &Call::remove_owner(&env, &owner(&owners, 3)), 4);

    assert_eq!(
        client.try_execute_transaction(&o0, &id),
        Err(Ok(MultisigError::InvalidThreshold))
    );
    assert_eq!(client.owner_count(), 4);
    assert_eq!(client.threshold(), 4);
}

#[test]
fn test_set_threshold() {
    let (env, client, owners) = setup(5, 3);
    let o0 = owner(&owners, 0);
    let id = propose_governance(&client, &owners, &o0, &Call::set_threshold(&env, 4), 3);

    client.execute_transaction(&o0, &id);
    assert_eq!(client.threshold(), 4);
}

#[test]
fn test_set_threshold_out_of_range_rejected() {
    let (env, client, owners) = setup(5, 3);
    let o0 = owner(&owners, 0);

    let too_low = propose_governance(&client, &owners, &o0, &Call::set_threshold(&env, 1), 3);
    assert_eq!(
        client.try_execute_transaction(&o0, &too_low),
        Err(Ok(MultisigError::InvalidThreshold))
    );

    let too_high = propose_governance(&client, &owners, &o0, &Call::set_threshold(&env, 6), 3);
    assert_eq!(
        client.try_execute_transaction(&o0, &too_high),
        Err(Ok(MultisigError::InvalidThreshold))
    );
    assert_eq!(client.threshold(), 3);
}

#[test]
fn test_raised_threshold_applies_to_pending_proposals() {
    let (env, client, owners) = setup(5, 3);
    let o0 = owner(&owners, 0);
    let target = env.register(CountingTarget, ());
    let ping = client.submit_transaction(
        &o0,
        &target,
        &Call::new(Symbol::new(&env, "ping"), vec![&env]),
    );
    confirm_by(&client, &owners, ping, 3);
    assert_eq!(client.proposal_status(&ping), ProposalStatus::Executable);

    let raise = propose_governance(&client, &owners, &o0, &Call::set_threshold(&env, 4), 3);
    client.execute_transaction(&o0, &raise);

    assert_eq!(client.proposal_status(&ping), ProposalStatus::Pending);
    assert_eq!(
        client.try_execute_transaction(&o0, &ping),
        Err(Ok(MultisigError::QuorumNotMet))
    );

    client.confirm_transaction(&owner(&owners, 3), &ping);
    client.execute_transaction(&o0, &ping);
    assert_eq!(CountingTargetClient::new(&env, &target).hits(), 1);
}

#[test]
fn test_removed_owner_confirmation_stops_counting() {
    let (env, client, owners) = setup(5, 3);
    let o0 = owner(&owners, 0);
    let o2 = owner(&owners, 2);
    let target = env.register(CountingTarget, ());
    let ping = client.submit_transaction(
        &o0,
        &target,
        &Call::new(Symbol::new(&env, "ping"), vec![&env]),
    );
    confirm_by(&client, &owners, ping, 3);

    let removal = propose_governance(&client, &owners, &o0, &Call::remove_owner(&env, &o2), 3);
    client.execute_transaction(&o0, &removal);

    assert_eq!(client.confirmation_count(&ping), 2);
    assert_eq!(
        client.try_execute_transaction(&o0, &ping),
        Err(Ok(MultisigError::QuorumNotMet))
    );
}

#[test]
fn test_readded_owner_confirmation_counts_again() {
    let (env, client, owners) = setup(5, 3);
    let o0 = owner(&owners, 0);
    let o2 = owner(&owners, 2);
    let target = env.register(CountingTarget, ());
    let ping = client.submit_transaction(
        &o0,
        &target,
        &Call::new(Symbol::new(&env, "ping"), vec![&env]),
    );
    confirm_by(&client, &owners, ping, 3);

    let removal = propose_governance(&client, &owners, &o0, &Call::remove_owner(&env, &o2), 2);
    client.confirm_transaction(&owner(&owners, 3), &removal);
    client.execute_transaction(&o0, &removal);
    assert_eq!(client.confirmation_count(&ping), 2);

    let readd = propose_governance(&client, &owners, &o0, &Call::add_owner(&env, &o2), 2);
    client.confirm_transaction(&owner(&owners, 3), &readd);
    client.execute_transaction(&o0, &readd);

    assert_eq!(client.confirmation_count(&ping), 3);
    client.execute_transaction(&o0, &ping);
}

#[test]
fn test_unsupported_self_call_rejected() {
    let (env, client, owners) = setup(3, 2);
    let o0 = owner(&owners, 0);
    let call = Call::new(Symbol::new(&env, "upgrade"), vec![&env]);
    let id = propose_governance(&client, &owners, &o0, &call, 2);

    assert_eq!(
        client.try_execute_transaction(&o0, &id),
        Err(Ok(MultisigError::UnsupportedGovernanceCall))
    );
}

#[test]
fn test_malformed_governance_payload_rejected() {
    let (env, client, owners) = setup(3, 2);
    let o0 = owner(&owners, 0);

    let wrong_type = Call::new(Symbol::new(&env, "add_owner"), (7u32,).into_val(&env));
    let id = propose_governance(&client, &owners, &o0, &wrong_type, 2);
    assert_eq!(
        client.try_execute_transaction(&o0, &id),
        Err(Ok(MultisigError::InvalidPayload))
    );

    let missing = Call::new(Symbol::new(&env, "set_threshold"), vec![&env]);
    let id = propose_governance(&client, &owners, &o0, &missing, 2);
    assert_eq!(
        client.try_execute_transaction(&o0, &id),
        Err(Ok(MultisigError::InvalidPayload))
    );

    let extra = Call::new(Symbol::new(&env, "set_threshold"), (2u32, 3u32).into_val(&env));
    let id = propose_governance(&client, &owners, &o0, &extra, 2);
    assert_eq!(
        client.try_execute_transaction(&o0, &id),
        Err(Ok(MultisigError::InvalidPayload))
    );
}

#[test]
fn test_governance_needs_quorum() {
    let (env, client, owners) = setup(5, 3);
    let o0 = owner(&owners, 0);
    let intruder = Address::generate(&env);
    let id = propose_governance(&client, &owners, &o0, &Call::add_owner(&env, &intruder), 2);

    assert_eq!(
        client.try_execute_transaction(&o0, &id),
        Err(Ok(MultisigError::QuorumNotMet))
    );
    assert!(!client.is_owner(&intruder));
}

#[test]
fn test_registry_mutators_not_exposed() {
    let (env, client, _owners) = setup(3, 2);
    let intruder = Address::generate(&env);

    for name in ["add_owner", "remove_owner", "set_threshold"] {
        let res = env.try_invoke_contract::<Val, Error>(
            &client.address,
            &Symbol::new(&env, name),
            (intruder.clone(),).into_val(&env),
        );
        assert!(res.is_err());
    }
    assert!(!client.is_owner(&intruder));
    assert_eq!(client.owner_count(), 3);
}
