//! Execution engine: validation order, dispatch, retry and at-most-once.

use soroban_sdk::{testutils::Address as _, vec, Address, IntoVal, Symbol};

use super::test_helpers::{
    balance, confirm_by, create_token, mint, owner, propose_governance, setup, transfer_call,
    CountingTarget, CountingTargetClient, MembershipAuthority, MembershipAuthorityClient,
    ReentrantTarget, ReentrantTargetClient,
};
use crate::reentrancy::ReentrancyGuard;
use crate::{Call, MultisigError, ProposalStatus};

#[test]
fn test_execute_token_transfer() {
    let (env, client, owners) = setup(5, 3);
    let token = create_token(&env, &client.address, 10_000);
    let recipient = Address::generate(&env);

    let id = client.submit_transaction(
        &owner(&owners, 0),
        &token,
        &transfer_call(&env, &client.address, &recipient, 4_000),
    );
    confirm_by(&client, &owners, id, 3);
    client.execute_transaction(&owner(&owners, 4), &id);

    assert_eq!(balance(&env, &token, &recipient), 4_000);
    assert_eq!(balance(&env, &token, &client.address), 6_000);
    assert!(client.get_proposal(&id).executed);
    assert_eq!(client.proposal_status(&id), ProposalStatus::Executed);
    assert_eq!(client.pending_count(), 0);
}

#[test]
fn test_executor_need_not_be_owner() {
    let (env, client, owners) = setup(3, 2);
    let target = env.register(CountingTarget, ());
    let id = client.submit_transaction(
        &owner(&owners, 0),
        &target,
        &Call::new(Symbol::new(&env, "ping"), vec![&env]),
    );
    confirm_by(&client, &owners, id, 2);

    client.execute_transaction(&Address::generate(&env), &id);

    assert_eq!(CountingTargetClient::new(&env, &target).hits(), 1);
}

#[test]
fn test_second_execution_rejected() {
    let (env, client, owners) = setup(3, 2);
    let target = env.register(CountingTarget, ());
    let id = client.submit_transaction(
        &owner(&owners, 0),
        &target,
        &Call::new(Symbol::new(&env, "ping"), vec![&env]),
    );
    confirm_by(&client, &owners, id, 2);
    client.execute_transaction(&owner(&owners, 0), &id);

    assert_eq!(
        client.try_execute_transaction(&owner(&owners, 1), &id),
        Err(Ok(MultisigError::AlreadyExecuted))
    );
    assert_eq!(CountingTargetClient::new(&env, &target).hits(), 1);
    assert_eq!(client.pending_count(), 0);
}

#[test]
fn test_executed_proposal_is_frozen() {
    let (env, client, owners) = setup(3, 2);
    let target = env.register(CountingTarget, ());
    let id = client.submit_transaction(
        &owner(&owners, 0),
        &target,
        &Call::new(Symbol::new(&env, "ping"), vec![&env]),
    );
    confirm_by(&client, &owners, id, 2);
    client.execute_transaction(&owner(&owners, 0), &id);

    assert_eq!(
        client.try_confirm_transaction(&owner(&owners, 2), &id),
        Err(Ok(MultisigError::AlreadyExecuted))
    );
    assert_eq!(
        client.try_revoke_transaction(&owner(&owners, 0), &id),
        Err(Ok(MultisigError::AlreadyExecuted))
    );
    assert_eq!(client.confirmation_count(&id), 2);
}

#[test]
fn test_unknown_proposal() {
    let (env, client, _owners) = setup(3, 2);
    assert_eq!(
        client.try_execute_transaction(&Address::generate(&env), &7),
        Err(Ok(MultisigError::UnknownProposal))
    );
}

#[test]
fn test_quorum_not_met() {
    let (env, client, owners) = setup(5, 3);
    let token = create_token(&env, &client.address, 1_000);
    let recipient = Address::generate(&env);
    let id = client.submit_transaction(
        &owner(&owners, 0),
        &token,
        &transfer_call(&env, &client.address, &recipient, 1_000),
    );
    confirm_by(&client, &owners, id, 2);

    assert_eq!(
        client.try_execute_transaction(&owner(&owners, 0), &id),
        Err(Ok(MultisigError::QuorumNotMet))
    );
    assert_eq!(balance(&env, &token, &recipient), 0);
    assert!(!client.get_proposal(&id).executed);
}

#[test]
fn test_revocation_drops_quorum() {
    let (env, client, owners) = setup(5, 3);
    let target = env.register(CountingTarget, ());
    let id = client.submit_transaction(
        &owner(&owners, 0),
        &target,
        &Call::new(Symbol::new(&env, "ping"), vec![&env]),
    );
    confirm_by(&client, &owners, id, 3);
    client.revoke_transaction(&owner(&owners, 2), &id);

    assert_eq!(
        client.try_execute_transaction(&owner(&owners, 0), &id),
        Err(Ok(MultisigError::QuorumNotMet))
    );

    client.confirm_transaction(&owner(&owners, 3), &id);
    client.execute_transaction(&owner(&owners, 0), &id);
    assert_eq!(CountingTargetClient::new(&env, &target).hits(), 1);
}

#[test]
fn test_quorum_checked_before_submitter() {
    let (env, client, owners) = setup(5, 3);
    let o0 = owner(&owners, 0);
    let o4 = owner(&owners, 4);
    let target = env.register(CountingTarget, ());
    let id = client.submit_transaction(
        &o4,
        &target,
        &Call::new(Symbol::new(&env, "ping"), vec![&env]),
    );

    let removal = propose_governance(&client, &owners, &o0, &Call::remove_owner(&env, &o4), 3);
    client.execute_transaction(&o0, &removal);

    assert_eq!(
        client.try_execute_transaction(&o0, &id),
        Err(Ok(MultisigError::QuorumNotMet))
    );

    confirm_by(&client, &owners, id, 3);
    assert_eq!(
        client.try_execute_transaction(&o0, &id),
        Err(Ok(MultisigError::SubmitterRevoked))
    );
    assert_eq!(CountingTargetClient::new(&env, &target).hits(), 0);
}

#[test]
fn test_dispatch_failure_leaves_proposal_retryable() {
    let (env, client, owners) = setup(5, 3);
    let token = create_token(&env, &client.address, 500);
    let recipient = Address::generate(&env);
    let id = client.submit_transaction(
        &owner(&owners, 0),
        &token,
        &transfer_call(&env, &client.address, &recipient, 1_000),
    );
    confirm_by(&client, &owners, id, 3);

    assert_eq!(
        client.try_execute_transaction(&owner(&owners, 1), &id),
        Err(Ok(MultisigError::DispatchFailed))
    );
    assert!(!client.get_proposal(&id).executed);
    assert_eq!(client.proposal_status(&id), ProposalStatus::Executable);
    assert_eq!(client.pending_count(), 1);
    assert_eq!(balance(&env, &token, &client.address), 500);

    mint(&env, &token, &client.address, 500);
    client.execute_transaction(&owner(&owners, 1), &id);

    assert_eq!(balance(&env, &token, &recipient), 1_000);
    assert_eq!(balance(&env, &token, &client.address), 0);
    assert_eq!(client.pending_count(), 0);
}

#[test]
fn test_dispatch_to_missing_function_fails() {
    let (env, client, owners) = setup(3, 2);
    let target = env.register(CountingTarget, ());
    let id = client.submit_transaction(
        &owner(&owners, 0),
        &target,
        &Call::new(Symbol::new(&env, "does_not_exist"), vec![&env]),
    );
    confirm_by(&client, &owners, id, 2);

    assert_eq!(
        client.try_execute_transaction(&owner(&owners, 0), &id),
        Err(Ok(MultisigError::DispatchFailed))
    );
    assert_eq!(client.proposal_status(&id), ProposalStatus::Executable);
}

#[test]
fn test_generic_contract_call() {
    let (env, client, owners) = setup(5, 3);
    let authority = env.register(MembershipAuthority, ());
    let authority_client = MembershipAuthorityClient::new(&env, &authority);
    authority_client.init(&client.address);
    let member = Address::generate(&env);

    let call = Call::new(
        Symbol::new(&env, "add_to_whitelist"),
        (client.address.clone(), member.clone()).into_val(&env),
    );
    let id = client.submit_transaction(&owner(&owners, 1), &authority, &call);
    confirm_by(&client, &owners, id, 3);
    client.execute_transaction(&owner(&owners, 2), &id);

    assert!(authority_client.is_whitelisted(&member));
}

#[test]
fn test_target_error_maps_to_dispatch_failed() {
    let (env, client, owners) = setup(5, 3);
    let authority = env.register(MembershipAuthority, ());
    MembershipAuthorityClient::new(&env, &authority).init(&Address::generate(&env));
    let member = Address::generate(&env);

    // The treasury is not the authority's admin.
    let call = Call::new(
        Symbol::new(&env, "add_to_whitelist"),
        (client.address.clone(), member.clone()).into_val(&env),
    );
    let id = client.submit_transaction(&owner(&owners, 1), &authority, &call);
    confirm_by(&client, &owners, id, 3);

    assert_eq!(
        client.try_execute_transaction(&owner(&owners, 2), &id),
        Err(Ok(MultisigError::DispatchFailed))
    );
    assert!(!MembershipAuthorityClient::new(&env, &authority).is_whitelisted(&member));
}

#[test]
fn test_reentrant_execute_rejected() {
    let (env, client, owners) = setup(3, 2);
    let attacker = env.register(ReentrantTarget, ());
    let executor = owner(&owners, 0);

    // Proposal 1 makes the target call back into execute_transaction(1).
    let call = Call::new(
        Symbol::new(&env, "reenter"),
        (client.address.clone(), executor.clone(), 1u64).into_val(&env),
    );
    let id = client.submit_transaction(&executor, &attacker, &call);
    assert_eq!(id, 1);
    confirm_by(&client, &owners, id, 2);

    client.execute_transaction(&executor, &id);

    assert!(ReentrantTargetClient::new(&env, &attacker).rejected());
    assert!(client.get_proposal(&id).executed);
    assert_eq!(client.pending_count(), 0);
}

#[test]
fn test_guard_blocks_nested_acquire_and_releases_on_drop() {
    let (env, client, _owners) = setup(3, 2);

    env.as_contract(&client.address, || {
        assert!(!ReentrancyGuard::is_held(&env));
        {
            let _guard = ReentrancyGuard::new(&env).unwrap();
            assert!(ReentrancyGuard::is_held(&env));
            assert_eq!(
                ReentrancyGuard::new(&env).err(),
                Some(MultisigError::Reentrancy)
            );
        }
        assert!(!ReentrancyGuard::is_held(&env));
        assert!(ReentrancyGuard::new(&env).is_ok());
    });
}

#[test]
fn test_guard_released_after_failed_execution() {
    let (env, client, owners) = setup(3, 2);
    let target = env.register(CountingTarget, ());
    let id = client.submit_transaction(
        &owner(&owners, 0),
        &target,
        &Call::new(Symbol::new(&env, "ping"), vec![&env]),
    );

    assert!(client.try_execute_transaction(&owner(&owners, 0), &id).is_err());
    env.as_contract(&client.address, || {
        assert!(!ReentrancyGuard::is_held(&env));
    });

    confirm_by(&client, &owners, id, 2);
    client.execute_transaction(&owner(&owners, 0), &id);
    assert_eq!(CountingTargetClient::new(&env, &target).hits(), 1);
}
