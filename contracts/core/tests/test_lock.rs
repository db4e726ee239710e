mod common;

use common::*;
use riptide_core::{Action, ActionResult, RiptideCore, RiptideCoreClient};
use riptide_types::RiptideError;
use soroban_sdk::{testutils::Address as _, Address, Env};

// ============================================================
// INITIALIZATION AND REGISTRATION
// ============================================================

#[test]
fn test_initialization_success() {
    let env = Env::default();
    let setup = setup_core(&env);

    let config = setup.core.get_pool_config(&setup.pool.address);
    assert_eq!(config.token0, setup.token0);
    assert_eq!(config.token1, setup.token1);
    assert!(config.twamm_enabled);
    assert!(!setup.core.get_pool_config(&setup.plain_pool.address).twamm_enabled);

    // One lock per seeded pool
    assert_eq!(setup.core.get_next_lock_id(), 2);
}

#[test]
#[should_panic(expected = "Error(Contract, #600)")]
fn test_double_initialization() {
    let env = Env::default();
    let setup = setup_core(&env);

    setup.core.initialize(&setup.admin);
}

#[test]
fn test_lock_requires_initialization() {
    let env = Env::default();
    env.mock_all_auths();

    let core_id = env.register(RiptideCore, ());
    let core = RiptideCoreClient::new(&env, &core_id);
    let locker = Address::generate(&env);

    let result = core.try_lock(&locker, &actions(&env, &[]));
    assert_eq!(result, Err(Ok(RiptideError::NotInitialized)));
}

#[test]
fn test_register_pool_validation() {
    let env = Env::default();
    let setup = setup_core(&env);
    let pool = create_pool(&env, DEFAULT_SQRT_PRICE_X64, 0);

    // Unsorted and identical pairs
    assert_eq!(
        setup.core.try_register_pool(&pool.address, &setup.token1, &setup.token0, &false),
        Err(Ok(RiptideError::InvalidTokenPair))
    );
    assert_eq!(
        setup.core.try_register_pool(&pool.address, &setup.token0, &setup.token0, &false),
        Err(Ok(RiptideError::InvalidTokenPair))
    );

    // Already registered
    assert_eq!(
        setup.core.try_register_pool(&setup.pool.address, &setup.token0, &setup.token1, &false),
        Err(Ok(RiptideError::PoolAlreadyRegistered))
    );

    // Unknown pools are rejected by views
    assert_eq!(
        setup.core.try_get_pool_config(&pool.address),
        Err(Ok(RiptideError::PoolNotRegistered))
    );
}

// ============================================================
// SETTLEMENT
// ============================================================

#[test]
fn test_pay_into_saved_balance() {
    let env = Env::default();
    let setup = setup_core(&env);
    let core = setup.core.address.clone();
    let held = balance(&env, &setup.token0, &core);

    let results = setup.core.lock(
        &setup.user,
        &actions(
            &env,
            &[
                Action::Pay(setup.token0.clone(), 1_000),
                Action::SaveBalance(setup.token0.clone(), 7, 1_000),
            ],
        ),
    );

    assert_eq!(results.get(0).unwrap(), ActionResult::Paid(1_000));
    assert_eq!(results.get(1).unwrap(), ActionResult::BalanceSaved(1_000));
    assert_eq!(setup.core.get_saved_balance(&setup.user, &setup.token0, &7), 1_000);
    assert_eq!(setup.core.get_saved_balance(&setup.user, &setup.token0, &8), 0);
    assert_eq!(balance(&env, &setup.token0, &core), held + 1_000);
    assert_eq!(balance(&env, &setup.token0, &setup.user), INITIAL_BALANCE - 1_000);
    assert_eq!(setup.core.get_next_lock_id(), 3);
}

#[test]
fn test_unsettled_lock_reverts_everything() {
    let env = Env::default();
    let setup = setup_core(&env);

    // Paying without using the credit leaves a negative debt
    let result = setup.core.try_lock(
        &setup.user,
        &actions(&env, &[Action::Pay(setup.token0.clone(), 1_000)]),
    );

    assert_eq!(result, Err(Ok(RiptideError::DebtsNotZeroed)));
    assert_eq!(balance(&env, &setup.token0, &setup.user), INITIAL_BALANCE);
    assert_eq!(setup.core.get_next_lock_id(), 2);
}

#[test]
fn test_withdraw_from_saved_balance() {
    let env = Env::default();
    let setup = setup_core(&env);
    let token = setup.token0.clone();

    setup.core.lock(
        &setup.user,
        &actions(&env, &[Action::Pay(token.clone(), 1_000), Action::SaveBalance(token.clone(), 0, 1_000)]),
    );

    let recipient = Address::generate(&env);
    let results = setup.core.lock(
        &setup.user,
        &actions(
            &env,
            &[
                Action::SaveBalance(token.clone(), 0, -400),
                Action::Withdraw(token.clone(), recipient.clone(), 400),
            ],
        ),
    );

    assert_eq!(results.get(0).unwrap(), ActionResult::BalanceSaved(600));
    assert_eq!(results.get(1).unwrap(), ActionResult::Withdrawn(400));
    assert_eq!(setup.core.get_saved_balance(&setup.user, &token, &0), 600);
    assert_eq!(balance(&env, &token, &recipient), 400);
}

#[test]
fn test_saved_balance_cannot_be_overdrawn() {
    let env = Env::default();
    let setup = setup_core(&env);

    let result = setup.core.try_lock(
        &setup.user,
        &actions(&env, &[Action::SaveBalance(setup.token1.clone(), 0, -1)]),
    );
    assert_eq!(result, Err(Ok(RiptideError::SavedBalanceOverflow)));
}

#[test]
fn test_withdraw_without_credit_fails() {
    let env = Env::default();
    let setup = setup_core(&env);

    // The core holds the seeded liquidity, but none of it belongs to the user
    let result = setup.core.try_lock(
        &setup.user,
        &actions(&env, &[Action::Withdraw(setup.token0.clone(), setup.user.clone(), 10)]),
    );
    assert_eq!(result, Err(Ok(RiptideError::DebtsNotZeroed)));
    assert_eq!(balance(&env, &setup.token0, &setup.user), INITIAL_BALANCE);
}

#[test]
fn test_negative_amounts_rejected() {
    let env = Env::default();
    let setup = setup_core(&env);

    let pay = setup.core.try_lock(&setup.user, &actions(&env, &[Action::Pay(setup.token0.clone(), -1)]));
    assert_eq!(pay, Err(Ok(RiptideError::InvalidAmount)));

    let withdraw = setup.core.try_lock(
        &setup.user,
        &actions(&env, &[Action::Withdraw(setup.token0.clone(), setup.user.clone(), -1)]),
    );
    assert_eq!(withdraw, Err(Ok(RiptideError::InvalidAmount)));
}

#[test]
fn test_pay_and_withdraw_pass_through() {
    let env = Env::default();
    let setup = setup_core(&env);
    let recipient = Address::generate(&env);

    setup.core.lock(
        &setup.user,
        &actions(
            &env,
            &[
                Action::Pay(setup.token1.clone(), 500),
                Action::Withdraw(setup.token1.clone(), recipient.clone(), 500),
            ],
        ),
    );

    assert_eq!(balance(&env, &setup.token1, &recipient), 500);
    assert_eq!(balance(&env, &setup.token1, &setup.user), INITIAL_BALANCE - 500);
}

#[test]
fn test_empty_lock_settles() {
    let env = Env::default();
    let setup = setup_core(&env);

    let results = setup.core.lock(&setup.user, &actions(&env, &[]));
    assert!(results.is_empty());
    assert_eq!(setup.core.get_next_lock_id(), 3);
}
