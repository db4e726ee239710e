#![allow(dead_code)]

use riptide_core::{Action, ActionResult, RiptideCore, RiptideCoreClient};
use riptide_math::{compute_swap_step_with_target, get_virtual_reserves, ONE_X64};
use riptide_types::{BalanceUpdate, OrderKey, Side, SwapParams};
use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, testutils::Address as _, token, Address, Env, Vec,
};

// Test constants
pub const DEFAULT_SQRT_PRICE_X64: u128 = ONE_X64; // Price = 1.0
pub const DEFAULT_LIQUIDITY: u128 = 100_000_000;
pub const INITIAL_BALANCE: i128 = 1_000_000_000;

// ============================================================
// MOCK EXTERNAL POOL
// ============================================================

#[contracttype]
#[derive(Clone)]
pub struct MockPoolState {
    pub sqrt_price: u128,
    pub liquidity: u128,
}

/// Single-range constant product pool. Exact input only; exact output
/// requests fill nothing.
#[contract]
pub struct MockPool;

fn read_state(env: &Env) -> MockPoolState {
    env.storage().instance().get(&symbol_short!("STATE")).unwrap()
}

fn write_state(env: &Env, state: &MockPoolState) {
    env.storage().instance().set(&symbol_short!("STATE"), state);
}

fn quote(env: &Env, state: &MockPoolState, params: &SwapParams) -> BalanceUpdate {
    let unchanged = BalanceUpdate {
        delta0: 0,
        delta1: 0,
        sqrt_price: state.sqrt_price,
    };
    let zero_for_one = !params.is_token1;
    let limit = params.sqrt_price_limit;
    let wrong_side = if zero_for_one {
        limit >= state.sqrt_price
    } else {
        limit <= state.sqrt_price
    };
    if state.liquidity == 0 || params.amount <= 0 || wrong_side {
        return unchanged;
    }

    let (next, amount_in, amount_out) = compute_swap_step_with_target(
        env,
        state.sqrt_price,
        state.liquidity,
        params.amount as u128,
        zero_for_one,
        limit,
    );
    let (delta0, delta1) = if zero_for_one {
        (amount_in as i128, -(amount_out as i128))
    } else {
        (-(amount_out as i128), amount_in as i128)
    };
    BalanceUpdate {
        delta0,
        delta1,
        sqrt_price: next,
    }
}

fn liquidity_amounts(env: &Env, state: &MockPoolState, liquidity_delta: i128) -> BalanceUpdate {
    let (amount0, amount1) = get_virtual_reserves(env, liquidity_delta.unsigned_abs(), state.sqrt_price);
    let (amount0, amount1) = (amount0 as i128, amount1 as i128);
    let (delta0, delta1) = if liquidity_delta >= 0 {
        (amount0, amount1)
    } else {
        (-amount0, -amount1)
    };
    BalanceUpdate {
        delta0,
        delta1,
        sqrt_price: state.sqrt_price,
    }
}

#[contractimpl]
impl MockPool {
    pub fn init(env: Env, sqrt_price: u128, liquidity: u128) {
        write_state(&env, &MockPoolState { sqrt_price, liquidity });
    }

    pub fn sqrt_price(env: Env) -> u128 {
        read_state(&env).sqrt_price
    }

    pub fn liquidity(env: Env) -> u128 {
        read_state(&env).liquidity
    }

    pub fn swap(env: Env, params: SwapParams) -> BalanceUpdate {
        let mut state = read_state(&env);
        let update = quote(&env, &state, &params);
        state.sqrt_price = update.sqrt_price;
        write_state(&env, &state);
        update
    }

    pub fn update_liquidity(env: Env, liquidity_delta: i128) -> BalanceUpdate {
        let mut state = read_state(&env);
        let update = liquidity_amounts(&env, &state, liquidity_delta);
        state.liquidity = if liquidity_delta >= 0 {
            state.liquidity + liquidity_delta as u128
        } else {
            state.liquidity - liquidity_delta.unsigned_abs()
        };
        write_state(&env, &state);
        update
    }

    pub fn quote_swap(env: Env, params: SwapParams) -> BalanceUpdate {
        quote(&env, &read_state(&env), &params)
    }

    pub fn quote_liquidity(env: Env, liquidity_delta: i128) -> BalanceUpdate {
        liquidity_amounts(&env, &read_state(&env), liquidity_delta)
    }
}

// ============================================================
// SETUP
// ============================================================

pub struct TestSetup<'a> {
    pub core: RiptideCoreClient<'a>,
    pub admin: Address,
    pub user: Address,
    /// Owner of the seeded positions (salt 0) in both pools
    pub lp: Address,
    pub token0: Address,
    pub token1: Address,
    /// Pool with virtual orders enabled
    pub pool: MockPoolClient<'a>,
    /// Pool without virtual orders
    pub plain_pool: MockPoolClient<'a>,
}

/// Core with two registered pools over the same sorted token pair, each
/// seeded with DEFAULT_LIQUIDITY, and a funded user
pub fn setup_core(env: &Env) -> TestSetup<'_> {
    env.mock_all_auths();

    let admin = Address::generate(env);
    let user = Address::generate(env);
    let lp = Address::generate(env);
    let (token0, token1) = create_token_pair(env, &admin);

    let core_id = env.register(RiptideCore, ());
    let core = RiptideCoreClient::new(env, &core_id);
    core.initialize(&admin);

    let pool = create_pool(env, DEFAULT_SQRT_PRICE_X64, 0);
    let plain_pool = create_pool(env, DEFAULT_SQRT_PRICE_X64, 0);
    core.register_pool(&pool.address, &token0, &token1, &true);
    core.register_pool(&plain_pool.address, &token0, &token1, &false);

    for owner in [&user, &lp] {
        mint_tokens(env, &token0, owner, INITIAL_BALANCE);
        mint_tokens(env, &token1, owner, INITIAL_BALANCE);
    }
    for target in [&pool, &plain_pool] {
        provide_liquidity(env, &core, &lp, &token0, &token1, target, DEFAULT_LIQUIDITY as i128);
    }

    TestSetup {
        core,
        admin,
        user,
        lp,
        token0,
        token1,
        pool,
        plain_pool,
    }
}

/// Pay exactly what the pool asks for `liquidity` and add it under salt 0
pub fn provide_liquidity(
    env: &Env,
    core: &RiptideCoreClient,
    owner: &Address,
    token0: &Address,
    token1: &Address,
    pool: &MockPoolClient,
    liquidity: i128,
) {
    let amounts = pool.quote_liquidity(&liquidity);
    core.lock(
        owner,
        &actions(
            env,
            &[
                Action::Pay(token0.clone(), amounts.delta0),
                Action::Pay(token1.clone(), amounts.delta1),
                Action::UpdatePosition(pool.address.clone(), 0, liquidity),
            ],
        ),
    );
}

pub fn create_pool(env: &Env, sqrt_price: u128, liquidity: u128) -> MockPoolClient<'_> {
    let pool_id = env.register(MockPool, ());
    let client = MockPoolClient::new(env, &pool_id);
    client.init(&sqrt_price, &liquidity);
    client
}

/// Create a test token
pub fn create_token(env: &Env, admin: &Address) -> Address {
    let token_id = env.register_stellar_asset_contract_v2(admin.clone());
    token_id.address()
}

/// Two tokens ordered so that token0 < token1
pub fn create_token_pair(env: &Env, admin: &Address) -> (Address, Address) {
    let token_a = create_token(env, admin);
    let token_b = create_token(env, admin);
    if token_a < token_b {
        (token_a, token_b)
    } else {
        (token_b, token_a)
    }
}

/// Mint tokens to an address
pub fn mint_tokens(env: &Env, token: &Address, to: &Address, amount: i128) {
    use soroban_sdk::token::StellarAssetClient;
    let client = StellarAssetClient::new(env, token);
    client.mint(to, &amount);
}

pub fn balance(env: &Env, token: &Address, owner: &Address) -> i128 {
    token::Client::new(env, token).balance(owner)
}

pub fn order_key(side: Side, start_time: u64, end_time: u64) -> OrderKey {
    OrderKey {
        side,
        start_time,
        end_time,
        salt: 0,
    }
}

pub fn actions(env: &Env, list: &[Action]) -> Vec<Action> {
    let mut actions = Vec::new(env);
    for action in list {
        actions.push_back(action.clone());
    }
    actions
}

pub fn exact_input(amount: i128, is_token1: bool, sqrt_price_limit: u128) -> SwapParams {
    SwapParams {
        amount,
        is_token1,
        sqrt_price_limit,
    }
}

pub fn paid(result: &ActionResult) -> i128 {
    match result {
        ActionResult::Paid(amount) => *amount,
        other => panic!("expected Paid, got {:?}", other),
    }
}
