// Lock actions
//
// Each action books its value movements as debts of the current lock. Pool
// actions on TWAMM pools first bring the virtual orders up to date so they
// see the same price and sale rates a later execution would.

use riptide_ledger::{apply_saved_delta, Ledger, Lock};
use riptide_math::{i128_to_u128_safe, u128_to_i128};
use riptide_position::{accumulate_fees, collect_fees, update_position};
use riptide_twamm::{collect_proceeds, sale_rate_for_amount, update_order};
use riptide_types::{OrderKey, RiptideError, Side, SwapParams};
use soroban_sdk::{token, vec, Address, Env};

use crate::events::*;
use crate::interface::{pool_swap, pool_update_liquidity};
use crate::storage::*;
use crate::types::{Action, ActionResult, PoolConfig};
use crate::virtual_orders;

pub fn dispatch(
    env: &Env,
    ledger: &mut Ledger,
    lock: Lock,
    locker: &Address,
    action: Action,
) -> Result<ActionResult, RiptideError> {
    match action {
        Action::Pay(token, amount) => pay(env, ledger, lock, locker, &token, amount),
        Action::Withdraw(token, recipient, amount) => withdraw(env, ledger, lock, &token, &recipient, amount),
        Action::Swap(pool, params, allow_partial) => swap(env, ledger, lock, locker, &pool, &params, allow_partial),
        Action::UpdatePosition(pool, salt, delta) => position(env, ledger, lock, locker, &pool, salt, delta),
        Action::CollectFees(pool, salt) => fees(env, ledger, lock, locker, &pool, salt),
        Action::AccumulateFees(pool, amount0, amount1) => donate(env, ledger, lock, &pool, amount0, amount1),
        Action::PlaceOrder(pool, key, amount) => place_order(env, ledger, lock, locker, &pool, &key, amount),
        Action::UpdateOrder(pool, key, delta) => order(env, ledger, lock, locker, &pool, &key, delta),
        Action::CollectProceeds(pool, key) => proceeds(env, ledger, lock, locker, &pool, &key),
        Action::ExecuteVirtualOrders(pool) => {
            let config = twamm_config(env, &pool)?;
            let summary = virtual_orders::execute(env, ledger, &pool, &config)?;
            Ok(ActionResult::VirtualOrdersExecuted(summary))
        }
        Action::SaveBalance(token, salt, delta) => save(env, ledger, lock, locker, &token, salt, delta),
    }
}

// ============================================================
// HELPERS
// ============================================================

fn to_signed(amount: u128) -> Result<i128, RiptideError> {
    u128_to_i128(amount).ok_or(RiptideError::Overflow)
}

fn twamm_config(env: &Env, pool: &Address) -> Result<PoolConfig, RiptideError> {
    let config = read_pool_config(env, pool)?;
    if !config.twamm_enabled {
        return Err(RiptideError::TwammNotEnabled);
    }
    Ok(config)
}

/// Load a pool's config, executing its virtual orders when it has any
fn prepare_pool(env: &Env, ledger: &mut Ledger, pool: &Address) -> Result<PoolConfig, RiptideError> {
    let config = read_pool_config(env, pool)?;
    if config.twamm_enabled {
        virtual_orders::execute(env, ledger, pool, &config)?;
    }
    Ok(config)
}

fn sell_token(config: &PoolConfig, key: &OrderKey) -> Address {
    config.token(key.side == Side::Token1)
}

fn buy_token(config: &PoolConfig, key: &OrderKey) -> Address {
    config.token(key.side == Side::Token0)
}

// ============================================================
// TOKEN MOVEMENTS
// ============================================================

/// Transfer `amount` from the locker and credit whatever the core received
fn pay(
    env: &Env,
    ledger: &mut Ledger,
    lock: Lock,
    payer: &Address,
    token: &Address,
    amount: i128,
) -> Result<ActionResult, RiptideError> {
    if amount < 0 {
        return Err(RiptideError::InvalidAmount);
    }

    let core = env.current_contract_address();
    let client = token::Client::new(env, token);
    let tokens = vec![env, token.clone()];
    let balance_of = |token: &Address| i128_to_u128_safe(token::Client::new(env, token).balance(&core));

    ledger.start_payments(lock.id, &tokens, balance_of)?;
    client.transfer(payer, &core, &amount);
    let credited = ledger.complete_payments(lock.id, &tokens, balance_of)?;

    let paid = credited.get(0).unwrap_or(0);
    emit_paid(env, token, payer, paid);
    Ok(ActionResult::Paid(paid))
}

fn withdraw(
    env: &Env,
    ledger: &mut Ledger,
    lock: Lock,
    token: &Address,
    recipient: &Address,
    amount: i128,
) -> Result<ActionResult, RiptideError> {
    ledger.withdraw(lock.id, token, amount)?;
    if amount > 0 {
        token::Client::new(env, token).transfer(&env.current_contract_address(), recipient, &amount);
    }
    emit_withdrawn(env, token, recipient, amount);
    Ok(ActionResult::Withdrawn(amount))
}

fn save(
    env: &Env,
    ledger: &mut Ledger,
    lock: Lock,
    owner: &Address,
    token: &Address,
    salt: u64,
    delta: i128,
) -> Result<ActionResult, RiptideError> {
    let balance = apply_saved_delta(read_saved_balance(env, owner, token, salt), delta)?;
    ledger.account_debt(lock.id, token, delta)?;

    write_saved_balance(env, owner, token, salt, balance);
    emit_saved_balance_updated(env, owner, token, salt, delta, balance);
    Ok(ActionResult::BalanceSaved(balance))
}

// ============================================================
// SWAPS
// ============================================================

fn swap(
    env: &Env,
    ledger: &mut Ledger,
    lock: Lock,
    locker: &Address,
    pool: &Address,
    params: &SwapParams,
    allow_partial: bool,
) -> Result<ActionResult, RiptideError> {
    let config = prepare_pool(env, ledger, pool)?;

    let update = pool_swap(env, pool, params);
    let limit_reached = update.is_partial_fill(params);
    if limit_reached && !allow_partial {
        return Err(RiptideError::SlippagePriceLimitReached);
    }

    ledger.account_debt(lock.id, &config.token0, update.delta0)?;
    ledger.account_debt(lock.id, &config.token1, update.delta1)?;

    if limit_reached {
        emit_swap_stopped(env, pool, params.amount, update.specified_delta(params));
    }
    emit_swap(env, pool, locker, update.delta0, update.delta1, update.sqrt_price);
    Ok(ActionResult::Swapped(update, limit_reached))
}

// ============================================================
// POSITIONS AND FEES
// ============================================================

fn position(
    env: &Env,
    ledger: &mut Ledger,
    lock: Lock,
    owner: &Address,
    pool: &Address,
    salt: u64,
    liquidity_delta: i128,
) -> Result<ActionResult, RiptideError> {
    let config = prepare_pool(env, ledger, pool)?;

    let mut position = read_position(env, pool, owner, salt);
    let mut fees = read_pool_fees(env, pool);
    update_position(env, &mut position, &mut fees, liquidity_delta)?;

    let update = pool_update_liquidity(env, pool, liquidity_delta);
    ledger.account_debt(lock.id, &config.token0, update.delta0)?;
    ledger.account_debt(lock.id, &config.token1, update.delta1)?;

    write_position(env, pool, owner, salt, &position);
    write_pool_fees(env, pool, &fees);
    emit_position_updated(env, pool, owner, salt, liquidity_delta, position.liquidity);
    Ok(ActionResult::PositionUpdated(update))
}

fn fees(
    env: &Env,
    ledger: &mut Ledger,
    lock: Lock,
    owner: &Address,
    pool: &Address,
    salt: u64,
) -> Result<ActionResult, RiptideError> {
    let config = read_pool_config(env, pool)?;

    let mut position = read_position(env, pool, owner, salt);
    let mut fees = read_pool_fees(env, pool);
    let (amount0, amount1) = collect_fees(env, &mut position, &mut fees)?;

    ledger.account_debt(lock.id, &config.token0, -to_signed(amount0)?)?;
    ledger.account_debt(lock.id, &config.token1, -to_signed(amount1)?)?;

    write_position(env, pool, owner, salt, &position);
    write_pool_fees(env, pool, &fees);
    emit_fees_collected(env, pool, owner, salt, amount0, amount1);
    Ok(ActionResult::FeesCollected(amount0, amount1))
}

/// Distribute fee income paid by the locker over the pool's liquidity
fn donate(
    env: &Env,
    ledger: &mut Ledger,
    lock: Lock,
    pool: &Address,
    amount0: u128,
    amount1: u128,
) -> Result<ActionResult, RiptideError> {
    let config = read_pool_config(env, pool)?;

    let mut fees = read_pool_fees(env, pool);
    accumulate_fees(env, &mut fees, amount0, amount1)?;

    ledger.account_debt(lock.id, &config.token0, to_signed(amount0)?)?;
    ledger.account_debt(lock.id, &config.token1, to_signed(amount1)?)?;

    write_pool_fees(env, pool, &fees);
    emit_fees_accumulated(env, pool, amount0, amount1);
    Ok(ActionResult::FeesAccumulated)
}

// ============================================================
// ORDERS
// ============================================================

fn place_order(
    env: &Env,
    ledger: &mut Ledger,
    lock: Lock,
    owner: &Address,
    pool: &Address,
    key: &OrderKey,
    amount: u128,
) -> Result<ActionResult, RiptideError> {
    let now = env.ledger().timestamp();
    let sale_rate = sale_rate_for_amount(amount, key.start_time, key.end_time, now)?;
    order(env, ledger, lock, owner, pool, key, to_signed(sale_rate)?)
}

fn order(
    env: &Env,
    ledger: &mut Ledger,
    lock: Lock,
    owner: &Address,
    pool: &Address,
    key: &OrderKey,
    sale_rate_delta: i128,
) -> Result<ActionResult, RiptideError> {
    let config = twamm_config(env, pool)?;
    virtual_orders::execute(env, ledger, pool, &config)?;

    let now = env.ledger().timestamp();
    let mut twamm = read_twamm(env, pool)?;
    let mut state = read_order(env, pool, owner, key);
    let amount = update_order(env, &mut twamm, &mut state, key, sale_rate_delta, now, |time| {
        read_rates_before(env, pool, time)
    })?;

    ledger.account_debt(lock.id, &sell_token(&config, key), amount)?;

    write_twamm(env, pool, &twamm);
    write_order(env, pool, owner, key, &state);
    emit_order_updated(env, pool, owner, key, sale_rate_delta, amount);
    Ok(ActionResult::OrderUpdated(amount))
}

fn proceeds(
    env: &Env,
    ledger: &mut Ledger,
    lock: Lock,
    owner: &Address,
    pool: &Address,
    key: &OrderKey,
) -> Result<ActionResult, RiptideError> {
    let config = twamm_config(env, pool)?;
    virtual_orders::execute(env, ledger, pool, &config)?;

    let now = env.ledger().timestamp();
    let mut twamm = read_twamm(env, pool)?;
    let mut state = read_order(env, pool, owner, key);
    let amount = collect_proceeds(env, &mut twamm, &mut state, key, now, |time| {
        read_rates_before(env, pool, time)
    })?;

    ledger.account_debt(lock.id, &buy_token(&config, key), -to_signed(amount)?)?;

    write_twamm(env, pool, &twamm);
    write_order(env, pool, owner, key, &state);
    emit_proceeds_collected(env, pool, owner, key, amount);
    Ok(ActionResult::ProceedsCollected(amount))
}
