//! Core events

use riptide_twamm::ExecutionSummary;
use riptide_types::{OrderKey, RiptideError};
use soroban_sdk::{Address, Env, Symbol};

/// Emitted when the core is initialized
pub fn emit_initialized(env: &Env, admin: &Address) {
    env.events().publish((Symbol::new(env, "CoreInit"),), (admin.clone(),));
}

/// Emitted when a pool is registered
pub fn emit_pool_registered(env: &Env, pool: &Address, token0: &Address, token1: &Address, twamm_enabled: bool) {
    env.events().publish(
        (Symbol::new(env, "PoolRegistered"),),
        (pool.clone(), token0.clone(), token1.clone(), twamm_enabled),
    );
}

/// Emitted when an outermost lock closes with every debt settled
///
/// Data: (lock id, number of actions)
pub fn emit_lock_settled(env: &Env, locker: &Address, lock_id: u64, actions: u32) {
    env.events().publish(
        (Symbol::new(env, "LockSettled"), locker.clone()),
        (lock_id, actions),
    );
}

pub fn emit_paid(env: &Env, token: &Address, payer: &Address, amount: i128) {
    env.events().publish(
        (Symbol::new(env, "Paid"), token.clone()),
        (payer.clone(), amount),
    );
}

pub fn emit_withdrawn(env: &Env, token: &Address, recipient: &Address, amount: i128) {
    env.events().publish(
        (Symbol::new(env, "Withdrawn"), token.clone()),
        (recipient.clone(), amount),
    );
}

/// Emitted after a swap against an external pool
///
/// Topics: ("Swap", pool)
/// Data: (locker, delta0, delta1, sqrt_price)
pub fn emit_swap(env: &Env, pool: &Address, locker: &Address, delta0: i128, delta1: i128, sqrt_price: u128) {
    env.events().publish(
        (Symbol::new(env, "Swap"), pool.clone()),
        (locker.clone(), delta0, delta1, sqrt_price),
    );
}

/// Emitted instead of failing when a partial fill was allowed
///
/// Topics: ("SwapStopped", reason)
/// Data: (pool, requested amount, filled amount)
pub fn emit_swap_stopped(env: &Env, pool: &Address, requested: i128, filled: i128) {
    env.events().publish(
        (
            Symbol::new(env, "SwapStopped"),
            RiptideError::SlippagePriceLimitReached.to_symbol(),
        ),
        (pool.clone(), requested, filled),
    );
}

pub fn emit_position_updated(
    env: &Env,
    pool: &Address,
    owner: &Address,
    salt: u64,
    liquidity_delta: i128,
    liquidity: u128,
) {
    env.events().publish(
        (Symbol::new(env, "PositionUpdated"), pool.clone()),
        (owner.clone(), salt, liquidity_delta, liquidity),
    );
}

pub fn emit_fees_accumulated(env: &Env, pool: &Address, amount0: u128, amount1: u128) {
    env.events().publish(
        (Symbol::new(env, "FeesAccumulated"), pool.clone()),
        (amount0, amount1),
    );
}

pub fn emit_fees_collected(env: &Env, pool: &Address, owner: &Address, salt: u64, amount0: u128, amount1: u128) {
    env.events().publish(
        (Symbol::new(env, "FeesCollected"), pool.clone()),
        (owner.clone(), salt, amount0, amount1),
    );
}

/// Topics: ("OrderUpdated", pool)
/// Data: (owner, key, sale_rate_delta, amount settled)
pub fn emit_order_updated(env: &Env, pool: &Address, owner: &Address, key: &OrderKey, sale_rate_delta: i128, amount: i128) {
    env.events().publish(
        (Symbol::new(env, "OrderUpdated"), pool.clone()),
        (owner.clone(), key.clone(), sale_rate_delta, amount),
    );
}

pub fn emit_proceeds_collected(env: &Env, pool: &Address, owner: &Address, key: &OrderKey, amount: u128) {
    env.events().publish(
        (Symbol::new(env, "ProceedsCollected"), pool.clone()),
        (owner.clone(), key.clone(), amount),
    );
}

pub fn emit_virtual_orders_executed(env: &Env, pool: &Address, summary: &ExecutionSummary) {
    env.events().publish(
        (Symbol::new(env, "VirtualOrdersExecuted"), pool.clone()),
        summary.clone(),
    );
}

pub fn emit_saved_balance_updated(env: &Env, owner: &Address, token: &Address, salt: u64, delta: i128, balance: u128) {
    env.events().publish(
        (Symbol::new(env, "SavedBalance"), owner.clone()),
        (token.clone(), salt, delta, balance),
    );
}
