// Core storage module for Riptide

use riptide_position::{PoolFees, Position};
use riptide_twamm::{OrderState, RewardRates, TwammPool};
use riptide_types::{OrderKey, RiptideError};
use soroban_sdk::{contracttype, Address, Env};

use crate::types::PoolConfig;

// ============================================================
// STORAGE KEYS
// ============================================================

#[contracttype]
pub enum DataKey {
    Admin,
    NextLockId,
    PoolConfig(Address),
    Twamm(Address),
    /// (pool, boundary): reward rates just before the boundary was crossed
    RatesBefore(Address, u64),
    /// (pool, owner, key)
    Order(Address, Address, OrderKey),
    /// (pool, owner, salt)
    Position(Address, Address, u64),
    PoolFees(Address),
    /// (owner, token, salt)
    SavedBalance(Address, Address, u64),
}

// ============================================================
// TTL CONFIGURATION
// ============================================================

const PERSISTENT_LIFETIME: u32 = 6_307_200;
const PERSISTENT_BUMP: u32 = 6_307_200;

fn extend_ttl(env: &Env, key: &DataKey) {
    env.storage().persistent().extend_ttl(key, PERSISTENT_LIFETIME, PERSISTENT_BUMP);
}

// ============================================================
// ADMIN AND LOCK COUNTER
// ============================================================

pub fn is_initialized(env: &Env) -> bool {
    env.storage().persistent().has(&DataKey::Admin)
}

pub fn write_admin(env: &Env, admin: &Address) {
    env.storage().persistent().set(&DataKey::Admin, admin);
    extend_ttl(env, &DataKey::Admin);
}

pub fn read_admin(env: &Env) -> Result<Address, RiptideError> {
    env.storage()
        .persistent()
        .get(&DataKey::Admin)
        .ok_or(RiptideError::NotInitialized)
}

pub fn read_next_lock_id(env: &Env) -> u64 {
    env.storage().persistent().get(&DataKey::NextLockId).unwrap_or(0)
}

pub fn write_next_lock_id(env: &Env, next_id: u64) {
    env.storage().persistent().set(&DataKey::NextLockId, &next_id);
    extend_ttl(env, &DataKey::NextLockId);
}

// ============================================================
// POOLS
// ============================================================

pub fn has_pool(env: &Env, pool: &Address) -> bool {
    env.storage().persistent().has(&DataKey::PoolConfig(pool.clone()))
}

pub fn write_pool_config(env: &Env, pool: &Address, config: &PoolConfig) {
    let key = DataKey::PoolConfig(pool.clone());
    env.storage().persistent().set(&key, config);
    extend_ttl(env, &key);
}

pub fn read_pool_config(env: &Env, pool: &Address) -> Result<PoolConfig, RiptideError> {
    env.storage()
        .persistent()
        .get(&DataKey::PoolConfig(pool.clone()))
        .ok_or(RiptideError::PoolNotRegistered)
}

pub fn write_pool_fees(env: &Env, pool: &Address, fees: &PoolFees) {
    let key = DataKey::PoolFees(pool.clone());
    env.storage().persistent().set(&key, fees);
    extend_ttl(env, &key);
}

pub fn read_pool_fees(env: &Env, pool: &Address) -> PoolFees {
    env.storage()
        .persistent()
        .get(&DataKey::PoolFees(pool.clone()))
        .unwrap_or_default()
}

// ============================================================
// TWAMM
// ============================================================

pub fn write_twamm(env: &Env, pool: &Address, twamm: &TwammPool) {
    let key = DataKey::Twamm(pool.clone());
    env.storage().persistent().set(&key, twamm);
    extend_ttl(env, &key);
}

pub fn read_twamm(env: &Env, pool: &Address) -> Result<TwammPool, RiptideError> {
    env.storage()
        .persistent()
        .get(&DataKey::Twamm(pool.clone()))
        .ok_or(RiptideError::TwammNotEnabled)
}

pub fn write_rates_before(env: &Env, pool: &Address, time: u64, rates: &RewardRates) {
    let key = DataKey::RatesBefore(pool.clone(), time);
    env.storage().persistent().set(&key, rates);
    extend_ttl(env, &key);
}

pub fn read_rates_before(env: &Env, pool: &Address, time: u64) -> Option<RewardRates> {
    env.storage().persistent().get(&DataKey::RatesBefore(pool.clone(), time))
}

// ============================================================
// ORDERS
// ============================================================

pub fn read_order(env: &Env, pool: &Address, owner: &Address, key: &OrderKey) -> OrderState {
    env.storage()
        .persistent()
        .get(&DataKey::Order(pool.clone(), owner.clone(), key.clone()))
        .unwrap_or_else(|| OrderState::new(env))
}

/// Orders with no rate and nothing owed are dropped
pub fn write_order(env: &Env, pool: &Address, owner: &Address, key: &OrderKey, order: &OrderState) {
    let storage_key = DataKey::Order(pool.clone(), owner.clone(), key.clone());
    if order.sale_rate == 0 && order.proceeds_owed == 0 {
        env.storage().persistent().remove(&storage_key);
        return;
    }
    env.storage().persistent().set(&storage_key, order);
    extend_ttl(env, &storage_key);
}

// ============================================================
// POSITIONS
// ============================================================

pub fn read_position(env: &Env, pool: &Address, owner: &Address, salt: u64) -> Position {
    env.storage()
        .persistent()
        .get(&DataKey::Position(pool.clone(), owner.clone(), salt))
        .unwrap_or_default()
}

pub fn write_position(env: &Env, pool: &Address, owner: &Address, salt: u64, position: &Position) {
    let key = DataKey::Position(pool.clone(), owner.clone(), salt);
    if position.is_empty() {
        env.storage().persistent().remove(&key);
        return;
    }
    env.storage().persistent().set(&key, position);
    extend_ttl(env, &key);
}

// ============================================================
// SAVED BALANCES
// ============================================================

pub fn read_saved_balance(env: &Env, owner: &Address, token: &Address, salt: u64) -> u128 {
    env.storage()
        .persistent()
        .get(&DataKey::SavedBalance(owner.clone(), token.clone(), salt))
        .unwrap_or(0)
}

pub fn write_saved_balance(env: &Env, owner: &Address, token: &Address, salt: u64, balance: u128) {
    let key = DataKey::SavedBalance(owner.clone(), token.clone(), salt);
    if balance == 0 {
        env.storage().persistent().remove(&key);
        return;
    }
    env.storage().persistent().set(&key, &balance);
    extend_ttl(env, &key);
}
