// External pool interface
//
// Pools price and execute swaps; the core only records the balance changes
// they report. Every call goes through `invoke_contract` so any contract
// exposing `swap`, `update_liquidity` and `sqrt_price` can be registered.

use riptide_ledger::Ledger;
use riptide_twamm::SwapVenue;
use riptide_types::{BalanceUpdate, RiptideError, SwapParams};
use soroban_sdk::{vec, Address, Env, IntoVal, Symbol};

use crate::types::PoolConfig;

// ============================================================
// POOL CALLS
// ============================================================

pub fn pool_swap(env: &Env, pool: &Address, params: &SwapParams) -> BalanceUpdate {
    env.invoke_contract(
        pool,
        &Symbol::new(env, "swap"),
        vec![env, params.clone().into_val(env)],
    )
}

/// Token amounts the pool requires for a liquidity change (negative when it
/// pays them out)
pub fn pool_update_liquidity(env: &Env, pool: &Address, liquidity_delta: i128) -> BalanceUpdate {
    env.invoke_contract(
        pool,
        &Symbol::new(env, "update_liquidity"),
        vec![env, liquidity_delta.into_val(env)],
    )
}

pub fn pool_sqrt_price(env: &Env, pool: &Address) -> u128 {
    env.invoke_contract(pool, &Symbol::new(env, "sqrt_price"), vec![env])
}

// ============================================================
// VENUE FOR VIRTUAL ORDERS
// ============================================================

/// Swap venue that books every swap against a ledger lock
pub struct PoolVenue<'a> {
    pub env: &'a Env,
    pub pool: &'a Address,
    pub config: &'a PoolConfig,
    pub ledger: &'a mut Ledger,
    pub lock_id: u64,
}

impl SwapVenue for PoolVenue<'_> {
    fn sqrt_price(&self) -> u128 {
        pool_sqrt_price(self.env, self.pool)
    }

    fn swap(&mut self, params: &SwapParams) -> Result<BalanceUpdate, RiptideError> {
        let update = pool_swap(self.env, self.pool, params);
        self.ledger.account_debt(self.lock_id, &self.config.token0, update.delta0)?;
        self.ledger.account_debt(self.lock_id, &self.config.token1, update.delta1)?;
        Ok(update)
    }
}
