#![no_std]

//! # Riptide Core
//!
//! Singleton accounting contract in front of external pools.
//!
//! ## Responsibilities:
//! 1. Flash accounting: every batch runs inside a lock and only commits
//!    once each token debt of the lock is back to zero
//! 2. Token custody through two-phase payments and saved balances
//! 3. Virtual orders (TWAMM) executed against the pools on demand
//! 4. Liquidity positions and their fee accrual

use riptide_ledger::Ledger;
use riptide_math::compute_amount_from_sale_rate;
use riptide_position::{pending_fees, PoolFees};
use riptide_twamm::{pending_proceeds, ExecutionSummary, TwammPool};
use riptide_types::{OrderKey, RiptideError};
use soroban_sdk::{contract, contractimpl, Address, Env, Vec};

mod actions;
mod events;
mod interface;
mod storage;
mod types;
mod virtual_orders;

use events::*;
use storage::*;
pub use types::*;

// ============================================================
// CONTRACT
// ============================================================

#[contract]
pub struct RiptideCore;

#[contractimpl]
impl RiptideCore {
    // ========================================================
    // ADMIN
    // ========================================================

    pub fn initialize(env: Env, admin: Address) -> Result<(), RiptideError> {
        admin.require_auth();
        if is_initialized(&env) {
            return Err(RiptideError::AlreadyInitialized);
        }

        write_admin(&env, &admin);
        write_next_lock_id(&env, 0);
        emit_initialized(&env, &admin);
        Ok(())
    }

    /// Register an external pool trading `token0`/`token1`
    ///
    /// Tokens must be sorted. With `twamm_enabled` the pool starts accepting
    /// virtual orders from the current ledger time.
    pub fn register_pool(
        env: Env,
        pool: Address,
        token0: Address,
        token1: Address,
        twamm_enabled: bool,
    ) -> Result<(), RiptideError> {
        let admin = read_admin(&env)?;
        admin.require_auth();

        if token0 >= token1 {
            return Err(RiptideError::InvalidTokenPair);
        }
        if has_pool(&env, &pool) {
            return Err(RiptideError::PoolAlreadyRegistered);
        }

        let config = PoolConfig {
            token0: token0.clone(),
            token1: token1.clone(),
            twamm_enabled,
        };
        write_pool_config(&env, &pool, &config);
        write_pool_fees(&env, &pool, &PoolFees::default());
        if twamm_enabled {
            write_twamm(&env, &pool, &TwammPool::new(&env, env.ledger().timestamp()));
        }

        emit_pool_registered(&env, &pool, &token0, &token1, twamm_enabled);
        Ok(())
    }

    // ========================================================
    // LOCK
    // ========================================================

    /// Run `actions` inside one lock on behalf of `locker`
    ///
    /// Fails with `DebtsNotZeroed` unless the batch leaves every token
    /// settled. A failed batch changes nothing.
    pub fn lock(env: Env, locker: Address, actions: Vec<Action>) -> Result<Vec<ActionResult>, RiptideError> {
        locker.require_auth();
        read_admin(&env)?;

        let mut ledger = Ledger::resume(&env, read_next_lock_id(&env));
        let lock_id = ledger.next_id();
        let count = actions.len();

        let results = ledger.lock(|ledger, lock| {
            let mut results = Vec::new(&env);
            for action in actions.iter() {
                results.push_back(actions::dispatch(&env, ledger, lock, &locker, action)?);
            }
            Ok(results)
        })?;

        write_next_lock_id(&env, ledger.next_id());
        emit_lock_settled(&env, &locker, lock_id, count);
        Ok(results)
    }

    /// Execute a pool's virtual orders up to now; callable by anyone
    pub fn execute_virtual_orders(env: Env, pool: Address) -> Result<ExecutionSummary, RiptideError> {
        let config = read_pool_config(&env, &pool)?;
        if !config.twamm_enabled {
            return Err(RiptideError::TwammNotEnabled);
        }

        let mut ledger = Ledger::resume(&env, read_next_lock_id(&env));
        let summary = virtual_orders::execute(&env, &mut ledger, &pool, &config)?;
        write_next_lock_id(&env, ledger.next_id());
        Ok(summary)
    }

    // ========================================================
    // VIEWS
    // ========================================================

    pub fn get_pool_config(env: Env, pool: Address) -> Result<PoolConfig, RiptideError> {
        read_pool_config(&env, &pool)
    }

    pub fn get_twamm_pool(env: Env, pool: Address) -> Result<TwammPool, RiptideError> {
        read_twamm(&env, &pool)
    }

    pub fn get_pool_fees(env: Env, pool: Address) -> Result<PoolFees, RiptideError> {
        read_pool_config(&env, &pool)?;
        Ok(read_pool_fees(&env, &pool))
    }

    /// Order state as of the pool's last execution
    pub fn get_order(env: Env, pool: Address, owner: Address, key: OrderKey) -> Result<OrderInfo, RiptideError> {
        let twamm = read_twamm(&env, &pool)?;
        let order = read_order(&env, &pool, &owner, &key);
        let executed = twamm.sale.last_execution_time;

        let proceeds = pending_proceeds(&env, &twamm, &order, &key, executed, |time| {
            read_rates_before(&env, &pool, time)
        })?;

        let from = key.start_time.max(executed);
        let remaining = if key.end_time > from {
            compute_amount_from_sale_rate(order.sale_rate, key.end_time - from, false).ok_or(RiptideError::Overflow)?
        } else {
            0
        };

        Ok(OrderInfo {
            sale_rate: order.sale_rate,
            proceeds,
            remaining,
        })
    }

    pub fn get_position(env: Env, pool: Address, owner: Address, salt: u64) -> Result<PositionInfo, RiptideError> {
        let position = read_position(&env, &pool, &owner, salt);
        let fees = read_pool_fees(&env, &pool);
        let (fees0, fees1) = pending_fees(&env, &position, &fees)?;
        Ok(PositionInfo {
            liquidity: position.liquidity,
            fees0,
            fees1,
        })
    }

    pub fn get_saved_balance(env: Env, owner: Address, token: Address, salt: u64) -> u128 {
        read_saved_balance(&env, &owner, &token, salt)
    }

    /// Whether `time` is on the valid order grid from the current ledger time
    pub fn is_time_valid(env: Env, time: u64) -> bool {
        riptide_twamm::is_time_valid(env.ledger().timestamp(), time)
    }

    pub fn get_next_lock_id(env: Env) -> u64 {
        read_next_lock_id(&env)
    }
}
