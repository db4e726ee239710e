// Virtual order execution for registered pools
//
// Execution runs in its own lock. Each swap books the pool's deltas as debt
// and the lock is settled from the TWAMM saved balances, so a pool that
// reports more than the saved amounts cover leaves the lock unsettled.

use riptide_ledger::Ledger;
use riptide_math::u128_to_i128;
use riptide_twamm::{execute_virtual_orders, ExecutionSummary, SavedAmounts};
use riptide_types::RiptideError;
use soroban_sdk::{Address, Env};

use crate::events::emit_virtual_orders_executed;
use crate::interface::PoolVenue;
use crate::storage::{read_twamm, write_rates_before, write_twamm};
use crate::types::PoolConfig;

/// Bring `pool`'s virtual orders up to the current ledger time
pub fn execute(env: &Env, ledger: &mut Ledger, pool: &Address, config: &PoolConfig) -> Result<ExecutionSummary, RiptideError> {
    let now = env.ledger().timestamp();
    let mut twamm = read_twamm(env, pool)?;
    if twamm.sale.last_execution_time >= now {
        return Ok(ExecutionSummary {
            start_time: twamm.sale.last_execution_time,
            end_time: now,
            ..ExecutionSummary::default()
        });
    }

    let summary = ledger.lock(|ledger, lock| {
        let saved_before = twamm.saved.clone();
        let mut venue = PoolVenue {
            env,
            pool,
            config,
            ledger: &mut *ledger,
            lock_id: lock.id,
        };
        let summary = execute_virtual_orders(env, &mut twamm, &mut venue, now, |time, rates| {
            write_rates_before(env, pool, time, rates)
        })?;

        settle(ledger, lock.id, config, &saved_before, &twamm.saved)?;
        Ok(summary)
    })?;

    write_twamm(env, pool, &twamm);
    emit_virtual_orders_executed(env, pool, &summary);
    Ok(summary)
}

/// Pay the lock's swap debts out of the change in saved balances
fn settle(
    ledger: &mut Ledger,
    lock_id: u64,
    config: &PoolConfig,
    before: &SavedAmounts,
    after: &SavedAmounts,
) -> Result<(), RiptideError> {
    ledger.account_debt(lock_id, &config.token0, signed_change(before.amount0, after.amount0)?)?;
    ledger.account_debt(lock_id, &config.token1, signed_change(before.amount1, after.amount1)?)?;
    Ok(())
}

fn signed_change(before: u128, after: u128) -> Result<i128, RiptideError> {
    if after >= before {
        u128_to_i128(after - before).ok_or(RiptideError::Overflow)
    } else {
        u128_to_i128(before - after)
            .map(|amount| -amount)
            .ok_or(RiptideError::Overflow)
    }
}
