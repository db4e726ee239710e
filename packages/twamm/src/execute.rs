// Virtual order execution
//
// Walks a pool from its last execution time to now, one interval per due
// boundary. In each interval the amounts sold by both sides are matched
// against each other at the current price and only the excess is swapped
// against the venue, bounded by the equilibrium price of the two rates.

use core::cmp::Ordering;

use riptide_ledger::apply_saved_delta;
use riptide_math::{
    compute_amount_from_sale_rate, equilibrium_sqrt_price, mul_div_checked, reward_rate_delta,
    u128_to_i128, MAX_SQRT_PRICE, MIN_SQRT_PRICE, Q64,
};
use riptide_types::{BalanceUpdate, RiptideError, SwapParams};
use soroban_sdk::Env;

use crate::rate::add_sale_rate_delta;
use crate::types::{ExecutionSummary, RewardRates, TwammPool};
use crate::venue::SwapVenue;

/// Execute every virtual order of `pool` up to `now`
///
/// `record_rates(time, rates)` is called at each crossed boundary with the
/// reward rates in effect just before it; orders read them back to price
/// their window.
pub fn execute_virtual_orders<V, R>(
    env: &Env,
    pool: &mut TwammPool,
    venue: &mut V,
    now: u64,
    mut record_rates: R,
) -> Result<ExecutionSummary, RiptideError>
where
    V: SwapVenue,
    R: FnMut(u64, &RewardRates),
{
    let mut summary = ExecutionSummary {
        start_time: pool.sale.last_execution_time,
        end_time: now,
        ..ExecutionSummary::default()
    };

    let mut time = pool.sale.last_execution_time;
    while time < now {
        let next_time = match next_boundary(pool, time) {
            Some(boundary) if boundary <= now => boundary,
            _ => now,
        };

        execute_interval(env, pool, venue, next_time - time, &mut summary)?;
        summary.steps += 1;

        if let Some(bucket) = pool.buckets.get(next_time) {
            record_rates(next_time, &pool.rewards);
            pool.sale.sale_rate0 = add_sale_rate_delta(pool.sale.sale_rate0, bucket.sale_rate_delta0)?;
            pool.sale.sale_rate1 = add_sale_rate_delta(pool.sale.sale_rate1, bucket.sale_rate_delta1)?;
            pool.buckets.remove(next_time);
            summary.boundaries += 1;
        }

        time = next_time;
    }

    if now > pool.sale.last_execution_time {
        pool.sale.last_execution_time = now;
    }
    Ok(summary)
}

/// First initialized boundary after `time`
fn next_boundary(pool: &TwammPool, time: u64) -> Option<u64> {
    pool.buckets.keys().iter().find(|boundary| *boundary > time)
}

fn execute_interval<V: SwapVenue>(
    env: &Env,
    pool: &mut TwammPool,
    venue: &mut V,
    duration: u64,
    summary: &mut ExecutionSummary,
) -> Result<(), RiptideError> {
    let rate0 = pool.sale.sale_rate0;
    let rate1 = pool.sale.sale_rate1;
    if duration == 0 || (rate0 == 0 && rate1 == 0) {
        return Ok(());
    }

    let amount0 = compute_amount_from_sale_rate(rate0, duration, false).ok_or(RiptideError::Overflow)?;
    let amount1 = compute_amount_from_sale_rate(rate1, duration, false).ok_or(RiptideError::Overflow)?;

    let Some(params) = plan_swap(env, venue.sqrt_price(), rate0, rate1, amount0, amount1)? else {
        return Ok(());
    };

    let update = venue.swap(&params)?;
    summary.swaps += 1;
    if update.is_zero() {
        return Ok(());
    }
    if update.specified_delta(&params) > params.amount {
        return Err(RiptideError::InvalidSwapResult);
    }

    let purchased1 = purchased(amount1, update.delta1)?;
    let purchased0 = purchased(amount0, update.delta0)?;

    if rate0 > 0 && purchased1 > 0 {
        let delta = reward_rate_delta(env, purchased1, rate0).ok_or(RiptideError::Overflow)?;
        pool.rewards.value0 = pool.rewards.value0.add(&delta);
        summary.purchased1 = summary.purchased1.checked_add(purchased1).ok_or(RiptideError::Overflow)?;
    }
    if rate1 > 0 && purchased0 > 0 {
        let delta = reward_rate_delta(env, purchased0, rate1).ok_or(RiptideError::Overflow)?;
        pool.rewards.value1 = pool.rewards.value1.add(&delta);
        summary.purchased0 = summary.purchased0.checked_add(purchased0).ok_or(RiptideError::Overflow)?;
    }

    absorb(pool, &update)
}

/// Pick the swap for one interval, or None when nothing should trade
fn plan_swap(
    env: &Env,
    sqrt_price: u128,
    rate0: u128,
    rate1: u128,
    amount0: u128,
    amount1: u128,
) -> Result<Option<SwapParams>, RiptideError> {
    match (rate0 > 0, rate1 > 0) {
        (true, true) => {
            let target = equilibrium_sqrt_price(env, rate0, rate1);
            match target.cmp(&sqrt_price) {
                Ordering::Greater => {
                    // token1 sellers are in excess: what token0 sellers absorb at P = sp^2
                    let matched1 = mul_div_checked(env, amount0, sqrt_price, Q64)
                        .and_then(|value| mul_div_checked(env, value, sqrt_price, Q64))
                        .unwrap_or(u128::MAX);
                    sell(amount1.saturating_sub(matched1), true, target)
                }
                Ordering::Less => {
                    let matched0 = mul_div_checked(env, amount1, Q64, sqrt_price)
                        .and_then(|value| mul_div_checked(env, value, Q64, sqrt_price))
                        .unwrap_or(u128::MAX);
                    sell(amount0.saturating_sub(matched0), false, target)
                }
                Ordering::Equal => Ok(None),
            }
        }
        (true, false) => sell(amount0, false, MIN_SQRT_PRICE),
        (false, true) => sell(amount1, true, MAX_SQRT_PRICE),
        (false, false) => Ok(None),
    }
}

fn sell(amount: u128, is_token1: bool, sqrt_price_limit: u128) -> Result<Option<SwapParams>, RiptideError> {
    if amount == 0 {
        return Ok(None);
    }
    Ok(Some(SwapParams {
        amount: u128_to_i128(amount).ok_or(RiptideError::Overflow)?,
        is_token1,
        sqrt_price_limit,
    }))
}

/// Tokens available to the opposite side: what this side sold plus what the
/// venue paid out, minus what the venue took
fn purchased(notional: u128, pool_delta: i128) -> Result<u128, RiptideError> {
    let notional = u128_to_i128(notional).ok_or(RiptideError::Overflow)?;
    if pool_delta > notional {
        return Err(RiptideError::InvalidSwapResult);
    }
    let available = notional.checked_sub(pool_delta).ok_or(RiptideError::Overflow)?;
    Ok(available.unsigned_abs())
}

/// Settle a realized swap against the TWAMM saved balances
fn absorb(pool: &mut TwammPool, update: &BalanceUpdate) -> Result<(), RiptideError> {
    let change0 = update.delta0.checked_neg().ok_or(RiptideError::SavedBalanceOverflow)?;
    let change1 = update.delta1.checked_neg().ok_or(RiptideError::SavedBalanceOverflow)?;
    pool.saved.amount0 = apply_saved_delta(pool.saved.amount0, change0)?;
    pool.saved.amount1 = apply_saved_delta(pool.saved.amount1, change1)?;
    Ok(())
}
