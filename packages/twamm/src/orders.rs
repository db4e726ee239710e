// Order updates and proceeds
//
// An order owns a slice of its side's sale rate between start and end. Its
// proceeds are the growth of the side's reward rate inside that window times
// its sale rate. Proceeds are banked at the old rate before the rate
// changes, so a snapshot never needs to be rescaled.

use riptide_ledger::apply_saved_delta;
use riptide_math::{compute_amount_from_sale_rate, compute_sale_rate, proceeds_from_reward_rate, u128_to_i128};
use riptide_types::{OrderKey, RiptideError, Side};
use soroban_sdk::{Env, U256};

use crate::rate::{add_bucket_delta, add_sale_rate_delta};
use crate::time::is_time_valid;
use crate::types::{OrderState, RewardRates, TwammPool};

/// Reward rate accumulated by the order's side inside its window
///
/// The pool must already be executed up to `now`. `rates_before(time)`
/// returns the reward rates recorded when the pool crossed `time`. A window
/// whose end was never recorded reads as zero instead of underflowing.
pub fn reward_rate_inside(
    env: &Env,
    pool: &TwammPool,
    key: &OrderKey,
    now: u64,
    rates_before: impl Fn(u64) -> Option<RewardRates>,
) -> U256 {
    if now < key.start_time {
        return U256::from_u32(env, 0);
    }

    let before = |time: u64| {
        rates_before(time)
            .map(|rates| rates.value(key.side))
            .unwrap_or_else(|| U256::from_u32(env, 0))
    };

    let start = before(key.start_time);
    let end = if now >= key.end_time {
        before(key.end_time)
    } else {
        pool.rewards.value(key.side)
    };
    if end < start {
        return U256::from_u32(env, 0);
    }
    end.sub(&start)
}

/// Proceeds the order could collect right now
pub fn pending_proceeds(
    env: &Env,
    pool: &TwammPool,
    order: &OrderState,
    key: &OrderKey,
    now: u64,
    rates_before: impl Fn(u64) -> Option<RewardRates>,
) -> Result<u128, RiptideError> {
    let inside = reward_rate_inside(env, pool, key, now, rates_before);
    let earned = earned_since_snapshot(env, order, &inside)?;
    order.proceeds_owed.checked_add(earned).ok_or(RiptideError::Overflow)
}

fn earned_since_snapshot(env: &Env, order: &OrderState, inside: &U256) -> Result<u128, RiptideError> {
    if order.sale_rate == 0 || *inside <= order.reward_rate_snapshot {
        return Ok(0);
    }
    let growth = inside.sub(&order.reward_rate_snapshot);
    proceeds_from_reward_rate(env, &growth, order.sale_rate).ok_or(RiptideError::Overflow)
}

fn validate_times(key: &OrderKey, now: u64) -> Result<(), RiptideError> {
    if key.end_time <= key.start_time {
        return Err(RiptideError::InvalidTime);
    }
    if key.end_time <= now {
        return Err(RiptideError::OrderAlreadyEnded);
    }
    if key.start_time > now && !is_time_valid(now, key.start_time) {
        return Err(RiptideError::InvalidTime);
    }
    if !is_time_valid(now, key.end_time) {
        return Err(RiptideError::InvalidTime);
    }
    Ok(())
}

/// Sale rate that sells `amount` over what is left of the order window
pub fn sale_rate_for_amount(amount: u128, start_time: u64, end_time: u64, now: u64) -> Result<u128, RiptideError> {
    let from = start_time.max(now);
    if end_time <= from {
        return Err(RiptideError::OrderAlreadyEnded);
    }
    compute_sale_rate(amount, end_time - from).ok_or(RiptideError::Overflow)
}

/// Change an order's sale rate by `sale_rate_delta`
///
/// Returns the sell-token amount to settle: positive is owed by the owner
/// (rounded up), negative is refunded (rounded down). Every check runs
/// before anything is written, so a failed update leaves pool and order
/// untouched.
pub fn update_order(
    env: &Env,
    pool: &mut TwammPool,
    order: &mut OrderState,
    key: &OrderKey,
    sale_rate_delta: i128,
    now: u64,
    rates_before: impl Fn(u64) -> Option<RewardRates>,
) -> Result<i128, RiptideError> {
    validate_times(key, now)?;

    let side = key.side;
    let new_order_rate = add_sale_rate_delta(order.sale_rate, sale_rate_delta)?;
    let negated = sale_rate_delta.checked_neg().ok_or(RiptideError::RateDeltaOverflow)?;

    // Bank proceeds at the old rate
    let inside = reward_rate_inside(env, pool, key, now, rates_before);
    let earned = earned_since_snapshot(env, order, &inside)?;
    let proceeds_owed = order.proceeds_owed.checked_add(earned).ok_or(RiptideError::Overflow)?;

    // Rate changes: either the start bucket or the running rate, plus the end bucket
    let started = now >= key.start_time;
    let mut start_bucket = pool.bucket(key.start_time);
    let mut current_rate = pool.sale.rate(side);
    if started {
        current_rate = add_sale_rate_delta(current_rate, sale_rate_delta)?;
    } else {
        let delta = add_bucket_delta(start_bucket.delta(side), sale_rate_delta)?;
        start_bucket.set_delta(side, delta);
    }
    let mut end_bucket = pool.bucket(key.end_time);
    end_bucket.set_delta(side, add_bucket_delta(end_bucket.delta(side), negated)?);

    // Sell-token amount for the remaining duration
    let remaining = key.end_time - key.start_time.max(now);
    let amount = if sale_rate_delta >= 0 {
        let owed = compute_amount_from_sale_rate(sale_rate_delta.unsigned_abs(), remaining, true)
            .ok_or(RiptideError::Overflow)?;
        u128_to_i128(owed).ok_or(RiptideError::Overflow)?
    } else {
        let refund = compute_amount_from_sale_rate(sale_rate_delta.unsigned_abs(), remaining, false)
            .ok_or(RiptideError::Overflow)?;
        -u128_to_i128(refund).ok_or(RiptideError::Overflow)?
    };
    let saved = apply_saved_delta(pool.saved.get(side), amount)?;

    // Commit
    if sale_rate_delta != 0 {
        if started {
            pool.sale.set_rate(side, current_rate);
        } else {
            pool.buckets.set(key.start_time, start_bucket);
        }
        pool.buckets.set(key.end_time, end_bucket);
        pool.saved.set(side, saved);
    }

    order.sale_rate = new_order_rate;
    order.reward_rate_snapshot = inside;
    order.proceeds_owed = proceeds_owed;

    Ok(amount)
}

/// Pay out everything the order has earned so far
///
/// Proceeds come out of the pool's saved balance of the bought token.
pub fn collect_proceeds(
    env: &Env,
    pool: &mut TwammPool,
    order: &mut OrderState,
    key: &OrderKey,
    now: u64,
    rates_before: impl Fn(u64) -> Option<RewardRates>,
) -> Result<u128, RiptideError> {
    let inside = reward_rate_inside(env, pool, key, now, rates_before);
    let earned = earned_since_snapshot(env, order, &inside)?;
    let proceeds = order.proceeds_owed.checked_add(earned).ok_or(RiptideError::Overflow)?;

    let buy_side = match key.side {
        Side::Token0 => Side::Token1,
        Side::Token1 => Side::Token0,
    };
    let saved = pool
        .saved
        .get(buy_side)
        .checked_sub(proceeds)
        .ok_or(RiptideError::SavedBalanceOverflow)?;

    pool.saved.set(buy_side, saved);
    order.reward_rate_snapshot = inside;
    order.proceeds_owed = 0;
    Ok(proceeds)
}
