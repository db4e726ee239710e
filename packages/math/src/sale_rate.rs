// SPDX-License-Identifier: MIT
// Sale rate and reward rate arithmetic for virtual orders

use soroban_sdk::{Env, U256};
use crate::constants::{REWARD_RATE_SHIFT, SALE_RATE_SHIFT};

const SALE_RATE_FRACTION_MASK: u128 = (1u128 << SALE_RATE_SHIFT) - 1;

/// Sale rate (Q32.32 tokens per second) that sells `amount` over `duration`
/// seconds, rounded down
pub fn compute_sale_rate(amount: u128, duration: u64) -> Option<u128> {
    if duration == 0 {
        return None;
    }
    amount
        .checked_mul(1u128 << SALE_RATE_SHIFT)
        .map(|scaled| scaled / duration as u128)
}

/// Tokens sold by `sale_rate` over `duration` seconds
///
/// The rate is split into integer and fractional halves so the product never
/// overflows for rates up to 2^112 and durations up to 2^32.
pub fn compute_amount_from_sale_rate(sale_rate: u128, duration: u64, round_up: bool) -> Option<u128> {
    let duration = duration as u128;
    let whole = (sale_rate >> SALE_RATE_SHIFT).checked_mul(duration)?;
    let fraction = (sale_rate & SALE_RATE_FRACTION_MASK).checked_mul(duration)?;

    let mut amount = whole.checked_add(fraction >> SALE_RATE_SHIFT)?;
    if round_up && fraction & SALE_RATE_FRACTION_MASK != 0 {
        amount = amount.checked_add(1)?;
    }
    Some(amount)
}

/// Reward rate increment for `purchased` tokens shared by `sale_rate`:
/// (purchased << 128) / sale_rate
pub fn reward_rate_delta(env: &Env, purchased: u128, sale_rate: u128) -> Option<U256> {
    if sale_rate == 0 {
        return None;
    }
    let scaled = U256::from_u128(env, purchased).shl(REWARD_RATE_SHIFT);
    Some(scaled.div(&U256::from_u128(env, sale_rate)))
}

/// Proceeds owed to `sale_rate` for a reward rate difference:
/// (reward_rate_diff * sale_rate) >> 128, rounded down
pub fn proceeds_from_reward_rate(env: &Env, reward_rate_diff: &U256, sale_rate: u128) -> Option<u128> {
    if sale_rate == 0 {
        return Some(0);
    }
    reward_rate_diff
        .mul(&U256::from_u128(env, sale_rate))
        .shr(REWARD_RATE_SHIFT)
        .to_u128()
}
