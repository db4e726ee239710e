// SPDX-License-Identifier: MIT
// Sqrt Price Calculations

use soroban_sdk::Env;
use crate::constants::{MAX_SQRT_PRICE, MIN_SQRT_PRICE};
use crate::q64::{div_q64, isqrt, mul_div, ONE_X64};

/// Sqrt price (Q64.64) at which two opposing sale rates exchange at par:
/// sqrt(sale_rate1 / sale_rate0), clamped to the valid price range.
///
/// Prices are quoted as token1 per token0, so sellers of token0 push the
/// price down and sellers of token1 push it up.
pub fn equilibrium_sqrt_price(env: &Env, sale_rate0: u128, sale_rate1: u128) -> u128 {
    if sale_rate0 == 0 {
        return MAX_SQRT_PRICE;
    }
    if sale_rate1 == 0 {
        return MIN_SQRT_PRICE;
    }

    let ratio_x64 = mul_div(env, sale_rate1, ONE_X64, sale_rate0);

    // Keep 64 fractional bits when the ratio leaves room for them
    let sqrt_price = if ratio_x64 <= u64::MAX as u128 {
        isqrt(ratio_x64 << 64)
    } else {
        isqrt(ratio_x64) << 32
    };

    sqrt_price.clamp(MIN_SQRT_PRICE, MAX_SQRT_PRICE)
}

/// Calculate next sqrt price given input amount
pub fn get_next_sqrt_price_from_input(
    env: &Env,
    sqrt_price: u128,
    liquidity: u128,
    amount_in: u128,
    zero_for_one: bool,
) -> u128 {
    if amount_in == 0 || liquidity == 0 {
        return sqrt_price;
    }

    if zero_for_one {
        let product = amount_in.saturating_mul(sqrt_price);
        let numerator = liquidity.saturating_mul(sqrt_price);
        let liq_shifted = liquidity << 64;
        let denominator = liq_shifted.saturating_add(product);

        if denominator == 0 { return sqrt_price; }
        mul_div(env, numerator, ONE_X64, denominator)
    } else {
        let quotient = div_q64(amount_in, liquidity);
        sqrt_price.saturating_add(quotient)
    }
}

/// Compute a single-range swap step toward a target price
///
/// # Returns
/// `(sqrt_price_next, amount_in, amount_out)`
pub fn compute_swap_step_with_target(
    env: &Env,
    sqrt_price_current: u128,
    liquidity: u128,
    amount_remaining: u128,
    zero_for_one: bool,
    sqrt_price_target: u128,
) -> (u128, u128, u128) {
    use crate::liquidity::{get_amount_0_delta, get_amount_1_delta};

    let next_price_input = get_next_sqrt_price_from_input(
        env, sqrt_price_current, liquidity, amount_remaining, zero_for_one
    );

    let target_reached = if zero_for_one {
        next_price_input <= sqrt_price_target
    } else {
        next_price_input >= sqrt_price_target
    };

    let sqrt_price_next = if target_reached {
        sqrt_price_target
    } else {
        next_price_input
    };

    let (amount_in, amount_out) = if zero_for_one {
        (
            get_amount_0_delta(sqrt_price_current, sqrt_price_next, liquidity, true),
            get_amount_1_delta(sqrt_price_current, sqrt_price_next, liquidity, false),
        )
    } else {
        (
            get_amount_1_delta(sqrt_price_current, sqrt_price_next, liquidity, true),
            get_amount_0_delta(sqrt_price_current, sqrt_price_next, liquidity, false),
        )
    };

    // Without reaching the target the whole remainder is consumed
    let final_amount_in = if target_reached {
        amount_in.min(amount_remaining)
    } else {
        amount_remaining
    };

    (sqrt_price_next, final_amount_in, amount_out)
}
