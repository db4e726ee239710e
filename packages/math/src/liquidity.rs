// SPDX-License-Identifier: MIT
// Liquidity Calculations

use soroban_sdk::Env;
use crate::q64::{mul_div, mul_q64, div_round_up, ONE_X64};

/// Calculate token0 amount for a liquidity and price range
pub fn get_amount_0_delta(
    sqrt_price_a: u128,
    sqrt_price_b: u128,
    liquidity: u128,
    round_up: bool,
) -> u128 {
    let (sqrt_lower, sqrt_upper) = if sqrt_price_a < sqrt_price_b {
        (sqrt_price_a, sqrt_price_b)
    } else {
        (sqrt_price_b, sqrt_price_a)
    };

    let delta_price = sqrt_upper.saturating_sub(sqrt_lower);
    let product_prices = mul_q64(sqrt_upper, sqrt_lower);

    if product_prices == 0 { return 0; }

    let numerator = liquidity.saturating_mul(delta_price);

    if round_up {
        div_round_up(numerator, product_prices)
    } else {
        numerator / product_prices
    }
}

/// Calculate token1 amount for a liquidity and price range
pub fn get_amount_1_delta(
    sqrt_price_a: u128,
    sqrt_price_b: u128,
    liquidity: u128,
    round_up: bool,
) -> u128 {
    let (sqrt_lower, sqrt_upper) = if sqrt_price_a < sqrt_price_b {
        (sqrt_price_a, sqrt_price_b)
    } else {
        (sqrt_price_b, sqrt_price_a)
    };

    let delta = sqrt_upper.saturating_sub(sqrt_lower);
    let product = liquidity.saturating_mul(delta);

    if round_up {
        if product & 0xFFFFFFFFFFFFFFFF != 0 {
            (product >> 64) + 1
        } else {
            product >> 64
        }
    } else {
        product >> 64
    }
}

/// Virtual reserves backing `liquidity` at `sqrt_price` on an unbounded
/// range: (L / sqrt(P), L * sqrt(P))
pub fn get_virtual_reserves(env: &Env, liquidity: u128, sqrt_price: u128) -> (u128, u128) {
    if liquidity == 0 || sqrt_price == 0 {
        return (0, 0);
    }

    let reserve0 = mul_div(env, liquidity, ONE_X64, sqrt_price);
    let reserve1 = mul_div(env, liquidity, sqrt_price, ONE_X64);
    (reserve0, reserve1)
}
