#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeMap;

use riptide_math::{compute_swap_step_with_target, ONE_X64, SALE_RATE_SHIFT};
use riptide_twamm::{RewardRates, SwapVenue};
use riptide_types::{BalanceUpdate, OrderKey, RiptideError, Side, SwapParams};
use soroban_sdk::Env;

pub const DEFAULT_LIQUIDITY: u128 = 1_000_000_000_000;

/// Whole tokens per second as a Q32.32 sale rate
pub fn rate(tokens_per_second: u128) -> u128 {
    tokens_per_second << SALE_RATE_SHIFT
}

pub fn order_key(side: Side, start_time: u64, end_time: u64) -> OrderKey {
    OrderKey { side, start_time, end_time, salt: 0 }
}

/// Single-range constant product venue driven by the math swap step
pub struct MockVenue {
    env: Env,
    pub sqrt_price: u128,
    pub liquidity: u128,
    pub swaps: std::vec::Vec<SwapParams>,
}

impl MockVenue {
    pub fn new(env: &Env, sqrt_price: u128, liquidity: u128) -> Self {
        Self { env: env.clone(), sqrt_price, liquidity, swaps: std::vec::Vec::new() }
    }

    pub fn at_unit_price(env: &Env) -> Self {
        Self::new(env, ONE_X64, DEFAULT_LIQUIDITY)
    }
}

impl SwapVenue for MockVenue {
    fn sqrt_price(&self) -> u128 {
        self.sqrt_price
    }

    fn swap(&mut self, params: &SwapParams) -> Result<BalanceUpdate, RiptideError> {
        self.swaps.push(params.clone());
        if self.liquidity == 0 {
            return Ok(BalanceUpdate { delta0: 0, delta1: 0, sqrt_price: self.sqrt_price });
        }

        let zero_for_one = !params.is_token1;
        let (next, amount_in, amount_out) = compute_swap_step_with_target(
            &self.env,
            self.sqrt_price,
            self.liquidity,
            params.amount as u128,
            zero_for_one,
            params.sqrt_price_limit,
        );
        self.sqrt_price = next;

        let (delta0, delta1) = if zero_for_one {
            (amount_in as i128, -(amount_out as i128))
        } else {
            (-(amount_out as i128), amount_in as i128)
        };
        Ok(BalanceUpdate { delta0, delta1, sqrt_price: next })
    }
}

/// Venue that claims to have taken more than it was offered
pub struct GreedyVenue;

impl SwapVenue for GreedyVenue {
    fn sqrt_price(&self) -> u128 {
        ONE_X64
    }

    fn swap(&mut self, params: &SwapParams) -> Result<BalanceUpdate, RiptideError> {
        let (delta0, delta1) = if params.is_token1 {
            (-1, params.amount + 1)
        } else {
            (params.amount + 1, -1)
        };
        Ok(BalanceUpdate { delta0, delta1, sqrt_price: ONE_X64 })
    }
}

/// Reward rates recorded at crossed boundaries
#[derive(Default)]
pub struct RateLog {
    rates: RefCell<BTreeMap<u64, RewardRates>>,
}

impl RateLog {
    pub fn record(&self) -> impl FnMut(u64, &RewardRates) + '_ {
        move |time, rates| {
            self.rates.borrow_mut().insert(time, rates.clone());
        }
    }

    pub fn before(&self) -> impl Fn(u64) -> Option<RewardRates> + '_ {
        move |time| self.rates.borrow().get(&time).cloned()
    }

    pub fn contains(&self, time: u64) -> bool {
        self.rates.borrow().contains_key(&time)
    }
}
