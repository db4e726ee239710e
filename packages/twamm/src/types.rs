use riptide_types::Side;
use soroban_sdk::{contracttype, Env, Map, U256};

/// Running sale rates of a pool (Q32.32 tokens per second)
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleRateState {
    pub last_execution_time: u64,
    pub sale_rate0: u128,
    pub sale_rate1: u128,
}

impl SaleRateState {
    pub fn rate(&self, side: Side) -> u128 {
        match side {
            Side::Token0 => self.sale_rate0,
            Side::Token1 => self.sale_rate1,
        }
    }

    pub fn set_rate(&mut self, side: Side, rate: u128) {
        match side {
            Side::Token0 => self.sale_rate0 = rate,
            Side::Token1 => self.sale_rate1 = rate,
        }
    }
}

/// Net sale rate change applied when the pool crosses a boundary
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TimeBucket {
    pub sale_rate_delta0: i128,
    pub sale_rate_delta1: i128,
}

impl TimeBucket {
    pub fn delta(&self, side: Side) -> i128 {
        match side {
            Side::Token0 => self.sale_rate_delta0,
            Side::Token1 => self.sale_rate_delta1,
        }
    }

    pub fn set_delta(&mut self, side: Side, delta: i128) {
        match side {
            Side::Token0 => self.sale_rate_delta0 = delta,
            Side::Token1 => self.sale_rate_delta1 = delta,
        }
    }
}

/// Cumulative proceeds per unit of sale rate, scaled by 2^128
///
/// `value0` is paid in token1 to sellers of token0, `value1` in token0 to
/// sellers of token1. Both only ever grow.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardRates {
    pub value0: U256,
    pub value1: U256,
}

impl RewardRates {
    pub fn zero(env: &Env) -> Self {
        Self {
            value0: U256::from_u32(env, 0),
            value1: U256::from_u32(env, 0),
        }
    }

    pub fn value(&self, side: Side) -> U256 {
        match side {
            Side::Token0 => self.value0.clone(),
            Side::Token1 => self.value1.clone(),
        }
    }
}

/// Tokens the core holds for a pool's virtual orders: unsold input plus
/// purchased output not yet collected
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SavedAmounts {
    pub amount0: u128,
    pub amount1: u128,
}

impl SavedAmounts {
    pub fn get(&self, side: Side) -> u128 {
        match side {
            Side::Token0 => self.amount0,
            Side::Token1 => self.amount1,
        }
    }

    pub fn set(&mut self, side: Side, amount: u128) {
        match side {
            Side::Token0 => self.amount0 = amount,
            Side::Token1 => self.amount1 = amount,
        }
    }
}

/// All TWAMM state of one pool
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TwammPool {
    pub sale: SaleRateState,
    pub rewards: RewardRates,
    pub saved: SavedAmounts,
    /// Initialized future boundaries, ordered by time
    pub buckets: Map<u64, TimeBucket>,
}

impl TwammPool {
    pub fn new(env: &Env, now: u64) -> Self {
        Self {
            sale: SaleRateState {
                last_execution_time: now,
                sale_rate0: 0,
                sale_rate1: 0,
            },
            rewards: RewardRates::zero(env),
            saved: SavedAmounts::default(),
            buckets: Map::new(env),
        }
    }

    pub fn bucket(&self, time: u64) -> TimeBucket {
        self.buckets.get(time).unwrap_or_default()
    }
}

/// Per-order accounting
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OrderState {
    pub sale_rate: u128,
    /// Reward rate inside the order window when proceeds were last banked
    pub reward_rate_snapshot: U256,
    /// Proceeds banked but not collected
    pub proceeds_owed: u128,
}

impl OrderState {
    pub fn new(env: &Env) -> Self {
        Self {
            sale_rate: 0,
            reward_rate_snapshot: U256::from_u32(env, 0),
            proceeds_owed: 0,
        }
    }
}

/// What one execution pass did
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ExecutionSummary {
    pub start_time: u64,
    pub end_time: u64,
    /// Intervals processed
    pub steps: u32,
    /// Swaps issued to the venue
    pub swaps: u32,
    /// Boundaries crossed
    pub boundaries: u32,
    /// token0 credited to sellers of token1
    pub purchased0: u128,
    /// token1 credited to sellers of token0
    pub purchased1: u128,
}
