// Riptide constants
//
// Grouped by functionality. Fixed-point scales are expressed as shifts so
// that every formula states its scale explicitly.

// ============================================================
// FIXED POINT
// ============================================================

/// Q64 multiplier (2^64) for Q64.64 prices and fees-per-liquidity
pub const Q64: u128 = 1u128 << 64;

/// Sale rates are Q32.32 tokens per second
pub const SALE_RATE_SHIFT: u32 = 32;

/// Reward rates are proceeds per unit of sale rate scaled by 2^128
pub const REWARD_RATE_SHIFT: u32 = 128;

// ============================================================
// SQRT PRICE BOUNDS (Q64.64)
// ============================================================

/// Lowest sqrt price the core will ever hand to a pool as a limit
pub const MIN_SQRT_PRICE: u128 = 4295128739;

/// Highest sqrt price the core will ever hand to a pool as a limit
pub const MAX_SQRT_PRICE: u128 = u128::MAX >> 1;

// ============================================================
// TIME GRID
// ============================================================

/// Smallest spacing between valid order boundaries, in seconds
pub const MIN_TIME_STEP: u64 = 256;

/// Distance from now below which the minimum step applies (16^3)
pub const MIN_STEP_HORIZON: u64 = 4096;

/// Longest distance from now an order boundary may be placed
pub const MAX_ORDER_DURATION: u64 = u32::MAX as u64;

/// Upper bound on valid boundaries strictly after now:
/// 16 steps of 256s below the horizon, then 15 per power of 16 up to 16^8
pub const MAX_VALID_TIMES: u128 = 91;

// ============================================================
// SALE RATE BOUNDS
// ============================================================

/// Type maximum of a running sale rate (112 bits)
pub const MAX_SALE_RATE: u128 = (1u128 << 112) - 1;

/// Largest absolute sale rate change carried by a single boundary.
/// MAX_VALID_TIMES boundaries at this delta sum to at most MAX_SALE_RATE.
pub const MAX_ABS_SALE_RATE_DELTA: u128 = MAX_SALE_RATE / MAX_VALID_TIMES;
