// Riptide Math Package

#![no_std]

pub mod constants;
pub mod q64;
pub mod sqrt_price;
pub mod liquidity;
pub mod sale_rate;

// Re-export commonly used items from constants
pub use constants::*;

// Re-export Q64 arithmetic functions
pub use q64::{
    mul_q64,
    div_q64,
    mul_div,
    mul_div_checked,
    div_round_up,
    isqrt,
    i128_to_u128_safe,
    u128_to_i128,
    ONE_X64,
};

// Re-export sqrt price functions
pub use sqrt_price::{
    equilibrium_sqrt_price,
    get_next_sqrt_price_from_input,
    compute_swap_step_with_target,
};

// Re-export liquidity functions
pub use liquidity::{get_amount_0_delta, get_amount_1_delta, get_virtual_reserves};

// Re-export sale rate functions
pub use sale_rate::{
    compute_sale_rate,
    compute_amount_from_sale_rate,
    reward_rate_delta,
    proceeds_from_reward_rate,
};
