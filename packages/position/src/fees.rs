// Fee accumulator
//
// fees_per_liquidity grows by amount * 2^64 / liquidity. A position earns
// (accumulator - checkpoint) * liquidity / 2^64, rounded down, so the sum of
// all positions never exceeds what was accumulated.
//
// The accumulator wraps modulo 2^128 and only differences are ever read, so
// a pool can keep accruing forever. A checkpoint stays exact while the
// growth since it is below 2^128.

use riptide_math::{mul_div_checked, Q64};
use riptide_types::RiptideError;
use soroban_sdk::Env;

use crate::types::{PoolFees, Position};

/// Distribute realized fee income over the pool's liquidity
pub fn accumulate_fees(env: &Env, fees: &mut PoolFees, amount0: u128, amount1: u128) -> Result<(), RiptideError> {
    if amount0 == 0 && amount1 == 0 {
        return Ok(());
    }
    if fees.liquidity == 0 {
        return Err(RiptideError::NoLiquidity);
    }

    let growth = |amount: u128| {
        mul_div_checked(env, amount, Q64, fees.liquidity).ok_or(RiptideError::FeeAccumulatorOverflow)
    };
    let next0 = fees.fees_per_liquidity0.wrapping_add(growth(amount0)?);
    let next1 = fees.fees_per_liquidity1.wrapping_add(growth(amount1)?);
    let reserve0 = fees.reserve0.checked_add(amount0).ok_or(RiptideError::Overflow)?;
    let reserve1 = fees.reserve1.checked_add(amount1).ok_or(RiptideError::Overflow)?;

    fees.fees_per_liquidity0 = next0;
    fees.fees_per_liquidity1 = next1;
    fees.reserve0 = reserve0;
    fees.reserve1 = reserve1;
    Ok(())
}

/// Fees earned since the checkpoint at the position's current liquidity
pub(crate) fn earned_since_checkpoint(env: &Env, position: &Position, fees: &PoolFees) -> Result<(u128, u128), RiptideError> {
    if position.liquidity == 0 {
        return Ok((0, 0));
    }

    let earned = |current: u128, last: u128| {
        let growth = current.wrapping_sub(last);
        mul_div_checked(env, position.liquidity, growth, Q64).ok_or(RiptideError::Overflow)
    };
    Ok((
        earned(fees.fees_per_liquidity0, position.fees_per_liquidity_last0)?,
        earned(fees.fees_per_liquidity1, position.fees_per_liquidity_last1)?,
    ))
}

/// Everything the position could collect right now
pub fn pending_fees(env: &Env, position: &Position, fees: &PoolFees) -> Result<(u128, u128), RiptideError> {
    let (earned0, earned1) = earned_since_checkpoint(env, position, fees)?;
    Ok((
        position.fees_owed0.checked_add(earned0).ok_or(RiptideError::Overflow)?,
        position.fees_owed1.checked_add(earned1).ok_or(RiptideError::Overflow)?,
    ))
}
