// Position Management Logic

use riptide_types::RiptideError;
use soroban_sdk::Env;

use crate::fees::pending_fees;
use crate::types::{PoolFees, Position};

/// Bank fees at the current liquidity and move the checkpoint to the
/// accumulator
fn bank_fees(env: &Env, position: &mut Position, fees: &PoolFees) -> Result<(), RiptideError> {
    let (owed0, owed1) = pending_fees(env, position, fees)?;
    position.fees_owed0 = owed0;
    position.fees_owed1 = owed1;
    position.fees_per_liquidity_last0 = fees.fees_per_liquidity0;
    position.fees_per_liquidity_last1 = fees.fees_per_liquidity1;
    Ok(())
}

fn apply_liquidity_delta(liquidity: u128, delta: i128) -> Result<u128, RiptideError> {
    if delta >= 0 {
        liquidity.checked_add(delta as u128).ok_or(RiptideError::Overflow)
    } else {
        liquidity
            .checked_sub(delta.unsigned_abs())
            .ok_or(RiptideError::InsufficientLiquidity)
    }
}

/// Change a position's liquidity
///
/// Fees earned so far are banked at the OLD liquidity first and the
/// checkpoint is reassigned to the accumulator, so the new liquidity only
/// earns from here on.
pub fn update_position(
    env: &Env,
    position: &mut Position,
    fees: &mut PoolFees,
    liquidity_delta: i128,
) -> Result<(), RiptideError> {
    let liquidity = apply_liquidity_delta(position.liquidity, liquidity_delta)?;
    let pool_liquidity = apply_liquidity_delta(fees.liquidity, liquidity_delta)?;

    bank_fees(env, position, fees)?;
    position.liquidity = liquidity;
    fees.liquidity = pool_liquidity;
    Ok(())
}

/// Pay out every fee the position has earned
///
/// The payout comes out of the pool's fee reserves; a payout larger than the
/// realized income fails instead of going negative.
pub fn collect_fees(env: &Env, position: &mut Position, fees: &mut PoolFees) -> Result<(u128, u128), RiptideError> {
    let (amount0, amount1) = pending_fees(env, position, fees)?;
    let reserve0 = fees.reserve0.checked_sub(amount0).ok_or(RiptideError::SavedBalanceOverflow)?;
    let reserve1 = fees.reserve1.checked_sub(amount1).ok_or(RiptideError::SavedBalanceOverflow)?;

    bank_fees(env, position, fees)?;
    position.fees_owed0 = 0;
    position.fees_owed1 = 0;
    fees.reserve0 = reserve0;
    fees.reserve1 = reserve1;
    Ok((amount0, amount1))
}
