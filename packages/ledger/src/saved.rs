use riptide_types::RiptideError;

/// Apply a signed delta to a saved balance
///
/// Shared by owner saved balances and TWAMM saved balances.
/// Never clamps: going below zero or above u128::MAX is an error.
pub fn apply_saved_delta(balance: u128, delta: i128) -> Result<u128, RiptideError> {
    let updated = if delta >= 0 {
        balance.checked_add(delta as u128)
    } else {
        balance.checked_sub(delta.unsigned_abs())
    };
    updated.ok_or(RiptideError::SavedBalanceOverflow)
}
