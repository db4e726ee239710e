use riptide_types::{BalanceUpdate, RiptideError, SwapParams};

/// The external pool virtual orders trade against
///
/// Deltas are reported from the pool's side: positive means the pool
/// received tokens.
pub trait SwapVenue {
    fn sqrt_price(&self) -> u128;

    fn swap(&mut self, params: &SwapParams) -> Result<BalanceUpdate, RiptideError>;
}
