use soroban_sdk::contracttype;

/// Liquidity provided to one pool by one owner under one salt
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Position {
    pub liquidity: u128,
    pub fees_per_liquidity_last0: u128,
    pub fees_per_liquidity_last1: u128,
    pub fees_owed0: u128,
    pub fees_owed1: u128,
}

impl Position {
    pub fn has_liquidity(&self) -> bool {
        self.liquidity > 0
    }

    pub fn has_uncollected_fees(&self) -> bool {
        self.fees_owed0 > 0 || self.fees_owed1 > 0
    }

    /// No liquidity and nothing owed: the record can be dropped
    pub fn is_empty(&self) -> bool {
        !self.has_liquidity() && !self.has_uncollected_fees()
    }
}

/// Fee state of a pool
///
/// `fees_per_liquidity*` are Q64.64 and wrap modulo 2^128. Reserves hold the fee
/// income that has been realized but not yet collected.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PoolFees {
    pub fees_per_liquidity0: u128,
    pub fees_per_liquidity1: u128,
    pub liquidity: u128,
    pub reserve0: u128,
    pub reserve1: u128,
}
