use soroban_sdk::contracttype;

/// Parameters handed to the external pool's swap primitive
///
/// `amount > 0` is an exact input of the specified token, `amount < 0` an
/// exact output. `sqrt_price_limit` bounds how far the pool price may move
/// (Q64.64).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SwapParams {
    pub amount: i128,
    pub is_token1: bool,
    pub sqrt_price_limit: u128,
}

/// Balance change reported by the external pool, from the pool's side:
/// positive = the pool received tokens, negative = the pool paid them out
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BalanceUpdate {
    pub delta0: i128,
    pub delta1: i128,
    pub sqrt_price: u128,
}

impl BalanceUpdate {
    pub fn is_zero(&self) -> bool {
        self.delta0 == 0 && self.delta1 == 0
    }

    /// Delta of the token the swap amount was specified in
    pub fn specified_delta(&self, params: &SwapParams) -> i128 {
        if params.is_token1 {
            self.delta1
        } else {
            self.delta0
        }
    }

    /// True when the pool stopped before filling the specified amount
    pub fn is_partial_fill(&self, params: &SwapParams) -> bool {
        self.specified_delta(params) != params.amount
    }
}
