use soroban_sdk::contracttype;

/// Which token an order sells
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Side {
    /// Sells token0, buys token1
    Token0 = 0,
    /// Sells token1, buys token0
    Token1 = 1,
}

/// Identifies a virtual order within a pool for one owner
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OrderKey {
    pub side: Side,
    pub start_time: u64,
    pub end_time: u64,
    pub salt: u64,
}
