use riptide_twamm::ExecutionSummary;
use riptide_types::{BalanceUpdate, OrderKey, SwapParams};
use soroban_sdk::{contracttype, Address};

/// Registration record of an external pool
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    pub token0: Address,
    pub token1: Address,
    pub twamm_enabled: bool,
}

impl PoolConfig {
    pub fn token(&self, is_token1: bool) -> Address {
        if is_token1 {
            self.token1.clone()
        } else {
            self.token0.clone()
        }
    }
}

/// One step of a `lock` batch; the caller is the owner of every position,
/// order and saved balance touched
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Action {
    /// (token, amount): transfer from the caller and credit what arrived
    Pay(Address, i128),
    /// (token, recipient, amount)
    Withdraw(Address, Address, i128),
    /// (pool, params, allow_partial)
    Swap(Address, SwapParams, bool),
    /// (pool, salt, liquidity_delta)
    UpdatePosition(Address, u64, i128),
    /// (pool, salt)
    CollectFees(Address, u64),
    /// (pool, amount0, amount1): donate fee income to the pool's liquidity
    AccumulateFees(Address, u128, u128),
    /// (pool, key, sell amount)
    PlaceOrder(Address, OrderKey, u128),
    /// (pool, key, sale_rate_delta)
    UpdateOrder(Address, OrderKey, i128),
    /// (pool, key)
    CollectProceeds(Address, OrderKey),
    /// (pool)
    ExecuteVirtualOrders(Address),
    /// (token, salt, delta): positive moves credit into the saved balance
    SaveBalance(Address, u64, i128),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ActionResult {
    Paid(i128),
    Withdrawn(i128),
    /// (update, limit_reached)
    Swapped(BalanceUpdate, bool),
    PositionUpdated(BalanceUpdate),
    FeesCollected(u128, u128),
    FeesAccumulated,
    /// Signed sell-token amount: positive paid in, negative refunded
    OrderUpdated(i128),
    ProceedsCollected(u128),
    VirtualOrdersExecuted(ExecutionSummary),
    /// New saved balance
    BalanceSaved(u128),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OrderInfo {
    pub sale_rate: u128,
    /// Proceeds collectable as of the pool's last execution
    pub proceeds: u128,
    /// Sell tokens not yet sold
    pub remaining: u128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionInfo {
    pub liquidity: u128,
    pub fees0: u128,
    pub fees1: u128,
}
