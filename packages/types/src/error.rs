// Error handling for the Riptide workspace
//
// One typed error enum shared by every package and the core contract.
// Codes are grouped by subsystem so that a failing transaction can be
// attributed from the numeric code alone.

use soroban_sdk::{contracterror, symbol_short, Symbol};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum RiptideError {
    // Ledger errors (100-199)
    /// No lock is open
    NoActiveLock = 100,
    /// Only the innermost open lock may mutate or close its state
    NotInnermostLock = 101,
    /// Lock closed while some debt entry is nonzero
    DebtsNotZeroed = 102,
    /// Debt entry left the i128 range
    DebtOverflow = 103,
    /// Payment delta does not fit a debt entry
    PaymentOverflow = 104,
    /// Amount must be non-negative
    InvalidAmount = 105,
    /// Lock id counter exhausted
    LockIdOverflow = 106,

    // Saved balance errors (200-299)
    /// Saved balance would go below zero or above u128::MAX
    SavedBalanceOverflow = 200,

    // TWAMM errors (300-399)
    /// Running sale rate left [0, MAX_SALE_RATE]
    RateDeltaOverflow = 300,
    /// A single boundary (or immediate change) exceeds the per-boundary cap
    MaxRatePerBoundaryExceeded = 301,
    /// Order start/end times are not on the valid time grid
    InvalidTime = 302,
    /// Order has already ended and cannot change its sale rate
    OrderAlreadyEnded = 303,
    /// Swap venue reported a delta larger than the notional amount sold
    InvalidSwapResult = 304,
    /// Pool was registered without virtual orders
    TwammNotEnabled = 305,

    // Swap errors (400-499)
    /// Swap stopped at its price limit before the specified amount filled
    SlippagePriceLimitReached = 400,

    // Position and fee errors (500-599)
    /// Position liquidity would become negative
    InsufficientLiquidity = 500,
    /// Pool has no liquidity to distribute fees over
    NoLiquidity = 501,
    /// Fees-per-liquidity accumulator overflowed
    FeeAccumulatorOverflow = 502,

    // Configuration errors (600-699)
    /// Contract has already been initialized
    AlreadyInitialized = 600,
    /// Contract has not been initialized
    NotInitialized = 601,
    /// Pool is unknown to the core
    PoolNotRegistered = 602,
    /// Pool is already registered
    PoolAlreadyRegistered = 603,
    /// Tokens must be distinct and sorted (token0 < token1)
    InvalidTokenPair = 604,

    // Math errors (700-799)
    /// Arithmetic overflow outside a more specific bound
    Overflow = 700,
}

impl RiptideError {
    /// Short symbol used as an event topic when a recoverable condition
    /// is reported instead of raised
    pub fn to_symbol(&self) -> Symbol {
        match self {
            RiptideError::SlippagePriceLimitReached => symbol_short!("LIMIT"),
            RiptideError::DebtsNotZeroed => symbol_short!("UNSETTLED"),
            RiptideError::SavedBalanceOverflow => symbol_short!("SAVED_OF"),
            RiptideError::RateDeltaOverflow => symbol_short!("RATE_OF"),
            _ => symbol_short!("ERROR"),
        }
    }
}
