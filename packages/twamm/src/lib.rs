// Riptide TWAMM Package
//
// Virtual orders sell a token at a constant rate between two points on the
// valid time grid. Orders in one pool share a running sale rate per side,
// changed at boundaries through time buckets, and a reward rate per side
// from which each order derives its proceeds.

#![no_std]

pub mod execute;
pub mod orders;
pub mod rate;
pub mod time;
pub mod types;
pub mod venue;

pub use execute::execute_virtual_orders;
pub use orders::{collect_proceeds, pending_proceeds, reward_rate_inside, sale_rate_for_amount, update_order};
pub use rate::{add_bucket_delta, add_sale_rate_delta};
pub use time::{compute_step_size, is_time_valid, next_valid_time};
pub use types::{ExecutionSummary, OrderState, RewardRates, SaleRateState, SavedAmounts, TimeBucket, TwammPool};
pub use venue::SwapVenue;
