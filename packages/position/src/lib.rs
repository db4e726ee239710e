#![no_std]

pub mod types;
pub mod manager;
pub mod fees;

pub use types::{PoolFees, Position};
pub use manager::{collect_fees, update_position};
pub use fees::{accumulate_fees, pending_fees};
