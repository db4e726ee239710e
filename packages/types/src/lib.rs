#![no_std]

pub mod error;
pub mod order;
pub mod swap;

pub use error::RiptideError;
pub use order::{OrderKey, Side};
pub use swap::{BalanceUpdate, SwapParams};
