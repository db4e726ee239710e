// Riptide Ledger Package
//
// Flash accounting: every value movement inside a lock is recorded as a
// signed debt against that lock, and the lock only closes once all of its
// debts are back to zero.

#![no_std]

pub mod ledger;
pub mod saved;

pub use ledger::{Ledger, Lock};
pub use saved::apply_saved_delta;
