//! Pricing Engine
//!
//! Pure functions from the order book and the resolved menu to per-diner
//! totals. Nothing here mutates state or caches results; every call
//! recomputes from the current roster and orders.

mod bill;
mod calculator;

pub use bill::*;
pub use calculator::*;
