//! Cart totals and list patches.

pub mod list;
mod totals;

pub use totals::CartTotals;
