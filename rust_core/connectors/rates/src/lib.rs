//! Lending-rate source for the two assets of the tracked pair.

pub mod heuristic;
pub mod rest;

pub use heuristic::breakeven_days;
pub use rest::{fetch_supply_rates, run_rate_poll, split_pair, DEFAULT_RATES_URL};
