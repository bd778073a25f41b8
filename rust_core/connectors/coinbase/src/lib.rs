//! Coinbase level-2 market-data connector.

pub mod backoff;
pub mod parser;
pub mod ws;

pub use ws::{run_level2_feed, FeedConfig, DEFAULT_FEED_URL};
