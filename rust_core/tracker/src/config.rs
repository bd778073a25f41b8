use clap::Parser;
use connector_coinbase::DEFAULT_FEED_URL;
use connector_rates::{split_pair, DEFAULT_RATES_URL};
use rust_decimal::Decimal;

/// Tracks a level-2 order book and reports the volume offered below (and
/// bid above) a fixed price threshold.
#[derive(Parser, Debug, Clone)]
#[command(name = "depth-tracker", version)]
pub struct Config {
    /// Product to track
    #[arg(long, env = "TRACKER_PAIR", default_value = "DAI-USDC")]
    pub pair: String,

    /// Threshold price the volumes are measured against
    #[arg(long, env = "TRACKER_THRESHOLD", default_value = "1")]
    pub threshold: Decimal,

    /// Market-data websocket endpoint
    #[arg(long, env = "TRACKER_FEED_URL", default_value = DEFAULT_FEED_URL)]
    pub feed_url: String,

    /// Lending-rate document endpoint
    #[arg(long, env = "TRACKER_RATES_URL", default_value = DEFAULT_RATES_URL)]
    pub rates_url: String,

    #[arg(long, env = "TRACKER_RATES_INTERVAL_SECS", default_value_t = 60)]
    pub rates_interval_secs: u64,

    /// Do not poll lending rates
    #[arg(long)]
    pub no_rates: bool,

    #[arg(long, default_value_t = 1024)]
    pub channel_capacity: usize,
}

impl Config {
    pub fn validate(&self) -> Result<(), String> {
        if self.threshold <= Decimal::ZERO {
            return Err(format!("threshold must be positive, got {}", self.threshold));
        }
        if self.channel_capacity == 0 {
            return Err("channel capacity must be at least 1".to_string());
        }
        if !self.no_rates && split_pair(&self.pair).is_none() {
            return Err(format!("cannot derive assets from pair {:?}", self.pair));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["depth-tracker"]).unwrap();
        assert_eq!(config.pair, "DAI-USDC");
        assert_eq!(config.threshold, dec!(1));
        assert_eq!(config.feed_url, DEFAULT_FEED_URL);
        assert_eq!(config.rates_interval_secs, 60);
        assert!(!config.no_rates);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_flags() {
        let config = Config::try_parse_from([
            "depth-tracker",
            "--pair",
            "BTC-USD",
            "--threshold",
            "65000.5",
            "--no-rates",
        ])
        .unwrap();
        assert_eq!(config.pair, "BTC-USD");
        assert_eq!(config.threshold, dec!(65000.5));
        assert!(config.no_rates);
    }

    #[test]
    fn test_rejects_bad_threshold() {
        assert!(Config::try_parse_from(["depth-tracker", "--threshold", "one"]).is_err());
        let config = Config::try_parse_from(["depth-tracker", "--threshold", "0"]).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unsplittable_pair_when_polling_rates() {
        let config = Config::try_parse_from(["depth-tracker", "--pair", "DAIUSDC"]).unwrap();
        assert!(config.validate().is_err());
        let config =
            Config::try_parse_from(["depth-tracker", "--pair", "DAIUSDC", "--no-rates"]).unwrap();
        assert!(config.validate().is_ok());
    }
}
