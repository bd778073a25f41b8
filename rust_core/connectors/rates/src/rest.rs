use std::time::Duration;

use connectors_common::types::{RateDocument, RatePair};
use connectors_common::ConnectorError;
use log::{debug, warn};
use reqwest::Client;
use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};

pub const DEFAULT_RATES_URL: &str = "https://api.compound.finance/api/v2/ctoken";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Splits a pair symbol such as `DAI-USDC` into its base and quote assets.
pub fn split_pair(pair: &str) -> Option<(&str, &str)> {
    let (base, quote) = pair.split_once(|c: char| c == '-' || c == '/')?;
    if base.is_empty() || quote.is_empty() {
        return None;
    }
    Some((base, quote))
}

/// Picks the supply rates of `base` and `quote` out of a rate document.
pub fn select_rates(
    doc: &RateDocument,
    base: &str,
    quote: &str,
) -> Result<RatePair, ConnectorError> {
    let rate_of = |symbol: &str| {
        doc.tokens
            .iter()
            .find(|t| t.underlying_symbol.eq_ignore_ascii_case(symbol))
            .map(|t| t.supply_rate.value)
            .ok_or_else(|| ConnectorError::Parse(format!("no rate record for {}", symbol)))
    };
    Ok(RatePair {
        base: rate_of(base)?,
        quote: rate_of(quote)?,
    })
}

pub async fn fetch_supply_rates(
    client: &Client,
    url: &str,
    base: &str,
    quote: &str,
) -> Result<RatePair, ConnectorError> {
    let resp = client
        .get(url)
        .timeout(REQUEST_TIMEOUT)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| ConnectorError::Network(e.to_string()))?;
    let text = resp
        .text()
        .await
        .map_err(|e| ConnectorError::Network(e.to_string()))?;
    let doc: RateDocument = serde_json::from_str(&text)?;
    select_rates(&doc, base, quote)
}

/// Polls the rate source every `interval_secs` and publishes the latest
/// rates. Failed polls keep the previous value and are retried on the next
/// tick. Returns when shutdown is signalled.
pub async fn run_rate_poll(
    tx: watch::Sender<Option<RatePair>>,
    url: String,
    pair: String,
    interval_secs: u64,
    mut shutdown: watch::Receiver<bool>,
) -> Result<(), ConnectorError> {
    let (base, quote) = split_pair(&pair)
        .ok_or_else(|| ConnectorError::Other(format!("cannot split pair {}", pair)))?;
    let client = Client::new();
    let mut ticker = interval(Duration::from_secs(interval_secs.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match fetch_supply_rates(&client, &url, base, quote).await {
                    Ok(rates) => {
                        debug!("supply rates {}={} {}={}", base, rates.base, quote, rates.quote);
                        tx.send_replace(Some(rates));
                    }
                    Err(e) => {
                        warn!("rate poll error for {}: {}", pair, e);
                    }
                }
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const BODY: &str = r#"{"cToken":[
        {"symbol":"cETH","underlying_symbol":"ETH","supply_rate":{"value":"0.0011"}},
        {"symbol":"cDAI","underlying_symbol":"DAI","supply_rate":{"value":"0.0213"}},
        {"symbol":"cUSDC","underlying_symbol":"USDC","supply_rate":{"value":"0.0172"}}
    ]}"#;

    #[test]
    fn test_split_pair() {
        assert_eq!(split_pair("DAI-USDC"), Some(("DAI", "USDC")));
        assert_eq!(split_pair("BTC/USD"), Some(("BTC", "USD")));
        assert_eq!(split_pair("DAIUSDC"), None);
        assert_eq!(split_pair("-USDC"), None);
    }

    #[test]
    fn test_select_rates() {
        let doc: RateDocument = serde_json::from_str(BODY).unwrap();
        let rates = select_rates(&doc, "DAI", "usdc").unwrap();
        assert_eq!(
            rates,
            RatePair {
                base: dec!(0.0213),
                quote: dec!(0.0172),
            }
        );
    }

    #[test]
    fn test_select_rates_missing_symbol() {
        let doc: RateDocument = serde_json::from_str(BODY).unwrap();
        assert!(matches!(select_rates(&doc, "DAI", "USDT"), Err(ConnectorError::Parse(_))));
    }

    #[tokio::test]
    async fn test_fetch_supply_rates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/ctoken"))
            .respond_with(ResponseTemplate::new(200).set_body_string(BODY))
            .mount(&server)
            .await;

        let url = format!("{}/api/v2/ctoken", server.uri());
        let rates = fetch_supply_rates(&Client::new(), &url, "DAI", "USDC")
            .await
            .unwrap();
        assert_eq!(rates.base, dec!(0.0213));
        assert_eq!(rates.quote, dec!(0.0172));
    }

    #[tokio::test]
    async fn test_fetch_supply_rates_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let result = fetch_supply_rates(&Client::new(), &server.uri(), "DAI", "USDC").await;
        assert!(matches!(result, Err(ConnectorError::Network(_))));
    }
}
