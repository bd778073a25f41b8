mod config;

use aggregator::{Aggregator, DepthEvent, DepthView};
use clap::Parser;
use connector_coinbase::{run_level2_feed, FeedConfig};
use connector_rates::{breakeven_days, run_rate_poll};
use connectors_common::types::RatePair;
use log::{error, info, warn};
use rust_decimal::Decimal;
use tokio::sync::{broadcast, watch};

use crate::config::Config;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    if let Err(e) = config.validate() {
        error!("invalid configuration: {}", e);
        std::process::exit(2);
    }
    info!("tracking {} against threshold {}", config.pair, config.threshold);

    let aggregator = Aggregator::new(config.threshold, config.channel_capacity);
    let mut updates = aggregator.subscribe();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let feed = FeedConfig {
        url: config.feed_url.clone(),
        pair: config.pair.clone(),
    };
    let feed_handle = tokio::spawn(run_level2_feed(feed, aggregator.sender(), shutdown_rx.clone()));

    let (rates_tx, rates_rx) = watch::channel::<Option<RatePair>>(None);
    if !config.no_rates {
        let url = config.rates_url.clone();
        let pair = config.pair.clone();
        let interval = config.rates_interval_secs;
        let shutdown = shutdown_rx.clone();
        tokio::spawn(async move {
            if let Err(e) = run_rate_poll(rates_tx, url, pair, interval, shutdown).await {
                warn!("rate poll stopped: {}", e);
            }
        });
    }

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, shutting down");
            let _ = shutdown_tx.send(true);
        }
    });

    let mut shutdown = shutdown_rx;
    let mut last_volume: Option<Decimal> = None;
    loop {
        tokio::select! {
            event = updates.recv() => match event {
                Ok(DepthEvent::Updated(view)) => {
                    if last_volume != Some(view.volume_below) {
                        report(&config.pair, &view, *rates_rx.borrow());
                        last_volume = Some(view.volume_below);
                    }
                }
                Ok(DepthEvent::Reset) => {
                    info!("book reset, waiting for a fresh snapshot");
                    last_volume = None;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!("report loop lagged, skipped {} views", n);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    match feed_handle.await {
        Ok(Err(e)) => error!("feed ended with error: {}", e),
        Err(e) => error!("feed task failed: {}", e),
        Ok(Ok(())) => {}
    }
    info!("Shutdown complete");
}

fn report(pair: &str, view: &DepthView, rates: Option<RatePair>) {
    let best_ask = view
        .best_ask
        .map(|l| l.price.to_string())
        .unwrap_or_else(|| "-".to_string());
    let best_bid = view
        .best_bid
        .map(|l| l.price.to_string())
        .unwrap_or_else(|| "-".to_string());
    let days = match (view.best_ask, rates) {
        (Some(ask), Some(rates)) => breakeven_days(ask.price, view.threshold, &rates),
        _ => None,
    };

    info!(
        "{}: {} offered below {} (${}), {} bid above, best ask {} / best bid {}{}",
        pair,
        view.volume_below.normalize(),
        view.threshold,
        view.notional_below.round_dp(2),
        view.volume_above.normalize(),
        best_ask,
        best_bid,
        days.map(|d| format!(", ~{} days of rate spread", d))
            .unwrap_or_default(),
    );
}
