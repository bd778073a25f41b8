use std::time::Duration;

use book_store::BookEvent;
use connectors_common::types::SubscribeMessage;
use connectors_common::ConnectorError;
use futures::{SinkExt, StreamExt};
use log::{info, warn};
use tokio::sync::{mpsc::Sender, watch};
use tokio_tungstenite::connect_async;
use tungstenite::Message;

use crate::backoff::Backoff;
use crate::parser;

pub const DEFAULT_FEED_URL: &str = "wss://ws-feed.exchange.coinbase.com";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub url: String,
    pub pair: String,
}

enum SessionEnd {
    Shutdown,
    /// Session was up and ended; `loaded` is true if a snapshot came through.
    Disconnected { loaded: bool, error: ConnectorError },
    ConnectFailed(ConnectorError),
    ReceiverGone,
}

/// Streams level-2 events for one pair into `tx` until shutdown.
///
/// Every connection subscribes as soon as it opens, so each session starts
/// with a fresh snapshot. Whenever a session ends a `BookEvent::Reset` is
/// sent before reconnecting, so no diff is ever applied across a gap.
pub async fn run_level2_feed(
    config: FeedConfig,
    tx: Sender<BookEvent>,
    mut shutdown: watch::Receiver<bool>,
) -> Result<(), ConnectorError> {
    let mut backoff = Backoff::default();

    loop {
        if *shutdown.borrow() {
            return Ok(());
        }

        match run_session(&config, &tx, &mut shutdown).await {
            SessionEnd::Shutdown => {
                let _ = tx.send(BookEvent::Reset).await;
                info!("level2 feed for {} stopped", config.pair);
                return Ok(());
            }
            SessionEnd::ReceiverGone => return Err(ConnectorError::Closed),
            SessionEnd::Disconnected { loaded, error } => {
                warn!("level2 feed for {} disconnected: {}", config.pair, error);
                if loaded {
                    backoff.reset();
                }
            }
            SessionEnd::ConnectFailed(error) => {
                warn!("failed to connect to {}: {}", config.url, error);
            }
        }

        if tx.send(BookEvent::Reset).await.is_err() {
            return Err(ConnectorError::Closed);
        }

        let delay = backoff.next_delay();
        info!("reconnecting in {:?} (attempt {})", delay, backoff.attempt());
        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    return Ok(());
                }
            }
        }
    }
}

async fn run_session(
    config: &FeedConfig,
    tx: &Sender<BookEvent>,
    shutdown: &mut watch::Receiver<bool>,
) -> SessionEnd {
    info!("Connecting to {}", config.url);
    let connect = tokio::time::timeout(CONNECT_TIMEOUT, connect_async(config.url.as_str()));
    let ws_stream = match connect.await {
        Ok(Ok((stream, _))) => stream,
        Ok(Err(e)) => {
            return SessionEnd::ConnectFailed(ConnectorError::WebSocket(e.to_string()));
        }
        Err(_) => {
            let error = ConnectorError::Network("connection timeout".to_string());
            return SessionEnd::ConnectFailed(error);
        }
    };
    let (mut write, mut read) = ws_stream.split();

    let subscribe = match serde_json::to_string(&SubscribeMessage::level2(&config.pair)) {
        Ok(text) => text,
        Err(e) => return SessionEnd::ConnectFailed(e.into()),
    };
    if let Err(e) = write.send(Message::Text(subscribe)).await {
        return SessionEnd::ConnectFailed(ConnectorError::WebSocket(e.to_string()));
    }
    info!("subscribed to level2 for {}", config.pair);

    let mut loaded = false;
    loop {
        tokio::select! {
            biased;

            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    let _ = write.send(Message::Close(None)).await;
                    return SessionEnd::Shutdown;
                }
            }

            msg = read.next() => match msg {
                Some(Ok(Message::Text(txt))) => match parser::decode(&txt, &config.pair) {
                    Ok(Some(event)) => {
                        loaded |= matches!(event, BookEvent::Snapshot { .. });
                        if tx.send(event).await.is_err() {
                            return SessionEnd::ReceiverGone;
                        }
                    }
                    Ok(None) => {}
                    Err(error) => {
                        warn!("malformed frame, resyncing: {}", error);
                        return SessionEnd::Disconnected { loaded, error };
                    }
                },
                Some(Ok(Message::Ping(payload))) => {
                    if let Err(e) = write.send(Message::Pong(payload)).await {
                        return SessionEnd::Disconnected {
                            loaded,
                            error: ConnectorError::WebSocket(e.to_string()),
                        };
                    }
                }
                Some(Ok(Message::Close(_))) | None => {
                    return SessionEnd::Disconnected {
                        loaded,
                        error: ConnectorError::Closed,
                    };
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    return SessionEnd::Disconnected {
                        loaded,
                        error: ConnectorError::WebSocket(e.to_string()),
                    };
                }
            },
        }
    }
}
