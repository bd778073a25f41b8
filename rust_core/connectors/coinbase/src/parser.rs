use book_store::BookEvent;
use connectors_common::types::FeedMessage;
use connectors_common::ConnectorError;
use log::{debug, info, warn};

/// Decodes one text frame of the level-2 channel.
///
/// Returns `Ok(None)` for frames that carry nothing for the book
/// (subscription acks, heartbeats, other pairs) and an error only when the
/// frame is not a JSON message at all.
pub fn decode(text: &str, pair: &str) -> Result<Option<BookEvent>, ConnectorError> {
    let msg: FeedMessage = serde_json::from_str(text)?;

    if let Some(product) = msg.product_id() {
        if product != pair {
            debug!("ignoring message for {}", product);
            return Ok(None);
        }
    }

    let event = match msg {
        FeedMessage::Snapshot { asks, bids, .. } => {
            debug!("snapshot: {} asks, {} bids", asks.len(), bids.len());
            Some(BookEvent::Snapshot { asks, bids })
        }
        FeedMessage::L2update { changes, .. } => Some(BookEvent::Diff(changes)),
        FeedMessage::Subscriptions { channels } => {
            info!("subscribed: {}", channels);
            None
        }
        FeedMessage::Error { message, reason } => {
            warn!("feed error: {} ({})", message, reason.unwrap_or_default());
            None
        }
        FeedMessage::Other => None,
    };
    Ok(event)
}
