pub mod metrics;
pub mod tracker;
pub mod view;

use book_store::BookEvent;
use log::info;
use rust_decimal::Decimal;
use tokio::sync::{broadcast, mpsc, watch};

pub use metrics::{cumulative_series, notional_below, volume_above, volume_below, DepthPoint};
pub use tracker::{DepthEvent, DepthTracker};
pub use view::DepthView;

/// Single-writer hub around one book.
///
/// Feed events go in through an mpsc channel and are applied one at a time by
/// a dedicated task; every resulting view is broadcast to subscribers and
/// kept as the latest value. Must be created inside a tokio runtime.
pub struct Aggregator {
    input: mpsc::Sender<BookEvent>,
    tx: broadcast::Sender<DepthEvent>,
    latest: watch::Receiver<Option<DepthView>>,
}

impl Aggregator {
    pub fn new(threshold: Decimal, buffer: usize) -> Self {
        let (tx, _) = broadcast::channel(buffer);
        let (latest_tx, latest) = watch::channel(None);
        let (input, mut rx) = mpsc::channel::<BookEvent>(buffer);

        let tx_b = tx.clone();
        tokio::spawn(async move {
            let mut tracker = DepthTracker::new(threshold);
            while let Some(event) = rx.recv().await {
                let ts = chrono::Utc::now().timestamp_millis();
                if let Some(update) = tracker.handle(&event, ts) {
                    let view = match &update {
                        DepthEvent::Updated(view) => Some(view.clone()),
                        DepthEvent::Reset => None,
                    };
                    latest_tx.send_replace(view);
                    let _ = tx_b.send(update);
                }
            }
            info!("aggregator input channel closed");
        });

        Aggregator { input, tx, latest }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DepthEvent> {
        self.tx.subscribe()
    }

    /// Sender for feed events. Clones all feed the same book.
    pub fn sender(&self) -> mpsc::Sender<BookEvent> {
        self.input.clone()
    }

    /// Most recent view, `None` while the book is uninitialized.
    pub fn latest(&self) -> watch::Receiver<Option<DepthView>> {
        self.latest.clone()
    }
}
