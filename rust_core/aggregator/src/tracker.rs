use book_store::{BookEvent, BookState};
use log::{debug, info, warn};
use rust_decimal::Decimal;

use crate::view::DepthView;

/// What readers are told after an event has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepthEvent {
    Updated(DepthView),
    Reset,
}

/// Owns the book state and turns feed events into published views.
/// Synchronous; the hub task is its only caller.
#[derive(Debug)]
pub struct DepthTracker {
    threshold: Decimal,
    state: BookState,
}

impl DepthTracker {
    pub fn new(threshold: Decimal) -> Self {
        DepthTracker {
            threshold,
            state: BookState::Uninitialized,
        }
    }

    pub fn state(&self) -> &BookState {
        &self.state
    }

    /// Applies one event. Rejected events leave the state untouched and
    /// publish nothing.
    pub fn handle(&mut self, event: &BookEvent, ts: i64) -> Option<DepthEvent> {
        match self.state.apply(event, self.threshold) {
            Ok(next) => {
                if matches!(event, BookEvent::Snapshot { .. }) {
                    info!("book loaded from snapshot");
                }
                self.state = next;
                match self.state.book() {
                    Some(book) => Some(DepthEvent::Updated(DepthView::compute(book, ts))),
                    None => {
                        debug!("book reset, waiting for snapshot");
                        Some(DepthEvent::Reset)
                    }
                }
            }
            Err(e) => {
                warn!("dropping feed event: {}", e);
                None
            }
        }
    }
}
