use rust_decimal::Decimal;

use crate::book::{Book, RawChange, RawLevel};
use crate::error::BookError;

/// Decoded feed event that drives the book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookEvent {
    Snapshot {
        asks: Vec<RawLevel>,
        bids: Vec<RawLevel>,
    },
    Diff(Vec<RawChange>),
    /// The stream was interrupted; any book held is stale.
    Reset,
}

/// Lifecycle of a book over one feed subscription.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BookState {
    #[default]
    Uninitialized,
    Loaded(Book),
}

impl BookState {
    /// Computes the state after `event`.
    ///
    /// A snapshot always (re)loads the book. A diff requires a loaded book and
    /// fails with `NotInitialized` otherwise. A reset discards the book.
    /// On error the caller keeps the current state.
    pub fn apply(&self, event: &BookEvent, threshold: Decimal) -> Result<BookState, BookError> {
        match event {
            BookEvent::Snapshot { asks, bids } => {
                Book::from_snapshot(asks, bids, threshold).map(BookState::Loaded)
            }
            BookEvent::Diff(changes) => match self {
                BookState::Loaded(book) => book.apply_diff(changes).map(BookState::Loaded),
                BookState::Uninitialized => Err(BookError::NotInitialized),
            },
            BookEvent::Reset => Ok(BookState::Uninitialized),
        }
    }

    pub fn book(&self) -> Option<&Book> {
        match self {
            BookState::Loaded(book) => Some(book),
            BookState::Uninitialized => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, BookState::Loaded(_))
    }
}
