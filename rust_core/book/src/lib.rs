//! Level-2 order book store.
//!
//! Keeps the ask and bid ledgers of a single trading pair and applies
//! snapshot and l2update messages to them. All transitions are pure: each
//! returns a new value and leaves its input untouched.
//!
//! ```rust
//! use book_store::{BookEvent, BookState};
//! use rust_decimal::Decimal;
//!
//! let snapshot = BookEvent::Snapshot {
//!     asks: vec![("1.0".into(), "5".into()), ("1.2".into(), "3".into())],
//!     bids: vec![("0.99".into(), "4".into())],
//! };
//! let state = BookState::default().apply(&snapshot, Decimal::ONE).unwrap();
//!
//! let diff = BookEvent::Diff(vec![("sell".into(), "1.0".into(), "0".into())]);
//! let state = state.apply(&diff, Decimal::ONE).unwrap();
//! assert_eq!(state.book().unwrap().best_ask().unwrap().price, Decimal::new(12, 1));
//! ```

mod book;
mod error;
mod ledger;
mod level;
mod state;

pub use book::{Book, RawChange, RawLevel};
pub use error::BookError;
pub use ledger::Ledger;
pub use level::{PriceLevel, Side};
pub use state::{BookEvent, BookState};
