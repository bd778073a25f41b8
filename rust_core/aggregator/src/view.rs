use book_store::{Book, PriceLevel, Side};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::metrics::{cumulative_series, notional_below, volume_above, volume_below, DepthPoint};

/// Everything a presentation layer needs from one fully applied book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepthView {
    pub threshold: Decimal,
    pub best_ask: Option<PriceLevel>,
    pub best_bid: Option<PriceLevel>,
    pub spread: Option<Decimal>,
    pub volume_below: Decimal,
    pub volume_above: Decimal,
    pub notional_below: Decimal,
    pub ask_series: Vec<DepthPoint>,
    pub bid_series: Vec<DepthPoint>,
    pub ts: i64,
}

impl DepthView {
    pub fn compute(book: &Book, ts: i64) -> Self {
        let threshold = book.threshold();
        DepthView {
            threshold,
            best_ask: book.best_ask(),
            best_bid: book.best_bid(),
            spread: book.spread(),
            volume_below: volume_below(book.asks(), threshold),
            volume_above: volume_above(book.bids(), threshold),
            notional_below: notional_below(book.asks(), threshold),
            ask_series: cumulative_series(book.asks(), threshold, Side::Ask),
            bid_series: cumulative_series(book.bids(), threshold, Side::Bid),
            ts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_compute_from_book() {
        let book = Book::from_snapshot(
            &[("0.998".into(), "100".into()), ("1.002".into(), "40".into())],
            &[("1.001".into(), "7".into()), ("0.997".into(), "60".into())],
            dec!(1),
        )
        .unwrap();

        let view = DepthView::compute(&book, 42);
        assert_eq!(view.best_ask.unwrap().price, dec!(0.998));
        assert_eq!(view.best_bid.unwrap().price, dec!(1.001));
        assert_eq!(view.volume_below, dec!(100));
        assert_eq!(view.volume_above, dec!(7));
        assert_eq!(view.notional_below, dec!(99.8));
        assert_eq!(view.ask_series.len(), 1);
        assert_eq!(view.bid_series.len(), 1);
        assert_eq!(view.ts, 42);
    }

    #[test]
    fn test_compute_from_empty_book() {
        let view = DepthView::compute(&Book::new(dec!(1)), 0);
        assert!(view.best_ask.is_none());
        assert!(view.best_bid.is_none());
        assert!(view.spread.is_none());
        assert_eq!(view.volume_below, Decimal::ZERO);
    }

    #[test]
    fn test_serializes_decimals_as_strings() {
        let view = DepthView::compute(&Book::new(dec!(1)), 0);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["threshold"], "1");
        assert!(json["best_ask"].is_null());
    }
}
