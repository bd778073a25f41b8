use book_store::{Ledger, Side};
use rust_decimal::Decimal;
use serde::Serialize;

/// Point of a depth chart: level price and the size accumulated up to and
/// including that level, walking out from the top of the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DepthPoint {
    pub price: Decimal,
    pub cumulative_size: Decimal,
}

/// Total ask size priced strictly below `threshold`.
///
/// Scans every level rather than stopping at the first one past the
/// threshold, so the result does not depend on the ledger order.
pub fn volume_below(asks: &Ledger, threshold: Decimal) -> Decimal {
    asks.iter()
        .filter(|level| level.price < threshold)
        .map(|level| level.size)
        .sum()
}

/// Total bid size priced strictly above `threshold`.
pub fn volume_above(bids: &Ledger, threshold: Decimal) -> Decimal {
    bids.iter()
        .filter(|level| level.price > threshold)
        .map(|level| level.size)
        .sum()
}

/// Quote-currency value (price * size) of the asks priced strictly below
/// `threshold`.
pub fn notional_below(asks: &Ledger, threshold: Decimal) -> Decimal {
    asks.iter()
        .filter(|level| level.price < threshold)
        .map(|level| level.notional())
        .sum()
}

/// Running size total over the ledger in stored order, restricted to the
/// levels on the visible side of `threshold` for `side`.
///
/// Totals are accumulated before filtering.
pub fn cumulative_series(ledger: &Ledger, threshold: Decimal, side: Side) -> Vec<DepthPoint> {
    let mut total = Decimal::ZERO;
    ledger
        .iter()
        .map(|level| {
            total += level.size;
            DepthPoint {
                price: level.price,
                cumulative_size: total,
            }
        })
        .filter(|point| side.within(&point.price, &threshold))
        .collect()
}
