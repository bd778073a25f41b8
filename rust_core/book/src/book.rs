use log::debug;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::BookError;
use crate::ledger::Ledger;
use crate::level::{parse_level, PriceLevel, Side};

/// Raw `[price, size]` row as it arrives on the wire.
pub type RawLevel = (String, String);

/// Raw `[direction, price, size]` change as it arrives on the wire.
pub type RawChange = (String, String, String);

/// Ask and bid ledgers for one trading pair, plus the threshold price the
/// aggregate metrics are measured against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    asks: Ledger,
    bids: Ledger,
    threshold: Decimal,
}

impl Book {
    pub fn new(threshold: Decimal) -> Self {
        Book {
            asks: Ledger::new(Side::Ask),
            bids: Ledger::new(Side::Bid),
            threshold,
        }
    }

    /// Builds a book from a full snapshot. Every row is parsed before the
    /// book is assembled; zero-size rows are omitted.
    pub fn from_snapshot(
        asks: &[RawLevel],
        bids: &[RawLevel],
        threshold: Decimal,
    ) -> Result<Book, BookError> {
        let asks = parse_rows(asks)?;
        let bids = parse_rows(bids)?;
        Ok(Book {
            asks: Ledger::from_levels(Side::Ask, asks),
            bids: Ledger::from_levels(Side::Bid, bids),
            threshold,
        })
    }

    /// Applies the changes of one l2update message and returns the new book.
    ///
    /// Changes are applied in order, so a later change to the same price wins.
    /// Unknown direction tags are skipped without looking at their payload.
    /// If any routed price or size fails to parse the whole message is
    /// rejected and `self` is left as it was.
    pub fn apply_diff(&self, changes: &[RawChange]) -> Result<Book, BookError> {
        let mut parsed = Vec::with_capacity(changes.len());
        for (direction, price, size) in changes {
            match Side::from_direction(direction) {
                Some(side) => parsed.push((side, parse_level(price, size)?)),
                None => debug!("skipping change with unknown direction {:?}", direction),
            }
        }

        let mut next = self.clone();
        for (side, level) in parsed {
            next.ledger_mut(side).update_in_place(level.price, level.size);
        }
        Ok(next)
    }

    pub fn asks(&self) -> &Ledger {
        &self.asks
    }

    pub fn bids(&self) -> &Ledger {
        &self.bids
    }

    fn ledger_mut(&mut self, side: Side) -> &mut Ledger {
        match side {
            Side::Ask => &mut self.asks,
            Side::Bid => &mut self.bids,
        }
    }

    pub fn threshold(&self) -> Decimal {
        self.threshold
    }

    pub fn best_ask(&self) -> Option<PriceLevel> {
        self.asks.best()
    }

    pub fn best_bid(&self) -> Option<PriceLevel> {
        self.bids.best()
    }

    /// Best ask minus best bid, when both sides are populated.
    pub fn spread(&self) -> Option<Decimal> {
        let ask = self.best_ask()?;
        let bid = self.best_bid()?;
        Some(ask.price - bid.price)
    }

    pub fn mid_price(&self) -> Option<Decimal> {
        let ask = self.best_ask()?;
        let bid = self.best_bid()?;
        Some((ask.price + bid.price) / Decimal::TWO)
    }
}

fn parse_rows(rows: &[RawLevel]) -> Result<Vec<PriceLevel>, BookError> {
    rows.iter()
        .map(|(price, size)| parse_level(price, size))
        .collect()
}
