use std::cmp::Ordering;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::BookError;

/// One price level: aggregated size resting at a single price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLevel {
    pub price: Decimal,
    pub size: Decimal,
}

impl PriceLevel {
    pub fn new(price: Decimal, size: Decimal) -> Self {
        PriceLevel { price, size }
    }

    /// Quote-currency value of the level (price * size).
    pub fn notional(&self) -> Decimal {
        self.price * self.size
    }
}

/// Which ledger a level belongs to. Asks sort ascending, bids descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Ask,
    Bid,
}

impl Side {
    /// Maps a feed direction tag to the ledger it targets.
    /// `"sell"` rests on the ask side, `"buy"` on the bid side.
    pub fn from_direction(tag: &str) -> Option<Side> {
        match tag {
            "sell" => Some(Side::Ask),
            "buy" => Some(Side::Bid),
            _ => None,
        }
    }

    /// Ordering of two prices as they appear in this side's ledger.
    pub fn compare(&self, a: &Decimal, b: &Decimal) -> Ordering {
        match self {
            Side::Ask => a.cmp(b),
            Side::Bid => b.cmp(a),
        }
    }

    /// True when `price` lies strictly on the visible side of `threshold`:
    /// below it for asks, above it for bids.
    pub fn within(&self, price: &Decimal, threshold: &Decimal) -> bool {
        match self {
            Side::Ask => price < threshold,
            Side::Bid => price > threshold,
        }
    }
}

pub(crate) fn parse_decimal(field: &'static str, raw: &str) -> Result<Decimal, BookError> {
    Decimal::from_str(raw.trim())
        .or_else(|_| Decimal::from_scientific(raw.trim()))
        .map_err(|source| BookError::Parse {
            field,
            value: raw.to_string(),
            source,
        })
}

/// Parses a raw `(price, size)` row and checks price > 0 and size >= 0.
pub(crate) fn parse_level(price: &str, size: &str) -> Result<PriceLevel, BookError> {
    let price = parse_decimal("price", price)?;
    let size = parse_decimal("size", size)?;
    if price <= Decimal::ZERO {
        return Err(BookError::InvalidPrice(price));
    }
    if size < Decimal::ZERO {
        return Err(BookError::InvalidSize(size));
    }
    Ok(PriceLevel::new(price, size))
}
