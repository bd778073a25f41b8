use rust_decimal::Decimal;
use serde::Serialize;

use crate::level::{PriceLevel, Side};

/// One side of the book: price levels kept sorted in the side's direction,
/// unique by price, with no zero-size entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ledger {
    side: Side,
    levels: Vec<PriceLevel>,
}

impl Ledger {
    pub fn new(side: Side) -> Self {
        Ledger {
            side,
            levels: Vec::new(),
        }
    }

    /// Builds a ledger from unordered levels. Zero sizes are omitted and a
    /// repeated price keeps the last size seen.
    pub fn from_levels(side: Side, levels: impl IntoIterator<Item = PriceLevel>) -> Self {
        let mut ledger = Ledger::new(side);
        for level in levels {
            ledger.update_in_place(level.price, level.size);
        }
        ledger
    }

    pub fn levels(&self) -> &[PriceLevel] {
        &self.levels
    }

    pub fn iter(&self) -> impl Iterator<Item = &PriceLevel> {
        self.levels.iter()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Best level of the side: lowest ask or highest bid. `None` when empty.
    pub fn best(&self) -> Option<PriceLevel> {
        self.levels.first().copied()
    }

    pub fn top(&self, n: usize) -> &[PriceLevel] {
        &self.levels[..n.min(self.levels.len())]
    }

    pub fn size_at(&self, price: Decimal) -> Option<Decimal> {
        self.position(&price).ok().map(|idx| self.levels[idx].size)
    }

    /// Returns a new ledger with the size at `price` set to `size`.
    ///
    /// An existing level is overwritten, a missing one is inserted at its
    /// ordered position when `size` is positive, and a level whose size ends
    /// up exactly zero is removed. A zero size for an absent price is a no-op.
    pub fn apply_update(&self, price: Decimal, size: Decimal) -> Ledger {
        let mut next = self.clone();
        next.update_in_place(price, size);
        next
    }

    pub(crate) fn update_in_place(&mut self, price: Decimal, size: Decimal) {
        match self.position(&price) {
            Ok(idx) => {
                if size.is_zero() {
                    self.levels.remove(idx);
                } else {
                    self.levels[idx].size = size;
                }
            }
            Err(idx) => {
                if size > Decimal::ZERO {
                    self.levels.insert(idx, PriceLevel::new(price, size));
                }
            }
        }
    }

    fn position(&self, price: &Decimal) -> Result<usize, usize> {
        let side = self.side;
        self.levels
            .binary_search_by(|level| side.compare(&level.price, price))
    }
}
