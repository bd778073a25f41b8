//! Property tests for ledger invariants under arbitrary diff sequences:
//! strict ordering by side, no zero sizes, and agreement with a reference
//! map that applies the same changes.

use std::collections::BTreeMap;

use book_store::{Book, Ledger, RawChange};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Prices on a 0.0001 tick between 0.9500 and 1.0500.
fn arb_price() -> impl Strategy<Value = Decimal> {
    (9_500i64..10_500i64).prop_map(|ticks| Decimal::new(ticks, 4))
}

/// Sizes with two decimals; zero shows up often enough to exercise removals.
fn arb_size() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        1 => Just(Decimal::ZERO),
        3 => (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2)),
    ]
}

fn arb_direction() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("buy"), Just("sell")]
}

fn arb_change() -> impl Strategy<Value = RawChange> {
    (arb_direction(), arb_price(), arb_size())
        .prop_map(|(d, p, s)| (d.to_string(), p.to_string(), s.to_string()))
}

fn arb_message() -> impl Strategy<Value = Vec<RawChange>> {
    prop::collection::vec(arb_change(), 1..20)
}

fn assert_ledger_invariants(ledger: &Ledger, ascending: bool) -> Result<(), TestCaseError> {
    for window in ledger.levels().windows(2) {
        if ascending {
            prop_assert!(window[0].price < window[1].price);
        } else {
            prop_assert!(window[0].price > window[1].price);
        }
    }
    for level in ledger.iter() {
        prop_assert!(!level.size.is_zero());
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_diffs_preserve_ordering_and_drop_zeros(
        messages in prop::collection::vec(arb_message(), 1..30)
    ) {
        let mut book = Book::new(Decimal::ONE);
        for changes in &messages {
            book = book.apply_diff(changes).unwrap();
            assert_ledger_invariants(book.asks(), true)?;
            assert_ledger_invariants(book.bids(), false)?;
        }
    }

    #[test]
    fn prop_ledger_matches_reference_map(messages in prop::collection::vec(arb_message(), 1..30)) {
        let mut book = Book::new(Decimal::ONE);
        let mut asks: BTreeMap<Decimal, Decimal> = BTreeMap::new();
        let mut bids: BTreeMap<Decimal, Decimal> = BTreeMap::new();

        for changes in &messages {
            book = book.apply_diff(changes).unwrap();
            for (direction, price, size) in changes {
                let price: Decimal = price.parse().unwrap();
                let size: Decimal = size.parse().unwrap();
                let side = if direction == "sell" { &mut asks } else { &mut bids };
                if size.is_zero() {
                    side.remove(&price);
                } else {
                    side.insert(price, size);
                }
            }
        }

        let expected_asks: Vec<_> = asks.into_iter().collect();
        let expected_bids: Vec<_> = bids.into_iter().rev().collect();
        let actual_asks: Vec<_> = book.asks().iter().map(|l| (l.price, l.size)).collect();
        let actual_bids: Vec<_> = book.bids().iter().map(|l| (l.price, l.size)).collect();
        prop_assert_eq!(actual_asks, expected_asks);
        prop_assert_eq!(actual_bids, expected_bids);
    }

    #[test]
    fn prop_reapplying_a_diff_is_idempotent(snapshot in arb_message(), changes in arb_message()) {
        let book = Book::new(Decimal::ONE).apply_diff(&snapshot).unwrap();
        let once = book.apply_diff(&changes).unwrap();
        let twice = once.apply_diff(&changes).unwrap();
        prop_assert_eq!(once, twice);
    }
}
