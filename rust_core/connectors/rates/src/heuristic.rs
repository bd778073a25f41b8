use connectors_common::types::RatePair;
use rust_decimal::Decimal;

const DAYS_PER_YEAR: Decimal = Decimal::from_parts(365, 0, 0, false, 0);

/// Days of lending-rate differential that add up to the discount of the best
/// ask below `threshold`.
///
/// The discount is `(threshold - best_ask) / best_ask`; the differential is
/// `|quote - base|` spread over 365 days. Returns `None` when there is no
/// discount or no rate differential.
pub fn breakeven_days(best_ask: Decimal, threshold: Decimal, rates: &RatePair) -> Option<Decimal> {
    if best_ask <= Decimal::ZERO || best_ask >= threshold {
        return None;
    }
    let daily = (rates.quote - rates.base).abs().checked_div(DAYS_PER_YEAR)?;
    if daily.is_zero() {
        return None;
    }
    let discount = (threshold - best_ask).checked_div(best_ask)?;
    discount.checked_div(daily).map(|days| days.round_dp(1))
}
