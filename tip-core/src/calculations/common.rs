//! Common helpers for money arithmetic.
//!
//! All amounts are carried as exact [`Decimal`] values and only rounded to
//! cents when they are rendered for display.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded up to 0.01 (away from zero). The result
/// always carries a scale of two, so `7` becomes `7.00`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tip_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(6.754)).to_string(), "6.75");
/// assert_eq!(round_half_up(dec!(6.755)).to_string(), "6.76");
/// assert_eq!(round_half_up(dec!(7)).to_string(), "7.00");
/// assert_eq!(round_half_up(dec!(-1.005)).to_string(), "-1.01"); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Returns `percent` percent of `amount`, or `None` on overflow.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tip_core::calculations::common::percent_of;
///
/// assert_eq!(percent_of(dec!(45), 15), Some(dec!(6.75)));
/// assert_eq!(percent_of(dec!(0.00), 20), Some(dec!(0)));
/// ```
pub fn percent_of(
    amount: Decimal,
    percent: u8,
) -> Option<Decimal> {
    amount
        .checked_mul(Decimal::from(percent))?
        .checked_div(Decimal::ONE_HUNDRED)
}
