//! Tip and total for the amount in the bill field.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tip_core::{CurrencyFormat, TipPercent, calculate, compute_outputs};
//!
//! let percent = TipPercent::new(15).unwrap();
//!
//! let breakdown = calculate("45", percent).unwrap();
//! assert_eq!(breakdown.tip, dec!(6.75));
//! assert_eq!(breakdown.total, dec!(51.75));
//!
//! let outputs = compute_outputs("45", percent, &CurrencyFormat::en_us()).unwrap();
//! assert_eq!(outputs.total, "$51.75");
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

use crate::calculations::common::percent_of;
use crate::format::CurrencyFormatter;
use crate::input::{NormalizeError, parse_final_amount};
use crate::models::{FormattedBreakdown, TipBreakdown, TipPercent};

/// Errors that can occur while computing a tip.
#[derive(Debug, Error)]
pub enum TipCalculationError {
    /// The field text could not be normalized into an amount.
    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    /// The bill is too large for the tip or total to be represented.
    #[error("tip on bill {0} overflows")]
    Overflow(Decimal),
}

/// Computes bill, tip and total from raw field text.
///
/// Empty or incomplete text (`""`, `"."`, `"12."`) is normalized to a full
/// amount first, so an empty field yields a zero breakdown.
///
/// # Errors
///
/// Returns [`TipCalculationError`] if the text is not a bill amount at all or
/// the result overflows.
pub fn calculate(
    raw_input: &str,
    tip_percent: TipPercent,
) -> Result<TipBreakdown, TipCalculationError> {
    let bill = parse_final_amount(raw_input)?;

    let tip =
        percent_of(bill, tip_percent.value()).ok_or(TipCalculationError::Overflow(bill))?;
    let total = bill
        .checked_add(tip)
        .ok_or(TipCalculationError::Overflow(bill))?;

    tracing::debug!(%bill, %tip_percent, %tip, %total, "calculated tip");

    Ok(TipBreakdown {
        bill,
        tip_percent,
        tip,
        total,
    })
}

/// Computes the breakdown and renders it through `formatter`.
///
/// # Errors
///
/// Same conditions as [`calculate`].
pub fn compute_outputs<F>(
    raw_input: &str,
    tip_percent: TipPercent,
    formatter: &F,
) -> Result<FormattedBreakdown, TipCalculationError>
where
    F: CurrencyFormatter + ?Sized,
{
    Ok(calculate(raw_input, tip_percent)?.format(formatter))
}
