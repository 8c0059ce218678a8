use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::format::CurrencyFormatter;
use crate::models::TipPercent;

/// Bill, tip and total for one (input, percent) pair, kept at full precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipBreakdown {
    pub bill: Decimal,
    pub tip_percent: TipPercent,
    pub tip: Decimal,
    pub total: Decimal,
}

/// Display strings produced by a [`CurrencyFormatter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedBreakdown {
    pub bill: String,
    pub tip: String,
    pub total: String,
}

impl TipBreakdown {
    pub fn format<F>(
        &self,
        formatter: &F,
    ) -> FormattedBreakdown
    where
        F: CurrencyFormatter + ?Sized,
    {
        FormattedBreakdown {
            bill: formatter.format_amount(self.bill),
            tip: formatter.format_amount(self.tip),
            total: formatter.format_amount(self.total),
        }
    }
}
