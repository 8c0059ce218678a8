mod tip_breakdown;
mod tip_percent;

pub use tip_breakdown::{FormattedBreakdown, TipBreakdown};
pub use tip_percent::{TipPercent, TipPercentError};
