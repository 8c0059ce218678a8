//! Display formatting for amounts and the result label.

mod currency;
mod labels;

pub use currency::{CurrencyFormat, CurrencyFormatter, SymbolPosition};
pub use labels::OutputLabels;
