use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_half_up;

/// Renders a monetary amount for display.
pub trait CurrencyFormatter {
    fn format_amount(
        &self,
        amount: Decimal,
    ) -> String;
}

/// Where the currency symbol goes relative to the number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPosition {
    #[default]
    Prefix,
    Suffix,
}

/// A locale's currency layout: symbol, separators and symbol placement.
///
/// Amounts are rounded half-up to cents before rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyFormat {
    pub symbol: String,
    /// Thousands separator; `None` disables grouping.
    pub grouping_separator: Option<char>,
    pub decimal_separator: char,
    pub symbol_position: SymbolPosition,
    /// Put a space between the symbol and the number.
    pub symbol_spacing: bool,
}

impl CurrencyFormat {
    /// `$1,234.56`
    pub fn en_us() -> Self {
        Self {
            symbol: "$".to_string(),
            grouping_separator: Some(','),
            decimal_separator: '.',
            symbol_position: SymbolPosition::Prefix,
            symbol_spacing: false,
        }
    }

    /// `£1,234.56`
    pub fn en_gb() -> Self {
        Self {
            symbol: "£".to_string(),
            ..Self::en_us()
        }
    }

    /// `1.234,56 €`
    pub fn de_de() -> Self {
        Self {
            symbol: "€".to_string(),
            grouping_separator: Some('.'),
            decimal_separator: ',',
            symbol_position: SymbolPosition::Suffix,
            symbol_spacing: true,
        }
    }

    /// `1 234,56 €`
    pub fn fr_fr() -> Self {
        Self {
            grouping_separator: Some(' '),
            ..Self::de_de()
        }
    }

    /// Looks up a preset by language tag such as `en-US` or `de_DE`.
    pub fn for_locale(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "en-us" | "en-ca" | "en-au" => Some(Self::en_us()),
            "en-gb" => Some(Self::en_gb()),
            "de-de" => Some(Self::de_de()),
            "fr-fr" => Some(Self::fr_fr()),
            _ => None,
        }
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::en_us()
    }
}

impl CurrencyFormatter for CurrencyFormat {
    fn format_amount(
        &self,
        amount: Decimal,
    ) -> String {
        let rounded = round_half_up(amount);
        let digits = rounded.abs().to_string();
        let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

        let number = format!(
            "{}{}{}",
            group_digits(whole, self.grouping_separator),
            self.decimal_separator,
            cents
        );
        let space = if self.symbol_spacing { " " } else { "" };
        let body = match self.symbol_position {
            SymbolPosition::Prefix => format!("{}{space}{number}", self.symbol),
            SymbolPosition::Suffix => format!("{number}{space}{}", self.symbol),
        };

        if rounded.is_sign_negative() && !rounded.is_zero() {
            format!("-{body}")
        } else {
            body
        }
    }
}

fn group_digits(
    digits: &str,
    separator: Option<char>,
) -> String {
    let Some(separator) = separator else {
        return digits.to_string();
    };

    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}
