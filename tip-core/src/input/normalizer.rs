use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::calculations::common::round_half_up;

/// Bill amount substituted when the field is empty or holds only a point.
pub const BASELINE_AMOUNT: &str = "0.00";

/// Longest integer part a bill may have.
///
/// At two decimals and a 100% tip, bill, tip and total all stay inside the
/// 96-bit `Decimal` mantissa without rescaling, so every figure is exact.
pub const MAX_INTEGER_DIGITS: usize = 24;

/// Up to [`MAX_INTEGER_DIGITS`] digits, then optionally a point and at most
/// two digits. Matches "" and ".".
static ENTRY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^[0-9]{{0,{MAX_INTEGER_DIGITS}}}(\.[0-9]{{0,2}})?$"))
        .expect("entry pattern is valid")
});

/// A complete amount: integer part required, optional one or two decimals.
static FINAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^[0-9]{{1,{MAX_INTEGER_DIGITS}}}(\.[0-9]{{1,2}})?$"))
        .expect("final pattern is valid")
});

/// Anything made of digits and a single point with at least one digit.
static AMOUNT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+\.?[0-9]*|\.[0-9]+)$").expect("amount pattern is valid")
});

/// Error returned when field text cannot be turned into a bill amount.
///
/// Callers that run the entry/final checks in order never see this; it marks
/// a broken call sequence rather than bad user input.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("'{0}' is not a decimal amount")]
    Unparseable(String),

    #[error("'{input}' is out of range for a bill amount: {source}")]
    OutOfRange {
        input: String,
        #[source]
        source: rust_decimal::Error,
    },
}

/// Returns `true` if `raw` is acceptable while the user is still typing.
///
/// Accepts the empty string, an optional integer part, an optional single
/// point and up to two fractional digits. Only ASCII digits count.
pub fn is_valid_entry_input(raw: &str) -> bool {
    raw.is_empty() || ENTRY_PATTERN.is_match(raw)
}

/// Drops the last character of `raw`, undoing the keystroke that made it invalid.
///
/// Only meaningful right after [`is_valid_entry_input`] returned `false`.
/// A paste that appended several bad characters is not fully repaired by one
/// call; see [`repair_entry_input`].
pub fn reformat_entry_input(raw: &str) -> String {
    let mut repaired = raw.to_string();
    let removed = repaired.pop();
    tracing::debug!(input = %raw, ?removed, "rejected keystroke");
    repaired
}

/// Truncates `raw` to its longest prefix that is valid entry input.
///
/// For a single keystroke this is the same as [`reformat_entry_input`].
pub fn repair_entry_input(raw: &str) -> String {
    let mut end = raw.len();
    loop {
        let candidate = &raw[..end];
        if is_valid_entry_input(candidate) {
            return candidate.to_string();
        }
        end = candidate
            .char_indices()
            .next_back()
            .map_or(0, |(index, _)| index);
    }
}

/// Returns `true` if `raw` is a complete amount that can be used for arithmetic.
pub fn is_valid_final_input(raw: &str) -> bool {
    FINAL_PATTERN.is_match(raw)
}

/// Converts text that failed [`is_valid_final_input`] into a usable amount string.
///
/// Empty text and a lone point give [`BASELINE_AMOUNT`]. Anything else is
/// parsed and rendered with exactly two decimals, so `"12."` becomes
/// `"12.00"` and `".5"` becomes `"0.50"`.
///
/// Extra decimals round half-up (ties away from zero), not half-even:
/// `"12.345"` becomes `"12.35"` and `"12.355"` becomes `"12.36"`.
///
/// # Errors
///
/// Returns [`NormalizeError`] when `raw` is not made of digits and a single
/// point, or does not fit in a [`Decimal`].
pub fn reformat_final_input(raw: &str) -> Result<String, NormalizeError> {
    if raw.is_empty() || raw == "." {
        return Ok(BASELINE_AMOUNT.to_string());
    }
    let amount = parse_amount(raw)?;
    Ok(round_half_up(amount).to_string())
}

/// Normalizes `raw` for arithmetic and parses it into a [`Decimal`].
///
/// # Errors
///
/// Same conditions as [`reformat_final_input`].
pub fn parse_final_amount(raw: &str) -> Result<Decimal, NormalizeError> {
    let text = if is_valid_final_input(raw) {
        Cow::Borrowed(raw)
    } else {
        Cow::Owned(reformat_final_input(raw)?)
    };
    parse_amount(&text)
}

fn parse_amount(raw: &str) -> Result<Decimal, NormalizeError> {
    if !AMOUNT_PATTERN.is_match(raw) {
        tracing::error!(input = %raw, "bill text reached arithmetic without normalization");
        return Err(NormalizeError::Unparseable(raw.to_string()));
    }

    let trimmed = raw.strip_suffix('.').unwrap_or(raw);
    let canonical = if trimmed.starts_with('.') {
        Cow::Owned(format!("0{trimmed}"))
    } else {
        Cow::Borrowed(trimmed)
    };

    canonical.parse().map_err(|e| {
        tracing::error!(input = %raw, "bill amount out of range: {}", e);
        NormalizeError::OutOfRange {
            input: raw.to_string(),
            source: e,
        }
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // entry input
    // =========================================================================

    #[test]
    fn entry_accepts_partial_amounts() {
        for raw in ["", "0", "4", "45", "45.", "45.6", "45.67", ".", ".5", ".55", "007"] {
            assert!(is_valid_entry_input(raw), "expected {raw:?} to be valid");
        }
    }

    #[test]
    fn entry_rejects_second_point() {
        assert!(!is_valid_entry_input("1.2."));
        assert!(!is_valid_entry_input(".."));
    }

    #[test]
    fn entry_rejects_third_fractional_digit() {
        assert!(!is_valid_entry_input("12.345"));
        assert!(!is_valid_entry_input(".123"));
    }

    #[test]
    fn entry_rejects_non_digits() {
        for raw in ["a", "12a", "-5", "1,000", " 12", "1e3", "12 "] {
            assert!(!is_valid_entry_input(raw), "expected {raw:?} to be invalid");
        }
    }

    #[test]
    fn entry_rejects_non_ascii_digits() {
        // Arabic-Indic digits are \d in Unicode regex but not bill input.
        assert!(!is_valid_entry_input("١٢"));
    }

    #[test]
    fn entry_caps_integer_digits() {
        let longest = "9".repeat(MAX_INTEGER_DIGITS);
        let too_long = "9".repeat(MAX_INTEGER_DIGITS + 1);

        assert!(is_valid_entry_input(&longest));
        assert!(is_valid_entry_input(&format!("{longest}.99")));
        assert!(!is_valid_entry_input(&too_long));
        assert!(!is_valid_entry_input(&format!("{too_long}.")));
    }

    #[test]
    fn reformat_entry_drops_last_keystroke() {
        assert_eq!(reformat_entry_input("12.345"), "12.34");
        assert_eq!(reformat_entry_input("1.2."), "1.2");
        assert_eq!(reformat_entry_input("12a"), "12");
    }

    #[test]
    fn reformat_entry_drops_whole_multibyte_char() {
        assert_eq!(reformat_entry_input("12€"), "12");
    }

    #[test]
    fn reformat_entry_leaves_paste_invalid() {
        let once = reformat_entry_input("12abc");

        assert_eq!(once, "12ab");
        assert!(!is_valid_entry_input(&once));
    }

    #[test]
    fn repair_entry_matches_single_keystroke_reformat() {
        for raw in ["12.345", "1.2.", "12a", ".123"] {
            assert_eq!(repair_entry_input(raw), reformat_entry_input(raw));
        }
    }

    #[test]
    fn repair_entry_truncates_paste_to_valid_prefix() {
        assert_eq!(repair_entry_input("12abc"), "12");
        assert_eq!(repair_entry_input("3.14159"), "3.14");
        assert_eq!(repair_entry_input("abc"), "");
    }

    #[test]
    fn repair_entry_cuts_long_integer_part() {
        let longest = "9".repeat(MAX_INTEGER_DIGITS);

        assert_eq!(repair_entry_input(&format!("{longest}99")), longest);
        assert_eq!(repair_entry_input(&format!("{longest}1.5")), longest);
    }

    #[test]
    fn repair_entry_keeps_valid_input() {
        assert_eq!(repair_entry_input("45.6"), "45.6");
        assert_eq!(repair_entry_input(""), "");
    }

    // =========================================================================
    // final input
    // =========================================================================

    #[test]
    fn final_rejects_incomplete_amounts() {
        for raw in ["", ".", "12.", ".5", "12.345", "abc"] {
            assert!(!is_valid_final_input(raw), "expected {raw:?} to be invalid");
        }
    }

    #[test]
    fn final_accepts_complete_amounts() {
        for raw in ["0", "12", "12.5", "12.50", "0.01"] {
            assert!(is_valid_final_input(raw), "expected {raw:?} to be valid");
        }
    }

    #[test]
    fn final_caps_integer_digits() {
        let longest = "9".repeat(MAX_INTEGER_DIGITS);

        assert!(is_valid_final_input(&longest));
        assert!(is_valid_final_input(&format!("{longest}.99")));
        assert!(!is_valid_final_input(&format!("{longest}9")));
    }

    #[test]
    fn reformat_final_uses_baseline_for_empty_and_point() {
        assert_eq!(reformat_final_input("").unwrap(), BASELINE_AMOUNT);
        assert_eq!(reformat_final_input(".").unwrap(), BASELINE_AMOUNT);
    }

    #[test]
    fn reformat_final_pads_to_two_decimals() {
        assert_eq!(reformat_final_input("7").unwrap(), "7.00");
        assert_eq!(reformat_final_input("7.5").unwrap(), "7.50");
        assert_eq!(reformat_final_input("12.").unwrap(), "12.00");
        assert_eq!(reformat_final_input(".5").unwrap(), "0.50");
    }

    #[test]
    fn reformat_final_rounds_extra_decimals_half_up() {
        assert_eq!(reformat_final_input("12.345").unwrap(), "12.35");
        assert_eq!(reformat_final_input("12.344").unwrap(), "12.34");
        // Half-even would give 0.12.
        assert_eq!(reformat_final_input("0.125").unwrap(), "0.13");
    }

    #[test]
    fn reformat_final_is_idempotent() {
        for raw in ["", ".", "7", "7.5", "12.", ".5", "007", "12.345"] {
            let once = reformat_final_input(raw).unwrap();
            let twice = reformat_final_input(&once).unwrap();

            assert_eq!(twice, once);
            assert!(is_valid_final_input(&once));
        }
    }

    #[test]
    fn reformat_final_rejects_garbage() {
        let result = reformat_final_input("12abc");

        assert!(matches!(result, Err(NormalizeError::Unparseable(_))));
    }

    #[test]
    fn reformat_final_reports_overflow() {
        let result = reformat_final_input("123456789012345678901234567890.");

        assert!(matches!(result, Err(NormalizeError::OutOfRange { .. })));
    }

    #[test]
    fn parse_final_amount_defaults_incomplete_input() {
        assert_eq!(parse_final_amount("").unwrap(), Decimal::ZERO);
        assert_eq!(parse_final_amount(".").unwrap(), Decimal::ZERO);
        assert_eq!(parse_final_amount("45.").unwrap(), dec!(45));
        assert_eq!(parse_final_amount(".25").unwrap(), dec!(0.25));
    }

    #[test]
    fn parse_final_amount_keeps_valid_input() {
        assert_eq!(parse_final_amount("45").unwrap(), dec!(45));
        assert_eq!(parse_final_amount("12.5").unwrap(), dec!(12.5));
    }
}
