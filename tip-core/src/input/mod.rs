//! Sanitization of the bill-amount field.
//!
//! Entry validation is permissive so a user can type naturally (a trailing
//! point is fine while typing). Final validation is strict and gates every
//! calculation.

mod normalizer;

pub use normalizer::{
    BASELINE_AMOUNT, MAX_INTEGER_DIGITS, NormalizeError, is_valid_entry_input, is_valid_final_input,
    parse_final_amount, reformat_entry_input, reformat_final_input, repair_entry_input,
};
