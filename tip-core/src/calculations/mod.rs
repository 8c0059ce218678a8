//! Tip calculation for the bill amount held in the input field.
//!
//! The raw field text is normalized by [`crate::input`] before any arithmetic
//! is performed, so every figure produced here comes from a well-formed
//! decimal.

pub mod common;
pub mod tip;

pub use tip::{TipCalculationError, calculate, compute_outputs};
