use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a slider value falls outside 0..=100.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("tip percent {0} is outside 0..=100")]
pub struct TipPercentError(pub i64);

/// A tip percentage in the range 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct TipPercent(u8);

impl TipPercent {
    pub const MAX: TipPercent = TipPercent(100);
    pub const ZERO: TipPercent = TipPercent(0);

    pub fn new(value: i64) -> Result<Self, TipPercentError> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= Self::MAX.0)
            .map(Self)
            .ok_or(TipPercentError(value))
    }

    /// Builds a percent from a constant, capping it at 100.
    pub const fn saturating(value: u8) -> Self {
        if value > Self::MAX.0 {
            Self::MAX
        } else {
            Self(value)
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for TipPercent {
    /// 15%, the slider position on a fresh screen.
    fn default() -> Self {
        Self(15)
    }
}

impl TryFrom<i64> for TipPercent {
    type Error = TipPercentError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TipPercent> for i64 {
    fn from(percent: TipPercent) -> Self {
        i64::from(percent.0)
    }
}

impl fmt::Display for TipPercent {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn new_accepts_bounds() {
        assert_eq!(TipPercent::new(0), Ok(TipPercent::ZERO));
        assert_eq!(TipPercent::new(100), Ok(TipPercent::MAX));
    }

    #[test]
    fn new_rejects_out_of_range() {
        assert_eq!(TipPercent::new(101), Err(TipPercentError(101)));
        assert_eq!(TipPercent::new(-1), Err(TipPercentError(-1)));
        assert_eq!(TipPercent::new(300), Err(TipPercentError(300)));
    }

    #[test]
    fn saturating_caps_at_hundred() {
        assert_eq!(TipPercent::saturating(30).value(), 30);
        assert_eq!(TipPercent::saturating(250), TipPercent::MAX);
    }

    #[test]
    fn default_is_fifteen() {
        assert_eq!(TipPercent::default().value(), 15);
    }

    #[test]
    fn deserialize_validates_range() {
        #[derive(Debug, Deserialize)]
        struct Wrapper {
            percent: TipPercent,
        }

        let ok: Wrapper = toml::from_str("percent = 20").unwrap();
        assert_eq!(ok.percent.value(), 20);

        let err = toml::from_str::<Wrapper>("percent = 120");
        assert!(err.is_err());
    }
}
