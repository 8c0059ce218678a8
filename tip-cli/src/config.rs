//! Settings file for the terminal calculator.
//!
//! Every field is optional; a missing file or an empty one gives the
//! defaults below.
//!
//! ```toml
//! default_percent = 15
//! max_percent = 30
//! currency_locale = "en-US"
//! log_level = "info"
//!
//! [labels]
//! bill_prefix = "Bill: "
//!
//! # Overrides the locale preset when present.
//! [currency]
//! symbol = "CHF"
//! symbol_spacing = true
//! ```

use std::{fmt, fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tip_core::{CurrencyFormat, OutputLabels, TipPercent};

/// Errors raised while loading or validating the settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown currency locale '{0}'")]
    UnknownLocale(String),

    #[error("default_percent {default} is above max_percent {max}")]
    DefaultAboveMax { default: TipPercent, max: TipPercent },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Slider position on start and after clear.
    pub default_percent: TipPercent,
    /// Upper end of the slider.
    pub max_percent: TipPercent,
    pub currency_locale: String,
    pub currency: Option<CurrencyFormat>,
    pub labels: OutputLabels,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_percent: TipPercent::default(),
            max_percent: TipPercent::saturating(30),
            currency_locale: "en-US".to_string(),
            currency: None,
            labels: OutputLabels::default(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Reads and validates a TOML settings file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Parses and validates settings from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the cross-field rules serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_percent > self.max_percent {
            return Err(ConfigError::DefaultAboveMax {
                default: self.default_percent,
                max: self.max_percent,
            });
        }
        self.currency_format()?;
        Ok(())
    }

    /// The explicit `[currency]` table if given, else the locale preset.
    pub fn currency_format(&self) -> Result<CurrencyFormat, ConfigError> {
        match &self.currency {
            Some(format) => Ok(format.clone()),
            None => CurrencyFormat::for_locale(&self.currency_locale)
                .ok_or_else(|| ConfigError::UnknownLocale(self.currency_locale.clone())),
        }
    }
}

impl fmt::Display for AppConfig {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Default tip:  {}%", self.default_percent)?;
        writeln!(f, "Max tip:      {}%", self.max_percent)?;
        match &self.currency {
            Some(format) => writeln!(f, "Currency:     custom ({})", format.symbol)?,
            None => writeln!(f, "Currency:     {}", self.currency_locale)?,
        }
        writeln!(f, "Log level:    {}", self.log_level)
    }
}
