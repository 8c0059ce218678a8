use thiserror::Error;
use tracing::{debug, info, warn};

use crate::calculations::{TipCalculationError, calculate};
use crate::input::{is_valid_entry_input, repair_entry_input};
use crate::models::{TipBreakdown, TipPercent, TipPercentError};
use crate::session::StateBundle;

/// Bundle keys used by [`TipSession::save`] and [`TipSession::restore`].
pub mod keys {
    pub const USER_INPUT: &str = "user_input";
    pub const TIP_PERCENT: &str = "tip_percent";
    pub const RESULTS_SHOWN: &str = "results_shown";
}

/// Errors raised by session handlers and restore.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Percent(#[from] TipPercentError),

    #[error(transparent)]
    Calculation(#[from] TipCalculationError),

    #[error("'{0}' is not valid bill input")]
    InvalidInput(String),

    #[error("saved state is missing '{0}'")]
    MissingKey(&'static str),
}

/// Result of a text change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextUpdate {
    /// Text to put back in the field when the edit was rejected.
    pub corrected: Option<String>,
    pub breakdown: TipBreakdown,
}

/// Result of a slider move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SliderUpdate {
    /// No bill has been entered; show the advisory and focus the field.
    NeedsBillAmount,
    Recalculated(TipBreakdown),
}

/// State for one calculator screen.
///
/// `raw_input` always satisfies [`is_valid_entry_input`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipSession {
    raw_input: String,
    tip_percent: TipPercent,
    results_shown: bool,
    default_percent: TipPercent,
}

impl Default for TipSession {
    fn default() -> Self {
        Self::new(TipPercent::default())
    }
}

impl TipSession {
    /// Creates a cleared session whose slider starts at `default_percent`.
    pub fn new(default_percent: TipPercent) -> Self {
        Self {
            raw_input: String::new(),
            tip_percent: default_percent,
            results_shown: false,
            default_percent,
        }
    }

    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    /// Replaces the field text without recalculating.
    pub fn set_raw_input(
        &mut self,
        raw_input: &str,
    ) -> Result<(), SessionError> {
        if !is_valid_entry_input(raw_input) {
            return Err(SessionError::InvalidInput(raw_input.to_string()));
        }
        self.raw_input = raw_input.to_string();
        Ok(())
    }

    pub fn tip_percent(&self) -> TipPercent {
        self.tip_percent
    }

    pub fn set_tip_percent(
        &mut self,
        tip_percent: TipPercent,
    ) {
        self.tip_percent = tip_percent;
    }

    pub fn results_shown(&self) -> bool {
        self.results_shown
    }

    pub fn set_results_shown(
        &mut self,
        results_shown: bool,
    ) {
        self.results_shown = results_shown;
    }

    pub fn default_percent(&self) -> TipPercent {
        self.default_percent
    }

    /// Handles the field's full text after an edit.
    ///
    /// Text that is not valid entry input is cut back to its longest valid
    /// prefix and returned in [`TextUpdate::corrected`].
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Calculation`] if the stored text cannot be
    /// turned into figures.
    pub fn on_text_changed(
        &mut self,
        text: &str,
    ) -> Result<TextUpdate, SessionError> {
        let corrected = if is_valid_entry_input(text) {
            None
        } else {
            let repaired = repair_entry_input(text);
            let dropped = text.chars().count() - repaired.chars().count();
            if dropped > 1 {
                warn!(input = %text, %repaired, dropped, "multi-character edit truncated");
            } else {
                debug!(input = %text, %repaired, "rejected keystroke");
            }
            Some(repaired)
        };

        self.raw_input = corrected.clone().unwrap_or_else(|| text.to_string());
        let breakdown = calculate(&self.raw_input, self.tip_percent)?;
        self.results_shown = true;

        Ok(TextUpdate {
            corrected,
            breakdown,
        })
    }

    /// Handles a slider move to `percent`.
    pub fn on_slider_changed(
        &mut self,
        percent: i64,
    ) -> Result<SliderUpdate, SessionError> {
        self.tip_percent = TipPercent::new(percent)?;

        if self.raw_input.is_empty() {
            info!(percent, "tip changed before a bill amount was entered");
            return Ok(SliderUpdate::NeedsBillAmount);
        }

        let breakdown = calculate(&self.raw_input, self.tip_percent)?;
        self.results_shown = true;
        Ok(SliderUpdate::Recalculated(breakdown))
    }

    /// Resets the field, slider and results to their initial state.
    pub fn on_clear(&mut self) {
        debug!("clearing session");
        self.raw_input.clear();
        self.tip_percent = self.default_percent;
        self.results_shown = false;
    }

    /// Recomputes the displayed results, if any are showing.
    pub fn breakdown(&self) -> Result<Option<TipBreakdown>, SessionError> {
        if !self.results_shown {
            return Ok(None);
        }
        Ok(Some(calculate(&self.raw_input, self.tip_percent)?))
    }

    /// Writes the session fields into `bundle`.
    pub fn save<B>(
        &self,
        bundle: &mut B,
    ) where
        B: StateBundle + ?Sized,
    {
        bundle.put_string(keys::USER_INPUT, &self.raw_input);
        bundle.put_int(keys::TIP_PERCENT, i64::from(self.tip_percent));
        bundle.put_bool(keys::RESULTS_SHOWN, self.results_shown);
    }

    /// Rebuilds a session from a bundle written by [`TipSession::save`].
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if a key is missing or holds the wrong type,
    /// the percent is out of range, or the saved text is not valid entry input.
    pub fn restore<B>(
        bundle: &B,
        default_percent: TipPercent,
    ) -> Result<Self, SessionError>
    where
        B: StateBundle + ?Sized,
    {
        let raw_input = bundle
            .get_string(keys::USER_INPUT)
            .ok_or(SessionError::MissingKey(keys::USER_INPUT))?;
        let tip_percent = bundle
            .get_int(keys::TIP_PERCENT)
            .ok_or(SessionError::MissingKey(keys::TIP_PERCENT))?;
        let results_shown = bundle
            .get_bool(keys::RESULTS_SHOWN)
            .ok_or(SessionError::MissingKey(keys::RESULTS_SHOWN))?;

        let mut session = Self::new(default_percent);
        session.set_raw_input(&raw_input)?;
        session.tip_percent = TipPercent::new(tip_percent)?;
        session.results_shown = results_shown;

        debug!(?session, "restored session");
        Ok(session)
    }
}
