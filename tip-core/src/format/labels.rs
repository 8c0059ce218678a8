use serde::{Deserialize, Serialize};

use crate::models::{FormattedBreakdown, TipPercent};

/// Localized text fragments placed around the formatted figures.
///
/// The result label reads
/// `bill_prefix BILL bill_suffix tip_prefix TIP tip_suffix total_prefix TOTAL`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputLabels {
    pub bill_prefix: String,
    pub bill_suffix: String,
    pub tip_prefix: String,
    pub tip_suffix: String,
    pub total_prefix: String,
    pub percent_symbol: String,
    /// Shown when the slider moves before a bill amount has been entered.
    pub advisory_message: String,
}

impl Default for OutputLabels {
    fn default() -> Self {
        Self {
            bill_prefix: "Bill: ".to_string(),
            bill_suffix: "\n".to_string(),
            tip_prefix: "Tip: ".to_string(),
            tip_suffix: "\n".to_string(),
            total_prefix: "Total: ".to_string(),
            percent_symbol: "%".to_string(),
            advisory_message: "Enter a bill amount first".to_string(),
        }
    }
}

impl OutputLabels {
    /// Text for the readout next to the slider, e.g. `15%`.
    pub fn percent_label(
        &self,
        percent: TipPercent,
    ) -> String {
        format!("{percent}{}", self.percent_symbol)
    }

    /// Joins the formatted figures into the multi-line result label.
    pub fn compose(
        &self,
        outputs: &FormattedBreakdown,
    ) -> String {
        format!(
            "{}{}{}{}{}{}{}{}",
            self.bill_prefix,
            outputs.bill,
            self.bill_suffix,
            self.tip_prefix,
            outputs.tip,
            self.tip_suffix,
            self.total_prefix,
            outputs.total
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_outputs() -> FormattedBreakdown {
        FormattedBreakdown {
            bill: "$45.00".to_string(),
            tip: "$6.75".to_string(),
            total: "$51.75".to_string(),
        }
    }

    #[test]
    fn percent_label_appends_symbol() {
        let labels = OutputLabels::default();

        assert_eq!(labels.percent_label(TipPercent::default()), "15%");
        assert_eq!(labels.percent_label(TipPercent::ZERO), "0%");
    }

    #[test]
    fn compose_default_labels() {
        let labels = OutputLabels::default();

        assert_eq!(
            labels.compose(&sample_outputs()),
            "Bill: $45.00\nTip: $6.75\nTotal: $51.75"
        );
    }

    #[test]
    fn compose_custom_fragments() {
        let labels = OutputLabels {
            bill_prefix: "Rechnung ".to_string(),
            bill_suffix: " | ".to_string(),
            tip_prefix: "Trinkgeld ".to_string(),
            tip_suffix: " | ".to_string(),
            total_prefix: "Gesamt ".to_string(),
            ..OutputLabels::default()
        };

        assert_eq!(
            labels.compose(&sample_outputs()),
            "Rechnung $45.00 | Trinkgeld $6.75 | Gesamt $51.75"
        );
    }
}
