//! Turns an [`EstimateResult`] into labelled cards and a downloadable
//! document. The engine knows nothing about this module.

use std::fmt::Write;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use thiserror::Error;

use crate::config::ReportConfig;
use crate::models::estimate::EstimateResult;
use crate::models::report::{ExportedDocument, MetricKey, MetricRow, ReportLayout, ReportView};

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Report has no metrics to export")]
    EmptyView,

    #[error("Failed to encode report: {0}")]
    Encoding(#[from] std::fmt::Error),
}

pub trait ReportRenderer {
    fn render(&self, result: &EstimateResult, layout: ReportLayout) -> ReportView;

    /// Serializes exactly the rows of `view`, in display order.
    fn export(&self, view: &ReportView) -> Result<ExportedDocument, RenderError>;
}

/// Plain-text renderer: one `label: value unit` line per card.
#[derive(Debug, Clone)]
pub struct TextReportRenderer {
    title: String,
    currency_prefix: String,
    export_filename: String,
}

impl TextReportRenderer {
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            title: config.title.clone(),
            currency_prefix: config.currency_prefix.clone(),
            export_filename: config.export_filename.clone(),
        }
    }

    fn money(&self, value: Decimal) -> String {
        format!("{} {:.2}", self.currency_prefix, fixed(value, 2))
    }

    fn row(&self, key: MetricKey, result: &EstimateResult) -> MetricRow {
        let (label, value, unit) = match key {
            MetricKey::MonthlySavings => (
                "Estimated Savings",
                self.money(result.estimated_monthly_savings),
                "",
            ),
            MetricKey::SystemCost => (
                "Estimated Cost",
                self.money(result.estimated_system_cost),
                "",
            ),
            MetricKey::ReturnOnInvestment => (
                "ROI",
                format!("{:.1}", fixed(result.return_on_investment_ratio.saturating_mul(dec!(100)), 1)),
                "%",
            ),
            MetricKey::Co2Reduction => (
                "CO₂ Reduction",
                format!("{:.1}", fixed(result.co2_reduction_tons_per_year, 1)),
                "tons/year",
            ),
            MetricKey::PaybackPeriod => (
                "Payback Period",
                format!("{:.1}", fixed(result.reference_figures.payback_period_years, 1)),
                "years",
            ),
            MetricKey::SavingPerPanel => (
                "Saving per Panel",
                self.money(result.reference_figures.monthly_saving_per_panel),
                "/month",
            ),
        };
        MetricRow {
            key,
            label: label.to_string(),
            value,
            unit: unit.to_string(),
        }
    }
}

fn fixed(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

impl ReportRenderer for TextReportRenderer {
    fn render(&self, result: &EstimateResult, layout: ReportLayout) -> ReportView {
        ReportView {
            title: self.title.clone(),
            layout,
            rows: layout.metrics().iter().map(|&k| self.row(k, result)).collect(),
            warning: result.advisory_warning.clone(),
        }
    }

    fn export(&self, view: &ReportView) -> Result<ExportedDocument, RenderError> {
        if view.rows.is_empty() {
            return Err(RenderError::EmptyView);
        }

        let mut body = String::new();
        writeln!(body, "{}", view.title)?;
        writeln!(body, "{}", "=".repeat(view.title.chars().count()))?;
        for row in &view.rows {
            writeln!(body, "{}", row.display_text())?;
        }
        if let Some(warning) = &view.warning {
            writeln!(body)?;
            writeln!(body, "Warning: {}", warning)?;
        }

        Ok(ExportedDocument {
            filename: self.export_filename.clone(),
            content_type: "text/plain; charset=utf-8",
            body: body.into_bytes(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EstimateParams;
    use crate::models::estimate::InputSet;
    use crate::services::estimate_engine::compute;

    fn renderer() -> TextReportRenderer {
        TextReportRenderer::new(&ReportConfig::default())
    }

    fn example_result(no_sun_days: u8) -> EstimateResult {
        let input = InputSet {
            monthly_bill_amount: dec!(300),
            panel_count: 10,
            no_sun_days_per_month: no_sun_days,
            ..Default::default()
        };
        compute(&input, &EstimateParams::default())
    }

    fn values(view: &ReportView) -> Vec<(&str, &str)> {
        view.rows.iter().map(|r| (r.value.as_str(), r.unit.as_str())).collect()
    }

    #[test]
    fn test_full_layout_formats_cards() {
        let view = renderer().render(&example_result(5), ReportLayout::Full);
        assert_eq!(view.title, "Solar Savings Calculator");
        assert_eq!(
            values(&view),
            vec![
                ("RM 105.00", ""),
                ("RM 12000.00", ""),
                ("10.5", "%"),
                ("4.5", "tons/year"),
            ]
        );
        assert_eq!(view.warning, None);
    }

    #[test]
    fn test_summary_layout_uses_reference_figures() {
        let view = renderer().render(&example_result(5), ReportLayout::Summary);
        let keys: Vec<MetricKey> = view.rows.iter().map(|r| r.key).collect();
        assert_eq!(keys, ReportLayout::Summary.metrics());
        assert_eq!(view.rows[2].value, "6.0");
        assert_eq!(view.rows[2].unit, "years");
        assert_eq!(view.rows[3].value, "RM 35.00");
    }

    #[test]
    fn test_display_text_joins_percent_without_space() {
        let view = renderer().render(&example_result(5), ReportLayout::Full);
        assert_eq!(view.rows[0].display_text(), "Estimated Savings: RM 105.00");
        assert_eq!(view.rows[2].display_text(), "ROI: 10.5%");
        assert_eq!(view.rows[3].display_text(), "CO₂ Reduction: 4.5 tons/year");
    }

    #[test]
    fn test_rounding_is_half_away_from_zero() {
        assert_eq!(format!("{:.2}", fixed(dec!(1.005), 2)), "1.01");
        assert_eq!(format!("{:.1}", fixed(dec!(12.25), 1)), "12.3");
        assert_eq!(format!("{:.2}", fixed(dec!(7), 2)), "7.00");
    }

    #[test]
    fn test_export_contains_displayed_rows_verbatim() {
        let r = renderer();
        let view = r.render(&example_result(12), ReportLayout::Full);
        let doc = r.export(&view).unwrap();
        assert_eq!(doc.filename, "solar-report.txt");
        assert!(doc.content_type.starts_with("text/plain"));

        let text = String::from_utf8(doc.body).unwrap();
        for row in &view.rows {
            assert!(text.contains(&row.display_text()), "missing {:?} in {}", row, text);
        }
        assert!(text.contains("Warning: Too many cloudy days may reduce efficiency."));
    }

    #[test]
    fn test_export_of_empty_view_fails() {
        let view = ReportView {
            title: "Empty".to_string(),
            layout: ReportLayout::Full,
            rows: Vec::new(),
            warning: None,
        };
        assert!(matches!(renderer().export(&view), Err(RenderError::EmptyView)));
    }

    #[test]
    fn test_custom_branding_is_applied() {
        let config = ReportConfig {
            title: "Sun Report".to_string(),
            currency_prefix: "$".to_string(),
            export_filename: "report.txt".to_string(),
        };
        let r = TextReportRenderer::new(&config);
        let view = r.render(&example_result(0), ReportLayout::Full);
        assert_eq!(view.title, "Sun Report");
        assert_eq!(view.rows[0].value, "$ 105.00");
        assert_eq!(r.export(&view).unwrap().filename, "report.txt");
    }
}
