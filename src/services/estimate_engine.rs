/// ============================================================
///  Solar Savings Estimate Engine
///
///  Pure mapping InputSet → EstimateResult:
///   1. Monthly savings  – bill × savings rate
///   2. System cost      – panels × unit panel cost
///   3. ROI              – annual savings / max(cost, 1)
///   4. CO₂ offset       – panels × per-panel factor
///   5. Advisory         – cloudy-day threshold check
///
///  Every constant comes from `EstimateParams`; replacing the
///  placeholder model means replacing those values (or this
///  file) without touching callers.
/// ============================================================

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::config::EstimateParams;
use crate::models::estimate::{EstimateResult, InputSet, ReferenceFigures};

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Computes the derived metrics for `input`. Total and deterministic.
pub fn compute(input: &InputSet, params: &EstimateParams) -> EstimateResult {
    let panels = Decimal::from(input.panel_count);

    // ── 1. Savings ─────────────────────────────────────────────
    let savings = input
        .monthly_bill_amount
        .checked_mul(params.savings_rate)
        .unwrap_or(Decimal::MAX);

    // ── 2. Cost ────────────────────────────────────────────────
    let cost = panels
        .checked_mul(params.unit_panel_cost)
        .unwrap_or(Decimal::MAX);

    // ── 3. ROI (floor of 1 keeps the zero-panel case finite) ──
    let annual_savings = savings.checked_mul(MONTHS_PER_YEAR).unwrap_or(Decimal::MAX);
    let roi = annual_savings
        .checked_div(cost.max(Decimal::ONE))
        .unwrap_or(Decimal::MAX);

    // ── 4. CO₂ ─────────────────────────────────────────────────
    let co2 = panels
        .checked_mul(params.co2_factor_per_panel)
        .unwrap_or(Decimal::MAX);

    // ── 5. Advisory ────────────────────────────────────────────
    let advisory_warning = (input.no_sun_days_per_month > params.cloudy_day_threshold)
        .then(|| params.advisory_message.clone());

    EstimateResult {
        estimated_monthly_savings: savings,
        estimated_system_cost: cost,
        return_on_investment_ratio: roi,
        co2_reduction_tons_per_year: co2,
        advisory_warning,
        reference_figures: ReferenceFigures {
            payback_period_years: params.payback_period_years,
            monthly_saving_per_panel: params.monthly_saving_per_panel,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::estimate::{FieldValue, RawInput};
    use crate::services::input_normalizer::normalize;

    fn input(bill: Decimal, panels: u32, no_sun_days: u8) -> InputSet {
        InputSet {
            monthly_bill_amount: bill,
            panel_count: panels,
            no_sun_days_per_month: no_sun_days,
            ..Default::default()
        }
    }

    #[test]
    fn test_reference_example() {
        let r = compute(&input(dec!(300), 10, 5), &EstimateParams::default());
        assert_eq!(r.estimated_monthly_savings, dec!(105.00));
        assert_eq!(r.estimated_system_cost, dec!(12000.00));
        assert_eq!(r.return_on_investment_ratio, dec!(0.105));
        assert_eq!(r.co2_reduction_tons_per_year, dec!(4.5));
        assert_eq!(r.advisory_warning, None);
    }

    #[test]
    fn test_deterministic() {
        let params = EstimateParams::default();
        let i = input(dec!(287.43), 7, 14);
        assert_eq!(compute(&i, &params), compute(&i, &params));
    }

    #[test]
    fn test_empty_form_yields_zero_metrics() {
        let raw = RawInput {
            monthly_bill_amount: Some(FieldValue::Text(String::new())),
            panel_count: Some(FieldValue::Text(String::new())),
            ..Default::default()
        };
        let r = compute(&normalize(&raw), &EstimateParams::default());
        assert_eq!(r.estimated_monthly_savings, Decimal::ZERO);
        assert_eq!(r.estimated_system_cost, Decimal::ZERO);
        assert_eq!(r.co2_reduction_tons_per_year, Decimal::ZERO);
        assert_eq!(r.return_on_investment_ratio, Decimal::ZERO);
    }

    #[test]
    fn test_zero_panels_does_not_divide_by_zero() {
        let r = compute(&input(dec!(300), 0, 0), &EstimateParams::default());
        assert_eq!(r.estimated_system_cost, Decimal::ZERO);
        // 105 × 12 / 1
        assert_eq!(r.return_on_investment_ratio, dec!(1260));
    }

    #[test]
    fn test_warning_threshold_is_strict() {
        let params = EstimateParams::default();
        let above = compute(&input(dec!(300), 10, 11), &params);
        let at = compute(&input(dec!(300), 10, 10), &params);
        assert!(above.advisory_warning.as_deref().is_some_and(|w| !w.is_empty()));
        assert_eq!(at.advisory_warning, None);
    }

    #[test]
    fn test_cost_scales_linearly_with_panels() {
        let params = EstimateParams::default();
        let one = compute(&input(Decimal::ZERO, 1, 0), &params);
        let ten = compute(&input(Decimal::ZERO, 10, 0), &params);
        assert_eq!(ten.estimated_system_cost, one.estimated_system_cost * dec!(10));
        assert_eq!(one.estimated_system_cost, params.unit_panel_cost);
    }

    #[test]
    fn test_constants_are_swappable() {
        let params = EstimateParams {
            savings_rate: dec!(0.5),
            unit_panel_cost: dec!(1000),
            co2_factor_per_panel: dec!(0.6),
            cloudy_day_threshold: 3,
            advisory_message: "Cloudy".to_string(),
            ..Default::default()
        };
        let r = compute(&input(dec!(200), 2, 4), &params);
        assert_eq!(r.estimated_monthly_savings, dec!(100));
        assert_eq!(r.estimated_system_cost, dec!(2000));
        assert_eq!(r.return_on_investment_ratio, dec!(0.6));
        assert_eq!(r.co2_reduction_tons_per_year, dec!(1.2));
        assert_eq!(r.advisory_warning.as_deref(), Some("Cloudy"));
    }

    #[test]
    fn test_reference_figures_ignore_input() {
        let params = EstimateParams::default();
        let a = compute(&input(dec!(10), 1, 0), &params);
        let b = compute(&input(dec!(900), 40, 20), &params);
        assert_eq!(a.reference_figures, b.reference_figures);
        assert_eq!(a.reference_figures.payback_period_years, params.payback_period_years);
    }

    #[test]
    fn test_location_and_daytime_flag_do_not_change_placeholder_model() {
        let params = EstimateParams::default();
        let plain = input(dec!(300), 10, 5);
        let tagged = InputSet {
            daytime_only_usage: true,
            location: Some(crate::models::estimate::Location::JohorBahru),
            ..plain.clone()
        };
        assert_eq!(compute(&plain, &params), compute(&tagged, &params));
    }

    #[test]
    fn test_extreme_input_saturates_annual_savings() {
        let params = EstimateParams::default();
        let r = compute(&input(Decimal::MAX, u32::MAX, 31), &params);

        let cost = Decimal::from(u32::MAX) * params.unit_panel_cost;
        assert_eq!(r.estimated_monthly_savings, Decimal::MAX * params.savings_rate);
        assert_eq!(r.estimated_system_cost, cost);
        // savings × 12 overflows and is held at Decimal::MAX before dividing
        assert_eq!(r.return_on_investment_ratio, Decimal::MAX / cost);
        assert_eq!(
            r.co2_reduction_tons_per_year,
            Decimal::from(u32::MAX) * params.co2_factor_per_panel
        );
        assert!(r.advisory_warning.is_some());
    }

    #[test]
    fn test_every_term_saturates_with_extreme_constants() {
        let params = EstimateParams {
            savings_rate: dec!(2),
            unit_panel_cost: Decimal::MAX,
            co2_factor_per_panel: Decimal::MAX,
            ..Default::default()
        };
        let r = compute(&input(Decimal::MAX, u32::MAX, 0), &params);
        assert_eq!(r.estimated_monthly_savings, Decimal::MAX);
        assert_eq!(r.estimated_system_cost, Decimal::MAX);
        assert_eq!(r.return_on_investment_ratio, Decimal::ONE);
        assert_eq!(r.co2_reduction_tons_per_year, Decimal::MAX);
        assert_eq!(r.advisory_warning, None);
    }
}
