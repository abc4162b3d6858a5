use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ─── Raw form input ──────────────────────────────────────────────────────────

/// A single form value as submitted by the client. Number inputs may arrive
/// as JSON numbers or as the raw text of the input element. Any other JSON
/// shape lands in `Other` so one odd field never rejects the whole form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

/// Unvalidated calculator form. Every field is optional; the normalizer
/// coerces whatever is present into an [`InputSet`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RawInput {
    #[serde(default)]
    pub monthly_bill_amount: Option<FieldValue>,
    #[serde(default)]
    pub panel_count: Option<FieldValue>,
    #[serde(default)]
    pub no_sun_days_per_month: Option<FieldValue>,
    #[serde(default)]
    pub daytime_only_usage: Option<FieldValue>,
    #[serde(default)]
    pub location: Option<FieldValue>,
}

// ─── Normalized input ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Location {
    #[serde(rename = "kl")]
    KualaLumpur,
    #[serde(rename = "penang")]
    Penang,
    #[serde(rename = "jb")]
    JohorBahru,
}

impl Location {
    pub const ALL: [Location; 3] = [Location::KualaLumpur, Location::Penang, Location::JohorBahru];

    pub fn tag(self) -> &'static str {
        match self {
            Location::KualaLumpur => "kl",
            Location::Penang => "penang",
            Location::JohorBahru => "jb",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Location::KualaLumpur => "Kuala Lumpur",
            Location::Penang => "Penang",
            Location::JohorBahru => "Johor Bahru",
        }
    }

    /// Case-insensitive tag lookup. Unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        Self::ALL
            .into_iter()
            .find(|l| l.tag().eq_ignore_ascii_case(tag))
    }
}

/// Validated request to the estimate engine. Built fresh for every
/// recomputation; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InputSet {
    /// Monthly electricity bill, currency units, >= 0
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub monthly_bill_amount: Decimal,
    pub panel_count: u32,
    /// Always within 0..=31
    pub no_sun_days_per_month: u8,
    pub daytime_only_usage: bool,
    pub location: Option<Location>,
}

impl Default for InputSet {
    fn default() -> Self {
        Self {
            monthly_bill_amount: Decimal::ZERO,
            panel_count: 0,
            no_sun_days_per_month: 0,
            daytime_only_usage: false,
            location: None,
        }
    }
}

// ─── Derived metrics ─────────────────────────────────────────────────────────

/// Static figures shown by the summary layout. They are placeholders with no
/// connection to the input until a real model defines them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceFigures {
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub payback_period_years: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub monthly_saving_per_panel: Decimal,
}

/// Output of the estimate engine. Replaced wholesale on every recomputation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResult {
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub estimated_monthly_savings: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub estimated_system_cost: Decimal,
    /// Annual savings over system cost, as a fraction (0.105 = 10.5 %)
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub return_on_investment_ratio: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub co2_reduction_tons_per_year: Decimal,
    /// `None` means no warning. Never an empty string.
    pub advisory_warning: Option<String>,
    pub reference_figures: ReferenceFigures,
}
