use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::estimate::{EstimateResult, InputSet};

// ─── Presentation ────────────────────────────────────────────────────────────

/// Which metric subset a report displays. Both layouts read the same
/// [`EstimateResult`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportLayout {
    /// Savings, cost, ROI and CO₂ cards
    #[default]
    Full,
    /// Savings, cost, payback period and per-panel saving cards
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    MonthlySavings,
    SystemCost,
    ReturnOnInvestment,
    Co2Reduction,
    PaybackPeriod,
    SavingPerPanel,
}

impl ReportLayout {
    pub const ALL: [ReportLayout; 2] = [ReportLayout::Full, ReportLayout::Summary];

    pub fn metrics(self) -> &'static [MetricKey] {
        match self {
            ReportLayout::Full => &[
                MetricKey::MonthlySavings,
                MetricKey::SystemCost,
                MetricKey::ReturnOnInvestment,
                MetricKey::Co2Reduction,
            ],
            ReportLayout::Summary => &[
                MetricKey::MonthlySavings,
                MetricKey::SystemCost,
                MetricKey::PaybackPeriod,
                MetricKey::SavingPerPanel,
            ],
        }
    }
}

/// One displayed card: label plus formatted value and unit suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MetricRow {
    pub key: MetricKey,
    pub label: String,
    /// Formatted value, including currency prefix where applicable
    pub value: String,
    /// Unit suffix; empty when the value carries its own unit
    pub unit: String,
}

impl MetricRow {
    /// The row as it reads on screen, e.g. `"Estimated Cost: RM 12000.00"`.
    pub fn display_text(&self) -> String {
        if self.unit.is_empty() || self.unit == "%" {
            format!("{}: {}{}", self.label, self.value, self.unit)
        } else {
            format!("{}: {} {}", self.label, self.value, self.unit)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReportView {
    pub title: String,
    pub layout: ReportLayout,
    pub rows: Vec<MetricRow>,
    pub warning: Option<String>,
}

/// Serialized report ready for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    pub filename: String,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

// ─── REST API types ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResponse {
    pub id: Uuid,
    pub computed_at: DateTime<Utc>,
    pub input: InputSet,
    pub result: EstimateResult,
    pub report: ReportView,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ReportQuery {
    pub layout: Option<ReportLayout>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LocationInfo {
    pub tag: String,
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LayoutInfo {
    pub layout: ReportLayout,
    pub metrics: Vec<MetricKey>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub has_result: bool,
}
