use std::path::Path;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}

fn default_port() -> u16 { 8080 }
fn default_savings_rate() -> Decimal { dec!(0.35) }
fn default_unit_panel_cost() -> Decimal { dec!(1200) }
fn default_co2_factor_per_panel() -> Decimal { dec!(0.45) }
fn default_cloudy_day_threshold() -> u8 { 10 }
fn default_advisory_message() -> String { "Too many cloudy days may reduce efficiency.".to_string() }
fn default_payback_period_years() -> Decimal { dec!(6) }
fn default_monthly_saving_per_panel() -> Decimal { dec!(35.00) }
fn default_title() -> String { "Solar Savings Calculator".to_string() }
fn default_currency_prefix() -> String { "RM".to_string() }
fn default_export_filename() -> String { "solar-report.txt".to_string() }

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub estimate: EstimateParams,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: default_port() }
    }
}

/// Model constants of the estimate engine. All of them are placeholders
/// until a real solar-yield model replaces them.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, ToSchema)]
pub struct EstimateParams {
    /// Fraction of the monthly bill saved by the installation
    #[serde(default = "default_savings_rate", with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub savings_rate: Decimal,
    /// Installed cost per panel, currency units
    #[serde(default = "default_unit_panel_cost", with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub unit_panel_cost: Decimal,
    /// Tons of CO₂ offset per panel per year
    #[serde(default = "default_co2_factor_per_panel", with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub co2_factor_per_panel: Decimal,
    /// Warning is raised when no-sun days strictly exceed this value
    #[serde(default = "default_cloudy_day_threshold")]
    pub cloudy_day_threshold: u8,
    #[serde(default = "default_advisory_message")]
    pub advisory_message: String,
    #[serde(default = "default_payback_period_years", with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub payback_period_years: Decimal,
    #[serde(default = "default_monthly_saving_per_panel", with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub monthly_saving_per_panel: Decimal,
}

impl Default for EstimateParams {
    fn default() -> Self {
        Self {
            savings_rate: default_savings_rate(),
            unit_panel_cost: default_unit_panel_cost(),
            co2_factor_per_panel: default_co2_factor_per_panel(),
            cloudy_day_threshold: default_cloudy_day_threshold(),
            advisory_message: default_advisory_message(),
            payback_period_years: default_payback_period_years(),
            monthly_saving_per_panel: default_monthly_saving_per_panel(),
        }
    }
}

impl EstimateParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("savings_rate", self.savings_rate),
            ("unit_panel_cost", self.unit_panel_cost),
            ("co2_factor_per_panel", self.co2_factor_per_panel),
            ("payback_period_years", self.payback_period_years),
            ("monthly_saving_per_panel", self.monthly_saving_per_panel),
        ];
        for (name, value) in non_negative {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(ConfigError::Validation(format!(
                    "estimate.{} must not be negative, got {}",
                    name, value
                )));
            }
        }
        if self.advisory_message.trim().is_empty() {
            return Err(ConfigError::Validation(
                "estimate.advisory_message must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_currency_prefix")]
    pub currency_prefix: String,
    #[serde(default = "default_export_filename")]
    pub export_filename: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            currency_prefix: default_currency_prefix(),
            export_filename: default_export_filename(),
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(content)?;
        config.estimate.validate()?;
        if config.report.export_filename.trim().is_empty() {
            return Err(ConfigError::Validation(
                "report.export_filename must not be empty".to_string(),
            ));
        }
        Ok(config)
    }

    /// Loads `path`, falling back to built-in defaults when the file does
    /// not exist. Any other failure is returned.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!(path = %path.display(), "Configuration file not found, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }
}
