//! TOML-based tariff configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::sweep::SampleGrid;
use crate::tariff::{
    Charges, IncentiveBand, IncentiveTable, RateTier, SurchargeThresholds, Tariff, TariffSchedule,
};

/// Top-level tariff configuration parsed from TOML.
///
/// All sections default to the built-in domestic tariff. Load from TOML with
/// [`TariffConfig::from_toml_file`] or use [`TariffConfig::domestic`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TariffConfig {
    /// Per-tier rates.
    #[serde(default)]
    pub rates: RatesConfig,
    /// Tier and surcharge thresholds.
    #[serde(default)]
    pub thresholds: ThresholdsConfig,
    /// Flat charges and tax rates.
    #[serde(default)]
    pub charges: ChargesConfig,
    /// Incentive bands; a list given in TOML replaces the whole table.
    #[serde(default = "default_incentives")]
    pub incentives: Vec<IncentiveBand>,
    /// Consumption sweep for the curve.
    #[serde(default)]
    pub sweep: SweepConfig,
    /// Console report options.
    #[serde(default)]
    pub report: ReportConfig,
}

fn default_incentives() -> Vec<IncentiveBand> {
    IncentiveTable::domestic().bands().to_vec()
}

/// Rates for both tiers.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RatesConfig {
    /// Rates at or below the high-usage threshold.
    pub standard: RateTier,
    /// Rates above the high-usage threshold.
    pub high_usage: RateTier,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            standard: RateTier::STANDARD,
            high_usage: RateTier::HIGH_USAGE,
        }
    }
}

/// Consumption thresholds (kWh).
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThresholdsConfig {
    /// Tier boundary.
    pub high_usage_kwh: f64,
    /// Fuel adjustment, retail charge and service tax apply above this.
    pub service_tax_kwh: f64,
    /// Consumption tax applies above this.
    pub consumption_tax_kwh: f64,
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            high_usage_kwh: TariffSchedule::DOMESTIC.high_usage_threshold_kwh,
            service_tax_kwh: SurchargeThresholds::DOMESTIC.service_tax_kwh,
            consumption_tax_kwh: SurchargeThresholds::DOMESTIC.consumption_tax_kwh,
        }
    }
}

/// Flat charges and tax rates.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChargesConfig {
    /// Flat retail charge (currency).
    pub retail_charge: f64,
    /// Fuel adjustment (currency/kWh).
    pub fuel_rate_per_kwh: f64,
    /// Service tax fraction.
    pub service_tax_rate: f64,
    /// Consumption tax fraction.
    pub consumption_tax_rate: f64,
}

impl Default for ChargesConfig {
    fn default() -> Self {
        let c = Charges::DOMESTIC;
        Self {
            retail_charge: c.retail_charge,
            fuel_rate_per_kwh: c.fuel_rate_per_kwh,
            service_tax_rate: c.service_tax_rate,
            consumption_tax_rate: c.consumption_tax_rate,
        }
    }
}

/// Consumption sweep parameters (kWh).
///
/// The grid may hold at most [`crate::sweep::MAX_SAMPLES`] samples.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepConfig {
    /// First sample.
    pub start_kwh: f64,
    /// Inclusive upper limit.
    pub end_kwh: f64,
    /// Sample spacing (must be > 0).
    pub step_kwh: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        let g = SampleGrid::DOMESTIC;
        Self {
            start_kwh: g.start_kwh,
            end_kwh: g.end_kwh,
            step_kwh: g.step_kwh,
        }
    }
}

/// Console report options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Consumption values at which to report the marginal rate (kWh, >= 1).
    pub marginal_points_kwh: Vec<f64>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            marginal_points_kwh: vec![1200.0, 1665.0],
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"sweep.step_kwh"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl TariffConfig {
    /// Returns the built-in domestic tariff configuration.
    pub fn domestic() -> Self {
        Self {
            rates: RatesConfig::default(),
            thresholds: ThresholdsConfig::default(),
            charges: ChargesConfig::default(),
            incentives: default_incentives(),
            sweep: SweepConfig::default(),
            report: ReportConfig::default(),
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["domestic"];

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "domestic" => Ok(Self::domestic()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("tariff", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Builds the tariff described by this configuration.
    pub fn tariff(&self) -> Tariff {
        Tariff {
            schedule: TariffSchedule {
                standard: self.rates.standard,
                high_usage: self.rates.high_usage,
                high_usage_threshold_kwh: self.thresholds.high_usage_kwh,
            },
            thresholds: SurchargeThresholds {
                service_tax_kwh: self.thresholds.service_tax_kwh,
                consumption_tax_kwh: self.thresholds.consumption_tax_kwh,
            },
            charges: Charges {
                retail_charge: self.charges.retail_charge,
                fuel_rate_per_kwh: self.charges.fuel_rate_per_kwh,
                service_tax_rate: self.charges.service_tax_rate,
                consumption_tax_rate: self.charges.consumption_tax_rate,
            },
            incentives: IncentiveTable::new(self.incentives.clone()),
        }
    }

    /// Builds the sample grid.
    ///
    /// # Panics
    ///
    /// Panics if `sweep.step_kwh` is not positive; call [`Self::validate`] first.
    pub fn grid(&self) -> SampleGrid {
        SampleGrid::new(self.sweep.start_kwh, self.sweep.end_kwh, self.sweep.step_kwh)
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        for (tier, r) in [
            ("standard", &self.rates.standard),
            ("high_usage", &self.rates.high_usage),
        ] {
            for (name, v) in [
                ("energy", r.energy),
                ("capacity", r.capacity),
                ("network", r.network),
            ] {
                if !v.is_finite() {
                    errors.push(ConfigError::new(
                        format!("rates.{tier}.{name}"),
                        "must be finite",
                    ));
                }
            }
        }

        let t = &self.thresholds;
        for (name, v) in [
            ("high_usage_kwh", t.high_usage_kwh),
            ("service_tax_kwh", t.service_tax_kwh),
            ("consumption_tax_kwh", t.consumption_tax_kwh),
        ] {
            if !v.is_finite() || v <= 0.0 {
                errors.push(ConfigError::new(
                    format!("thresholds.{name}"),
                    "must be finite and > 0",
                ));
            }
        }

        let c = &self.charges;
        for (name, v) in [
            ("retail_charge", c.retail_charge),
            ("fuel_rate_per_kwh", c.fuel_rate_per_kwh),
            ("service_tax_rate", c.service_tax_rate),
            ("consumption_tax_rate", c.consumption_tax_rate),
        ] {
            if !v.is_finite() {
                errors.push(ConfigError::new(format!("charges.{name}"), "must be finite"));
            }
        }

        for (i, band) in self.incentives.iter().enumerate() {
            if !band.upper_bound_kwh.is_finite() || band.upper_bound_kwh <= 0.0 {
                errors.push(ConfigError::new(
                    format!("incentives[{i}].upper_bound_kwh"),
                    "must be finite and > 0",
                ));
            }
            if !band.rate_per_kwh.is_finite() || band.rate_per_kwh > 0.0 {
                errors.push(ConfigError::new(
                    format!("incentives[{i}].rate_per_kwh"),
                    "must be finite and <= 0",
                ));
            }
        }
        if !IncentiveTable::new(self.incentives.clone()).is_strictly_increasing() {
            errors.push(ConfigError::new(
                "incentives",
                "upper_bound_kwh must be strictly increasing",
            ));
        }

        let s = &self.sweep;
        if !s.step_kwh.is_finite() || s.step_kwh <= 0.0 {
            errors.push(ConfigError::new("sweep.step_kwh", "must be finite and > 0"));
        }
        if !s.start_kwh.is_finite() || s.start_kwh < 0.0 {
            errors.push(ConfigError::new("sweep.start_kwh", "must be finite and >= 0"));
        }
        if !s.end_kwh.is_finite() || s.end_kwh < s.start_kwh {
            errors.push(ConfigError::new(
                "sweep.end_kwh",
                "must be finite and >= sweep.start_kwh",
            ));
        }
        if s.step_kwh > 0.0 && s.start_kwh.is_finite() && s.end_kwh.is_finite() {
            if let Err(e) = self.grid().sample_count() {
                errors.push(ConfigError::new("sweep", e.to_string()));
            }
        }

        for (i, &p) in self.report.marginal_points_kwh.iter().enumerate() {
            if !p.is_finite() || p < 1.0 {
                errors.push(ConfigError::new(
                    format!("report.marginal_points_kwh[{i}]"),
                    "must be finite and >= 1",
                ));
            }
        }

        errors
    }
}
