//! Consumption-banded incentive rebates.

use serde::{Deserialize, Serialize};

/// One row of the incentive table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IncentiveBand {
    /// Inclusive upper bound of the band (kWh).
    pub upper_bound_kwh: f64,
    /// Rebate rate applied to the whole consumption (currency/kWh, <= 0).
    pub rate_per_kwh: f64,
}

impl IncentiveBand {
    const fn new(upper_bound_kwh: f64, rate_per_kwh: f64) -> Self {
        Self {
            upper_bound_kwh,
            rate_per_kwh,
        }
    }
}

/// Built-in domestic incentive bands, ordered by upper bound.
pub const DOMESTIC_BANDS: [IncentiveBand; 17] = [
    IncentiveBand::new(200.0, -0.25),
    IncentiveBand::new(250.0, -0.245),
    IncentiveBand::new(300.0, -0.225),
    IncentiveBand::new(350.0, -0.21),
    IncentiveBand::new(400.0, -0.17),
    IncentiveBand::new(450.0, -0.145),
    IncentiveBand::new(500.0, -0.12),
    IncentiveBand::new(550.0, -0.105),
    IncentiveBand::new(600.0, -0.09),
    IncentiveBand::new(650.0, -0.075),
    IncentiveBand::new(700.0, -0.055),
    IncentiveBand::new(750.0, -0.045),
    IncentiveBand::new(800.0, -0.04),
    IncentiveBand::new(850.0, -0.025),
    IncentiveBand::new(900.0, -0.01),
    IncentiveBand::new(1000.0, -0.005),
    IncentiveBand::new(1500.0, 0.0),
];

/// Ordered incentive table.
///
/// Bounds are strictly increasing. The first band whose bound is `>=` the
/// consumption applies; above the last bound there is no incentive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IncentiveTable {
    bands: Vec<IncentiveBand>,
}

impl IncentiveTable {
    /// Builds a table from bands already ordered by upper bound.
    ///
    /// Ordering is checked by [`crate::config::TariffConfig::validate`];
    /// an unordered table still looks up the first matching row.
    pub fn new(bands: Vec<IncentiveBand>) -> Self {
        Self { bands }
    }

    /// The built-in domestic table.
    pub fn domestic() -> Self {
        Self::new(DOMESTIC_BANDS.to_vec())
    }

    pub fn bands(&self) -> &[IncentiveBand] {
        &self.bands
    }

    /// Rate of the first band covering `consumption_kwh`.
    pub fn rate_for(&self, consumption_kwh: f64) -> Option<f64> {
        self.bands
            .iter()
            .find(|b| consumption_kwh <= b.upper_bound_kwh)
            .map(|b| b.rate_per_kwh)
    }

    /// Incentive amount (currency, <= 0) for a consumption value.
    pub fn incentive(&self, consumption_kwh: f64) -> f64 {
        self.rate_for(consumption_kwh)
            .map_or(0.0, |rate| consumption_kwh * rate)
    }

    /// Whether upper bounds are strictly increasing.
    pub fn is_strictly_increasing(&self) -> bool {
        self.bands
            .windows(2)
            .all(|w| w[0].upper_bound_kwh < w[1].upper_bound_kwh)
    }
}

impl Default for IncentiveTable {
    fn default() -> Self {
        Self::domestic()
    }
}
