//! API response and query types.
//!
//! Curve field names follow the CSV export columns.

use serde::{Deserialize, Serialize};

use crate::reporting::SweepReport;
use crate::sweep::CurvePoint;
use crate::tariff::{Tariff, TierLevel};

/// Tariff parameters together with the sweep summary.
#[derive(Debug, Serialize)]
pub struct TariffResponse {
    /// Rates, thresholds, charges and incentive table in effect.
    pub tariff: Tariff,
    /// Summary of the evaluated curve.
    pub report: SweepReport,
}

/// Single curve sample using CSV export field names.
///
/// Flattens the nested breakdown and renames `total` to `bill`.
#[derive(Debug, Serialize)]
pub struct CurveRecord {
    pub consumption_kwh: f64,
    pub tier: TierLevel,
    pub energy: f64,
    pub capacity: f64,
    pub network: f64,
    pub fuel_adjustment: f64,
    pub retail_charge: f64,
    pub incentive: f64,
    pub subtotal: f64,
    pub service_tax: f64,
    pub consumption_tax: f64,
    /// Amount payable (`total` in the breakdown).
    pub bill: f64,
    /// `null` at zero consumption.
    pub unit_cost: Option<f64>,
}

impl From<&CurvePoint> for CurveRecord {
    fn from(p: &CurvePoint) -> Self {
        let b = &p.breakdown;
        Self {
            consumption_kwh: p.consumption_kwh,
            tier: b.tier,
            energy: b.energy,
            capacity: b.capacity,
            network: b.network,
            fuel_adjustment: b.fuel_adjustment,
            retail_charge: b.retail_charge,
            incentive: b.incentive,
            subtotal: b.subtotal,
            service_tax: b.service_tax,
            consumption_tax: b.consumption_tax,
            bill: b.total,
            unit_cost: p.unit_cost,
        }
    }
}

/// Consumption query for the bill and marginal endpoints.
#[derive(Debug, Deserialize)]
pub struct ConsumptionQuery {
    /// Consumption (kWh).
    pub kwh: f64,
}

/// Optional range query parameters for the curve endpoint.
#[derive(Debug, Deserialize)]
pub struct CurveQuery {
    /// Lowest consumption (kWh, inclusive).
    pub from: Option<f64>,
    /// Highest consumption (kWh, inclusive).
    pub to: Option<f64>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
