//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use tariff_calc::reporting::SweepReport;
use tariff_calc::sweep::{BillCurve, SampleGrid, marginal_rates};
use tariff_calc::tariff::{BillBreakdown, Tariff};

/// Marginal-rate reporting points of the domestic report.
pub const REPORT_POINTS_KWH: [f64; 2] = [1200.0, 1665.0];

/// Breakdown under the domestic tariff; panics on invalid input.
pub fn breakdown(kwh: f64) -> BillBreakdown {
    Tariff::domestic()
        .breakdown(kwh)
        .unwrap_or_else(|e| panic!("{kwh} kWh should be billable: {e}"))
}

/// Domestic curve over the default grid (1..=2000 step 10).
pub fn domestic_curve() -> BillCurve {
    BillCurve::evaluate(&Tariff::domestic(), &SampleGrid::DOMESTIC)
        .unwrap_or_else(|e| panic!("default grid should evaluate: {e}"))
}

/// Domestic report over the default grid.
pub fn domestic_report() -> SweepReport {
    let tariff = Tariff::domestic();
    let curve = domestic_curve();
    let rates = marginal_rates(&tariff, &REPORT_POINTS_KWH)
        .unwrap_or_else(|e| panic!("report points should be valid: {e}"));
    SweepReport::from_curve(&tariff, &curve, rates)
        .unwrap_or_else(|e| panic!("thresholds should be billable: {e}"))
}
