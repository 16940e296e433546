//! Post-hoc summary of an evaluated bill curve.

use std::fmt;

use serde::Serialize;

use crate::error::TariffResult;
use crate::sweep::{BillCurve, MarginalRate};
use crate::tariff::Tariff;

/// Bill at one of the tariff's thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThresholdBill {
    pub consumption_kwh: f64,
    pub bill: f64,
}

/// Aggregate figures derived from a complete sweep.
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub sample_count: usize,
    /// Lowest and highest bill on the grid (currency).
    pub bill_range: Option<(f64, f64)>,
    /// Lowest and highest effective unit cost (currency/kWh).
    pub unit_cost_range: Option<(f64, f64)>,
    /// Bills at the consumption-tax, service-tax and high-usage thresholds,
    /// ordered by consumption.
    pub threshold_bills: Vec<ThresholdBill>,
    /// Whether the bill never decreases along the grid.
    pub non_decreasing: bool,
    /// Marginal rates at the reporting points.
    pub marginal_rates: Vec<MarginalRate>,
}

impl SweepReport {
    /// Computes the report from a curve and precomputed marginal rates.
    ///
    /// Threshold bills are quoted directly from `tariff`, so they do not
    /// depend on the thresholds falling on the sample grid.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::error::TariffError`] if a threshold is outside the
    /// calculator's domain.
    pub fn from_curve(
        tariff: &Tariff,
        curve: &BillCurve,
        marginal_rates: Vec<MarginalRate>,
    ) -> TariffResult<Self> {
        let bills = curve.bills();
        let unit_costs: Vec<f64> = curve.unit_costs().into_iter().map(|(_, u)| u).collect();

        Ok(Self {
            sample_count: curve.len(),
            bill_range: min_max(&bills),
            unit_cost_range: min_max(&unit_costs),
            threshold_bills: threshold_bills(tariff)?,
            non_decreasing: curve.is_non_decreasing(),
            marginal_rates,
        })
    }
}

fn threshold_bills(tariff: &Tariff) -> TariffResult<Vec<ThresholdBill>> {
    let mut thresholds = [
        tariff.thresholds.consumption_tax_kwh,
        tariff.thresholds.service_tax_kwh,
        tariff.schedule.high_usage_threshold_kwh,
    ];
    thresholds.sort_by(f64::total_cmp);

    thresholds
        .into_iter()
        .map(|kwh| {
            Ok(ThresholdBill {
                consumption_kwh: kwh,
                bill: tariff.bill(kwh)?,
            })
        })
        .collect()
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

impl fmt::Display for SweepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Sweep Report ---")?;
        writeln!(f, "Samples:               {}", self.sample_count)?;
        if let Some((lo, hi)) = self.bill_range {
            writeln!(f, "Bill range:            {lo:.2} .. {hi:.2}")?;
        }
        if let Some((lo, hi)) = self.unit_cost_range {
            writeln!(f, "Effective unit cost:   {lo:.4} .. {hi:.4} /kWh")?;
        }
        for t in &self.threshold_bills {
            writeln!(f, "Bill @ {:>6.0} kWh:      {:.2}", t.consumption_kwh, t.bill)?;
        }
        write!(f, "Bill non-decreasing:   {}", self.non_decreasing)?;
        for m in &self.marginal_rates {
            write!(
                f,
                "\nMarginal rate @ {:>6.0} kWh: {:.4} /kWh",
                m.consumption_kwh, m.rate
            )?;
        }
        Ok(())
    }
}
