//! Consumption sample grids and evaluated bill curves.

use std::fmt;

use serde::Serialize;

use crate::error::{TariffError, TariffResult};
use crate::tariff::{BillBreakdown, Tariff, TierLevel};

/// Largest number of samples a grid may produce.
pub const MAX_SAMPLES: usize = 1_000_000;

/// Slack on the sample index so an end point that rounding puts a hair past
/// `end_kwh` (0.3 / 0.1 = 2.9999999999999996) still counts.
const INDEX_TOLERANCE: f64 = 1e-9;

/// Evenly spaced consumption samples from `start_kwh` up to and including
/// `end_kwh`.
///
/// # Examples
///
/// ```
/// use tariff_calc::sweep::SampleGrid;
///
/// let grid = SampleGrid::new(1.0, 2000.0, 10.0);
/// assert_eq!(grid.sample_count(), Ok(200));
/// assert_eq!(grid.samples().ok().and_then(Iterator::last), Some(1991.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampleGrid {
    /// First sample (kWh).
    pub start_kwh: f64,
    /// Inclusive upper limit (kWh).
    pub end_kwh: f64,
    /// Spacing between samples (kWh, > 0).
    pub step_kwh: f64,
}

impl SampleGrid {
    /// Default sweep: 1 to 2000 kWh in steps of 10.
    pub const DOMESTIC: Self = Self {
        start_kwh: 1.0,
        end_kwh: 2000.0,
        step_kwh: 10.0,
    };

    /// Creates a sample grid.
    ///
    /// # Panics
    ///
    /// Panics if `step_kwh` is not positive.
    pub fn new(start_kwh: f64, end_kwh: f64, step_kwh: f64) -> Self {
        assert!(step_kwh > 0.0, "step_kwh must be > 0");
        Self {
            start_kwh,
            end_kwh,
            step_kwh,
        }
    }

    /// Number of samples in the grid; zero when `end_kwh < start_kwh` or the
    /// step is not positive.
    ///
    /// # Errors
    ///
    /// Returns [`TariffError::GridTooLarge`] when the grid would exceed
    /// [`MAX_SAMPLES`] or its span is not finite.
    pub fn sample_count(&self) -> TariffResult<usize> {
        if self.end_kwh < self.start_kwh || self.step_kwh <= 0.0 {
            return Ok(0);
        }
        let span = (self.end_kwh - self.start_kwh) / self.step_kwh + INDEX_TOLERANCE;
        if span.is_nan() || span >= MAX_SAMPLES as f64 {
            return Err(TariffError::GridTooLarge(span));
        }
        // 0 <= span < MAX_SAMPLES, so the cast is exact
        Ok(span.floor() as usize + 1)
    }

    /// Samples computed from an integer index so spacing never drifts.
    ///
    /// # Errors
    ///
    /// Same as [`SampleGrid::sample_count`].
    pub fn samples(&self) -> TariffResult<impl Iterator<Item = f64> + '_> {
        let count = self.sample_count()?;
        Ok((0..count).map(|i| self.start_kwh + i as f64 * self.step_kwh))
    }
}

impl Default for SampleGrid {
    fn default() -> Self {
        Self::DOMESTIC
    }
}

/// One evaluated sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    pub consumption_kwh: f64,
    pub breakdown: BillBreakdown,
    /// Bill divided by consumption; `None` at zero consumption.
    pub unit_cost: Option<f64>,
}

impl CurvePoint {
    pub fn bill(&self) -> f64 {
        self.breakdown.total
    }
}

impl fmt::Display for CurvePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tier = match self.breakdown.tier {
            TierLevel::Standard => "T1",
            TierLevel::HighUsage => "T2",
        };
        write!(
            f,
            "kwh={:>7.1} {tier} | bill={:>9.2}  unit={}  | inc={:>8.2}  fuel={:>7.2}  \
             st={:>6.2}  ct={:>5.2}",
            self.consumption_kwh,
            self.bill(),
            self.unit_cost
                .map_or_else(|| "     n/a".to_string(), |u| format!("{u:>8.4}")),
            self.breakdown.incentive,
            self.breakdown.fuel_adjustment,
            self.breakdown.service_tax,
            self.breakdown.consumption_tax,
        )
    }
}

/// Marginal rate at one reporting point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarginalRate {
    pub consumption_kwh: f64,
    /// Estimated currency per additional kWh.
    pub rate: f64,
}

/// Bill curve over a sample grid, with the thresholds drawn as reference lines.
#[derive(Debug, Clone, Serialize)]
pub struct BillCurve {
    pub points: Vec<CurvePoint>,
    /// Service-tax threshold (kWh).
    pub service_tax_threshold_kwh: f64,
    /// High-usage tier threshold (kWh).
    pub high_usage_threshold_kwh: f64,
}

impl BillCurve {
    /// Evaluates the tariff at every sample of the grid.
    ///
    /// # Errors
    ///
    /// Returns a [`TariffError`] if the grid is too large or any sample is
    /// outside the calculator's domain.
    pub fn evaluate(tariff: &Tariff, grid: &SampleGrid) -> TariffResult<Self> {
        let points = grid
            .samples()?
            .map(|kwh| {
                let breakdown = tariff.breakdown(kwh)?;
                Ok(CurvePoint {
                    consumption_kwh: kwh,
                    unit_cost: breakdown.unit_cost(),
                    breakdown,
                })
            })
            .collect::<TariffResult<Vec<_>>>()?;

        Ok(Self {
            points,
            service_tax_threshold_kwh: tariff.thresholds.service_tax_kwh,
            high_usage_threshold_kwh: tariff.schedule.high_usage_threshold_kwh,
        })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn consumptions(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.consumption_kwh).collect()
    }

    pub fn bills(&self) -> Vec<f64> {
        self.points.iter().map(CurvePoint::bill).collect()
    }

    /// Effective unit costs; samples at zero consumption are skipped.
    pub fn unit_costs(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .filter_map(|p| p.unit_cost.map(|u| (p.consumption_kwh, u)))
            .collect()
    }

    /// Points with `from_kwh <= consumption <= to_kwh`.
    pub fn range(&self, from_kwh: f64, to_kwh: f64) -> impl Iterator<Item = &CurvePoint> {
        self.points
            .iter()
            .filter(move |p| p.consumption_kwh >= from_kwh && p.consumption_kwh <= to_kwh)
    }

    /// Whether bills never decrease from one sample to the next.
    pub fn is_non_decreasing(&self) -> bool {
        self.points.windows(2).all(|w| w[1].bill() >= w[0].bill())
    }
}

/// Marginal rates at each requested point.
///
/// # Errors
///
/// Returns a [`TariffError`] if a point is closer than 1 kWh
/// to zero or is not finite.
pub fn marginal_rates(tariff: &Tariff, points_kwh: &[f64]) -> TariffResult<Vec<MarginalRate>> {
    points_kwh
        .iter()
        .map(|&kwh| {
            Ok(MarginalRate {
                consumption_kwh: kwh,
                rate: tariff.marginal_rate(kwh)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_matches_arange() {
        let grid = SampleGrid::DOMESTIC;
        let samples: Vec<f64> = grid.samples().expect("small grid").collect();
        assert_eq!(samples.len(), 200);
        assert_eq!(samples[0], 1.0);
        assert_eq!(samples[1], 11.0);
        assert_eq!(samples[199], 1991.0);
    }

    #[test]
    fn grid_includes_end_when_aligned() {
        let grid = SampleGrid::new(0.0, 100.0, 25.0);
        let samples: Vec<f64> = grid.samples().expect("small grid").collect();
        assert_eq!(samples, vec![0.0, 25.0, 50.0, 75.0, 100.0]);
    }

    #[test]
    fn grid_keeps_end_lost_to_rounding() {
        let grid = SampleGrid::new(0.0, 0.3, 0.1);
        assert_eq!(grid.sample_count(), Ok(4));
        let samples: Vec<f64> = grid.samples().expect("small grid").collect();
        assert_eq!(samples.len(), 4);
        assert!((samples[3] - 0.3).abs() < 1e-12);
    }

    #[test]
    fn unaligned_end_is_not_rounded_up() {
        let grid = SampleGrid::new(0.0, 0.35, 0.1);
        assert_eq!(grid.sample_count(), Ok(4));
    }

    #[test]
    fn inverted_grid_is_empty() {
        let grid = SampleGrid::new(10.0, 5.0, 1.0);
        assert_eq!(grid.sample_count(), Ok(0));
        assert_eq!(grid.samples().map(Iterator::count), Ok(0));
    }

    #[test]
    fn oversized_grid_is_rejected() {
        let huge = SampleGrid::new(0.0, 1e20, 1.0);
        assert!(matches!(huge.sample_count(), Err(TariffError::GridTooLarge(_))));
        assert!(BillCurve::evaluate(&Tariff::domestic(), &huge).is_err());

        let dense = SampleGrid::new(0.0, 1e9, 1e-3);
        assert!(dense.sample_count().is_err());

        let unbounded = SampleGrid::new(0.0, f64::INFINITY, 1.0);
        assert!(unbounded.sample_count().is_err());
    }

    #[test]
    fn grid_at_limit_is_accepted() {
        let grid = SampleGrid::new(0.0, (MAX_SAMPLES - 1) as f64, 1.0);
        assert_eq!(grid.sample_count(), Ok(MAX_SAMPLES));
        let over = SampleGrid::new(0.0, MAX_SAMPLES as f64, 1.0);
        assert!(over.sample_count().is_err());
    }

    #[test]
    #[should_panic]
    fn zero_step_panics() {
        SampleGrid::new(0.0, 10.0, 0.0);
    }

    #[test]
    fn curve_records_thresholds() {
        let curve = BillCurve::evaluate(&Tariff::domestic(), &SampleGrid::DOMESTIC)
            .expect("grid in domain");
        assert_eq!(curve.len(), 200);
        assert_eq!(curve.service_tax_threshold_kwh, 600.0);
        assert_eq!(curve.high_usage_threshold_kwh, 1500.0);
    }

    #[test]
    fn zero_sample_has_no_unit_cost() {
        let curve = BillCurve::evaluate(&Tariff::domestic(), &SampleGrid::new(0.0, 20.0, 10.0))
            .expect("grid in domain");
        assert_eq!(curve.points[0].unit_cost, None);
        assert_eq!(curve.unit_costs().len(), 2);
    }

    #[test]
    fn negative_grid_is_rejected() {
        let result = BillCurve::evaluate(&Tariff::domestic(), &SampleGrid::new(-10.0, 10.0, 5.0));
        assert!(result.is_err());
    }

    #[test]
    fn range_is_inclusive() {
        let curve = BillCurve::evaluate(&Tariff::domestic(), &SampleGrid::DOMESTIC)
            .expect("grid in domain");
        let picked: Vec<f64> = curve.range(11.0, 41.0).map(|p| p.consumption_kwh).collect();
        assert_eq!(picked, vec![11.0, 21.0, 31.0, 41.0]);
    }

    #[test]
    fn marginal_rates_follow_points() {
        let rates = marginal_rates(&Tariff::domestic(), &[1200.0, 1665.0]).expect("in domain");
        assert_eq!(rates.len(), 2);
        assert_eq!(rates[1].consumption_kwh, 1665.0);
        assert!(rates.iter().all(|r| r.rate.is_finite()));
    }

    #[test]
    fn curve_point_display_does_not_panic() {
        let curve = BillCurve::evaluate(&Tariff::domestic(), &SampleGrid::new(0.0, 10.0, 10.0))
            .expect("grid in domain");
        for p in &curve.points {
            assert!(!format!("{p}").is_empty());
        }
    }
}
