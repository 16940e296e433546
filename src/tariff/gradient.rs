//! Marginal rate estimation by centered finite difference.

use super::Tariff;
use crate::error::{TariffError, TariffResult, check_consumption};

/// Default finite-difference step (kWh).
pub const MARGINAL_STEP_KWH: f64 = 1.0;

/// Estimates the local slope of the bill at `consumption_kwh`:
/// `(bill(x + h) - bill(x - h)) / (2h)`.
///
/// Near a threshold the estimate straddles the discontinuity and includes
/// the step charge spread over `2h`.
///
/// # Errors
///
/// Returns [`TariffError::InvalidStep`] if `step_kwh` is not a positive finite
/// number, or a consumption error if `consumption_kwh - step_kwh` is negative
/// or either end is non-finite.
pub fn gradient_with_step(tariff: &Tariff, consumption_kwh: f64, step_kwh: f64) -> TariffResult<f64> {
    if !step_kwh.is_finite() || step_kwh <= 0.0 {
        return Err(TariffError::InvalidStep(step_kwh));
    }
    let x = check_consumption(consumption_kwh)?;
    let upper = tariff.bill(x + step_kwh)?;
    let lower = tariff.bill(x - step_kwh)?;
    Ok((upper - lower) / (2.0 * step_kwh))
}
