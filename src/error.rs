//! Calculator error taxonomy.

use thiserror::Error;

/// Rejected inputs to the tariff calculator.
///
/// The calculator is total over finite, non-negative consumption. Anything
/// else is rejected rather than clamped.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum TariffError {
    #[error("consumption must be finite, got {0}")]
    NonFiniteConsumption(f64),

    #[error("consumption must be >= 0 kWh, got {0}")]
    NegativeConsumption(f64),

    #[error("finite-difference step must be finite and > 0, got {0}")]
    InvalidStep(f64),

    #[error(
        "sample grid spans {0} steps, limit is {max} samples",
        max = crate::sweep::MAX_SAMPLES
    )]
    GridTooLarge(f64),
}

pub type TariffResult<T> = Result<T, TariffError>;

/// Checks that `consumption_kwh` lies in the calculator's domain.
///
/// # Errors
///
/// Returns [`TariffError::NonFiniteConsumption`] for NaN or infinities and
/// [`TariffError::NegativeConsumption`] for values below zero.
pub fn check_consumption(consumption_kwh: f64) -> TariffResult<f64> {
    if !consumption_kwh.is_finite() {
        return Err(TariffError::NonFiniteConsumption(consumption_kwh));
    }
    if consumption_kwh < 0.0 {
        return Err(TariffError::NegativeConsumption(consumption_kwh));
    }
    Ok(consumption_kwh)
}
