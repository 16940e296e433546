//! Tiered domestic tariff: rate schedule, incentives, surcharges and taxes.
//!
//! A [`Tariff`] is immutable once built. Every calculation is a pure function
//! of one consumption value, so samples may be evaluated in any order.

pub mod bill;
pub mod gradient;
pub mod incentive;
pub mod schedule;

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

pub use bill::BillBreakdown;
pub use gradient::{MARGINAL_STEP_KWH, gradient_with_step};
pub use incentive::{IncentiveBand, IncentiveTable};
pub use schedule::{RateTier, TariffSchedule, TierLevel};

use crate::error::{TariffResult, check_consumption};

/// Consumption thresholds gating the surcharges and taxes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurchargeThresholds {
    /// Above this, fuel adjustment, retail charge and service tax apply (kWh).
    pub service_tax_kwh: f64,
    /// Above this, the consumption tax applies (kWh).
    pub consumption_tax_kwh: f64,
}

impl SurchargeThresholds {
    pub const DOMESTIC: Self = Self {
        service_tax_kwh: 600.0,
        consumption_tax_kwh: 300.0,
    };
}

/// Flat charges and tax rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Charges {
    /// Flat retail charge (currency).
    pub retail_charge: f64,
    /// Fuel adjustment (currency/kWh; negative is a rebate).
    pub fuel_rate_per_kwh: f64,
    /// Service tax as a fraction of the subtotal.
    pub service_tax_rate: f64,
    /// Consumption tax as a fraction of energy, capacity, network and incentive.
    pub consumption_tax_rate: f64,
}

impl Charges {
    pub const DOMESTIC: Self = Self {
        retail_charge: 10.0,
        fuel_rate_per_kwh: -0.0145,
        service_tax_rate: 0.08,
        consumption_tax_rate: 0.016,
    };
}

/// A complete tariff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tariff {
    pub schedule: TariffSchedule,
    pub thresholds: SurchargeThresholds,
    pub charges: Charges,
    pub incentives: IncentiveTable,
}

static DOMESTIC: LazyLock<Tariff> = LazyLock::new(Tariff::domestic);

impl Tariff {
    /// The built-in domestic tariff.
    pub fn domestic() -> Self {
        Self {
            schedule: TariffSchedule::DOMESTIC,
            thresholds: SurchargeThresholds::DOMESTIC,
            charges: Charges::DOMESTIC,
            incentives: IncentiveTable::domestic(),
        }
    }

    /// Total bill for a consumption value.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::error::TariffError`] for negative or non-finite
    /// consumption.
    pub fn bill(&self, consumption_kwh: f64) -> TariffResult<f64> {
        self.breakdown(consumption_kwh).map(|b| b.total)
    }

    /// Incentive amount for a consumption value.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::error::TariffError`] for negative or non-finite
    /// consumption.
    pub fn incentive(&self, consumption_kwh: f64) -> TariffResult<f64> {
        let kwh = check_consumption(consumption_kwh)?;
        Ok(self.incentives.incentive(kwh))
    }

    /// Marginal rate at `consumption_kwh` using a 1 kWh centered difference.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::error::TariffError`] when `consumption_kwh - 1` is
    /// outside the calculator's domain.
    pub fn marginal_rate(&self, consumption_kwh: f64) -> TariffResult<f64> {
        gradient_with_step(self, consumption_kwh, MARGINAL_STEP_KWH)
    }
}

impl Default for Tariff {
    fn default() -> Self {
        Self::domestic()
    }
}

/// Bill under the built-in domestic tariff.
///
/// # Errors
///
/// Returns a [`crate::error::TariffError`] for negative or non-finite consumption.
pub fn bill(consumption_kwh: f64) -> TariffResult<f64> {
    DOMESTIC.bill(consumption_kwh)
}

/// Incentive under the built-in domestic tariff.
///
/// # Errors
///
/// Returns a [`crate::error::TariffError`] for negative or non-finite consumption.
pub fn incentive(consumption_kwh: f64) -> TariffResult<f64> {
    DOMESTIC.incentive(consumption_kwh)
}

/// Marginal rate under the built-in domestic tariff.
///
/// # Errors
///
/// Returns a [`crate::error::TariffError`] when `consumption_kwh - 1` is
/// outside the calculator's domain.
pub fn gradient_at(consumption_kwh: f64) -> TariffResult<f64> {
    DOMESTIC.marginal_rate(consumption_kwh)
}
