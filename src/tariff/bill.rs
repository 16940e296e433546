//! Bill computation with a full per-charge breakdown.

use std::fmt;

use serde::Serialize;

use super::{Tariff, TierLevel};
use crate::error::{TariffResult, check_consumption};

/// Every intermediate charge of one bill (currency units).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BillBreakdown {
    /// Billed consumption (kWh).
    pub consumption_kwh: f64,
    /// Rate tier that applied.
    pub tier: TierLevel,
    pub energy: f64,
    pub capacity: f64,
    pub network: f64,
    /// Per-kWh fuel adjustment; zero unless above the service-tax threshold
    /// or in the high-usage tier.
    pub fuel_adjustment: f64,
    /// Flat retail charge; zero at or below the service-tax threshold.
    pub retail_charge: f64,
    /// Banded rebate (<= 0).
    pub incentive: f64,
    /// Sum of all charges before taxes.
    pub subtotal: f64,
    pub service_tax: f64,
    /// Levied on energy, capacity, network and incentive only.
    pub consumption_tax: f64,
    /// Amount payable.
    pub total: f64,
}

impl BillBreakdown {
    /// Effective unit cost (currency/kWh), undefined at zero consumption.
    pub fn unit_cost(&self) -> Option<f64> {
        (self.consumption_kwh > 0.0).then(|| self.total / self.consumption_kwh)
    }
}

impl Tariff {
    /// Computes the full bill breakdown for a consumption value.
    ///
    /// Threshold comparisons are strict (`>`), so a value sitting exactly on
    /// a threshold is billed on the lower, charge-free side.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::error::TariffError`] for negative or non-finite
    /// consumption.
    pub fn breakdown(&self, consumption_kwh: f64) -> TariffResult<BillBreakdown> {
        let c = check_consumption(consumption_kwh)?;

        let tier = self.schedule.tier_level(c);
        let rates = self.schedule.rates(tier);
        let above_service_tax = c > self.thresholds.service_tax_kwh;

        let energy = c * rates.energy;
        let capacity = c * rates.capacity;
        let network = c * rates.network;
        let fuel_adjustment = if above_service_tax || tier == TierLevel::HighUsage {
            c * self.charges.fuel_rate_per_kwh
        } else {
            0.0
        };
        let retail_charge = if above_service_tax {
            self.charges.retail_charge
        } else {
            0.0
        };
        let incentive = self.incentives.incentive(c);

        let subtotal = energy + capacity + network + fuel_adjustment + retail_charge + incentive;

        let service_tax = if above_service_tax {
            self.charges.service_tax_rate
                * (energy + capacity + network + fuel_adjustment + retail_charge + incentive)
        } else {
            0.0
        };

        // Fuel adjustment and retail charge are not part of this base.
        let consumption_tax = if c > self.thresholds.consumption_tax_kwh {
            self.charges.consumption_tax_rate * (energy + capacity + network + incentive)
        } else {
            0.0
        };

        Ok(BillBreakdown {
            consumption_kwh: c,
            tier,
            energy,
            capacity,
            network,
            fuel_adjustment,
            retail_charge,
            incentive,
            subtotal,
            service_tax,
            consumption_tax,
            total: subtotal + service_tax + consumption_tax,
        })
    }
}

impl fmt::Display for BillBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Bill @ {:.1} kWh ({}) ---", self.consumption_kwh, self.tier)?;
        writeln!(f, "Energy:            {:>10.2}", self.energy)?;
        writeln!(f, "Capacity:          {:>10.2}", self.capacity)?;
        writeln!(f, "Network:           {:>10.2}", self.network)?;
        writeln!(f, "Fuel adjustment:   {:>10.2}", self.fuel_adjustment)?;
        writeln!(f, "Retail charge:     {:>10.2}", self.retail_charge)?;
        writeln!(f, "Incentive:         {:>10.2}", self.incentive)?;
        writeln!(f, "Subtotal:          {:>10.2}", self.subtotal)?;
        writeln!(f, "Service tax:       {:>10.2}", self.service_tax)?;
        writeln!(f, "Consumption tax:   {:>10.2}", self.consumption_tax)?;
        write!(f, "Total:             {:>10.2}", self.total)
    }
}
