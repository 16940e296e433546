//! Rate tiers and consumption-dependent tier selection.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Per-kWh rates for the three charge categories of one tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RateTier {
    /// Energy charge (currency/kWh).
    pub energy: f64,
    /// Generation capacity charge (currency/kWh).
    pub capacity: f64,
    /// Network charge (currency/kWh).
    pub network: f64,
}

impl RateTier {
    /// Domestic standard tier, applied up to the high-usage threshold.
    pub const STANDARD: Self = Self {
        energy: 0.2703,
        capacity: 0.0455,
        network: 0.1285,
    };

    /// Domestic high-usage tier, applied above the high-usage threshold.
    pub const HIGH_USAGE: Self = Self {
        energy: 0.3703,
        capacity: 0.0455,
        network: 0.1285,
    };
}

/// Which rate tier applied to a bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierLevel {
    Standard,
    HighUsage,
}

impl fmt::Display for TierLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => f.write_str("standard"),
            Self::HighUsage => f.write_str("high_usage"),
        }
    }
}

/// Two-tier rate schedule split at a single consumption threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TariffSchedule {
    /// Rates at or below `high_usage_threshold_kwh`.
    pub standard: RateTier,
    /// Rates strictly above `high_usage_threshold_kwh`.
    pub high_usage: RateTier,
    /// Tier boundary (kWh, inclusive toward the standard tier).
    pub high_usage_threshold_kwh: f64,
}

impl TariffSchedule {
    /// Built-in domestic schedule (1500 kWh boundary).
    pub const DOMESTIC: Self = Self {
        standard: RateTier::STANDARD,
        high_usage: RateTier::HIGH_USAGE,
        high_usage_threshold_kwh: 1500.0,
    };

    /// Selects the tier for a consumption value.
    pub fn tier_level(&self, consumption_kwh: f64) -> TierLevel {
        if consumption_kwh <= self.high_usage_threshold_kwh {
            TierLevel::Standard
        } else {
            TierLevel::HighUsage
        }
    }

    /// Returns the rates for a tier level.
    pub fn rates(&self, level: TierLevel) -> &RateTier {
        match level {
            TierLevel::Standard => &self.standard,
            TierLevel::HighUsage => &self.high_usage,
        }
    }
}
