//! Tiered domestic electricity tariff calculator.
//!
//! Computes a bill as a pure function of monthly consumption, sweeps it over
//! a consumption range, and reports effective unit cost and marginal rates.

#[cfg(feature = "api")]
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod reporting;
pub mod sweep;
pub mod tariff;
#[cfg(feature = "tui")]
pub mod tui;

pub use error::{TariffError, TariffResult};
pub use tariff::{Tariff, bill, gradient_at, incentive};
