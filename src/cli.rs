//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Tiered domestic electricity bill calculator.
///
/// Sweeps the bill over a consumption range, prints every sample followed by
/// a summary with marginal rates. If neither `--tariff` nor `--preset` is
/// given, the `domestic` preset is used.
#[derive(Debug, Parser)]
#[command(name = "tariff-calc", version, about)]
pub struct Args {
    /// Load the tariff from a TOML config file.
    #[arg(long, value_name = "PATH", conflicts_with = "preset")]
    pub tariff: Option<PathBuf>,

    /// Use a built-in preset (domestic).
    #[arg(long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Print a full bill breakdown for this consumption (kWh); repeatable.
    #[arg(long = "kwh", value_name = "KWH", allow_negative_numbers = true)]
    pub quotes: Vec<f64>,

    /// Export the evaluated curve to CSV.
    #[arg(long, value_name = "PATH")]
    pub export_csv: Option<PathBuf>,

    /// Skip the per-sample listing and print only the report.
    #[arg(long, short)]
    pub quiet: bool,

    /// Open the terminal chart after the report.
    #[cfg(feature = "tui")]
    #[arg(long)]
    pub tui: bool,

    /// Start the REST API server after the report.
    #[cfg(feature = "api")]
    #[arg(long)]
    pub serve: bool,

    /// API server port.
    #[cfg(feature = "api")]
    #[arg(long, default_value_t = 3000)]
    pub port: u16,
}

impl Args {
    /// Preset to load when no tariff file is given.
    pub fn preset_name(&self) -> &str {
        self.preset.as_deref().unwrap_or("domestic")
    }
}
