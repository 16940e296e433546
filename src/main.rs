//! tariff-calc entry point: CLI wiring, config loading, sweep and report.

use std::process;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use tariff_calc::cli::Args;
use tariff_calc::config::TariffConfig;
use tariff_calc::io::export::export_csv;
use tariff_calc::reporting::SweepReport;
use tariff_calc::sweep::{BillCurve, marginal_rates};

/// Logs go to stderr so stdout carries only the report.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .compact()
        .init();
}

/// Loads config: `--tariff` takes priority, then `--preset`, then domestic.
fn load_config(args: &Args) -> Result<TariffConfig> {
    let cfg = if let Some(path) = &args.tariff {
        info!(path = %path.display(), "loading tariff");
        TariffConfig::from_toml_file(path)?
    } else {
        info!(preset = args.preset_name(), "using preset");
        TariffConfig::from_preset(args.preset_name())?
    };

    let errors = cfg.validate();
    if !errors.is_empty() {
        for e in &errors {
            error!("{e}");
        }
        bail!("tariff configuration has {} invalid field(s)", errors.len());
    }
    Ok(cfg)
}

fn run(args: &Args) -> Result<()> {
    let cfg = load_config(args)?;
    let tariff = cfg.tariff();
    let grid = cfg.grid();
    let samples = grid.sample_count().context("invalid sample grid")?;

    info!(
        samples,
        start_kwh = grid.start_kwh,
        end_kwh = grid.end_kwh,
        step_kwh = grid.step_kwh,
        "evaluating bill curve"
    );
    let curve = BillCurve::evaluate(&tariff, &grid).context("failed to evaluate bill curve")?;
    let rates = marginal_rates(&tariff, &cfg.report.marginal_points_kwh)
        .context("failed to estimate marginal rates")?;
    let report = SweepReport::from_curve(&tariff, &curve, rates)
        .context("failed to quote threshold bills")?;
    debug!(non_decreasing = report.non_decreasing, "sweep complete");

    if !args.quiet {
        for p in &curve.points {
            println!("{p}");
        }
        println!();
    }
    println!("{report}");

    for &kwh in &args.quotes {
        let b = tariff
            .breakdown(kwh)
            .with_context(|| format!("cannot quote {kwh} kWh"))?;
        println!("\n{b}");
    }

    if let Some(path) = &args.export_csv {
        export_csv(&curve.points, path)
            .with_context(|| format!("failed to write CSV to \"{}\"", path.display()))?;
        info!(path = %path.display(), rows = curve.len(), "curve exported");
    }

    #[cfg(feature = "tui")]
    if args.tui {
        tariff_calc::tui::run(curve.clone()).context("terminal chart failed")?;
    }

    #[cfg(feature = "api")]
    if args.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(tariff_calc::api::AppState {
            tariff,
            curve,
            report,
        });
        let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
        let rt = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;
        rt.block_on(tariff_calc::api::serve(state, addr))
            .context("API server failed")?;
    }

    Ok(())
}

fn main() {
    init_tracing();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        error!("{e:#}");
        process::exit(1);
    }
}
