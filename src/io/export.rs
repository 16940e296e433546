//! CSV export for evaluated bill curves.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sweep::CurvePoint;

/// Column header for CSV curve export.
pub const HEADER: &str = "consumption_kwh,tier,energy,capacity,network,fuel_adjustment,\
                          retail_charge,incentive,subtotal,service_tax,consumption_tax,\
                          bill,unit_cost";

/// Exports curve points to a CSV file at the given path.
///
/// Writes a header row followed by one data row per sample. Produces
/// deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(points: &[CurvePoint], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(points, buf)
}

/// Writes curve points as CSV to any writer.
///
/// Monetary columns use six decimals; `unit_cost` is empty where undefined.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(points: &[CurvePoint], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for p in points {
        let b = &p.breakdown;
        wtr.write_record(&[
            format!("{:.2}", p.consumption_kwh),
            b.tier.to_string(),
            format!("{:.6}", b.energy),
            format!("{:.6}", b.capacity),
            format!("{:.6}", b.network),
            format!("{:.6}", b.fuel_adjustment),
            format!("{:.6}", b.retail_charge),
            format!("{:.6}", b.incentive),
            format!("{:.6}", b.subtotal),
            format!("{:.6}", b.service_tax),
            format!("{:.6}", b.consumption_tax),
            format!("{:.6}", b.total),
            p.unit_cost.map(|u| format!("{u:.6}")).unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
