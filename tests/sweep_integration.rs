//! Integration tests for the default consumption sweep.

mod common;

use approx::assert_relative_eq;
use tariff_calc::config::TariffConfig;
use tariff_calc::io::export::write_csv;
use tariff_calc::sweep::{BillCurve, SampleGrid};
use tariff_calc::tariff::Tariff;

#[test]
fn default_sweep_has_200_samples() {
    let curve = common::domestic_curve();
    assert_eq!(curve.len(), 200);
    assert_eq!(curve.consumptions().first(), Some(&1.0));
    assert_eq!(curve.consumptions().last(), Some(&1991.0));
}

#[test]
fn bill_is_non_decreasing_over_default_grid() {
    let bills = common::domestic_curve().bills();
    for (i, w) in bills.windows(2).enumerate() {
        assert!(
            w[1] >= w[0],
            "bill decreased between samples {i} and {}: {} -> {}",
            i + 1,
            w[0],
            w[1]
        );
    }
}

#[test]
fn unit_cost_is_bill_over_consumption() {
    let curve = common::domestic_curve();
    for (kwh, unit) in curve.unit_costs() {
        let point = curve
            .points
            .iter()
            .find(|p| p.consumption_kwh == kwh)
            .expect("unit cost sample exists");
        assert!((unit - point.bill() / kwh).abs() < 1e-12);
    }
}

#[test]
fn determinism_two_sweeps_are_identical() {
    let a = common::domestic_curve();
    let b = common::domestic_curve();
    assert_eq!(a.points, b.points);
}

#[test]
fn samples_are_order_independent() {
    let tariff = Tariff::domestic();
    let curve = common::domestic_curve();
    for p in curve.points.iter().rev() {
        assert_eq!(tariff.bill(p.consumption_kwh), Ok(p.bill()));
    }
}

#[test]
fn report_lists_configured_marginal_points() {
    let report = common::domestic_report();
    assert_eq!(report.sample_count, 200);
    assert!(report.non_decreasing);
    let points: Vec<f64> = report
        .marginal_rates
        .iter()
        .map(|m| m.consumption_kwh)
        .collect();
    assert_eq!(points, common::REPORT_POINTS_KWH.to_vec());
}

#[test]
fn report_quotes_bill_at_each_threshold() {
    let report = common::domestic_report();
    let at = |kwh: f64| {
        report
            .threshold_bills
            .iter()
            .find(|t| t.consumption_kwh == kwh)
            .map(|t| t.bill)
    };
    assert_relative_eq!(at(600.0).unwrap_or(f64::NAN), 215.98128, max_relative = 1e-12);
    assert_relative_eq!(at(1500.0).unwrap_or(f64::NAN), 717.7392, max_relative = 1e-12);
    assert!(report.to_string().contains("Bill @    600 kWh"));
}

#[test]
fn oversized_config_sweep_is_rejected_before_evaluation() {
    let cfg = TariffConfig::from_toml_str(
        r#"
[sweep]
start_kwh = 0.0
end_kwh = 1e20
step_kwh = 1.0
"#,
    )
    .expect("TOML should parse");
    assert!(!cfg.validate().is_empty());
    assert!(BillCurve::evaluate(&cfg.tariff(), &cfg.grid()).is_err());
}

#[test]
fn csv_export_is_deterministic() {
    let curve = common::domestic_curve();
    let mut out_a = Vec::new();
    let mut out_b = Vec::new();
    write_csv(&curve.points, &mut out_a).expect("first export should succeed");
    write_csv(&curve.points, &mut out_b).expect("second export should succeed");
    assert_eq!(out_a, out_b);
    assert_eq!(String::from_utf8_lossy(&out_a).lines().count(), 201);
}

#[test]
fn config_sweep_drives_the_grid() {
    let cfg = TariffConfig::from_toml_str(
        r#"
[sweep]
start_kwh = 0.0
end_kwh = 1000.0
step_kwh = 250.0
"#,
    )
    .expect("TOML should parse");
    assert!(cfg.validate().is_empty());

    let curve = BillCurve::evaluate(&cfg.tariff(), &cfg.grid()).expect("grid in domain");
    assert_eq!(curve.consumptions(), vec![0.0, 250.0, 500.0, 750.0, 1000.0]);
    assert_eq!(curve.points[0].unit_cost, None);
}

#[test]
fn custom_tariff_changes_bills() {
    let mut cfg = TariffConfig::domestic();
    cfg.charges.retail_charge = 0.0;
    let custom = cfg.tariff();
    let domestic = Tariff::domestic();

    let grid = SampleGrid::new(601.0, 601.0, 1.0);
    let a = BillCurve::evaluate(&domestic, &grid).expect("grid in domain");
    let b = BillCurve::evaluate(&custom, &grid).expect("grid in domain");
    assert!(b.bills()[0] < a.bills()[0]);
}
