//! Integration tests for the REST API feature.

#![cfg(feature = "api")]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;

use tariff_calc::api::{AppState, router};
use tariff_calc::config::TariffConfig;
use tariff_calc::reporting::SweepReport;
use tariff_calc::sweep::{BillCurve, marginal_rates};

/// Build the domestic sweep and return the API state.
fn build_api_state() -> Arc<AppState> {
    let cfg = TariffConfig::domestic();
    let tariff = cfg.tariff();
    let curve = BillCurve::evaluate(&tariff, &cfg.grid()).expect("grid in domain");
    let rates =
        marginal_rates(&tariff, &cfg.report.marginal_points_kwh).expect("points in domain");
    let report = SweepReport::from_curve(&tariff, &curve, rates).expect("thresholds in domain");

    Arc::new(AppState {
        tariff,
        curve,
        report,
    })
}

async fn get(uri: &str) -> (StatusCode, serde_json::Value) {
    let app = router(build_api_state());
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (
        status,
        serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null),
    )
}

#[tokio::test]
async fn tariff_exposes_incentive_table_and_report() {
    let (status, json) = get("/tariff").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["tariff"]["incentives"].as_array().map(Vec::len), Some(17));
    assert_eq!(json["report"]["sample_count"], 200);
    assert_eq!(
        json["report"]["marginal_rates"].as_array().map(Vec::len),
        Some(2)
    );
    assert_eq!(json["report"]["threshold_bills"][2]["consumption_kwh"], 1500.0);
    assert_eq!(json["report"]["threshold_bills"][2]["bill"], 717.7392);
}

#[tokio::test]
async fn bill_at_threshold_is_charge_free() {
    let (status, json) = get("/bill?kwh=600").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["retail_charge"], 0.0);
    assert_eq!(json["service_tax"], 0.0);

    let (_, above) = get("/bill?kwh=601").await;
    assert_eq!(above["retail_charge"], 10.0);
}

#[tokio::test]
async fn bill_missing_kwh_is_rejected() {
    let (status, _) = get("/bill").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn curve_full_and_filtered() {
    let (status, json) = get("/curve").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().map(Vec::len), Some(200));

    let (status, json) = get("/curve?from=1491&to=1511").await;
    assert_eq!(status, StatusCode::OK);
    let rows = json.as_array().cloned().unwrap_or_default();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["tier"], "standard");
    assert_eq!(rows[2]["tier"], "high_usage");
}

#[tokio::test]
async fn unknown_route_is_404() {
    let (status, _) = get("/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
