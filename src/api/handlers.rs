//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use tracing::debug;

use super::AppState;
use super::types::{ConsumptionQuery, CurveQuery, CurveRecord, ErrorResponse, TariffResponse};
use crate::sweep::MarginalRate;
use crate::tariff::BillBreakdown;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(error: impl ToString) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
}

/// Returns the tariff in effect and the sweep summary.
///
/// `GET /tariff` → 200 + `TariffResponse` JSON
pub async fn get_tariff(State(state): State<Arc<AppState>>) -> Json<TariffResponse> {
    Json(TariffResponse {
        tariff: state.tariff.clone(),
        report: state.report.clone(),
    })
}

/// Returns the full bill breakdown for one consumption value.
///
/// `GET /bill?kwh=X` → 200 + `BillBreakdown` JSON
/// `GET /bill?kwh=-1` → 400 + `ErrorResponse`
pub async fn get_bill(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConsumptionQuery>,
) -> Result<Json<BillBreakdown>, ApiError> {
    debug!(kwh = query.kwh, "bill quote");
    state.tariff.breakdown(query.kwh).map(Json).map_err(bad_request)
}

/// Returns the marginal rate (1 kWh centered difference) at one point.
///
/// `GET /marginal?kwh=X` → 200 + `MarginalRate` JSON
/// `GET /marginal?kwh=0.5` → 400 + `ErrorResponse`
pub async fn get_marginal(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConsumptionQuery>,
) -> Result<Json<MarginalRate>, ApiError> {
    let rate = state.tariff.marginal_rate(query.kwh).map_err(bad_request)?;
    Ok(Json(MarginalRate {
        consumption_kwh: query.kwh,
        rate,
    }))
}

/// Returns curve samples, optionally filtered by consumption range.
///
/// `GET /curve` → 200 + `Vec<CurveRecord>` JSON
/// `GET /curve?from=A&to=B` → filtered range (inclusive)
/// `GET /curve?from=900&to=100` → 400 + `ErrorResponse`
pub async fn get_curve(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CurveQuery>,
) -> Result<Json<Vec<CurveRecord>>, ApiError> {
    let from = query.from.unwrap_or(f64::NEG_INFINITY);
    let to = query.to.unwrap_or(f64::INFINITY);

    if from.is_nan() || to.is_nan() {
        return Err(bad_request("`from` and `to` must be numbers"));
    }
    if from > to {
        return Err(bad_request(format!("`from` ({from}) must be <= `to` ({to})")));
    }

    let records = state.curve.range(from, to).map(CurveRecord::from).collect();
    Ok(Json(records))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;
    use crate::reporting::SweepReport;
    use crate::sweep::{BillCurve, SampleGrid, marginal_rates};
    use crate::tariff::Tariff;

    fn make_test_state() -> Arc<AppState> {
        let tariff = Tariff::domestic();
        let curve = BillCurve::evaluate(&tariff, &SampleGrid::new(0.0, 2000.0, 100.0))
            .expect("grid in domain");
        let rates = marginal_rates(&tariff, &[1200.0, 1665.0]).expect("points in domain");
        let report = SweepReport::from_curve(&tariff, &curve, rates).expect("thresholds in domain");
        Arc::new(AppState {
            tariff,
            curve,
            report,
        })
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let app = router(make_test_state());
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn tariff_returns_200() {
        let (status, json) = get_json("/tariff").await;
        assert_eq!(status, StatusCode::OK);
        assert!(json.get("tariff").is_some());
        assert!(json.get("report").is_some());
        assert_eq!(json["report"]["sample_count"], 21);
    }

    #[tokio::test]
    async fn bill_returns_breakdown() {
        let (status, json) = get_json("/bill?kwh=200").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["incentive"], -50.0);
        assert_eq!(json["tier"], "standard");
    }

    #[tokio::test]
    async fn bill_rejects_negative_consumption() {
        let (status, json) = get_json("/bill?kwh=-1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json.get("error").is_some());
    }

    #[tokio::test]
    async fn marginal_returns_rate() {
        let (status, json) = get_json("/marginal?kwh=1665").await;
        assert_eq!(status, StatusCode::OK);
        let rate = json["rate"].as_f64().unwrap_or(f64::NAN);
        assert!((rate - 0.580_892_8).abs() < 1e-9);
    }

    #[tokio::test]
    async fn marginal_rejects_point_below_step() {
        let (status, _) = get_json("/marginal?kwh=0.5").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn curve_returns_all_samples() {
        let (status, json) = get_json("/curve").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().map(Vec::len), Some(21));
        assert!(json[0]["unit_cost"].is_null());
    }

    #[tokio::test]
    async fn curve_range_query() {
        let (status, json) = get_json("/curve?from=500&to=800").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().map(Vec::len), Some(4)); // 500, 600, 700, 800
        assert_eq!(json[0]["consumption_kwh"], 500.0);
        assert_eq!(json[3]["consumption_kwh"], 800.0);
    }

    #[tokio::test]
    async fn curve_invalid_range_returns_400() {
        let (status, json) = get_json("/curve?from=900&to=100").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json.get("error").is_some());
    }
}
