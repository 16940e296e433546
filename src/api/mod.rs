//! REST API over the tariff calculator.
//!
//! Provides four GET endpoints:
//! - `/tariff`: tariff parameters and sweep summary
//! - `/bill?kwh=X`: full bill breakdown
//! - `/marginal?kwh=X`: marginal rate
//! - `/curve`: evaluated curve with optional range filtering

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

use crate::reporting::SweepReport;
use crate::sweep::BillCurve;
use crate::tariff::Tariff;

/// Immutable application state shared across all request handlers.
///
/// Constructed once after the sweep completes and wrapped in `Arc`; no
/// locks are needed since all data is read-only.
pub struct AppState {
    /// Tariff used for quotes.
    pub tariff: Tariff,
    /// Precomputed curve.
    pub curve: BillCurve,
    /// Summary of the curve.
    pub report: SweepReport,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/tariff", get(handlers::get_tariff))
        .route("/bill", get(handlers::get_bill))
        .route("/marginal", get(handlers::get_marginal))
        .route("/curve", get(handlers::get_curve))
        .with_state(state)
}

/// Binds to the given address and serves the API until the process exits.
///
/// # Errors
///
/// Returns an `io::Error` if binding or serving fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
