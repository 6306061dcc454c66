//! Browser dashboard served over HTTP.
//!
//! `GET /` recomposes the view on every request; the caches keep that to at
//! most one upstream call per key per TTL.

pub mod page;

use crate::api::FetchError;
use crate::dashboard::{Dashboard, DashboardView};
use crate::data::{HistoricalSeries, LivePrices};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

const DEFAULT_HISTORY_DAYS: u32 = 7;

pub struct AppState {
    pub dashboard: Dashboard,
}

impl AppState {
    pub fn new(dashboard: Dashboard) -> Self {
        Self { dashboard }
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    days: Option<u32>,
}

/// JSON error body for the data endpoints.
pub struct ApiError(FetchError);

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            FetchError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            FetchError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::BAD_GATEWAY,
        };
        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/dashboard", get(dashboard_json))
        .route("/api/prices", get(live_prices))
        .route("/api/history/{asset_id}", get(history))
        .with_state(state)
}

async fn index_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let view = state.dashboard.render().await;
    Html(page::render_page(&view, state.dashboard.config().refresh_secs))
}

async fn dashboard_json(State(state): State<Arc<AppState>>) -> Json<DashboardView> {
    Json(state.dashboard.render().await)
}

async fn live_prices(State(state): State<Arc<AppState>>) -> Result<Json<Arc<LivePrices>>, ApiError> {
    let prices = state
        .dashboard
        .market()
        .live_prices()
        .await
        .inspect_err(|e| warn!("Live price request failed: {}", e))?;
    Ok(Json(prices))
}

async fn history(
    State(state): State<Arc<AppState>>,
    Path(asset_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Arc<HistoricalSeries>>, ApiError> {
    let days = query.days.unwrap_or(DEFAULT_HISTORY_DAYS);
    let series = state
        .dashboard
        .market()
        .history(&asset_id, days)
        .await
        .inspect_err(|e| warn!("History request for {} failed: {}", asset_id, e))?;
    Ok(Json(series))
}

async fn health() -> &'static str {
    "ok"
}
