use crate::config::DashboardConfig;
use crate::core::dashboard::{Dashboard, DatasetSummary};
use crate::core::filter::Selection;
use crate::domain::model::{ChartPoint, DisplayRow};
use crate::render::chart::melt;
use crate::utils::error::{DashboardError, Result};
use axum::{
    extract::{RawQuery, State},
    response::Html,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

type AppState = Arc<Dashboard>;

#[derive(Debug, Serialize)]
pub struct RowsResponse {
    pub selection: Selection,
    pub rows: Vec<DisplayRow>,
}

#[derive(Debug, Serialize)]
pub struct ChartResponse {
    pub selection: Selection,
    pub points: Vec<ChartPoint>,
}

pub fn router(dashboard: Arc<Dashboard>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/rows", get(rows))
        .route("/api/chart", get(chart))
        .route("/api/meta", get(meta))
        .route("/healthz", get(healthz))
        .with_state(dashboard)
}

async fn index(State(dashboard): State<AppState>, RawQuery(query): RawQuery) -> Html<String> {
    Html(dashboard.render(query.as_deref()))
}

async fn rows(State(dashboard): State<AppState>, RawQuery(query): RawQuery) -> Json<RowsResponse> {
    let selection = dashboard.selection(query.as_deref());
    let view = dashboard.view(&selection);
    Json(RowsResponse {
        selection,
        rows: view.rows,
    })
}

async fn chart(State(dashboard): State<AppState>, RawQuery(query): RawQuery) -> Json<ChartResponse> {
    let selection = dashboard.selection(query.as_deref());
    let points = melt(&dashboard.view(&selection));
    Json(ChartResponse { selection, points })
}

async fn meta(State(dashboard): State<AppState>) -> Json<DatasetSummary> {
    Json(dashboard.summary())
}

async fn healthz(State(dashboard): State<AppState>) -> Json<Value> {
    Json(json!({ "status": "ok", "records": dashboard.dataset().len() }))
}

/// Bind to the configured address and serve until the process is stopped.
pub async fn serve(config: &DashboardConfig, dashboard: Dashboard) -> Result<()> {
    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|source| DashboardError::BindError {
            address: address.clone(),
            source,
        })?;
    serve_on(listener, dashboard).await
}

/// Serve on an already bound listener.
pub async fn serve_on(listener: tokio::net::TcpListener, dashboard: Dashboard) -> Result<()> {
    let local = listener.local_addr()?;
    tracing::info!("🌐 Dashboard listening on http://{}", local);

    axum::serve(listener, router(Arc::new(dashboard)))
        .await
        .map_err(|e| DashboardError::ServerError {
            message: e.to_string(),
        })
}
