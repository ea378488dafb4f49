use crate::infra::AppState;
use arc_parks::catalog::{AreaFilter, ParkProfile, RegionSummary};
use arc_parks::error::AppError;
use arc_parks::registry::CompanyRegistry;
use arc_parks::report::{
    area_csv_string, document_file_name, render_park_document, AreaReport, ParkIntelService,
    ParkReport,
};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

type SharedService<R> = Arc<ParkIntelService<R>>;

#[derive(Debug, Serialize)]
pub(crate) struct ParkListResponse {
    pub(crate) scope: String,
    pub(crate) total: usize,
    pub(crate) parks: Vec<ParkProfile>,
}

pub(crate) fn park_routes<R>(service: SharedService<R>) -> Router
where
    R: CompanyRegistry + 'static,
{
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/regions", get(regions_endpoint::<R>))
        .route("/api/v1/parks", get(parks_endpoint::<R>))
        .route("/api/v1/parks/:park_id/report", get(park_report_endpoint::<R>))
        .route(
            "/api/v1/parks/:park_id/report/document",
            get(park_document_endpoint::<R>),
        )
        .route("/api/v1/areas/report", post(area_report_endpoint::<R>))
        .route(
            "/api/v1/areas/report/export",
            get(area_export_endpoint::<R>),
        )
        .with_state(service)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

async fn regions_endpoint<R: CompanyRegistry + 'static>(
    State(service): State<SharedService<R>>,
) -> Json<Vec<RegionSummary>> {
    Json(service.catalog().regions())
}

async fn parks_endpoint<R: CompanyRegistry + 'static>(
    State(service): State<SharedService<R>>,
    Query(filter): Query<AreaFilter>,
) -> Json<ParkListResponse> {
    let catalog = service.catalog();
    let parks: Vec<ParkProfile> = catalog.filter(&filter).cloned().collect();
    Json(ParkListResponse {
        scope: filter.describe(),
        total: catalog.len(),
        parks,
    })
}

async fn park_report_endpoint<R: CompanyRegistry + 'static>(
    State(service): State<SharedService<R>>,
    Path(park_id): Path<String>,
) -> Result<Json<ParkReport>, AppError> {
    let report = service.park_report(&park_id).await?;
    Ok(Json(report))
}

async fn park_document_endpoint<R: CompanyRegistry + 'static>(
    State(service): State<SharedService<R>>,
    Path(park_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let report = service.park_report(&park_id).await?;
    let file_name = document_file_name(&report.park.name, Utc::now().date_naive(), "md");
    Ok(attachment(
        "text/markdown; charset=utf-8",
        &file_name,
        render_park_document(&report),
    ))
}

async fn area_report_endpoint<R: CompanyRegistry + 'static>(
    State(service): State<SharedService<R>>,
    Json(filter): Json<AreaFilter>,
) -> Result<Json<AreaReport>, AppError> {
    let report = service.area_report(&filter).await?;
    Ok(Json(report))
}

async fn area_export_endpoint<R: CompanyRegistry + 'static>(
    State(service): State<SharedService<R>>,
    Query(filter): Query<AreaFilter>,
) -> Result<impl IntoResponse, AppError> {
    let report = service.area_report(&filter).await?;
    let csv = area_csv_string(&report)?;
    let file_name = document_file_name(&report.scope, Utc::now().date_naive(), "csv");
    Ok(attachment("text/csv; charset=utf-8", &file_name, csv))
}

fn attachment(content_type: &'static str, file_name: &str, body: String) -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    )
}
