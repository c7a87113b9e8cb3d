//! Axum route handlers for the daily check HTTP API.

use crate::dashboard;
use crate::day::parse_day;
use crate::error::{DailyCheckError, Result};
use crate::service::DayService;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use chrono::NaiveDate;
use daily_check_types::{DayRecord, ErrorResponse};
use std::path::Path as FsPath;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};

pub struct AppState {
    pub service: DayService,
    pub api_url: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(msg: impl Into<String>) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(msg)))
}

fn internal_error(msg: impl Into<String>) -> ApiError {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::new(msg)))
}

pub fn router(state: Arc<AppState>, web_dir: &FsPath) -> Router {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/member/:member_id/day/:day", get(get_day))
        .route("/member/:member_id/day", get(missing_day).post(post_day))
        .route("/member/:member_id/day/", get(missing_day))
        // Empty member IDs.
        .route("/member//day/:day", get(missing_member))
        .route("/member//day/", get(missing_member))
        .route("/member//day", get(missing_member).post(missing_member))
        .nest_service("/web/build", ServeDir::new(web_dir.join("build")))
        .route_service(
            "/web/public/images/favicon.ico",
            ServeFile::new(web_dir.join("public/images/favicon.ico")),
        )
        .with_state(state)
        .layer(CorsLayer::permissive())
}

fn into_api_error(e: DailyCheckError, member_id: &str, failure: &str) -> ApiError {
    if e.is_client_error() {
        log::debug!("rejected request (member={:?}): {}", member_id, e);
        return bad_request(e.to_string());
    }
    log::error!("{} (member={}): {}", failure, member_id, e);
    internal_error(failure)
}

fn parse_day_param(member_id: &str, day: &str) -> Result<NaiveDate> {
    if member_id.is_empty() {
        return Err(DailyCheckError::InvalidInput(
            "invalid or missing memberID param".into(),
        ));
    }
    parse_day(day)
        .map_err(|_| DailyCheckError::InvalidInput("invalid or missing day param".into()))
}

// GET /member/:member_id/day/:day
pub async fn get_day(
    State(state): State<Arc<AppState>>,
    path: std::result::Result<Path<(String, String)>, PathRejection>,
) -> std::result::Result<Json<DayRecord>, ApiError> {
    let Path((member_id, day)) = path.map_err(|rejection| bad_request(rejection.body_text()))?;
    parse_day_param(&member_id, &day)
        .and_then(|date| state.service.get_day(&member_id, date))
        .map(Json)
        .map_err(|e| into_api_error(e, &member_id, "failed to get day datas"))
}

// POST /member/:member_id/day
pub async fn post_day(
    State(state): State<Arc<AppState>>,
    path: std::result::Result<Path<String>, PathRejection>,
    body: std::result::Result<Json<DayRecord>, JsonRejection>,
) -> std::result::Result<(StatusCode, Json<DayRecord>), ApiError> {
    let Path(member_id) = path.map_err(|rejection| bad_request(rejection.body_text()))?;
    body.map_err(|rejection| DailyCheckError::InvalidInput(rejection.body_text()))
        .and_then(|Json(record)| {
            if member_id.is_empty() {
                return Err(DailyCheckError::InvalidInput("missing memberID".into()));
            }
            state.service.add_day(&member_id, record)
        })
        .map(|saved| (StatusCode::CREATED, Json(saved)))
        .map_err(|e| into_api_error(e, &member_id, "failed to add day datas"))
}

pub async fn missing_member() -> ApiError {
    bad_request("invalid or missing memberID param")
}

pub async fn missing_day() -> ApiError {
    bad_request("invalid or missing day param")
}
