//! Per-student registration and dashboard endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};

use crate::academic::Language;
use crate::accounts;
use crate::server::types::ApiErrorType;
use crate::types::PortalState;

/// Query parameters for the dashboard endpoint.
#[derive(Debug, Deserialize)]
pub struct DashboardQueryParams {
    #[serde(default = "default_level")]
    pub level: u8,
    #[serde(default)]
    pub earned_hours: u32,
    #[serde(default)]
    pub lang: Language,
}

fn default_level() -> u8 {
    1
}

/// GET /students/:id/registrations
pub async fn get_registrations(
    Path(student_id): Path<String>,
    State(s): State<Arc<PortalState>>,
) -> Response {
    info!("GET /students/{}/registrations", student_id);

    match accounts::registrations(&s, &student_id).await {
        Ok(registrations) => (StatusCode::OK, Json(registrations)).into_response(),
        Err(e) => {
            error!("Failed to fetch registrations for {}: {}", student_id, e);
            ApiErrorType::from(e).into_response()
        }
    }
}

/// GET /students/:id/dashboard
///
/// Query parameters:
/// - `level` (optional): Student level, defaults to 1
/// - `earned_hours` (optional): Hours from prior terms, defaults to 0
/// - `lang` (optional): `ar` or `en`
pub async fn get_dashboard(
    Path(student_id): Path<String>,
    State(s): State<Arc<PortalState>>,
    Query(params): Query<DashboardQueryParams>,
) -> Response {
    info!(
        "GET /students/{}/dashboard (level={}, earned_hours={})",
        student_id, params.level, params.earned_hours
    );

    match accounts::dashboard(
        &s,
        &student_id,
        params.level,
        params.earned_hours,
        params.lang,
    )
    .await
    {
        Ok(dashboard) => (StatusCode::OK, Json(dashboard)).into_response(),
        Err(e) => {
            error!("Failed to build dashboard for {}: {}", student_id, e);
            ApiErrorType::from(e).into_response()
        }
    }
}
