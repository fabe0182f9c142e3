//! Stateless endpoints exposing the stats calculator and alert generator.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use crate::academic::{CourseRegistration, Language};
use crate::types::PortalState;

#[derive(Debug, Deserialize)]
pub struct StatsRequest {
    #[serde(default)]
    pub registrations: Vec<CourseRegistration>,
    pub student_level: u8,
    #[serde(default)]
    pub earned_hours: u32,
}

/// Registrations are kept as raw JSON so a non-list payload yields no
/// alerts instead of a rejection.
#[derive(Debug, Deserialize)]
pub struct AlertsRequest {
    #[serde(default)]
    pub registrations: Value,
    pub student_level: u8,
    #[serde(default)]
    pub earned_hours: u32,
    #[serde(default)]
    pub language: Language,
}

/// POST /academic/stats
pub async fn post_stats(
    State(s): State<Arc<PortalState>>,
    Json(body): Json<StatsRequest>,
) -> Response {
    info!(
        "POST /academic/stats ({} registrations, level {})",
        body.registrations.len(),
        body.student_level
    );

    let stats = s
        .processor
        .compute_stats(&body.registrations, body.student_level, body.earned_hours);
    (StatusCode::OK, Json(stats)).into_response()
}

/// POST /academic/alerts
pub async fn post_alerts(
    State(s): State<Arc<PortalState>>,
    Json(body): Json<AlertsRequest>,
) -> Response {
    info!("POST /academic/alerts (level {})", body.student_level);

    let alerts = s.processor.generate_alerts_from_value(
        &body.registrations,
        body.student_level,
        body.earned_hours,
        body.language,
    );
    (StatusCode::OK, Json(alerts)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::academic::AcademicProgressProcessor;
    use crate::local::LocalStore;
    use crate::remote::{RemoteClient, RemoteConfig};
    use serde_json::json;

    fn state() -> Arc<PortalState> {
        Arc::new(PortalState {
            remote: RemoteClient::new(RemoteConfig::default()).unwrap(),
            local: LocalStore::in_memory().unwrap(),
            processor: AcademicProgressProcessor::default(),
        })
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_stats_endpoint() {
        let body: StatsRequest = serde_json::from_value(json!({
            "registrations": [
                { "id": "r1", "course_id": "c1", "status": "approved",
                  "course": { "code": "C1", "credit_hours": 20 } }
            ],
            "student_level": 1
        }))
        .unwrap();

        let response = post_stats(State(state()), Json(body)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["progressPercentage"], 100);
        assert_eq!(json["remainingCreditHours"], 0);
        assert_eq!(json["totalApprovedCourses"], 1);
    }

    #[tokio::test]
    async fn test_alerts_endpoint_tolerates_non_list() {
        let body: AlertsRequest = serde_json::from_value(json!({
            "registrations": "oops",
            "student_level": 1,
            "language": "en"
        }))
        .unwrap();

        let response = post_alerts(State(state()), Json(body)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([]));
    }
}
